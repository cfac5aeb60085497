// SPDX-License-Identifier: AGPL-3.0-or-later
//! XtremeREADME Core - section registry, rich content and README assembly
//!
//! This crate provides:
//! - A rich content tree with whole-document replace and markup serialization
//! - An ordered section registry that always keeps its `License` entry
//! - Conversion from editor markup to README markdown
//! - A fixed-template README assembler and the session that drives it

pub mod assembler;
pub mod ast;
pub mod config;
pub mod content;
pub mod convert;
pub mod editor;
pub mod error;
pub mod formats;
pub mod license;
pub mod sections;
pub mod session;
pub mod traits;

pub use assembler::{Assembler, ProjectMeta};
pub use ast::{Block, Inline};
pub use config::SessionConfig;
pub use content::{ContentSource, Cursor, RichContent};
pub use convert::MarkupConverter;
pub use editor::{EditorPhase, EditorSlot};
pub use error::{ConfigError, Field, GenerateError, SinkError, ValidationError};
pub use license::License;
pub use sections::{SectionRegistry, LICENSE_SECTION};
pub use session::{
    Artifact, ArtifactSink, Notification, NotificationChannel, RecommendedSection, SectionReport,
    Session,
};
pub use traits::{ConversionError, ParseConfig, Parser, RenderConfig, Renderer, Result};
