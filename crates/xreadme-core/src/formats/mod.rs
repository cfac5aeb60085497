// SPDX-License-Identifier: AGPL-3.0-or-later
//! Markup handlers for the content tree

pub mod escape;
pub mod json;
pub mod markdown;

pub use json::JsonTreeHandler;
pub use markdown::MarkdownHandler;
