// SPDX-License-Identifier: AGPL-3.0-or-later
//! Parser and Renderer traits for markup handlers

use crate::ast::Block;

/// Error type for parsing and rendering
#[derive(Debug, thiserror::Error)]
pub enum ConversionError {
    #[error("Parse error at line {line}, column {column}: {message}")]
    ParseError {
        line: usize,
        column: usize,
        message: String,
    },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

pub type Result<T> = std::result::Result<T, ConversionError>;

/// Configuration for parsing
#[derive(Debug, Clone, Default)]
pub struct ParseConfig {
    /// Keep blocks the tree does not model as Raw nodes instead of dropping them
    pub preserve_unknown: bool,
}

/// Which flavour of markup a renderer writes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkupStyle {
    /// The editing surface's own serialized form
    Editor,
    /// GitHub-flavoured Markdown as written into the README
    Readme,
}

/// Configuration for rendering
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Marker used for bullet list items
    pub bullet_marker: char,
    /// Delimiter used for emphasis spans
    pub emphasis_marker: char,
}

impl RenderConfig {
    pub fn for_style(style: MarkupStyle) -> Self {
        match style {
            MarkupStyle::Editor => Self {
                bullet_marker: '*',
                emphasis_marker: '_',
            },
            MarkupStyle::Readme => Self {
                bullet_marker: '-',
                emphasis_marker: '*',
            },
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self::for_style(MarkupStyle::Readme)
    }
}

/// Parser trait: convert markup to a block tree
pub trait Parser {
    /// Parse a string into blocks
    fn parse(&self, input: &str, config: &ParseConfig) -> Result<Vec<Block>>;
}

/// Renderer trait: convert a block tree to markup
pub trait Renderer {
    /// Render blocks to a string
    fn render(&self, blocks: &[Block], config: &RenderConfig) -> Result<String>;
}
