// SPDX-License-Identifier: AGPL-3.0-or-later
//! Editor markup to README markdown conversion
//!
//! Conversion is best effort and never fails. Constructs the content tree
//! does not model (tables, task lists, footnotes, raw HTML) are copied
//! through from the source text unchanged.

use crate::formats::MarkdownHandler;
use crate::traits::{MarkupStyle, ParseConfig, Parser, RenderConfig, Renderer};

/// Stateless converter from editor markup to the README dialect
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkupConverter;

impl MarkupConverter {
    pub fn new() -> Self {
        Self
    }

    /// Convert editor markup to README markdown
    pub fn convert(&self, markup: &str) -> String {
        let handler = MarkdownHandler::new();
        let parse_config = ParseConfig {
            preserve_unknown: true,
        };

        let blocks = match handler.parse(markup, &parse_config) {
            Ok(blocks) => blocks,
            Err(e) => {
                tracing::debug!("Passing markup through unconverted: {}", e);
                return markup.to_string();
            }
        };

        handler
            .render(&blocks, &RenderConfig::for_style(MarkupStyle::Readme))
            .unwrap_or_else(|e| {
                tracing::debug!("Passing markup through unconverted: {}", e);
                markup.to_string()
            })
    }

    /// Render markup to HTML for a preview pane
    pub fn preview_html(&self, markup: &str) -> String {
        MarkdownHandler::new().to_html(markup)
    }
}
