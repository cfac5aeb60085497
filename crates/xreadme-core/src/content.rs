// SPDX-License-Identifier: AGPL-3.0-or-later
//! Rich content model behind the editing surface
//!
//! Outside callers see the tree only through two operations: serialize it to
//! editor markup, or replace all of it. Section headings are added and
//! stripped by building a new tree and replacing the old one wholesale.

use crate::ast::{inlines_plain_text, Block};
use crate::formats::{JsonTreeHandler, MarkdownHandler};
use crate::traits::{MarkupStyle, ParseConfig, Parser, RenderConfig, Renderer};

/// Level used for headings appended by the section registry
pub const SECTION_HEADING_LEVEL: u8 = 2;

/// New content for [`RichContent::replace_content`]
#[derive(Debug, Clone)]
pub enum ContentSource {
    /// Editor markup, as produced by [`RichContent::serialize_to_markup`]
    Markup(String),
    /// The block tree as a JSON array
    Json(String),
    /// A block tree built in memory
    Tree(Vec<Block>),
}

/// Caret position: block index and character offset within it
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cursor {
    pub block: usize,
    pub offset: usize,
}

/// The authored body of the README
#[derive(Debug, Clone, Default)]
pub struct RichContent {
    blocks: Vec<Block>,
    cursor: Cursor,
}

impl RichContent {
    /// Create an empty body
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a body from any content source
    pub fn from_source(source: ContentSource) -> Self {
        let mut content = Self::new();
        content.replace_content(source);
        content
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Move the caret; the block index is clamped to the tree
    pub fn set_cursor(&mut self, cursor: Cursor) {
        let last = self.blocks.len().saturating_sub(1);
        self.cursor = Cursor {
            block: cursor.block.min(last),
            offset: cursor.offset,
        };
    }

    /// Deterministic editor markup for the current tree
    pub fn serialize_to_markup(&self) -> String {
        let config = RenderConfig::for_style(MarkupStyle::Editor);
        match MarkdownHandler::new().render(&self.blocks, &config) {
            Ok(markup) => markup,
            Err(e) => {
                tracing::warn!("Failed to serialize content: {}", e);
                String::new()
            }
        }
    }

    /// The block tree as a JSON array, readable by `ContentSource::Json`
    pub fn serialize_to_json(&self) -> crate::traits::Result<String> {
        JsonTreeHandler::new().render(&self.blocks, &RenderConfig::default())
    }

    /// Replace the whole tree and reset the cursor to the start.
    ///
    /// Input that cannot be parsed leaves an empty document behind.
    pub fn replace_content(&mut self, source: ContentSource) {
        let config = ParseConfig {
            preserve_unknown: true,
        };
        let parsed = match source {
            ContentSource::Markup(markup) => MarkdownHandler::new().parse(&markup, &config),
            ContentSource::Json(json) => JsonTreeHandler::new().parse(&json, &config),
            ContentSource::Tree(blocks) => Ok(blocks),
        };

        let mut blocks = parsed.unwrap_or_else(|e| {
            tracing::warn!("Discarding malformed content: {}", e);
            Vec::new()
        });
        blocks.iter_mut().for_each(Block::normalize);

        self.blocks = blocks;
        self.cursor = Cursor::default();
    }

    /// Append a level-2 heading titled `name` at the end of the tree
    pub fn append_section(&mut self, name: &str) {
        let mut blocks = self.blocks.clone();
        blocks.push(Block::heading(SECTION_HEADING_LEVEL, name));
        self.replace_content(ContentSource::Tree(blocks));
    }

    /// Remove every top-level heading titled `name`, along with its body up
    /// to the next heading of equal or higher rank. Returns how many
    /// headings were removed.
    pub fn strip_section(&mut self, name: &str) -> usize {
        let name = name.trim();
        let mut kept = Vec::with_capacity(self.blocks.len());
        let mut skipping: Option<u8> = None;
        let mut removed = 0;

        for block in &self.blocks {
            if let Block::Heading { level, content } = block {
                if skipping.is_some_and(|open| *level <= open) {
                    skipping = None;
                }
                if skipping.is_none() && inlines_plain_text(content).trim() == name {
                    skipping = Some(*level);
                    removed += 1;
                    continue;
                }
            }
            if skipping.is_none() {
                kept.push(block.clone());
            }
        }

        if removed == 0 {
            tracing::debug!("No heading titled {:?} to strip", name);
            return 0;
        }

        self.replace_content(ContentSource::Tree(kept));
        removed
    }

    /// Level and plain-text title of each top-level heading, in document order
    pub fn headings(&self) -> Vec<(u8, String)> {
        self.blocks
            .iter()
            .filter_map(|b| Some((b.heading_level()?, b.plain_text().trim().to_string())))
            .collect()
    }

    /// Count words in the body
    pub fn word_count(&self) -> usize {
        self.blocks.iter().map(Block::word_count).sum()
    }

    #[cfg(test)]
    pub(crate) fn blocks(&self) -> &[Block] {
        &self.blocks
    }
}
