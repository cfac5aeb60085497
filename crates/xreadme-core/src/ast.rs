// SPDX-License-Identifier: AGPL-3.0-or-later
//! Rich content tree edited through the editing surface
//!
//! The node set mirrors what the editor toolbar can produce: headings 1-3,
//! paragraphs, emphasis spans, lists, code blocks and quotes. Anything else
//! that arrives through markup is kept as a Raw node so it can be written
//! back out untouched.

use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

/// Deepest heading level the editor offers
pub const MAX_HEADING_LEVEL: u8 = 3;

/// Block-level elements (structural)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    /// Plain paragraph
    Paragraph { content: Vec<Inline> },

    /// Heading with level 1-3
    Heading { level: u8, content: Vec<Inline> },

    /// Fenced code block with optional language
    CodeBlock {
        language: Option<String>,
        content: String,
    },

    /// Block quote (may be nested)
    BlockQuote { content: Vec<Block> },

    /// Ordered or unordered list
    List {
        kind: ListKind,
        items: Vec<ListItem>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        start: Option<u32>,
    },

    /// Horizontal rule
    ThematicBreak,

    /// Markup the tree does not model, kept verbatim
    Raw { content: String },
}

impl Block {
    /// Build a heading holding a single text run
    pub fn heading(level: u8, text: impl Into<String>) -> Self {
        let text = text.into();
        let content = if text.is_empty() {
            Vec::new()
        } else {
            vec![Inline::text(text)]
        };
        Block::Heading {
            level: level.clamp(1, MAX_HEADING_LEVEL),
            content,
        }
    }

    /// Build a paragraph holding a single text run
    pub fn paragraph(text: impl Into<String>) -> Self {
        Block::Paragraph {
            content: vec![Inline::text(text)],
        }
    }

    /// Heading level, if this block is a heading
    pub fn heading_level(&self) -> Option<u8> {
        match self {
            Block::Heading { level, .. } => Some(*level),
            _ => None,
        }
    }

    /// Text of the block with all markup removed
    pub fn plain_text(&self) -> String {
        match self {
            Block::Paragraph { content } | Block::Heading { content, .. } => {
                inlines_plain_text(content)
            }
            Block::CodeBlock { content, .. } | Block::Raw { content } => content.clone(),
            Block::BlockQuote { content } => content
                .iter()
                .map(Block::plain_text)
                .collect::<Vec<_>>()
                .join("\n"),
            Block::List { items, .. } => items
                .iter()
                .flat_map(|item| &item.content)
                .map(Block::plain_text)
                .collect::<Vec<_>>()
                .join("\n"),
            Block::ThematicBreak => String::new(),
        }
    }

    /// Count words in this block
    pub fn word_count(&self) -> usize {
        match self {
            Block::Paragraph { content } | Block::Heading { content, .. } => {
                content.iter().map(Inline::word_count).sum()
            }
            Block::CodeBlock { content, .. } => content.unicode_words().count(),
            Block::BlockQuote { content } => content.iter().map(Block::word_count).sum(),
            Block::List { items, .. } => items
                .iter()
                .flat_map(|i| &i.content)
                .map(Block::word_count)
                .sum(),
            Block::ThematicBreak | Block::Raw { .. } => 0,
        }
    }

    /// Clamp heading levels into the editor's range, recursing into containers
    pub(crate) fn normalize(&mut self) {
        match self {
            Block::Heading { level, .. } => *level = (*level).clamp(1, MAX_HEADING_LEVEL),
            Block::BlockQuote { content } => content.iter_mut().for_each(Block::normalize),
            Block::List { items, .. } => items
                .iter_mut()
                .flat_map(|i| i.content.iter_mut())
                .for_each(Block::normalize),
            _ => {}
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListKind {
    Bullet,
    Ordered,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListItem {
    pub content: Vec<Block>,
}

/// Inline elements (character-level)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Inline {
    /// Plain text
    Text { content: String },

    /// Emphasis (italic)
    Emphasis { content: Vec<Inline> },

    /// Strong emphasis (bold)
    Strong { content: Vec<Inline> },

    /// Strikethrough
    Strikethrough { content: Vec<Inline> },

    /// Inline code
    Code { content: String },

    /// Hyperlink
    Link {
        url: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        title: Option<String>,
        content: Vec<Inline>,
    },

    /// Image
    Image {
        url: String,
        alt: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        title: Option<String>,
    },

    /// Hard line break
    LineBreak,

    /// Soft break (newline inside a paragraph)
    SoftBreak,

    /// Inline markup the tree does not model, kept verbatim
    RawInline { content: String },
}

impl Inline {
    pub fn text(content: impl Into<String>) -> Self {
        Inline::Text {
            content: content.into(),
        }
    }

    /// Count words in this inline element
    pub fn word_count(&self) -> usize {
        match self {
            Inline::Text { content } | Inline::Code { content } => {
                content.unicode_words().count()
            }
            Inline::Emphasis { content }
            | Inline::Strong { content }
            | Inline::Strikethrough { content }
            | Inline::Link { content, .. } => content.iter().map(Inline::word_count).sum(),
            _ => 0,
        }
    }

    fn push_plain_text(&self, out: &mut String) {
        match self {
            Inline::Text { content } | Inline::Code { content } => out.push_str(content),
            Inline::Emphasis { content }
            | Inline::Strong { content }
            | Inline::Strikethrough { content }
            | Inline::Link { content, .. } => {
                content.iter().for_each(|i| i.push_plain_text(out));
            }
            Inline::Image { alt, .. } => out.push_str(alt),
            Inline::LineBreak | Inline::SoftBreak => out.push(' '),
            Inline::RawInline { .. } => {}
        }
    }
}

/// Concatenate the text of a run of inlines, dropping all markup
pub fn inlines_plain_text(inlines: &[Inline]) -> String {
    let mut out = String::new();
    for inline in inlines {
        inline.push_plain_text(&mut out);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_constructor_clamps_level() {
        assert_eq!(Block::heading(6, "Deep").heading_level(), Some(3));
        assert_eq!(Block::heading(0, "Top").heading_level(), Some(1));
    }

    #[test]
    fn test_empty_heading_has_no_inlines() {
        assert_eq!(
            Block::heading(2, ""),
            Block::Heading {
                level: 2,
                content: Vec::new()
            }
        );
    }

    #[test]
    fn test_plain_text_strips_markup() {
        let block = Block::Heading {
            level: 2,
            content: vec![
                Inline::text("Getting "),
                Inline::Strong {
                    content: vec![Inline::text("started")],
                },
            ],
        };
        assert_eq!(block.plain_text(), "Getting started");
    }

    #[test]
    fn test_word_count() {
        let block = Block::paragraph("Hello world, this is a test");
        assert_eq!(block.word_count(), 6);
    }

    #[test]
    fn test_normalize_recurses_into_quotes() {
        let mut block = Block::BlockQuote {
            content: vec![Block::Heading {
                level: 5,
                content: vec![Inline::text("Quoted")],
            }],
        };
        block.normalize();
        let Block::BlockQuote { content } = block else {
            panic!("Expected blockquote");
        };
        assert_eq!(content[0].heading_level(), Some(3));
    }

    #[test]
    fn test_tree_json_shape() {
        let json = r#"[{"type":"heading","level":2,"content":[{"type":"text","content":"Usage"}]}]"#;
        let blocks: Vec<Block> = serde_json::from_str(json).unwrap();
        assert_eq!(blocks, vec![Block::heading(2, "Usage")]);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn simple_text_strategy() -> impl Strategy<Value = String> {
        "[a-zA-Z0-9 ]{0,60}".prop_map(|s| s.trim().to_string())
    }

    proptest! {
        // Headings built through the constructor always land in 1..=3
        #[test]
        fn prop_heading_level_in_range(level in any::<u8>(), text in simple_text_strategy()) {
            let level = Block::heading(level, text).heading_level().unwrap();
            prop_assert!((1..=MAX_HEADING_LEVEL).contains(&level));
        }

        // Plain-text word count agrees with unicode_words over the same text
        #[test]
        fn prop_paragraph_word_count(text in simple_text_strategy()) {
            let block = Block::paragraph(text.clone());
            prop_assert_eq!(block.word_count(), text.unicode_words().count());
        }

        // Tree JSON round-trips, which is how hosts hand over structural trees
        #[test]
        fn prop_block_serde_roundtrip(level in 1u8..=3, text in simple_text_strategy()) {
            let blocks = vec![Block::heading(level, text.clone()), Block::paragraph(text)];
            let json = serde_json::to_string(&blocks).expect("serialize");
            let back: Vec<Block> = serde_json::from_str(&json).expect("deserialize");
            prop_assert_eq!(blocks, back);
        }
    }
}
