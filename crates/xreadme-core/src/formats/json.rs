// SPDX-License-Identifier: AGPL-3.0-or-later
//! JSON block-tree handler, for hosts that hand over the structural tree

use crate::ast::Block;
use crate::traits::{ConversionError, ParseConfig, Parser, RenderConfig, Renderer, Result};

/// Reads and writes the tree as a JSON array of tagged blocks
pub struct JsonTreeHandler;

impl JsonTreeHandler {
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonTreeHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser for JsonTreeHandler {
    fn parse(&self, input: &str, _config: &ParseConfig) -> Result<Vec<Block>> {
        serde_json::from_str(input).map_err(|e| ConversionError::ParseError {
            line: e.line(),
            column: e.column(),
            message: e.to_string(),
        })
    }
}

impl Renderer for JsonTreeHandler {
    fn render(&self, blocks: &[Block], _config: &RenderConfig) -> Result<String> {
        serde_json::to_string_pretty(blocks)
            .map_err(|e| ConversionError::SerializationError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tree() {
        let input = r#"[
            {"type": "heading", "level": 2, "content": [{"type": "text", "content": "Usage"}]},
            {"type": "thematic_break"}
        ]"#;
        let blocks = JsonTreeHandler::new()
            .parse(input, &ParseConfig::default())
            .unwrap();
        assert_eq!(blocks, vec![Block::heading(2, "Usage"), Block::ThematicBreak]);
    }

    #[test]
    fn test_malformed_tree_reports_position() {
        let err = JsonTreeHandler::new()
            .parse("[{\"type\": \"heading\",", &ParseConfig::default())
            .unwrap_err();
        assert!(matches!(err, ConversionError::ParseError { line: 1, .. }));
    }
}
