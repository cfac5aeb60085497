// SPDX-License-Identifier: AGPL-3.0-or-later
//! Markdown handler using comrak

use crate::ast::{Block, Inline, ListItem, ListKind};
use crate::formats::escape::{escape_text, fence_length, inline_code_ticks};
use crate::traits::{ParseConfig, Parser, RenderConfig, Renderer, Result};
use comrak::nodes::{AstNode, ListType, NodeValue};
use comrak::{markdown_to_html, parse_document, Arena, Options};

/// Markdown handler (CommonMark plus GFM strikethrough)
pub struct MarkdownHandler;

impl MarkdownHandler {
    pub fn new() -> Self {
        Self
    }

    /// Tables, task lists and footnotes are recognized by the parser only so
    /// they can be carried through verbatim; the tree does not model them.
    fn comrak_options() -> Options<'static> {
        let mut options = Options::default();
        options.extension.strikethrough = true;
        options.extension.table = true;
        options.extension.tasklist = true;
        options.extension.footnotes = true;
        options
    }

    /// Render markup to HTML for previewing
    pub fn to_html(&self, input: &str) -> String {
        markdown_to_html(input, &Self::comrak_options())
    }
}

impl Default for MarkdownHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser for MarkdownHandler {
    fn parse(&self, input: &str, config: &ParseConfig) -> Result<Vec<Block>> {
        let arena = Arena::new();
        let options = Self::comrak_options();
        let root = parse_document(&arena, input, &options);

        let builder = TreeBuilder {
            source_lines: input.lines().collect(),
            preserve_unknown: config.preserve_unknown,
        };
        Ok(builder.blocks(root))
    }
}

/// Walks a comrak tree, keeping the source around for verbatim pass-through
struct TreeBuilder<'s> {
    source_lines: Vec<&'s str>,
    preserve_unknown: bool,
}

impl<'s> TreeBuilder<'s> {
    fn blocks<'a>(&self, node: &'a AstNode<'a>) -> Vec<Block> {
        node.children()
            .filter_map(|child| self.block(child))
            .collect()
    }

    fn block<'a>(&self, node: &'a AstNode<'a>) -> Option<Block> {
        let data = node.data.borrow();

        match &data.value {
            NodeValue::Paragraph => Some(Block::Paragraph {
                content: self.inlines(node),
            }),

            NodeValue::Heading(heading) => Some(Block::Heading {
                level: heading.level,
                content: self.inlines(node),
            }),

            NodeValue::CodeBlock(code) => Some(Block::CodeBlock {
                language: code
                    .info
                    .split_whitespace()
                    .next()
                    .map(|lang| lang.to_string()),
                content: code.literal.clone(),
            }),

            NodeValue::BlockQuote => Some(Block::BlockQuote {
                content: self.blocks(node),
            }),

            NodeValue::List(list) => {
                let has_tasks = node
                    .children()
                    .any(|child| matches!(child.data.borrow().value, NodeValue::TaskItem(..)));
                if has_tasks {
                    return self.raw(node, "task list");
                }

                let kind = if list.list_type == ListType::Ordered {
                    ListKind::Ordered
                } else {
                    ListKind::Bullet
                };

                let items = node
                    .children()
                    .map(|child| ListItem {
                        content: self.blocks(child),
                    })
                    .collect();

                let start = match kind {
                    ListKind::Ordered if list.start != 1 => u32::try_from(list.start).ok(),
                    _ => None,
                };

                Some(Block::List { kind, items, start })
            }

            NodeValue::ThematicBreak => Some(Block::ThematicBreak),

            NodeValue::HtmlBlock(html) => Some(Block::Raw {
                content: html.literal.trim_end_matches('\n').to_string(),
            }),

            NodeValue::Document | NodeValue::Item(_) => None,

            _ => self.raw(node, "block"),
        }
    }

    /// Copy a node's source lines verbatim, if pass-through is enabled
    fn raw<'a>(&self, node: &'a AstNode<'a>, what: &str) -> Option<Block> {
        if !self.preserve_unknown {
            tracing::debug!("Dropping unsupported {}", what);
            return None;
        }

        let pos = node.data.borrow().sourcepos;
        let first = pos.start.line.checked_sub(1)?;
        let last = pos.end.line.checked_sub(1)?;
        let lines = self.source_lines.get(first..=last)?;

        let column = pos.start.column.saturating_sub(1);
        let mut content = String::new();
        for (i, line) in lines.iter().copied().enumerate() {
            if i == 0 {
                content.push_str(line.get(column..).unwrap_or(line));
            } else {
                content.push('\n');
                content.push_str(strip_container_prefix(line, column));
            }
        }

        tracing::debug!(
            "Passing through unsupported {} at line {}",
            what,
            pos.start.line
        );
        Some(Block::Raw {
            content: content.trim_end().to_string(),
        })
    }

    fn inlines<'a>(&self, node: &'a AstNode<'a>) -> Vec<Inline> {
        let mut out = Vec::new();
        for child in node.children() {
            self.inline(child, &mut out);
        }
        out
    }

    fn inline<'a>(&self, node: &'a AstNode<'a>, out: &mut Vec<Inline>) {
        let data = node.data.borrow();

        let inline = match &data.value {
            NodeValue::Text(text) => Inline::Text {
                content: text.to_string(),
            },

            NodeValue::SoftBreak => Inline::SoftBreak,

            NodeValue::LineBreak => Inline::LineBreak,

            NodeValue::Code(code) => Inline::Code {
                content: code.literal.clone(),
            },

            NodeValue::Emph => Inline::Emphasis {
                content: self.inlines(node),
            },

            NodeValue::Strong => Inline::Strong {
                content: self.inlines(node),
            },

            NodeValue::Strikethrough => Inline::Strikethrough {
                content: self.inlines(node),
            },

            NodeValue::Link(link) => Inline::Link {
                url: link.url.clone(),
                title: non_empty(&link.title),
                content: self.inlines(node),
            },

            NodeValue::Image(image) => Inline::Image {
                url: image.url.clone(),
                alt: crate::ast::inlines_plain_text(&self.inlines(node)),
                title: non_empty(&image.title),
            },

            NodeValue::HtmlInline(html) => Inline::RawInline {
                content: html.to_string(),
            },

            NodeValue::FootnoteReference(footnote) => Inline::RawInline {
                content: format!("[^{}]", footnote.name),
            },

            _ => {
                // Unknown span: keep whatever text it wraps
                tracing::debug!("Flattening unsupported inline");
                out.extend(self.inlines(node));
                return;
            }
        };

        out.push(inline);
    }
}

/// Drop the quote markers and indentation an enclosing container put in
/// front of a continuation line, up to the node's own start column
fn strip_container_prefix(line: &str, column: usize) -> &str {
    let mut cut = 0;
    for (i, c) in line.char_indices() {
        if i >= column || !matches!(c, ' ' | '\t' | '>') {
            break;
        }
        cut = i + c.len_utf8();
    }
    &line[cut..]
}

fn non_empty(s: &str) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

impl Renderer for MarkdownHandler {
    fn render(&self, blocks: &[Block], config: &RenderConfig) -> Result<String> {
        Ok(render_blocks(blocks, config))
    }
}

fn render_blocks(blocks: &[Block], config: &RenderConfig) -> String {
    let mut output = String::new();

    for (i, block) in blocks.iter().enumerate() {
        if i > 0 {
            output.push_str("\n\n");
        }
        render_block(&mut output, block, config);
    }

    output
}

fn render_block(output: &mut String, block: &Block, config: &RenderConfig) {
    match block {
        Block::Paragraph { content } => {
            render_inlines(output, content, config);
        }

        Block::Heading { level, content } => {
            output.push_str(&"#".repeat(usize::from(*level)));
            let mut text = String::new();
            render_inlines(&mut text, content, config);
            let text = text.replace('\n', " ");
            let text = text.trim();
            if !text.is_empty() {
                output.push(' ');
                push_heading_text(output, text);
            }
        }

        Block::CodeBlock { language, content } => {
            let fence = "`".repeat(fence_length(content));
            output.push_str(&fence);
            if let Some(lang) = language {
                output.push_str(lang);
            }
            output.push('\n');
            output.push_str(content);
            if !content.is_empty() && !content.ends_with('\n') {
                output.push('\n');
            }
            output.push_str(&fence);
        }

        Block::BlockQuote { content } => {
            let inner = render_blocks(content, config);
            if inner.is_empty() {
                output.push('>');
                return;
            }
            let quoted = inner
                .lines()
                .map(|line| {
                    if line.is_empty() {
                        ">".to_string()
                    } else {
                        format!("> {}", line)
                    }
                })
                .collect::<Vec<_>>()
                .join("\n");
            output.push_str(&quoted);
        }

        Block::List { kind, items, start } => {
            let first = start.unwrap_or(1);
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    output.push('\n');
                }
                let marker = match kind {
                    ListKind::Bullet => format!("{} ", config.bullet_marker),
                    ListKind::Ordered => format!("{}. ", u64::from(first) + i as u64),
                };
                render_list_item(output, &marker, item, config);
            }
        }

        Block::ThematicBreak => {
            output.push_str("---");
        }

        Block::Raw { content } => {
            output.push_str(content.trim_end_matches('\n'));
        }
    }
}

/// A trailing run of `#` would be read back as a closing sequence
fn push_heading_text(output: &mut String, text: &str) {
    let body = text.trim_end_matches('#');
    if body.len() == text.len() || body.ends_with('\\') {
        output.push_str(text);
    } else {
        output.push_str(body);
        output.push('\\');
        output.push_str(&text[body.len()..]);
    }
}

/// Render one list item, indenting continuation lines to the item's content column
fn render_list_item(output: &mut String, marker: &str, item: &ListItem, config: &RenderConfig) {
    let mut body = String::new();
    for (i, block) in item.content.iter().enumerate() {
        if i > 0 {
            // A nested list right after the item text stays tight
            body.push_str(if opens_list(block) {
                "\n"
            } else {
                "\n\n"
            });
        }
        render_block(&mut body, block, config);
    }

    if body.is_empty() {
        output.push_str(marker.trim_end());
        return;
    }

    let continuation = " ".repeat(marker.len());
    for (i, line) in body.lines().enumerate() {
        if i == 0 {
            output.push_str(marker);
            output.push_str(line);
        } else {
            output.push('\n');
            if !line.is_empty() {
                output.push_str(&continuation);
                output.push_str(line);
            }
        }
    }
}

/// Lists, including task lists carried through as raw markup
fn opens_list(block: &Block) -> bool {
    match block {
        Block::List { .. } => true,
        Block::Raw { content } => {
            let digits = content.bytes().take_while(u8::is_ascii_digit).count();
            let rest = &content[digits..];
            let after_marker = if digits > 0 {
                rest.strip_prefix(['.', ')'])
            } else {
                rest.strip_prefix(['-', '+', '*'])
            };
            after_marker.is_some_and(|r| r.starts_with([' ', '\t']))
        }
        _ => false,
    }
}

fn render_inlines(output: &mut String, inlines: &[Inline], config: &RenderConfig) {
    let mut i = 0;
    while i < inlines.len() {
        // Adjacent text runs are escaped as one so markers split across runs are seen
        if let Inline::Text { .. } = inlines[i] {
            let mut run = String::new();
            while let Some(Inline::Text { content }) = inlines.get(i) {
                run.push_str(content);
                i += 1;
            }
            push_text(output, &run);
            continue;
        }
        render_inline(output, &inlines[i], config);
        i += 1;
    }
}

fn push_text(output: &mut String, text: &str) {
    let line_start = output.is_empty() || output.ends_with('\n');
    output.push_str(&escape_text(text, line_start));
}

fn render_inline(output: &mut String, inline: &Inline, config: &RenderConfig) {
    match inline {
        Inline::Text { content } => push_text(output, content),

        Inline::Emphasis { content } => {
            output.push(config.emphasis_marker);
            render_inlines(output, content, config);
            output.push(config.emphasis_marker);
        }

        Inline::Strong { content } => {
            output.push_str("**");
            render_inlines(output, content, config);
            output.push_str("**");
        }

        Inline::Strikethrough { content } => {
            output.push_str("~~");
            render_inlines(output, content, config);
            output.push_str("~~");
        }

        Inline::Code { content } => {
            let ticks = "`".repeat(inline_code_ticks(content));
            let pad = content.starts_with('`')
                || content.ends_with('`')
                || (content.starts_with(' ')
                    && content.ends_with(' ')
                    && !content.trim().is_empty());
            output.push_str(&ticks);
            if pad {
                output.push(' ');
            }
            output.push_str(content);
            if pad {
                output.push(' ');
            }
            output.push_str(&ticks);
        }

        Inline::Link {
            url,
            title,
            content,
        } => {
            output.push('[');
            render_inlines(output, content, config);
            output.push_str("](");
            push_destination(output, url, title.as_deref());
            output.push(')');
        }

        Inline::Image { url, alt, title } => {
            output.push_str("![");
            output.push_str(&escape_text(alt, false));
            output.push_str("](");
            push_destination(output, url, title.as_deref());
            output.push(')');
        }

        Inline::LineBreak => {
            output.push_str("\\\n");
        }

        Inline::SoftBreak => {
            output.push('\n');
        }

        Inline::RawInline { content } => {
            output.push_str(content);
        }
    }
}

fn push_destination(output: &mut String, url: &str, title: Option<&str>) {
    if url.contains(' ') {
        output.push('<');
        output.push_str(url);
        output.push('>');
    } else {
        output.push_str(url);
    }
    if let Some(t) = title {
        output.push_str(&format!(" \"{}\"", t.replace('"', "\\\"")));
    }
}
