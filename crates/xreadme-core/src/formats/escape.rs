// SPDX-License-Identifier: AGPL-3.0-or-later
//! Escaping and fence sizing for rendered markup

/// Escape characters in a text run that would otherwise be read as markup.
///
/// `line_start` says whether the run begins a line of output; block
/// markers (`#`, `>`, bullets, ordered-list numbers, setext underlines)
/// only need escaping there. Underscores inside a word are left alone since
/// they cannot open emphasis there, which keeps identifiers like
/// `snake_case` readable.
pub fn escape_text(text: &str, line_start: bool) -> String {
    let mut result = String::with_capacity(text.len() + text.len() / 10);
    let chars: Vec<char> = text.chars().collect();
    let mut at_line_start = line_start;
    let mut delimiter_at = None;

    for (i, &c) in chars.iter().enumerate() {
        let prev = i.checked_sub(1).map(|p| chars[p]);
        let next = chars.get(i + 1).copied();
        if at_line_start {
            delimiter_at = ordered_list_delimiter(line_at(&chars[i..])).map(|d| i + d);
        }

        let escape = match c {
            '\\' | '*' | '`' | '[' | ']' | '<' => true,
            '_' => {
                let intraword = prev.is_some_and(char::is_alphanumeric)
                    && next.is_some_and(char::is_alphanumeric);
                !intraword
            }
            '#' | '>' => at_line_start,
            '-' | '+' | '=' => at_line_start && opens_block(line_at(&chars[i..])),
            '~' => next == Some('~') || prev == Some('~'),
            '!' => next == Some('['),
            _ => delimiter_at == Some(i),
        };

        if escape {
            result.push('\\');
        }
        result.push(c);
        at_line_start = c == '\n';
    }

    result
}

/// The chars up to the next newline
fn line_at(chars: &[char]) -> &[char] {
    let end = chars.iter().position(|&c| c == '\n').unwrap_or(chars.len());
    &chars[..end]
}

/// Whether a line starting with `-`, `+` or `=` opens a list item, a
/// thematic break or a setext underline
fn opens_block(line: &[char]) -> bool {
    let Some(&marker) = line.first() else {
        return false;
    };
    let bullet = marker != '=' && matches!(line.get(1).copied(), None | Some(' ' | '\t'));
    let rule = marker != '+' && line.iter().all(|&c| c == marker || c == ' ' || c == '\t');
    bullet || rule
}

/// Index of the `.` or `)` in a line that starts an ordered list item
fn ordered_list_delimiter(line: &[char]) -> Option<usize> {
    let digits = line.iter().take_while(|c| c.is_ascii_digit()).count();
    if digits == 0 || digits > 9 {
        return None;
    }
    match (line.get(digits).copied(), line.get(digits + 1).copied()) {
        (Some('.' | ')'), None | Some(' ' | '\t')) => Some(digits),
        _ => None,
    }
}

/// Length of a backtick fence that does not occur inside `content` (at least 3)
pub fn fence_length(content: &str) -> usize {
    longest_backtick_run(content).max(2) + 1
}

/// Number of backticks needed to delimit `content` as inline code
pub fn inline_code_ticks(content: &str) -> usize {
    longest_backtick_run(content) + 1
}

fn longest_backtick_run(content: &str) -> usize {
    let mut max_run = 0;
    let mut current_run = 0;

    for c in content.chars() {
        if c == '`' {
            current_run += 1;
            max_run = max_run.max(current_run);
        } else {
            current_run = 0;
        }
    }

    max_run
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_emphasis_markers() {
        assert_eq!(escape_text("*bold*", true), "\\*bold\\*");
        assert_eq!(escape_text("_italic_", true), "\\_italic\\_");
    }

    #[test]
    fn test_intraword_underscore_untouched() {
        assert_eq!(escape_text("snake_case_name", true), "snake_case_name");
    }

    #[test]
    fn test_escape_heading_only_at_line_start() {
        assert_eq!(escape_text("# heading", true), "\\# heading");
        assert_eq!(escape_text("C# rocks", true), "C# rocks");
        assert_eq!(escape_text("line\n# heading", false), "line\n\\# heading");
    }

    #[test]
    fn test_escape_strike_pairs_only() {
        assert_eq!(escape_text("~/bin", true), "~/bin");
        assert_eq!(escape_text("~~gone~~", true), "\\~\\~gone\\~\\~");
    }

    #[test]
    fn test_escape_image_start() {
        assert_eq!(escape_text("![alt]", true), "\\!\\[alt\\]");
        assert_eq!(escape_text("wow! nice", true), "wow! nice");
    }

    #[test]
    fn test_escape_block_markers_at_line_start() {
        let cases = [
            ("- not a list", "\\- not a list"),
            ("+ not a list", "\\+ not a list"),
            ("-", "\\-"),
            ("1. not a list", "1\\. not a list"),
            ("2) not a list", "2\\) not a list"),
            ("1.", "1\\."),
            ("===", "\\==="),
            ("---", "\\---"),
            ("- - -", "\\- - -"),
            ("foo\n= =", "foo\n\\= ="),
            ("item\n3. three", "item\n3\\. three"),
        ];
        for (input, expected) in cases {
            assert_eq!(escape_text(input, true), expected, "input: {input:?}");
        }
    }

    #[test]
    fn test_block_markers_left_alone_elsewhere() {
        let cases = [
            ("-x marks", true),
            ("+1 vote", true),
            ("1.5 times", true),
            ("1234567890. big", true),
            ("a = b", true),
            ("well - then", true),
            ("- mid line", false),
            ("1. mid line", false),
            ("===", false),
        ];
        for (input, line_start) in cases {
            assert_eq!(escape_text(input, line_start), input, "input: {input:?}");
        }
    }

    #[test]
    fn test_fence_length() {
        assert_eq!(fence_length("let x = 1;"), 3);
        assert_eq!(fence_length("```rust\ncode\n```"), 4);
    }

    #[test]
    fn test_inline_code_ticks() {
        assert_eq!(inline_code_ticks("code"), 1);
        assert_eq!(inline_code_ticks("a ` b"), 2);
    }
}
