//! Block classifier - splits free-form section text into typed blocks
//!
//! Section content is plain text with blocks separated by a blank line.
//! Each block is classified as a heading, an attributed list, or a
//! paragraph by pattern checks over the trimmed text. The check order is
//! behavior-determining: the heading test runs before the list test, so a
//! short all-caps block is never classified as a list.

use lazy_static::lazy_static;
use regex::Regex;

/// Blocks are separated by one blank line (two consecutive newlines).
pub const BLOCK_DELIMITER: &str = "\n\n";

lazy_static! {
    /// Line opening with a capital and carrying an em-dash attribution.
    static ref ATTRIBUTED_LINE: Regex = Regex::new("^[A-Z].*—").unwrap();
    /// Line opening with a capital and a parenthetical citation.
    static ref CITATION_LINE: Regex = Regex::new(r"^[A-Z].*\(").unwrap();
}

/// Presentation category of a block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    /// Short all-caps label
    Heading,
    /// Multi-line run of quote/attribution/numbered lines
    List,
    /// Flowing text
    Paragraph,
}

/// One classified unit of section content, derived fresh on every render
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub kind: BlockKind,
    /// The trimmed block text
    pub raw: String,
    /// Trimmed non-empty lines for lists; the whole block otherwise
    pub lines: Vec<String>,
}

/// A list line, optionally split at its first em-dash into text and note
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListLine {
    pub main: String,
    pub note: Option<String>,
}

/// Split section content into ordered, classified blocks.
///
/// Total over any input: empty content yields no blocks, and every
/// non-empty block falls through to `Paragraph` when it is neither a
/// heading nor a list. Order is meaningful and preserved.
pub fn classify(content: &str) -> Vec<Block> {
    if content.is_empty() {
        return Vec::new();
    }

    content.split(BLOCK_DELIMITER).map(classify_block).collect()
}

fn classify_block(raw: &str) -> Block {
    let trimmed = raw.trim();

    if is_heading(trimmed) {
        return Block {
            kind: BlockKind::Heading,
            raw: trimmed.to_string(),
            lines: vec![trimmed.to_string()],
        };
    }

    let lines: Vec<String> = trimmed
        .split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect();

    if lines.len() > 1 && lines.iter().all(|line| is_list_line(line)) {
        return Block {
            kind: BlockKind::List,
            raw: trimmed.to_string(),
            lines,
        };
    }

    Block {
        kind: BlockKind::Paragraph,
        raw: trimmed.to_string(),
        lines: vec![trimmed.to_string()],
    }
}

/// Headings are short all-caps labels without attribution dashes.
fn is_heading(trimmed: &str) -> bool {
    let len = trimmed.chars().count();
    trimmed == trimmed.to_uppercase() && len < 80 && len > 2 && !trimmed.contains('—')
}

/// A line that reads as part of a list: a quoted line, a line opening
/// with an em-dash or a digit, or a capitalized line carrying an em-dash
/// attribution or a parenthetical citation further on.
fn is_list_line(line: &str) -> bool {
    line.starts_with('"')
        || line.starts_with('—')
        || line.chars().next().map_or(false, |c| c.is_ascii_digit())
        || ATTRIBUTED_LINE.is_match(line)
        || CITATION_LINE.is_match(line)
}

/// Split a list line at its first em-dash.
///
/// Everything after the first em-dash becomes the note, with em-dashes
/// inside the note preserved. Lines without an em-dash carry no note.
pub fn split_list_line(line: &str) -> ListLine {
    match line.split_once('—') {
        Some((main, rest)) => ListLine {
            main: main.trim().to_string(),
            note: Some(rest.trim().to_string()),
        },
        None => ListLine {
            main: line.to_string(),
            note: None,
        },
    }
}

/// Split an essay body into trimmed paragraphs.
///
/// Essay bodies are paragraph-only: no heading or list detection.
pub fn paragraphs(body: &str) -> Vec<String> {
    if body.is_empty() {
        return Vec::new();
    }

    body.split(BLOCK_DELIMITER)
        .map(|p| p.trim().to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_content_yields_no_blocks() {
        assert!(classify("").is_empty());
    }

    #[test]
    fn test_single_heading() {
        let blocks = classify("HEADING");
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].kind, BlockKind::Heading);
        assert_eq!(blocks[0].raw, "HEADING");
    }

    #[test]
    fn test_single_paragraph() {
        let blocks = classify("This is prose.");
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].kind, BlockKind::Paragraph);
        assert_eq!(blocks[0].lines, vec!["This is prose."]);
    }

    #[test]
    fn test_quoted_lines_form_a_list() {
        let blocks = classify("\"A line\"\n\"Another line\"");
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].kind, BlockKind::List);
        assert_eq!(blocks[0].lines, vec!["\"A line\"", "\"Another line\""]);
    }

    #[test]
    fn test_single_attributed_line_is_not_a_list() {
        // Lists need more than one line; a lone attributed line stays prose.
        let blocks = classify("Name — Detail");
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].kind, BlockKind::Paragraph);
    }

    #[test]
    fn test_mixed_list_markers() {
        let blocks = classify("— Opening line\n1977 debut\nTitle — Publisher\nWork (reissue)");
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].kind, BlockKind::List);
        assert_eq!(blocks[0].lines.len(), 4);
    }

    #[test]
    fn test_lowercase_line_breaks_a_list() {
        let blocks = classify("\"A line\"\nbut this one is plain prose");
        assert_eq!(blocks[0].kind, BlockKind::Paragraph);
    }

    #[test]
    fn test_heading_with_em_dash_is_not_a_heading() {
        let blocks = classify("TITLE — 1977");
        assert_eq!(blocks[0].kind, BlockKind::Paragraph);
    }

    #[test]
    fn test_long_all_caps_block_is_not_a_heading() {
        let long = "A".repeat(80);
        let blocks = classify(&long);
        assert_eq!(blocks[0].kind, BlockKind::Paragraph);
    }

    #[test]
    fn test_heading_check_precedes_list_check() {
        // All-caps digit lines satisfy both predicates; heading wins
        // because it is tested first.
        let blocks = classify("1977\n1978");
        assert_eq!(blocks[0].kind, BlockKind::Heading);
    }

    #[test]
    fn test_multi_line_all_caps_block_is_still_a_heading() {
        // Heading detection has no line-count check, unlike lists.
        let blocks = classify("FIRST\nSECOND");
        assert_eq!(blocks[0].kind, BlockKind::Heading);
    }

    #[test]
    fn test_empty_block_between_delimiters_stays() {
        // A whitespace-only block is kept and falls through to an empty
        // paragraph. Intent unclear; kept as observed.
        let blocks = classify("One.\n\n   \n\nTwo.");
        assert_eq!(blocks.len(), 3);
        assert_eq!(blocks[1].kind, BlockKind::Paragraph);
        assert_eq!(blocks[1].raw, "");
    }

    #[test]
    fn test_block_order_is_preserved() {
        let blocks = classify("BIO\n\nBorn somewhere.\n\n\"Quote one\"\n\"Quote two\"");
        let kinds: Vec<_> = blocks.iter().map(|b| b.kind).collect();
        assert_eq!(
            kinds,
            vec![BlockKind::Heading, BlockKind::Paragraph, BlockKind::List]
        );
    }

    #[test]
    fn test_no_text_dropped_or_duplicated() {
        let content = "HEADING\n\nSome prose here.\n\n\"One\"\n\"Two\"";
        let blocks = classify(content);
        let rejoined: Vec<&str> = blocks.iter().map(|b| b.raw.as_str()).collect();
        assert_eq!(rejoined.join(BLOCK_DELIMITER), content);
    }

    #[test]
    fn test_split_line_at_first_em_dash() {
        let line = split_list_line("Quote text — Attribution — 1977");
        assert_eq!(line.main, "Quote text");
        assert_eq!(line.note.as_deref(), Some("Attribution — 1977"));
    }

    #[test]
    fn test_split_line_without_em_dash() {
        let line = split_list_line("No dash here");
        assert_eq!(line.main, "No dash here");
        assert_eq!(line.note, None);
    }

    #[test]
    fn test_essay_paragraphs() {
        let body = "First paragraph.\n\nSecond paragraph.";
        assert_eq!(paragraphs(body), vec!["First paragraph.", "Second paragraph."]);
        assert!(paragraphs("").is_empty());
    }

    #[test]
    fn test_all_caps_paragraph_in_essay_body_stays_a_paragraph() {
        // Essay bodies skip classification entirely.
        let body = "SHOUTING\n\nCalm prose.";
        assert_eq!(paragraphs(body), vec!["SHOUTING", "Calm prose."]);
    }
}
