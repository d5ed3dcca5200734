//! Section renderer - maps classified blocks to display nodes
//!
//! A pure, stateless map over the classifier's output: one display node
//! per block, never merged, reordered, or dropped. The node sequence is
//! then flattened to HTML (for the exported snapshot) or plain text (for
//! the terminal preview).

use super::blocks::{split_list_line, Block, BlockKind, ListLine};

/// One rendered unit of a section, 1:1 with the classified blocks
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayNode {
    /// Small-caps section label
    Label(String),
    /// Attributed list, one entry per line
    List(Vec<ListLine>),
    /// Flowing text paragraph
    Paragraph(String),
}

/// Map classified blocks to display nodes, order-preserving.
pub fn render(blocks: &[Block]) -> Vec<DisplayNode> {
    blocks.iter().map(render_block).collect()
}

fn render_block(block: &Block) -> DisplayNode {
    match block.kind {
        BlockKind::Heading => DisplayNode::Label(block.raw.clone()),
        BlockKind::List => DisplayNode::List(
            block.lines.iter().map(|line| split_list_line(line)).collect(),
        ),
        BlockKind::Paragraph => DisplayNode::Paragraph(block.raw.clone()),
    }
}

/// Flatten display nodes to an HTML fragment.
pub fn to_html(nodes: &[DisplayNode]) -> String {
    let mut html = String::new();

    for node in nodes {
        match node {
            DisplayNode::Label(text) => {
                html.push_str(&format!(
                    "<h3 class=\"section-label\">{}</h3>\n",
                    html_escape(text)
                ));
            }
            DisplayNode::List(lines) => {
                html.push_str("<ul class=\"attributed-list\">\n");
                for line in lines {
                    html.push_str("<li>");
                    html.push_str(&format!(
                        "<span class=\"line-main\">{}</span>",
                        html_escape(&line.main)
                    ));
                    if let Some(note) = &line.note {
                        html.push_str(&format!(
                            "<span class=\"line-note\">{}</span>",
                            html_escape(note)
                        ));
                    }
                    html.push_str("</li>\n");
                }
                html.push_str("</ul>\n");
            }
            DisplayNode::Paragraph(text) => {
                html.push_str(&format!("<p>{}</p>\n", html_escape(text)));
            }
        }
    }

    html
}

/// Flatten display nodes to plain text for the terminal.
pub fn to_text(nodes: &[DisplayNode]) -> String {
    let mut parts = Vec::new();

    for node in nodes {
        match node {
            DisplayNode::Label(text) => parts.push(text.clone()),
            DisplayNode::List(lines) => {
                let mut out = Vec::new();
                for line in lines {
                    out.push(line.main.clone());
                    if let Some(note) = &line.note {
                        out.push(format!("    {}", note));
                    }
                }
                parts.push(out.join("\n"));
            }
            DisplayNode::Paragraph(text) => parts.push(text.clone()),
        }
    }

    parts.join("\n\n")
}

/// Simple HTML escaping
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::blocks::classify;

    #[test]
    fn test_one_node_per_block() {
        let blocks = classify("BIO\n\nSome prose.\n\n\"One\"\n\"Two\"");
        let nodes = render(&blocks);
        assert_eq!(nodes.len(), blocks.len());
        assert!(matches!(nodes[0], DisplayNode::Label(_)));
        assert!(matches!(nodes[1], DisplayNode::Paragraph(_)));
        assert!(matches!(nodes[2], DisplayNode::List(_)));
    }

    #[test]
    fn test_rendering_is_idempotent() {
        let blocks = classify("NOTES\n\nText.\n\n— one\n— two");
        assert_eq!(render(&blocks), render(&blocks));
    }

    #[test]
    fn test_list_lines_are_split_at_render_time() {
        let blocks = classify("\"Seen\" — 1977\n\"Unseen\"");
        let nodes = render(&blocks);
        match &nodes[0] {
            DisplayNode::List(lines) => {
                assert_eq!(lines[0].main, "\"Seen\"");
                assert_eq!(lines[0].note.as_deref(), Some("1977"));
                assert_eq!(lines[1].note, None);
            }
            other => panic!("expected a list, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_block_renders_as_empty_paragraph() {
        let nodes = render(&classify("One.\n\n \n\nTwo."));
        assert_eq!(nodes[1], DisplayNode::Paragraph(String::new()));
    }

    #[test]
    fn test_html_output() {
        let nodes = render(&classify("BIO\n\nProse & <markup>.\n\nTitle — Note\nTitle (two)"));
        let html = to_html(&nodes);
        assert!(html.contains("<h3 class=\"section-label\">BIO</h3>"));
        assert!(html.contains("<p>Prose &amp; &lt;markup&gt;.</p>"));
        assert!(html.contains("<span class=\"line-main\">Title</span>"));
        assert!(html.contains("<span class=\"line-note\">Note</span>"));
    }

    #[test]
    fn test_text_output_indents_notes() {
        let nodes = render(&classify("Work — 1977\nOther — 1978"));
        let text = to_text(&nodes);
        assert_eq!(text, "Work\n    1977\nOther\n    1978");
    }
}
