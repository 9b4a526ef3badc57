//! Node types and the recursive render

use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Whether an element renders inline or forces a trailing newline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MdType {
    Inline,
    Block,
}

/// An attribute attached to an element node
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MdAttribute {
    /// Additional indentation levels applied to the element's own text
    Indentation(usize),
    /// A link destination, rendered inline or as a footnote reference
    LinkUrl(String),
}

/// One node of the renderable markup tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MdNode {
    /// A piece of text with a render type, attributes, and nested children
    Element {
        text: String,
        kind: MdType,
        attributes: Vec<MdAttribute>,
        children: Box<MdNode>,
    },
    /// Children render with indentation inherited from the parent's depth
    IndentedCollection(Vec<MdNode>),
    /// Children render flush, each followed by a newline
    NonIndentedCollection(Vec<MdNode>),
}

/// The result of rendering a node: body text plus collected link URLs
#[derive(Debug, Clone, Default)]
pub struct Rendered {
    pub text: String,
    pub links: Vec<String>,
}

/// Stable id used for footnote references; duplicate destinations share one id
pub(crate) fn footnote_id(url: &str) -> u64 {
    let mut hasher = DefaultHasher::new();
    url.hash(&mut hasher);
    hasher.finish()
}

fn link_urls(attributes: &[MdAttribute]) -> Vec<String> {
    attributes
        .iter()
        .filter_map(|attr| match attr {
            MdAttribute::LinkUrl(url) => Some(url.clone()),
            MdAttribute::Indentation(_) => None,
        })
        .collect()
}

fn indentation(attributes: &[MdAttribute]) -> usize {
    attributes
        .iter()
        .map(|attr| match attr {
            MdAttribute::Indentation(value) => *value,
            MdAttribute::LinkUrl(_) => 0,
        })
        .sum()
}

impl MdNode {
    /// Render this node and everything beneath it.
    ///
    /// When `inline_links` is true a link attribute is rendered inline as
    /// `text(url)` and consumed; when false it is rendered as a numeric
    /// footnote reference `text[id]` and the URL is collected for the
    /// reference table.
    pub fn render(&self, inherited_indentation: usize, inline_links: bool) -> Rendered {
        match self {
            MdNode::Element {
                text,
                kind,
                attributes,
                children,
            } => {
                let mut out = text.clone();
                let mut links = link_urls(attributes);

                if links.len() == 1 {
                    if inline_links {
                        out.push_str(&format!("({})", links[0]));
                        links.clear();
                    } else {
                        out.push_str(&format!("[{}]", footnote_id(&links[0])));
                    }
                }

                if *kind == MdType::Block {
                    out.push('\n');
                }
                let own_indent = "\t".repeat(indentation(attributes));
                out = format!("{own_indent}{out}");

                let child = children.render(inherited_indentation + 1, inline_links);
                out.push_str(&child.text);
                links.extend(child.links);
                Rendered { text: out, links }
            }

            MdNode::IndentedCollection(nodes) => {
                let mut out = String::new();
                let mut links = Vec::new();
                for node in nodes {
                    let rendered = node.render(inherited_indentation, inline_links);
                    if out.is_empty() || out.ends_with('\n') {
                        out.push_str(&"\t".repeat(inherited_indentation));
                    }
                    out.push_str(&rendered.text);
                    links.extend(rendered.links);
                }
                Rendered { text: out, links }
            }

            MdNode::NonIndentedCollection(nodes) => {
                let mut out = String::new();
                let mut links = Vec::new();
                for node in nodes {
                    let rendered = node.render(inherited_indentation, inline_links);
                    out.push_str(&rendered.text);
                    out.push('\n');
                    links.extend(rendered.links);
                }
                Rendered { text: out, links }
            }
        }
    }

    /// Full top-level render: body text, the deduplicated link-reference
    /// table (empty when links rendered inline), and the cleanup pass.
    pub fn final_render(&self, inline_links: bool) -> String {
        let rendered = self.render(0, inline_links);

        let mut unique = Vec::new();
        for url in &rendered.links {
            if !unique.contains(url) {
                unique.push(url.clone());
            }
        }
        let table = unique
            .iter()
            .map(|url| format!("[{}]:{url}", footnote_id(url)))
            .collect::<Vec<_>>()
            .join("\n");

        let cleaned = cleanup_render(&rendered.text);
        format!("{cleaned}\n{table}")
    }
}

impl fmt::Display for MdNode {
    /// An inline value: the rendered text without the block trailing newline
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render(0, true).text.trim_end_matches('\n'))
    }
}

/// Remove the blank lines the block renderer leaves between contiguous list
/// items, while keeping blank-line separation between a list and prose.
///
/// Deletions are applied from the end of the line array backward so earlier
/// indices stay valid.
fn cleanup_render(rendered: &str) -> String {
    let mut lines: Vec<&str> = rendered.split('\n').collect();

    let mut previous_content = String::new();
    let mut lines_since_content = 0usize;
    let mut to_remove = Vec::new();

    for (index, line) in lines.iter().enumerate() {
        let content = line.trim();
        if !content.is_empty() {
            let is_list_item = content.starts_with("1. ") || content.starts_with("* ");
            let previous_is_list_item =
                previous_content.starts_with("1. ") || previous_content.starts_with("* ");
            if is_list_item && previous_is_list_item {
                for count in (1..=lines_since_content).rev() {
                    to_remove.push(index - count);
                }
            }
            previous_content = content.to_string();
            lines_since_content = 0;
        } else {
            lines_since_content += 1;
        }
    }

    for index in to_remove.into_iter().rev() {
        lines.remove(index);
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_renders() {
        let node = MdNode::header(1, "Header 1");
        assert_eq!(node.to_string(), "# Header 1");
        assert_eq!(node.render(0, false).text, "# Header 1\n");
        assert_eq!(node.final_render(false), "# Header 1\n\n");
    }

    #[test]
    fn test_block_forces_newline_before_children() {
        let node = MdNode::unordered_list_item(
            "parent",
            vec![MdNode::unordered_list_item("child", vec![])],
        );
        let rendered = node.render(0, false);
        assert_eq!(rendered.text, "* parent\n\t* child\n");
    }

    #[test]
    fn test_indentation_attribute_adds_tabs() {
        let node = MdNode::paragraph("indented", 2);
        assert_eq!(node.render(0, false).text, "\t\tindented\n");
    }

    #[test]
    fn test_inline_link_is_consumed() {
        let node = MdNode::link("click", "https://example.com");
        let rendered = node.render(0, true);
        assert_eq!(rendered.text, "[click](https://example.com)");
        assert!(rendered.links.is_empty());
    }

    #[test]
    fn test_footnote_link_is_collected() {
        let node = MdNode::link("click", "https://example.com");
        let rendered = node.render(0, false);
        let id = footnote_id("https://example.com");
        assert_eq!(rendered.text, format!("[click][{id}]"));
        assert_eq!(rendered.links, vec!["https://example.com".to_string()]);
    }

    #[test]
    fn test_cleanup_removes_blank_lines_between_list_items() {
        let text = "* one\n\n* two\n\nprose\n\n1. first\n\n\n1. second\n";
        let cleaned = cleanup_render(text);
        assert_eq!(cleaned, "* one\n* two\n\nprose\n\n1. first\n1. second\n");
    }

    #[test]
    fn test_cleanup_is_idempotent() {
        let text = "* one\n\n* two\n\nprose\n\n1. first\n\n1. second\n";
        let once = cleanup_render(text);
        let twice = cleanup_render(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_cleanup_keeps_blank_line_between_list_and_prose() {
        let text = "some prose\n\n* item\n\nmore prose";
        assert_eq!(cleanup_render(text), text);
    }
}
