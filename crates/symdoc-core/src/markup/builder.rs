//! Convenience constructors for [`MdNode`] trees

use super::node::{MdAttribute, MdNode, MdType};

fn leaf(text: String, kind: MdType, attributes: Vec<MdAttribute>) -> MdNode {
    MdNode::Element {
        text,
        kind,
        attributes,
        children: Box::new(MdNode::IndentedCollection(Vec::new())),
    }
}

impl MdNode {
    /// Top-level document assembly
    pub fn document(children: Vec<MdNode>) -> MdNode {
        MdNode::NonIndentedCollection(children)
    }

    /// A header of the given level, clamped to 1-6
    pub fn header(level: usize, text: &str) -> MdNode {
        let level = level.clamp(1, 6);
        leaf(format!("{} {text}", "#".repeat(level)), MdType::Block, Vec::new())
    }

    /// A block of plain text
    pub fn paragraph(text: &str, indentation: usize) -> MdNode {
        leaf(
            text.to_string(),
            MdType::Block,
            vec![MdAttribute::Indentation(indentation)],
        )
    }

    /// Renders each inline element eagerly and joins them with a space,
    /// producing a single paragraph element. Links inside the elements are
    /// rendered inline so their destinations are not lost.
    pub fn paragraph_with_inline_elements(elements: &[MdNode], indentation: usize) -> MdNode {
        let value = elements
            .iter()
            .map(|element| element.render(0, true).text)
            .collect::<Vec<_>>()
            .join(" ");
        leaf(
            value,
            MdType::Block,
            vec![MdAttribute::Indentation(indentation)],
        )
    }

    /// A plain inline text span
    pub fn text(text: &str) -> MdNode {
        leaf(text.to_string(), MdType::Inline, Vec::new())
    }

    /// A `* ` list item with optional nested children
    pub fn unordered_list_item(text: &str, children: Vec<MdNode>) -> MdNode {
        MdNode::Element {
            text: format!("* {text}"),
            kind: MdType::Block,
            attributes: Vec::new(),
            children: Box::new(MdNode::IndentedCollection(children)),
        }
    }

    /// A `1. ` list item with optional nested children
    pub fn ordered_list_item(text: &str, children: Vec<MdNode>) -> MdNode {
        MdNode::Element {
            text: format!("1. {text}"),
            kind: MdType::Block,
            attributes: Vec::new(),
            children: Box::new(MdNode::IndentedCollection(children)),
        }
    }

    /// A fenced code block with an optional syntax tag
    pub fn code_block(text: &str, syntax: &str, indentation: usize) -> MdNode {
        leaf(
            format!("```{syntax}\n{text}\n```"),
            MdType::Block,
            vec![MdAttribute::Indentation(indentation)],
        )
    }

    /// An inline code span
    pub fn code_inline(text: &str) -> MdNode {
        leaf(format!("`{text}`"), MdType::Inline, Vec::new())
    }

    /// A link. An empty or blank destination falls back to `#`.
    pub fn link(text: &str, destination: &str) -> MdNode {
        let destination = destination.trim();
        let url = if destination.is_empty() || destination.contains(char::is_whitespace) {
            "#".to_string()
        } else {
            destination.to_string()
        };
        leaf(
            format!("[{text}]"),
            MdType::Inline,
            vec![MdAttribute::LinkUrl(url)],
        )
    }

    pub fn italics(text: &str) -> MdNode {
        leaf(format!("*{text}*"), MdType::Inline, Vec::new())
    }

    pub fn bold(text: &str) -> MdNode {
        leaf(format!("**{text}**"), MdType::Inline, Vec::new())
    }

    pub fn bold_italics(text: &str) -> MdNode {
        leaf(format!("***{text}***"), MdType::Inline, Vec::new())
    }

    pub fn newline() -> MdNode {
        leaf("\n".to_string(), MdType::Inline, Vec::new())
    }

    /// Wraps self and the addition in a flush collection
    pub fn appending(self, node: MdNode) -> MdNode {
        MdNode::NonIndentedCollection(vec![self, node])
    }

    /// Wraps self and all additions in a flush collection
    pub fn appending_all(self, nodes: Vec<MdNode>) -> MdNode {
        let mut children = vec![self];
        children.extend(nodes);
        MdNode::NonIndentedCollection(children)
    }
}
