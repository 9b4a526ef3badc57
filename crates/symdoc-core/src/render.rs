//! Page rendering
//!
//! Turns [`DocItem`]s into markup documents: one page per top-level item
//! plus a contents page linking to all of them. Rendering is a synchronous
//! tree walk with no fallibility; anything absent gets a placeholder.

use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};

use crate::export::{PageCount, SaveFormat};
use crate::item::DocItem;
use crate::markup::MdNode;
use crate::symbol::{capitalized, Kind, Visibility};

/// How a parent type's extensions are folded into its page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExtensionGrouping {
    /// Extension members are listed among the parent's own members, and
    /// again under the "Extensions" sub-header
    #[default]
    FlattenIntoMembers,
    /// Extension members appear only under the "Extensions" sub-header
    SeparateSection,
}

/// Renders item pages and the contents page
#[derive(Debug, Clone, Copy)]
pub struct PageRenderer {
    pub minimum_visibility: Visibility,
    /// Embed hidden per-member markers consumed by the docset TOC
    /// post-processor
    pub include_toc_links: bool,
    pub extension_grouping: ExtensionGrouping,
}

impl Default for PageRenderer {
    fn default() -> Self {
        Self {
            minimum_visibility: Visibility::Internal,
            include_toc_links: true,
            extension_grouping: ExtensionGrouping::default(),
        }
    }
}

impl PageRenderer {
    /// Render one item's full page.
    ///
    /// Emits the title header, visibility/kind line, declaration block,
    /// comment (or a placeholder), and source file, then a "Members"
    /// section and an "Extensions" section when any children pass the
    /// visibility filter.
    pub fn item_page(&self, item: &DocItem) -> String {
        let source_file = found_in(&item.source_file);
        let mut page = MdNode::document(vec![
            MdNode::header(2, &item.title),
            MdNode::paragraph_with_inline_elements(
                &[
                    MdNode::bold(item.visibility.as_str()),
                    MdNode::italics(item.kind.as_str()),
                ],
                0,
            ),
            MdNode::code_block(&item.declaration(), "swift", 0),
            MdNode::paragraph(item.comment.as_deref().unwrap_or("No documentation"), 0),
            MdNode::newline(),
            source_file,
        ]);

        let members =
            self.child_blocks(item.properties.as_deref().unwrap_or_default(), &item.source_file);
        let extension_members: Vec<MdNode> = item
            .extension_children()
            .into_iter()
            .flat_map(|ext| {
                self.child_blocks(
                    ext.properties.as_deref().unwrap_or_default(),
                    &item.source_file,
                )
            })
            .collect();

        if !members.is_empty() {
            page = page.appending_all(vec![MdNode::header(3, "Members"), MdNode::newline()]);
            page = page.appending_all(members);
        }
        if !extension_members.is_empty() {
            page = page.appending_all(vec![MdNode::header(3, "Extensions"), MdNode::newline()]);
            page = page.appending_all(extension_members);
        }

        page.final_render(false)
    }

    /// Render the contents page for the given top-level items.
    ///
    /// Items are grouped by kind display label (stable, no title sort within
    /// a group) with a level-4 capitalized kind header at each boundary and
    /// one linked list entry per item.
    pub fn contents_page(
        &self,
        items: &[&DocItem],
        link_style: PageCount,
        format: SaveFormat,
    ) -> String {
        let mut sorted: Vec<&DocItem> = items.to_vec();
        sorted.sort_by(|a, b| a.kind.as_str().cmp(b.kind.as_str()));

        let mut current_header = String::new();
        let mut nodes = Vec::new();
        for item in sorted {
            if item.visibility < self.minimum_visibility {
                continue;
            }

            let header = capitalized(item.kind.as_str());
            if current_header != header {
                nodes.push(MdNode::header(4, &header));
                current_header = header;
            }

            let link = MdNode::link(&item.title, &item.html_link(format, link_style));
            nodes.push(MdNode::paragraph_with_inline_elements(
                &[MdNode::text("* "), link],
                0,
            ));
            nodes.push(MdNode::newline());
        }

        MdNode::document(nodes).final_render(false)
    }

    /// One list-item block per qualifying child.
    ///
    /// Under the flattening policy, extension-kind children are transparent
    /// and their members are inlined in place.
    fn child_blocks(&self, children: &[DocItem], parent_source_file: &str) -> Vec<MdNode> {
        let mut blocks = Vec::new();
        for child in children {
            if child.visibility < self.minimum_visibility {
                continue;
            }

            if child.kind == Kind::Extension {
                if self.extension_grouping == ExtensionGrouping::FlattenIntoMembers {
                    blocks.extend(self.child_blocks(
                        child.properties.as_deref().unwrap_or_default(),
                        parent_source_file,
                    ));
                }
                continue;
            }

            let label = if self.include_toc_links {
                toc_marker(child)
            } else {
                child.title.clone()
            };
            let mut block = MdNode::unordered_list_item(
                &label,
                vec![
                    MdNode::paragraph_with_inline_elements(
                        &[
                            MdNode::bold_italics(child.visibility.as_str()),
                            MdNode::italics(child.kind.as_str()),
                        ],
                        0,
                    ),
                    MdNode::paragraph(child.comment.as_deref().unwrap_or("No documentation"), 0),
                    MdNode::code_block(&child.declaration(), "swift", 0),
                ],
            );

            if child.source_file != parent_source_file {
                block = block.appending(found_in(&child.source_file));
            }
            blocks.push(block);
        }
        blocks
    }
}

fn found_in(source_file: &str) -> MdNode {
    MdNode::NonIndentedCollection(vec![
        MdNode::paragraph_with_inline_elements(&[MdNode::italics("Found in:")], 0),
        MdNode::unordered_list_item(&MdNode::code_inline(source_file).to_string(), Vec::new()),
    ])
}

/// Hidden marker consumed by the docset TOC post-processor
fn toc_marker(item: &DocItem) -> String {
    let escaped = utf8_percent_encode(&item.title, NON_ALPHANUMERIC);
    format!(
        "##--{}/{}/{}--##",
        item.kind.doc_set_type(),
        escaped,
        item.title
    )
}
