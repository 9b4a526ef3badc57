//! Doc item tree
//!
//! [`DocItem`] is where the documentation data spends most of its time. It
//! represents everything from a class down to a single property or a global
//! function, so it is recursive: a class's properties, methods, and
//! extension bodies all live in its `properties` list, disambiguated only
//! by kind. Items are constructed once when the raw containers are walked
//! and are immutable afterwards.

use std::sync::OnceLock;

use regex::Regex;

use crate::export::{PageCount, SaveFormat};
use crate::symbol::{capitalized, Kind, Visibility};

/// One normalized documentable declaration plus its nested children
#[derive(Debug, Clone, PartialEq)]
pub struct DocItem {
    /// Dotted `Parent.Member` path for nested members, bare name otherwise
    pub title: String,
    pub visibility: Visibility,
    /// Documentation written for the item, when any exists
    pub comment: Option<String>,
    /// Originating path, relative to the project directory
    pub source_file: String,
    pub kind: Kind,
    /// Nested children: true members and extension bodies alike
    pub properties: Option<Vec<DocItem>>,
    /// Attribute labels such as `lazy` or `final`
    pub attributes: Vec<String>,

    doc_declaration: Option<String>,
    parsed_declaration: Option<String>,
}

fn trailing_bare_equals() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+=$").expect("valid regex"))
}

fn non_word_runs() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\W+").expect("valid regex"))
}

/// Replace every run of non-word characters with `-`, for anchor links and
/// file names.
pub(crate) fn replacing_non_word(value: &str, lowercase: bool) -> String {
    let value = if lowercase {
        value.to_lowercase()
    } else {
        value.to_string()
    };
    non_word_runs().replace_all(&value, "-").into_owned()
}

impl DocItem {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        title: impl Into<String>,
        visibility: Visibility,
        comment: Option<String>,
        source_file: impl Into<String>,
        kind: Kind,
        properties: Option<Vec<DocItem>>,
        attributes: Vec<String>,
        doc_declaration: Option<String>,
        parsed_declaration: Option<String>,
    ) -> Self {
        Self {
            title: title.into(),
            visibility,
            comment: comment.filter(|c| !c.is_empty()),
            source_file: source_file.into(),
            kind,
            properties,
            attributes,
            doc_declaration,
            parsed_declaration,
        }
    }

    /// The rendered code signature.
    ///
    /// Prefers the compiler-parsed declaration, falling back to the
    /// documentation-derived one. Items carrying a `lazy` attribute prefer
    /// the documentation-derived declaration instead, since parsed
    /// declarations for lazy properties arrive malformed from upstream.
    /// A trailing bare `=` left by certain partial declarations is stripped.
    pub fn declaration(&self) -> String {
        let declaration = if self.attributes.iter().any(|attr| attr == "lazy") {
            self.doc_declaration
                .as_deref()
                .or(self.parsed_declaration.as_deref())
        } else {
            self.parsed_declaration
                .as_deref()
                .or(self.doc_declaration.as_deref())
        }
        .unwrap_or("no declaration");

        trailing_bare_equals()
            .replace(declaration, "")
            .into_owned()
    }

    /// A consistent relative linking path for this item's page.
    ///
    /// Multi-page output links into the per-kind folder; single-page output
    /// links to an in-page anchor.
    pub fn html_link(&self, format: SaveFormat, pages: PageCount) -> String {
        let folder = replacing_non_word(&capitalized(self.kind.as_str()), false);
        match pages {
            PageCount::MultiPage => {
                let ext = if format == SaveFormat::Markdown {
                    "md"
                } else {
                    "html"
                };
                let file_name = replacing_non_word(&self.title, false);
                format!("{folder}/{file_name}.{ext}")
            }
            PageCount::SinglePage => format!("#{}", replacing_non_word(&self.title, true)),
        }
    }

    /// Children whose kind is `extension`
    pub fn extension_children(&self) -> Vec<&DocItem> {
        self.properties
            .as_deref()
            .unwrap_or_default()
            .iter()
            .filter(|child| child.kind == Kind::Extension)
            .collect()
    }
}

/// Flatten items and all their descendants, depth-first, each parent before
/// its children.
pub fn enumerated_children(items: &[DocItem]) -> Vec<&DocItem> {
    let mut flattened = Vec::new();
    for item in items {
        push_with_children(item, &mut flattened);
    }
    flattened
}

fn push_with_children<'a>(item: &'a DocItem, out: &mut Vec<&'a DocItem>) {
    out.push(item);
    for child in item.properties.as_deref().unwrap_or_default() {
        push_with_children(child, out);
    }
}
