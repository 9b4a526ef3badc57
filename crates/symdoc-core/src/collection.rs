//! Item collection and index
//!
//! [`ItemCollection`] owns the full set of top-level doc items for one
//! project, plus the project metadata the exporter needs. Every view is
//! recomputed from `docs` on each call; nothing is cached.

use std::path::{Path, PathBuf};

use crate::input::{DocFile, RawContainer};
use crate::item::{enumerated_children, DocItem};
use crate::symbol::{shorten_classification_label, Kind, Visibility};

/// Outcome of walking raw containers into doc items
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildReport {
    /// Items successfully constructed (including nested children)
    pub built: usize,
    /// Containers dropped for missing a required name or visibility
    pub skipped: usize,
}

impl BuildReport {
    fn absorb(&mut self, other: BuildReport) {
        self.built += other.built;
        self.skipped += other.skipped;
    }
}

/// Owns the doc items for one project and answers filtered queries
#[derive(Debug)]
pub struct ItemCollection {
    docs: Vec<DocItem>,
    /// Title used for window/page headings and the docset bundle name
    pub project_title: String,
    /// The directory the project was loaded from; source paths are stored
    /// relative to it
    pub project_directory: Option<PathBuf>,
    /// Default threshold applied by the per-kind index views
    pub minimum_visibility: Visibility,
}

impl ItemCollection {
    pub fn new(project_title: impl Into<String>) -> Self {
        Self {
            docs: Vec::new(),
            project_title: project_title.into(),
            project_directory: None,
            minimum_visibility: Visibility::Internal,
        }
    }

    /// The owned top-level items, in insertion order
    pub fn docs(&self) -> &[DocItem] {
        &self.docs
    }

    /// Append the items from one decoded file. Order-preserving; duplicate
    /// titles are permitted.
    pub fn add_file(&mut self, file: &DocFile) -> BuildReport {
        let source_file = self.relative_source_path(file.file_path.as_deref());
        let mut report = BuildReport::default();
        if let Some(items) =
            build_items(Some(&file.containers), &source_file, "", &mut report)
        {
            self.docs.extend(items);
        }
        report
    }

    pub fn add_files(&mut self, files: &[DocFile]) -> BuildReport {
        let mut report = BuildReport::default();
        for file in files {
            report.absorb(self.add_file(file));
        }
        report
    }

    pub fn clear(&mut self) {
        self.docs.clear();
    }

    /// Flatten the full tree and apply an AND of the given filters:
    /// visibility >= the threshold, case-insensitive substring match on the
    /// title, exact kind match.
    pub fn search(
        &self,
        title: Option<&str>,
        kind: Option<&Kind>,
        minimum_visibility: Visibility,
    ) -> Vec<&DocItem> {
        let mut output: Vec<&DocItem> = enumerated_children(&self.docs)
            .into_iter()
            .filter(|item| item.visibility >= minimum_visibility)
            .collect();

        if let Some(title) = title {
            let title = title.to_lowercase();
            output.retain(|item| item.title.to_lowercase().contains(&title));
        }
        if let Some(kind) = kind {
            output.retain(|item| &item.kind == kind);
        }
        output
    }

    fn kind_index(&self, kind: &Kind) -> Vec<&DocItem> {
        self.search(None, Some(kind), self.minimum_visibility)
    }

    pub fn classes_index(&self) -> Vec<&DocItem> {
        self.kind_index(&Kind::Class)
    }

    pub fn structs_index(&self) -> Vec<&DocItem> {
        self.kind_index(&Kind::Struct)
    }

    pub fn enums_index(&self) -> Vec<&DocItem> {
        self.kind_index(&Kind::Enum)
    }

    pub fn protocols_index(&self) -> Vec<&DocItem> {
        self.kind_index(&Kind::Protocol)
    }

    pub fn extensions_index(&self) -> Vec<&DocItem> {
        self.kind_index(&Kind::Extension)
    }

    pub fn global_funcs_index(&self) -> Vec<&DocItem> {
        self.kind_index(&Kind::GlobalFunc)
    }

    pub fn typealiases_index(&self) -> Vec<&DocItem> {
        self.kind_index(&Kind::Typealias)
    }

    /// Every item of a top-level kind, regardless of visibility
    pub fn top_level_index(&self) -> Vec<&DocItem> {
        let mut index = Vec::new();
        for kind in &Kind::TOP_LEVEL {
            index.extend(self.search(None, Some(kind), Visibility::Private));
        }
        index
    }

    /// The top-level index filtered by the collection's minimum visibility
    pub fn top_level_index_min_access(&self) -> Vec<&DocItem> {
        self.top_level_index()
            .into_iter()
            .filter(|item| item.visibility >= self.minimum_visibility)
            .collect()
    }

    fn relative_source_path(&self, path: Option<&Path>) -> String {
        let Some(path) = path else {
            return String::new();
        };
        let relative = match &self.project_directory {
            Some(dir) => path.strip_prefix(dir).unwrap_or(path),
            None => path,
        };
        relative.display().to_string()
    }
}

/// Walk raw containers into doc items.
///
/// Containers classified as the "enum case" catch-all are transparent:
/// their children are spliced directly into the parent's output under the
/// same parent name. Containers missing a name or visibility are dropped
/// (counted in the report) rather than failing the walk.
pub fn build_items(
    containers: Option<&[RawContainer]>,
    source_file: &str,
    parent_name: &str,
    report: &mut BuildReport,
) -> Option<Vec<DocItem>> {
    let containers = containers?;

    let mut items = Vec::new();
    for container in containers {
        let kind = Kind::from_label(&shorten_classification_label(&container.kind, false));

        if matches!(&kind, Kind::Other(label) if label == "enum case") {
            if let Some(spliced) = build_items(
                container.substructure.as_deref(),
                source_file,
                parent_name,
                report,
            ) {
                items.extend(spliced);
            }
            continue;
        }

        let (Some(name), Some(accessibility)) = (&container.name, &container.accessibility)
        else {
            tracing::debug!(kind = %container.kind, "skipping container without name or visibility");
            report.skipped += 1;
            continue;
        };
        let visibility =
            Visibility::from_label(&shorten_classification_label(accessibility, false));

        let children =
            build_items(container.substructure.as_deref(), source_file, name, report);

        let attributes: Vec<String> = container
            .attributes
            .as_deref()
            .unwrap_or_default()
            .iter()
            .map(|attr| shorten_classification_label(&attr.attribute, false))
            .collect();

        let title = match kind {
            Kind::Other(_) => name.clone(),
            _ if parent_name.is_empty() => name.clone(),
            _ => format!("{parent_name}.{name}"),
        };

        items.push(DocItem::new(
            title,
            visibility,
            container.comment.clone(),
            source_file,
            kind,
            children,
            attributes,
            container.doc_declaration.clone(),
            container.parsed_declaration.clone(),
        ));
        report.built += 1;
    }
    Some(items)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn container(name: Option<&str>, accessibility: Option<&str>, kind: &str) -> RawContainer {
        RawContainer {
            name: name.map(String::from),
            accessibility: accessibility.map(String::from),
            kind: kind.to_string(),
            ..RawContainer::default()
        }
    }

    fn build(containers: Vec<RawContainer>) -> (Vec<DocItem>, BuildReport) {
        let mut report = BuildReport::default();
        let items = build_items(Some(&containers), "Sources/A.swift", "", &mut report)
            .unwrap_or_default();
        (items, report)
    }

    #[test]
    fn test_nested_member_titles_are_dotted() {
        let mut parent = container(Some("Foo"), Some("public"), "class");
        parent.substructure = Some(vec![container(
            Some("Inner"),
            Some("public"),
            "struct",
        )]);

        let (items, _) = build(vec![parent]);
        assert_eq!(items[0].title, "Foo");
        assert_eq!(
            items[0].properties.as_ref().unwrap()[0].title,
            "Foo.Inner"
        );
    }

    #[test]
    fn test_catch_all_kind_title_is_bare_name() {
        let mut parent = container(Some("Foo"), Some("public"), "class");
        parent.substructure = Some(vec![container(
            Some("bar"),
            Some("public"),
            "instance property",
        )]);

        let (items, _) = build(vec![parent]);
        assert_eq!(items[0].properties.as_ref().unwrap()[0].title, "bar");
    }

    #[test]
    fn test_enum_case_containers_are_spliced() {
        let mut case = container(None, None, "enum case");
        case.substructure = Some(vec![
            container(Some("north"), Some("public"), "enum element"),
            container(Some("south"), Some("public"), "enum element"),
        ]);
        let mut parent = container(Some("Direction"), Some("public"), "enum");
        parent.substructure = Some(vec![case]);

        let (items, report) = build(vec![parent]);
        let children = items[0].properties.as_ref().unwrap();
        let titles: Vec<&str> = children.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, vec!["north", "south"]);
        // the transparent wrapper itself is not counted as skipped
        assert_eq!(report.skipped, 0);
        assert_eq!(report.built, 3);
    }

    #[test]
    fn test_containers_missing_required_fields_are_skipped() {
        let (items, report) = build(vec![
            container(None, Some("public"), "class"),
            container(Some("Anon"), None, "class"),
            container(Some("Kept"), Some("public"), "class"),
        ]);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].title, "Kept");
        assert_eq!(report.skipped, 2);
    }

    #[test]
    fn test_raw_classification_strings_are_shortened() {
        let item = container(
            Some("Foo"),
            Some("source.lang.swift.accessibility.open"),
            "source.lang.swift.decl.class",
        );
        let (items, _) = build(vec![item]);
        assert_eq!(items[0].kind, Kind::Class);
        assert_eq!(items[0].visibility, Visibility::Open);
    }

    fn sample_collection() -> ItemCollection {
        let mut member = container(Some("bar"), Some("private"), "instance property");
        member.doc_declaration = Some("var bar: Int".to_string());
        let mut class_a = container(Some("Alpha"), Some("public"), "class");
        class_a.substructure = Some(vec![member]);
        let struct_b = container(Some("Beta"), Some("internal"), "struct");

        let mut collection = ItemCollection::new("Sample");
        let file = DocFile {
            file_path: Some(PathBuf::from("/project/Sources/A.swift")),
            containers: vec![class_a, struct_b],
        };
        collection.project_directory = Some(PathBuf::from("/project"));
        collection.add_file(&file);
        collection
    }

    #[test]
    fn test_source_paths_are_project_relative() {
        let collection = sample_collection();
        assert_eq!(collection.docs()[0].source_file, "Sources/A.swift");
    }

    #[test]
    fn test_search_filters_by_title_kind_and_visibility() {
        let collection = sample_collection();

        let by_title = collection.search(Some("alp"), None, Visibility::Private);
        assert_eq!(by_title.len(), 1);
        assert_eq!(by_title[0].title, "Alpha");

        let by_kind = collection.search(None, Some(&Kind::Struct), Visibility::Private);
        assert_eq!(by_kind.len(), 1);
        assert_eq!(by_kind[0].title, "Beta");

        let visible = collection.search(None, None, Visibility::Public);
        assert!(visible.iter().all(|item| item.visibility >= Visibility::Public));
    }

    #[test]
    fn test_search_is_monotone_in_minimum_visibility() {
        let collection = sample_collection();
        let mut previous = usize::MAX;
        for minimum in Visibility::ALL {
            let count = collection.search(None, None, minimum).len();
            assert!(count <= previous);
            previous = count;
        }
    }

    #[test]
    fn test_indexes_recompute_after_clear() {
        let mut collection = sample_collection();
        assert_eq!(collection.classes_index().len(), 1);
        collection.clear();
        assert!(collection.classes_index().is_empty());
        assert!(collection.top_level_index().is_empty());
    }

    #[test]
    fn test_top_level_index_follows_kind_order() {
        let mut collection = ItemCollection::new("Sample");
        collection.add_file(&DocFile {
            file_path: None,
            containers: vec![
                container(Some("T"), Some("public"), "typealias"),
                container(Some("P"), Some("public"), "protocol"),
                container(Some("S"), Some("public"), "struct"),
                container(Some("C"), Some("public"), "class"),
            ],
        });

        let titles: Vec<&str> = collection
            .top_level_index()
            .iter()
            .map(|item| item.title.as_str())
            .collect();
        assert_eq!(titles, vec!["C", "S", "P", "T"]);
    }

    #[test]
    fn test_top_level_index_min_access_respects_threshold() {
        let mut collection = sample_collection();
        collection.minimum_visibility = Visibility::Public;
        let titles: Vec<&str> = collection
            .top_level_index_min_access()
            .iter()
            .map(|item| item.title.as_str())
            .collect();
        assert_eq!(titles, vec!["Alpha"]);
    }
}
