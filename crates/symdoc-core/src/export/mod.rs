//! Export pipeline
//!
//! Writes a rendered documentation set to disk in one of three shapes:
//! a single concatenated page, a multi-page tree, or an offline docset
//! package wrapping the multi-page tree. File-system failures never abort
//! the export; each one is logged and collected into the [`ExportReport`]
//! and the remaining files are still attempted.

mod docset;
mod html;

pub use docset::{InfoPlist, SearchDb};
pub use html::{frameset_index_page, sanitize_for_embedding, wrap_in_html};

use std::fs;
use std::path::{Path, PathBuf};

use crate::collection::ItemCollection;
use crate::item::DocItem;
use crate::render::{ExtensionGrouping, PageRenderer};
use crate::symbol::Visibility;

/// Output format of an export
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveFormat {
    Html,
    Markdown,
    Docset,
}

impl SaveFormat {
    /// File extension for pages written in this format
    pub fn extension(self) -> &'static str {
        match self {
            SaveFormat::Html | SaveFormat::Docset => "html",
            SaveFormat::Markdown => "md",
        }
    }
}

/// Whether the export is one concatenated page or one page per item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageCount {
    SinglePage,
    MultiPage,
}

/// Everything configurable about one export run
#[derive(Debug, Clone)]
pub struct ExportOptions {
    pub format: SaveFormat,
    pub pages: PageCount,
    pub minimum_visibility: Visibility,
    pub include_toc_links: bool,
    pub extension_grouping: ExtensionGrouping,
    /// Directory holding the static `css/` and `js/` viewer assets, copied
    /// verbatim into HTML exports
    pub assets_dir: Option<PathBuf>,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            format: SaveFormat::Html,
            pages: PageCount::MultiPage,
            minimum_visibility: Visibility::Internal,
            include_toc_links: true,
            extension_grouping: ExtensionGrouping::default(),
            assets_dir: None,
        }
    }
}

/// What an export actually did: files written and per-file failures
#[derive(Debug, Clone, Default)]
pub struct ExportReport {
    pub written: Vec<PathBuf>,
    pub failures: Vec<ExportFailure>,
}

#[derive(Debug, Clone)]
pub struct ExportFailure {
    pub path: PathBuf,
    pub message: String,
}

impl ExportReport {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    fn wrote(&mut self, path: &Path) {
        self.written.push(path.to_path_buf());
    }

    fn failed(&mut self, path: &Path, message: impl ToString) {
        let message = message.to_string();
        tracing::warn!(path = %path.display(), %message, "export write failed");
        self.failures.push(ExportFailure {
            path: path.to_path_buf(),
            message,
        });
    }
}

const CSS_FILE: &str = "styles";
const LANDING_PAGE_PREFERENCE: [&str; 3] = ["doclandingpage.md", "readme.md", "readme"];

/// Runs one export of a collection to disk
pub struct Exporter<'a> {
    collection: &'a ItemCollection,
    options: ExportOptions,
    renderer: PageRenderer,
}

impl<'a> Exporter<'a> {
    pub fn new(collection: &'a ItemCollection, options: ExportOptions) -> Self {
        let renderer = PageRenderer {
            minimum_visibility: options.minimum_visibility,
            include_toc_links: options.include_toc_links,
            extension_grouping: options.extension_grouping,
        };
        Self {
            collection,
            options,
            renderer,
        }
    }

    /// Write the documentation set under `out_dir` and report the outcome.
    pub fn export(&self, out_dir: &Path) -> ExportReport {
        let mut report = ExportReport::default();
        match self.options.format {
            SaveFormat::Docset => self.export_docset(out_dir, &mut report),
            format => match self.options.pages {
                PageCount::SinglePage => self.export_single_page(out_dir, format, &mut report),
                PageCount::MultiPage => self.export_multi_page(out_dir, format, &mut report),
            },
        }
        report
    }

    fn items(&self) -> Vec<&DocItem> {
        self.collection
            .top_level_index()
            .into_iter()
            .filter(|item| item.visibility >= self.options.minimum_visibility)
            .collect()
    }

    /// One file holding the contents followed by every item page.
    fn export_single_page(&self, out_dir: &Path, format: SaveFormat, report: &mut ExportReport) {
        let items = self.items();
        let mut body = self
            .renderer
            .contents_page(&items, PageCount::SinglePage, format);
        for item in &items {
            body.push('\n');
            body.push_str(&self.renderer.item_page(item));
        }

        let path = out_dir.join(format!("index.{}", format.extension()));
        let contents = if format == SaveFormat::Html {
            self.wrap_page(&body)
        } else {
            body
        };
        write_file(&path, &contents, report);

        if format == SaveFormat::Html {
            self.copy_assets(out_dir, report);
        }
    }

    /// One file per item plus contents, landing page, and (in HTML mode)
    /// the frameset index and viewer assets.
    fn export_multi_page(&self, out_dir: &Path, format: SaveFormat, report: &mut ExportReport) {
        let items = self.items();
        let extension = format.extension();

        for item in &items {
            let page = self.renderer.item_page(item);
            let path = out_dir.join(item.html_link(format, PageCount::MultiPage));
            let contents = if format == SaveFormat::Html {
                self.wrap_nested_page(&page)
            } else {
                page
            };
            write_file(&path, &contents, report);
        }

        let contents_page = self
            .renderer
            .contents_page(&items, PageCount::MultiPage, format);
        let contents_page = if format == SaveFormat::Html {
            self.wrap_page(&contents_page)
        } else {
            contents_page
        };
        write_file(
            &out_dir.join(format!("contents.{extension}")),
            &contents_page,
            report,
        );

        let landing = self.landing_page_markdown();
        let landing = if format == SaveFormat::Html {
            self.wrap_page(&landing)
        } else {
            landing
        };
        write_file(
            &out_dir.join(format!("doclandingpage.{extension}")),
            &landing,
            report,
        );

        if format == SaveFormat::Html {
            write_file(
                &out_dir.join("index.html"),
                &frameset_index_page(&self.collection.project_title),
                report,
            );
            self.copy_assets(out_dir, report);
        }
    }

    /// Multi-page HTML tree inside the fixed docset directory layout, plus
    /// the manifest and the search index.
    fn export_docset(&self, out_dir: &Path, report: &mut ExportReport) {
        let title = &self.collection.project_title;
        let root = out_dir.join(format!("{title}.docset"));
        let resources = root.join("Contents").join("Resources");
        let documents = resources.join("Documents");

        self.export_multi_page(&documents, SaveFormat::Html, report);

        let plist_path = root.join("Contents").join("Info.plist");
        write_file(&plist_path, &InfoPlist::for_project(title).to_xml(), report);

        let db_path = resources.join("docSet.dsidx");
        match SearchDb::create(&db_path) {
            Ok(db) => {
                let mut row_failures = 0usize;
                for item in self.items() {
                    if let Err(error) = db.add_row(
                        &item.title,
                        &item.kind.doc_set_type(),
                        &item.html_link(SaveFormat::Html, PageCount::MultiPage),
                    ) {
                        row_failures += 1;
                        report.failed(&db_path, error);
                    }
                }
                if row_failures == 0 {
                    report.wrote(&db_path);
                }
            }
            Err(error) => report.failed(&db_path, error),
        }
    }

    fn wrap_page(&self, markdown: &str) -> String {
        wrap_in_html(
            &sanitize_for_embedding(markdown),
            &self.collection.project_title,
            CSS_FILE,
            false,
        )
    }

    fn wrap_nested_page(&self, markdown: &str) -> String {
        wrap_in_html(
            &sanitize_for_embedding(markdown),
            &self.collection.project_title,
            CSS_FILE,
            true,
        )
    }

    /// Landing page content from the project directory: the first
    /// case-insensitive match in the preference list, empty when none match.
    fn landing_page_markdown(&self) -> String {
        let Some(dir) = &self.collection.project_directory else {
            return String::new();
        };
        let Ok(entries) = fs::read_dir(dir) else {
            return String::new();
        };
        let names: Vec<PathBuf> = entries
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .collect();

        for preferred in LANDING_PAGE_PREFERENCE {
            let found = names.iter().find(|path| {
                path.file_name()
                    .and_then(|name| name.to_str())
                    .is_some_and(|name| name.eq_ignore_ascii_case(preferred))
            });
            if let Some(path) = found {
                match fs::read_to_string(path) {
                    Ok(contents) => return contents,
                    Err(error) => {
                        tracing::warn!(path = %path.display(), %error, "unreadable landing page source");
                    }
                }
            }
        }
        String::new()
    }

    fn copy_assets(&self, out_dir: &Path, report: &mut ExportReport) {
        let Some(assets) = &self.options.assets_dir else {
            return;
        };
        for sub in ["css", "js"] {
            let source = assets.join(sub);
            if source.is_dir() {
                copy_dir(&source, &out_dir.join(sub), report);
            }
        }
    }
}

fn write_file(path: &Path, contents: &str, report: &mut ExportReport) {
    if let Some(parent) = path.parent() {
        if let Err(error) = fs::create_dir_all(parent) {
            report.failed(path, error);
            return;
        }
    }
    match fs::write(path, contents) {
        Ok(()) => report.wrote(path),
        Err(error) => report.failed(path, error),
    }
}

fn copy_dir(source: &Path, destination: &Path, report: &mut ExportReport) {
    if let Err(error) = fs::create_dir_all(destination) {
        report.failed(destination, error);
        return;
    }
    let entries = match fs::read_dir(source) {
        Ok(entries) => entries,
        Err(error) => {
            report.failed(source, error);
            return;
        }
    };
    for entry in entries.filter_map(Result::ok) {
        let target = destination.join(entry.file_name());
        if entry.path().is_dir() {
            copy_dir(&entry.path(), &target, report);
        } else {
            match fs::copy(entry.path(), &target) {
                Ok(_) => report.wrote(&target),
                Err(error) => report.failed(&target, error),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{DocFile, RawContainer};
    use crate::symbol::Kind;

    fn sample_collection() -> ItemCollection {
        let mut bar = RawContainer {
            name: Some("bar".to_string()),
            accessibility: Some("public".to_string()),
            kind: "instance property".to_string(),
            ..RawContainer::default()
        };
        bar.parsed_declaration = Some("var bar: Int".to_string());
        let foo = RawContainer {
            name: Some("Foo".to_string()),
            accessibility: Some("public".to_string()),
            kind: "class".to_string(),
            parsed_declaration: Some("public class Foo".to_string()),
            substructure: Some(vec![bar]),
            ..RawContainer::default()
        };

        let mut collection = ItemCollection::new("Sample");
        collection.add_file(&DocFile {
            file_path: Some(PathBuf::from("Sources/Foo.swift")),
            containers: vec![foo],
        });
        collection
    }

    fn options(format: SaveFormat, pages: PageCount) -> ExportOptions {
        ExportOptions {
            format,
            pages,
            ..ExportOptions::default()
        }
    }

    #[test]
    fn test_single_page_markdown_concatenates_contents_and_pages() {
        let collection = sample_collection();
        let out = tempfile::tempdir().unwrap();

        let report = Exporter::new(&collection, options(SaveFormat::Markdown, PageCount::SinglePage))
            .export(out.path());
        assert!(report.is_complete());

        let index = fs::read_to_string(out.path().join("index.md")).unwrap();
        assert!(index.contains("#### Class"));
        assert!(index.contains("## Foo"));
        assert!(index.contains("var bar: Int"));
    }

    #[test]
    fn test_multi_page_markdown_layout() {
        let collection = sample_collection();
        let out = tempfile::tempdir().unwrap();

        let report = Exporter::new(&collection, options(SaveFormat::Markdown, PageCount::MultiPage))
            .export(out.path());
        assert!(report.is_complete());

        assert!(out.path().join("Class/Foo.md").is_file());
        assert!(out.path().join("contents.md").is_file());
        assert!(out.path().join("doclandingpage.md").is_file());
        assert!(!out.path().join("index.html").exists());
    }

    #[test]
    fn test_multi_page_html_layout_and_wrapping() {
        let collection = sample_collection();
        let out = tempfile::tempdir().unwrap();

        let report = Exporter::new(&collection, options(SaveFormat::Html, PageCount::MultiPage))
            .export(out.path());
        assert!(report.is_complete());

        let page = fs::read_to_string(out.path().join("Class/Foo.html")).unwrap();
        assert!(page.contains("../css/styles.css"));
        assert!(page.contains("## Foo"));

        let index = fs::read_to_string(out.path().join("index.html")).unwrap();
        assert!(index.contains("src=\"contents.html\""));
    }

    #[test]
    fn test_landing_page_prefers_dedicated_file_over_readme() {
        let project = tempfile::tempdir().unwrap();
        fs::write(project.path().join("README.md"), "# from readme").unwrap();
        fs::write(project.path().join("DocLandingPage.md"), "# landing").unwrap();

        let mut collection = sample_collection();
        collection.project_directory = Some(project.path().to_path_buf());

        let out = tempfile::tempdir().unwrap();
        Exporter::new(&collection, options(SaveFormat::Markdown, PageCount::MultiPage))
            .export(out.path());

        let landing = fs::read_to_string(out.path().join("doclandingpage.md")).unwrap();
        assert_eq!(landing, "# landing");
    }

    #[test]
    fn test_landing_page_empty_when_nothing_matches() {
        let project = tempfile::tempdir().unwrap();
        let mut collection = sample_collection();
        collection.project_directory = Some(project.path().to_path_buf());

        let out = tempfile::tempdir().unwrap();
        Exporter::new(&collection, options(SaveFormat::Markdown, PageCount::MultiPage))
            .export(out.path());

        let landing = fs::read_to_string(out.path().join("doclandingpage.md")).unwrap();
        assert_eq!(landing, "");
    }

    #[test]
    fn test_docset_layout_and_search_index() {
        let collection = sample_collection();
        let out = tempfile::tempdir().unwrap();

        let report = Exporter::new(&collection, options(SaveFormat::Docset, PageCount::MultiPage))
            .export(out.path());
        assert!(report.is_complete());

        let root = out.path().join("Sample.docset/Contents");
        assert!(root.join("Info.plist").is_file());
        assert!(root.join("Resources/Documents/Class/Foo.html").is_file());

        let db = SearchDb::create(&root.join("Resources/docSet.dsidx")).unwrap();
        assert_eq!(db.row_count().unwrap(), 1);
    }

    #[test]
    fn test_docset_index_is_written_or_failed_never_both() {
        let collection = sample_collection();
        let out = tempfile::tempdir().unwrap();

        let report = Exporter::new(&collection, options(SaveFormat::Docset, PageCount::MultiPage))
            .export(out.path());
        assert!(report
            .written
            .iter()
            .any(|path| path.ends_with("docSet.dsidx")));
        assert!(!report
            .failures
            .iter()
            .any(|failure| failure.path.ends_with("docSet.dsidx")));
    }

    #[test]
    fn test_docset_index_creation_failure_is_not_reported_written() {
        let collection = sample_collection();
        let out = tempfile::tempdir().unwrap();
        // occupy the database path with a directory so it cannot be opened
        fs::create_dir_all(
            out.path()
                .join("Sample.docset/Contents/Resources/docSet.dsidx"),
        )
        .unwrap();

        let report = Exporter::new(&collection, options(SaveFormat::Docset, PageCount::MultiPage))
            .export(out.path());
        assert!(report
            .failures
            .iter()
            .any(|failure| failure.path.ends_with("docSet.dsidx")));
        assert!(!report
            .written
            .iter()
            .any(|path| path.ends_with("docSet.dsidx")));
    }

    #[test]
    fn test_assets_are_copied_into_html_export() {
        let assets = tempfile::tempdir().unwrap();
        fs::create_dir_all(assets.path().join("css")).unwrap();
        fs::create_dir_all(assets.path().join("js")).unwrap();
        fs::write(assets.path().join("css/styles.css"), "body {}").unwrap();
        fs::write(assets.path().join("js/marked.min.js"), "// marked").unwrap();

        let collection = sample_collection();
        let out = tempfile::tempdir().unwrap();
        let mut opts = options(SaveFormat::Html, PageCount::MultiPage);
        opts.assets_dir = Some(assets.path().to_path_buf());

        let report = Exporter::new(&collection, opts).export(out.path());
        assert!(report.is_complete());
        assert!(out.path().join("css/styles.css").is_file());
        assert!(out.path().join("js/marked.min.js").is_file());
    }

    #[test]
    fn test_write_failures_are_collected_not_fatal() {
        let collection = sample_collection();
        let out = tempfile::tempdir().unwrap();
        // occupy the per-kind folder path with a file so page writes fail
        fs::write(out.path().join("Class"), "in the way").unwrap();

        let report = Exporter::new(&collection, options(SaveFormat::Markdown, PageCount::MultiPage))
            .export(out.path());
        assert!(!report.is_complete());
        // the remaining files were still attempted
        assert!(out.path().join("contents.md").is_file());
        assert!(report
            .failures
            .iter()
            .any(|failure| failure.path.ends_with("Class/Foo.md")));
    }

    #[test]
    fn test_visibility_filter_excludes_items_from_export() {
        let hidden = RawContainer {
            name: Some("Hidden".to_string()),
            accessibility: Some("private".to_string()),
            kind: "class".to_string(),
            ..RawContainer::default()
        };
        let mut collection = sample_collection();
        collection.add_file(&DocFile {
            file_path: None,
            containers: vec![hidden],
        });

        let out = tempfile::tempdir().unwrap();
        let mut opts = options(SaveFormat::Markdown, PageCount::MultiPage);
        opts.minimum_visibility = Visibility::Public;
        Exporter::new(&collection, opts).export(out.path());

        assert!(out.path().join("Class/Foo.md").is_file());
        assert!(!out.path().join("Class/Hidden.md").exists());
        assert!(collection.search(None, Some(&Kind::Class), Visibility::Private).len() == 2);
    }
}
