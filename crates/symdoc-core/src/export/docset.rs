//! Docset packaging collaborators
//!
//! The offline package needs two artifacts beyond the multi-page HTML tree:
//! an `Info.plist` manifest and a SQLite search index consumed by the
//! documentation browser.

use std::path::Path;

use rusqlite::{params, Connection};

use crate::item::replacing_non_word;

/// Manifest for the offline documentation package
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InfoPlist {
    pub bundle_id: String,
    pub bundle_name: String,
    pub platform_family: String,
    pub dash_index_file_path: String,
    pub dash_doc_set_family: String,
}

impl InfoPlist {
    /// Manifest for a project title: the bundle id and platform family are
    /// the sanitized, lowercased title.
    pub fn for_project(title: &str) -> Self {
        let sanitized = replacing_non_word(title, true);
        Self {
            bundle_id: sanitized.clone(),
            bundle_name: title.to_string(),
            platform_family: sanitized,
            dash_index_file_path: "doclandingpage.html".to_string(),
            dash_doc_set_family: "dashtoc".to_string(),
        }
    }

    pub fn to_xml(&self) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE plist PUBLIC "-//Apple//DTD PLIST 1.0//EN" "http://www.apple.com/DTDs/PropertyList-1.0.dtd">
<plist version="1.0">
<dict>
	<key>CFBundleIdentifier</key>
	<string>{}</string>
	<key>CFBundleName</key>
	<string>{}</string>
	<key>DocSetPlatformFamily</key>
	<string>{}</string>
	<key>isDashDocset</key>
	<true/>
	<key>isJavaScriptEnabled</key>
	<true/>
	<key>dashIndexFilePath</key>
	<string>{}</string>
	<key>DashDocSetFamily</key>
	<string>{}</string>
</dict>
</plist>
"#,
            xml_escaped(&self.bundle_id),
            xml_escaped(&self.bundle_name),
            xml_escaped(&self.platform_family),
            xml_escaped(&self.dash_index_file_path),
            xml_escaped(&self.dash_doc_set_family),
        )
    }
}

fn xml_escaped(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// The `docSet.dsidx` search index: one row per top-level item
pub struct SearchDb {
    connection: Connection,
}

impl SearchDb {
    /// Open (or create) the index database and ensure the table and its
    /// duplicate-preventing unique index exist.
    pub fn create(path: &Path) -> rusqlite::Result<Self> {
        let connection = Connection::open(path)?;
        connection.execute(
            "CREATE TABLE IF NOT EXISTS searchIndex (
                id INTEGER PRIMARY KEY,
                name TEXT,
                type TEXT,
                path TEXT
            )",
            [],
        )?;
        connection.execute(
            "CREATE UNIQUE INDEX IF NOT EXISTS anchor ON searchIndex (name, type, path)",
            [],
        )?;
        Ok(Self { connection })
    }

    /// Insert one entry; exact duplicates are ignored.
    pub fn add_row(&self, name: &str, entry_type: &str, path: &str) -> rusqlite::Result<()> {
        self.connection.execute(
            "INSERT OR IGNORE INTO searchIndex (name, type, path) VALUES (?1, ?2, ?3)",
            params![name, entry_type, path],
        )?;
        Ok(())
    }

    pub fn row_count(&self) -> rusqlite::Result<u64> {
        self.connection
            .query_row("SELECT COUNT(*) FROM searchIndex", [], |row| row.get(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manifest_sanitizes_bundle_id() {
        let plist = InfoPlist::for_project("My Cool Project!");
        assert_eq!(plist.bundle_id, "my-cool-project-");
        assert_eq!(plist.bundle_name, "My Cool Project!");

        let xml = plist.to_xml();
        assert!(xml.contains("<key>CFBundleIdentifier</key>"));
        assert!(xml.contains("<string>my-cool-project-</string>"));
        assert!(xml.contains("<string>doclandingpage.html</string>"));
    }

    #[test]
    fn test_manifest_escapes_xml_reserved_characters() {
        let plist = InfoPlist::for_project("Tools & Types<T>");
        assert!(plist.to_xml().contains("Tools &amp; Types&lt;T&gt;"));
    }

    #[test]
    fn test_duplicate_rows_are_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let db = SearchDb::create(&dir.path().join("docSet.dsidx")).unwrap();

        db.add_row("Foo", "Class", "Class/Foo.html").unwrap();
        db.add_row("Foo", "Class", "Class/Foo.html").unwrap();
        db.add_row("Foo", "Struct", "Struct/Foo.html").unwrap();
        assert_eq!(db.row_count().unwrap(), 2);
    }

    #[test]
    fn test_create_is_idempotent_across_reopens() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("docSet.dsidx");

        let db = SearchDb::create(&path).unwrap();
        db.add_row("Foo", "Class", "Class/Foo.html").unwrap();
        drop(db);

        let reopened = SearchDb::create(&path).unwrap();
        assert_eq!(reopened.row_count().unwrap(), 1);
    }
}
