//! Raw introspection input
//!
//! The introspection collaborator emits JSON mapping each source-file path
//! to an ordered list of raw containers. The shapes here mirror that output
//! one-to-one and are only used transiently: the containers are walked once
//! to build [`crate::item::DocItem`]s and then dropped.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::Deserialize;

/// The decoded symbol tree for one source file
#[derive(Debug, Clone, Deserialize)]
pub struct DocFile {
    /// Path of the originating source file, taken from the envelope key
    #[serde(skip)]
    pub file_path: Option<PathBuf>,
    /// The file's top-level containers
    #[serde(rename = "substructure", default)]
    pub containers: Vec<RawContainer>,
}

/// One unprocessed declaration record, recursive through `substructure`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawContainer {
    #[serde(default)]
    pub name: Option<String>,
    /// Free-form visibility string
    #[serde(default)]
    pub accessibility: Option<String>,
    /// Free-form classification string
    #[serde(default)]
    pub kind: String,
    #[serde(rename = "doc.declaration", default)]
    pub doc_declaration: Option<String>,
    #[serde(rename = "parsed_declaration", default)]
    pub parsed_declaration: Option<String>,
    #[serde(rename = "doc.comment", default)]
    pub comment: Option<String>,
    #[serde(rename = "inheritedtypes", default)]
    pub inherited_types: Option<Vec<InheritedType>>,
    #[serde(default)]
    pub attributes: Option<Vec<Attribute>>,
    #[serde(default)]
    pub substructure: Option<Vec<RawContainer>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InheritedType {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Attribute {
    pub attribute: String,
}

/// Decode the full envelope: an array of single-entry maps from source-file
/// path to that file's symbol tree.
pub fn decode_doc_files(bytes: &[u8]) -> Result<Vec<DocFile>, serde_json::Error> {
    let root: Vec<BTreeMap<String, DocFile>> = serde_json::from_slice(bytes)?;

    let mut files = Vec::new();
    for entry in root {
        for (path, mut file) in entry {
            file.file_path = Some(PathBuf::from(path));
            files.push(file);
        }
    }
    Ok(files)
}
