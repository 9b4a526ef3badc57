//! Background project loading
//!
//! The introspection call is slow and external, so it runs on a background
//! thread. The loader fetches the raw symbol tree, decodes it, and hands
//! the decoded files to a caller-supplied completion callback; the caller
//! merges them into its own collection on whatever thread it owns. There is
//! no cancellation: a new load clears the collection first and prior
//! unmerged results are discarded.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crate::collection::{BuildReport, ItemCollection};
use crate::error::LoadError;
use crate::input::{decode_doc_files, DocFile};

/// The opaque introspection collaborator.
///
/// Implementations typically shell out to an external tool; the core only
/// requires the raw JSON bytes of the envelope described in
/// [`decode_doc_files`].
pub trait SymbolSource: Send + Sync {
    fn fetch_symbol_tree(&self, project_dir: &Path) -> Result<Vec<u8>, LoadError>;
}

/// Fetch and decode on a background thread.
///
/// The completion callback fires exactly once, on the background thread,
/// with either the decoded files or the error.
pub fn spawn_load<F>(
    source: Arc<dyn SymbolSource>,
    project_dir: PathBuf,
    completion: F,
) -> JoinHandle<()>
where
    F: FnOnce(Result<Vec<DocFile>, LoadError>) + Send + 'static,
{
    thread::spawn(move || {
        completion(fetch_and_decode(source.as_ref(), &project_dir));
    })
}

/// Synchronous load: clear the collection, fetch, decode, and merge.
///
/// On failure the collection stays cleared; partial results are never
/// merged.
pub fn load_into(
    collection: &mut ItemCollection,
    source: &dyn SymbolSource,
    project_dir: &Path,
) -> Result<BuildReport, LoadError> {
    collection.clear();
    collection.project_directory = Some(project_dir.to_path_buf());
    let files = fetch_and_decode(source, project_dir)?;
    Ok(collection.add_files(&files))
}

fn fetch_and_decode(
    source: &dyn SymbolSource,
    project_dir: &Path,
) -> Result<Vec<DocFile>, LoadError> {
    let bytes = source.fetch_symbol_tree(project_dir)?;
    Ok(decode_doc_files(&bytes)?)
}
