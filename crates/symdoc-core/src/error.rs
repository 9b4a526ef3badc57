//! Error types

/// Failure while fetching or decoding a project's symbol tree.
///
/// Loading is the one operation that fails across the public API; rendering
/// and export absorb their failures into reports instead.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The introspection collaborator produced no usable output
    #[error("symbol source failed: {0}")]
    Source(String),

    /// The collaborator's output was not a valid symbol-tree envelope
    #[error("malformed symbol tree: {0}")]
    Decode(#[from] serde_json::Error),
}
