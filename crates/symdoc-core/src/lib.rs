//! Symdoc Core - document model and renderer for symbol-tree documentation
//!
//! This crate turns a language-agnostic symbol tree (produced by an external
//! source-introspection tool) into a browsable documentation set:
//! - Markup: renderable markup node tree with deferred link resolution
//! - Symbol: classification of raw kind/visibility strings
//! - Item: the normalized, recursive doc item tree
//! - Collection: filtered and sorted views over a project's items
//! - Render: per-item pages and the table of contents
//! - Export: single-page, multi-page, and docset output

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Markup node model - structured text assembly and rendering
pub mod markup;

/// Symbol classification - kind and visibility parsing
pub mod symbol;

/// Raw introspection input - serde decode of the symbol-tree envelope
pub mod input;

/// Doc item tree - the normalized documentable entity
pub mod item;

/// Item collection - ownership, filtering, and search
pub mod collection;

/// Document renderer - item pages and contents page
pub mod render;

/// Export pipeline - output topologies and file layout
pub mod export;

/// Background project loading
pub mod loader;

/// Error types
pub mod error;
