//! Markup node model
//!
//! Formatted text is represented as a tree of [`MdNode`]s and rendered in two
//! passes: the body text first, with link destinations collected along the
//! way, then a deduplicated reference table appended at the end. Rendering is
//! deterministic; link URLs are threaded through the recursive render call as
//! an explicit accumulator rather than shared mutable state.

mod builder;
mod node;

pub use node::{MdAttribute, MdNode, MdType, Rendered};
