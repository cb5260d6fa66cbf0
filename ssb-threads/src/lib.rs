//! Rebuild a readable thread around one focused post.
//!
//! A context bundle carries the focused post, an unordered set of ancestor
//! candidates and a depth-first list of descendants. [`ThreadContextModel`]
//! turns that into one linear thread, and gives each post a
//! [`ThreadContext`] saying how it connects to its neighbours.

use thiserror::Error as ThisError;

mod ancestors;
mod bundle;
mod context;
mod descendants;
mod model;
mod post;
mod tree;

#[cfg(test)]
mod testing;

pub use ancestors::{resolve_ancestors, AncestorBoundary, AncestorChain, AncestorChainResolver};
pub use bundle::ContextBundle;
pub use context::ThreadContext;
pub use descendants::classify_descendants;
pub use model::ThreadContextModel;
pub use post::ReplyPost;
pub use tree::ReplyTree;

#[derive(Debug, ThisError)]
pub enum Error {
    #[error("Failed to decode context bundle, cause: {0}")]
    Json(#[from] serde_json::Error),
}
