//! Directed multigraph container used by `lamina`.
//!
//! Nodes are addressed by string ids and edges by `(v, w, name)`. Insertion order is preserved
//! for both, so every traversal is deterministic.

mod graph;

pub use graph::{EdgeKey, Graph, GraphOptions};
