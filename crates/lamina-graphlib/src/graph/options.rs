//! Graph configuration options.

#[derive(Debug, Clone, Copy, Default)]
pub struct GraphOptions {
    /// Keep edge names, allowing parallel edges between the same ordered pair.
    pub multigraph: bool,
}
