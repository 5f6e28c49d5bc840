//! Long-edge normalization for layered graph layout.
//!
//! Ranking assigns every node a layer; ordering and positioning then assume that every edge
//! joins adjacent layers. [`normalize::run`] splits longer edges into chains of dummy nodes and
//! [`normalize::undo`] folds each chain back into its original edge once the dummies have
//! coordinates.

pub use lamina_graphlib as graphlib;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

mod error;
pub mod model;
pub mod normalize;
pub mod util;

pub use error::{Error, Result};
pub use model::{Dummy, EdgeLabel, GraphLabel, LabelPos, NodeLabel, Point};
