use crate::graphlib::EdgeKey;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("edge {edge} references missing node `{node}`")]
    MissingNode { edge: EdgeKey, node: String },

    #[error("node `{node}` has no rank (referenced by edge {edge})")]
    MissingRank { edge: EdgeKey, node: String },

    #[error("edge {edge} points from rank {tail_rank} back to rank {head_rank}")]
    ReversedEdge {
        edge: EdgeKey,
        tail_rank: i32,
        head_rank: i32,
    },

    #[error(
        "edge {edge} has label rank {label_rank}, outside the open range ({tail_rank}, {head_rank})"
    )]
    LabelRankOutOfRange {
        edge: EdgeKey,
        label_rank: i32,
        tail_rank: i32,
        head_rank: i32,
    },

    #[error("dummy node `{node}` has no assigned coordinates")]
    MissingCoordinates { node: String },

    #[error("malformed dummy chain at `{node}`: {reason}")]
    MalformedChain { node: String, reason: String },
}

pub type Result<T> = std::result::Result<T, Error>;
