use thiserror::Error;

use crate::node::NodeId;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("no code for symbol {0:?}")]
    UnknownSymbol(char),

    #[error("node {0:?} has a single child but is not a degenerate root")]
    SingleChild(NodeId),

    #[error("node {0:?} is missing its \"0\" child")]
    MissingChild(NodeId),

    #[error("leaf {0:?} carries no symbol")]
    KeylessLeaf(NodeId),

    #[error("internal node {0:?} carries a symbol")]
    KeyedInternal(NodeId),

    #[error("node {node:?} weighs {actual}, children sum to {expected}")]
    WeightMismatch {
        node: NodeId,
        expected: usize,
        actual: usize,
    },

    #[error("symbol {0:?} appears in more than one leaf")]
    DuplicateLeaf(char),

    #[error("symbol {0:?} occurs in the text but has no leaf")]
    MissingLeaf(char),

    #[error("node {0:?} is not reachable from the root")]
    UnreachableNode(NodeId),

    #[error("leaf {0:?} has no entry in the code table")]
    MissingCode(NodeId),
}
