use crate::NodeId;

/// Failures of the mount contract. Signal handling itself never fails.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("node {0:?} is not part of the visual tree")]
    UnknownNode(NodeId),
    #[error("host refused to insert a focus sentinel next to {0:?}")]
    SentinelRejected(NodeId),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
