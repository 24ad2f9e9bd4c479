//! Scene error types

use thiserror::Error;

use crate::node::NodeId;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SceneError {
    #[error("Node not found: {0}")]
    NodeNotFound(NodeId),

    #[error("Node {0} is not a control")]
    NotAControl(NodeId),

    #[error("Cannot attach node {child} under its own descendant {parent}")]
    CyclicAttach { parent: NodeId, child: NodeId },
}
