use thiserror::Error;

use crate::node::NodeId;

/// Errors raised by document operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomError {
    #[error("node {0} does not exist")]
    NodeNotFound(NodeId),
    #[error("node {0} is not an element")]
    NotAnElement(NodeId),
    #[error("node {0} is not an input")]
    NotAnInput(NodeId),
    #[error("node {0} is not a text node")]
    NotAText(NodeId),
    #[error("node {0} is not a shadow root")]
    NotAShadowRoot(NodeId),
    #[error("node {0} cannot have children")]
    NotAContainer(NodeId),
    #[error("invalid tag name {0:?}")]
    InvalidTagName(String),
    #[error("invalid attribute name {0:?}")]
    InvalidAttributeName(String),
    #[error("cannot insert {child} into {parent}: {reason}")]
    Hierarchy {
        parent: NodeId,
        child: NodeId,
        reason: &'static str,
    },
    #[error("node {child} is not a child of {parent}")]
    NotAChild { parent: NodeId, child: NodeId },
    #[error("element {0} already hosts a shadow root")]
    ShadowRootExists(NodeId),
    #[error("<{0}> cannot host a shadow root")]
    ShadowRootUnsupported(String),
    #[error("custom element <{0}> is already defined")]
    AlreadyDefined(String),
    #[error("<{0}> is not a valid custom element name")]
    InvalidCustomElementName(String),
}
