//! Domain-level errors (no external dependencies)

use thiserror::Error;

use crate::domain::arena::NodeId;
use crate::domain::entities::PersonId;

/// Domain errors represent precondition and structure violations.
/// These are independent of file and config concerns.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("depth must not be negative: {0}")]
    NegativeDepth(i64),

    #[error("node not found: {0}")]
    NodeNotFound(NodeId),

    #[error("node {child} already has parent {parent}")]
    AlreadyHasParent { child: NodeId, parent: NodeId },

    #[error("attaching {child} below {parent} would create a cycle")]
    CycleDetected { child: NodeId, parent: NodeId },

    #[error("person not found: {0}")]
    PersonNotFound(PersonId),

    #[error("person {0} is listed as their own ancestor")]
    AncestryCycle(PersonId),

    #[error("invalid layout metrics: {message}")]
    InvalidMetrics { message: String },
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
