//! Domain layer: tree model, entities and tree construction
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod arena;
pub mod builder;
pub mod entities;
pub mod error;
pub mod list;

pub use arena::{NodeId, PreOrderIter, TreeArena, TreeNode};
pub use builder::{FamilySource, TreeBuilder};
pub use entities::{ParentLink, Person, PersonId};
pub use error::{DomainError, DomainResult};
pub use list::{checked_depth, TreeListItem};
