//! Application layer: family data files and tree services
//!
//! This layer loads family records and hands built trees to the layout engine.

pub mod error;
pub mod error_ext;
pub mod family;
pub mod service;

pub use error::{ApplicationError, ApplicationResult};
pub use error_ext::IoResultExt;
pub use family::FamilyFile;
pub use service::{FamilyService, TreeStats};
