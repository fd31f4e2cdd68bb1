//! Family tree model and proportional tree-diagram layout.
//!
//! - [`domain`]: arena-backed payload tree ([`domain::TreeArena`]), people,
//!   and the descendant-tree builder.
//! - [`layout`]: [`layout::LayoutEngine`] giving every subtree a horizontal
//!   band proportional to its leaf count.
//! - [`application`]: family files and the use cases the CLI runs.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod layout;
pub mod tree_traits;
pub mod util;
