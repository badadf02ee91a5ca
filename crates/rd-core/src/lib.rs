//! rd-core: Shared types for Review Desk
//!
//! This crate has zero internal crate dependencies and defines the
//! feedback, catalog and history types used across all other rd-* crates.

pub mod catalog;
pub mod history;
pub mod tag;
