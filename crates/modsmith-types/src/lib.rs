//! Shared domain types for the modsmith module designer.
//!
//! This crate contains the draft document model (module, tabs, blocks,
//! fields, related lists, links) and the designer error taxonomy.
//!
//! Zero infrastructure dependencies -- only serde, chrono, thiserror.

pub mod draft;
pub mod error;
