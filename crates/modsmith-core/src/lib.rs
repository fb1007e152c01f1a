//! Business logic and collaborator trait definitions for modsmith.
//!
//! This crate defines the "ports" (draft store, installer, catalogs, prompt
//! capability, uitype registry) that the infrastructure layer implements,
//! plus the ordered-insertion engine, the draft model operations and the
//! interactive session state machine. It depends only on `modsmith-types` --
//! never on `modsmith-infra` or any database/IO crate.

pub mod catalog;
pub mod draft;
pub mod draft_store;
pub mod install;
pub mod ordering;
pub mod prompt;
pub mod session;
pub mod uitype;
