//! Content repository and its pluggable collaborators.
//!
//! # Responsibility
//! - Own one content-type collection and its persistence write-back.
//! - Keep id generation and merge rules behind small, swappable pieces.
//!
//! # Invariants
//! - Missing-id `update`/`remove` calls are silent no-ops, not errors.
//! - Persistence failures are reported, never propagated.

pub mod content_repo;
pub mod identity;
pub mod lazy;
pub mod patch;
