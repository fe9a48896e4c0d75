//! Gardening content domain model.
//!
//! # Responsibility
//! - Define the base shape shared by all content variants.
//! - Define the per-variant payloads and the generic stored entity.
//!
//! # Invariants
//! - Every stored entity is identified by an id unique within its collection.
//! - `createdAt <= updatedAt` holds for every stored entity.

pub mod content;
pub mod timestamp;
pub mod variants;
