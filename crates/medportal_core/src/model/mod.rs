//! Domain model for the portal.
//!
//! # Responsibility
//! - Define the static org chart, phase, committee and topic shapes.
//! - Define the mutable task board and its stored representation.
//!
//! # Invariants
//! - Static tables are `'static` and never mutated.
//! - Task ids are unique within one `TaskBoard`.

pub mod board;
pub mod committee;
pub mod org;
pub mod task;
pub mod topic;
