//! Domain model for the task list.
//!
//! # Responsibility
//! - Define the canonical task record persisted in the storage slot.
//! - Keep identity and title rules next to the data they protect.
//!
//! # Invariants
//! - Every task is identified by a stable `TaskId`.
//! - Deletion is a hard removal; there are no tombstones.

pub mod task;
