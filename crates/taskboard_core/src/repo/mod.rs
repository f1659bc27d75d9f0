//! Repository layer over the storage adapter.
//!
//! # Responsibility
//! - Own the authoritative task sequence and its mutation rules.
//! - Keep slot/serialization details behind `crate::storage`.
//!
//! # Invariants
//! - Repository writes validate task text before persistence.
//! - Repository APIs return semantic errors (`NotFound`, `Validation`) in
//!   addition to persistence failures.

pub mod task_repo;
