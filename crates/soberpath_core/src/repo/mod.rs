//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define storage contracts for named collections and the activity log.
//! - Isolate SQLite and JSON details from service orchestration.
//!
//! # Invariants
//! - Every contract has an in-memory and a SQLite implementation.
//! - Collection loads degrade to seed data instead of failing.

pub mod activity_repo;
pub mod collection_repo;
pub mod collection_store;
