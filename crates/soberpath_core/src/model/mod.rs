//! Domain model of the rehabilitation console.
//!
//! # Responsibility
//! - Define the records persisted in collections and the activity log.
//! - Keep stored field names compatible with the console's JSON blobs.
//!
//! # Invariants
//! - Roles and activity kinds are closed enumerations.
//! - Form drafts are validated before becoming records.

pub mod activity;
pub mod application;
pub mod housing;
pub mod nav;
pub mod progress;
pub mod role;
pub mod roster;
pub mod substance;
