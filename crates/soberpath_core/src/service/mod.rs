//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Host the pure estimator and role filter used by those use-cases.
//! - Keep callers decoupled from storage details.

pub mod access_service;
pub mod activity_feed;
pub mod allocation_service;
pub mod application_service;
pub mod dashboard_service;
pub mod estimate_service;
pub mod progress_service;
pub mod roster_service;
