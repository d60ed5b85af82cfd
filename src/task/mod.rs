//! Collaborative task tracking for Corkboard.
//!
//! This module covers the task half of the product: creating tasks on
//! behalf of a signed-in user, sparse field-level updates with ownership
//! permissions, creator-only deletion, and per-user listings with
//! participants expanded to name/email summaries. The module follows
//! hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
