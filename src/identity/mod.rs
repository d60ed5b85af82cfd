//! Identity management for Corkboard.
//!
//! This module covers the account side of the tracker: registering
//! employees with hashed credentials, verifying email/password sign-ins
//! into identity claims, and resolving stored users for other services.
//! The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
