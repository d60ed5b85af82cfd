//! Corkboard: collaborative task tracking core.
//!
//! This crate provides the core functionality behind a small team task
//! tracker: employee accounts with credential sign-in, task creation and
//! sparse updates under ownership permissions, and demo data seeding.
//!
//! # Architecture
//!
//! Corkboard follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (in-memory, `PostgreSQL`)
//!
//! # Modules
//!
//! - [`identity`]: Employee accounts, credential verification, directory
//! - [`task`]: Task records, ownership permissions, sparse updates
//! - [`outcome`]: Service error taxonomy and the serialised result envelope
//! - [`seed`]: Idempotent demo data provisioning

pub mod identity;
pub mod outcome;
pub mod seed;
pub mod task;
