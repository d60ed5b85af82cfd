//! Step definitions for account registration and sign-in scenarios.

pub mod world;
