//! Application Layer - Use Cases
//!
//! Orchestrates the domain types and platform primitives.

pub mod check_status;
pub mod config;
pub mod guard;
pub mod monitor;
