//! Infrastructure Layer
//!
//! Cookie store implementations.

pub mod memory_jar;
