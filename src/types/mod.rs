//! Shared type definitions
//!
//! Model descriptors and configuration shared across the crate.

pub mod config;
pub mod model;
