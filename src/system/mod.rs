//! System utilities
//!
//! Hardware probes used when choosing an execution backend.

pub mod gpu;
