//! Reference collector implementations.
//!
//! These cover the two collectors most hosts want out of the box: a logging
//! sink that emits events through `tracing`, and an in-memory buffer for
//! tests and local inspection. Real analytics backends implement
//! [`ahub_core::AnalyticsCollector`] the same way and live in host code.

pub mod log;
pub mod memory;

pub use log::LogCollector;
pub use memory::MemoryCollector;
