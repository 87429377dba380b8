//! Configuration types and loaders for the analytics hub.
//!
//! This crate owns the on-disk routing schema so host applications can share
//! a single source of truth for which collectors receive which event types.

pub mod routing;

pub use routing::RoutingManifest;
