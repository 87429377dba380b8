//! Core infrastructure for the analytics hub.
//!
//! This crate provides the registry/dispatch core shared by all collector
//! crates and host applications: the [`Event`](event::Event) model, the
//! [`TimerMetric`](timer::TimerMetric) stopwatch, the
//! [`EventFactory`](factory::EventFactory) convenience constructor, the
//! [`AnalyticsCollector`](collector::AnalyticsCollector) extension point, the
//! [`AnalyticsHub`](hub::AnalyticsHub) itself, bridge conversion from untyped
//! JSON payloads, and the logging subsystem.

pub mod bridge;
pub mod collector;
pub mod event;
pub mod factory;
pub mod hub;
pub mod logging;
pub mod timer;

pub use collector::AnalyticsCollector;
pub use event::{Event, MetricValue, Priority};
pub use factory::EventFactory;
pub use hub::AnalyticsHub;
pub use timer::TimerMetric;
