use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Well-known event type for user-engagement metrics.
pub const ENGAGEMENT: &str = "ENGAGEMENT";

/// Well-known event type for operational/health metrics.
pub const OPERATIONAL: &str = "OPERATIONAL";

/// Sentinel event type substituted when a caller never supplied one.
pub const UNKNOWN_TYPE: &str = "UNKNOWN";

/// Time sensitivity of an event.
///
/// Priority is an indication only: a collector that understands priorities
/// may batch `Normal` events, transmit `High` events immediately, and reserve
/// storage for `Critical` ones. Collectors without that functionality ignore it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Priority {
    High,
    #[default]
    Normal,
    Critical,
}

impl FromStr for Priority {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "HIGH" => Ok(Priority::High),
            "NORMAL" => Ok(Priority::Normal),
            "CRITICAL" => Ok(Priority::Critical),
            other => anyhow::bail!("unknown priority: {other:?}"),
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Priority::High => write!(f, "HIGH"),
            Priority::Normal => write!(f, "NORMAL"),
            Priority::Critical => write!(f, "CRITICAL"),
        }
    }
}

/// A custom metric value. Analytics backends accept only strings and
/// booleans here, so the restriction is encoded in the type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetricValue {
    Str(String),
    Bool(bool),
}

impl From<&str> for MetricValue {
    fn from(value: &str) -> Self {
        MetricValue::Str(value.to_string())
    }
}

impl From<String> for MetricValue {
    fn from(value: String) -> Self {
        MetricValue::Str(value)
    }
}

impl From<bool> for MetricValue {
    fn from(value: bool) -> Self {
        MetricValue::Bool(value)
    }
}

/// A structured analytics event.
///
/// Identity (name, source, type) is fixed at construction; the four bags
/// (data, counters, timers, metrics) are mutated through the chaining
/// operations until the event is handed to
/// [`AnalyticsHub::record_event`](crate::hub::AnalyticsHub::record_event).
/// The hub does not retain the event beyond that call.
///
/// Bag mutation is unguarded: the model assumes a single logical writer.
/// Hosts that share events across threads must synchronize externally.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    source: Option<String>,
    event_type: String,
    priority: Priority,
    data: HashMap<String, String>,
    counters: HashMap<String, f64>,
    timers: HashMap<String, f64>,
    metrics: HashMap<String, MetricValue>,
}

impl Event {
    /// Create an event with `Normal` priority.
    ///
    /// An empty `event_type` is replaced with the [`UNKNOWN_TYPE`] sentinel
    /// so the type is never empty once the event exists.
    pub fn new(
        name: impl Into<String>,
        source: Option<String>,
        event_type: impl Into<String>,
    ) -> Self {
        Self::with_priority(name, source, event_type, Priority::Normal)
    }

    /// Create an event with an explicit priority.
    pub fn with_priority(
        name: impl Into<String>,
        source: Option<String>,
        event_type: impl Into<String>,
        priority: Priority,
    ) -> Self {
        let mut event_type = event_type.into();
        if event_type.is_empty() {
            warn!("event created without an event type; using {UNKNOWN_TYPE}");
            event_type = UNKNOWN_TYPE.to_string();
        }
        Self {
            name: name.into(),
            source,
            event_type,
            priority,
            data: HashMap::new(),
            counters: HashMap::new(),
            timers: HashMap::new(),
            metrics: HashMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    pub fn event_type(&self) -> &str {
        &self.event_type
    }

    pub fn priority(&self) -> Priority {
        self.priority
    }

    pub fn set_priority(&mut self, priority: Priority) -> &mut Self {
        self.priority = priority;
        self
    }

    /// Insert or overwrite a data attribute.
    pub fn add_data(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.data.insert(key.into(), value.into());
        self
    }

    /// Remove a data attribute. Removing an absent key is a warned no-op.
    pub fn remove_data(&mut self, key: &str) -> &mut Self {
        if self.data.remove(key).is_none() {
            warn!(key, "trying to remove non-existent data");
        }
        self
    }

    /// Add a counter metric. Alias for [`increment_counter_by`](Self::increment_counter_by).
    pub fn add_counter(&mut self, key: impl Into<String>, count: f64) -> &mut Self {
        self.increment_counter_by(key, count)
    }

    /// Increment a counter, creating it at 0 if it does not exist yet.
    pub fn increment_counter_by(&mut self, key: impl Into<String>, by: f64) -> &mut Self {
        *self.counters.entry(key.into()).or_insert(0.0) += by;
        self
    }

    /// Increment a counter by 1.
    pub fn increment_counter(&mut self, key: impl Into<String>) -> &mut Self {
        self.increment_counter_by(key, 1.0)
    }

    pub fn remove_counter(&mut self, key: &str) -> &mut Self {
        self.counters.remove(key);
        self
    }

    /// Add a timer metric. Alias for [`increment_timer`](Self::increment_timer).
    pub fn add_timer(&mut self, key: impl Into<String>, millis: f64) -> &mut Self {
        self.increment_timer(key, millis)
    }

    /// Increment a timer, creating it at 0 if it does not exist yet.
    pub fn increment_timer(&mut self, key: impl Into<String>, millis: f64) -> &mut Self {
        *self.timers.entry(key.into()).or_insert(0.0) += millis;
        self
    }

    pub fn remove_timer(&mut self, key: &str) -> &mut Self {
        self.timers.remove(key);
        self
    }

    /// Insert or overwrite a custom metric. Only strings and booleans are
    /// representable; anything else is rejected before it reaches this method
    /// (see [`crate::bridge`] for the untyped boundary).
    pub fn add_metric(&mut self, key: impl Into<String>, value: impl Into<MetricValue>) -> &mut Self {
        self.metrics.insert(key.into(), value.into());
        self
    }

    pub fn remove_metric(&mut self, key: &str) -> &mut Self {
        self.metrics.remove(key);
        self
    }

    pub fn data(&self) -> &HashMap<String, String> {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut HashMap<String, String> {
        &mut self.data
    }

    pub fn counters(&self) -> &HashMap<String, f64> {
        &self.counters
    }

    pub fn counters_mut(&mut self) -> &mut HashMap<String, f64> {
        &mut self.counters
    }

    pub fn timers(&self) -> &HashMap<String, f64> {
        &self.timers
    }

    pub fn timers_mut(&mut self) -> &mut HashMap<String, f64> {
        &mut self.timers
    }

    pub fn metrics(&self) -> &HashMap<String, MetricValue> {
        &self.metrics
    }

    pub fn metrics_mut(&mut self) -> &mut HashMap<String, MetricValue> {
        &mut self.metrics
    }
}
