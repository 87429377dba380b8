//! Conversion from untyped key-value payloads into [`Event`]s.
//!
//! Cross-runtime callers (embedded scripting layers, IPC surfaces) hand over
//! a generic JSON object rather than a typed event. Conversion degrades
//! gracefully: a malformed field is dropped with a warning and the rest of
//! the event survives. Only a missing or empty `name` aborts the conversion,
//! because an unnamed event cannot be recorded at all.

use anyhow::{bail, Result};
use serde_json::Value;
use tracing::warn;

use crate::event::{Event, Priority, UNKNOWN_TYPE};

/// Recognized top-level keys: `name` (required string), `source`,
/// `eventType`, `priority` (HIGH/NORMAL/CRITICAL), `data` (string values),
/// `counters`/`timers` (numeric values), `metrics` (string or boolean
/// values). Unrecognized keys are ignored.
pub fn event_from_json(payload: &Value) -> Result<Event> {
    let Some(map) = payload.as_object() else {
        bail!("event payload must be a JSON object");
    };

    let name = match map.get("name").and_then(Value::as_str) {
        Some(name) if !name.is_empty() => name,
        _ => bail!("event payload has no name, unable to record event"),
    };

    let source = match map.get("source") {
        None => None,
        Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
        Some(_) => {
            warn!("event source is not a string; dropping it");
            None
        }
    };

    let event_type = match map.get("eventType").and_then(Value::as_str) {
        Some(t) if !t.is_empty() => t.to_string(),
        _ => {
            warn!(event = name, "event type missing; using {UNKNOWN_TYPE}");
            UNKNOWN_TYPE.to_string()
        }
    };

    let mut event = Event::new(name, source, event_type);

    if let Some(priority) = map.get("priority") {
        match priority.as_str().map(str::parse::<Priority>) {
            Some(Ok(priority)) => {
                event.set_priority(priority);
            }
            _ => warn!(event = name, "event priority is not a valid priority string"),
        }
    }

    if let Some(data) = map.get("data") {
        for (key, value) in object_entries(data, name, "data") {
            match value.as_str() {
                Some(s) => {
                    event.add_data(key, s);
                }
                None => warn!(key = %key, "data value is not a string; dropping it"),
            }
        }
    }

    if let Some(counters) = map.get("counters") {
        for (key, value) in object_entries(counters, name, "counters") {
            match value.as_f64() {
                Some(n) => {
                    event.add_counter(key, n);
                }
                None => warn!(key = %key, "counter value is not a number; dropping it"),
            }
        }
    }

    if let Some(timers) = map.get("timers") {
        for (key, value) in object_entries(timers, name, "timers") {
            match value.as_f64() {
                Some(n) => {
                    event.add_timer(key, n);
                }
                None => warn!(key = %key, "timer value is not a number; dropping it"),
            }
        }
    }

    if let Some(metrics) = map.get("metrics") {
        for (key, value) in object_entries(metrics, name, "metrics") {
            match value {
                Value::String(s) => {
                    event.add_metric(key, s.as_str());
                }
                Value::Bool(b) => {
                    event.add_metric(key, *b);
                }
                _ => warn!(key = %key, "metric value is not a string or boolean; dropping it"),
            }
        }
    }

    Ok(event)
}

/// Iterate the entries of a bag field, warning once if the field is present
/// but not an object.
fn object_entries<'a>(
    value: &'a Value,
    event: &str,
    field: &'static str,
) -> impl Iterator<Item = (&'a String, &'a Value)> {
    let entries = match value.as_object() {
        Some(map) => Some(map.iter()),
        None => {
            warn!(event, field, "bag field is not an object; dropping it");
            None
        }
    };
    entries.into_iter().flatten()
}
