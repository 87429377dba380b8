use std::collections::HashMap;

use tracing::{error, warn};

use crate::collector::AnalyticsCollector;
use crate::event::Event;

/// The central collector registry and event dispatcher.
///
/// The hub owns every registered collector, a per-event-type link table, and
/// an optional default collector. [`record_event`](Self::record_event) fans
/// an event out to the collectors linked to its type and always also notifies
/// the default collector unless a linked collector already carried its name.
///
/// Links keep insertion order with set semantics, so dispatch order for an
/// event type is the order in which collectors were linked to it.
///
/// The hub is an explicit object owned by whoever constructs it; there is no
/// implicit singleton. It is single-writer by design — hosts that dispatch
/// from multiple threads must wrap it in their own synchronization.
pub struct AnalyticsHub {
    collectors: HashMap<String, Box<dyn AnalyticsCollector>>,
    links: HashMap<String, Vec<String>>,
    default_collector: Option<Box<dyn AnalyticsCollector>>,
}

impl Default for AnalyticsHub {
    fn default() -> Self {
        Self::new()
    }
}

impl AnalyticsHub {
    pub fn new() -> Self {
        Self {
            collectors: HashMap::new(),
            links: HashMap::new(),
            default_collector: None,
        }
    }

    /// Register a collector under its name. Re-registering a name replaces
    /// the previous instance; existing links route to the new one.
    pub fn register_collector(&mut self, collector: Box<dyn AnalyticsCollector>) {
        self.collectors.insert(collector.name().to_string(), collector);
    }

    /// Replace the default collector. The default receives every recorded
    /// event exactly once, whether or not it is linked to the event's type.
    pub fn set_default_collector(&mut self, collector: Box<dyn AnalyticsCollector>) {
        self.default_collector = Some(collector);
    }

    /// Link a collector to an event type, registering it first if no
    /// collector of that name exists yet. An already-registered name is not
    /// overwritten, and linking is idempotent.
    pub fn add_collector_to_event_type(
        &mut self,
        event_type: &str,
        collector: Box<dyn AnalyticsCollector>,
    ) {
        let name = collector.name().to_string();
        self.collectors.entry(name.clone()).or_insert(collector);
        self.link(event_type, name);
    }

    /// Link an already-registered collector to an event type by name.
    /// Unknown names are a warned no-op.
    pub fn add_registered_collector_to_event_type(
        &mut self,
        event_type: &str,
        collector_name: &str,
    ) {
        if !self.collectors.contains_key(collector_name) {
            warn!(
                collector = collector_name,
                event_type, "cannot link collector that has not been registered"
            );
            return;
        }
        self.link(event_type, collector_name.to_string());
    }

    fn link(&mut self, event_type: &str, collector_name: String) {
        let names = self.links.entry(event_type.to_string()).or_default();
        if !names.contains(&collector_name) {
            names.push(collector_name);
        }
    }

    /// Unlink a collector from an event type. The collector stays in the
    /// global registry. Unlinking from a type that has no links at all is a
    /// warned no-op.
    pub fn remove_collector_from_event_type(&mut self, event_type: &str, collector_name: &str) {
        match self.links.get_mut(event_type) {
            Some(names) => names.retain(|n| n != collector_name),
            None => warn!(
                collector = collector_name,
                event_type, "trying to unlink from an event type with no linked collectors"
            ),
        }
    }

    /// The collectors currently linked to an event type, in link order.
    /// Linked names with no registered collector are skipped with a warning.
    pub fn collectors_for(&self, event_type: &str) -> Vec<&dyn AnalyticsCollector> {
        let Some(names) = self.links.get(event_type) else {
            return Vec::new();
        };
        names
            .iter()
            .filter_map(|name| match self.collectors.get(name) {
                Some(collector) => Some(collector.as_ref()),
                None => {
                    warn!(collector = %name, event_type, "linked collector is not registered");
                    None
                }
            })
            .collect()
    }

    /// Names of all registered collectors.
    pub fn registered_collector_names(&self) -> Vec<&str> {
        self.collectors.keys().map(String::as_str).collect()
    }

    /// Dispatch an event to every collector linked to its type, then to the
    /// default collector if one is set and was not already among them.
    ///
    /// Each linked collector is invoked exactly once, in link order. Linked
    /// names that miss the registry are skipped with a warning, and a failing
    /// collector is logged without blocking delivery to the rest. No failure
    /// in here reaches the caller.
    pub fn record_event(&mut self, event: &Event) {
        let names = self.links.get(event.event_type()).cloned().unwrap_or_default();
        let default_name = self
            .default_collector
            .as_ref()
            .map(|c| c.name().to_string());

        let mut default_was_linked = false;
        for name in &names {
            match self.collectors.get_mut(name) {
                Some(collector) => {
                    if default_name.as_deref() == Some(name.as_str()) {
                        default_was_linked = true;
                    }
                    if let Err(err) = collector.record_event(event) {
                        error!(
                            collector = %name,
                            event = event.name(),
                            %err,
                            "collector failed to record event"
                        );
                    }
                }
                None => warn!(
                    collector = %name,
                    event_type = event.event_type(),
                    "linked collector is not registered; skipping"
                ),
            }
        }

        if !default_was_linked {
            if let Some(default) = self.default_collector.as_mut() {
                if let Err(err) = default.record_event(event) {
                    error!(
                        collector = default.name(),
                        event = event.name(),
                        %err,
                        "default collector failed to record event"
                    );
                }
            }
        }
    }
}
