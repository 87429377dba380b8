use crate::event::{Event, Priority, UNKNOWN_TYPE};

/// Creates events that share a default source and event type.
///
/// Per-call values override the factory defaults when non-empty; if the
/// resolved event type is still empty the [`UNKNOWN_TYPE`] sentinel is used.
/// The factory holds no other state and can be reused for any number of
/// events.
#[derive(Debug, Clone, Default)]
pub struct EventFactory {
    source: Option<String>,
    event_type: Option<String>,
}

impl EventFactory {
    /// A factory with no defaults; every event falls back to the sentinel
    /// type unless one is supplied per call.
    pub fn new() -> Self {
        Self::default()
    }

    /// A factory whose events default to the given source and event type.
    pub fn with_defaults(source: Option<String>, event_type: Option<String>) -> Self {
        Self { source, event_type }
    }

    /// Create an event using the factory defaults and `Normal` priority.
    pub fn create_event(&self, name: impl Into<String>) -> Event {
        self.create_event_with(name, None, None, None)
    }

    /// Create an event, overriding any of the factory defaults.
    ///
    /// Empty strings are treated as absent so a caller can pass through
    /// unvalidated input without clobbering the defaults.
    pub fn create_event_with(
        &self,
        name: impl Into<String>,
        source: Option<&str>,
        priority: Option<Priority>,
        event_type: Option<&str>,
    ) -> Event {
        let source = source
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .or_else(|| self.source.clone());
        let event_type = event_type
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .or_else(|| self.event_type.clone())
            .unwrap_or_else(|| UNKNOWN_TYPE.to_string());
        Event::with_priority(name, source, event_type, priority.unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn factory_defaults_round_trip() {
        let factory = EventFactory::with_defaults(Some("src".into()), Some("TYPE1".into()));
        let event = factory.create_event("n");
        assert_eq!(event.name(), "n");
        assert_eq!(event.source(), Some("src"));
        assert_eq!(event.event_type(), "TYPE1");
        assert_eq!(event.priority(), Priority::Normal);
        assert!(event.data().is_empty());
        assert!(event.counters().is_empty());
        assert!(event.timers().is_empty());
        assert!(event.metrics().is_empty());
    }

    #[test]
    fn per_call_values_override_defaults() {
        let factory = EventFactory::with_defaults(Some("src".into()), Some("TYPE1".into()));
        let event = factory.create_event_with(
            "n",
            Some("other"),
            Some(Priority::Critical),
            Some("TYPE2"),
        );
        assert_eq!(event.source(), Some("other"));
        assert_eq!(event.event_type(), "TYPE2");
        assert_eq!(event.priority(), Priority::Critical);
    }

    #[test]
    fn empty_overrides_fall_back_to_defaults() {
        let factory = EventFactory::with_defaults(Some("src".into()), Some("TYPE1".into()));
        let event = factory.create_event_with("n", Some(""), None, Some(""));
        assert_eq!(event.source(), Some("src"));
        assert_eq!(event.event_type(), "TYPE1");
    }

    #[test]
    fn missing_event_type_uses_sentinel() {
        let factory = EventFactory::new();
        let event = factory.create_event("n");
        assert_eq!(event.event_type(), UNKNOWN_TYPE);
        assert_eq!(event.source(), None);
    }
}
