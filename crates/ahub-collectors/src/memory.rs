use ahub_core::{AnalyticsCollector, Event};

/// A collector that buffers recorded events in memory.
///
/// Primarily intended for tests and local inspection; events accumulate until
/// drained with [`take_events`](Self::take_events).
pub struct MemoryCollector {
    name: String,
    events: Vec<Event>,
}

impl MemoryCollector {
    pub fn new(name: impl Into<String>) -> Box<Self> {
        Box::new(Self {
            name: name.into(),
            events: Vec::new(),
        })
    }

    /// Number of currently buffered events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// The buffered events, oldest first.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Take all buffered events, leaving the buffer empty.
    pub fn take_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }
}

impl AnalyticsCollector for MemoryCollector {
    fn name(&self) -> &str {
        &self.name
    }

    fn record_event(&mut self, event: &Event) -> anyhow::Result<()> {
        self.events.push(event.clone());
        Ok(())
    }
}
