use anyhow::Context;
use tracing::info;

use ahub_core::{AnalyticsCollector, Event};

/// A collector that emits each event as a JSON line through `tracing`.
///
/// Useful as a default collector during development, or as a permanent audit
/// trail when the host's log pipeline already ships to an aggregator.
pub struct LogCollector {
    name: String,
}

impl LogCollector {
    pub fn new(name: impl Into<String>) -> Box<Self> {
        Box::new(Self { name: name.into() })
    }
}

impl AnalyticsCollector for LogCollector {
    fn name(&self) -> &str {
        &self.name
    }

    fn record_event(&mut self, event: &Event) -> anyhow::Result<()> {
        let payload = serde_json::to_string(event)
            .with_context(|| format!("failed to serialize event {}", event.name()))?;
        info!(collector = %self.name, %payload, "recorded event");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_without_error() {
        let mut collector = LogCollector::new("audit");
        let mut event = Event::new("page_view", Some("home".into()), "ENGAGEMENT");
        event.add_counter("clicks", 1.0);
        assert!(collector.record_event(&event).is_ok());
        assert_eq!(collector.name(), "audit");
    }
}
