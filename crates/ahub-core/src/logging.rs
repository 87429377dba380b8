use std::collections::VecDeque;
use std::fmt;
use std::sync::{Arc, Mutex};

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Log severity level (mirrors tracing levels for host consumption).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogLevel::Trace => write!(f, "TRACE"),
            LogLevel::Debug => write!(f, "DEBUG"),
            LogLevel::Info => write!(f, "INFO"),
            LogLevel::Warn => write!(f, "WARN"),
            LogLevel::Error => write!(f, "ERROR"),
        }
    }
}

/// A single captured log entry.
///
/// Registry misses, timer misuse, and bridge conversion problems are
/// absorbed rather than returned to callers; entries in this buffer are how a
/// host observes them.
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub level: LogLevel,
    pub target: String,
    pub message: String,
}

/// Shared ring buffer of log entries for the hosting application.
pub type LogBuffer = Arc<Mutex<VecDeque<LogEntry>>>;

/// Create a new shared log buffer with a given capacity.
pub fn new_log_buffer(capacity: usize) -> LogBuffer {
    Arc::new(Mutex::new(VecDeque::with_capacity(capacity)))
}

const MAX_BUFFERED_LINES: usize = 1000;

/// A tracing layer that pushes log entries into a shared ring buffer.
pub struct BufferLayer {
    buffer: LogBuffer,
    max_lines: usize,
}

impl BufferLayer {
    pub fn new(buffer: LogBuffer, max_lines: usize) -> Self {
        Self { buffer, max_lines }
    }
}

impl<S: tracing::Subscriber> Layer<S> for BufferLayer {
    fn on_event(
        &self,
        event: &tracing::Event<'_>,
        _ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        let level = match *event.metadata().level() {
            tracing::Level::TRACE => LogLevel::Trace,
            tracing::Level::DEBUG => LogLevel::Debug,
            tracing::Level::INFO => LogLevel::Info,
            tracing::Level::WARN => LogLevel::Warn,
            tracing::Level::ERROR => LogLevel::Error,
        };

        let target = event.metadata().target().to_string();

        let mut visitor = MessageVisitor {
            message: None,
            fields: Vec::new(),
        };
        event.record(&mut visitor);
        let message = visitor.finish();

        let entry = LogEntry {
            level,
            target,
            message,
        };

        if let Ok(mut buf) = self.buffer.lock() {
            if buf.len() >= self.max_lines {
                buf.pop_front();
            }
            buf.push_back(entry);
        }
    }
}

struct MessageVisitor {
    message: Option<String>,
    fields: Vec<String>,
}

impl MessageVisitor {
    fn finish(self) -> String {
        match self.message {
            Some(msg) if self.fields.is_empty() => msg,
            Some(msg) => format!("{} {}", msg, self.fields.join(" ")),
            None if self.fields.is_empty() => String::new(),
            None => self.fields.join(" "),
        }
    }
}

impl tracing::field::Visit for MessageVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.message = Some(format!("{:?}", value));
        } else {
            self.fields.push(format!("{}={:?}", field.name(), value));
        }
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "message" {
            self.message = Some(value.to_string());
        } else {
            self.fields.push(format!("{}={}", field.name(), value));
        }
    }
}

/// Initialize the logging subsystem. Returns the shared log buffer so the
/// host can surface analytics warnings in its own UI or logs.
///
/// Filter controlled by `AHUB_LOG` or `RUST_LOG` (default: `info`).
/// Stderr output via the standard fmt layer; captured entries go to a ring
/// buffer of `MAX_BUFFERED_LINES` entries.
///
/// Hosts that already manage a tracing subscriber should skip this and attach
/// a [`BufferLayer`] themselves if they want the capture buffer.
pub fn init() -> LogBuffer {
    let buffer = new_log_buffer(MAX_BUFFERED_LINES);

    let filter = EnvFilter::try_from_env("AHUB_LOG")
        .or_else(|_| EnvFilter::try_from_env("RUST_LOG"))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(BufferLayer::new(buffer.clone(), MAX_BUFFERED_LINES))
        .init();

    buffer
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::warn;

    fn capture(f: impl FnOnce()) -> Vec<LogEntry> {
        let buffer = new_log_buffer(16);
        let subscriber =
            tracing_subscriber::registry().with(BufferLayer::new(buffer.clone(), 16));
        tracing::subscriber::with_default(subscriber, f);
        let entries = buffer.lock().unwrap();
        entries.iter().cloned().collect()
    }

    #[test]
    fn buffer_layer_captures_message_and_fields() {
        let entries = capture(|| {
            warn!(collector = "ghost", "cannot link collector that has not been registered");
        });
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].level, LogLevel::Warn);
        assert!(entries[0]
            .message
            .contains("cannot link collector that has not been registered"));
        assert!(entries[0].message.contains("collector=ghost"));
    }

    #[test]
    fn ring_buffer_drops_oldest_beyond_capacity() {
        let buffer = new_log_buffer(2);
        let subscriber = tracing_subscriber::registry().with(BufferLayer::new(buffer.clone(), 2));
        tracing::subscriber::with_default(subscriber, || {
            warn!("one");
            warn!("two");
            warn!("three");
        });
        let entries = buffer.lock().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].message, "two");
        assert_eq!(entries[1].message, "three");
    }

    #[test]
    fn hub_misses_surface_through_the_buffer() {
        use crate::hub::AnalyticsHub;

        let entries = capture(|| {
            let mut hub = AnalyticsHub::new();
            hub.add_registered_collector_to_event_type("T", "ghost");
        });
        assert!(entries
            .iter()
            .any(|e| e.level == LogLevel::Warn && e.message.contains("ghost")));
    }
}
