use std::time::{Duration, Instant};

use tracing::error;

use crate::event::Event;

/// A stopwatch that accumulates elapsed time across start/stop sessions and
/// records the total into an event's timer bag.
///
/// The timer is either idle or running. Starting a running timer is a no-op
/// so a double start can never reset accumulated progress; stopping an idle
/// timer is a reported error that leaves state unchanged.
///
/// Recording targets are passed explicitly ([`record_into`](Self::record_into)
/// / [`record_into_each`](Self::record_into_each)) rather than held as a
/// back-reference, so the timer never ties up a borrow of its event between
/// sessions.
#[derive(Debug)]
pub struct TimerMetric {
    name: String,
    started: Option<Instant>,
    accumulated: Duration,
}

impl TimerMetric {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            started: None,
            accumulated: Duration::ZERO,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_running(&self) -> bool {
        self.started.is_some()
    }

    /// Total accumulated time in milliseconds, as stored in timer bags.
    pub fn total_millis(&self) -> f64 {
        self.accumulated.as_secs_f64() * 1000.0
    }

    /// Start the timer if it is not already running.
    pub fn start(&mut self) {
        self.start_at(Instant::now());
    }

    pub(crate) fn start_at(&mut self, now: Instant) {
        if self.started.is_none() {
            self.started = Some(now);
        }
    }

    /// Stop the timer, adding the elapsed session to the accumulated total.
    /// Stopping a timer that was never started reports an error and changes
    /// nothing.
    pub fn stop(&mut self) {
        self.stop_at(Instant::now());
    }

    pub(crate) fn stop_at(&mut self, now: Instant) {
        match self.started.take() {
            Some(started) => {
                self.accumulated += now.saturating_duration_since(started);
            }
            None => error!(timer = %self.name, "trying to stop a timer without starting it"),
        }
    }

    /// Stop the timer and write the accumulated total into `event`'s timer
    /// bag under this timer's name, overwriting any prior value for that key.
    pub fn record_into(&mut self, event: &mut Event) -> &mut Self {
        self.stop();
        event.remove_timer(&self.name);
        event.add_timer(self.name.clone(), self.total_millis());
        self
    }

    /// Stop the timer and record the accumulated total into each of the given
    /// events, overwriting independently.
    pub fn record_into_each<'a>(&mut self, events: impl IntoIterator<Item = &'a mut Event>) {
        self.stop();
        let total = self.total_millis();
        for event in events {
            event.remove_timer(&self.name);
            event.add_timer(self.name.clone(), total);
        }
    }
}
