use anyhow::Result;

use crate::event::Event;

/// A destination for recorded events.
///
/// This is the hub's sole extension point: any analytics backend is added by
/// implementing this trait and registering the collector with
/// [`AnalyticsHub`](crate::hub::AnalyticsHub). The hub keys its registry by
/// [`name`](Self::name), so two instances reporting the same name occupy the
/// same registry slot (last registration wins).
///
/// A returned error never propagates out of the hub: dispatch logs it and
/// continues with the remaining collectors, so one failing backend cannot
/// block delivery to the others or to the default collector.
pub trait AnalyticsCollector {
    /// Unique name identifying this collector in the registry.
    fn name(&self) -> &str;

    /// Record a single event.
    fn record_event(&mut self, event: &Event) -> Result<()>;
}
