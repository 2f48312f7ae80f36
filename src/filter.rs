//! Per-sink severity threshold.
//!
//! Each sink layer is wrapped in a [`SeverityFilter`], so sinks attached to the same
//! registry keep independent thresholds.

use crate::severity::Severity;
use tracing::{Event, Metadata};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::{Context, Filter};

/// Lets through records at or above a severity. TRACE never passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeverityFilter {
    threshold: Severity,
}

impl SeverityFilter {
    pub fn new(threshold: Severity) -> Self {
        SeverityFilter { threshold }
    }

    pub fn threshold(&self) -> Severity {
        self.threshold
    }
}

impl<S> Filter<S> for SeverityFilter {
    fn enabled(&self, metadata: &Metadata<'_>, _cx: &Context<'_, S>) -> bool {
        // A callsite declaring `critical` may still emit plain errors; the value is
        // checked per event below.
        Severity::from_metadata(metadata).is_some_and(|severity| severity >= self.threshold)
    }

    fn event_enabled(&self, event: &Event<'_>, _cx: &Context<'_, S>) -> bool {
        Severity::of_event(event).is_some_and(|severity| severity >= self.threshold)
    }

    fn max_level_hint(&self) -> Option<LevelFilter> {
        Some(self.threshold.to_level_filter())
    }
}
