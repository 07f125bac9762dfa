//! Consumer of measurements and status text.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use log::info;

use crate::trigger::TriggerHandle;
use crate::types::{Field, Measurement};

/// Status strings published by the sampler, one per outcome.
pub mod status {
    pub const WARMING_UP: &str = "warming up";
    pub const START_ERROR: &str = "start error";
    pub const NOT_READY: &str = "sensor not ready";
    pub const DATA_READY_FAILED: &str = "data-ready read failed";
    pub const READ_ERROR: &str = "read error";
}

/// Display side of the dashboard.
///
/// The sampler only calls into a sink while holding its [`SharedSink`] lock,
/// so an implementation never sees a publication interleaved with rendering
/// that takes the same lock.
pub trait Sink {
    fn publish_measurement(&mut self, measurement: &Measurement);

    fn publish_status(&mut self, text: &str);

    /// Receives the handle the UI fires for an on-demand sample.
    fn on_manual_trigger(&mut self, _trigger: TriggerHandle) {}
}

/// A sink shared between the sampling worker and the renderer.
pub type SharedSink<S> = Arc<Mutex<S>>;

pub(crate) fn lock<S>(sink: &SharedSink<S>) -> MutexGuard<'_, S> {
    sink.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Sink that only logs, for headless runs.
#[derive(Debug, Default)]
pub struct LogSink {
    last: Option<Measurement>,
}

impl LogSink {
    pub fn last(&self) -> Option<&Measurement> {
        self.last.as_ref()
    }
}

impl Sink for LogSink {
    fn publish_measurement(&mut self, measurement: &Measurement) {
        for field in Field::ALL {
            info!(
                "{}: {} {}",
                field.name(),
                measurement.formatted(field),
                field.unit()
            );
        }
        self.last = Some(*measurement);
    }

    fn publish_status(&mut self, text: &str) {
        info!("status: {text}");
    }
}
