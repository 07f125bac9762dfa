//! One acquisition cycle: start, warm up, wait for data, read, stop.
//!
//! StopMeasurement is issued after every cycle whose StartMeasurement
//! succeeded, whatever happened in between, so the fan and measurement
//! engine are never left running. Errors end the current cycle only; the
//! next trigger is the retry.

use core::fmt::Debug;

use chrono::Local;
use embedded_hal::{delay::DelayNs, i2c::I2c};
use log::{debug, error, info, warn};

use crate::commands::Command;
use crate::config::SamplerConfig;
use crate::error::Error;
use crate::sen5x::Sen5x;
use crate::sink::{self, status, SharedSink, Sink};
use crate::types::Measurement;

/// Phase of the acquisition cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleState {
    Idle,
    Starting,
    WarmingUp,
    PollingReady,
    Reading,
    Stopping,
}

/// How a cycle ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    Published,
    StartFailed,
    NotReady,
    DataReadyFailed,
    ReadFailed,
}

type Timestamp = Box<dyn FnMut() -> String + Send>;

fn local_timestamp() -> String {
    Local::now().format("Updated %H:%M:%S").to_string()
}

/// Runs acquisition cycles against one sensor and publishes to one sink.
pub struct Sampler<I2C, D, S> {
    sensor: Sen5x<I2C, D>,
    sink: SharedSink<S>,
    config: SamplerConfig,
    state: CycleState,
    timestamp: Timestamp,
}

impl<I2C, D, S, E> Sampler<I2C, D, S>
where
    I2C: I2c<Error = E>,
    D: DelayNs,
    S: Sink,
    E: Debug,
{
    pub fn new(sensor: Sen5x<I2C, D>, sink: SharedSink<S>, config: SamplerConfig) -> Self {
        Sampler {
            sensor,
            sink,
            config,
            state: CycleState::Idle,
            timestamp: Box::new(local_timestamp),
        }
    }

    /// Replace the source of the status text published with each measurement.
    pub fn with_timestamp(mut self, timestamp: impl FnMut() -> String + Send + 'static) -> Self {
        self.timestamp = Box::new(timestamp);
        self
    }

    pub fn state(&self) -> CycleState {
        self.state
    }

    pub fn config(&self) -> &SamplerConfig {
        &self.config
    }

    pub fn sink(&self) -> &SharedSink<S> {
        &self.sink
    }

    pub fn sensor(&mut self) -> &mut Sen5x<I2C, D> {
        &mut self.sensor
    }

    pub fn into_sensor(self) -> Sen5x<I2C, D> {
        self.sensor
    }

    /// Run one full cycle and return to [`CycleState::Idle`].
    pub fn run_cycle(&mut self) -> CycleOutcome {
        self.enter(CycleState::Starting);
        if let Err(err) = self.sensor.start_measurement() {
            error!("start measurement failed: {err}");
            self.publish_status(status::START_ERROR);
            self.enter(CycleState::Idle);
            return CycleOutcome::StartFailed;
        }

        let outcome = self.measure();

        self.enter(CycleState::Stopping);
        if let Err(err) = self.sensor.stop_measurement() {
            warn!("stop measurement failed: {err}");
        }
        self.enter(CycleState::Idle);
        outcome
    }

    fn measure(&mut self) -> CycleOutcome {
        self.enter(CycleState::WarmingUp);
        self.publish_status(status::WARMING_UP);
        self.sensor.hold(self.config.warm_up);

        self.enter(CycleState::PollingReady);
        match self.poll_ready() {
            Ok(true) => {}
            Ok(false) => {
                warn!("no data ready within {:?}", self.config.ready_timeout);
                self.publish_status(status::NOT_READY);
                return CycleOutcome::NotReady;
            }
            Err(err) => {
                error!("data-ready failed: {err}");
                self.publish_status(status::DATA_READY_FAILED);
                return CycleOutcome::DataReadyFailed;
            }
        }

        self.enter(CycleState::Reading);
        match self.sensor.read_measured_values() {
            Ok(measurement) => {
                info!("{measurement}");
                self.publish_measurement(&measurement);
                CycleOutcome::Published
            }
            Err(err) => {
                error!("read failed: {err}");
                self.publish_status(status::READ_ERROR);
                CycleOutcome::ReadFailed
            }
        }
    }

    /// Query data-ready until set or out of attempts. An I/O fault aborts.
    ///
    /// Each query already spends its pre-read window inside the driver, so
    /// only the rest of `poll_interval` is held between queries.
    fn poll_ready(&mut self) -> Result<bool, Error<E>> {
        let gap = self
            .config
            .poll_interval
            .saturating_sub(Command::ReadDataReady.pre_read_delay());
        for attempt in 0..self.config.ready_poll_attempts() {
            if attempt > 0 {
                self.sensor.hold(gap);
            }
            if self.sensor.read_data_ready()? {
                debug!("data ready after {} queries", attempt + 1);
                return Ok(true);
            }
        }
        Ok(false)
    }

    fn publish_measurement(&mut self, measurement: &Measurement) {
        let stamp = (self.timestamp)();
        let mut sink = sink::lock(&self.sink);
        sink.publish_measurement(measurement);
        sink.publish_status(&stamp);
    }

    fn publish_status(&self, text: &str) {
        sink::lock(&self.sink).publish_status(text);
    }

    fn enter(&mut self, next: CycleState) {
        debug!("{:?} -> {:?}", self.state, next);
        self.state = next;
    }
}
