//! Sampling core for a SEN5x air quality dashboard.
//!
//! [`Sen5x`] speaks the sensor's I2C protocol: 16-bit commands, responses
//! framed as CRC-8 protected words. [`Sampler`] wraps it in a measurement
//! cycle (start, warm up, poll for data, read, stop) that always stops the
//! sensor again once it was started. [`Worker`] runs cycles on a dedicated
//! thread whenever the sample interval elapses or the UI asks for one.
//!
//! Hardware bring-up and rendering stay outside: the caller provides any
//! `embedded_hal` 1.0 I2C bus and delay, plus a [`Sink`] to publish to.
//!
//! ```no_run
//! # fn wire<I, D>(i2c: I, delay: D) -> std::io::Result<()>
//! # where
//! #     I: embedded_hal::i2c::I2c + Send + 'static,
//! #     D: embedded_hal::delay::DelayNs + Send + 'static,
//! # {
//! use std::sync::{Arc, Mutex};
//! use sen5x_monitor::{LogSink, Sampler, SamplerConfig, Sen5x, Worker};
//!
//! let sink = Arc::new(Mutex::new(LogSink::default()));
//! let sampler = Sampler::new(Sen5x::new(i2c, delay), sink, SamplerConfig::default());
//! let worker = Worker::spawn(sampler)?;
//! worker.trigger().fire();
//! # Ok(())
//! # }
//! ```

pub mod codec;
pub mod commands;
pub mod config;
mod crc;
pub mod decode;
pub mod error;
pub mod sampler;
pub mod sen5x;
pub mod severity;
pub mod sink;
pub mod trigger;
pub mod types;
pub mod worker;

pub use commands::Command;
pub use config::{ConfigError, SamplerConfig};
pub use crc::crc8;
pub use error::Error;
pub use sampler::{CycleOutcome, CycleState, Sampler};
pub use sen5x::{Sen5x, SEN5X_I2C_ADDRESS};
pub use severity::Severity;
pub use sink::{LogSink, SharedSink, Sink};
pub use trigger::{Trigger, TriggerHandle, TriggerSource};
pub use types::{Field, Measurement};
pub use worker::Worker;
