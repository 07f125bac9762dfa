//! Dedicated sampling thread.
//!
//! The worker blocks on its [`TriggerSource`] and runs each cycle to
//! completion before waiting again, so cycles never overlap and the bus is
//! only ever touched from this thread.

use core::fmt::Debug;
use std::io;
use std::thread::{self, JoinHandle};

use embedded_hal::{delay::DelayNs, i2c::I2c};
use log::{debug, info};

use crate::sampler::Sampler;
use crate::sink::{self, Sink};
use crate::trigger::{Trigger, TriggerHandle, TriggerSource};

pub struct Worker<I2C, D, S> {
    trigger: TriggerHandle,
    thread: JoinHandle<Sampler<I2C, D, S>>,
}

impl<I2C, D, S, E> Worker<I2C, D, S>
where
    I2C: I2c<Error = E> + Send + 'static,
    D: DelayNs + Send + 'static,
    S: Sink + Send + 'static,
    E: Debug,
{
    /// Register the manual trigger with the sink and start sampling.
    pub fn spawn(sampler: Sampler<I2C, D, S>) -> io::Result<Self> {
        let source = TriggerSource::new(sampler.config().sample_interval);
        let trigger = source.handle();
        sink::lock(sampler.sink()).on_manual_trigger(trigger.clone());
        if sampler.config().sample_on_start {
            trigger.fire();
        }

        let thread = thread::Builder::new()
            .name("sen5x-sampler".into())
            .spawn(move || run(sampler, source))?;
        Ok(Worker { trigger, thread })
    }

    pub fn trigger(&self) -> &TriggerHandle {
        &self.trigger
    }

    /// Stop after the in-flight cycle, if any, and hand the sampler back.
    pub fn shutdown(self) -> thread::Result<Sampler<I2C, D, S>> {
        self.trigger.shutdown();
        self.thread.join()
    }
}

fn run<I2C, D, S, E>(mut sampler: Sampler<I2C, D, S>, source: TriggerSource) -> Sampler<I2C, D, S>
where
    I2C: I2c<Error = E>,
    D: DelayNs,
    S: Sink,
    E: Debug,
{
    info!("sampling every {:?}", source.period());
    loop {
        match source.wait() {
            Trigger::Shutdown => break,
            trigger => {
                debug!("{trigger:?} trigger");
                let outcome = sampler.run_cycle();
                debug!("cycle finished: {outcome:?}");
            }
        }
    }
    info!("sampler stopped");
    sampler
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc::{self, Receiver, Sender};
    use std::sync::{Arc, Mutex};
    use std::time::{Duration, Instant};

    use embedded_hal_mock::eh1::i2c::Mock as I2cMock;

    use super::*;
    use crate::config::SamplerConfig;
    use crate::sampler::tests::{full_cycle, RecordingSink, STAMP};
    use crate::sampler::CycleState;
    use crate::sen5x::Sen5x;
    use crate::sink::SharedSink;

    /// Delay that parks inside the warm-up hold until the test releases it.
    struct GateDelay {
        entered: Sender<()>,
        release: Receiver<()>,
    }

    impl DelayNs for GateDelay {
        fn delay_ns(&mut self, _ns: u32) {}

        fn delay_ms(&mut self, ms: u32) {
            if ms >= 1_000 {
                let _ = self.entered.send(());
                let _ = self.release.recv();
            }
        }
    }

    fn config(sample_on_start: bool) -> SamplerConfig {
        SamplerConfig {
            sample_interval: Duration::from_secs(3600),
            sample_on_start,
            ..SamplerConfig::default()
        }
    }

    fn wait_for_measurements(sink: &SharedSink<RecordingSink>, count: usize) {
        let deadline = Instant::now() + Duration::from_secs(5);
        while sink.lock().unwrap().measurements() < count {
            assert!(Instant::now() < deadline, "timed out waiting for measurement");
            std::thread::sleep(Duration::from_millis(5));
        }
    }

    #[test]
    fn manual_trigger_from_sink_runs_a_cycle() {
        let mock = I2cMock::new(&full_cycle());
        let (entered, _entered_rx) = mpsc::channel();
        let (release_tx, release) = mpsc::channel();
        release_tx.send(()).unwrap();
        let sink = Arc::new(Mutex::new(RecordingSink::default()));
        let sampler = Sampler::new(
            Sen5x::new(mock, GateDelay { entered, release }),
            Arc::clone(&sink),
            config(false),
        )
        .with_timestamp(|| STAMP.to_string());

        let worker = Worker::spawn(sampler).unwrap();
        let handle = sink.lock().unwrap().trigger.clone().unwrap();
        handle.fire();
        wait_for_measurements(&sink, 1);

        let sampler = worker.shutdown().unwrap();
        assert_eq!(sampler.state(), CycleState::Idle);
        let (mut mock, _) = sampler.into_sensor().destroy();
        mock.done();
    }

    #[test]
    fn triggers_during_a_cycle_coalesce_into_one() {
        let mock = I2cMock::new(&[full_cycle(), full_cycle()].concat());
        let (entered, entered_rx) = mpsc::channel();
        let (release_tx, release) = mpsc::channel();
        let sink = Arc::new(Mutex::new(RecordingSink::default()));
        let sampler = Sampler::new(
            Sen5x::new(mock, GateDelay { entered, release }),
            Arc::clone(&sink),
            config(true),
        )
        .with_timestamp(|| STAMP.to_string());

        let worker = Worker::spawn(sampler).unwrap();

        // First cycle is parked in warm-up.
        entered_rx.recv_timeout(Duration::from_secs(5)).unwrap();
        worker.trigger().fire();
        worker.trigger().fire();
        release_tx.send(()).unwrap();
        wait_for_measurements(&sink, 1);

        // Exactly one follow-up cycle.
        entered_rx.recv_timeout(Duration::from_secs(5)).unwrap();
        release_tx.send(()).unwrap();
        wait_for_measurements(&sink, 2);
        assert!(entered_rx.recv_timeout(Duration::from_millis(100)).is_err());
        assert!(!worker.trigger().is_pending());

        let sampler = worker.shutdown().unwrap();
        assert_eq!(sink.lock().unwrap().measurements(), 2);
        let (mut mock, _) = sampler.into_sensor().destroy();
        mock.done();
    }
}
