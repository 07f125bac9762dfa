//! Merged periodic/manual trigger.
//!
//! A manual request is a single flag, not a queue: any number of requests
//! made before the worker next waits collapse into one cycle.

use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use log::debug;

/// Why [`TriggerSource::wait`] returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// The sample interval elapsed.
    Periodic,
    /// A manual request was pending.
    Manual,
    /// The worker should exit.
    Shutdown,
}

#[derive(Default)]
struct Flags {
    pending: bool,
    shutdown: bool,
}

#[derive(Default)]
struct Shared {
    flags: Mutex<Flags>,
    cond: Condvar,
}

impl Shared {
    fn flags(&self) -> MutexGuard<'_, Flags> {
        self.flags.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Waiting side, owned by the sampling worker.
pub struct TriggerSource {
    shared: Arc<Shared>,
    period: Duration,
}

/// Cloneable requesting side, handed to the UI.
#[derive(Clone)]
pub struct TriggerHandle {
    shared: Arc<Shared>,
}

impl TriggerSource {
    pub fn new(period: Duration) -> Self {
        TriggerSource {
            shared: Arc::default(),
            period,
        }
    }

    pub fn handle(&self) -> TriggerHandle {
        TriggerHandle {
            shared: Arc::clone(&self.shared),
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Block until a manual request, the end of the sample interval, or
    /// shutdown. A pending request is consumed.
    ///
    /// A period too long to represent as an [`Instant`] never elapses.
    pub fn wait(&self) -> Trigger {
        let deadline = Instant::now().checked_add(self.period);
        let mut flags = self.shared.flags();
        loop {
            if flags.shutdown {
                return Trigger::Shutdown;
            }
            if flags.pending {
                flags.pending = false;
                return Trigger::Manual;
            }
            flags = match deadline {
                Some(deadline) => {
                    let now = Instant::now();
                    if now >= deadline {
                        return Trigger::Periodic;
                    }
                    self.shared
                        .cond
                        .wait_timeout(flags, deadline - now)
                        .unwrap_or_else(PoisonError::into_inner)
                        .0
                }
                None => self
                    .shared
                    .cond
                    .wait(flags)
                    .unwrap_or_else(PoisonError::into_inner),
            };
        }
    }
}

impl TriggerHandle {
    /// Request a cycle. Has no further effect while a request is pending.
    pub fn fire(&self) {
        let mut flags = self.shared.flags();
        if flags.pending {
            debug!("manual trigger already pending, coalesced");
            return;
        }
        flags.pending = true;
        self.shared.cond.notify_one();
    }

    /// Ask the worker to exit once its current cycle, if any, finishes.
    pub fn shutdown(&self) {
        self.shared.flags().shutdown = true;
        self.shared.cond.notify_all();
    }

    pub fn is_pending(&self) -> bool {
        self.shared.flags().pending
    }
}
