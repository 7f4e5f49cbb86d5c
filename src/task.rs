//! Run container workloads on a worker thread.
//!
//! [`spawn`] moves a closure onto a new thread and returns a [`Pending`]
//! handle. Whatever happens on the worker, exactly one outcome is delivered
//! through a one-slot channel: the closure's result, the [`StorageError`] it
//! returned, or the message of a panic raised while constructing values.

use std::any::Any;
use std::fmt;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender};

use crate::error::StorageError;

/// The reason a worker did not produce a result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Failure {
    /// The workload returned a storage error.
    Storage(StorageError),
    /// The workload panicked, typically from a value's constructor.
    Construction(String),
    /// The worker thread could not be started.
    Spawn(String),
    /// The worker exited without delivering an outcome.
    Disconnected,
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Storage(err) => write!(f, "Storage failure: {}", err),
            Self::Construction(msg) => write!(f, "Construction failure: {}", msg),
            Self::Spawn(msg) => write!(f, "Worker spawn failure: {}", msg),
            Self::Disconnected => f.write_str("Worker disconnected"),
        }
    }
}

impl std::error::Error for Failure {}

impl From<StorageError> for Failure {
    fn from(err: StorageError) -> Self {
        Self::Storage(err)
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(msg) = payload.downcast_ref::<&'static str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}

/// The outcome of a workload started by [`spawn`].
#[derive(Debug)]
pub struct Pending<R> {
    reply: Receiver<Result<R, Failure>>,
    handle: Option<JoinHandle<()>>,
}

impl<R> Pending<R> {
    /// Block until the worker delivers its outcome.
    pub fn wait(mut self) -> Result<R, Failure> {
        let outcome = match self.reply.recv() {
            Ok(outcome) => outcome,
            Err(_) => Err(Failure::Disconnected),
        };
        self.join();
        outcome
    }

    /// Wait up to `timeout` for the outcome, handing back the pending
    /// handle if it has not arrived.
    pub fn wait_timeout(mut self, timeout: Duration) -> Result<Result<R, Failure>, Self> {
        match self.reply.recv_timeout(timeout) {
            Ok(outcome) => {
                self.join();
                Ok(outcome)
            }
            Err(RecvTimeoutError::Timeout) => Err(self),
            Err(RecvTimeoutError::Disconnected) => {
                self.join();
                Ok(Err(Failure::Disconnected))
            }
        }
    }

    fn join(&mut self) {
        if let Some(handle) = self.handle.take() {
            // panics are caught on the worker, so joining cannot fail
            let _ = handle.join();
        }
    }
}

fn run<R, F>(work: F, reply: Sender<Result<R, Failure>>)
where
    F: FnOnce() -> Result<R, StorageError>,
{
    let outcome = match catch_unwind(AssertUnwindSafe(work)) {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(err)) => Err(Failure::Storage(err)),
        Err(payload) => Err(Failure::Construction(panic_message(payload))),
    };
    // the receiver may have been dropped; the outcome is then discarded
    let _ = reply.send(outcome);
}

/// Run `work` on a new thread, delivering its outcome to the returned handle.
pub fn spawn<R, F>(work: F) -> Pending<R>
where
    R: Send + 'static,
    F: FnOnce() -> Result<R, StorageError> + Send + 'static,
{
    let (reply_tx, reply_rx) = crossbeam_channel::bounded(1);
    let worker_tx = reply_tx.clone();
    let handle = match thread::Builder::new()
        .name("guarded-vec-task".to_string())
        .spawn(move || run(work, worker_tx))
    {
        Ok(handle) => Some(handle),
        Err(err) => {
            let _ = reply_tx.send(Err(Failure::Spawn(err.to_string())));
            None
        }
    };
    Pending {
        reply: reply_rx,
        handle,
    }
}
