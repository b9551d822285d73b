//! Deferred task scheduling for the full-circle settle transition.
//!
//! The partition store owns one `Scheduler` and hands it a one-shot task
//! whenever a lone sector reaches 100%. Scheduled tasks are never cancelled:
//! once handed over, a task runs after its delay no matter what happened to
//! the store in between.

use crate::errors::{Error, Result};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;
use tokio::runtime::Handle;

/// A one-shot piece of work to run after a delay.
pub type DeferredTask = Box<dyn FnOnce() + Send + 'static>;

/// Runs tasks after a delay without blocking the caller.
pub trait Scheduler: Send + Sync {
    /// Queues `task` to run once `delay` has elapsed.
    fn schedule(&self, delay: Duration, task: DeferredTask);
}

/// Spawns deferred tasks onto a tokio runtime.
#[derive(Debug, Clone)]
pub struct TokioScheduler {
    handle: Handle,
}

impl TokioScheduler {
    /// Scheduler spawning onto `handle`.
    #[must_use]
    pub const fn new(handle: Handle) -> Self {
        Self { handle }
    }

    /// Captures the runtime the caller is currently running on.
    pub fn current() -> Result<Self> {
        Handle::try_current()
            .map(Self::new)
            .map_err(|e| Error::Runtime {
                message: format!("settle scheduler needs a tokio runtime: {e}"),
            })
    }
}

impl Scheduler for TokioScheduler {
    fn schedule(&self, delay: Duration, task: DeferredTask) {
        self.handle.spawn(async move {
            tokio::time::sleep(delay).await;
            task();
        });
    }
}

struct PendingTask {
    due: Duration,
    seq: u64,
    task: DeferredTask,
}

#[derive(Default)]
struct ManualQueue {
    now: Duration,
    next_seq: u64,
    tasks: Vec<PendingTask>,
}

/// Scheduler driven by an explicit virtual clock.
///
/// Nothing runs until the host calls [`ManualScheduler::advance`], which
/// makes it suitable for synchronous event loops and for tests.
#[derive(Default)]
pub struct ManualScheduler {
    queue: Mutex<ManualQueue>,
}

impl ManualScheduler {
    /// Scheduler with its clock at zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of tasks still waiting for their due time.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.queue
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .tasks
            .len()
    }

    /// Moves the clock forward and runs every task that became due, earliest
    /// first. Returns how many tasks ran.
    pub fn advance(&self, by: Duration) -> usize {
        let mut due = {
            let mut queue = self.queue.lock().unwrap_or_else(PoisonError::into_inner);
            queue.now += by;
            let now = queue.now;
            let (ready, waiting): (Vec<_>, Vec<_>) =
                queue.tasks.drain(..).partition(|pending| pending.due <= now);
            queue.tasks = waiting;
            ready
        };
        due.sort_by_key(|pending| (pending.due, pending.seq));

        // Lock is released here so tasks may schedule follow-ups.
        let count = due.len();
        for pending in due {
            (pending.task)();
        }
        count
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&self, delay: Duration, task: DeferredTask) {
        let mut queue = self.queue.lock().unwrap_or_else(PoisonError::into_inner);
        let seq = queue.next_seq;
        queue.next_seq += 1;
        let due = queue.now + delay;
        queue.tasks.push(PendingTask { due, seq, task });
    }
}
