//! Abortable background work: a single-occupancy task slot and a debouncer
//! built on it.

use std::future::Future;
use std::time::Duration;

use tokio::task::JoinHandle;

/// Holds at most one spawned task. Replacing or dropping the slot aborts the
/// occupant, which also drops any HTTP request it was awaiting.
#[derive(Debug, Default)]
pub struct TaskSlot {
    handle: Option<JoinHandle<()>>,
}

impl TaskSlot {
    /// Spawns `work`, aborting whatever occupied the slot before.
    pub fn replace<F>(&mut self, work: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.abort();
        self.handle = Some(tokio::spawn(work));
    }

    /// Aborts the occupant. Returns `true` if it had not yet finished.
    pub fn abort(&mut self) -> bool {
        match self.handle.take() {
            Some(handle) => {
                let running = !handle.is_finished();
                handle.abort();
                running
            }
            None => false,
        }
    }
}

impl Drop for TaskSlot {
    fn drop(&mut self) {
        self.abort();
    }
}

/// Runs work only after a quiet period with no newer request.
///
/// Each [`Debouncer::schedule`] restarts the timer and aborts the previously
/// scheduled work, whether it is still waiting or already running.
#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    slot: TaskSlot,
}

impl Debouncer {
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            slot: TaskSlot::default(),
        }
    }

    pub fn schedule<F>(&mut self, work: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let delay = self.delay;
        self.slot.replace(async move {
            tokio::time::sleep(delay).await;
            work.await;
        });
    }

    /// Cancels scheduled or running work. Returns `true` if anything was stopped.
    pub fn cancel(&mut self) -> bool {
        self.slot.abort()
    }
}
