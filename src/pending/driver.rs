//! Background driver for released computations.
//!
//! A computation keeps running after its last handle is dropped. The cell is
//! handed to this driver, which polls it on a dedicated thread once per wakeup
//! until it settles. Wakeups arriving while a released cell is being polled
//! queue another poll, so none are lost.
//!
//! The thread is started on first use. If it cannot be spawned, released cells
//! are polled inline by whoever wakes them.

use crate::tracing_compat::{debug, warn};
use parking_lot::{Condvar, Mutex};
use std::collections::VecDeque;
use std::sync::{Arc, OnceLock};
use std::thread;

/// A released computation the driver can poll.
pub(crate) trait Detached: Send + Sync {
    /// Polls the computation once.
    fn run(&self);
}

/// Queued unit of work.
pub(crate) type Task = Arc<dyn Detached>;

struct Driver {
    queue: Mutex<VecDeque<Task>>,
    ready: Condvar,
    running: OnceLock<bool>,
}

static DRIVER: Driver = Driver {
    queue: Mutex::new(VecDeque::new()),
    ready: Condvar::new(),
    running: OnceLock::new(),
};

impl Driver {
    fn running(&'static self) -> bool {
        *self.running.get_or_init(|| {
            let spawned = thread::Builder::new()
                .name("asum-driver".to_string())
                .spawn(|| DRIVER.serve());
            match spawned {
                Ok(_) => {
                    debug!("released computation driver started");
                    true
                }
                Err(err) => {
                    warn!(error = %err, "driver thread unavailable, polling released computations inline");
                    drop(err);
                    false
                }
            }
        })
    }

    fn push(&self, task: Task) {
        self.queue.lock().push_back(task);
        self.ready.notify_one();
    }

    fn serve(&self) {
        loop {
            let task = {
                let mut queue = self.queue.lock();
                loop {
                    if let Some(task) = queue.pop_front() {
                        break task;
                    }
                    self.ready.wait(&mut queue);
                }
            };
            task.run();
        }
    }
}

/// Queues one poll of `task` on the driver thread.
pub(crate) fn schedule(task: Task) {
    if DRIVER.running() {
        DRIVER.push(task);
    } else {
        task.run();
    }
}
