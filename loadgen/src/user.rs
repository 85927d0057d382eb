//! Simulated user loop
//!
//! A user runs its tasks strictly one after another: pick a task, execute
//! it, record the outcome, sleep for a sampled wait, repeat. It stops as
//! soon as the shutdown signal flips, dropping any in-flight request or
//! pending wait.

use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::error::LoadGenError;
use crate::session::UserSession;
use crate::stats::RunStats;
use crate::task::TaskSet;
use crate::wait::WaitTime;

/// One virtual client of the load test
#[derive(Debug)]
pub struct SimulatedUser {
    id: usize,
    session: UserSession,
    tasks: TaskSet,
    wait: WaitTime,
}

impl SimulatedUser {
    pub fn new(
        id: usize,
        session: UserSession,
        tasks: TaskSet,
        wait: WaitTime,
    ) -> Result<Self, LoadGenError> {
        if tasks.is_empty() {
            return Err(LoadGenError::NoTasks);
        }
        Ok(Self {
            id,
            session,
            tasks,
            wait,
        })
    }

    pub fn id(&self) -> usize {
        self.id
    }

    /// Run until `shutdown` becomes true or its sender is dropped.
    ///
    /// Returns the number of completed task invocations.
    pub async fn run(self, stats: Arc<RunStats>, mut shutdown: watch::Receiver<bool>) -> u64 {
        debug!(user = self.id, "User started");
        let mut iterations = 0u64;

        loop {
            if *shutdown.borrow() {
                break;
            }

            let task = {
                let mut rng = rand::rng();
                self.tasks.pick(&mut rng)
            };
            let Some(task) = task else {
                warn!(
                    user = self.id,
                    tasks = ?self.tasks.names(),
                    "No task could be picked, stopping user"
                );
                break;
            };

            let outcome = tokio::select! {
                outcome = task.run(&self.session) => outcome,
                _ = shutdown.changed() => break,
            };

            match &outcome {
                Ok(status) => {
                    debug!(user = self.id, task = task.name(), status = %status, "Task completed");
                }
                Err(e) => {
                    debug!(user = self.id, task = task.name(), "Task failed: {}", e);
                }
            }
            stats.record(&outcome);
            iterations += 1;

            let delay = {
                let mut rng = rand::rng();
                self.wait.sample(&mut rng)
            };
            tokio::select! {
                _ = tokio::time::sleep(delay) => {}
                _ = shutdown.changed() => break,
            }
        }

        debug!(user = self.id, iterations, "User stopped");
        iterations
    }
}
