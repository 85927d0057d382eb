//! Load test driver
//!
//! Starts the configured number of simulated users, lets them run until the
//! run time elapses or a stop is requested, then signals shutdown, joins
//! every user and returns the run summary.

use std::future::Future;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::watch;
use tracing::{Instrument, info, info_span, warn};
use uuid::Uuid;

use crate::config::Config;
use crate::error::LoadGenError;
use crate::session::UserSession;
use crate::stats::{RunStats, RunSummary};
use crate::task::TaskSet;
use crate::user::SimulatedUser;

/// A configured load test
#[derive(Debug)]
pub struct LoadTest {
    config: Config,
    tasks: TaskSet,
}

impl LoadTest {
    /// Load test running the migration scenario
    pub fn new(config: Config) -> Self {
        Self {
            config,
            tasks: TaskSet::migration(),
        }
    }

    /// Replace the task set every user is registered with
    pub fn with_tasks(mut self, tasks: TaskSet) -> Self {
        self.tasks = tasks;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run until the configured run time elapses or Ctrl-C is received
    pub async fn run(&self) -> Result<RunSummary, LoadGenError> {
        self.run_until(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!("Failed to listen for Ctrl-C: {}", e);
                std::future::pending::<()>().await;
            }
        })
        .await
    }

    /// Run until the configured run time elapses or `stop` completes
    pub async fn run_until<F>(&self, stop: F) -> Result<RunSummary, LoadGenError>
    where
        F: Future<Output = ()>,
    {
        self.config.validate()?;
        if self.tasks.is_empty() {
            return Err(LoadGenError::NoTasks);
        }

        let run_id = Uuid::new_v4();
        let span = info_span!("load_test", run_id = %run_id);

        // Build every user before spawning any so setup errors abort cleanly
        let wait = self.config.wait_time()?;
        let users = (0..self.config.users)
            .map(|id| -> Result<SimulatedUser, LoadGenError> {
                let session =
                    UserSession::new(&self.config.target_host, self.config.request_timeout)?;
                SimulatedUser::new(id, session, self.tasks.clone(), wait)
            })
            .collect::<Result<Vec<_>, _>>()?;

        async move {
            info!(
                "Starting {} users against {} (tasks: {:?}, wait {:?}-{:?})",
                users.len(),
                self.config.target_host,
                self.tasks.names(),
                wait.min(),
                wait.max()
            );

            let stats = Arc::new(RunStats::new());
            let (shutdown_tx, shutdown_rx) = watch::channel(false);
            let start = Instant::now();

            let handles: Vec<_> = users
                .into_iter()
                .map(|user| {
                    let user_span = info_span!("user", id = user.id());
                    tokio::spawn(
                        user.run(stats.clone(), shutdown_rx.clone())
                            .instrument(user_span),
                    )
                })
                .collect();
            drop(shutdown_rx);

            let deadline = async {
                match self.config.run_time {
                    Some(run_time) => tokio::time::sleep(run_time).await,
                    None => std::future::pending().await,
                }
            };

            tokio::select! {
                _ = deadline => info!("Run time elapsed, stopping users"),
                _ = stop => info!("Stop requested, stopping users"),
            }

            let _ = shutdown_tx.send(true);
            for handle in handles {
                if let Err(e) = handle.await {
                    warn!("User task failed: {}", e);
                }
            }

            Ok(stats.snapshot(run_id, self.config.users, start.elapsed()))
        }
        .instrument(span)
        .await
    }
}
