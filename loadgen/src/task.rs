//! Tasks and explicit task registration
//!
//! A task is one unit of work a simulated user repeats. Users receive their
//! tasks through a `TaskSet` built when the user is constructed.

use async_trait::async_trait;
use rand::Rng;
use rand::seq::IndexedRandom;
use reqwest::StatusCode;
use std::sync::Arc;

use crate::error::{LoadGenError, TaskError};
use crate::payload::MigrationRequest;
use crate::session::UserSession;

/// Path of the migration endpoint
pub const MIGRATION_PATH: &str = "/api/migration";

/// A unit of work executed by a simulated user
#[async_trait]
pub trait Task: Send + Sync {
    /// Name used in logs
    fn name(&self) -> &'static str;

    /// Execute once. The response status is returned uninspected.
    async fn run(&self, session: &UserSession) -> Result<StatusCode, TaskError>;
}

/// Submit the CSV-to-CSV migration request once
pub async fn run_migration_task(session: &UserSession) -> Result<StatusCode, TaskError> {
    let body = MigrationRequest::csv_to_csv().to_json()?;
    let response = session.post_json(MIGRATION_PATH, body).await?;
    Ok(response.status())
}

/// `POST /api/migration` with the fixed payload
#[derive(Debug, Clone, Copy, Default)]
pub struct MigrationTask;

#[async_trait]
impl Task for MigrationTask {
    fn name(&self) -> &'static str {
        "run_migration"
    }

    async fn run(&self, session: &UserSession) -> Result<StatusCode, TaskError> {
        run_migration_task(session).await
    }
}

#[derive(Clone)]
struct WeightedTask {
    task: Arc<dyn Task>,
    weight: u32,
}

/// Weighted set of tasks a user chooses from on each iteration
#[derive(Clone, Default)]
pub struct TaskSet {
    tasks: Vec<WeightedTask>,
}

impl TaskSet {
    pub fn new() -> Self {
        Self { tasks: Vec::new() }
    }

    /// Task set for the migration scenario
    pub fn migration() -> Self {
        let mut set = Self::new();
        set.tasks.push(WeightedTask {
            task: Arc::new(MigrationTask),
            weight: 1,
        });
        set
    }

    /// Register `task`, picked with probability proportional to `weight`
    pub fn register(
        &mut self,
        task: Arc<dyn Task>,
        weight: u32,
    ) -> Result<&mut Self, LoadGenError> {
        if weight == 0 {
            return Err(LoadGenError::ZeroWeight(task.name()));
        }
        self.total_weight()
            .checked_add(weight)
            .ok_or(LoadGenError::WeightOverflow(task.name()))?;
        self.tasks.push(WeightedTask { task, weight });
        Ok(self)
    }

    /// Sum of all registered weights
    pub fn total_weight(&self) -> u32 {
        self.tasks.iter().map(|t| t.weight).sum()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Registered task names in registration order
    pub fn names(&self) -> Vec<&'static str> {
        self.tasks.iter().map(|t| t.task.name()).collect()
    }

    /// Choose the next task to run
    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<Arc<dyn Task>> {
        if self.tasks.len() == 1 {
            return Some(self.tasks[0].task.clone());
        }
        self.tasks
            .choose_weighted(rng, |t| t.weight)
            .ok()
            .map(|t| t.task.clone())
    }
}

impl std::fmt::Debug for TaskSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskSet")
            .field("tasks", &self.names())
            .finish()
    }
}
