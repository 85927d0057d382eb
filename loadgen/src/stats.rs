//! Run counters and end-of-run summary

use reqwest::StatusCode;
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tracing::info;
use uuid::Uuid;

use crate::error::TaskError;

/// Counters shared by every user of a run
#[derive(Debug, Default)]
pub struct RunStats {
    requests: AtomicU64,
    successes: AtomicU64,
    failures: AtomicU64,
    transport_errors: AtomicU64,
}

impl RunStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Classify one task outcome
    pub fn record(&self, outcome: &Result<StatusCode, TaskError>) {
        self.requests.fetch_add(1, Ordering::Relaxed);
        match outcome {
            Ok(status) if status.is_success() => {
                self.successes.fetch_add(1, Ordering::Relaxed);
            }
            Ok(_) => {
                self.failures.fetch_add(1, Ordering::Relaxed);
            }
            Err(_) => {
                self.transport_errors.fetch_add(1, Ordering::Relaxed);
            }
        }
    }

    pub fn requests(&self) -> u64 {
        self.requests.load(Ordering::Relaxed)
    }

    pub fn snapshot(&self, run_id: Uuid, users: usize, elapsed: Duration) -> RunSummary {
        let requests = self.requests();
        let elapsed_secs = elapsed.as_secs_f64();
        let throughput = if elapsed_secs > 0.0 {
            requests as f64 / elapsed_secs
        } else {
            0.0
        };

        RunSummary {
            run_id,
            users,
            requests,
            successes: self.successes.load(Ordering::Relaxed),
            failures: self.failures.load(Ordering::Relaxed),
            transport_errors: self.transport_errors.load(Ordering::Relaxed),
            elapsed_secs,
            throughput,
        }
    }
}

/// Final counters of a run
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub run_id: Uuid,
    pub users: usize,
    /// Task invocations that completed (with or without a response)
    pub requests: u64,
    /// 2xx responses
    pub successes: u64,
    /// Non-2xx responses
    pub failures: u64,
    /// Requests that never produced a response
    pub transport_errors: u64,
    pub elapsed_secs: f64,
    /// Requests per second
    pub throughput: f64,
}

impl RunSummary {
    /// Fraction of requests that did not get a 2xx (0.0 to 1.0)
    pub fn error_rate(&self) -> f64 {
        if self.requests == 0 {
            return 0.0;
        }
        (self.failures + self.transport_errors) as f64 / self.requests as f64
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    pub fn log(&self) {
        info!(
            run_id = %self.run_id,
            users = self.users,
            requests = self.requests,
            successes = self.successes,
            failures = self.failures,
            transport_errors = self.transport_errors,
            "Run finished in {:.1}s ({:.2} req/s, {:.2}% errors)",
            self.elapsed_secs,
            self.throughput,
            self.error_rate() * 100.0
        );
    }
}
