//! Load generator configuration
//!
//! Configuration is loaded from environment variables:
//!
//! | Variable               | Default                 |
//! |------------------------|-------------------------|
//! | `TARGET_HOST`          | `http://localhost:8080` |
//! | `USERS`                | `1`                     |
//! | `RUN_TIME_SECS`        | unset (until Ctrl-C)    |
//! | `WAIT_MIN_SECS`        | `1`                     |
//! | `WAIT_MAX_SECS`        | `2`                     |
//! | `REQUEST_TIMEOUT_SECS` | `30`                    |

use std::env;
use std::time::Duration;

use crate::error::LoadGenError;
use crate::session::normalize_base_url;
use crate::wait::WaitTime;

/// Main load test configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL every request path is appended to
    pub target_host: String,
    /// Number of concurrent simulated users
    pub users: usize,
    /// Total run time; `None` runs until stopped
    pub run_time: Option<Duration>,
    /// Lower bound of the wait between tasks, in seconds
    pub wait_min_secs: f64,
    /// Upper bound of the wait between tasks, in seconds
    pub wait_max_secs: f64,
    /// Per-request timeout
    pub request_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            target_host: "http://localhost:8080".to_string(),
            users: 1,
            run_time: None,
            wait_min_secs: 1.0,
            wait_max_secs: 2.0,
            request_timeout: Duration::from_secs(30),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    ///
    /// Unparseable values fall back to the defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(host) = lookup("TARGET_HOST")
            && !host.is_empty()
        {
            config.target_host = host;
        }
        if let Some(val) = lookup("USERS")
            && let Ok(users) = val.parse()
        {
            config.users = users;
        }
        if let Some(val) = lookup("RUN_TIME_SECS")
            && let Ok(secs) = val.parse::<u64>()
        {
            config.run_time = (secs > 0).then(|| Duration::from_secs(secs));
        }
        if let Some(val) = lookup("WAIT_MIN_SECS")
            && let Ok(secs) = val.parse()
        {
            config.wait_min_secs = secs;
        }
        if let Some(val) = lookup("WAIT_MAX_SECS")
            && let Ok(secs) = val.parse()
        {
            config.wait_max_secs = secs;
        }
        if let Some(val) = lookup("REQUEST_TIMEOUT_SECS")
            && let Ok(secs) = val.parse::<u64>()
        {
            config.request_timeout = Duration::from_secs(secs);
        }

        config
    }

    /// Wait directive applied between tasks of one user
    pub fn wait_time(&self) -> Result<WaitTime, LoadGenError> {
        WaitTime::between(self.wait_min_secs, self.wait_max_secs)
    }

    /// Reject configurations a run cannot start with
    pub fn validate(&self) -> Result<(), LoadGenError> {
        if self.users == 0 {
            return Err(LoadGenError::NoUsers);
        }
        if self.request_timeout.is_zero() {
            return Err(LoadGenError::ZeroRequestTimeout);
        }
        normalize_base_url(&self.target_host)?;
        self.wait_time()?;
        Ok(())
    }
}
