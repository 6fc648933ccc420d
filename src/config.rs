//! Report configuration read once from the process environment.

use std::env;
use std::time::Duration;

use jira_api::{BasicCredentials, JiraConfig};
use thiserror::Error;

use crate::duration::{WorkCalendar, SECONDS_PER_HOUR};

/// Default number of worklog requests in flight at once.
fn default_fetch_concurrency() -> usize {
    8
}

/// Default per-request timeout in seconds.
fn default_request_timeout_secs() -> u64 {
    30
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("environment variable {0} is not set")]
    Missing(&'static str),
    #[error("environment variable {var}={value:?} is invalid: {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Immutable settings for one report run.
#[derive(Clone, Debug)]
pub struct ReportConfig {
    pub endpoint: String,
    pub credentials: BasicCredentials,
    pub project_id: String,
    pub sprint_overhead_hours: f64,
    pub fetch_concurrency: usize,
    pub request_timeout: Duration,
    calendar: WorkCalendar,
}

impl ReportConfig {
    /// Loads `.env` (without overriding variables already set) and reads the environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        if let Ok(path) = dotenvy::dotenv() {
            log::debug!("Loaded environment overrides from {}", path.display());
        }
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |var: &'static str| -> Result<String, ConfigError> {
            lookup(var)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
                .ok_or(ConfigError::Missing(var))
        };
        let optional = |var: &'static str| -> Option<String> {
            lookup(var)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let endpoint = required("ENDPOINT")?;
        if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
            return Err(invalid("ENDPOINT", &endpoint, "expected an http(s) URL"));
        }
        let credentials = BasicCredentials::new(required("USERNAME")?, required("API_KEY")?);
        let project_id = required("PROJECT_ID")?;

        let hours_value = required("HOURS_PER_DAY")?;
        let hours_per_day = parse_hours("HOURS_PER_DAY", &hours_value)?;
        if hours_per_day <= 0.0 {
            return Err(invalid("HOURS_PER_DAY", &hours_value, "must be positive"));
        }
        let days_per_week = parse_positive::<u32>("DAYS_PER_WEEK", &required("DAYS_PER_WEEK")?)?;
        let calendar = WorkCalendar::new(hours_per_day, days_per_week).ok_or_else(|| {
            invalid(
                "HOURS_PER_DAY",
                &hours_value,
                format!("a {days_per_week}-day week must be between one second per day and i64::MAX seconds"),
            )
        })?;
        let sprint_overhead_hours = match optional("SPRINT_OVERHEAD") {
            Some(value) => parse_hours("SPRINT_OVERHEAD", &value)?,
            None => 0.0,
        };
        let fetch_concurrency = match optional("FETCH_CONCURRENCY") {
            Some(value) => parse_positive::<usize>("FETCH_CONCURRENCY", &value)?,
            None => default_fetch_concurrency(),
        };
        let request_timeout_secs = match optional("REQUEST_TIMEOUT_SECS") {
            Some(value) => parse_positive::<u64>("REQUEST_TIMEOUT_SECS", &value)?,
            None => default_request_timeout_secs(),
        };

        Ok(Self {
            endpoint,
            credentials,
            project_id,
            sprint_overhead_hours,
            fetch_concurrency,
            request_timeout: Duration::from_secs(request_timeout_secs),
            calendar,
        })
    }

    /// Client settings for the Jira REST API under `ENDPOINT`.
    pub fn jira_config(&self) -> JiraConfig {
        JiraConfig::new(self.endpoint.clone(), self.credentials.clone())
            .with_timeout(self.request_timeout)
            .with_user_agent(concat!("weeklog/", env!("CARGO_PKG_VERSION")))
    }

    pub fn calendar(&self) -> WorkCalendar {
        self.calendar
    }

    /// Weekly capacity: hours per day times days per week.
    pub fn capacity_seconds(&self) -> i64 {
        self.calendar.seconds_per_week()
    }

    /// Weekly capacity minus the sprint overhead.
    pub fn capacity_with_overhead_seconds(&self) -> i64 {
        self.capacity_seconds()
            .saturating_sub(hours_to_seconds(self.sprint_overhead_hours))
    }

    /// JQL selecting every issue of the configured project.
    pub fn project_jql(&self) -> String {
        format!("project={}", self.project_id)
    }
}

// `as` saturates, so huge overheads clamp to i64::MAX.
fn hours_to_seconds(hours: f64) -> i64 {
    (hours * SECONDS_PER_HOUR as f64).round() as i64
}

fn invalid(var: &'static str, value: &str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        var,
        value: value.to_string(),
        reason: reason.into(),
    }
}

fn parse_hours(var: &'static str, value: &str) -> Result<f64, ConfigError> {
    let hours = value
        .parse::<f64>()
        .map_err(|err| invalid(var, value, err.to_string()))?;
    if !hours.is_finite() || hours < 0.0 {
        return Err(invalid(var, value, "expected a non-negative number of hours"));
    }
    Ok(hours)
}

fn parse_positive<T>(var: &'static str, value: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr + PartialOrd + Default,
    T::Err: std::fmt::Display,
{
    let parsed = value
        .parse::<T>()
        .map_err(|err| invalid(var, value, err.to_string()))?;
    if parsed <= T::default() {
        return Err(invalid(var, value, "must be greater than zero"));
    }
    Ok(parsed)
}
