//! Typed Jira Cloud REST client used by the weekly worklog report.

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod models;

pub use auth::BasicCredentials;
pub use client::{JiraClient, WorklogQuery};
pub use config::JiraConfig;
pub use error::{JiraError, Result};
pub use models::{Issue, SearchResults, User, Worklog, WorklogAuthor, WorklogPage};
