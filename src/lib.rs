//! Weekly Jira worklog report: what the current user logged this week and what is left.

use std::io;

use chrono::{Local, TimeZone};
use futures::stream::{self, StreamExt, TryStreamExt};
use jira_api::client::MAX_SEARCH_RESULTS;
use jira_api::{Issue, JiraClient, JiraError, Worklog, WorklogQuery};
use log::{debug, info, warn};
use thiserror::Error;

pub mod config;
pub mod duration;
pub mod report;
pub mod window;

use config::{ConfigError, ReportConfig};
use report::{aggregate, render, Summary, WeekReport};
use window::{ReportWindow, WindowError};

/// Only issue keys are needed from the search.
const SEARCH_FIELDS: &str = "id";

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("jira: {0}")]
    Api(#[from] JiraError),
    #[error("week window: {0}")]
    Window(#[from] WindowError),
    #[error("writing report: {0}")]
    Io(#[from] io::Error),
}

/// Loads configuration, fetches this week's worklogs and prints the report to stdout.
pub async fn run() -> Result<(), ReportError> {
    let config = ReportConfig::from_env()?;
    let client = JiraClient::new(config.jira_config())?;
    let window = ReportWindow::current_week(&Local::now())?;
    debug!("Report window {} .. {}", window.start, window.end);

    let report = collect_week(&client, &config, &window).await?;
    let summary = Summary::new(report.total_seconds, &config);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    render(&report, &summary, &mut out)?;
    Ok(())
}

/// Resolves the current user, lists the project's issues and aggregates their worklogs in `window`.
///
/// The first failing request aborts the whole collection.
pub async fn collect_week<Tz: TimeZone>(
    client: &JiraClient,
    config: &ReportConfig,
    window: &ReportWindow<Tz>,
) -> Result<WeekReport, ReportError> {
    let myself = client.get_myself().await?;
    info!("Collecting worklogs of {}", myself.label());

    let results = client
        .search_issues(&config.project_jql(), MAX_SEARCH_RESULTS, SEARCH_FIELDS)
        .await?;
    if results.is_truncated() {
        warn!(
            "Project {} has {} issues, only the first {} are included",
            config.project_id,
            results.total.unwrap_or_default(),
            results.issues.len()
        );
    }
    info!("Fetching worklogs for {} issues", results.issues.len());

    let query = WorklogQuery::between(window.start_millis(), window.end_millis());
    let fetched = fetch_worklogs(client, results.issues, query, config.fetch_concurrency).await?;
    Ok(aggregate(&myself.account_id, window, fetched))
}

/// Fetches worklogs for every issue with at most `concurrency` requests in flight.
///
/// Results keep the order of `issues`. On the first error the remaining requests are dropped.
async fn fetch_worklogs(
    client: &JiraClient,
    issues: Vec<Issue>,
    query: WorklogQuery,
    concurrency: usize,
) -> Result<Vec<(Issue, Vec<Worklog>)>, JiraError> {
    stream::iter(issues)
        .map(|issue| async move {
            let page = client.get_issue_worklogs(&issue.key, query).await?;
            debug!("{}: {} worklogs in window", issue.key, page.worklogs.len());
            Ok::<_, JiraError>((issue, page.worklogs))
        })
        .buffered(concurrency.max(1))
        .try_collect()
        .await
}
