//! Worklog aggregation and console rendering of the weekly summary.

use std::io::{self, Write};

use chrono::{NaiveDate, TimeZone};
use colored::Colorize;
use jira_api::{Issue, Worklog};
use log::warn;

use crate::config::ReportConfig;
use crate::duration::{Breakdown, WorkCalendar};
use crate::window::ReportWindow;

/// One worklog line under an issue header.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoggedEntry {
    pub date: NaiveDate,
    pub time_spent: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IssueSection {
    pub key: String,
    pub entries: Vec<LoggedEntry>,
}

/// Issues with the current user's work in the window, plus the running total.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WeekReport {
    pub sections: Vec<IssueSection>,
    pub total_seconds: i64,
}

/// Keeps worklogs written by `account_id` that started inside `window` and sums them.
///
/// Sections follow the order of `issues`; entries keep the order the API returned.
/// Issues without a matching entry get no section.
pub fn aggregate<Tz, I>(account_id: &str, window: &ReportWindow<Tz>, issues: I) -> WeekReport
where
    Tz: TimeZone,
    I: IntoIterator<Item = (Issue, Vec<Worklog>)>,
{
    let mut report = WeekReport::default();

    for (issue, worklogs) in issues {
        let mut entries = Vec::new();
        for worklog in worklogs {
            if !worklog.is_authored_by(account_id) {
                continue;
            }
            let Some(started) = worklog.started_at() else {
                warn!(
                    "Skipping worklog on {} with unreadable start {:?}",
                    issue.key, worklog.started
                );
                continue;
            };
            if !window.contains(&started) {
                warn!(
                    "Skipping worklog on {} started outside the week at {}",
                    issue.key, worklog.started
                );
                continue;
            }

            report.total_seconds = report.total_seconds.saturating_add(worklog.time_spent_seconds);
            entries.push(LoggedEntry {
                date: window.local_date(&started),
                time_spent: worklog.time_spent.clone().unwrap_or_else(|| {
                    WorkCalendar::NATURAL
                        .breakdown(worklog.time_spent_seconds)
                        .to_string()
                }),
            });
        }

        if !entries.is_empty() {
            report.sections.push(IssueSection {
                key: issue.key,
                entries,
            });
        }
    }

    report
}

/// The four closing figures of the report.
#[derive(Clone, Debug, PartialEq)]
pub struct Summary {
    pub working_days: Breakdown,
    pub actual: Breakdown,
    pub time_left: Breakdown,
    pub time_left_with_overhead: Breakdown,
    pub sprint_overhead_hours: f64,
}

impl Summary {
    pub fn new(total_seconds: i64, config: &ReportConfig) -> Self {
        let natural = WorkCalendar::NATURAL;
        Self {
            working_days: config.calendar().breakdown(total_seconds),
            actual: natural.breakdown(total_seconds),
            time_left: natural.breakdown(config.capacity_seconds().saturating_sub(total_seconds)),
            time_left_with_overhead: natural
                .breakdown(config.capacity_with_overhead_seconds().saturating_sub(total_seconds)),
            sprint_overhead_hours: config.sprint_overhead_hours,
        }
    }
}

pub fn render<W: Write>(report: &WeekReport, summary: &Summary, out: &mut W) -> io::Result<()> {
    writeln!(out, "{}", "Tasks with work logged this week".underline())?;
    for section in &report.sections {
        writeln!(out, "{}", section.key.bold())?;
        for entry in &section.entries {
            writeln!(
                out,
                "  {} {}",
                entry.date.format("%Y-%m-%d").to_string().red(),
                entry.time_spent
            )?;
        }
    }

    writeln!(out, "{} {}", "Working days:".bold(), summary.working_days)?;
    writeln!(out, "{} {}", "Actual time:".bold(), summary.actual)?;
    writeln!(out, "{} {}", "Time left:".bold(), summary.time_left)?;
    let overhead_label = format!(
        "Time left (including sprint overhead of {}h):",
        summary.sprint_overhead_hours
    );
    writeln!(out, "{} {}", overhead_label.bold(), summary.time_left_with_overhead)?;
    Ok(())
}
