use chrono::{DateTime, FixedOffset};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct WorklogAuthor {
    pub account_id: Option<String>,
    pub display_name: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Worklog {
    #[serde(default)]
    pub author: Option<WorklogAuthor>,
    pub started: String,
    #[serde(default)]
    pub time_spent: Option<String>,
    pub time_spent_seconds: i64,
}

impl Worklog {
    pub fn author_account_id(&self) -> Option<&str> {
        self.author
            .as_ref()
            .and_then(|author| author.account_id.as_deref())
    }

    pub fn is_authored_by(&self, account_id: &str) -> bool {
        self.author_account_id() == Some(account_id)
    }

    /// Parses `started`; Jira sends `2024-05-15T09:00:00.000+0000`, which is not RFC 3339.
    pub fn started_at(&self) -> Option<DateTime<FixedOffset>> {
        let value = self.started.trim();
        DateTime::parse_from_rfc3339(value)
            .ok()
            .or_else(|| DateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f%z").ok())
    }
}

/// Response of `GET /issue/{key}/worklog`.
#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct WorklogPage {
    #[serde(default)]
    pub worklogs: Vec<Worklog>,
    #[serde(default)]
    pub total: Option<u64>,
}
