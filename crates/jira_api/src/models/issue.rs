use serde::Deserialize;

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    pub key: String,
    #[serde(default)]
    pub id: Option<String>,
}

/// One page of `GET /search` results.
#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SearchResults {
    #[serde(default)]
    pub issues: Vec<Issue>,
    #[serde(default)]
    pub total: Option<u64>,
}

impl SearchResults {
    /// True when the server reports more matches than this page carries.
    pub fn is_truncated(&self) -> bool {
        self.total
            .map(|total| total > self.issues.len() as u64)
            .unwrap_or(false)
    }
}
