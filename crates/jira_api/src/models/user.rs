//! User models returned by Jira identity endpoints.

use serde::Deserialize;

/// The authenticated account as returned by `GET /myself`.
#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub account_id: String,
    pub display_name: Option<String>,
    pub email_address: Option<String>,
}

impl User {
    /// Best human-readable label for log lines.
    pub fn label(&self) -> &str {
        self.display_name
            .as_deref()
            .or(self.email_address.as_deref())
            .unwrap_or(&self.account_id)
    }
}
