use std::time::Duration;

use crate::auth::BasicCredentials;

pub const DEFAULT_API_PATH: &str = "rest/api/3";
pub const DEFAULT_USER_AGENT: &str = "weeklog";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Clone, Debug)]
pub struct JiraConfig {
    pub base_url: String,
    pub api_path: String,
    pub credentials: BasicCredentials,
    pub user_agent: String,
    pub timeout: Duration,
    pub connect_timeout: Duration,
}

impl JiraConfig {
    pub fn new(base_url: impl Into<String>, credentials: BasicCredentials) -> Self {
        Self {
            base_url: base_url.into(),
            api_path: DEFAULT_API_PATH.to_string(),
            credentials,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
        }
    }

    pub fn with_user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = ua.into();
        self
    }

    pub fn with_timeout(mut self, duration: Duration) -> Self {
        self.timeout = duration;
        self
    }

    /// Base URL joined with the API path, always ending in `/`.
    pub fn api_root(&self) -> String {
        format!(
            "{}/{}/",
            self.base_url.trim_end_matches('/'),
            self.api_path.trim_matches('/')
        )
    }
}
