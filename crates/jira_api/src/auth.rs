//! Basic-auth credentials for Jira Cloud API tokens.

use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use base64::Engine;
use std::fmt;

/// Account e-mail plus API token, sent as `Authorization: Basic base64(username:token)`.
#[derive(Clone, PartialEq, Eq)]
pub struct BasicCredentials {
    pub username: String,
    pub api_token: String,
}

impl BasicCredentials {
    pub fn new(username: impl Into<String>, api_token: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            api_token: api_token.into(),
        }
    }

    /// Returns the base64 token without the scheme prefix.
    pub fn token(&self) -> String {
        BASE64_STANDARD.encode(format!("{}:{}", self.username, self.api_token))
    }

    /// Returns the full `Authorization` header value.
    pub fn header_value(&self) -> String {
        format!("Basic {}", self.token())
    }
}

// Keep the token out of debug output and logs.
impl fmt::Debug for BasicCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BasicCredentials")
            .field("username", &self.username)
            .field("api_token", &"<redacted>")
            .finish()
    }
}
