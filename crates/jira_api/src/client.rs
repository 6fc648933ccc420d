use crate::config::JiraConfig;
use crate::error::{JiraError, Result};
use crate::models::{SearchResults, User, WorklogPage};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};
use reqwest::{Client as HttpClient, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

/// Upper bound Jira accepts for `maxResults` on a single search page.
pub const MAX_SEARCH_RESULTS: u32 = 5000;

#[derive(Clone)]
pub struct JiraClient {
    http: HttpClient,
    config: JiraConfig,
}

/// Time bounds for `GET /issue/{key}/worklog`, in epoch milliseconds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WorklogQuery {
    pub started_after: Option<i64>,
    pub started_before: Option<i64>,
}

impl WorklogQuery {
    pub fn between(started_after: i64, started_before: i64) -> Self {
        Self {
            started_after: Some(started_after),
            started_before: Some(started_before),
        }
    }

    fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(after) = self.started_after {
            params.push(("startedAfter", after.to_string()));
        }
        if let Some(before) = self.started_before {
            params.push(("startedBefore", before.to_string()));
        }
        params
    }
}

impl JiraClient {
    pub fn new(config: JiraConfig) -> Result<Self> {
        let http = build_http_client(&config)?;
        Ok(Self { http, config })
    }

    pub async fn get<T>(&self, path: &str) -> Result<T>
    where
        T: DeserializeOwned,
    {
        self.get_with_query::<T, &str>(path, &[]).await
    }

    pub async fn get_with_query<T, V>(&self, path: &str, query: &[(&str, V)]) -> Result<T>
    where
        T: DeserializeOwned,
        V: AsRef<str>,
    {
        let url = self.url_for(path);
        let params: Vec<(&str, &str)> = query
            .iter()
            .map(|(key, value)| (*key, value.as_ref()))
            .collect();
        debug!(path, ?params, "GET");
        let mut request = self.http.get(url);
        if !params.is_empty() {
            request = request.query(&params);
        }
        let response = request.send().await?;
        debug!(path, status = %response.status(), "response");
        Self::parse_json(response).await
    }

    fn url_for(&self, path: &str) -> String {
        let mut base = self.config.api_root();
        base.push_str(path.trim_start_matches('/'));
        base
    }

    async fn parse_json<T>(response: Response) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let status = response.status();
        if status.is_success() {
            let body = response.text().await?;
            serde_json::from_str::<T>(&body).map_err(JiraError::from)
        } else if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            let body = response.text().await.unwrap_or_default();
            Err(JiraError::Authentication(format!(
                "Access denied ({}) - {}",
                status,
                extract_error_message(&body).unwrap_or(body)
            )))
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(build_http_error(status, &body))
        }
    }

    /// `GET /myself`: the account the credentials belong to.
    pub async fn get_myself(&self) -> Result<User> {
        self.get("myself").await
    }

    /// Runs a JQL search and returns a single page of issues carrying only `fields`.
    pub async fn search_issues(
        &self,
        jql: &str,
        max_results: u32,
        fields: &str,
    ) -> Result<SearchResults> {
        let max_results = max_results.clamp(1, MAX_SEARCH_RESULTS).to_string();
        self.get_with_query(
            "search",
            &[
                ("jql", jql),
                ("maxResults", max_results.as_str()),
                ("fields", fields),
            ],
        )
        .await
    }

    /// Worklogs of one issue, optionally restricted by start time.
    pub async fn get_issue_worklogs(
        &self,
        issue_key: &str,
        query: WorklogQuery,
    ) -> Result<WorklogPage> {
        let path = format!("issue/{}/worklog", issue_key);
        self.get_with_query(&path, query.params().as_slice())
            .await
    }
}

fn build_http_client(config: &JiraConfig) -> Result<HttpClient> {
    let mut headers = HeaderMap::new();

    let mut auth_value = header_value(config.credentials.header_value())?;
    auth_value.set_sensitive(true);
    headers.insert(AUTHORIZATION, auth_value);
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    headers.insert(USER_AGENT, header_value(config.user_agent.clone())?);

    HttpClient::builder()
        .default_headers(headers)
        .timeout(config.timeout)
        .connect_timeout(config.connect_timeout)
        .build()
        .map_err(|err| JiraError::Other(err.to_string()))
}

fn header_value(value: String) -> Result<HeaderValue> {
    HeaderValue::from_str(&value).map_err(|err| JiraError::Other(err.to_string()))
}

fn build_http_error(status: StatusCode, body: &str) -> JiraError {
    let code = extract_error_code(body);
    let message = extract_error_message(body).unwrap_or_else(|| body.to_string());
    JiraError::http(status, code, message)
}

/// First entry of Jira's `errorMessages` array, or the first value of its `errors` map.
fn extract_error_message(body: &str) -> Option<String> {
    let value = serde_json::from_str::<Value>(body).ok()?;
    value
        .get("errorMessages")
        .and_then(Value::as_array)
        .and_then(|messages| messages.iter().find_map(Value::as_str))
        .or_else(|| {
            value
                .get("errors")
                .and_then(Value::as_object)
                .and_then(|errors| errors.values().find_map(Value::as_str))
        })
        .map(str::to_string)
}

/// Field name of the first entry in Jira's `errors` map, if any.
fn extract_error_code(body: &str) -> Option<String> {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|value| {
            value
                .get("errors")
                .and_then(Value::as_object)
                .and_then(|errors| errors.keys().next().cloned())
        })
}
