use crate::domain::model::{Repository, UserProfile};
use crate::utils::error::{ProfileError, Result};
use reqwest::Client;
use serde_json::Value;
use std::collections::BTreeMap;
use std::time::Duration;

pub const DEFAULT_API_BASE: &str = "https://api.github.com";
pub const API_VERSION: &str = "2022-11-28";
pub const USER_AGENT: &str = "profile-stats-generator";

/// GitHub REST API 的薄封裝
#[derive(Debug, Clone)]
pub struct GitHubClient {
    client: Client,
    api_base: String,
    token: Option<String>,
}

impl GitHubClient {
    pub fn new(api_base: &str, token: Option<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            api_base: api_base.trim_end_matches('/').to_string(),
            token: token.filter(|t| !t.trim().is_empty()),
        })
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    async fn get_json(&self, url: &str, query: &[(&str, String)]) -> Result<Value> {
        let mut request = self
            .client
            .get(url)
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", API_VERSION);

        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        tracing::debug!("GET {} {:?}", url, query);
        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProfileError::GitHubApiError {
                status: status.as_u16(),
                url: url.to_string(),
                body,
            });
        }

        let payload: Value = response.json().await?;
        Ok(payload)
    }

    pub async fn fetch_user(&self, username: &str) -> Result<UserProfile> {
        let url = format!("{}/users/{}", self.api_base, username);
        let payload = self.get_json(&url, &[]).await?;

        if !payload.is_object() {
            return Err(ProfileError::UnexpectedResponse {
                what: "user".to_string(),
                found: json_type_name(&payload).to_string(),
            });
        }

        Ok(serde_json::from_value(payload)?)
    }

    /// 逐頁取得使用者擁有的 repository，遇到空頁即停止
    pub async fn fetch_owned_repos(&self, username: &str, per_page: u32) -> Result<Vec<Repository>> {
        let url = format!("{}/users/{}/repos", self.api_base, username);
        let mut repositories = Vec::new();
        let mut page: u32 = 1;

        loop {
            let query = [
                ("per_page", per_page.to_string()),
                ("page", page.to_string()),
                ("type", "owner".to_string()),
                ("sort", "updated".to_string()),
            ];
            let payload = self.get_json(&url, &query).await?;

            let items = match payload {
                Value::Array(items) => items,
                other => {
                    return Err(ProfileError::UnexpectedResponse {
                        what: "repos".to_string(),
                        found: json_type_name(&other).to_string(),
                    })
                }
            };

            if items.is_empty() {
                break;
            }

            tracing::debug!("Page {} returned {} repositories", page, items.len());
            for item in items {
                if item.is_object() {
                    repositories.push(serde_json::from_value(item)?);
                }
            }
            page += 1;
        }

        Ok(repositories)
    }

    /// 非物件回應視為無資料；只保留非負整數的位元組數
    pub async fn fetch_languages(&self, languages_url: &str) -> Result<BTreeMap<String, u64>> {
        let payload = self.get_json(languages_url, &[]).await?;

        let mut languages = BTreeMap::new();
        if let Value::Object(entries) = payload {
            for (name, size) in entries {
                if let Some(bytes) = size.as_u64() {
                    languages.insert(name, bytes);
                }
            }
        }

        Ok(languages)
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    fn client_for(server: &MockServer, token: Option<&str>) -> GitHubClient {
        GitHubClient::new(
            &server.base_url(),
            token.map(str::to_string),
            Duration::from_secs(5),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_fetch_user_sends_github_headers() {
        let server = MockServer::start_async().await;
        let user_mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/users/virgoone")
                    .header("Accept", "application/vnd.github+json")
                    .header("X-GitHub-Api-Version", "2022-11-28")
                    .header("User-Agent", "profile-stats-generator")
                    .header("Authorization", "Bearer secret-token");
                then.status(200).json_body(serde_json::json!({
                    "login": "virgoone",
                    "followers": 42,
                    "created_at": "2016-03-01T10:00:00Z"
                }));
            })
            .await;

        let client = client_for(&server, Some("secret-token"));
        let user = client.fetch_user("virgoone").await.unwrap();

        user_mock.assert_async().await;
        assert_eq!(user.login.as_deref(), Some("virgoone"));
        assert_eq!(user.followers, Some(42));
        assert_eq!(user.created_at.as_deref(), Some("2016-03-01T10:00:00Z"));
        assert!(user.updated_at.is_none());
    }

    #[tokio::test]
    async fn test_fetch_user_without_token_omits_authorization() {
        let server = MockServer::start_async().await;
        let authorized = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/users/virgoone")
                    .header_exists("Authorization");
                then.status(500);
            })
            .await;
        let anonymous = server
            .mock_async(|when, then| {
                when.method(GET).path("/users/virgoone");
                then.status(200).json_body(serde_json::json!({"login": "virgoone"}));
            })
            .await;

        let client = client_for(&server, Some("   "));
        assert!(!client.has_token());
        let user = client.fetch_user("virgoone").await.unwrap();

        authorized.assert_hits_async(0).await;
        anonymous.assert_async().await;
        assert_eq!(user.followers, None);
    }

    #[tokio::test]
    async fn test_fetch_user_rejects_non_object() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/users/virgoone");
                then.status(200).json_body(serde_json::json!([1, 2, 3]));
            })
            .await;

        let client = client_for(&server, None);
        let err = client.fetch_user("virgoone").await.unwrap_err();
        assert!(matches!(
            err,
            ProfileError::UnexpectedResponse { ref what, ref found } if what == "user" && found == "array"
        ));
    }

    #[tokio::test]
    async fn test_error_status_carries_body() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/users/ghost");
                then.status(404).body("{\"message\":\"Not Found\"}");
            })
            .await;

        let client = client_for(&server, None);
        match client.fetch_user("ghost").await {
            Err(ProfileError::GitHubApiError { status, url, body }) => {
                assert_eq!(status, 404);
                assert!(url.ends_with("/users/ghost"));
                assert_eq!(body, "{\"message\":\"Not Found\"}");
            }
            other => panic!("expected GitHubApiError, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fetch_owned_repos_pages_until_empty() {
        let server = MockServer::start_async().await;
        let page_one = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/users/virgoone/repos")
                    .query_param("per_page", "2")
                    .query_param("page", "1")
                    .query_param("type", "owner")
                    .query_param("sort", "updated");
                then.status(200).json_body(serde_json::json!([
                    {"name": "alpha", "fork": false, "stargazers_count": 3},
                    {"name": "beta", "fork": true, "stargazers_count": 10}
                ]));
            })
            .await;
        let page_two = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/users/virgoone/repos")
                    .query_param("page", "2");
                then.status(200)
                    .json_body(serde_json::json!([{"name": "gamma"}, "not-a-repo"]));
            })
            .await;
        let page_three = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/users/virgoone/repos")
                    .query_param("page", "3");
                then.status(200).json_body(serde_json::json!([]));
            })
            .await;

        let client = client_for(&server, None);
        let repos = client.fetch_owned_repos("virgoone", 2).await.unwrap();

        page_one.assert_async().await;
        page_two.assert_async().await;
        page_three.assert_async().await;
        assert_eq!(repos.len(), 3);
        assert_eq!(repos[0].display_name(), "alpha");
        assert!(repos[1].is_fork());
        assert_eq!(repos[2].stars(), 0);
        assert!(!repos[2].is_fork());
    }

    #[tokio::test]
    async fn test_fetch_owned_repos_rejects_object_page() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/users/virgoone/repos");
                then.status(200)
                    .json_body(serde_json::json!({"message": "API rate limit exceeded"}));
            })
            .await;

        let client = client_for(&server, None);
        let err = client.fetch_owned_repos("virgoone", 100).await.unwrap_err();
        assert!(matches!(err, ProfileError::UnexpectedResponse { .. }));
    }

    #[tokio::test]
    async fn test_fetch_languages_keeps_integer_sizes() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/repos/virgoone/alpha/languages");
                then.status(200).json_body(serde_json::json!({
                    "Rust": 12000,
                    "Shell": 300,
                    "Weird": "lots",
                    "Negative": -5,
                    "Fraction": 1.5
                }));
            })
            .await;

        let client = client_for(&server, None);
        let languages = client
            .fetch_languages(&server.url("/repos/virgoone/alpha/languages"))
            .await
            .unwrap();

        assert_eq!(languages.len(), 2);
        assert_eq!(languages["Rust"], 12000);
        assert_eq!(languages["Shell"], 300);
    }

    #[tokio::test]
    async fn test_fetch_languages_non_object_is_empty() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/repos/virgoone/empty/languages");
                then.status(200).json_body(serde_json::json!([]));
            })
            .await;

        let client = client_for(&server, None);
        let languages = client
            .fetch_languages(&server.url("/repos/virgoone/empty/languages"))
            .await
            .unwrap();
        assert!(languages.is_empty());
    }

    #[test]
    fn test_api_base_trailing_slash_is_trimmed() {
        let client = GitHubClient::new(
            "https://api.github.com/",
            None,
            Duration::from_secs(30),
        )
        .unwrap();
        assert_eq!(client.api_base(), DEFAULT_API_BASE);
    }
}
