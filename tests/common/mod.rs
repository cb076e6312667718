#![allow(dead_code)]

use portfolio_panel::github::GitHubClient;
use serde_json::{json, Value};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const USERNAME: &str = "octo";

pub struct TestContext {
    pub server: MockServer,
    pub client: GitHubClient,
}

impl TestContext {
    pub async fn new() -> anyhow::Result<Self> {
        let server = MockServer::start().await;
        let client = GitHubClient::with_base_url(&server.uri())?;
        Ok(TestContext { server, client })
    }

    pub async fn mount_user(&self, public_repos: u32, followers: u32, following: u32) {
        Mock::given(method("GET"))
            .and(path(format!("/users/{}", USERNAME)))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "login": USERNAME,
                "id": 583231,
                "public_repos": public_repos,
                "followers": followers,
                "following": following,
                "created_at": "2011-01-25T18:44:36Z"
            })))
            .mount(&self.server)
            .await;
    }

    pub async fn mount_repos(&self, repos: Vec<Value>) {
        Mock::given(method("GET"))
            .and(path(format!("/users/{}/repos", USERNAME)))
            .and(query_param("per_page", "100"))
            .and(query_param("sort", "updated"))
            .respond_with(ResponseTemplate::new(200).set_body_json(Value::Array(repos)))
            .mount(&self.server)
            .await;
    }

    pub async fn mount_languages(&self, repo: &str, languages: Value) {
        Mock::given(method("GET"))
            .and(path(format!("/repos/{}/{}/languages", USERNAME, repo)))
            .respond_with(ResponseTemplate::new(200).set_body_json(languages))
            .mount(&self.server)
            .await;
    }

    pub async fn mount_status(&self, route: String, status: u16) {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(ResponseTemplate::new(status).set_body_json(json!({
                "message": "Server Error"
            })))
            .mount(&self.server)
            .await;
    }

    /// Paths of every request the mock server has seen so far.
    pub async fn requested_paths(&self) -> Vec<String> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .into_iter()
            .map(|r| r.url.path().to_string())
            .collect()
    }
}

pub fn repo_json(name: &str, fork: bool) -> Value {
    json!({
        "id": 1,
        "name": name,
        "full_name": format!("{}/{}", USERNAME, name),
        "description": format!("About {}", name),
        "html_url": format!("https://github.com/{}/{}", USERNAME, name),
        "fork": fork,
        "updated_at": "2024-05-01T12:00:00Z"
    })
}
