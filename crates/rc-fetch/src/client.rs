//! HTTP and file roster sources.

use std::path::Path;

use reqwest::Client;
use tracing::{error, info};

use rc_core::Roster;

use crate::config::ClientConfig;
use crate::error::{FetchError, FetchResult};

/// Client for the roster endpoint.
pub struct RosterClient {
    client: Client,
    config: ClientConfig,
}

impl RosterClient {
    /// Create a client for the configured endpoint.
    pub fn new(config: ClientConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    /// The client configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Fetch the roster with a single `GET`.
    pub async fn fetch(&self) -> FetchResult<Roster> {
        let url = &self.config.endpoint;
        info!(%url, "fetching roster");

        let response = self.client.get(url).send().await.inspect_err(|e| {
            error!(%url, "roster request failed: {e}");
        })?;

        let status = response.status();
        if !status.is_success() {
            error!(%url, %status, "roster endpoint returned an error");
            return Err(FetchError::Status {
                status: status.as_u16(),
                url: url.clone(),
            });
        }

        let roster: Roster = response.json().await.inspect_err(|e| {
            error!(%url, "roster body could not be decoded: {e}");
        })?;
        info!(students = roster.len(), "roster fetched");
        Ok(roster)
    }
}

/// Read a roster from a JSON file in the endpoint's format.
pub fn load_roster_file(path: &Path) -> FetchResult<Roster> {
    let content = std::fs::read_to_string(path).map_err(|source| FetchError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let roster: Roster = serde_json::from_str(&content)?;
    info!(path = %path.display(), students = roster.len(), "roster loaded from file");
    Ok(roster)
}

/// The static notice shown when the roster cannot be loaded.
pub fn failure_notice(err: &FetchError, config: &ClientConfig) -> String {
    let mut notice = format!("Failed to fetch students. Please try again later.\n  ({err})");
    if let Some(url) = &config.feedback_url {
        notice.push_str(&format!("\n  Feedback: {url}"));
    }
    notice
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use rc_core::StudentId;
    use tempfile::TempDir;

    const BODY: &str = r#"[
        {"student_id": 10000, "name": "Aru", "thumbnail1": "t/aru", "thumbnail2": "p/aru"},
        {"student_id": 10001, "name": "Eimi", "thumbnail1": "t/eimi", "thumbnail2": "p/eimi"}
    ]"#;

    fn client_for(server: &MockServer) -> RosterClient {
        RosterClient::new(ClientConfig::default().with_endpoint(server.url("/api/students")))
    }

    #[tokio::test]
    async fn fetches_roster() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/api/students");
                then.status(200)
                    .header("content-type", "application/json")
                    .body(BODY);
            })
            .await;

        let roster = client_for(&server).fetch().await.unwrap();
        mock.assert_async().await;
        assert_eq!(roster.len(), 2);
        assert_eq!(
            roster.get(StudentId(10001)).map(|s| s.name.as_str()),
            Some("Eimi")
        );
    }

    #[tokio::test]
    async fn non_success_status_is_an_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/students");
                then.status(503);
            })
            .await;

        let err = client_for(&server).fetch().await.unwrap_err();
        assert!(matches!(err, FetchError::Status { status: 503, .. }), "{err}");
    }

    #[tokio::test]
    async fn malformed_body_is_an_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/students");
                then.status(200).body(r#"{"students": []}"#);
            })
            .await;

        let err = client_for(&server).fetch().await.unwrap_err();
        assert!(matches!(err, FetchError::Http(_)), "{err}");
    }

    #[tokio::test]
    async fn fetch_issues_a_single_request() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/api/students");
                then.status(500);
            })
            .await;

        let _ = client_for(&server).fetch().await;
        assert_eq!(mock.hits_async().await, 1);
    }

    #[test]
    fn loads_roster_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("roster.json");
        std::fs::write(&path, BODY).unwrap();
        let roster = load_roster_file(&path).unwrap();
        assert_eq!(roster.len(), 2);
    }

    #[test]
    fn missing_roster_file() {
        let dir = TempDir::new().unwrap();
        let err = load_roster_file(&dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, FetchError::Io { .. }));
    }

    #[test]
    fn malformed_roster_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("roster.json");
        std::fs::write(&path, "[{\"name\": 1}]").unwrap();
        assert!(matches!(load_roster_file(&path), Err(FetchError::Json(_))));
    }

    #[test]
    fn failure_notice_includes_feedback_link() {
        let err = FetchError::Status {
            status: 502,
            url: "http://x".to_string(),
        };
        let plain = failure_notice(&err, &ClientConfig::default());
        assert!(plain.starts_with("Failed to fetch students."));
        assert!(!plain.contains("Feedback"));

        let cfg = ClientConfig::default().with_feedback_url("https://forms.example/feedback");
        let with_link = failure_notice(&err, &cfg);
        assert!(with_link.contains("Feedback: https://forms.example/feedback"));
    }
}
