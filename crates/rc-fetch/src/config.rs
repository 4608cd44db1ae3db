//! Configuration for the roster client.

/// The roster endpoint used when none is configured.
pub const DEFAULT_ENDPOINT: &str = "https://holy-willow-kdhcompany-277b699c.koyeb.app/api/students";

/// Configuration for a roster client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// URL answering `GET` with a JSON array of students.
    pub endpoint: String,
    /// Contact link shown when the fetch fails.
    pub feedback_url: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            feedback_url: None,
        }
    }
}

impl ClientConfig {
    /// Set the roster endpoint.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Set the feedback contact link.
    pub fn with_feedback_url(mut self, url: impl Into<String>) -> Self {
        self.feedback_url = Some(url.into());
        self
    }
}
