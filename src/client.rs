//! HTTP client for the analysis backend.
//!
//! The backend clones a GitHub repository, analyses it and answers two
//! requests: `POST /analyze` for the full [`AnalysisResponse`] and
//! `POST /api/explain-code` for a Markdown explanation of one file.

use crate::config::BackendConfig;
use crate::model::AnalysisResponse;
use regex::Regex;
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use thiserror::Error;

static GITHUB_REPO_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^https?://(www\.)?github\.com/[\w.-]+/[\w.-]+/?.*$").expect("static pattern")
});

/// Whether `url` points at a GitHub repository (`https://github.com/owner/repo...`).
pub fn is_github_repo_url(url: &str) -> bool {
    GITHUB_REPO_URL.is_match(url.trim())
}

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Not a GitHub repository URL: {0}")]
    InvalidUrl(String),

    #[error("Request to backend failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-2xx answer; carries the backend's `error` field or the status line.
    #[error("Backend returned an error: {0}")]
    Backend(String),

    #[error("Unexpected backend response: {0}")]
    Decode(String),
}

#[derive(Serialize)]
struct AnalyzeRequest<'a> {
    url: &'a str,
}

#[derive(Serialize)]
struct ExplainRequest<'a> {
    repo_url: &'a str,
    file_path: &'a str,
}

#[derive(Deserialize)]
struct ExplainResponse {
    explanation: Option<String>,
    error: Option<String>,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

#[derive(Debug, Clone)]
pub struct BackendClient {
    http: Client,
    base_url: String,
}

impl BackendClient {
    pub fn new(config: &BackendConfig) -> Result<Self, ClientError> {
        let http = Client::builder().timeout(config.timeout()).build()?;

        Ok(Self {
            http,
            base_url: config.url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Request a full analysis of `repo_url`.
    ///
    /// Non-GitHub URLs are rejected without contacting the backend.
    pub async fn analyze(&self, repo_url: &str) -> Result<AnalysisResponse, ClientError> {
        let repo_url = repo_url.trim();
        if !is_github_repo_url(repo_url) {
            return Err(ClientError::InvalidUrl(repo_url.to_string()));
        }

        tracing::info!(repo = repo_url, backend = %self.base_url, "requesting analysis");
        let response = self
            .http
            .post(format!("{}/analyze", self.base_url))
            .json(&AnalyzeRequest { url: repo_url })
            .send()
            .await?;

        let response = check_status(response).await?;
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| ClientError::Decode(e.to_string()))
    }

    /// Ask the backend to explain one file of an analysed repository.
    pub async fn explain(&self, repo_url: &str, file_path: &str) -> Result<String, ClientError> {
        tracing::info!(repo = repo_url, file = file_path, "requesting explanation");
        let response = self
            .http
            .post(format!("{}/api/explain-code", self.base_url))
            .json(&ExplainRequest {
                repo_url,
                file_path,
            })
            .send()
            .await?;

        let response = check_status(response).await?;
        let body: ExplainResponse = response
            .json()
            .await
            .map_err(|e| ClientError::Decode(e.to_string()))?;

        match (body.explanation, body.error) {
            (Some(explanation), _) => Ok(explanation),
            (None, Some(error)) => Err(ClientError::Backend(error)),
            (None, None) => Err(ClientError::Decode("missing explanation".to_string())),
        }
    }
}

async fn check_status(response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&body)
        .map(|b| b.error)
        .unwrap_or_else(|_| format!("HTTP error! status: {}", status.as_u16()));
    tracing::warn!(status = status.as_u16(), %message, "backend request failed");
    Err(ClientError::Backend(message))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_github_url_validation() {
        assert!(is_github_repo_url("https://github.com/owner/repo"));
        assert!(is_github_repo_url("http://www.github.com/owner/repo.js/"));
        assert!(is_github_repo_url("https://github.com/owner/repo/tree/main/src"));
        assert!(is_github_repo_url("  https://github.com/a-b/c_d  "));

        assert!(!is_github_repo_url("https://gitlab.com/owner/repo"));
        assert!(!is_github_repo_url("https://github.com/owner"));
        assert!(!is_github_repo_url("github.com/owner/repo"));
        assert!(!is_github_repo_url(""));
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = BackendClient::new(&BackendConfig::new("http://localhost:8088/")).unwrap();
        assert_eq!(client.base_url(), "http://localhost:8088");
    }

    #[tokio::test]
    async fn test_analyze_rejects_invalid_url_before_request() {
        // Nothing listens on port 9; the URL check must fail first.
        let client = BackendClient::new(&BackendConfig::new("http://127.0.0.1:9")).unwrap();
        let err = client.analyze("https://example.com/a/b").await.unwrap_err();
        assert!(matches!(err, ClientError::InvalidUrl(_)));
    }
}
