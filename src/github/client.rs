// HTTP client for the portfolio's upstream APIs.
// Handles default headers and response status mapping for both the GitHub
// REST API and the contribution-calendar aggregator. Requests are
// unauthenticated and shared references, so one client serves concurrent
// fetches.

use reqwest::{
    Client, Response, StatusCode,
    header::{ACCEPT, HeaderMap, HeaderValue, USER_AGENT},
};

use crate::config::Config;
use crate::error::{FolioError, Result};

const GITHUB_API_VERSION: &str = "2022-11-28";

/// Client for the GitHub REST API plus the contribution aggregator.
pub struct GitHubClient {
    client: Client,
    api_base: String,
    contributions_base: String,
}

impl GitHubClient {
    pub fn new(config: &Config) -> Result<Self> {
        let mut headers = HeaderMap::new();

        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            "X-GitHub-Api-Version",
            HeaderValue::from_static(GITHUB_API_VERSION),
        );
        headers.insert(USER_AGENT, HeaderValue::from_static("folio"));

        let client = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(FolioError::Api)?;

        Ok(Self {
            client,
            api_base: config.api_base.clone(),
            contributions_base: config.contributions_base.clone(),
        })
    }

    /// Make a GET request to the GitHub API.
    pub async fn get(&self, endpoint: &str) -> Result<Response> {
        let url = format!("{}{}", self.api_base, endpoint);
        let response = self.client.get(&url).send().await.map_err(FolioError::Api)?;
        check_response(response).await
    }

    /// Make a GET request to the GitHub API with query parameters.
    pub async fn get_with_params<T: serde::Serialize + ?Sized>(
        &self,
        endpoint: &str,
        params: &T,
    ) -> Result<Response> {
        let url = format!("{}{}", self.api_base, endpoint);
        let response = self
            .client
            .get(&url)
            .query(params)
            .send()
            .await
            .map_err(FolioError::Api)?;
        check_response(response).await
    }

    /// Make a GET request to the contribution-calendar aggregator.
    pub async fn get_contributions_feed(&self, path: &str) -> Result<Response> {
        let url = format!("{}{}", self.contributions_base, path);
        let response = self.client.get(&url).send().await.map_err(FolioError::Api)?;
        check_response(response).await
    }
}

/// Check response status and convert errors.
async fn check_response(response: Response) -> Result<Response> {
    match response.status() {
        StatusCode::OK => Ok(response),
        StatusCode::NOT_FOUND => {
            let url = response.url().to_string();
            Err(FolioError::NotFound(url))
        }
        StatusCode::FORBIDDEN if header_u64(&response, "x-ratelimit-remaining") == Some(0) => {
            let reset_at = header_u64(&response, "x-ratelimit-reset")
                .and_then(|reset| chrono::DateTime::from_timestamp(reset as i64, 0))
                .map(|at| at.format("%H:%M:%S").to_string())
                .unwrap_or_else(|| "unknown".to_string());
            Err(FolioError::RateLimited { reset_at })
        }
        status => Err(FolioError::Status {
            status: status.as_u16(),
            body: response.text().await.unwrap_or_default(),
        }),
    }
}

/// Parse a numeric response header, if present.
fn header_u64(response: &Response, name: &str) -> Option<u64> {
    response
        .headers()
        .get(name)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.parse().ok())
}
