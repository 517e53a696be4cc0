use std::time::Duration;

use futures_util::StreamExt;
use serde::Deserialize;
use stargazer_core::{RemotePage, RemoteQuery, Repo};
use stargazer_logging::sg_debug;
use url::Url;

use crate::{FailureKind, FetchError};

const SEARCH_PATH: &str = "search/repositories";

#[derive(Debug, Clone)]
pub struct SearchSettings {
    pub api_base: String,
    /// Only repositories with strictly more stars than this are listed.
    pub min_stars: u64,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub max_bytes: u64,
    pub user_agent: String,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            api_base: "https://api.github.com".to_string(),
            min_stars: 1,
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            max_bytes: 5 * 1024 * 1024,
            user_agent: concat!("stargazer/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// A ranked repository search service.
#[async_trait::async_trait]
pub trait RepoSearch: Send + Sync {
    async fn search(&self, query: &RemoteQuery) -> Result<RemotePage, FetchError>;
}

/// Builds the `q` filter expression: star floor plus optional exact language.
///
/// Multi-word languages are quoted so the service reads them as one qualifier.
pub fn search_expression(min_stars: u64, language: &str) -> String {
    let language = language.trim();
    if language.is_empty() {
        format!("stars:>{min_stars}")
    } else if language.contains(char::is_whitespace) {
        format!("stars:>{min_stars} language:\"{}\"", language.replace('"', ""))
    } else {
        format!("stars:>{min_stars} language:{language}")
    }
}

/// Full search URL for `query`, sorted by stars descending.
pub fn search_url(api_base: &str, min_stars: u64, query: &RemoteQuery) -> Result<Url, FetchError> {
    let base = format!("{}/", api_base.trim_end_matches('/'));
    let mut url = Url::parse(&base)
        .and_then(|base| base.join(SEARCH_PATH))
        .map_err(|err| FetchError::new(FailureKind::InvalidUrl, err.to_string()))?;
    url.query_pairs_mut()
        .append_pair("q", &search_expression(min_stars, &query.language))
        .append_pair("sort", "stars")
        .append_pair("order", "desc")
        .append_pair("page", &query.page.max(1).to_string())
        .append_pair("per_page", &query.page_size.to_string());
    Ok(url)
}

#[derive(Debug, Deserialize)]
struct SearchBody {
    #[serde(default)]
    total_count: u64,
    #[serde(default)]
    items: Vec<Repo>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ReqwestSearch {
    settings: SearchSettings,
    client: reqwest::Client,
}

impl ReqwestSearch {
    pub fn new(settings: SearchSettings) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .user_agent(settings.user_agent.clone())
            .build()
            .map_err(|err| FetchError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self { settings, client })
    }

    async fn read_body(&self, response: reqwest::Response) -> Result<Vec<u8>, FetchError> {
        let max_bytes = self.settings.max_bytes;
        if let Some(content_len) = response.content_length() {
            if content_len > max_bytes {
                return Err(FetchError::new(
                    FailureKind::TooLarge {
                        max_bytes,
                        actual: Some(content_len),
                    },
                    "response too large",
                ));
            }
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > max_bytes {
                return Err(FetchError::new(
                    FailureKind::TooLarge {
                        max_bytes,
                        actual: Some(next_len),
                    },
                    "response too large",
                ));
            }
            bytes.extend_from_slice(&chunk);
        }
        Ok(bytes)
    }
}

#[async_trait::async_trait]
impl RepoSearch for ReqwestSearch {
    async fn search(&self, query: &RemoteQuery) -> Result<RemotePage, FetchError> {
        let url = search_url(&self.settings.api_base, self.settings.min_stars, query)?;
        sg_debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/vnd.github+json")
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            // The body is only a hint; fall back to the status line.
            let body = self.read_body(response).await.unwrap_or_default();
            let message = serde_json::from_slice::<ErrorBody>(&body)
                .ok()
                .and_then(|body| body.message)
                .filter(|message| !message.trim().is_empty())
                .unwrap_or_else(|| status.to_string());
            return Err(FetchError::new(
                FailureKind::HttpStatus(status.as_u16()),
                message,
            ));
        }

        let body = self.read_body(response).await?;
        let parsed: SearchBody = serde_json::from_slice(&body)
            .map_err(|err| FetchError::new(FailureKind::Decode, err.to_string()))?;

        Ok(RemotePage::new(
            query.page,
            query.page_size,
            parsed.items,
            parsed.total_count,
        ))
    }
}

fn map_reqwest_error(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        return FetchError::new(FailureKind::Timeout, err.to_string());
    }
    FetchError::new(FailureKind::Network, err.to_string())
}
