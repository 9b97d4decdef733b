use crate::api::SearchResponse;
use anyhow::{Context, Result};
use std::time::Duration;

/// The live Naver Korean dictionary search endpoint.
pub const NAVER_SEARCH_URL: &str = "https://ko.dict.naver.com/api3/koko/search";

const USER_AGENT: &str = "malsori/0.1 (korean pronunciation fetcher)";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client bound to one dictionary search endpoint.
#[derive(Debug, Clone)]
pub struct SearchClient {
    http: reqwest::Client,
    endpoint: String,
}

impl SearchClient {
    pub fn new(endpoint: impl Into<String>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            http,
            endpoint: endpoint.into(),
        })
    }

    /// Fetch one page of word-range search results for `query`.
    pub async fn search_page(&self, query: &str, page: u32) -> Result<SearchResponse> {
        let page = page.to_string();
        let response = self
            .http
            .get(&self.endpoint)
            .query(&[("query", query), ("range", "word"), ("page", &page)])
            .send()
            .await
            .with_context(|| format!("Failed to fetch search page {page} for '{query}'"))?;

        let status = response.status();
        anyhow::ensure!(status.is_success(), "HTTP {status} searching '{query}' page {page}");

        response
            .json()
            .await
            .with_context(|| format!("Failed to parse search response for '{query}'"))
    }

    /// Download one audio asset and return its bytes.
    pub async fn fetch_audio(&self, url: &str) -> Result<Vec<u8>> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .with_context(|| format!("Failed to fetch audio {url}"))?;

        let status = response.status();
        anyhow::ensure!(status.is_success(), "HTTP {status} for audio {url}");

        Ok(response
            .bytes()
            .await
            .context("Failed to read audio body")?
            .to_vec())
    }
}

/// Turn an asset path from the API into a fetchable URL.
///
/// The API serves scheme-relative paths ("//…"); absolute URLs pass through.
pub fn asset_url(path: &str) -> String {
    if path.starts_with("//") {
        format!("https:{path}")
    } else {
        path.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asset_url_prefixes_scheme_relative_paths() {
        assert_eq!(
            asset_url("//dict-audio.example.com/a/1.mp3"),
            "https://dict-audio.example.com/a/1.mp3"
        );
    }

    #[test]
    fn test_asset_url_keeps_absolute_urls() {
        assert_eq!(
            asset_url("http://127.0.0.1:9999/a/1.mp3"),
            "http://127.0.0.1:9999/a/1.mp3"
        );
    }
}
