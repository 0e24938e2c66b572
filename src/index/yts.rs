use super::MovieIndex;
use super::parser::{parse_release_blocks, parse_search_result};
use super::quality::select_best;
use crate::config::IndexConfig;
use crate::error::{Error, Result};
use async_trait::async_trait;
use reqwest::{Client, Url};
use tracing::debug;

/// Scraper for the YTS browse and movie pages
pub struct YtsIndex {
    client: Client,
    base_url: Url,
}

impl YtsIndex {
    pub fn new(config: &IndexConfig) -> Result<Self> {
        let base_url =
            Url::parse(&config.base_url).map_err(|e| Error::invalid_url(&config.base_url, e))?;

        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.as_str())
            .build()?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Browse URL with the title as a single percent-encoded path segment
    pub fn search_url(&self, title: &str) -> Result<Url> {
        let raw = format!(
            "{}/browse-movies/{}",
            self.base_url.as_str().trim_end_matches('/'),
            urlencoding::encode(title)
        );
        Url::parse(&raw).map_err(|e| Error::invalid_url(raw.clone(), e))
    }

    /// Body of `url`, or `None` on a non-success status
    async fn fetch_page(&self, url: Url) -> Result<Option<String>> {
        debug!("GET {}", url);
        let response = self.client.get(url.clone()).send().await?;

        let status = response.status();
        if !status.is_success() {
            debug!("{} answered with status {}", url, status);
            return Ok(None);
        }

        Ok(Some(response.text().await?))
    }
}

#[async_trait]
impl MovieIndex for YtsIndex {
    fn name(&self) -> &str {
        "YTS"
    }

    async fn search(&self, title: &str) -> Result<Option<String>> {
        let url = self.search_url(title)?;

        let Some(body) = self.fetch_page(url).await? else {
            return Ok(None);
        };

        let result = parse_search_result(&body, &self.base_url).map(String::from);
        debug!("Search for '{}' resolved to {:?}", title, result);
        Ok(result)
    }

    async fn best_magnet(&self, page_url: &str) -> Result<Option<String>> {
        let url = Url::parse(page_url).map_err(|e| Error::invalid_url(page_url, e))?;

        let Some(body) = self.fetch_page(url).await? else {
            return Ok(None);
        };

        let blocks = parse_release_blocks(&body);
        let best = select_best(&blocks);

        match &best {
            Some(candidate) => debug!(
                "Picked {} release #{} of {} on {}",
                candidate.quality,
                candidate.position,
                blocks.len(),
                page_url
            ),
            None => debug!("No usable release among {} on {}", blocks.len(), page_url),
        }

        Ok(best.map(|candidate| candidate.magnet.to_string()))
    }
}
