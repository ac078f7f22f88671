//! `BeinClient` - beIN EPG template client implementation.

use std::time::Duration;

use anyhow::{Context, Result, bail};
use beinguide_epg::{ChannelListing, LocalScheduleSource};
use chrono::NaiveDate;
use reqwest::Client;
use tracing::instrument;
use url::Url;

use super::html::parse_epg_html;
use super::params::EpgQuery;

/// Base URL for the beIN website.
pub const BEIN_BASE_URL: &str = "https://www.bein.com";

/// Path of the EPG template under `BEIN_BASE_URL`.
const EPG_TEMPLATE_PATH: &str = "/ar/epg-ajax-template/";

/// Default request timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// beIN EPG template client.
///
/// Issues one request per date; requests are never retried.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct BeinClient {
    /// HTTP client (reqwest, gzip enabled).
    http_client: Client,
    /// EPG template URL.
    base_url: Url,
    /// Query parameters other than the date.
    query: EpgQuery,
}

/// Builder for `BeinClient`.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct BeinClientBuilder {
    base_url: Option<Url>,
    user_agent: Option<String>,
    timeout: Option<Duration>,
    query: Option<EpgQuery>,
}

impl BeinClientBuilder {
    /// Creates a new builder.
    const fn new() -> Self {
        Self {
            base_url: None,
            user_agent: None,
            timeout: None,
            query: None,
        }
    }

    /// Overrides the EPG template URL (for wiremock in tests).
    #[must_use]
    pub fn base_url(mut self, url: Url) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Sets the User-Agent (required).
    #[must_use]
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Sets the request timeout (default: 30s).
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Overrides the query parameters.
    #[must_use]
    pub fn query(mut self, query: EpgQuery) -> Self {
        self.query = Some(query);
        self
    }

    /// Builds the client.
    ///
    /// # Errors
    ///
    /// - `user_agent` is not set.
    /// - `reqwest::Client` build fails.
    pub fn build(self) -> Result<BeinClient> {
        let user_agent = self.user_agent.context("user_agent is required")?;

        let base_url = if let Some(url) = self.base_url {
            url
        } else {
            let result =
                Url::parse(BEIN_BASE_URL).and_then(|base| base.join(EPG_TEMPLATE_PATH));
            result.context("invalid default base URL")?
        };

        let http_client = Client::builder()
            .user_agent(&user_agent)
            .timeout(self.timeout.unwrap_or(DEFAULT_TIMEOUT))
            .gzip(true)
            .build()
            .context("failed to build HTTP client")?;

        Ok(BeinClient {
            http_client,
            base_url,
            query: self.query.unwrap_or_default(),
        })
    }
}

impl BeinClient {
    /// Creates a new builder.
    #[must_use]
    pub const fn builder() -> BeinClientBuilder {
        BeinClientBuilder::new()
    }

    /// EPG template URL requests are sent to.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Fetches the raw EPG template page for `date`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or times out, the response
    /// status is not a success, or the body cannot be read.
    pub async fn fetch_epg_html(&self, date: NaiveDate) -> Result<String> {
        let query = self.query.to_query(date);

        let response = self
            .http_client
            .get(self.base_url.clone())
            .query(&query)
            .send()
            .await
            .context("EPG request failed")?;

        let status = response.status();
        tracing::trace!(%status, headers = ?response.headers(), "Response headers");
        if !status.is_success() {
            bail!("EPG request failed (HTTP {status})");
        }

        let html = response
            .text()
            .await
            .context("failed to read EPG response")?;
        tracing::debug!(body_len = html.len(), "Response body received");

        Ok(html)
    }
}

impl LocalScheduleSource for BeinClient {
    #[instrument(skip_all, fields(%date))]
    async fn fetch_day(&self, date: NaiveDate) -> Result<Vec<ChannelListing>> {
        let html = self.fetch_epg_html(date).await?;
        parse_epg_html(&html, &self.base_url)
            .with_context(|| format!("failed to parse EPG page for {date}"))
    }
}
