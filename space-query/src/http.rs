//! Shared HTTP client and the production [`SourceFetcher`].
//!
//! One [`reqwest::Client`] is built per engine and reused for every source
//! request, so connections and cookies are pooled. Each request carries a
//! browser-like `Accept` set, a `Referer` pointing at the source's home page
//! and, unless a custom User-Agent is configured, a User-Agent picked at
//! random from a built-in rotation list.

use crate::config::EngineConfig;
use crate::error::QueryError;
use crate::fetch::{FetchedPage, SourceFetcher};
use crate::query::Query;
use crate::sources::SourceSpec;
use rand::seq::SliceRandom;

/// Realistic browser User-Agent strings, rotated per request.
const USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:133.0) Gecko/20100101 Firefox/133.0",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10.15; rv:133.0) Gecko/20100101 Firefox/133.0",
];

/// Lower-cased markers of bot-check interstitials served with a 200 status.
const CAPTCHA_MARKERS: &[&str] = &[
    "g-recaptcha",
    "h-captcha",
    "cf-challenge",
    "captcha-delivery",
    "are you a robot",
    "verify you are human",
];

/// Build a [`reqwest::Client`] for source requests.
///
/// The client has a cookie store, a whole-request timeout of
/// `request_timeout_seconds`, brotli and gzip decompression and at most 10
/// redirects. No default User-Agent is set; [`HttpFetcher`] sets one per
/// request.
///
/// # Errors
///
/// Returns [`QueryError::InvalidConfiguration`] if the client cannot be
/// constructed.
pub fn build_client(config: &EngineConfig) -> Result<reqwest::Client, QueryError> {
    reqwest::Client::builder()
        .cookie_store(true)
        .timeout(config.request_timeout())
        .redirect(reqwest::redirect::Policy::limited(10))
        .build()
        .map_err(|e| QueryError::InvalidConfiguration(format!("failed to build HTTP client: {e}")))
}

/// Select a random User-Agent string from the rotation list.
pub fn random_user_agent() -> &'static str {
    let mut rng = rand::thread_rng();
    USER_AGENTS
        .choose(&mut rng)
        .copied()
        .unwrap_or(USER_AGENTS[0])
}

/// Returns `true` if `body` looks like a bot-check page instead of content.
pub fn looks_like_captcha(body: &[u8]) -> bool {
    // Interstitials are small; real result pages are not worth scanning in full.
    let head = &body[..body.len().min(64 * 1024)];
    let text = String::from_utf8_lossy(head).to_lowercase();
    CAPTCHA_MARKERS.iter().any(|marker| text.contains(marker))
}

/// Fetches source pages over HTTP with one shared client.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
    user_agent: Option<String>,
}

impl HttpFetcher {
    /// Create a fetcher from engine configuration.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::InvalidConfiguration`] if the HTTP client
    /// cannot be built.
    pub fn new(config: &EngineConfig) -> Result<Self, QueryError> {
        Ok(Self {
            client: build_client(config)?,
            user_agent: config.user_agent.clone(),
        })
    }

    fn user_agent(&self) -> &str {
        self.user_agent
            .as_deref()
            .unwrap_or_else(|| random_user_agent())
    }
}

impl SourceFetcher for HttpFetcher {
    async fn fetch(&self, source: &SourceSpec, query: &Query) -> Result<FetchedPage, QueryError> {
        let url = source.search_url(query);
        tracing::trace!(source = %source.id, url = %url, "requesting source");

        let response = self
            .client
            .get(&url)
            .header(reqwest::header::USER_AGENT, self.user_agent())
            .header(
                reqwest::header::ACCEPT,
                "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
            )
            .header(reqwest::header::ACCEPT_LANGUAGE, "en-US,en;q=0.9")
            .header(reqwest::header::REFERER, source.home_url.as_str())
            .send()
            .await
            .map_err(|e| request_error(source, &e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(QueryError::SourceFetchFailed(format!(
                "{} returned HTTP {}",
                source.id,
                status.as_u16()
            )));
        }

        let final_url = response.url().to_string();
        let body = response
            .bytes()
            .await
            .map_err(|e| request_error(source, &e))?;

        tracing::trace!(source = %source.id, bytes = body.len(), "source response received");

        if looks_like_captcha(&body) {
            return Err(QueryError::SourceFetchFailed(format!(
                "{} served a bot check page",
                source.id
            )));
        }

        Ok(FetchedPage {
            url: final_url,
            body,
        })
    }
}

fn request_error(source: &SourceSpec, err: &reqwest::Error) -> QueryError {
    if err.is_timeout() {
        QueryError::SourceTimeout(format!("{} request timed out: {err}", source.id))
    } else {
        QueryError::SourceFetchFailed(format!("{} request failed: {err}", source.id))
    }
}
