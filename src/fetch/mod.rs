// src/fetch/mod.rs

use std::{env, time::Duration};

use anyhow::{Context, Result};
use reqwest::{Client, StatusCode};
use tracing::{debug, warn};
use url::Url;

use crate::error::ScrapeError;

/// AAA national gas-prices page; the pipeline's sole external collaborator.
const SOURCE_URL: &str = "https://gasprices.aaa.com/";

/// The page serves a bot-blocking response to non-browser user agents.
const USER_AGENT: &str = "Mozilla/5.0";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Build the HTTP client used for every scrape. Redirects are followed
/// (reqwest default) and certificates are verified unless the caller opts
/// into the source's historical trust-everyone behavior with
/// `FUEL_INSECURE_TLS=true`.
pub fn client() -> Result<Client> {
    let mut builder = Client::builder()
        .user_agent(USER_AGENT)
        .timeout(REQUEST_TIMEOUT)
        .connect_timeout(REQUEST_TIMEOUT);

    if env::var("FUEL_INSECURE_TLS").map(|v| v == "true").unwrap_or(false) {
        warn!("FUEL_INSECURE_TLS=true: TLS certificate verification disabled");
        builder = builder.danger_accept_invalid_certs(true);
    }

    builder.build().context("building HTTP client")
}

/// GET the source page and return its body. Non-200 status, an empty body,
/// and transport/timeout failures all collapse into [`ScrapeError::Fetch`].
pub async fn fetch_page(client: &Client) -> Result<String, ScrapeError> {
    let url = source_url();
    debug!(%url, "fetching source page");
    let resp = client.get(url.as_str()).send().await?;
    let status = resp.status();
    let body = resp.text().await?;
    validate_page(status, body)
}

/// Source URL, overridable with `FUEL_SOURCE_URL` (used to point the scraper
/// at a fixture server in tests). Falls back to the real page if the
/// override does not parse.
fn source_url() -> Url {
    env::var("FUEL_SOURCE_URL")
        .ok()
        .and_then(|s| Url::parse(&s).ok())
        .unwrap_or_else(|| Url::parse(SOURCE_URL).expect("source URL is valid"))
}

fn validate_page(status: StatusCode, body: String) -> Result<String, ScrapeError> {
    // Anything other than a plain 200 counts as a fetch failure.
    if status != StatusCode::OK {
        return Err(ScrapeError::Fetch {
            status: Some(status.as_u16()),
            reason: format!("HTTP {}", status.as_u16()),
        });
    }
    if body.trim().is_empty() {
        return Err(ScrapeError::Fetch {
            status: Some(status.as_u16()),
            reason: "empty body".to_string(),
        });
    }
    Ok(body)
}
