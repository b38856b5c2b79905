pub mod error;
pub mod extract;
pub mod fetch;
pub mod report;

pub use error::ScrapeError;
pub use report::Report;

use reqwest::Client;
use scraper::Html;
use tracing::info;

/// Run the full pipeline once: fetch the source page, extract state prices and
/// the national-average table, and assemble a dated [`Report`].
pub async fn scrape_report(client: &Client) -> Result<Report, ScrapeError> {
    let html = fetch::fetch_page(client).await?;
    build_report(&html)
}

/// Extraction + assembly on an already-fetched page body. Synchronous so the
/// non-`Send` parsed DOM never crosses an await point.
pub fn build_report(html: &str) -> Result<Report, ScrapeError> {
    let doc = Html::parse_document(html);
    let states = extract::states::extract_state_prices(&doc)?;
    let national_average = extract::averages::extract_national_averages(&doc);
    info!(
        states = states.len(),
        average_rows = national_average.len(),
        "extraction complete"
    );
    Ok(Report::assemble(states, national_average))
}
