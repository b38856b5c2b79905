use std::{env, time::Instant};

use anyhow::Result;
use fuelscraper::{error::PipelineErrorBody, fetch, scrape_report, Report, ScrapeError};
use reqwest::Client;
use serde::Serialize;
use tracing::{error, info, warn, Level};
use tracing_subscriber::{fmt, EnvFilter};
use warp::{
    http::{header::CONTENT_TYPE, StatusCode},
    reject::Rejection,
    reply::Reply,
    Filter,
};

/// Body for faults outside the scrape pipeline (e.g. serialization). Unlike
/// the pipeline shape this one rides a 500. Source location metadata is
/// deliberately not included.
#[derive(Serialize)]
struct FaultBody {
    error: &'static str,
    message: String,
    code: u32,
}

fn json_reply(status: StatusCode, body: String) -> impl Reply {
    warp::reply::with_status(
        warp::reply::with_header(body, CONTENT_TYPE, "application/json"),
        status,
    )
}

fn fault_body(message: &str) -> String {
    serde_json::to_string_pretty(&FaultBody {
        error: "Server error",
        message: message.to_string(),
        code: 0,
    })
    .unwrap_or_else(|_| {
        r#"{"error":"Server error","message":"serialization failure","code":0}"#.to_string()
    })
}

fn pipeline_body(err: &ScrapeError) -> String {
    serde_json::to_string_pretty(&PipelineErrorBody::new(err))
        .unwrap_or_else(|e| fault_body(&e.to_string()))
}

async fn health_check() -> Result<impl Reply, Rejection> {
    Ok(warp::reply::json(&serde_json::json!({
        "status": "healthy",
        "service": "fuelscraper"
    })))
}

/// Map a pipeline outcome to a response. Every failure kind is handled right
/// here: pipeline errors keep the 200 status their existing consumers
/// expect, anything unexpected is a 500.
fn render_scrape(result: Result<Report, ScrapeError>) -> (StatusCode, String) {
    match result {
        Ok(report) => match serde_json::to_string_pretty(&report) {
            Ok(body) => (StatusCode::OK, body),
            Err(e) => {
                error!(error = %e, "report serialization failed");
                (StatusCode::INTERNAL_SERVER_ERROR, fault_body(&e.to_string()))
            }
        },
        Err(e) => (StatusCode::OK, pipeline_body(&e)),
    }
}

/// GET / — run the whole pipeline and reply with the report.
async fn scrape_handler(client: Client) -> Result<impl Reply, Rejection> {
    let start = Instant::now();
    let result = scrape_report(&client).await;
    match &result {
        Ok(report) => {
            info!(
                states = report.states.len(),
                elapsed = ?start.elapsed(),
                "scrape ok"
            );
        }
        Err(e) => warn!(error = %e, elapsed = ?start.elapsed(), "scrape failed"),
    }
    let (status, body) = render_scrape(result);
    Ok(json_reply(status, body))
}

#[tokio::main]
async fn main() -> Result<()> {
    let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
    fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive(log_level.parse().unwrap_or(Level::INFO.into())),
        )
        .init();

    info!("Starting fuel price scraper service");

    let client = fetch::client()?;
    let with_client = warp::any().map(move || client.clone());

    let health = warp::path("health").and(warp::get()).and_then(health_check);
    let scrape = warp::path::end()
        .and(warp::get())
        .and(with_client)
        .and_then(scrape_handler);

    let routes = health.or(scrape);

    let port: u16 = env::var("PORT")
        .unwrap_or_else(|_| "8080".to_string())
        .parse()
        .unwrap_or(8080);

    info!("Server starting on port {}", port);
    info!("Health check: http://localhost:{}/health", port);
    info!("Scrape endpoint: GET http://localhost:{}/", port);

    warp::serve(routes).run(([0, 0, 0, 0], port)).await;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use fuelscraper::build_report;

    #[tokio::test]
    async fn test_health_check() {
        let result = health_check().await;
        assert!(result.is_ok());
    }

    #[test]
    fn success_reply_is_the_pretty_report_with_status_200() {
        let page = r##"
            <div class="us-map">
              <a href="#"><span>AL</span><div><p>AL Alabama</p><p>$2.899</p></div></a>
            </div>
            <table><tbody>
              <tr><td>Current Avg.</td><td>$3.10</td><td>$3.50</td><td>$3.80</td><td>$3.90</td><td>$2.90</td></tr>
            </tbody></table>
        "##;
        let report = build_report(page).unwrap();
        let (status, body) = render_scrape(Ok(report));
        assert_eq!(status, StatusCode::OK);
        let v: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert!(v["lastUpdated"].is_string());
        assert_eq!(v["states"][0]["stateAbbr"], "AL");
        assert_eq!(v["states"][0]["state"], "Alabama");
        assert_eq!(v["states"][0]["regular"], 2.899);
        assert_eq!(v["nationalAverage"]["Current Avg."]["midGrade"], 3.50);
    }

    #[test]
    fn pipeline_error_reply_keeps_status_200() {
        let (status, body) = render_scrape(Err(ScrapeError::NoStates));
        assert_eq!(status, StatusCode::OK);
        let v: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(v["error"], "Server error");
    }

    #[test]
    fn fault_body_has_message_and_code() {
        let body = fault_body("boom");
        let v: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(v["error"], "Server error");
        assert_eq!(v["message"], "boom");
        assert_eq!(v["code"], 0);
        assert!(v.get("file").is_none());
    }

    #[test]
    fn pipeline_body_keeps_the_legacy_shape() {
        let body = pipeline_body(&ScrapeError::NoStates);
        let v: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(v["error"], "Server error");
        assert_eq!(v["details"], "no state elements found");
        assert!(v["timestamp"].is_string());
    }
}
