use chrono::Local;
use serde::Serialize;
use thiserror::Error;

/// Failures the scrape pipeline can surface to a caller. Everything here maps
/// to the 200-status JSON error body; anything else is an unexpected fault.
#[derive(Debug, Error)]
pub enum ScrapeError {
    /// Non-200 response, empty body, or a transport/timeout failure. The
    /// status code is carried when one was received.
    #[error("failed to fetch data from AAA: {reason}")]
    Fetch {
        status: Option<u16>,
        reason: String,
    },

    /// The unioned state-anchor selector matched nothing. Hard precondition
    /// of the state pass; almost always means the source markup changed.
    #[error("no state elements found")]
    NoStates,
}

impl From<reqwest::Error> for ScrapeError {
    fn from(e: reqwest::Error) -> Self {
        ScrapeError::Fetch {
            status: e.status().map(|s| s.as_u16()),
            reason: e.to_string(),
        }
    }
}

/// JSON body emitted for every pipeline failure. The HTTP status stays 200
/// on this path; existing consumers key off the `error` field.
#[derive(Debug, Serialize)]
pub struct PipelineErrorBody {
    pub error: &'static str,
    pub details: String,
    pub timestamp: String,
}

impl PipelineErrorBody {
    pub fn new(err: &ScrapeError) -> Self {
        PipelineErrorBody {
            error: "Server error",
            details: err.to_string(),
            timestamp: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }
}
