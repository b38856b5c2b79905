use anyhow::Result;
use fuelscraper::{error::PipelineErrorBody, fetch, scrape_report};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

/// One-shot mode: scrape once, print the report JSON to stdout. The long
/// running HTTP service lives in `src/bin/serve.rs`.
#[tokio::main]
async fn main() -> Result<()> {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env).init();
    info!("startup");

    let client = fetch::client()?;
    match scrape_report(&client).await {
        Ok(report) => {
            println!("{}", serde_json::to_string_pretty(&report)?);
            info!("done");
            Ok(())
        }
        Err(e) => {
            // Same body shape the HTTP service emits for pipeline failures.
            println!(
                "{}",
                serde_json::to_string_pretty(&PipelineErrorBody::new(&e))?
            );
            std::process::exit(1);
        }
    }
}
