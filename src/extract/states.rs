// src/extract/states.rs

use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use tracing::trace;

use super::{price_or_zero, text_content};
use crate::error::ScrapeError;
use crate::report::StatePrice;

/// The 48 contiguous states live in an interactive map block, the rest in a
/// separate "small states" list; both must be unioned to see all 50.
static STATE_ANCHORS: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(r#"div[class*="us-map"] a, div[class*="small-states"] a"#)
        .expect("CSS selector for state anchors should be valid")
});

static SPAN: Lazy<Selector> = Lazy::new(|| Selector::parse("span").expect("valid selector"));
static DIV: Lazy<Selector> = Lazy::new(|| Selector::parse("div").expect("valid selector"));
static P: Lazy<Selector> = Lazy::new(|| Selector::parse("p").expect("valid selector"));

/// Walk every state anchor and pull (name, abbreviation, regular price) out
/// of its hover box. Anchors without the expected span / hover div / two
/// paragraphs are skipped silently; zero anchors at all is a hard error.
pub fn extract_state_prices(doc: &Html) -> Result<Vec<StatePrice>, ScrapeError> {
    let anchors: Vec<_> = doc.select(&STATE_ANCHORS).collect();
    if anchors.is_empty() {
        return Err(ScrapeError::NoStates);
    }

    let mut prices = Vec::with_capacity(anchors.len());
    for anchor in anchors {
        let Some(span) = anchor.select(&SPAN).next() else {
            trace!("skipping anchor without abbreviation span");
            continue;
        };
        let Some(hover_box) = anchor.select(&DIV).next() else {
            trace!("skipping anchor without hover box");
            continue;
        };

        let paragraphs: Vec<_> = hover_box.select(&P).collect();
        if paragraphs.len() < 2 {
            trace!("skipping anchor with fewer than two hover paragraphs");
            continue;
        }

        let state_abbr = text_content(span).trim().to_string();
        // The name paragraph repeats the abbreviation; strip it out rather
        // than consult a lookup table.
        let state = text_content(paragraphs[0])
            .replace(&state_abbr, "")
            .trim()
            .to_string();
        let regular = price_or_zero(&text_content(paragraphs[1]));

        prices.push(StatePrice {
            state,
            state_abbr,
            regular,
        });
    }

    Ok(prices)
}
