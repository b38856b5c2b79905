// src/extract/averages.rs

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use tracing::debug;

use super::{price_or_zero, text_content};
use crate::report::FuelAverageRow;

/// Row labels the national-average table is expected to carry. Anything else
/// in the table (header rows, promos) is ignored.
const ROW_LABELS: &[&str] = &[
    "Current Avg.",
    "Yesterday Avg.",
    "Week Ago Avg.",
    "Month Ago Avg.",
    "Year Ago Avg.",
];

static TABLE: Lazy<Selector> = Lazy::new(|| Selector::parse("table").expect("valid selector"));
static TBODY: Lazy<Selector> = Lazy::new(|| Selector::parse("tbody").expect("valid selector"));
static TR: Lazy<Selector> = Lazy::new(|| Selector::parse("tr").expect("valid selector"));
static TD: Lazy<Selector> = Lazy::new(|| Selector::parse("td").expect("valid selector"));

/// Read the national-average table: first `table` in the document, first
/// `tbody`, rows with a recognized label and at least six cells. A missing
/// table or no qualifying rows yields an empty map, never an error; a
/// repeated label keeps the last row seen.
pub fn extract_national_averages(doc: &Html) -> BTreeMap<String, FuelAverageRow> {
    let mut averages = BTreeMap::new();

    let Some(table) = doc.select(&TABLE).next() else {
        debug!("no table in document; national averages empty");
        return averages;
    };
    let Some(tbody) = table.select(&TBODY).next() else {
        debug!("table has no tbody; national averages empty");
        return averages;
    };

    for row in tbody.select(&TR) {
        let cells: Vec<_> = row.select(&TD).collect();
        if cells.len() < 6 {
            continue;
        }
        let label = text_content(cells[0]).trim().to_string();
        if !ROW_LABELS.contains(&label.as_str()) {
            continue;
        }
        // Cells 1-5 are positional: regular, mid-grade, premium, diesel, E85.
        averages.insert(
            label,
            FuelAverageRow {
                regular: price_or_zero(&text_content(cells[1])),
                mid_grade: price_or_zero(&text_content(cells[2])),
                premium: price_or_zero(&text_content(cells[3])),
                diesel: price_or_zero(&text_content(cells[4])),
                e85: price_or_zero(&text_content(cells[5])),
            },
        );
    }

    averages
}
