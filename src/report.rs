// src/report.rs

use std::collections::BTreeMap;

use chrono::Local;
use serde::{Deserialize, Serialize};

/// One state's regular-gas price, taken from its map (or small-states list)
/// hover box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatePrice {
    pub state: String,
    pub state_abbr: String,
    pub regular: f64,
}

/// One labeled row of the national-average table, prices per fuel grade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FuelAverageRow {
    pub regular: f64,
    pub mid_grade: f64,
    pub premium: f64,
    pub diesel: f64,
    pub e85: f64,
}

/// Root output document. Field declaration order is the JSON key order:
/// `lastUpdated`, `states`, `nationalAverage`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    /// Run date, not anything read off the page.
    pub last_updated: String,
    pub states: Vec<StatePrice>,
    pub national_average: BTreeMap<String, FuelAverageRow>,
}

impl Report {
    pub fn assemble(
        states: Vec<StatePrice>,
        national_average: BTreeMap<String, FuelAverageRow>,
    ) -> Self {
        Report {
            last_updated: Local::now().format("%Y-%m-%d").to_string(),
            states,
            national_average,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_report() -> Report {
        let mut avg = BTreeMap::new();
        avg.insert(
            "Current Avg.".to_string(),
            FuelAverageRow {
                regular: 3.10,
                mid_grade: 3.50,
                premium: 3.80,
                diesel: 3.90,
                e85: 2.90,
            },
        );
        Report {
            last_updated: "2026-08-28".to_string(),
            states: vec![
                StatePrice {
                    state: "Alaska".to_string(),
                    state_abbr: "AK".to_string(),
                    regular: 3.741,
                },
                StatePrice {
                    state: "Alabama".to_string(),
                    state_abbr: "AL".to_string(),
                    regular: 2.899,
                },
            ],
            national_average: avg,
        }
    }

    #[test]
    fn round_trip_preserves_values_and_state_order() {
        let report = sample_report();
        let json = serde_json::to_string_pretty(&report).unwrap();
        let back: Report = serde_json::from_str(&json).unwrap();
        assert_eq!(back, report);
        assert_eq!(back.states[0].state_abbr, "AK");
        assert_eq!(back.states[1].state_abbr, "AL");
    }

    #[test]
    fn top_level_keys_are_camel_case_in_declaration_order() {
        let json = serde_json::to_string_pretty(&sample_report()).unwrap();
        let last_updated = json.find("\"lastUpdated\"").unwrap();
        let states = json.find("\"states\"").unwrap();
        let national = json.find("\"nationalAverage\"").unwrap();
        assert!(last_updated < states && states < national);
        assert!(json.contains("\"stateAbbr\""));
        assert!(json.contains("\"midGrade\""));
        assert!(json.contains("\"e85\""));
    }
}
