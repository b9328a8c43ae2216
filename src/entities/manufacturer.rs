use std::collections::HashMap;

use serde::Serialize;
use tracing::debug;

use crate::error::FaersError;
use crate::sources::openfda::{FaersReport, OpenFdaClient, event_reports};
use crate::transform::adverse_event::{matched_manufacturers, normalize_drug_name};

pub const UNKNOWN_MANUFACTURER: &str = "Unknown";
pub const DEFAULT_SERIOUSNESS: &str = "hospitalization";

/// Per-manufacturer report counts in first-insertion order.
///
/// `"Unknown"` is bumped once for every report, whether or not that report
/// named a manufacturer, so it counts reports rather than unattributed ones.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ManufacturerCounts {
    rows: Vec<(String, usize)>,
    index: HashMap<String, usize>,
}

impl ManufacturerCounts {
    pub fn from_reports(reports: &[FaersReport], drug: &str) -> Self {
        let target = normalize_drug_name(drug);
        let mut counts = Self::default();
        for report in reports {
            let matched = matched_manufacturers(report, &target);
            for name in &matched {
                counts.increment(name);
            }
            // Both arms bump "Unknown"; reports are counted there either way.
            #[allow(clippy::if_same_then_else)]
            if matched.is_empty() {
                counts.increment(UNKNOWN_MANUFACTURER);
            } else {
                counts.increment(UNKNOWN_MANUFACTURER);
            }
        }
        debug!(
            drug,
            reports = reports.len(),
            manufacturers = counts.rows.len(),
            "aggregated manufacturer counts"
        );
        counts
    }

    fn increment(&mut self, name: &str) {
        match self.index.get(name) {
            Some(&pos) => self.rows[pos].1 += 1,
            None => {
                self.index.insert(name.to_string(), self.rows.len());
                self.rows.push((name.to_string(), 1));
            }
        }
    }

    #[cfg(test)]
    pub fn get(&self, name: &str) -> Option<usize> {
        self.index.get(name).map(|&pos| self.rows[pos].1)
    }

    #[cfg(test)]
    pub fn rows(&self) -> &[(String, usize)] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<(String, usize)> {
        self.rows
    }
}

/// `{"manufacturers": [[name, count], ...]}`
#[derive(Debug, Clone, Serialize)]
pub struct ManufacturersResponse {
    pub manufacturers: Vec<(String, usize)>,
}

impl From<ManufacturerCounts> for ManufacturersResponse {
    fn from(counts: ManufacturerCounts) -> Self {
        Self {
            manufacturers: counts.into_rows(),
        }
    }
}

/// Aggregates manufacturers from an events body (the `/events` passthrough shape).
pub fn from_events_body(
    body: &serde_json::Value,
    drug: &str,
) -> Result<ManufacturersResponse, FaersError> {
    let reports = event_reports(body)?;
    Ok(ManufacturerCounts::from_reports(&reports, drug).into())
}

/// Searches upstream directly, without a seriousness filter, and aggregates.
pub async fn search(client: &OpenFdaClient, drug: &str) -> Result<ManufacturersResponse, FaersError> {
    let body = super::event::search(client, drug, None).await?;
    from_events_body(&body, drug)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reports(value: serde_json::Value) -> Vec<FaersReport> {
        serde_json::from_value(value).expect("reports json")
    }

    #[test]
    fn dedupes_within_report_and_counts_unknown_for_every_report() {
        let input = reports(serde_json::json!([
            {"patient": {"drug": [
                {"medicinalproduct": "Aspirin", "openfda": {"manufacturer_name": ["Acme"]}},
                {"medicinalproduct": "aspirin", "openfda": {"manufacturer_name": ["Acme"]}}
            ]}},
            {"patient": {"drug": [
                {"medicinalproduct": "Ibuprofen", "openfda": {"manufacturer_name": ["Other"]}}
            ]}}
        ]));

        let counts = ManufacturerCounts::from_reports(&input, "aspirin");
        assert_eq!(counts.get("Acme"), Some(1));
        assert_eq!(counts.get("Unknown"), Some(2));
        assert_eq!(counts.get("Other"), None);
    }

    #[test]
    fn counts_each_report_once_per_manufacturer() {
        let input = reports(serde_json::json!([
            {"patient": {"drug": [
                {"medicinalproduct": "ASPIRIN", "openfda": {"manufacturer_name": ["Acme", "Bayer"]}}
            ]}},
            {"patient": {"drug": [
                {"medicinalproduct": "aspirin", "openfda": {"manufacturer_name": ["Bayer"]}}
            ]}}
        ]));

        let counts = ManufacturerCounts::from_reports(&input, "Aspirin");
        assert_eq!(
            counts.into_rows(),
            vec![
                ("Acme".to_string(), 1),
                ("Bayer".to_string(), 2),
                ("Unknown".to_string(), 2),
            ]
        );
    }

    #[test]
    fn matching_ignores_case_in_both_directions() {
        for product in ["aspirin", "ASPIRIN", "Aspirin"] {
            let input = reports(serde_json::json!([
                {"patient": {"drug": [
                    {"medicinalproduct": product, "openfda": {"manufacturer_name": ["Acme"]}}
                ]}}
            ]));
            let counts = ManufacturerCounts::from_reports(&input, "Aspirin");
            assert_eq!(counts.get("Acme"), Some(1), "product {product}");
        }
    }

    #[test]
    fn matched_drug_without_openfda_block_only_counts_unknown() {
        let input = reports(serde_json::json!([
            {"patient": {"drug": [{"medicinalproduct": "aspirin"}]}}
        ]));
        let counts = ManufacturerCounts::from_reports(&input, "aspirin");
        assert_eq!(counts.rows(), &[("Unknown".to_string(), 1)]);
    }

    #[test]
    fn no_reports_yields_empty_table() {
        let counts = ManufacturerCounts::from_reports(&[], "aspirin");
        assert!(counts.rows().is_empty());
    }

    #[test]
    fn aggregation_is_repeatable() {
        let input = reports(serde_json::json!([
            {"patient": {"drug": [
                {"medicinalproduct": "aspirin", "openfda": {"manufacturer_name": ["B", "A", "C"]}}
            ]}},
            {"patient": {"drug": [
                {"medicinalproduct": "aspirin", "openfda": {"manufacturer_name": ["C", "D"]}}
            ]}}
        ]));
        let first = ManufacturerCounts::from_reports(&input, "aspirin");
        let second = ManufacturerCounts::from_reports(&input, "aspirin");
        assert_eq!(first, second);
        assert_eq!(first.rows()[0].0, "B");
    }

    #[test]
    fn response_serializes_as_name_count_pairs() {
        let input = reports(serde_json::json!([
            {"patient": {"drug": [
                {"medicinalproduct": "aspirin", "openfda": {"manufacturer_name": ["Acme"]}}
            ]}}
        ]));
        let response: ManufacturersResponse =
            ManufacturerCounts::from_reports(&input, "aspirin").into();
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            serde_json::json!({"manufacturers": [["Acme", 1], ["Unknown", 1]]})
        );
    }

    #[test]
    fn ignores_mistyped_date_fields() {
        let body = serde_json::json!({"results": [{
            "receivedate": 20230115,
            "patient": {"drug": [
                {"medicinalproduct": "aspirin", "openfda": {"manufacturer_name": ["Acme"]}}
            ]}
        }]});
        let response = from_events_body(&body, "aspirin").unwrap();
        assert_eq!(
            response.manufacturers,
            vec![("Acme".to_string(), 1), ("Unknown".to_string(), 1)]
        );
    }

    #[test]
    fn from_events_body_handles_error_payload() {
        let body = serde_json::json!({"error": {"code": "NOT_FOUND"}});
        let response = from_events_body(&body, "aspirin").unwrap();
        assert!(response.manufacturers.is_empty());
    }
}
