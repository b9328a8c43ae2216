use std::collections::BTreeMap;

use serde::Serialize;
use tracing::debug;

use crate::error::FaersError;
use crate::sources::openfda::{FaersReport, OpenFdaClient, event_reports};
use crate::transform::adverse_event::{
    normalize_drug_name, product_matches, report_date, report_drugs,
};
use crate::utils::date::{month_key, parse_compact_date};

/// Report counts keyed by `YYYY-MM`, serialized in ascending key order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TrendTable(BTreeMap<String, usize>);

impl TrendTable {
    /// Counts each report at most once, under the month of its first non-empty date field.
    ///
    /// Reports whose date is missing, not 8 characters long, or not a valid
    /// calendar date are skipped, as are reports with no drug record matching `drug`.
    pub fn from_reports(reports: &[FaersReport], drug: &str) -> Self {
        let target = normalize_drug_name(drug);
        let mut table = BTreeMap::new();
        let mut skipped = 0usize;

        for report in reports {
            let Some(raw) = report_date(report).filter(|v| v.chars().count() == 8) else {
                skipped += 1;
                continue;
            };
            let date = match parse_compact_date(raw) {
                Ok(date) => date,
                Err(err) => {
                    debug!(error = %err, "skipping report with unparseable date");
                    skipped += 1;
                    continue;
                }
            };

            if report_drugs(report)
                .iter()
                .any(|d| product_matches(d, &target))
            {
                *table.entry(month_key(date)).or_insert(0) += 1;
            }
        }

        debug!(
            drug,
            reports = reports.len(),
            skipped,
            buckets = table.len(),
            "aggregated monthly trend"
        );
        Self(table)
    }

    #[cfg(test)]
    pub fn get(&self, key: &str) -> Option<usize> {
        self.0.get(key).copied()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// `{"trend": {"YYYY-MM": count, ...}}`
#[derive(Debug, Clone, Serialize)]
pub struct TrendResponse {
    pub trend: TrendTable,
}

pub fn from_events_body(body: &serde_json::Value, drug: &str) -> Result<TrendResponse, FaersError> {
    let reports = event_reports(body)?;
    Ok(TrendResponse {
        trend: TrendTable::from_reports(&reports, drug),
    })
}

/// Searches upstream for `drug` (no seriousness filter) and buckets the reports by month.
pub async fn search(client: &OpenFdaClient, drug: &str) -> Result<TrendResponse, FaersError> {
    let body = super::event::search(client, drug, None).await?;
    from_events_body(&body, drug)
}
