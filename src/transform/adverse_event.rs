use std::collections::HashSet;

use crate::sources::openfda::{FaersDrug, FaersReport};

/// Lower-cases a drug name for exact, case-insensitive comparison.
pub(crate) fn normalize_drug_name(value: &str) -> String {
    value.to_lowercase()
}

/// A missing product name compares as the empty string.
pub(crate) fn product_matches(drug: &FaersDrug, normalized_target: &str) -> bool {
    normalize_drug_name(drug.medicinalproduct.as_deref().unwrap_or_default()) == normalized_target
}

pub(crate) fn report_drugs(report: &FaersReport) -> &[FaersDrug] {
    report
        .patient
        .as_ref()
        .map(|patient| patient.drug.as_slice())
        .unwrap_or_default()
}

/// Distinct manufacturer names across the report's matching drug records, in first-seen order.
pub(crate) fn matched_manufacturers<'a>(
    report: &'a FaersReport,
    normalized_target: &str,
) -> Vec<&'a str> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut out: Vec<&str> = Vec::new();
    for drug in report_drugs(report)
        .iter()
        .filter(|d| product_matches(d, normalized_target))
    {
        let Some(openfda) = drug.openfda.as_ref() else {
            continue;
        };
        for name in &openfda.manufacturer_name {
            if seen.insert(name.as_str()) {
                out.push(name.as_str());
            }
        }
    }
    out
}

/// First non-empty date among `receiptdate`, `receivedate`, `occurdate`.
pub(crate) fn report_date(report: &FaersReport) -> Option<&str> {
    [
        report.receiptdate.as_deref(),
        report.receivedate.as_deref(),
        report.occurdate.as_deref(),
    ]
    .into_iter()
    .flatten()
    .find(|v| !v.is_empty())
}
