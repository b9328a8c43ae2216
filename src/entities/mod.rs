//! Drug-event query and aggregation workflows shared by the HTTP routes and the CLI.

use crate::error::FaersError;

pub(crate) mod event;
pub(crate) mod manufacturer;
pub(crate) mod trend;

pub(crate) const DRUG_REQUIRED: &str = "Drug name is required";

/// Accepts any non-empty drug name; whitespace is not trimmed.
pub(crate) fn require_drug(drug: Option<&str>) -> Result<&str, FaersError> {
    match drug {
        Some(drug) if !drug.is_empty() => Ok(drug),
        _ => Err(FaersError::InvalidArgument(DRUG_REQUIRED.into())),
    }
}
