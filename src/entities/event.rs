use crate::error::FaersError;
use crate::sources::openfda::OpenFdaClient;

/// openFDA search for reports naming a drug, optionally narrowed by seriousness.
#[derive(Debug, Clone, Copy)]
pub struct EventQuery<'a> {
    drug: &'a str,
    serious: Option<&'a str>,
}

impl<'a> EventQuery<'a> {
    pub fn new(drug: &'a str, serious: Option<&'a str>) -> Self {
        Self { drug, serious }
    }

    /// Builds the `search=` query string.
    ///
    /// Values are inserted as-is: a `"` or `&` in the drug name changes the
    /// meaning of the query.
    pub fn to_query_string(&self) -> String {
        let mut query = format!("search=patient.drug.medicinalproduct:\"{}\"", self.drug);
        if let Some(serious) = self.serious.filter(|v| !v.is_empty()) {
            query.push_str(&format!("+AND+serious:{serious}"));
        }
        query
    }
}

/// Runs the search and returns the upstream body untouched.
pub async fn search(
    client: &OpenFdaClient,
    drug: &str,
    serious: Option<&str>,
) -> Result<serde_json::Value, FaersError> {
    let drug = super::require_drug(Some(drug))?;
    let query = EventQuery::new(drug, serious).to_query_string();
    client.event_search(&query).await
}
