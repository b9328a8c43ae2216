use std::borrow::Cow;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::warn;

use crate::error::FaersError;

const OPENFDA_BASE: &str = "https://api.fda.gov";
const OPENFDA_API: &str = "openfda";
const OPENFDA_BASE_ENV: &str = "FAERS_OPENFDA_BASE";

/// Fixed page size for every drug-event search.
pub(crate) const EVENT_PAGE_SIZE: usize = 100;

#[derive(Clone)]
pub struct OpenFdaClient {
    client: reqwest_middleware::ClientWithMiddleware,
    base: Cow<'static, str>,
    api_key: Option<String>,
}

impl OpenFdaClient {
    pub fn new() -> Result<Self, FaersError> {
        Ok(Self {
            client: crate::sources::shared_client()?,
            base: crate::sources::env_base(OPENFDA_BASE, OPENFDA_BASE_ENV),
            api_key: std::env::var("OPENFDA_API_KEY")
                .ok()
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty()),
        })
    }

    #[cfg(test)]
    pub(crate) fn new_for_test(base: String, api_key: Option<String>) -> Result<Self, FaersError> {
        Ok(Self {
            client: crate::sources::shared_client()?,
            base: Cow::Owned(base),
            api_key: api_key
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty()),
        })
    }

    pub(crate) fn base(&self) -> &str {
        self.base.as_ref()
    }

    fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base.as_ref().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Runs a drug-event search and returns the upstream body as JSON.
    ///
    /// `query` is appended to the URL verbatim (it already carries `search=`).
    /// The upstream status is not checked: an openFDA error object comes back
    /// as `Ok` just like a result page.
    pub async fn event_search(&self, query: &str) -> Result<serde_json::Value, FaersError> {
        let url = format!(
            "{}?{query}&limit={EVENT_PAGE_SIZE}",
            self.endpoint("drug/event.json")
        );
        let mut req = self.client.get(&url);
        if let Some(key) = self.api_key.as_deref() {
            req = req.query(&[("api_key", key)]);
        }

        let resp = req.send().await?;
        let status = resp.status();
        let bytes = crate::sources::read_limited_body(resp, OPENFDA_API).await?;

        if !status.is_success() {
            warn!(
                source = OPENFDA_API,
                status = status.as_u16(),
                body = %crate::sources::body_excerpt(&bytes),
                "Upstream returned a non-success status; passing body through"
            );
        }

        serde_json::from_slice(&bytes).map_err(|source| FaersError::ApiJson {
            api: OPENFDA_API.to_string(),
            source,
        })
    }
}

/// Reads the `results` array of a drug-event body as report records.
///
/// A body without `results` (an upstream error object, for instance) yields no reports.
pub(crate) fn event_reports(body: &serde_json::Value) -> Result<Vec<FaersReport>, FaersError> {
    let Some(results) = body.get("results") else {
        return Ok(Vec::new());
    };
    Vec::<FaersReport>::deserialize(results).map_err(|source| FaersError::ApiJson {
        api: OPENFDA_API.to_string(),
        source,
    })
}

/// Non-string values (including `null`) read as absent.
fn de_lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(v)) => Some(v),
        _ => None,
    })
}

/// A value that does not decode as `T` reads as absent.
fn de_lenient_opt<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(Option::<Value>::deserialize(deserializer)?.and_then(|v| serde_json::from_value(v).ok()))
}

/// Non-arrays read as empty; elements that do not decode as `T` are dropped.
fn de_lenient_vec<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Array(items)) => items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect(),
        _ => Vec::new(),
    })
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FaersReport {
    #[serde(default, deserialize_with = "de_lenient_string")]
    pub receiptdate: Option<String>,
    #[serde(default, deserialize_with = "de_lenient_string")]
    pub receivedate: Option<String>,
    #[serde(default, deserialize_with = "de_lenient_string")]
    pub occurdate: Option<String>,
    #[serde(default, deserialize_with = "de_lenient_opt")]
    pub patient: Option<FaersPatient>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FaersPatient {
    #[serde(default, deserialize_with = "de_lenient_vec")]
    pub drug: Vec<FaersDrug>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FaersDrug {
    #[serde(default, deserialize_with = "de_lenient_string")]
    pub medicinalproduct: Option<String>,
    #[serde(default, deserialize_with = "de_lenient_opt")]
    pub openfda: Option<FaersOpenFdaDrug>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FaersOpenFdaDrug {
    #[serde(default, deserialize_with = "de_lenient_vec")]
    pub manufacturer_name: Vec<String>,
}
