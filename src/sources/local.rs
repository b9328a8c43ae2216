use crate::error::FaersError;

const LOCAL_API: &str = "local-events";

/// Client for this process's own `/events` route.
#[derive(Clone)]
pub struct LocalEventsClient {
    client: reqwest_middleware::ClientWithMiddleware,
    base: String,
}

impl LocalEventsClient {
    pub fn new(base: impl Into<String>) -> Result<Self, FaersError> {
        Ok(Self {
            client: crate::sources::shared_client()?,
            base: base.into(),
        })
    }

    /// Fetches events for `drug` through the loopback route.
    ///
    /// The filter travels as `seriousness`; `/events` reads only `serious`,
    /// so the upstream search is never narrowed by it. Parameters are placed in
    /// the URL unencoded, matching how the events route builds its own query.
    pub async fn fetch_events(
        &self,
        drug: &str,
        seriousness: &str,
    ) -> Result<serde_json::Value, FaersError> {
        let url = format!(
            "{}/events?drug={drug}&seriousness={seriousness}",
            self.base.trim_end_matches('/')
        );
        let resp = self.client.get(&url).send().await?.error_for_status()?;
        let bytes = crate::sources::read_limited_body(resp, LOCAL_API).await?;
        serde_json::from_slice(&bytes).map_err(|source| FaersError::ApiJson {
            api: LOCAL_API.to_string(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn fetch_events_forwards_seriousness_parameter() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/events"))
            .and(query_param("drug", "aspirin"))
            .and(query_param("seriousness", "hospitalization"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "results": []
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = LocalEventsClient::new(server.uri()).unwrap();
        let body = client.fetch_events("aspirin", "hospitalization").await.unwrap();
        assert!(body["results"].is_array());
    }

    #[tokio::test]
    async fn fetch_events_fails_on_error_status() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/events"))
            .respond_with(ResponseTemplate::new(500).set_body_json(serde_json::json!({
                "error": "upstream down"
            })))
            .mount(&server)
            .await;

        let client = LocalEventsClient::new(server.uri()).unwrap();
        let err = client
            .fetch_events("aspirin", "hospitalization")
            .await
            .unwrap_err();
        assert!(matches!(err, FaersError::Http(_)));
        assert!(err.to_string().contains("500"));
    }

    #[tokio::test]
    async fn fetch_events_fails_on_non_json_body() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/events"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let client = LocalEventsClient::new(server.uri()).unwrap();
        let err = client
            .fetch_events("aspirin", "hospitalization")
            .await
            .unwrap_err();
        assert!(matches!(err, FaersError::ApiJson { .. }));
    }
}
