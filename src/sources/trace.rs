use std::time::Instant;

use http::Extensions;
use reqwest::Url;
use reqwest_middleware::{Middleware, Next};
use tracing::debug;

#[derive(Clone, Debug)]
pub(crate) struct TraceMiddleware;

/// Origin and path of a request URL, without the query string.
///
/// Query strings can carry an `api_key`, so they stay out of the logs.
fn loggable_url(url: &Url) -> String {
    let port = url.port().map(|port| format!(":{port}")).unwrap_or_default();
    format!(
        "{}://{}{port}{}",
        url.scheme(),
        url.host_str().unwrap_or("unknown-host"),
        url.path()
    )
}

#[async_trait::async_trait]
impl Middleware for TraceMiddleware {
    async fn handle(
        &self,
        req: reqwest::Request,
        extensions: &mut Extensions,
        next: Next<'_>,
    ) -> reqwest_middleware::Result<reqwest::Response> {
        let method = req.method().clone();
        let url = loggable_url(req.url());
        let start = Instant::now();

        let result = next.run(req, extensions).await;
        let elapsed_ms = start.elapsed().as_millis() as u64;
        match &result {
            Ok(resp) => debug!(
                %method,
                url = %url,
                status = resp.status().as_u16(),
                elapsed_ms,
                "outbound request"
            ),
            Err(err) => debug!(%method, url = %url, elapsed_ms, error = %err, "outbound request failed"),
        }
        result
    }
}
