#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum FaersError {
    #[error("HTTP client initialization failed: {0}")]
    HttpClientInit(reqwest::Error),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP middleware error: {0}")]
    HttpMiddleware(#[from] reqwest_middleware::Error),

    #[error("API error from {api}: {message}")]
    Api { api: String, message: String },

    #[error("API JSON error from {api}: {source}")]
    ApiJson {
        api: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Template error: {0}")]
    Template(#[from] minijinja::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::FaersError;

    #[test]
    fn api_error_display_includes_api_name() {
        let err = FaersError::Api {
            api: "openfda".to_string(),
            message: "HTTP 500".to_string(),
        };

        let msg = err.to_string();
        assert!(msg.contains("openfda"));
        assert!(msg.contains("HTTP 500"));
    }

    #[test]
    fn api_json_error_keeps_parser_message() {
        let source = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let err = FaersError::ApiJson {
            api: "openfda".to_string(),
            source,
        };

        let msg = err.to_string();
        assert!(msg.starts_with("API JSON error from openfda: "));
        assert!(msg.contains("line 1"));
    }

    #[test]
    fn invalid_argument_display_is_prefixed() {
        let err = FaersError::InvalidArgument("Drug name is required".into());
        assert_eq!(err.to_string(), "Invalid argument: Drug name is required");
    }
}
