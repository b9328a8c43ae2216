use std::sync::Arc;

use crate::error::FaersError;
use crate::sources::local::LocalEventsClient;
use crate::sources::openfda::OpenFdaClient;

/// Per-process route state. Holds clients and configuration only.
#[derive(Clone)]
pub struct AppState {
    pub(crate) openfda: OpenFdaClient,
    pub(crate) local: LocalEventsClient,
}

impl AppState {
    /// `self_base` is the URL this server answers on, used by the manufacturer route's loopback call.
    pub fn new(self_base: impl Into<String>) -> Result<Arc<Self>, FaersError> {
        Ok(Arc::new(Self {
            openfda: OpenFdaClient::new()?,
            local: LocalEventsClient::new(self_base)?,
        }))
    }

    #[cfg(test)]
    pub(crate) fn for_test(openfda: OpenFdaClient, self_base: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            openfda,
            local: LocalEventsClient::new(self_base).expect("local events client"),
        })
    }
}
