pub mod errors;
mod instrumentation;

#[cfg(any(test, feature = "test-util"))]
use alloy::providers::mock;
use {
    crate::AlloyProvider,
    alloy::{
        providers::{Provider, ProviderBuilder},
        rpc::client::ClientBuilder,
    },
    instrumentation::LoggingLayer,
    url::Url,
};

/// Creates a provider for the node at `url`. Requests are logged under
/// `label`, which makes it possible to tell apart multiple providers talking
/// to the same node.
pub fn provider(url: &Url, label: &str) -> AlloyProvider {
    let rpc = ClientBuilder::default()
        .layer(LoggingLayer {
            label: label.into(),
        })
        .http(url.clone());
    ProviderBuilder::new().connect_client(rpc).erased()
}

/// Provider answering requests from the given asserter instead of a node.
/// Fillers are disabled so each request maps to exactly one queued response.
#[cfg(any(test, feature = "test-util"))]
pub fn mocked_provider(asserter: mock::Asserter) -> AlloyProvider {
    ProviderBuilder::new()
        .disable_recommended_fillers()
        .connect_mocked_client(asserter)
        .erased()
}
