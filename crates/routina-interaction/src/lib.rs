pub mod relay_client;

use std::sync::Arc;

use routina_core::config::RelayConfig;
use routina_core::conversation::ChatRelay;
use tracing::warn;

pub use relay_client::{RelayClient, UnconfiguredRelay, parse_completion};

/// Builds the session relay from config.
///
/// Without an endpoint the session still starts; each chat or routine call
/// then fails with the connection error message.
pub fn relay_from_config(config: &RelayConfig) -> Arc<dyn ChatRelay> {
    match RelayClient::from_config(config) {
        Ok(client) => Arc::new(client),
        Err(e) => {
            warn!(error = %e, "chat relay disabled");
            Arc::new(UnconfiguredRelay)
        }
    }
}
