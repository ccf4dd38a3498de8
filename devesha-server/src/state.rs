//! Application state shared across all request handlers.

use crate::config::runtime::RuntimeConfig;
use devesha_core::publisher::MetafieldPublisher;
use sqlx::PgPool;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Application state that is shared across all request handlers.
///
/// Cloneable and cheap to pass around (everything is behind Arc). The
/// metafield publish gateway is long-lived so its HTTP connection pool is
/// reused across saves; it is rebuilt together with the runtime
/// configuration on SIGHUP reload.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub db: PgPool,
    /// Runtime configuration (can be reloaded via SIGHUP).
    pub config: Arc<RwLock<RuntimeConfig>>,
    /// Gateway for publishing the configuration blob to the storefront
    /// metadata channel. Derived from the storefront section of the config.
    publisher: Arc<RwLock<MetafieldPublisher>>,
}

impl AppState {
    /// Create a new AppState with the given database pool and configuration.
    pub fn new(db: PgPool, config: RuntimeConfig) -> Self {
        let publisher = build_publisher(&config);
        Self {
            db,
            config: Arc::new(RwLock::new(config)),
            publisher: Arc::new(RwLock::new(publisher)),
        }
    }

    /// Get a read lock on the configuration.
    pub async fn config(&self) -> tokio::sync::RwLockReadGuard<'_, RuntimeConfig> {
        self.config.read().await
    }

    /// Get a read lock on the metafield publish gateway.
    pub async fn publisher(&self) -> tokio::sync::RwLockReadGuard<'_, MetafieldPublisher> {
        self.publisher.read().await
    }

    /// Swap in a reloaded configuration and rebuild the publish gateway
    /// from its storefront section (used during SIGHUP reload).
    pub async fn update_config(&self, new_config: RuntimeConfig) {
        *self.publisher.write().await = build_publisher(&new_config);
        *self.config.write().await = new_config;
    }
}

fn build_publisher(config: &RuntimeConfig) -> MetafieldPublisher {
    MetafieldPublisher::new(
        config.storefront.api_url.clone(),
        config.storefront.access_token.clone(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::runtime::{ServerConfig, StorefrontConfig};
    use sqlx::postgres::PgPoolOptions;

    fn runtime_config(api_url: &str) -> RuntimeConfig {
        RuntimeConfig {
            server: ServerConfig {
                listen: std::net::SocketAddr::from(([127, 0, 0, 1], 0)),
            },
            storefront: StorefrontConfig {
                api_url: api_url.parse().unwrap(),
                access_token: "token".to_owned(),
            },
        }
    }

    #[tokio::test]
    async fn reload_rebuilds_the_publish_gateway() {
        // connect_lazy performs no I/O; no database is needed here.
        let pool = PgPoolOptions::new()
            .connect_lazy("postgres://localhost/devesha")
            .unwrap();
        let state = AppState::new(pool, runtime_config("https://a.example.com/graphql"));
        assert_eq!(
            state.publisher().await.api_url().host_str(),
            Some("a.example.com")
        );

        state
            .update_config(runtime_config("https://b.example.com/graphql"))
            .await;

        assert_eq!(
            state.publisher().await.api_url().host_str(),
            Some("b.example.com")
        );
        assert_eq!(
            state.config().await.storefront.api_url.host_str(),
            Some("b.example.com")
        );
    }
}
