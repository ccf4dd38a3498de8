//! In-memory runtime configuration.
//!
//! Built from [`FileConfig`](super::file::FileConfig) at startup and swapped
//! wholesale on SIGHUP reload.

use std::net::SocketAddr;
use url::Url;

#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub server: ServerConfig,
    pub storefront: StorefrontConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub listen: SocketAddr,
}

#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    pub api_url: Url,
    pub access_token: String,
}
