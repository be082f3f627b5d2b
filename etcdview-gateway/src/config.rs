//! Gateway configuration.
//!
//! Read from the `ETCD_*` environment variables. TLS material is accepted
//! either as inline PEM text or as a filesystem path, resolved at connect
//! time.

use crate::error::{GatewayError, GatewayResult};
use std::env;
use std::fs;

/// Endpoint used when nothing is configured.
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:2379";

/// Connection settings for the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    /// Store endpoints, at least one.
    pub endpoints: Vec<String>,
    /// Client private key: inline PEM or a path to one.
    pub private_key: Option<String>,
    /// Client certificate chain: inline PEM or a path to one.
    pub cert_chain: Option<String>,
    /// Root certificate: inline PEM or a path to one.
    pub root_cert: Option<String>,
    /// Username for password auth; enables auth when set.
    pub username: Option<String>,
    /// Password for password auth; empty when not configured.
    pub password: String,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            endpoints: vec![DEFAULT_ENDPOINT.to_string()],
            private_key: None,
            cert_chain: None,
            root_cert: None,
            username: None,
            password: String::new(),
        }
    }
}

impl GatewayConfig {
    /// Builds a config from the `ETCD_*` environment:
    /// `ETCD_ENDPOINTS` (comma-separated, falling back to `ETCD_ENDPOINT`,
    /// then the default), `ETCD_KEY` / `ETCD_CERT` / `ETCD_CA`, and
    /// `ETCD_USERNAME` / `ETCD_PASSWORD`.
    pub fn from_env() -> Self {
        let raw_endpoints = env::var("ETCD_ENDPOINTS")
            .or_else(|_| env::var("ETCD_ENDPOINT"))
            .unwrap_or_else(|_| DEFAULT_ENDPOINT.to_string());

        Self {
            endpoints: parse_endpoints(&raw_endpoints),
            private_key: env::var("ETCD_KEY").ok().filter(|v| !v.is_empty()),
            cert_chain: env::var("ETCD_CERT").ok().filter(|v| !v.is_empty()),
            root_cert: env::var("ETCD_CA").ok().filter(|v| !v.is_empty()),
            username: env::var("ETCD_USERNAME").ok().filter(|v| !v.is_empty()),
            password: env::var("ETCD_PASSWORD").unwrap_or_default(),
        }
    }

    /// Convenience constructor for a plain, unauthenticated endpoint list.
    pub fn with_endpoints(endpoints: impl IntoIterator<Item = impl Into<String>>) -> Self {
        let endpoints: Vec<String> = endpoints.into_iter().map(Into::into).collect();
        Self {
            endpoints: if endpoints.is_empty() {
                vec![DEFAULT_ENDPOINT.to_string()]
            } else {
                endpoints
            },
            ..Self::default()
        }
    }

    /// The first configured endpoint, reported in the console's status line.
    pub fn primary_endpoint(&self) -> &str {
        self.endpoints
            .first()
            .map(String::as_str)
            .unwrap_or(DEFAULT_ENDPOINT)
    }

    /// True when any TLS material is configured.
    pub fn uses_tls(&self) -> bool {
        self.private_key.is_some() || self.cert_chain.is_some() || self.root_cert.is_some()
    }
}

/// Splits a comma-separated endpoint list, trimming entries and dropping
/// empty ones. An all-empty input yields the default endpoint.
pub fn parse_endpoints(raw: &str) -> Vec<String> {
    let endpoints: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|e| !e.is_empty())
        .map(String::from)
        .collect();
    if endpoints.is_empty() {
        vec![DEFAULT_ENDPOINT.to_string()]
    } else {
        endpoints
    }
}

/// Resolves TLS material to PEM bytes. Inline PEM content (anything
/// containing a `-----BEGIN` marker) is used directly; everything else is
/// treated as a filesystem path.
pub fn pem_bytes(value: &str) -> GatewayResult<Vec<u8>> {
    if value.contains("-----BEGIN") {
        return Ok(value.as_bytes().to_vec());
    }
    fs::read(value)
        .map_err(|err| GatewayError::Config(format!("cannot read TLS material at {value}: {err}")))
}
