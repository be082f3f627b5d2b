//! The etcd-backed gateway.
//!
//! Holds one client handle for the process lifetime, built lazily on first
//! use. The handle is cheap to clone; the store serializes concurrent
//! writes to the same key, so no extra locking is needed here.

use crate::config::{GatewayConfig, pem_bytes};
use crate::error::{GatewayError, GatewayResult};
use crate::{StoreGateway, effective_prefix, require_key};
use async_trait::async_trait;
use etcd_client::{
    Certificate, Client, ConnectOptions, GetOptions, Identity, KeyValue, TlsOptions,
};
use etcdview_types::Entry;
use tokio::sync::OnceCell;
use tracing::{debug, info};

/// Gateway over a real etcd cluster.
pub struct EtcdGateway {
    config: GatewayConfig,
    client: OnceCell<Client>,
}

impl EtcdGateway {
    pub fn new(config: GatewayConfig) -> Self {
        Self {
            config,
            client: OnceCell::new(),
        }
    }

    /// Builds a gateway from the `ETCD_*` environment.
    pub fn from_env() -> Self {
        Self::new(GatewayConfig::from_env())
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// Returns a handle to the shared client, connecting on first use.
    async fn client(&self) -> GatewayResult<Client> {
        let client = self
            .client
            .get_or_try_init(|| self.connect())
            .await?;
        Ok(client.clone())
    }

    async fn connect(&self) -> GatewayResult<Client> {
        let mut options = ConnectOptions::new();

        if let Some(username) = &self.config.username {
            options = options.with_user(username.as_str(), self.config.password.as_str());
        }

        if self.config.uses_tls() {
            let mut tls = TlsOptions::new();
            if let Some(ca) = &self.config.root_cert {
                tls = tls.ca_certificate(Certificate::from_pem(pem_bytes(ca)?));
            }
            if let (Some(cert), Some(key)) = (&self.config.cert_chain, &self.config.private_key) {
                tls = tls.identity(Identity::from_pem(pem_bytes(cert)?, pem_bytes(key)?));
            }
            options = options.with_tls(tls);
        }

        info!(endpoints = ?self.config.endpoints, "connecting to store");
        let client = Client::connect(&self.config.endpoints, Some(options)).await?;
        Ok(client)
    }
}

fn map_kv(kv: &KeyValue) -> Entry {
    Entry {
        key: String::from_utf8_lossy(kv.key()).into_owned(),
        value: String::from_utf8_lossy(kv.value()).into_owned(),
        version: kv.version(),
        create_revision: kv.create_revision(),
        mod_revision: kv.mod_revision(),
    }
}

#[async_trait]
impl StoreGateway for EtcdGateway {
    async fn list(&self, prefix: &str) -> GatewayResult<Vec<Entry>> {
        let prefix = effective_prefix(prefix);
        let mut client = self.client().await?;
        let response = client
            .get(prefix, Some(GetOptions::new().with_prefix()))
            .await?;
        let entries: Vec<Entry> = response.kvs().iter().map(map_kv).collect();
        debug!(prefix, count = entries.len(), "listed entries");
        Ok(entries)
    }

    async fn get(&self, key: &str) -> GatewayResult<Option<Entry>> {
        let key = require_key(key)?;
        let mut client = self.client().await?;
        let response = client.get(key, None).await?;
        Ok(response.kvs().first().map(map_kv))
    }

    async fn put(&self, key: &str, value: &str) -> GatewayResult<Entry> {
        let key = require_key(key)?;
        let mut client = self.client().await?;
        client.put(key, value, None).await?;

        // The put response does not carry version/revision metadata
        // reliably; re-read so the caller gets store-assigned numbers.
        // From here on a failure means the write may already have applied.
        let confirmed = client.get(key, None).await.map_err(|err| {
            GatewayError::PartialWrite {
                key: key.to_string(),
                reason: GatewayError::from(err).to_string(),
            }
        })?;
        match confirmed.kvs().first() {
            Some(kv) => Ok(map_kv(kv)),
            None => Err(GatewayError::PartialWrite {
                key: key.to_string(),
                reason: "key absent on confirmation read".to_string(),
            }),
        }
    }

    async fn delete(&self, key: &str) -> GatewayResult<()> {
        let key = require_key(key)?;
        let mut client = self.client().await?;
        let response = client.delete(key, None).await?;
        debug!(key, deleted = response.deleted(), "deleted key");
        Ok(())
    }
}
