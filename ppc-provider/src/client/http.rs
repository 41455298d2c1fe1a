//! HTTP implementation of the Power Systems cloud API client

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use ppc_core::provider::{ProviderError, ProviderResult};
use reqwest::Client;
use serde::de::DeserializeOwned;

use super::models::*;
use super::{ClientError, ClientResult, ClientSession, PpcApi};
use crate::config::{ConnectionSettings, ProviderConfig};

/// Power Systems cloud API client
pub struct PpcHttpClient {
    client: Client,
    base_url: String,
    token: String,
}

impl PpcHttpClient {
    /// Create a new client
    ///
    /// # Arguments
    /// * `base_url` - API endpoint (e.g., "https://us-south.power-iaas.cloud.ibm.com")
    /// * `token` - bearer token for authentication
    /// * `timeout` - per-request timeout
    pub fn new(base_url: &str, token: &str, timeout: Duration) -> ClientResult<Self> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
        })
    }

    pub fn from_settings(settings: &ConnectionSettings) -> ClientResult<Self> {
        Self::new(&settings.endpoint, &settings.api_token, settings.timeout)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn instance_url(&self, cloud_instance_id: &str, path: &str) -> String {
        format!(
            "{}/pcloud/v1/cloud-instances/{}/{}",
            self.base_url,
            urlencoding::encode(cloud_instance_id),
            path
        )
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> ClientResult<T> {
        debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .bearer_auth(&self.token)
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = response.status();
        if status == 404 {
            return Err(ClientError::NotFound(url.to_string()));
        }
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|e| format!("<failed to read response body: {}>", e));
            return Err(ClientError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let text = response.text().await?;
        serde_json::from_str(&text).map_err(|e| {
            ClientError::Decode(format!(
                "{} - Response (first 500 chars): {}",
                e,
                text.chars().take(500).collect::<String>()
            ))
        })
    }
}

#[async_trait]
impl PpcApi for PpcHttpClient {
    async fn get_network(&self, cloud_instance_id: &str, network: &str) -> ClientResult<Network> {
        let url = self.instance_url(
            cloud_instance_id,
            &format!("networks/{}", urlencoding::encode(network)),
        );
        self.get_json(&url).await
    }

    async fn get_all_public_networks(&self, cloud_instance_id: &str) -> ClientResult<Networks> {
        let url = self.instance_url(cloud_instance_id, "networks?filter=type:pub-vlan");
        self.get_json(&url).await
    }

    async fn get_all_ports(
        &self,
        cloud_instance_id: &str,
        network: &str,
    ) -> ClientResult<NetworkPorts> {
        let url = self.instance_url(
            cloud_instance_id,
            &format!("networks/{}/ports", urlencoding::encode(network)),
        );
        self.get_json(&url).await
    }

    async fn get_all_instance_volumes(
        &self,
        cloud_instance_id: &str,
        instance: &str,
    ) -> ClientResult<Volumes> {
        let url = self.instance_url(
            cloud_instance_id,
            &format!("pvm-instances/{}/volumes", urlencoding::encode(instance)),
        );
        self.get_json(&url).await
    }

    async fn get_volume_group(
        &self,
        cloud_instance_id: &str,
        volume_group: &str,
    ) -> ClientResult<VolumeGroup> {
        let url = self.instance_url(
            cloud_instance_id,
            &format!("volume-groups/{}", urlencoding::encode(volume_group)),
        );
        self.get_json(&url).await
    }

    async fn get_key(&self, cloud_instance_id: &str, key_name: &str) -> ClientResult<SshKey> {
        let url = self.instance_url(
            cloud_instance_id,
            &format!("sshkeys/{}", urlencoding::encode(key_name)),
        );
        self.get_json(&url).await
    }

    async fn get_all_images(&self, cloud_instance_id: &str) -> ClientResult<Images> {
        let url = self.instance_url(cloud_instance_id, "images");
        self.get_json(&url).await
    }

    async fn get_all_dhcp_servers(&self, cloud_instance_id: &str) -> ClientResult<Vec<DhcpServer>> {
        let url = self.instance_url(cloud_instance_id, "services/dhcp");
        self.get_json(&url).await
    }

    async fn get_storage_type_capacity(
        &self,
        cloud_instance_id: &str,
        storage_type: &str,
    ) -> ClientResult<StorageTypeCapacity> {
        let url = self.instance_url(
            cloud_instance_id,
            &format!("storage-capacity/storage-types/{}", urlencoding::encode(storage_type)),
        );
        self.get_json(&url).await
    }
}

/// Session backed by `PpcHttpClient`
///
/// Built once from the provider configuration. A configuration that
/// cannot be resolved still yields a session, but every read through it
/// fails with the kind of the resolution error and that error as cause.
pub struct HttpSession {
    client: Result<PpcHttpClient, Arc<ProviderError>>,
}

impl HttpSession {
    pub fn new(settings: ProviderResult<ConnectionSettings>) -> Self {
        let client = settings.and_then(|s| {
            PpcHttpClient::from_settings(&s).map_err(|e| {
                ProviderError::session(format!("Failed to build HTTP client: {}", e))
                    .with_cause(e)
            })
        });
        Self {
            client: client.map_err(Arc::new),
        }
    }

    /// Resolve `config` (with environment fallback) and open a session
    pub fn from_config(config: &ProviderConfig) -> Self {
        Self::new(config.resolve())
    }

    pub fn with_client(client: PpcHttpClient) -> Self {
        Self { client: Ok(client) }
    }
}

impl ClientSession for HttpSession {
    fn ppc_api(&self) -> ProviderResult<&dyn PpcApi> {
        match &self.client {
            Ok(client) => Ok(client as &dyn PpcApi),
            Err(reason) => Err(ProviderError::new(
                reason.kind,
                format!("Power Systems session unavailable: {}", reason.message),
            )
            .with_cause(Arc::clone(reason))),
        }
    }
}
