//! Power Systems cloud API client
//!
//! - `PpcApi` - one method per remote operation the data sources use
//! - `InstanceClient` - a `PpcApi` scoped to one cloud instance
//! - `ClientSession` - host-provided access to a `PpcApi`
//! - `http` - reqwest implementation of `PpcApi`

pub mod http;
pub mod models;

use async_trait::async_trait;
use ppc_core::provider::{ProviderError, ProviderResult};
use thiserror::Error;

use models::*;

/// Errors returned by the API client
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport failure
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status
    #[error("API error: {status} - {body}")]
    Api { status: u16, body: String },

    /// The API answered 404
    #[error("Not found: {0}")]
    NotFound(String),

    /// The response body did not match the expected model
    #[error("Failed to decode response: {0}")]
    Decode(String),
}

pub type ClientResult<T> = Result<T, ClientError>;

/// Remote operations, each scoped by cloud instance id
#[async_trait]
pub trait PpcApi: Send + Sync {
    async fn get_network(&self, cloud_instance_id: &str, network: &str) -> ClientResult<Network>;

    async fn get_all_public_networks(&self, cloud_instance_id: &str) -> ClientResult<Networks>;

    async fn get_all_ports(
        &self,
        cloud_instance_id: &str,
        network: &str,
    ) -> ClientResult<NetworkPorts>;

    async fn get_all_instance_volumes(
        &self,
        cloud_instance_id: &str,
        instance: &str,
    ) -> ClientResult<Volumes>;

    async fn get_volume_group(
        &self,
        cloud_instance_id: &str,
        volume_group: &str,
    ) -> ClientResult<VolumeGroup>;

    async fn get_key(&self, cloud_instance_id: &str, key_name: &str) -> ClientResult<SshKey>;

    async fn get_all_images(&self, cloud_instance_id: &str) -> ClientResult<Images>;

    async fn get_all_dhcp_servers(&self, cloud_instance_id: &str) -> ClientResult<Vec<DhcpServer>>;

    async fn get_storage_type_capacity(
        &self,
        cloud_instance_id: &str,
        storage_type: &str,
    ) -> ClientResult<StorageTypeCapacity>;
}

/// Host-provided session
///
/// Passed explicitly to every read. Implementations must fail with a
/// session error when no authenticated client is available.
pub trait ClientSession: Send + Sync {
    fn ppc_api(&self) -> ProviderResult<&dyn PpcApi>;
}

/// API client scoped to one cloud instance
#[derive(Clone, Copy)]
pub struct InstanceClient<'a> {
    api: &'a dyn PpcApi,
    cloud_instance_id: &'a str,
}

impl<'a> InstanceClient<'a> {
    /// Scope the session's client to `cloud_instance_id`
    pub fn new(session: &'a dyn ClientSession, cloud_instance_id: &'a str) -> ProviderResult<Self> {
        Ok(Self {
            api: session.ppc_api()?,
            cloud_instance_id,
        })
    }

    pub fn cloud_instance_id(&self) -> &'a str {
        self.cloud_instance_id
    }

    pub async fn get_network(&self, network: &str) -> ProviderResult<Network> {
        self.api
            .get_network(self.cloud_instance_id, network)
            .await
            .map_err(|e| self.remote_error("network", network, e))
    }

    pub async fn get_all_public_networks(&self) -> ProviderResult<Networks> {
        self.api
            .get_all_public_networks(self.cloud_instance_id)
            .await
            .map_err(|e| self.remote_error("public networks", "", e))
    }

    pub async fn get_all_ports(&self, network: &str) -> ProviderResult<NetworkPorts> {
        self.api
            .get_all_ports(self.cloud_instance_id, network)
            .await
            .map_err(|e| self.remote_error("ports of network", network, e))
    }

    pub async fn get_all_instance_volumes(&self, instance: &str) -> ProviderResult<Volumes> {
        self.api
            .get_all_instance_volumes(self.cloud_instance_id, instance)
            .await
            .map_err(|e| self.remote_error("volumes of instance", instance, e))
    }

    pub async fn get_volume_group(&self, volume_group: &str) -> ProviderResult<VolumeGroup> {
        self.api
            .get_volume_group(self.cloud_instance_id, volume_group)
            .await
            .map_err(|e| self.remote_error("volume group", volume_group, e))
    }

    pub async fn get_key(&self, key_name: &str) -> ProviderResult<SshKey> {
        self.api
            .get_key(self.cloud_instance_id, key_name)
            .await
            .map_err(|e| self.remote_error("key", key_name, e))
    }

    pub async fn get_all_images(&self) -> ProviderResult<Images> {
        self.api
            .get_all_images(self.cloud_instance_id)
            .await
            .map_err(|e| self.remote_error("images", "", e))
    }

    pub async fn get_all_dhcp_servers(&self) -> ProviderResult<Vec<DhcpServer>> {
        self.api
            .get_all_dhcp_servers(self.cloud_instance_id)
            .await
            .map_err(|e| self.remote_error("DHCP servers", "", e))
    }

    pub async fn get_storage_type_capacity(
        &self,
        storage_type: &str,
    ) -> ProviderResult<StorageTypeCapacity> {
        self.api
            .get_storage_type_capacity(self.cloud_instance_id, storage_type)
            .await
            .map_err(|e| self.remote_error("capacity of storage type", storage_type, e))
    }

    /// Surface a client error verbatim, naming what was looked up
    fn remote_error(&self, what: &str, key: &str, err: ClientError) -> ProviderError {
        let target = if key.is_empty() {
            what.to_string()
        } else {
            format!("{} {}", what, key)
        };
        let message = format!(
            "Failed to get {} in cloud instance {}: {}",
            target, self.cloud_instance_id, err
        );
        let error = match err {
            ClientError::NotFound(_) => ProviderError::not_found(message),
            _ => ProviderError::remote_api(message),
        };
        error.with_cause(err)
    }
}

#[cfg(test)]
pub(crate) mod fake {
    //! In-memory `PpcApi` for data source tests

    use std::collections::HashMap;
    use std::sync::Mutex;

    use super::*;

    /// Canned responses keyed by lookup key, plus a call log
    #[derive(Default)]
    pub struct FakeApi {
        pub networks: HashMap<String, Network>,
        pub public_networks: Networks,
        pub ports: HashMap<String, NetworkPorts>,
        pub volumes: HashMap<String, Volumes>,
        pub volume_groups: HashMap<String, VolumeGroup>,
        pub keys: HashMap<String, SshKey>,
        pub images: Images,
        pub dhcp_servers: Vec<DhcpServer>,
        pub capacities: HashMap<String, StorageTypeCapacity>,
        /// When set, every call fails with this status
        pub fail_with: Option<u16>,
        pub calls: Mutex<Vec<String>>,
    }

    impl FakeApi {
        fn record(&self, call: String) -> ClientResult<()> {
            self.calls.lock().unwrap().push(call);
            match self.fail_with {
                Some(status) => Err(ClientError::Api {
                    status,
                    body: "boom".to_string(),
                }),
                None => Ok(()),
            }
        }

        pub fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    fn lookup<T: Clone>(map: &HashMap<String, T>, key: &str) -> ClientResult<T> {
        map.get(key)
            .cloned()
            .ok_or_else(|| ClientError::NotFound(key.to_string()))
    }

    #[async_trait]
    impl PpcApi for FakeApi {
        async fn get_network(&self, cid: &str, network: &str) -> ClientResult<Network> {
            self.record(format!("get_network {} {}", cid, network))?;
            lookup(&self.networks, network)
        }

        async fn get_all_public_networks(&self, cid: &str) -> ClientResult<Networks> {
            self.record(format!("get_all_public_networks {}", cid))?;
            Ok(self.public_networks.clone())
        }

        async fn get_all_ports(&self, cid: &str, network: &str) -> ClientResult<NetworkPorts> {
            self.record(format!("get_all_ports {} {}", cid, network))?;
            lookup(&self.ports, network)
        }

        async fn get_all_instance_volumes(
            &self,
            cid: &str,
            instance: &str,
        ) -> ClientResult<Volumes> {
            self.record(format!("get_all_instance_volumes {} {}", cid, instance))?;
            lookup(&self.volumes, instance)
        }

        async fn get_volume_group(
            &self,
            cid: &str,
            volume_group: &str,
        ) -> ClientResult<VolumeGroup> {
            self.record(format!("get_volume_group {} {}", cid, volume_group))?;
            lookup(&self.volume_groups, volume_group)
        }

        async fn get_key(&self, cid: &str, key_name: &str) -> ClientResult<SshKey> {
            self.record(format!("get_key {} {}", cid, key_name))?;
            lookup(&self.keys, key_name)
        }

        async fn get_all_images(&self, cid: &str) -> ClientResult<Images> {
            self.record(format!("get_all_images {}", cid))?;
            Ok(self.images.clone())
        }

        async fn get_all_dhcp_servers(&self, cid: &str) -> ClientResult<Vec<DhcpServer>> {
            self.record(format!("get_all_dhcp_servers {}", cid))?;
            Ok(self.dhcp_servers.clone())
        }

        async fn get_storage_type_capacity(
            &self,
            cid: &str,
            storage_type: &str,
        ) -> ClientResult<StorageTypeCapacity> {
            self.record(format!("get_storage_type_capacity {} {}", cid, storage_type))?;
            lookup(&self.capacities, storage_type)
        }
    }

    /// Session handing out a `FakeApi`, or none at all
    pub struct FakeSession(pub Option<FakeApi>);

    impl ClientSession for FakeSession {
        fn ppc_api(&self) -> ProviderResult<&dyn PpcApi> {
            self.0
                .as_ref()
                .map(|api| api as &dyn PpcApi)
                .ok_or_else(|| ProviderError::session("No Power Systems session configured"))
        }
    }
}
