//! ibm_ppc_public_network - the public network of a cloud instance

use async_trait::async_trait;
use ppc_core::flatten::Snapshot;
use ppc_core::provider::{ProviderError, ProviderResult, ResourceType};
use ppc_core::resource::Resource;
use ppc_core::schema::{AttributeSchema, AttributeType, ResourceSchema};
use serde::Serialize;

use super::{DataSource, capture, cloud_instance_id_attribute, remote_identifier};
use crate::client::InstanceClient;

pub struct PublicNetworkDataSource;

impl ResourceType for PublicNetworkDataSource {
    fn name(&self) -> &'static str {
        "ibm_ppc_public_network"
    }

    fn schema(&self) -> ResourceSchema {
        ResourceSchema::new(self.name())
            .attribute(cloud_instance_id_attribute())
            .attribute(AttributeSchema::new("name", AttributeType::String).computed())
            .attribute(AttributeSchema::new("type", AttributeType::String).computed())
            .attribute(AttributeSchema::new("vlan_id", AttributeType::Int).computed())
    }
}

#[derive(Debug, Serialize)]
struct PublicNetworkRecord {
    name: Option<String>,
    #[serde(rename = "type")]
    network_type: Option<String>,
    vlan_id: Option<i64>,
}

#[async_trait]
impl DataSource for PublicNetworkDataSource {
    async fn fetch(
        &self,
        client: InstanceClient<'_>,
        _resource: &Resource,
    ) -> ProviderResult<Snapshot> {
        let networks = client.get_all_public_networks().await?;

        let Some(network) = networks.networks.into_iter().next() else {
            return Err(ProviderError::not_found(format!(
                "Error getting public network or no public network found in {}",
                client.cloud_instance_id()
            )));
        };

        let identifier = remote_identifier(
            network.network_id.as_deref(),
            "public network in cloud instance",
            client.cloud_instance_id(),
        )?;
        capture(
            identifier,
            &PublicNetworkRecord {
                name: network.name,
                network_type: network.network_type,
                vlan_id: network.vlan_id,
            },
        )
    }
}
