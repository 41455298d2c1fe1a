//! ibm_ppc_network - a network looked up by name

use async_trait::async_trait;
use ppc_core::flatten::Snapshot;
use ppc_core::provider::{ProviderResult, ResourceType};
use ppc_core::resource::Resource;
use ppc_core::schema::{AttributeSchema, AttributeType, ResourceSchema};
use serde::Serialize;

use super::{
    DataSource, NETWORK_NAME, capture, cloud_instance_id_attribute, lookup_key,
    lookup_key_attribute, remote_identifier,
};
use crate::client::InstanceClient;
use crate::client::models::Network;

pub struct NetworkDataSource;

impl ResourceType for NetworkDataSource {
    fn name(&self) -> &'static str {
        "ibm_ppc_network"
    }

    fn schema(&self) -> ResourceSchema {
        ResourceSchema::new(self.name())
            .with_description("Network of a cloud instance")
            .attribute(lookup_key_attribute(
                NETWORK_NAME,
                "Network Name to be used for pvminstances",
            ))
            .attribute(cloud_instance_id_attribute())
            .attribute(AttributeSchema::new("cidr", AttributeType::String).computed())
            .attribute(AttributeSchema::new("type", AttributeType::String).computed())
            .attribute(AttributeSchema::new("vlan_id", AttributeType::Int).computed())
            .attribute(AttributeSchema::new("gateway", AttributeType::String).computed())
            .attribute(AttributeSchema::new("available_ip_count", AttributeType::Float).computed())
            .attribute(AttributeSchema::new("used_ip_count", AttributeType::Float).computed())
            .attribute(AttributeSchema::new("used_ip_percent", AttributeType::Float).computed())
            .attribute(
                AttributeSchema::new("name", AttributeType::String)
                    .computed()
                    .deprecated(format!("This value is deprecated in favor of {}", NETWORK_NAME)),
            )
            .attribute(
                AttributeSchema::new("dns", AttributeType::set_of(AttributeType::String))
                    .computed(),
            )
            .attribute(AttributeSchema::new("jumbo", AttributeType::Bool).computed())
    }
}

#[derive(Debug, Serialize)]
struct NetworkRecord {
    cidr: Option<String>,
    #[serde(rename = "type")]
    network_type: Option<String>,
    vlan_id: Option<i64>,
    gateway: Option<String>,
    available_ip_count: Option<f64>,
    used_ip_count: Option<f64>,
    used_ip_percent: Option<f64>,
    name: Option<String>,
    dns: Option<Vec<String>>,
    jumbo: Option<bool>,
}

impl From<Network> for NetworkRecord {
    fn from(network: Network) -> Self {
        let metrics = network.ip_address_metrics.unwrap_or_default();
        Self {
            cidr: network.cidr,
            network_type: network.network_type,
            vlan_id: network.vlan_id,
            gateway: network.gateway,
            available_ip_count: metrics.available,
            used_ip_count: metrics.used,
            used_ip_percent: metrics.utilization,
            name: network.name,
            // An empty server list is reported as unset
            dns: Some(network.dns_servers).filter(|dns| !dns.is_empty()),
            jumbo: network.jumbo,
        }
    }
}

#[async_trait]
impl DataSource for NetworkDataSource {
    async fn fetch(
        &self,
        client: InstanceClient<'_>,
        resource: &Resource,
    ) -> ProviderResult<Snapshot> {
        let network_name = lookup_key(resource, NETWORK_NAME)?;
        let network = client.get_network(network_name).await?;

        let identifier = remote_identifier(network.network_id.as_deref(), "network", network_name)?;
        capture(identifier, &NetworkRecord::from(network))
    }
}
