//! ibm_ppc_network_port - all ports of a network

use async_trait::async_trait;
use log::debug;
use ppc_core::flatten::Snapshot;
use ppc_core::identifier::Identifier;
use ppc_core::provider::{ProviderResult, ResourceType};
use ppc_core::resource::Resource;
use ppc_core::schema::{AttributeSchema, AttributeType, ResourceSchema};
use serde::Serialize;

use super::{
    DataSource, NETWORK_NAME, capture, cloud_instance_id_attribute, lookup_key,
    lookup_key_attribute,
};
use crate::client::InstanceClient;
use crate::client::models::NetworkPort;

pub struct NetworkPortDataSource;

impl ResourceType for NetworkPortDataSource {
    fn name(&self) -> &'static str {
        "ibm_ppc_network_port"
    }

    fn schema(&self) -> ResourceSchema {
        let port = AttributeType::object(vec![
            AttributeSchema::new("ipaddress", AttributeType::String).optional_computed(),
            AttributeSchema::new("macaddress", AttributeType::String).computed(),
            AttributeSchema::new("portid", AttributeType::String).computed(),
            AttributeSchema::new("status", AttributeType::String).computed(),
            AttributeSchema::new("href", AttributeType::String).computed(),
            AttributeSchema::new("description", AttributeType::String).computed(),
            AttributeSchema::new("public_ip", AttributeType::String).computed(),
        ]);

        ResourceSchema::new(self.name())
            .attribute(lookup_key_attribute(
                NETWORK_NAME,
                "Network Name to be used for pvminstances",
            ))
            .attribute(cloud_instance_id_attribute())
            .attribute(
                AttributeSchema::new("network_ports", AttributeType::list_of(port)).computed(),
            )
    }
}

#[derive(Debug, Serialize)]
struct PortRecord {
    ipaddress: Option<String>,
    macaddress: Option<String>,
    portid: Option<String>,
    status: Option<String>,
    href: Option<String>,
    description: Option<String>,
    public_ip: Option<String>,
}

impl From<NetworkPort> for PortRecord {
    fn from(port: NetworkPort) -> Self {
        Self {
            ipaddress: port.ip_address,
            macaddress: port.mac_address,
            portid: port.port_id,
            status: port.status,
            href: port.href,
            description: port.description,
            public_ip: port.external_ip,
        }
    }
}

#[derive(Debug, Serialize)]
struct NetworkPortsRecord {
    network_ports: Vec<PortRecord>,
}

#[async_trait]
impl DataSource for NetworkPortDataSource {
    async fn fetch(
        &self,
        client: InstanceClient<'_>,
        resource: &Resource,
    ) -> ProviderResult<Snapshot> {
        let network_name = lookup_key(resource, NETWORK_NAME)?;
        let ports = client.get_all_ports(network_name).await?;
        debug!("Network {} has {} ports", network_name, ports.ports.len());

        let record = NetworkPortsRecord {
            network_ports: ports.ports.into_iter().map(PortRecord::from).collect(),
        };
        capture(Identifier::synthetic(), &record)
    }
}
