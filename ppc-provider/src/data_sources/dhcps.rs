//! ibm_ppc_dhcps - DHCP servers of a cloud instance

use async_trait::async_trait;
use ppc_core::flatten::Snapshot;
use ppc_core::identifier::Identifier;
use ppc_core::provider::{ProviderResult, ResourceType};
use ppc_core::resource::Resource;
use ppc_core::schema::{AttributeSchema, AttributeType, ResourceSchema};
use serde::Serialize;

use super::{DataSource, capture, cloud_instance_id_attribute};
use crate::client::InstanceClient;
use crate::client::models::DhcpServer;

pub struct DhcpsDataSource;

impl ResourceType for DhcpsDataSource {
    fn name(&self) -> &'static str {
        "ibm_ppc_dhcps"
    }

    fn schema(&self) -> ResourceSchema {
        let server = AttributeType::object(vec![
            AttributeSchema::new("dhcp_id", AttributeType::String).computed(),
            AttributeSchema::new("network_id", AttributeType::String).computed(),
            AttributeSchema::new("network_name", AttributeType::String).computed(),
            AttributeSchema::new("status", AttributeType::String).computed(),
        ]);

        ResourceSchema::new(self.name())
            .with_description("DHCP servers of a cloud instance")
            .attribute(cloud_instance_id_attribute())
            .attribute(AttributeSchema::new("servers", AttributeType::list_of(server)).computed())
    }
}

#[derive(Debug, Serialize)]
struct ServerRecord {
    dhcp_id: Option<String>,
    network_id: Option<String>,
    network_name: Option<String>,
    status: Option<String>,
}

impl From<DhcpServer> for ServerRecord {
    fn from(server: DhcpServer) -> Self {
        let network = server.network.unwrap_or_default();
        Self {
            dhcp_id: server.id,
            network_id: network.id,
            network_name: network.name,
            status: server.status,
        }
    }
}

#[derive(Debug, Serialize)]
struct DhcpsRecord {
    servers: Vec<ServerRecord>,
}

#[async_trait]
impl DataSource for DhcpsDataSource {
    async fn fetch(
        &self,
        client: InstanceClient<'_>,
        _resource: &Resource,
    ) -> ProviderResult<Snapshot> {
        let servers = client.get_all_dhcp_servers().await?;
        let record = DhcpsRecord {
            servers: servers.into_iter().map(ServerRecord::from).collect(),
        };
        capture(Identifier::synthetic(), &record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::fake::{FakeApi, FakeSession};
    use crate::client::models::DhcpServerNetwork;
    use crate::provider::PpcProvider;
    use ppc_core::resource::Value;

    fn resource() -> Resource {
        Resource::new("ibm_ppc_dhcps", "all").with_attribute("ppc_cloud_instance_id", "acct-123")
    }

    #[tokio::test]
    async fn servers_carry_their_network() {
        let session = FakeSession(Some(FakeApi {
            dhcp_servers: vec![
                DhcpServer {
                    id: Some("dhcp-1".to_string()),
                    status: Some("ACTIVE".to_string()),
                    network: Some(DhcpServerNetwork {
                        id: Some("nw-1".to_string()),
                        name: Some("DHCPSERVER_private".to_string()),
                    }),
                },
                DhcpServer {
                    id: Some("dhcp-2".to_string()),
                    status: Some("BUILD".to_string()),
                    network: None,
                },
            ],
            ..Default::default()
        }));

        let state = PpcProvider::new().read_data_source(&session, &resource()).await.unwrap();

        let servers = state.get("servers").unwrap().as_list().unwrap();
        assert_eq!(servers.len(), 2);

        let first = servers[0].as_map().unwrap();
        assert_eq!(first.get("dhcp_id"), Some(&Value::from("dhcp-1")));
        assert_eq!(first.get("network_id"), Some(&Value::from("nw-1")));
        assert_eq!(first.get("network_name"), Some(&Value::from("DHCPSERVER_private")));

        let second = servers[1].as_map().unwrap();
        assert_eq!(second.get("status"), Some(&Value::from("BUILD")));
        assert!(!second.contains_key("network_id"));
    }

    #[tokio::test]
    async fn no_servers_is_an_empty_list() {
        let session = FakeSession(Some(FakeApi::default()));
        let state = PpcProvider::new().read_data_source(&session, &resource()).await.unwrap();

        assert!(state.identifier().is_synthetic());
        assert_eq!(state.get("servers"), Some(&Value::List(vec![])));
    }
}
