//! ibm_ppc_key - an SSH key looked up by name

use async_trait::async_trait;
use ppc_core::flatten::Snapshot;
use ppc_core::identifier::Identifier;
use ppc_core::provider::{ProviderResult, ResourceType};
use ppc_core::resource::Resource;
use ppc_core::schema::{AttributeSchema, AttributeType, ResourceSchema};
use serde::Serialize;

use super::{
    DataSource, KEY_NAME, capture, cloud_instance_id_attribute, lookup_key, lookup_key_attribute,
};
use crate::client::InstanceClient;

pub struct KeyDataSource;

impl ResourceType for KeyDataSource {
    fn name(&self) -> &'static str {
        "ibm_ppc_key"
    }

    fn schema(&self) -> ResourceSchema {
        ResourceSchema::new(self.name())
            .attribute(lookup_key_attribute(KEY_NAME, "SSH key name for a pcloud tenant"))
            .attribute(cloud_instance_id_attribute())
            .attribute(AttributeSchema::new("creation_date", AttributeType::String).computed())
            .attribute(
                AttributeSchema::new("sshkey", AttributeType::String)
                    .computed()
                    .sensitive(),
            )
    }
}

#[derive(Debug, Serialize)]
struct KeyRecord {
    creation_date: Option<String>,
    sshkey: Option<String>,
}

#[async_trait]
impl DataSource for KeyDataSource {
    async fn fetch(
        &self,
        client: InstanceClient<'_>,
        resource: &Resource,
    ) -> ProviderResult<Snapshot> {
        let key_name = lookup_key(resource, KEY_NAME)?;
        let key = client.get_key(key_name).await?;

        // Keys are identified by name; the API has no separate id
        let name = key.name.filter(|name| !name.is_empty());
        let identifier = Identifier::remote(name.as_deref().unwrap_or(key_name));
        capture(
            identifier,
            &KeyRecord {
                creation_date: key.creation_date,
                sshkey: key.ssh_key,
            },
        )
    }
}
