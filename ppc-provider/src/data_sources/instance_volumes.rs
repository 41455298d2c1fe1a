//! ibm_ppc_instance_volumes - volumes attached to a PVM instance

use async_trait::async_trait;
use log::debug;
use ppc_core::flatten::Snapshot;
use ppc_core::identifier::Identifier;
use ppc_core::provider::{ProviderResult, ResourceType};
use ppc_core::resource::Resource;
use ppc_core::schema::{AttributeSchema, AttributeType, ResourceSchema};
use serde::Serialize;

use super::{
    DataSource, INSTANCE_NAME, capture, cloud_instance_id_attribute, lookup_key,
    lookup_key_attribute,
};
use crate::client::InstanceClient;
use crate::client::models::{VolumeReference, Volumes};

pub struct InstanceVolumesDataSource;

impl ResourceType for InstanceVolumesDataSource {
    fn name(&self) -> &'static str {
        "ibm_ppc_instance_volumes"
    }

    fn schema(&self) -> ResourceSchema {
        let volume = AttributeType::object(vec![
            AttributeSchema::new("id", AttributeType::String).computed(),
            AttributeSchema::new("size", AttributeType::Float).computed(),
            AttributeSchema::new("href", AttributeType::String).computed(),
            AttributeSchema::new("name", AttributeType::String).computed(),
            AttributeSchema::new("state", AttributeType::String).computed(),
            AttributeSchema::new("type", AttributeType::String).computed(),
            AttributeSchema::new("pool", AttributeType::String).computed(),
            AttributeSchema::new("shareable", AttributeType::Bool).computed(),
            AttributeSchema::new("bootable", AttributeType::Bool).computed(),
        ]);

        ResourceSchema::new(self.name())
            .with_description("Volumes attached to a PVM instance")
            .attribute(lookup_key_attribute(
                INSTANCE_NAME,
                "Instance Name to be used for pvminstances",
            ))
            .attribute(cloud_instance_id_attribute())
            .attribute(
                AttributeSchema::new("boot_volume_id", AttributeType::String)
                    .computed()
                    .with_description("Id of the first volume reported for the instance"),
            )
            .attribute(
                AttributeSchema::new("instance_volumes", AttributeType::list_of(volume))
                    .computed(),
            )
    }
}

#[derive(Debug, Serialize)]
struct VolumeRecord {
    id: Option<String>,
    size: Option<f64>,
    href: Option<String>,
    name: Option<String>,
    state: Option<String>,
    #[serde(rename = "type")]
    disk_type: Option<String>,
    pool: Option<String>,
    shareable: Option<bool>,
    bootable: Option<bool>,
}

impl From<VolumeReference> for VolumeRecord {
    fn from(volume: VolumeReference) -> Self {
        Self {
            id: volume.volume_id,
            size: volume.size,
            href: volume.href,
            name: volume.name,
            state: volume.state,
            disk_type: volume.disk_type,
            pool: volume.volume_pool,
            shareable: volume.shareable,
            bootable: volume.bootable,
        }
    }
}

#[derive(Debug, Serialize)]
struct InstanceVolumesRecord {
    boot_volume_id: Option<String>,
    instance_volumes: Vec<VolumeRecord>,
}

impl From<Volumes> for InstanceVolumesRecord {
    fn from(volumes: Volumes) -> Self {
        // The API lists the boot volume first
        let boot_volume_id = volumes.volumes.first().and_then(|v| v.volume_id.clone());
        Self {
            boot_volume_id,
            instance_volumes: volumes.volumes.into_iter().map(VolumeRecord::from).collect(),
        }
    }
}

#[async_trait]
impl DataSource for InstanceVolumesDataSource {
    async fn fetch(
        &self,
        client: InstanceClient<'_>,
        resource: &Resource,
    ) -> ProviderResult<Snapshot> {
        let instance_name = lookup_key(resource, INSTANCE_NAME)?;
        let volumes = client.get_all_instance_volumes(instance_name).await?;
        debug!("Instance {} has {} volumes", instance_name, volumes.volumes.len());

        capture(Identifier::synthetic(), &InstanceVolumesRecord::from(volumes))
    }
}
