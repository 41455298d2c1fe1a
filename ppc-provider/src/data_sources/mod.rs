//! Data source definitions
//!
//! Each data source declares its schema and performs exactly one remote
//! call, describing the result as a typed record. Session handling,
//! configuration validation and flattening live in `PpcProvider`.

pub mod dhcps;
pub mod images;
pub mod instance_volumes;
pub mod key;
pub mod network;
pub mod network_port;
pub mod public_network;
pub mod storage_type_capacity;
pub mod volume_group;

use async_trait::async_trait;
use ppc_core::flatten::Snapshot;
use ppc_core::identifier::Identifier;
use ppc_core::provider::{ProviderError, ProviderResult, ResourceType};
use ppc_core::resource::Resource;
use ppc_core::schema::{AttributeSchema, types};
use serde::Serialize;

use crate::client::InstanceClient;

// =============================================================================
// Attribute names shared across data sources
// =============================================================================

pub const CLOUD_INSTANCE_ID: &str = "ppc_cloud_instance_id";
pub const NETWORK_NAME: &str = "ppc_network_name";
pub const INSTANCE_NAME: &str = "ppc_instance_name";
pub const KEY_NAME: &str = "ppc_key_name";
pub const VOLUME_GROUP_ID: &str = "ppc_volume_group_id";
pub const STORAGE_TYPE: &str = "ppc_storage_type";

/// A readable data source
#[async_trait]
pub trait DataSource: ResourceType {
    /// Perform the remote read for an already validated configuration
    ///
    /// The returned snapshot carries the identifier and the typed record;
    /// the caller flattens it against the registered schema.
    async fn fetch(
        &self,
        client: InstanceClient<'_>,
        resource: &Resource,
    ) -> ProviderResult<Snapshot>;
}

/// Returns all data sources supported by this provider
pub fn all() -> Vec<Box<dyn DataSource>> {
    vec![
        Box::new(network::NetworkDataSource),
        Box::new(public_network::PublicNetworkDataSource),
        Box::new(network_port::NetworkPortDataSource),
        Box::new(instance_volumes::InstanceVolumesDataSource),
        Box::new(volume_group::VolumeGroupDataSource),
        Box::new(key::KeyDataSource),
        Box::new(images::ImagesDataSource),
        Box::new(dhcps::DhcpsDataSource),
        Box::new(storage_type_capacity::StorageTypeCapacityDataSource),
    ]
}

/// The cloud instance id every data source is scoped by
pub fn cloud_instance_id_attribute() -> AttributeSchema {
    AttributeSchema::new(CLOUD_INSTANCE_ID, types::non_empty_string())
        .required()
        .with_description("Cloud instance the lookup is scoped to")
}

/// Required, non-empty lookup key
pub fn lookup_key_attribute(name: &str, description: &str) -> AttributeSchema {
    AttributeSchema::new(name, types::non_empty_string())
        .required()
        .with_description(description)
}

/// Read a configured lookup key
pub fn lookup_key<'a>(resource: &'a Resource, name: &str) -> ProviderResult<&'a str> {
    resource.get_string(name).ok_or_else(|| {
        ProviderError::invalid_config(format!("Attribute '{}' must be set", name))
    })
}

/// Identifier of an entity, taken from the remote object's own id
pub fn remote_identifier(id: Option<&str>, what: &str, key: &str) -> ProviderResult<Identifier> {
    id.filter(|id| !id.is_empty())
        .map(Identifier::remote)
        .ok_or_else(|| {
            ProviderError::invalid_response(format!("Response for {} '{}' has no id", what, key))
        })
}

/// Capture a typed record under `identifier`
pub fn capture<T: Serialize>(identifier: Identifier, record: &T) -> ProviderResult<Snapshot> {
    Ok(Snapshot::capture(identifier, record)?)
}
