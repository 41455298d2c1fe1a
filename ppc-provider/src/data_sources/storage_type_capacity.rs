//! ibm_ppc_storage_type_capacity - capacity of one storage type

use async_trait::async_trait;
use ppc_core::flatten::Snapshot;
use ppc_core::identifier::Identifier;
use ppc_core::provider::{ProviderResult, ResourceType};
use ppc_core::resource::Resource;
use ppc_core::schema::{AttributeSchema, AttributeType, ResourceSchema};
use serde::Serialize;

use super::{
    DataSource, STORAGE_TYPE, capture, cloud_instance_id_attribute, lookup_key,
    lookup_key_attribute,
};
use crate::client::InstanceClient;
use crate::client::models::{MaximumStorageAllocation, StoragePoolCapacity, StorageTypeCapacity};

pub struct StorageTypeCapacityDataSource;

impl ResourceType for StorageTypeCapacityDataSource {
    fn name(&self) -> &'static str {
        "ibm_ppc_storage_type_capacity"
    }

    fn schema(&self) -> ResourceSchema {
        let maximum = AttributeType::object(vec![
            AttributeSchema::new("max_allocation_size", AttributeType::Int).computed(),
            AttributeSchema::new("storage_pool", AttributeType::String).computed(),
            AttributeSchema::new("storage_type", AttributeType::String).computed(),
        ]);
        let pool = AttributeType::object(vec![
            AttributeSchema::new("max_allocation_size", AttributeType::Int).computed(),
            AttributeSchema::new("pool_name", AttributeType::String).computed(),
            AttributeSchema::new("storage_type", AttributeType::String).computed(),
            AttributeSchema::new("total_capacity", AttributeType::Int).computed(),
        ]);

        ResourceSchema::new(self.name())
            .attribute(lookup_key_attribute(STORAGE_TYPE, "Storage type name"))
            .attribute(cloud_instance_id_attribute())
            .attribute(
                AttributeSchema::new("maximum_storage_allocation", maximum)
                    .computed()
                    .with_description("Largest single allocation possible for the storage type"),
            )
            .attribute(
                AttributeSchema::new("storage_pools_capacity", AttributeType::list_of(pool))
                    .computed(),
            )
    }
}

#[derive(Debug, Serialize)]
struct MaximumRecord {
    max_allocation_size: Option<i64>,
    storage_pool: Option<String>,
    storage_type: Option<String>,
}

impl From<MaximumStorageAllocation> for MaximumRecord {
    fn from(max: MaximumStorageAllocation) -> Self {
        Self {
            max_allocation_size: max.max_allocation_size,
            storage_pool: max.storage_pool,
            storage_type: max.storage_type,
        }
    }
}

#[derive(Debug, Serialize)]
struct PoolRecord {
    max_allocation_size: Option<i64>,
    pool_name: Option<String>,
    storage_type: Option<String>,
    total_capacity: Option<i64>,
}

impl From<StoragePoolCapacity> for PoolRecord {
    fn from(pool: StoragePoolCapacity) -> Self {
        Self {
            max_allocation_size: pool.max_allocation_size,
            pool_name: pool.pool_name,
            storage_type: pool.storage_type,
            total_capacity: pool.total_capacity,
        }
    }
}

#[derive(Debug, Serialize)]
struct CapacityRecord {
    maximum_storage_allocation: Option<MaximumRecord>,
    storage_pools_capacity: Vec<PoolRecord>,
}

impl From<StorageTypeCapacity> for CapacityRecord {
    fn from(capacity: StorageTypeCapacity) -> Self {
        Self {
            maximum_storage_allocation: capacity
                .maximum_storage_allocation
                .map(MaximumRecord::from),
            storage_pools_capacity: capacity
                .storage_pools_capacity
                .into_iter()
                .map(PoolRecord::from)
                .collect(),
        }
    }
}

#[async_trait]
impl DataSource for StorageTypeCapacityDataSource {
    async fn fetch(
        &self,
        client: InstanceClient<'_>,
        resource: &Resource,
    ) -> ProviderResult<Snapshot> {
        let storage_type = lookup_key(resource, STORAGE_TYPE)?;
        let capacity = client.get_storage_type_capacity(storage_type).await?;

        // The storage type name is the identity of this read
        capture(Identifier::remote(storage_type), &CapacityRecord::from(capacity))
    }
}
