//! ibm_ppc_volume_group - a volume group looked up by id or name

use async_trait::async_trait;
use ppc_core::flatten::Snapshot;
use ppc_core::provider::{ProviderResult, ResourceType};
use ppc_core::resource::Resource;
use ppc_core::schema::{AttributeSchema, AttributeType, ResourceSchema};
use serde::Serialize;

use super::{
    DataSource, VOLUME_GROUP_ID, capture, cloud_instance_id_attribute, lookup_key,
    lookup_key_attribute, remote_identifier,
};
use crate::client::InstanceClient;
use crate::client::models::{StatusDescriptionError, VolumeGroup};

pub struct VolumeGroupDataSource;

impl ResourceType for VolumeGroupDataSource {
    fn name(&self) -> &'static str {
        "ibm_ppc_volume_group"
    }

    fn schema(&self) -> ResourceSchema {
        let status_error = AttributeType::object(vec![
            AttributeSchema::new("key", AttributeType::String).computed(),
            AttributeSchema::new("message", AttributeType::String).computed(),
            AttributeSchema::new("volume_ids", AttributeType::list_of(AttributeType::String))
                .computed(),
        ]);

        ResourceSchema::new(self.name())
            .attribute(lookup_key_attribute(VOLUME_GROUP_ID, "ID or Name of the volume group"))
            .attribute(cloud_instance_id_attribute())
            .attribute(AttributeSchema::new("volume_group_name", AttributeType::String).computed())
            .attribute(AttributeSchema::new("status", AttributeType::String).computed())
            .attribute(AttributeSchema::new("replication_status", AttributeType::String).computed())
            .attribute(
                AttributeSchema::new("consistency_group_name", AttributeType::String).computed(),
            )
            .attribute(
                AttributeSchema::new(
                    "status_description_errors",
                    AttributeType::set_of(status_error),
                )
                .computed()
                    .with_description("Errors reported in the status description of the group"),
            )
    }
}

#[derive(Debug, Serialize)]
struct StatusErrorRecord {
    key: Option<String>,
    message: Option<String>,
    volume_ids: Vec<String>,
}

impl From<StatusDescriptionError> for StatusErrorRecord {
    fn from(error: StatusDescriptionError) -> Self {
        Self {
            key: error.key,
            message: error.message,
            volume_ids: error.vol_ids,
        }
    }
}

#[derive(Debug, Serialize)]
struct VolumeGroupRecord {
    volume_group_name: Option<String>,
    status: Option<String>,
    replication_status: Option<String>,
    consistency_group_name: Option<String>,
    status_description_errors: Option<Vec<StatusErrorRecord>>,
}

impl From<VolumeGroup> for VolumeGroupRecord {
    fn from(group: VolumeGroup) -> Self {
        Self {
            volume_group_name: group.name,
            status: group.status,
            replication_status: group.replication_status,
            consistency_group_name: group.consistency_group_name,
            status_description_errors: group
                .status_description
                .map(|desc| desc.errors.into_iter().map(StatusErrorRecord::from).collect()),
        }
    }
}

#[async_trait]
impl DataSource for VolumeGroupDataSource {
    async fn fetch(
        &self,
        client: InstanceClient<'_>,
        resource: &Resource,
    ) -> ProviderResult<Snapshot> {
        let group_id = lookup_key(resource, VOLUME_GROUP_ID)?;
        let group = client.get_volume_group(group_id).await?;

        let identifier = remote_identifier(group.id.as_deref(), "volume group", group_id)?;
        capture(identifier, &VolumeGroupRecord::from(group))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::fake::{FakeApi, FakeSession};
    use crate::client::models::StatusDescription;
    use crate::provider::PpcProvider;
    use ppc_core::provider::ErrorKind;
    use ppc_core::resource::Value;

    fn resource(group: &str) -> Resource {
        Resource::new("ibm_ppc_volume_group", "vg")
            .with_attribute("ppc_volume_group_id", group)
            .with_attribute("ppc_cloud_instance_id", "acct-123")
    }

    fn session(group: VolumeGroup) -> FakeSession {
        let mut api = FakeApi::default();
        api.volume_groups.insert("my-group".to_string(), group);
        FakeSession(Some(api))
    }

    #[tokio::test]
    async fn group_is_read_by_name() {
        let group = VolumeGroup {
            id: Some("vg-1".to_string()),
            name: Some("my-group".to_string()),
            status: Some("available".to_string()),
            replication_status: Some("enabled".to_string()),
            consistency_group_name: Some("rccg-1".to_string()),
            status_description: None,
        };

        let state = PpcProvider::new()
            .read_data_source(&session(group), &resource("my-group"))
            .await
            .unwrap();

        assert_eq!(state.identifier().to_string(), "vg-1");
        assert_eq!(state.get("volume_group_name"), Some(&Value::from("my-group")));
        assert_eq!(state.get("status"), Some(&Value::from("available")));
        assert_eq!(state.get("replication_status"), Some(&Value::from("enabled")));
        assert_eq!(state.get("consistency_group_name"), Some(&Value::from("rccg-1")));
        assert!(state.get("status_description_errors").is_none());
    }

    #[tokio::test]
    async fn status_errors_are_mapped() {
        let group = VolumeGroup {
            id: Some("vg-1".to_string()),
            status_description: Some(StatusDescription {
                errors: vec![StatusDescriptionError {
                    key: Some("VOLUME_GROUP_DEGRADED".to_string()),
                    message: Some("replication stopped".to_string()),
                    vol_ids: vec!["v1".to_string(), "v2".to_string()],
                }],
            }),
            ..Default::default()
        };

        let state = PpcProvider::new()
            .read_data_source(&session(group), &resource("my-group"))
            .await
            .unwrap();

        let errors = state.get("status_description_errors").unwrap().as_list().unwrap();
        assert_eq!(errors.len(), 1);
        let error = errors[0].as_map().unwrap();
        assert_eq!(error.get("key"), Some(&Value::from("VOLUME_GROUP_DEGRADED")));
        assert_eq!(error.get("message"), Some(&Value::from("replication stopped")));
        assert_eq!(
            error.get("volume_ids"),
            Some(&Value::List(vec![Value::from("v1"), Value::from("v2")]))
        );
    }

    #[tokio::test]
    async fn unknown_group_is_not_found() {
        let err = PpcProvider::new()
            .read_data_source(&session(VolumeGroup::default()), &resource("other"))
            .await
            .unwrap_err();

        assert_eq!(err.kind, ErrorKind::NotFound);
        assert!(err.message.contains("volume group other"));
        assert!(err.message.contains("acct-123"));
    }
}
