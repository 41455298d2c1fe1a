//! ibm_ppc_images - images available in a cloud instance

use async_trait::async_trait;
use ppc_core::flatten::Snapshot;
use ppc_core::identifier::Identifier;
use ppc_core::provider::{ProviderResult, ResourceType};
use ppc_core::resource::Resource;
use ppc_core::schema::{AttributeSchema, AttributeType, ResourceSchema};
use serde::Serialize;

use super::{DataSource, capture, cloud_instance_id_attribute};
use crate::client::InstanceClient;
use crate::client::models::ImageReference;

pub struct ImagesDataSource;

impl ResourceType for ImagesDataSource {
    fn name(&self) -> &'static str {
        "ibm_ppc_images"
    }

    fn schema(&self) -> ResourceSchema {
        let image = AttributeType::object(vec![
            AttributeSchema::new("id", AttributeType::String).computed(),
            AttributeSchema::new("name", AttributeType::String).computed(),
            AttributeSchema::new("href", AttributeType::String).computed(),
            AttributeSchema::new("state", AttributeType::String).computed(),
            AttributeSchema::new("storage_type", AttributeType::String).computed(),
            AttributeSchema::new("storage_pool", AttributeType::String).computed(),
            AttributeSchema::new("image_type", AttributeType::String).computed(),
        ]);

        ResourceSchema::new(self.name())
            .attribute(cloud_instance_id_attribute())
            .attribute(AttributeSchema::new("image_info", AttributeType::list_of(image)).computed())
    }
}

#[derive(Debug, Serialize)]
struct ImageRecord {
    id: Option<String>,
    name: Option<String>,
    href: Option<String>,
    state: Option<String>,
    storage_type: Option<String>,
    storage_pool: Option<String>,
    image_type: Option<String>,
}

impl From<ImageReference> for ImageRecord {
    fn from(image: ImageReference) -> Self {
        Self {
            id: image.image_id,
            name: image.name,
            href: image.href,
            state: image.state,
            storage_type: image.storage_type,
            storage_pool: image.storage_pool,
            image_type: image.specifications.and_then(|spec| spec.image_type),
        }
    }
}

#[derive(Debug, Serialize)]
struct ImagesRecord {
    image_info: Vec<ImageRecord>,
}

#[async_trait]
impl DataSource for ImagesDataSource {
    async fn fetch(
        &self,
        client: InstanceClient<'_>,
        _resource: &Resource,
    ) -> ProviderResult<Snapshot> {
        let images = client.get_all_images().await?;
        let record = ImagesRecord {
            image_info: images.images.into_iter().map(ImageRecord::from).collect(),
        };
        capture(Identifier::synthetic(), &record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::fake::{FakeApi, FakeSession};
    use crate::client::models::{ImageSpecifications, Images};
    use crate::provider::PpcProvider;
    use ppc_core::resource::Value;

    #[tokio::test]
    async fn images_are_listed_with_their_type() {
        let session = FakeSession(Some(FakeApi {
            images: Images {
                images: vec![
                    ImageReference {
                        image_id: Some("img-1".to_string()),
                        name: Some("7200-05-01".to_string()),
                        state: Some("active".to_string()),
                        storage_type: Some("tier3".to_string()),
                        specifications: Some(ImageSpecifications {
                            image_type: Some("stock".to_string()),
                        }),
                        ..Default::default()
                    },
                    ImageReference {
                        image_id: Some("img-2".to_string()),
                        specifications: None,
                        ..Default::default()
                    },
                ],
            },
            ..Default::default()
        }));
        let resource = Resource::new("ibm_ppc_images", "all")
            .with_attribute("ppc_cloud_instance_id", "acct-123");

        let state = PpcProvider::new().read_data_source(&session, &resource).await.unwrap();

        assert!(state.identifier().is_synthetic());
        let images = state.get("image_info").unwrap().as_list().unwrap();
        assert_eq!(images.len(), 2);

        let first = images[0].as_map().unwrap();
        assert_eq!(first.get("id"), Some(&Value::from("img-1")));
        assert_eq!(first.get("storage_type"), Some(&Value::from("tier3")));
        assert_eq!(first.get("image_type"), Some(&Value::from("stock")));

        let second = images[1].as_map().unwrap();
        assert_eq!(second.len(), 1);
        assert!(!second.contains_key("image_type"));

        assert_eq!(session.0.as_ref().unwrap().calls(), vec!["get_all_images acct-123"]);
    }
}
