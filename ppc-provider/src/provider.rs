//! Power Systems cloud provider implementation
//!
//! Holds the data source registry and runs the read pipeline:
//! validate configuration, scope the session's client to the cloud
//! instance, fetch, flatten.

use std::collections::HashMap;

use log::debug;
use ppc_core::provider::{ProviderError, ProviderResult};
use ppc_core::resource::{Resource, State};
use ppc_core::schema::ResourceSchema;

use crate::client::{ClientSession, InstanceClient};
use crate::data_sources::{self, CLOUD_INSTANCE_ID, DataSource};

/// A data source together with the schema it declared at registration
struct Registered {
    schema: ResourceSchema,
    data_source: Box<dyn DataSource>,
}

/// Power Systems cloud provider
pub struct PpcProvider {
    data_sources: HashMap<&'static str, Registered>,
}

impl PpcProvider {
    /// Create a provider exposing every built-in data source
    pub fn new() -> Self {
        Self::with_data_sources(data_sources::all())
    }

    /// Create a provider exposing the given data sources
    ///
    /// Each schema is computed once here and never changes afterwards.
    pub fn with_data_sources(list: Vec<Box<dyn DataSource>>) -> Self {
        let data_sources = list
            .into_iter()
            .map(|data_source| {
                let schema = data_source.schema();
                (data_source.name(), Registered { schema, data_source })
            })
            .collect();
        Self { data_sources }
    }

    /// Names of the registered data sources, sorted
    pub fn data_source_names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.data_sources.keys().copied().collect();
        names.sort_unstable();
        names
    }

    pub fn schema(&self, data_source: &str) -> Option<&ResourceSchema> {
        self.data_sources.get(data_source).map(|r| &r.schema)
    }

    /// Read a data source
    ///
    /// Either returns a fully populated state or an error; no partial
    /// state is ever produced. Errors are tagged with the resource id.
    pub async fn read_data_source(
        &self,
        session: &dyn ClientSession,
        resource: &Resource,
    ) -> ProviderResult<State> {
        self.read_inner(session, resource).await.map_err(|e| {
            if e.resource_id.is_some() {
                e
            } else {
                e.for_resource(resource.id.clone())
            }
        })
    }

    async fn read_inner(
        &self,
        session: &dyn ClientSession,
        resource: &Resource,
    ) -> ProviderResult<State> {
        let registered = self
            .data_sources
            .get(resource.id.resource_type.as_str())
            .ok_or_else(|| {
                ProviderError::invalid_config(format!(
                    "Unknown data source type: {}",
                    resource.id.resource_type
                ))
            })?;

        registered
            .schema
            .validate(&resource.attributes)
            .map_err(|errors| ProviderError::from_type_errors(&errors))?;

        let cloud_instance_id = data_sources::lookup_key(resource, CLOUD_INSTANCE_ID)?;
        let client = InstanceClient::new(session, cloud_instance_id)?;

        debug!("Reading {} in cloud instance {}", resource.id, cloud_instance_id);
        let snapshot = registered.data_source.fetch(client, resource).await?;
        let state = snapshot.into_state(resource.id.clone(), &registered.schema)?;
        debug!(
            "Read {} as {} ({} attributes)",
            resource.id,
            state.identifier(),
            state.attributes().len()
        );

        Ok(state)
    }
}

impl Default for PpcProvider {
    fn default() -> Self {
        Self::new()
    }
}
