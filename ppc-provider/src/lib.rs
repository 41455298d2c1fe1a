//! PPC Provider
//!
//! Power Systems virtual server data sources: networks, ports, instance
//! volumes, volume groups, SSH keys, images, DHCP servers and storage
//! capacity.
//!
//! ## Module Structure
//!
//! - `client` - API client trait, HTTP implementation and sessions
//! - `config` - Provider configuration and environment fallback
//! - `data_sources` - Schema and remote read of each data source
//! - `provider` - PpcProvider, the registry and read pipeline

pub mod client;
pub mod config;
pub mod data_sources;
pub mod provider;

// Re-export main types
pub use client::http::{HttpSession, PpcHttpClient};
pub use client::{ClientSession, PpcApi};
pub use config::ProviderConfig;
pub use provider::PpcProvider;

use ppc_core::provider::{BoxFuture, Provider, ProviderResult};
use ppc_core::resource::{Resource, State};
use ppc_core::schema::ResourceSchema;

// =============================================================================
// Provider Trait Implementation
// =============================================================================

impl Provider for PpcProvider {
    type Session = dyn ClientSession;

    fn name(&self) -> &'static str {
        "ibm"
    }

    fn schemas(&self) -> Vec<&ResourceSchema> {
        self.data_source_names()
            .into_iter()
            .filter_map(|name| self.schema(name))
            .collect()
    }

    fn read<'a>(
        &'a self,
        session: &'a Self::Session,
        resource: &'a Resource,
    ) -> BoxFuture<'a, ProviderResult<State>> {
        Box::pin(self.read_data_source(session, resource))
    }
}
