//! Provider - Trait abstracting data source reads
//!
//! A Provider exposes a fixed set of data source types, each with a schema,
//! and turns a configured data source into the state read from the remote
//! API. The session used to reach the API is passed to every read.

use std::future::Future;
use std::pin::Pin;

use crate::flatten::FlattenError;
use crate::resource::{Resource, ResourceId, State};
use crate::schema::{ResourceSchema, TypeError};

/// Category of a provider failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// No usable client session
    Session,
    /// The remote call failed
    RemoteApi,
    /// The lookup matched nothing where one record was expected
    NotFound,
    /// The configuration was rejected before any remote call
    InvalidConfig,
    /// The remote response could not be mapped onto the schema
    InvalidResponse,
}

/// Error type for Provider operations
#[derive(Debug)]
pub struct ProviderError {
    pub kind: ErrorKind,
    pub message: String,
    pub resource_id: Option<ResourceId>,
    pub cause: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl std::fmt::Display for ProviderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(ref id) = self.resource_id {
            write!(f, "[{}.{}] {}", id.resource_type, id.name, self.message)
        } else {
            write!(f, "{}", self.message)
        }
    }
}

impl std::error::Error for ProviderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.cause
            .as_ref()
            .map(|e| e.as_ref() as &dyn std::error::Error)
    }
}

impl ProviderError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            resource_id: None,
            cause: None,
        }
    }

    pub fn session(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Session, message)
    }

    pub fn remote_api(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::RemoteApi, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidConfig, message)
    }

    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidResponse, message)
    }

    /// Configuration rejected by schema validation
    pub fn from_type_errors(errors: &[TypeError]) -> Self {
        let details: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
        Self::invalid_config(format!("Invalid configuration: {}", details.join("; ")))
    }

    pub fn for_resource(mut self, id: ResourceId) -> Self {
        self.resource_id = Some(id);
        self
    }

    pub fn with_cause(mut self, cause: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.cause = Some(Box::new(cause));
        self
    }
}

impl From<FlattenError> for ProviderError {
    fn from(err: FlattenError) -> Self {
        ProviderError::invalid_response(format!("Failed to flatten response: {}", err))
            .with_cause(err)
    }
}

pub type ProviderResult<T> = Result<T, ProviderError>;

/// Return type for async operations
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Definition of data source types that a Provider can handle
pub trait ResourceType: Send + Sync {
    /// Data source type name (e.g., "ibm_ppc_network")
    fn name(&self) -> &'static str;

    /// Attribute schema for this data source type
    fn schema(&self) -> ResourceSchema;
}

/// Main Provider trait
///
/// Reads are independent of each other: a provider holds no state that a
/// read mutates, so the host may run many reads concurrently.
pub trait Provider: Send + Sync {
    /// Host-provided session handed to each read
    type Session: ?Sized + Send + Sync;

    /// Name of this Provider (e.g., "ibm")
    fn name(&self) -> &'static str;

    /// Schemas of every data source this Provider can read
    fn schemas(&self) -> Vec<&ResourceSchema>;

    /// Read the current state of a data source
    ///
    /// The configuration is validated against the schema before the
    /// remote API is called.
    fn read<'a>(
        &'a self,
        session: &'a Self::Session,
        resource: &'a Resource,
    ) -> BoxFuture<'a, ProviderResult<State>>;
}
