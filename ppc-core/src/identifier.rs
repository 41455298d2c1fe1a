//! Identifier - The single id assigned to every successful read
//!
//! Entities keep the id the remote API gave them. Aggregate data sources
//! (a list of ports, the volumes of an instance) have no identity of their
//! own, so they get a synthetic one.

use std::fmt;

use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Identifier {
    /// Id of the remote object itself
    Remote(String),
    /// Random marker for an aggregate read
    Synthetic(Uuid),
}

impl Identifier {
    pub fn remote(id: impl Into<String>) -> Self {
        Identifier::Remote(id.into())
    }

    /// Assign a synthetic id to an aggregate read
    ///
    /// This is the only place random identifiers are produced.
    pub fn synthetic() -> Self {
        Identifier::Synthetic(Uuid::new_v4())
    }

    pub fn is_synthetic(&self) -> bool {
        matches!(self, Identifier::Synthetic(_))
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Identifier::Remote(id) => write!(f, "{}", id),
            Identifier::Synthetic(uuid) => write!(f, "{}", uuid.hyphenated()),
        }
    }
}
