//! Binding between stored entities and their remote collections.

use std::fmt;

use entity_store::Keyed;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::EntityId;

/// An entity type served by one remote CRUD collection.
///
/// `Draft` is the create payload (the server assigns the identifier) and
/// `Patch` carries the partial fields of an update.
pub trait Resource:
    Keyed<Key: EntityId> + Clone + fmt::Debug + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// Path segment of the remote collection, e.g. `products`.
    const COLLECTION: &'static str;
    /// Singular noun used in logs and user-facing messages.
    const NAME: &'static str;

    /// Create payload.
    type Draft: Serialize + fmt::Debug + Send + Sync + 'static;
    /// Partial update payload.
    type Patch: Serialize + fmt::Debug + Send + Sync + 'static;
}

/// Untyped partial update for entities without a dedicated patch type.
///
/// # Examples
/// ```
/// use client::domain::FieldPatch;
///
/// let patch = FieldPatch::new().set("verified", true).set("name", "Ada");
/// assert_eq!(patch.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldPatch(Map<String, Value>);

impl FieldPatch {
    /// Start an empty patch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `field` to `value`, replacing any earlier value for that field.
    pub fn set(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(field.into(), value.into());
        self
    }

    /// Value currently set for `field`.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// Number of fields in the patch.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
