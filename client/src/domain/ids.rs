//! Server-assigned entity identifiers.
//!
//! Identifiers are opaque strings issued by the remote service and compared by
//! exact string equality. Each entity type gets its own newtype so a booking
//! id cannot be passed where a product id is expected.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Bounds shared by every entity identifier.
pub trait EntityId:
    AsRef<str> + fmt::Display + fmt::Debug + Clone + PartialEq + Send + Sync + 'static
{
}

macro_rules! define_entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wrap a raw identifier.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.0.as_str()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self::new(value)
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl EntityId for $name {}
    };
}

define_entity_id!(
    /// Identifier of a rentable product.
    ProductId
);
define_entity_id!(
    /// Identifier of a booking.
    BookingId
);
define_entity_id!(
    /// Identifier of an institution offering products.
    CompanyId
);
define_entity_id!(
    /// Identifier of a user account.
    UserId
);
define_entity_id!(
    /// Identifier of a product question.
    QuestionId
);
define_entity_id!(
    /// Identifier of a user-to-company association.
    AssociationId
);
