//! Membership links between users and institutions.

use entity_store::Keyed;
use serde::{Deserialize, Serialize};

use super::{AssociationId, CompanyId, FieldPatch, Resource, UserId};

/// Role a user holds within an institution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssociationRole {
    /// Manages the institution and its products.
    Owner,
    /// Staff member handling bookings.
    Member,
}

/// A user-to-company association as served by the remote service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Association {
    /// Server-assigned identifier.
    #[serde(rename = "_id")]
    pub id: AssociationId,
    /// Associated user.
    pub user_id: UserId,
    /// Associated institution.
    pub company_id: CompanyId,
    /// Role within the institution.
    pub role: AssociationRole,
}

impl Keyed for Association {
    type Key = AssociationId;

    fn key(&self) -> &AssociationId {
        &self.id
    }
}

impl Resource for Association {
    const COLLECTION: &'static str = "associations";
    const NAME: &'static str = "association";

    type Draft = AssociationDraft;
    type Patch = FieldPatch;
}

/// New association payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssociationDraft {
    /// User to associate.
    pub user_id: UserId,
    /// Institution to associate with.
    pub company_id: CompanyId,
    /// Role within the institution.
    pub role: AssociationRole,
}
