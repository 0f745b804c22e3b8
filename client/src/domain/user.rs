//! Marketplace user accounts.

use entity_store::Keyed;
use serde::{Deserialize, Serialize};

use super::{CompanyId, FieldPatch, Resource, UserId};

/// A user profile as served by the remote service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Server-assigned identifier.
    #[serde(rename = "_id")]
    pub id: UserId,
    /// Full name.
    pub name: String,
    /// Login e-mail.
    pub email: String,
    /// Whether the e-mail address has been verified.
    #[serde(default)]
    pub verified: bool,
    /// Institution the user administers, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_id: Option<CompanyId>,
}

impl Keyed for User {
    type Key = UserId;

    fn key(&self) -> &UserId {
        &self.id
    }
}

impl Resource for User {
    const COLLECTION: &'static str = "users";
    const NAME: &'static str = "user";

    type Draft = UserDraft;
    type Patch = FieldPatch;
}

/// Sign-up payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDraft {
    /// Full name.
    pub name: String,
    /// Login e-mail.
    pub email: String,
}
