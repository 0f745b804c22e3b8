//! Institutions offering products on the marketplace.

use entity_store::Keyed;
use serde::{Deserialize, Serialize};

use super::{CompanyId, FieldPatch, Resource};

/// Postal address of an institution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    /// Street name.
    pub street: String,
    /// Street number.
    pub number: String,
    /// District or neighbourhood.
    #[serde(default)]
    pub district: String,
    /// City.
    pub city: String,
    /// State or region.
    pub state: String,
    /// Postal code.
    pub postal_code: String,
}

/// An institution as served by the remote service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    /// Server-assigned identifier.
    #[serde(rename = "_id")]
    pub id: CompanyId,
    /// Trading name.
    pub name: String,
    /// Official registration number.
    pub registration_number: String,
    /// Contact e-mail.
    pub email: String,
    /// Contact phone.
    #[serde(default)]
    pub phone: String,
    /// Postal address.
    pub address: Address,
}

impl Keyed for Company {
    type Key = CompanyId;

    fn key(&self) -> &CompanyId {
        &self.id
    }
}

impl Resource for Company {
    const COLLECTION: &'static str = "companies";
    const NAME: &'static str = "company";

    type Draft = CompanyDraft;
    type Patch = FieldPatch;
}

/// Registration payload for a new institution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyDraft {
    /// Trading name.
    pub name: String,
    /// Official registration number.
    pub registration_number: String,
    /// Contact e-mail.
    pub email: String,
    /// Contact phone.
    pub phone: String,
    /// Postal address.
    pub address: Address,
}
