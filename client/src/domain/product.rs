//! Rentable products offered by institutions.

use chrono::{NaiveTime, Weekday};
use entity_store::Keyed;
use serde::{Deserialize, Serialize};

use super::{CompanyId, ProductId, Resource};

/// Kind of thing being rented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Rooms, halls, labs and other physical spaces.
    Space,
    /// Devices and tools.
    Equipment,
    /// Services performed by the institution.
    Service,
}

/// Unit a price applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceUnit {
    /// Charged per hour of use.
    Hour,
    /// Charged per day of use.
    Day,
    /// Flat charge per booking.
    Booking,
}

/// Price in the smallest currency unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Price {
    /// Amount in cents.
    pub amount_cents: u64,
    /// What the amount pays for.
    pub unit: PriceUnit,
}

/// Weekly window during which a product can be booked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilitySlot {
    /// Day of the week.
    pub weekday: Weekday,
    /// Opening time.
    pub start: NaiveTime,
    /// Closing time; must be after `start`.
    pub end: NaiveTime,
}

impl AvailabilitySlot {
    /// Whether the window is non-empty.
    pub fn is_well_formed(&self) -> bool {
        self.start < self.end
    }

    /// Whether both windows share a weekday and some time.
    ///
    /// Touching windows (one ends when the other starts) do not overlap.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.weekday == other.weekday && self.start < other.end && other.start < self.end
    }
}

/// A product as served by the remote catalogue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Server-assigned identifier.
    #[serde(rename = "_id")]
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Free-form description.
    pub description: String,
    /// Product kind.
    pub category: Category,
    /// Rental price.
    pub price: Price,
    /// Weekly availability windows.
    #[serde(default)]
    pub availability: Vec<AvailabilitySlot>,
    /// Institution offering the product.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_id: Option<CompanyId>,
    /// Public URL of the uploaded product image.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl Product {
    /// Whether any availability window falls on `weekday`.
    pub fn is_available_on(&self, weekday: Weekday) -> bool {
        self.availability.iter().any(|slot| slot.weekday == weekday)
    }
}

impl Keyed for Product {
    type Key = ProductId;

    fn key(&self) -> &ProductId {
        &self.id
    }
}

impl Resource for Product {
    const COLLECTION: &'static str = "products";
    const NAME: &'static str = "product";

    type Draft = ProductDraft;
    type Patch = ProductPatch;
}

/// Create payload produced by the registration wizard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDraft {
    /// Display name.
    pub name: String,
    /// Free-form description.
    pub description: String,
    /// Product kind.
    pub category: Category,
    /// Rental price.
    pub price: Price,
    /// Weekly availability windows.
    pub availability: Vec<AvailabilitySlot>,
}

/// Partial product update; unset fields are left untouched remotely.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPatch {
    /// New display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// New price.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Price>,
    /// Replacement availability windows.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub availability: Option<Vec<AvailabilitySlot>>,
}
