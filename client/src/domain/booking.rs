//! Bookings of products by clients, and the review summary shown before
//! confirming one.

use chrono::{DateTime, Duration, Utc};
use entity_store::Keyed;
use serde::{Deserialize, Serialize};

use super::{BookingId, ProductId, Resource, UserId};

/// Lifecycle of a booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    /// Awaiting confirmation by the institution.
    Pending,
    /// Accepted by the institution.
    Confirmed,
    /// Withdrawn by either party.
    Cancelled,
    /// The booked period has passed.
    Completed,
}

/// Product details captured when the booking was made.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSnapshot {
    /// Booked product.
    pub id: ProductId,
    /// Product name at booking time.
    pub name: String,
}

/// Client details captured when the booking was made.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientSnapshot {
    /// Booking client.
    pub id: UserId,
    /// Client name at booking time.
    pub name: String,
    /// Contact e-mail.
    pub email: String,
}

/// Price breakdown of a booking, in cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingPricing {
    /// Price of one unit (hour, day, or booking).
    pub unit_price_cents: u64,
    /// Units booked.
    pub quantity: u32,
    /// Service fee added on top.
    #[serde(default)]
    pub fee_cents: u64,
    /// Discount subtracted from the total.
    #[serde(default)]
    pub discount_cents: u64,
}

impl BookingPricing {
    /// Units times unit price.
    pub fn subtotal_cents(&self) -> u64 {
        self.unit_price_cents.saturating_mul(u64::from(self.quantity))
    }

    /// Subtotal plus fee minus discount, never below zero.
    pub fn total_cents(&self) -> u64 {
        self.subtotal_cents()
            .saturating_add(self.fee_cents)
            .saturating_sub(self.discount_cents)
    }
}

/// Booked time range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingSchedule {
    /// Start of the booked period.
    pub starts_at: DateTime<Utc>,
    /// End of the booked period.
    pub ends_at: DateTime<Utc>,
}

/// A booking as served by the remote service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    /// Server-assigned identifier.
    #[serde(rename = "_id")]
    pub id: BookingId,
    /// Product snapshot.
    pub product: ProductSnapshot,
    /// Client snapshot.
    pub client: ClientSnapshot,
    /// Price breakdown.
    pub pricing: BookingPricing,
    /// Booked period.
    pub schedule: BookingSchedule,
    /// Current status.
    pub status: BookingStatus,
}

/// Line summary presented on the booking review screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingReview {
    /// Product name.
    pub product_name: String,
    /// Client name.
    pub client_name: String,
    /// Booked period length.
    pub duration: Duration,
    /// Units times unit price.
    pub subtotal_cents: u64,
    /// Service fee.
    pub fee_cents: u64,
    /// Discount.
    pub discount_cents: u64,
    /// Amount due.
    pub total_cents: u64,
}

impl Booking {
    /// Amount due for the booking.
    pub fn total_cents(&self) -> u64 {
        self.pricing.total_cents()
    }

    /// Length of the booked period; zero when the schedule is inverted.
    pub fn duration(&self) -> Duration {
        let span = self.schedule.ends_at - self.schedule.starts_at;
        span.max(Duration::zero())
    }

    /// Whether the booking still needs a decision from the institution.
    pub fn is_pending(&self) -> bool {
        self.status == BookingStatus::Pending
    }

    /// Summary for the review screen.
    pub fn review(&self) -> BookingReview {
        BookingReview {
            product_name: self.product.name.clone(),
            client_name: self.client.name.clone(),
            duration: self.duration(),
            subtotal_cents: self.pricing.subtotal_cents(),
            fee_cents: self.pricing.fee_cents,
            discount_cents: self.pricing.discount_cents,
            total_cents: self.total_cents(),
        }
    }
}

impl Keyed for Booking {
    type Key = BookingId;

    fn key(&self) -> &BookingId {
        &self.id
    }
}

impl Resource for Booking {
    const COLLECTION: &'static str = "bookings";
    const NAME: &'static str = "booking";

    type Draft = BookingDraft;
    type Patch = BookingPatch;
}

/// Booking request sent by a client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingDraft {
    /// Product to book.
    pub product_id: ProductId,
    /// Requested period.
    pub schedule: BookingSchedule,
    /// Units requested.
    pub quantity: u32,
}

/// Partial booking update.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingPatch {
    /// New status.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<BookingStatus>,
    /// Rescheduled period.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedule: Option<BookingSchedule>,
}
