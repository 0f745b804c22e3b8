//! Domain primitives, entity services, and the session gate.
//!
//! Purpose: define the strongly typed marketplace entities, the fetch layer
//! that keeps their stores in sync with the remote service, and the access
//! gate guarding protected views. Nothing here depends on a transport; the
//! remote side is reached through the traits in [`ports`].
//!
//! Public surface:
//! - Entities: `Product`, `Booking`, `Company`, `User`, `Question`,
//!   `Association`, each bound to its collection by `Resource`.
//! - `EntityService` and `AppState`: remote-backed stores handed to views.
//! - `SessionGate`, `SessionContext`: session validation and identity.
//! - `ProductSearch`, `ProductRegistration`, `Attachment`: catalogue search,
//!   the product registration wizard, and upload validation.
//! - `Error` / `ErrorCode`: user-facing failures.

pub mod ports;

mod app_state;
mod association;
mod attachment;
mod booking;
mod catalogue;
mod company;
mod entity_service;
pub mod error;
mod ids;
mod product;
mod question;
mod registration;
mod resource;
mod session;
mod session_gate;
mod user;

pub use self::app_state::{AppState, MarketplaceApi};
pub use self::association::{Association, AssociationDraft, AssociationRole};
pub use self::attachment::{Attachment, AttachmentValidationError, MAX_IMAGE_BYTES};
pub use self::booking::{
    Booking, BookingDraft, BookingPatch, BookingPricing, BookingReview, BookingSchedule,
    BookingStatus, ClientSnapshot, ProductSnapshot,
};
pub use self::catalogue::ProductSearch;
pub use self::company::{Address, Company, CompanyDraft};
pub use self::entity_service::{EntityService, FetchStatus};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::ids::{AssociationId, BookingId, CompanyId, EntityId, ProductId, QuestionId, UserId};
pub use self::product::{
    AvailabilitySlot, Category, Price, PriceUnit, Product, ProductDraft, ProductPatch,
};
pub use self::question::{Question, QuestionDraft};
pub use self::registration::{
    PRODUCT_NAME_MAX, PRODUCT_NAME_MIN, ProductDetails, ProductRegistration, RegistrationError,
    RegistrationStep,
};
pub use self::resource::{FieldPatch, Resource};
pub use self::session::{Identity, SessionContext, SessionToken};
pub use self::session_gate::{
    DEFAULT_CHECK_TIMEOUT, DEFAULT_LOGIN_PATH, GateSettings, GateState, MountedGate, Render,
    SessionGate,
};
pub use self::user::{User, UserDraft};
