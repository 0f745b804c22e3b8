//! Application-wide state handed to views.
//!
//! Replaces ambient global storage: the session context and one entity
//! service per resource type are bundled here and passed explicitly.

use std::sync::Arc;

use super::ports::EntityApi;
use super::{
    Association, Booking, Company, EntityService, Product, Question, SessionContext, User,
};

/// Remote API serving every marketplace collection.
pub trait MarketplaceApi:
    EntityApi<Product>
    + EntityApi<Booking>
    + EntityApi<Company>
    + EntityApi<User>
    + EntityApi<Question>
    + EntityApi<Association>
    + 'static
{
}

impl<T> MarketplaceApi for T where
    T: EntityApi<Product>
        + EntityApi<Booking>
        + EntityApi<Company>
        + EntityApi<User>
        + EntityApi<Question>
        + EntityApi<Association>
        + 'static
{
}

/// Session plus entity services for the whole client.
pub struct AppState {
    /// Session token and resolved identity.
    pub session: SessionContext,
    /// Catalogue products.
    pub products: EntityService<Product>,
    /// Bookings made by or for the signed-in user.
    pub bookings: EntityService<Booking>,
    /// Institutions offering products.
    pub companies: EntityService<Company>,
    /// User accounts.
    pub users: EntityService<User>,
    /// Product questions and answers.
    pub questions: EntityService<Question>,
    /// User memberships in institutions.
    pub associations: EntityService<Association>,
}

impl AppState {
    /// Build every service on top of one adapter.
    pub fn new<A: MarketplaceApi>(api: Arc<A>, session: SessionContext) -> Self {
        Self {
            session,
            products: EntityService::new(service_port(&api)),
            bookings: EntityService::new(service_port(&api)),
            companies: EntityService::new(service_port(&api)),
            users: EntityService::new(service_port(&api)),
            questions: EntityService::new(service_port(&api)),
            associations: EntityService::new(service_port(&api)),
        }
    }
}

fn service_port<R, A>(api: &Arc<A>) -> Arc<dyn EntityApi<R>>
where
    R: super::Resource,
    A: EntityApi<R> + 'static,
{
    Arc::clone(api) as Arc<dyn EntityApi<R>>
}
