//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod entity_api;
mod session_check;

pub use entity_api::{EntityApi, ListQuery, RemoteError};
#[cfg(test)]
pub use session_check::MockSessionCheck;
pub use session_check::{FixtureSessionCheck, SessionCheck, SessionCheckError};
