//! HTTP outbound adapters.
//!
//! Thin reqwest implementations of the `EntityApi` and `SessionCheck` ports.

mod entity_api;
mod session_check;
mod transport;

pub use entity_api::HttpEntityApi;
pub use session_check::HttpSessionCheck;
