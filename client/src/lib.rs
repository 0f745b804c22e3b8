//! Marketplace client core: remote-backed entity stores, the session gate,
//! and the HTTP adapters that connect them to the marketplace API.

pub mod config;
pub mod domain;
pub mod outbound;
