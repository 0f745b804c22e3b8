//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! Adapters are thin translators between domain types and the marketplace
//! HTTP API. They contain no business logic.

pub mod http;
