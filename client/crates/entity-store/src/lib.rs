//! Observable keyed entity collections.
//!
//! An [`EntityStore`] holds the local copy of one entity type fetched from
//! (or sent to) a remote service. Views share a store by reference and either
//! read it directly or hold a [`StoreSubscription`] to learn about changes.
//!
//! Identity semantics:
//! - `create` appends without checking for an existing key, so duplicate keys
//!   are kept as separate entries in insertion order.
//! - `update` and `delete` act on every entry whose key matches.
//! - lookups return the first matching entry.

mod keyed;
mod store;

pub use keyed::Keyed;
pub use store::{EntityStore, StoreSubscription};
