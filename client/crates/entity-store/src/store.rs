//! In-memory entity collection backed by a `watch` channel.
//!
//! Every mutation runs to completion under the channel's write lock, so a
//! subscriber never sees a half-applied change. Mutations that leave the
//! collection untouched (an `update` or `delete` with no matching key) do not
//! mark subscribers as changed.

use std::fmt;

use tokio::sync::watch;

use crate::Keyed;

/// Shared, observable collection of one entity type.
///
/// All operations are synchronous and total: none of them can fail, and each
/// leaves the collection in a well-defined state.
///
/// # Examples
/// ```
/// use entity_store::{EntityStore, Keyed};
///
/// #[derive(Clone, Debug, PartialEq)]
/// struct Room {
///     id: String,
///     name: &'static str,
/// }
///
/// impl Keyed for Room {
///     type Key = String;
///
///     fn key(&self) -> &String {
///         &self.id
///     }
/// }
///
/// let store = EntityStore::new();
/// store.create(Room { id: "r1".to_owned(), name: "Studio" });
/// store.update(Room { id: "r1".to_owned(), name: "Large studio" });
///
/// let room = store.get_by_id(&"r1".to_owned()).map(|room| room.name);
/// assert_eq!(room, Some("Large studio"));
/// ```
pub struct EntityStore<E> {
    entries: watch::Sender<Vec<E>>,
}

impl<E> EntityStore<E> {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        let (entries, _) = watch::channel(Vec::new());
        Self { entries }
    }

    /// Number of entries, duplicates included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    /// Whether the store holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    /// Run `read` against the current entries without cloning them.
    ///
    /// The store is read-locked while `read` runs; calling a mutating store
    /// operation from inside the closure deadlocks.
    pub fn with<R>(&self, read: impl FnOnce(&[E]) -> R) -> R {
        read(self.entries.borrow().as_slice())
    }

    /// Subscribe to changes of the collection.
    #[must_use]
    pub fn subscribe(&self) -> StoreSubscription<E> {
        StoreSubscription {
            receiver: self.entries.subscribe(),
        }
    }

    /// Number of live subscriptions.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.entries.receiver_count()
    }

    /// Replace the whole collection with exactly `entities`.
    ///
    /// Prior contents and their order are discarded.
    pub fn set_all(&self, entities: Vec<E>) {
        self.entries.send_replace(entities);
    }

    /// Append `entity`, preserving insertion order.
    ///
    /// No uniqueness check is made: an entity whose key is already present is
    /// stored as an additional entry.
    pub fn create(&self, entity: E) {
        self.entries.send_modify(|entries| entries.push(entity));
    }
}

impl<E: Keyed> EntityStore<E> {
    /// Remove every entry whose key equals `key`.
    ///
    /// Returns how many entries were removed; zero means nothing changed.
    pub fn delete(&self, key: &E::Key) -> usize {
        let mut removed = 0;
        self.entries.send_if_modified(|entries| {
            let before = entries.len();
            entries.retain(|entry| entry.key() != key);
            removed = before - entries.len();
            removed > 0
        });
        removed
    }

    /// Whether any entry has the given key.
    #[must_use]
    pub fn contains(&self, key: &E::Key) -> bool {
        self.entries.borrow().iter().any(|entry| entry.key() == key)
    }
}

impl<E: Keyed + Clone> EntityStore<E> {
    /// Replace, in place, every entry whose key equals `entity`'s key.
    ///
    /// Returns how many entries were replaced; zero means the collection is
    /// unchanged.
    pub fn update(&self, entity: E) -> usize {
        let mut replaced = 0;
        self.entries.send_if_modified(|entries| {
            for slot in entries
                .iter_mut()
                .filter(|slot| slot.key() == entity.key())
            {
                *slot = entity.clone();
                replaced += 1;
            }
            replaced > 0
        });
        replaced
    }

    /// First entry whose key equals `key`.
    #[must_use]
    pub fn get_by_id(&self, key: &E::Key) -> Option<E> {
        self.entries
            .borrow()
            .iter()
            .find(|entry| entry.key() == key)
            .cloned()
    }
}

impl<E: Clone> EntityStore<E> {
    /// Clone the current entries in store order.
    #[must_use]
    pub fn snapshot(&self) -> Vec<E> {
        self.entries.borrow().clone()
    }

    /// Clone the entries matching `predicate`, in store order.
    pub fn filter(&self, mut predicate: impl FnMut(&E) -> bool) -> Vec<E> {
        self.entries
            .borrow()
            .iter()
            .filter(|entry| predicate(entry))
            .cloned()
            .collect()
    }
}

impl<E> Default for EntityStore<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: fmt::Debug> fmt::Debug for EntityStore<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntityStore")
            .field("entries", &*self.entries.borrow())
            .finish()
    }
}

/// Handle observing one [`EntityStore`].
///
/// A fresh subscription treats the collection it was created against as
/// already seen.
pub struct StoreSubscription<E> {
    receiver: watch::Receiver<Vec<E>>,
}

impl<E> StoreSubscription<E> {
    /// Whether the collection changed since it was last read through this
    /// subscription.
    ///
    /// Returns `false` once the store has been dropped.
    #[must_use]
    pub fn has_changed(&self) -> bool {
        self.receiver.has_changed().unwrap_or(false)
    }

    /// Read the current collection and mark it as seen.
    pub fn read<R>(&mut self, read: impl FnOnce(&[E]) -> R) -> R {
        read(self.receiver.borrow_and_update().as_slice())
    }

    /// Wait for the next mutation.
    ///
    /// Returns `false` when the store was dropped and no further changes can
    /// arrive.
    pub async fn changed(&mut self) -> bool {
        self.receiver.changed().await.is_ok()
    }
}

impl<E: Clone> StoreSubscription<E> {
    /// Clone the current collection and mark it as seen.
    pub fn current(&mut self) -> Vec<E> {
        self.receiver.borrow_and_update().clone()
    }
}
