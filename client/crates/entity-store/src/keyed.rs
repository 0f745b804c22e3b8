//! Identifier accessor shared by every stored entity.

/// An entity that exposes a key used for update, delete, and lookup.
///
/// Keys compare with [`PartialEq`]; for the marketplace entities these are
/// string identifiers compared by exact equality.
///
/// # Examples
/// ```
/// use entity_store::Keyed;
///
/// struct Note {
///     id: String,
/// }
///
/// impl Keyed for Note {
///     type Key = String;
///
///     fn key(&self) -> &Self::Key {
///         &self.id
///     }
/// }
///
/// let note = Note { id: "n-1".to_owned() };
/// assert_eq!(note.key(), "n-1");
/// ```
pub trait Keyed {
    /// Identifier type.
    type Key: PartialEq;

    /// Borrow this entity's identifier.
    fn key(&self) -> &Self::Key;
}
