// ============================================================================
// notify-map - Core Types
// Change notification payloads handed to observers on every mutation
// ============================================================================

// =============================================================================
// ENTRY
// =============================================================================

/// An owned snapshot of one (key, value) pair.
///
/// Notifications carry `Entry` snapshots rather than references into the map,
/// so a handler may hold on to them after the mutating call returns (and so
/// handlers can re-query the map without aliasing its storage).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry<K, V> {
    pub key: K,
    pub value: V,
}

impl<K, V> Entry<K, V> {
    pub fn new(key: K, value: V) -> Self {
        Self { key, value }
    }
}

impl<K, V> From<(K, V)> for Entry<K, V> {
    fn from((key, value): (K, V)) -> Self {
        Self { key, value }
    }
}

// =============================================================================
// CHANGE ACTION
// =============================================================================

/// What kind of mutation a [`ChangeNotification`] describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeAction {
    /// A new entry was added (via `insert`, or `set` on an absent key).
    Add,
    /// An existing entry's value was overwritten (via `set` on a present key).
    Replace,
    /// An entry was removed (via `remove`).
    Remove,
    /// Every entry was removed at once (via `clear`).
    Clear,
}

// =============================================================================
// DERIVED PROPERTY
// =============================================================================

/// Derived properties of the map that observers can watch.
///
/// An explicit enumerated set, passed directly by each call site. Replace
/// mutations only touch [`DerivedProperty::Values`] since the key set is
/// unchanged; Add/Remove/Clear touch all three.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DerivedProperty {
    /// The number of entries changed.
    Count,
    /// The set of keys changed.
    Keys,
    /// The set of values changed.
    Values,
}

// =============================================================================
// CHANGE NOTIFICATION
// =============================================================================

/// Immutable record describing one structural mutation.
///
/// Constructed fresh by the map on each mutating call and handed to
/// subscribers synchronously within that call; the map never retains it.
/// `None` stands in for "no entry on this side" (Add has no old entry,
/// Remove has no new entry, Clear has neither).
///
/// The shape-per-action contract is enforced by the map's call sites, not by
/// this type - use the per-action constructors and it holds by construction.
#[derive(Debug, Clone, PartialEq)]
pub struct ChangeNotification<K, V> {
    pub action: ChangeAction,
    pub old: Option<Entry<K, V>>,
    pub new: Option<Entry<K, V>>,
}

impl<K, V> ChangeNotification<K, V> {
    /// `Add`: no old entry, one new entry.
    pub fn added(new: Entry<K, V>) -> Self {
        Self {
            action: ChangeAction::Add,
            old: None,
            new: Some(new),
        }
    }

    /// `Replace`: old and new entries for the same key.
    pub fn replaced(old: Entry<K, V>, new: Entry<K, V>) -> Self {
        Self {
            action: ChangeAction::Replace,
            old: Some(old),
            new: Some(new),
        }
    }

    /// `Remove`: one old entry, no new entry.
    pub fn removed(old: Entry<K, V>) -> Self {
        Self {
            action: ChangeAction::Remove,
            old: Some(old),
            new: None,
        }
    }

    /// `Clear`: neither side carries an entry.
    pub fn cleared() -> Self {
        Self {
            action: ChangeAction::Clear,
            old: None,
            new: None,
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
