// ============================================================================
// notify-map - NotifyingMap
// A HashMap wrapper that pairs every mutation with change notifications
// ============================================================================

use std::cell::RefCell;
use std::collections::HashMap;
use std::hash::Hash;

use log::trace;

use crate::comparer::{natural_equals, KeyEquals};
use crate::core::error::MapError;
use crate::core::types::{ChangeNotification, DerivedProperty, Entry};
use crate::observe::{SubscriberList, SubscriptionId};

// =============================================================================
// NOTIFYING MAP
// =============================================================================

/// A key-value map that notifies observers on every mutation.
///
/// Wraps a private `HashMap` (composition, never inheritance - there is no
/// unguarded mutation path) and pairs each mutating call with two broadcasts:
///
/// 1. A structured [`ChangeNotification`] carrying the action tag and the
///    old/new entry snapshots.
/// 2. [`DerivedProperty`] notifications for the properties that may have
///    changed (`Count`, `Keys`, `Values`).
///
/// Ordering guarantees, per mutating call:
/// - The mutation is applied to storage *before* any notification fires, so
///   a handler that re-queries the map mid-callback sees post-mutation state.
/// - The structured notification fires before the derived-property ones.
/// - Replace fires only `Values`; Add/Remove/Clear fire `Count`, `Keys`,
///   `Values`, in that order.
///
/// Reentrancy is permitted: a handler may mutate the map from inside a
/// callback. The inner mutation (and its own notifications) runs to
/// completion before the outer call's remaining dispatch continues, so
/// observer order during reentrant storms is call-stack order, not queued.
///
/// Single-threaded by contract: all dispatch is synchronous and inline, and
/// concurrent access from multiple threads without external synchronization
/// is out of contract.
///
/// # Example
///
/// ```
/// use notify_map::{ChangeAction, NotifyingMap};
/// use std::cell::Cell;
/// use std::rc::Rc;
///
/// let map: NotifyingMap<String, i32> = NotifyingMap::new();
///
/// let adds = Rc::new(Cell::new(0));
/// let adds_clone = adds.clone();
/// map.on_change(move |note| {
///     if note.action == ChangeAction::Add {
///         adds_clone.set(adds_clone.get() + 1);
///     }
/// });
///
/// map.set("alice".to_string(), 25);
/// map.set("bob".to_string(), 30);
/// assert_eq!(adds.get(), 2);
/// assert_eq!(map.get(&"alice".to_string()), Ok(25));
/// ```
pub struct NotifyingMap<K, V>
where
    K: Eq + Hash + Clone,
{
    /// The underlying data. `RefCell` so every operation takes `&self` and
    /// callbacks can re-enter the map; no borrow is held while dispatching.
    data: RefCell<HashMap<K, V>>,

    /// Active key-equality function. Defines key identity for lookup,
    /// duplicate detection, removal, and old-entry reconstruction.
    key_equals: KeyEquals<K>,

    /// True when constructed with the default comparer. Enables the native
    /// O(1) hash lookups; custom comparers resolve keys by equality scan.
    natural: bool,

    /// Structured change channel.
    changes: SubscriberList<ChangeNotification<K, V>>,

    /// Derived-property channel.
    properties: SubscriberList<DerivedProperty>,
}

impl<K, V> NotifyingMap<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Create a new empty map with the natural key comparer.
    pub fn new() -> Self {
        Self {
            data: RefCell::new(HashMap::new()),
            key_equals: natural_equals,
            natural: true,
            changes: SubscriberList::new(),
            properties: SubscriberList::new(),
        }
    }

    /// Create an empty map with initial capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: RefCell::new(HashMap::with_capacity(capacity)),
            key_equals: natural_equals,
            natural: true,
            changes: SubscriberList::new(),
            properties: SubscriberList::new(),
        }
    }

    /// Create an empty map with a custom key comparer.
    ///
    /// The comparer must be an equivalence relation and must treat keys that
    /// are equal under `==` as equal (coarser than natural equality, never
    /// finer). With a custom comparer every key-driven operation resolves the
    /// stored key by an equality scan, so notifications preserve the stored
    /// key representation even when the caller's spelling differs.
    ///
    /// A comparer that panics propagates the panic unchanged; resolution runs
    /// before storage is touched, so the map is unchanged when that happens.
    pub fn with_comparer(key_equals: KeyEquals<K>) -> Self {
        Self {
            data: RefCell::new(HashMap::new()),
            key_equals,
            natural: false,
            changes: SubscriberList::new(),
            properties: SubscriberList::new(),
        }
    }

    /// Create a map from an iterator of pairs. No notifications fire for the
    /// initial entries (there is nothing subscribed yet by construction).
    pub fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            data: RefCell::new(iter.into_iter().collect()),
            key_equals: natural_equals,
            natural: true,
            changes: SubscriberList::new(),
            properties: SubscriberList::new(),
        }
    }

    // =========================================================================
    // KEY RESOLUTION
    // =========================================================================

    /// Resolve the stored key that the active comparer considers equal to
    /// `key`, if any. This is what makes notifications carry the stored key
    /// representation rather than the caller's spelling.
    fn stored_key(&self, data: &HashMap<K, V>, key: &K) -> Option<K> {
        if self.natural {
            data.get_key_value(key).map(|(stored, _)| stored.clone())
        } else {
            data.keys().find(|stored| (self.key_equals)(stored, key)).cloned()
        }
    }

    // =========================================================================
    // READS (no notification side effects)
    // =========================================================================

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.data.borrow().len()
    }

    /// Returns true if the map contains no entries.
    pub fn is_empty(&self) -> bool {
        self.data.borrow().is_empty()
    }

    /// Returns true if the comparer finds `key` in the map.
    pub fn contains_key(&self, key: &K) -> bool {
        let data = self.data.borrow();
        if self.natural {
            data.contains_key(key)
        } else {
            data.keys().any(|stored| (self.key_equals)(stored, key))
        }
    }

    /// The keys currently stored, in arbitrary order.
    pub fn keys(&self) -> Vec<K> {
        self.data.borrow().keys().cloned().collect()
    }

    /// Calls `f` for each (key, value) pair.
    ///
    /// The map's storage is borrowed for the duration, so `f` must not
    /// mutate the map (doing so panics).
    pub fn for_each<F>(&self, mut f: F)
    where
        F: FnMut(&K, &V),
    {
        for (k, v) in self.data.borrow().iter() {
            f(k, v);
        }
    }
}

impl<K, V> NotifyingMap<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    /// Returns the value for `key`.
    ///
    /// Fails with [`MapError::KeyNotFound`] when the key is absent. Pure
    /// read: no notification fires.
    pub fn get(&self, key: &K) -> Result<V, MapError> {
        self.try_get(key).ok_or(MapError::KeyNotFound)
    }

    /// Returns the value for `key`, or `None` when absent.
    pub fn try_get(&self, key: &K) -> Option<V> {
        let data = self.data.borrow();
        if self.natural {
            data.get(key).cloned()
        } else {
            data.iter()
                .find(|(stored, _)| (self.key_equals)(stored, key))
                .map(|(_, value)| value.clone())
        }
    }

    /// The values currently stored, in arbitrary order.
    pub fn values(&self) -> Vec<V> {
        self.data.borrow().values().cloned().collect()
    }

    /// The (key, value) pairs currently stored, in arbitrary order.
    pub fn entries(&self) -> Vec<(K, V)> {
        self.data
            .borrow()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    // =========================================================================
    // SET (upsert)
    // =========================================================================

    /// Indexer-style write: insert when absent, overwrite when present.
    ///
    /// Absent key: behaves exactly as [`insert`](Self::insert) - one `Add`
    /// notification, then `Count`, `Keys`, `Values`.
    ///
    /// Present key: overwrites the value under the *stored* key, then raises
    /// `Replace{old, new}` followed by the `Values` property notification
    /// only (the key set and count are unchanged).
    pub fn set(&self, key: K, value: V) {
        let replaced = {
            let mut data = self.data.borrow_mut();
            match self.stored_key(&data, &key) {
                None => None,
                Some(stored) => data.get_mut(&stored).map(|slot| {
                    let old_value = std::mem::replace(slot, value.clone());
                    let old = Entry::new(stored.clone(), old_value);
                    let new = Entry::new(stored, slot.clone());
                    (old, new)
                }),
            }
        };

        match replaced {
            None => self.add_entry(key, value),
            Some((old, new)) => {
                trace!("replace: value overwritten, {} entries", self.len());
                let note = ChangeNotification::replaced(old, new);
                self.changes.emit(&note);
                self.properties.emit(&DerivedProperty::Values);
            }
        }
    }

    // =========================================================================
    // INSERT (add-only)
    // =========================================================================

    /// Adds a new entry.
    ///
    /// Fails with [`MapError::DuplicateKey`] when the comparer finds the key
    /// already present (unlike [`set`](Self::set), which upserts). On success
    /// raises `Add{-, new}` then `Count`, `Keys`, `Values`, in that order.
    pub fn insert(&self, key: K, value: V) -> Result<(), MapError> {
        {
            let data = self.data.borrow();
            if self.stored_key(&data, &key).is_some() {
                return Err(MapError::DuplicateKey);
            }
        }
        self.add_entry(key, value);
        Ok(())
    }

    /// Shared add path for `insert` and `set`-on-absent-key. The caller has
    /// already established that the key is absent under the active comparer.
    fn add_entry(&self, key: K, value: V) {
        let len = {
            let mut data = self.data.borrow_mut();
            data.insert(key.clone(), value.clone());
            data.len()
        };
        trace!("add: map now holds {len} entries");

        let note = ChangeNotification::added(Entry::new(key, value));
        self.changes.emit(&note);
        self.emit_structural_properties();
    }

    // =========================================================================
    // REMOVE
    // =========================================================================

    /// Removes the entry for `key`.
    ///
    /// Returns false (and fires nothing) when the key is absent - a missing
    /// key is a normal no-op, not an error. On success the `Remove`
    /// notification's old entry is the stored (key, value) pair captured
    /// before removal; then `Count`, `Keys`, `Values` fire.
    pub fn remove(&self, key: &K) -> bool {
        let removed = {
            let mut data = self.data.borrow_mut();
            match self.stored_key(&data, key) {
                None => None,
                Some(stored) => data
                    .remove(&stored)
                    .map(|value| Entry::new(stored, value)),
            }
        };

        match removed {
            None => false,
            Some(old) => {
                trace!("remove: map now holds {} entries", self.len());
                let note = ChangeNotification::removed(old);
                self.changes.emit(&note);
                self.emit_structural_properties();
                true
            }
        }
    }

    // =========================================================================
    // CLEAR
    // =========================================================================

    /// Removes every entry, then raises exactly one `Clear{-, -}` followed by
    /// `Count`, `Keys`, `Values`. No per-entry notifications fire regardless
    /// of prior size, and the notification fires even when the map was
    /// already empty.
    pub fn clear(&self) {
        let before = {
            let mut data = self.data.borrow_mut();
            let before = data.len();
            data.clear();
            before
        };
        trace!("clear: removed {before} entries");

        let note = ChangeNotification::cleared();
        self.changes.emit(&note);
        self.emit_structural_properties();
    }

    // =========================================================================
    // DISPATCH
    // =========================================================================

    /// Structural mutations touch all three derived properties, in the
    /// contract's fixed order.
    fn emit_structural_properties(&self) {
        self.properties.emit(&DerivedProperty::Count);
        self.properties.emit(&DerivedProperty::Keys);
        self.properties.emit(&DerivedProperty::Values);
    }
}

// =============================================================================
// SUBSCRIPTIONS
// =============================================================================

impl<K, V> NotifyingMap<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Attach an observer to the structured change channel.
    ///
    /// Fire-and-forget broadcast: any number of observers may attach, and a
    /// mutation with zero observers mutates identically but skips dispatch.
    pub fn on_change(
        &self,
        callback: impl Fn(&ChangeNotification<K, V>) + 'static,
    ) -> SubscriptionId {
        self.changes.subscribe(callback)
    }

    /// Attach an observer to the derived-property channel.
    pub fn on_property_changed(
        &self,
        callback: impl Fn(&DerivedProperty) + 'static,
    ) -> SubscriptionId {
        self.properties.subscribe(callback)
    }

    /// Detach a structured-change observer. Returns true if it was attached.
    pub fn unsubscribe_changes(&self, id: SubscriptionId) -> bool {
        self.changes.unsubscribe(id)
    }

    /// Detach a derived-property observer. Returns true if it was attached.
    pub fn unsubscribe_properties(&self, id: SubscriptionId) -> bool {
        self.properties.unsubscribe(id)
    }
}

impl<K, V> Default for NotifyingMap<K, V>
where
    K: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> Clone for NotifyingMap<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    fn clone(&self) -> Self {
        // Clones share entries and comparer but start with empty subscriber
        // lists - observers are attached to a particular map instance.
        Self {
            data: RefCell::new(self.data.borrow().clone()),
            key_equals: self.key_equals,
            natural: self.natural,
            changes: SubscriberList::new(),
            properties: SubscriberList::new(),
        }
    }
}

impl<K, V> std::fmt::Debug for NotifyingMap<K, V>
where
    K: Eq + Hash + Clone + std::fmt::Debug,
    V: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotifyingMap")
            .field("data", &self.data.borrow())
            .field("change_subscribers", &self.changes.len())
            .field("property_subscribers", &self.properties.len())
            .finish()
    }
}

// =============================================================================
// TESTS
// =============================================================================
