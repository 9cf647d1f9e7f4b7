// ============================================================================
// notify-map - Key Comparers
// Pluggable key-equality functions for the map's notion of key identity
// ============================================================================
//
// The active comparer decides what "the same key" means for every key-driven
// operation: duplicate detection on insert, upsert-vs-insert classification
// on set, removal, lookup, and reconstruction of the stored entry for
// Replace/Remove notifications.
//
// A comparer must be an equivalence relation, and it must treat keys that are
// equal under `==` as equal (it may only be coarser than natural equality,
// never finer). Case-insensitive string comparison is the canonical example.
// ============================================================================

// =============================================================================
// COMPARER FUNCTION TYPE
// =============================================================================

/// Key-equality function used by the map.
///
/// A plain function pointer so maps stay `Clone`/`Debug`-friendly and the
/// comparer itself carries no state.
pub type KeyEquals<K> = fn(&K, &K) -> bool;

// =============================================================================
// NATURAL EQUALITY (Default)
// =============================================================================

/// Default comparer: the key type's own `PartialEq`.
///
/// # Example
/// ```
/// use notify_map::comparer::natural_equals;
///
/// assert!(natural_equals(&42, &42));
/// assert!(!natural_equals(&42, &43));
/// ```
pub fn natural_equals<K: PartialEq>(a: &K, b: &K) -> bool {
    a == b
}

// =============================================================================
// CASE-INSENSITIVE STRING COMPARERS
// =============================================================================

/// ASCII case-insensitive comparer for `String` keys.
///
/// With this comparer, a map that stores `"Alice"` treats a lookup for
/// `"ALICE"` as a hit - and notifications for that entry carry the stored
/// `"Alice"` spelling, not the spelling the caller passed in.
///
/// # Example
/// ```
/// use notify_map::comparer::ascii_case_insensitive;
///
/// assert!(ascii_case_insensitive(
///     &"Alice".to_string(),
///     &"ALICE".to_string(),
/// ));
/// assert!(!ascii_case_insensitive(
///     &"Alice".to_string(),
///     &"Bob".to_string(),
/// ));
/// ```
pub fn ascii_case_insensitive(a: &String, b: &String) -> bool {
    a.eq_ignore_ascii_case(b)
}

/// ASCII case-insensitive comparer for `&str` keys.
pub fn ascii_case_insensitive_str(a: &&str, b: &&str) -> bool {
    a.eq_ignore_ascii_case(b)
}

// =============================================================================
// TESTS
// =============================================================================
