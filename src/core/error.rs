// ============================================================================
// notify-map - Errors
// ============================================================================

use thiserror::Error;

/// Errors raised by [`NotifyingMap`](crate::NotifyingMap) operations.
///
/// Both variants are immediate, synchronous, local failures: the map is left
/// unchanged when either fires, and no notification is dispatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MapError {
    /// `get` was called with a key the map does not contain.
    ///
    /// `remove` never raises this - removing an absent key is a normal no-op
    /// reported through its `bool` result.
    #[error("the given key was not present in the map")]
    KeyNotFound,

    /// `insert` was called with a key the map already contains.
    ///
    /// `set` never raises this - it upserts silently.
    #[error("an entry with the same key has already been added")]
    DuplicateKey,
}

// =============================================================================
// TESTS
// =============================================================================
