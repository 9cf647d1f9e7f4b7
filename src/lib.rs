// ============================================================================
// notify-map - An Observable Map Library for Rust
// ============================================================================
//
// A key-value map that pairs every mutation with change notifications, for
// UI/data-binding style consumers that react to additions, replacements,
// removals, and clears without polling.
//
// Two notification channels per map:
// - Structured changes: ChangeNotification { action, old entry, new entry }
// - Derived properties: Count / Keys / Values tags
//
// Single-threaded, synchronous, callback-based. Mutation is always applied
// before notifications fire, and reentrant mutation from a callback is
// permitted.
// ============================================================================

pub mod comparer;
pub mod core;
pub mod map;
pub mod observe;

// Re-export core items at crate root for ergonomic access
pub use core::error::MapError;
pub use core::types::{ChangeAction, ChangeNotification, DerivedProperty, Entry};

pub use comparer::{ascii_case_insensitive, ascii_case_insensitive_str, natural_equals, KeyEquals};
pub use map::NotifyingMap;
pub use observe::{SubscriberList, SubscriptionId};

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    // =========================================================================
    // Crate-surface smoke tests
    // =========================================================================

    #[test]
    fn root_reexports_compose() {
        let map: NotifyingMap<String, i32> = NotifyingMap::new();

        let log: Rc<RefCell<Vec<String>>> = Rc::new(RefCell::new(Vec::new()));

        let log_clone = log.clone();
        map.on_change(move |note| {
            log_clone.borrow_mut().push(format!("{:?}", note.action));
        });
        let log_clone = log.clone();
        map.on_property_changed(move |prop| {
            log_clone.borrow_mut().push(format!("{prop:?}"));
        });

        map.set("a".to_string(), 1);

        assert_eq!(
            *log.borrow(),
            vec!["Add", "Count", "Keys", "Values"]
        );
    }

    #[test]
    fn error_variants_surface_at_root() {
        let map: NotifyingMap<String, i32> = NotifyingMap::new();
        assert_eq!(map.get(&"x".to_string()), Err(MapError::KeyNotFound));
        map.set("x".to_string(), 1);
        assert_eq!(
            map.insert("x".to_string(), 2),
            Err(MapError::DuplicateKey)
        );
    }

    #[test]
    fn comparer_reexport_builds_a_case_insensitive_map() {
        let map: NotifyingMap<String, i32> =
            NotifyingMap::with_comparer(ascii_case_insensitive);

        map.set("Alice".to_string(), 1);
        assert!(map.contains_key(&"ALICE".to_string()));
        assert_eq!(map.get(&"alice".to_string()), Ok(1));
    }
}
