//! Custom key-comparer behavior: comparer-defined key identity and stored-key
//! preservation in notification snapshots.

use std::cell::RefCell;
use std::rc::Rc;

use notify_map::{
    ascii_case_insensitive, ChangeAction, ChangeNotification, Entry, MapError, NotifyingMap,
};

fn case_insensitive_map() -> NotifyingMap<String, i32> {
    NotifyingMap::with_comparer(ascii_case_insensitive)
}

#[test]
fn lookup_uses_comparer_identity() {
    let map = case_insensitive_map();
    map.set("Alice".to_string(), 1);

    assert!(map.contains_key(&"ALICE".to_string()));
    assert!(map.contains_key(&"alice".to_string()));
    assert_eq!(map.get(&"aLiCe".to_string()), Ok(1));
    assert_eq!(map.len(), 1);
}

#[test]
fn insert_detects_comparer_duplicates() {
    let map = case_insensitive_map();
    assert_eq!(map.insert("Alice".to_string(), 1), Ok(()));

    // A differently-spelled key is still a duplicate under the comparer
    assert_eq!(
        map.insert("ALICE".to_string(), 2),
        Err(MapError::DuplicateKey)
    );
    assert_eq!(map.len(), 1);
    assert_eq!(map.get(&"alice".to_string()), Ok(1));
}

#[test]
fn set_replaces_under_stored_key() {
    let map = case_insensitive_map();
    map.set("Alice".to_string(), 1);

    let seen: Rc<RefCell<Option<ChangeNotification<String, i32>>>> =
        Rc::new(RefCell::new(None));
    let seen_clone = seen.clone();
    map.on_change(move |note| *seen_clone.borrow_mut() = Some(note.clone()));

    // Caller spells the key differently; the stored spelling wins
    map.set("ALICE".to_string(), 2);

    let note = seen.borrow().clone().unwrap();
    assert_eq!(note.action, ChangeAction::Replace);
    assert_eq!(note.old, Some(Entry::new("Alice".to_string(), 1)));
    assert_eq!(note.new, Some(Entry::new("Alice".to_string(), 2)));

    // No second entry appeared
    assert_eq!(map.len(), 1);
    assert_eq!(map.keys(), vec!["Alice".to_string()]);
    assert_eq!(map.get(&"alice".to_string()), Ok(2));
}

#[test]
fn remove_resolves_and_reports_stored_key() {
    let map = case_insensitive_map();
    map.set("Alice".to_string(), 42);

    let seen: Rc<RefCell<Option<ChangeNotification<String, i32>>>> =
        Rc::new(RefCell::new(None));
    let seen_clone = seen.clone();
    map.on_change(move |note| *seen_clone.borrow_mut() = Some(note.clone()));

    assert!(map.remove(&"aLICE".to_string()));

    let note = seen.borrow().clone().unwrap();
    assert_eq!(note.action, ChangeAction::Remove);
    // Snapshot carries the stored spelling, not the caller's
    assert_eq!(note.old, Some(Entry::new("Alice".to_string(), 42)));
    assert!(map.is_empty());
}

#[test]
fn panicking_comparer_leaves_map_unchanged() {
    fn explosive(_: &String, _: &String) -> bool {
        panic!("comparer failure");
    }

    let map: NotifyingMap<String, i32> = NotifyingMap::with_comparer(explosive);
    // Populating an empty map never consults the comparer (nothing to scan)
    map.set("Alice".to_string(), 1);

    // A read that triggers the comparer panics, and the panic propagates
    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        map.get(&"Bob".to_string())
    }));
    assert!(result.is_err());

    // A mutation that panics mid-resolution leaves storage untouched:
    // key resolution runs before anything is written
    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        map.set("Bob".to_string(), 2)
    }));
    assert!(result.is_err());

    assert_eq!(map.len(), 1);
    assert_eq!(map.keys(), vec!["Alice".to_string()]);

    // The map is still usable - no borrow was left dangling by the unwind
    map.clear();
    assert!(map.is_empty());
    map.set("Carol".to_string(), 3);
    assert_eq!(map.len(), 1);
}

#[test]
fn natural_comparer_distinguishes_case() {
    let map: NotifyingMap<String, i32> = NotifyingMap::new();
    map.set("Alice".to_string(), 1);
    map.set("ALICE".to_string(), 2);

    // Without a comparer these are distinct keys
    assert_eq!(map.len(), 2);
    assert_eq!(map.get(&"Alice".to_string()), Ok(1));
    assert_eq!(map.get(&"ALICE".to_string()), Ok(2));
}
