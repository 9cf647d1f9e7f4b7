// ============================================================================
// notify-map - Core Module
// Notification payload types and the error taxonomy
// ============================================================================

pub mod error;
pub mod types;

// Re-export commonly used items
pub use error::MapError;
pub use types::{ChangeAction, ChangeNotification, DerivedProperty, Entry};
