//! Unique room identifiers for test isolation.
//!
//! Rooms live for the whole process, so tests sharing a dispatcher must never
//! reuse an identifier.

use ulid::Ulid;

/// Generate a room identifier in the format `{prefix}-{ulid}`.
///
/// ```
/// use quizroom_test_support::unique_room;
///
/// let a = unique_room("lobby");
/// let b = unique_room("lobby");
/// assert_ne!(a, b);
/// assert!(a.starts_with("lobby-"));
/// ```
pub fn unique_room(prefix: &str) -> String {
    format!("{}-{}", prefix, Ulid::new())
}
