//! Parser warnings with deduplication.
//!
//! Lenient parsing recovers from the same kind of problem over and over on
//! real-world markup. Each distinct message is logged once per run so the
//! output stays readable; the full list lives in the parser's issue report.

use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};

/// Log target used for every warning emitted from this module.
pub const LOG_TARGET: &str = "thicket";

/// Global set of warnings we've already logged (to deduplicate)
static WARNED: Mutex<Option<HashSet<String>>> = Mutex::new(None);

/// Warn about a recovered problem (logs once per unique message)
///
/// Returns `true` if this call logged the message, `false` if it had been
/// logged before.
///
/// # Example
/// ```ignore
/// warn_once("HTML Parser", "recovered from unmatched-close-tag");
/// ```
pub fn warn_once(component: &str, message: &str) -> bool {
    let key = format!("[{component}] {message}");
    let should_log = WARNED
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .get_or_insert_with(HashSet::new)
        .insert(key);

    if should_log {
        log::warn!(target: LOG_TARGET, "[{component}] {message}");
    }
    should_log
}

/// Clear all recorded warnings (call before parsing an unrelated document)
pub fn clear_warnings() {
    let mut guard = WARNED
        .lock()
        .unwrap_or_else(PoisonError::into_inner);
    if let Some(set) = guard.as_mut() {
        set.clear();
    }
}
