//! Correlation ID management
//!
//! Correlation IDs link an error to the log entries around it. The current
//! ID lives in thread-local storage; every constructed error samples it
//! into its metadata.

use std::cell::RefCell;
use uuid::Uuid;

thread_local! {
    static CURRENT_CORRELATION_ID: RefCell<Option<String>> = const { RefCell::new(None) };
}

/// Generate a new correlation ID.
pub fn generate_correlation_id() -> String {
    Uuid::new_v4().to_string()
}

/// Set the current correlation ID for the current thread.
pub fn set_correlation_id(correlation_id: impl Into<String>) {
    let correlation_id = correlation_id.into();
    CURRENT_CORRELATION_ID.with(|current| {
        *current.borrow_mut() = Some(correlation_id);
    });
}

/// Get the current correlation ID for the current thread.
pub fn get_correlation_id() -> Option<String> {
    CURRENT_CORRELATION_ID.with(|current| current.borrow().clone())
}

/// Clear the current correlation ID for the current thread.
pub fn clear_correlation_id() {
    CURRENT_CORRELATION_ID.with(|current| {
        *current.borrow_mut() = None;
    });
}

/// Execute a function with a specific correlation ID, restoring the
/// previous one afterwards.
pub fn with_correlation_id<F, R>(correlation_id: impl Into<String>, f: F) -> R
where
    F: FnOnce() -> R,
{
    let previous = get_correlation_id();
    set_correlation_id(correlation_id);
    let result = f();
    match previous {
        Some(id) => set_correlation_id(id),
        None => clear_correlation_id(),
    }
    result
}

/// Execute a function with a fresh correlation ID.
pub fn with_new_correlation_id<F, R>(f: F) -> R
where
    F: FnOnce() -> R,
{
    with_correlation_id(generate_correlation_id(), f)
}

/// Get the current correlation ID or generate a new one.
pub fn get_or_generate_correlation_id() -> String {
    get_correlation_id().unwrap_or_else(generate_correlation_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generation_is_unique() {
        assert_ne!(generate_correlation_id(), generate_correlation_id());
    }

    #[test]
    fn set_and_get() {
        let id = generate_correlation_id();
        set_correlation_id(&id);
        assert_eq!(get_correlation_id(), Some(id));
        clear_correlation_id();
        assert_eq!(get_correlation_id(), None);
    }

    #[test]
    fn scoped_id_restores_the_previous_one() {
        set_correlation_id("outer");
        let result = with_correlation_id("inner", || {
            assert_eq!(get_correlation_id().as_deref(), Some("inner"));
            "done"
        });
        assert_eq!(result, "done");
        assert_eq!(get_correlation_id().as_deref(), Some("outer"));
        clear_correlation_id();
    }

    #[test]
    fn fresh_id_is_scoped() {
        clear_correlation_id();
        with_new_correlation_id(|| {
            assert!(get_correlation_id().is_some());
        });
        assert_eq!(get_correlation_id(), None);
    }

    #[test]
    fn get_or_generate_prefers_the_current_id() {
        set_correlation_id("fixed");
        assert_eq!(get_or_generate_correlation_id(), "fixed");
        clear_correlation_id();
        assert!(!get_or_generate_correlation_id().is_empty());
    }
}
