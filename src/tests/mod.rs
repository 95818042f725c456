//! Cross-module test suites for the error pipeline



#[cfg(test)]
mod normalize_tests;

#[cfg(test)]
mod reporter_tests;


/// Tests that read or flip the process-wide connectivity flag serialize on
/// this lock so the offline scenario cannot bleed into its neighbors.
#[cfg(test)]
pub(crate) fn connectivity_guard() -> std::sync::MutexGuard<'static, ()> {
    static LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());
    LOCK.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
}

/// Tests that install the process-wide panic hook, or that panic on
/// purpose, serialize on this lock so a hooked test never observes another
/// test's panic.
#[cfg(test)]
pub(crate) fn panic_hook_guard() -> std::sync::MutexGuard<'static, ()> {
    static LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());
    LOCK.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
}
