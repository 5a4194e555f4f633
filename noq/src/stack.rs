//! Parsing and rewriting recurse once per nesting level of a term, and the
//! parser needs tens of kilobytes of stack per level.

/// Enough for terms nested some thousands of levels deep.
pub const STACK_SIZE: usize = 256 * 1024 * 1024;

/// Runs `f` on a new thread with [`STACK_SIZE`] bytes of stack and waits for it.
///
/// A panic in `f` is resumed on the calling thread.
pub fn with_large_stack<F, T>(f: F) -> std::io::Result<T>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    let handle = std::thread::Builder::new()
        .name("noq".to_string())
        .stack_size(STACK_SIZE)
        .spawn(f)?;
    match handle.join() {
        Ok(value) => Ok(value),
        Err(panic) => std::panic::resume_unwind(panic),
    }
}
