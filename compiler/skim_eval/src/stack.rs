//! Native stack guard for nested evaluation.
//!
//! Non-tail evaluation recurses on the Rust stack. `stacker` grows the stack
//! on demand so the configured depth limit, not the thread's stack size,
//! decides how deep a program may go.

/// Run `f`, first growing the native stack if less than the red zone is left.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    const RED_ZONE: usize = 128 * 1024;
    const GROW_BY: usize = 2 * 1024 * 1024;

    stacker::maybe_grow(RED_ZONE, GROW_BY, f)
}

/// WASM manages its own stack; call directly.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
