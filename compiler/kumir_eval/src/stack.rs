//! Host-stack protection for deeply recursive programs.
//!
//! Expression evaluation and algorithm calls recurse on the host stack. A
//! Kumir program with a few hundred nested calls would overflow the default
//! thread stack long before the call-depth limit fires, so every recursive
//! entry point goes through [`ensure_sufficient_stack`].

/// Run `f`, growing the stack first if less than the red zone remains.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    const RED_ZONE: usize = 128 * 1024;
    const GROW_BY: usize = 2 * 1024 * 1024;

    stacker::maybe_grow(RED_ZONE, GROW_BY, f)
}

/// WASM manages its own stack; the call-depth limit is the only guard.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
