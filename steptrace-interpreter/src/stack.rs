//! Stack safety for deeply recursive user functions.
//!
//! Each call into a user function grows the native stack by a few evaluator
//! frames; `stacker` extends it on demand so the configured recursion limit,
//! not the thread's stack size, decides how deep a program may recurse.

/// Minimum stack space to keep available (100KB red zone).
const RED_ZONE: usize = 100 * 1024;

/// Stack space to allocate when growing (1MB).
const STACK_PER_RECURSION: usize = 1024 * 1024;

/// Ensure sufficient stack space is available before executing `f`.
#[inline]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}
