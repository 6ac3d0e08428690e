//! Stack growth for deep recursion.
//!
//! The parser recurses once per nested parenthesis, block or call, and
//! the evaluator once per nested expression and several times per FWJS
//! function call. Both wrap their recursive entry points in
//! [`ensure_sufficient_stack`], so source nesting and the evaluator's
//! call-depth limit decide how deep they go, not the host thread's
//! stack size.

/// Grow the stack if less than this much remains (100KB red zone).
#[cfg(not(target_arch = "wasm32"))]
const RED_ZONE: usize = 100 * 1024;

/// Stack space to allocate when growing (1MB).
#[cfg(not(target_arch = "wasm32"))]
const STACK_PER_RECURSION: usize = 1024 * 1024;

#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

/// WASM manages its own stack.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
