//! Stack growth for deep structural matching.
//!
//! The matcher recurses once per level of pattern/target nesting, and once
//! per element when a list is taken apart with cons patterns. A list of a
//! few hundred thousand elements would exhaust a default thread stack, so
//! every recursive step of the matcher runs through [`ensure_sufficient_stack`].
//!
//! - **Native targets**: `stacker` allocates a fresh stack segment on demand.
//! - **WASM targets**: plain call, the runtime owns the stack.

/// Remaining stack below which a new segment is allocated (128KB).
const RED_ZONE: usize = 128 * 1024;

/// Size of each newly allocated stack segment (2MB).
const SEGMENT_SIZE: usize = 2 * 1024 * 1024;

/// Run `f`, first growing the stack if less than the red zone remains.
///
/// ```text
/// fn depth(list: &[Value]) -> usize {
///     ensure_sufficient_stack(|| match list {
///         [] => 0,
///         [_, rest @ ..] => 1 + depth(rest),
///     })
/// }
/// ```
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, SEGMENT_SIZE, f)
}

/// WASM version: call directly.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
