//! Stack growth for deeply nested Logic programs.
//!
//! Every pass in the pipeline is plain call-stack recursion: tree traversal,
//! annotation translation, the occurs check, thunk evaluation and
//! function-body interpretation. Generated design-token files can nest
//! arrays and calls far deeper than a default thread stack allows, so each
//! recursive entry point goes through [`ensure_sufficient_stack`].
//!
//! On native targets the `stacker` crate grows the stack on demand. On
//! `wasm32` the closure is called directly.

/// Remaining stack below which a new segment is allocated (128KB).
const RED_ZONE: usize = 128 * 1024;

/// Size of each newly allocated stack segment (2MB).
const SEGMENT_SIZE: usize = 2 * 1024 * 1024;

/// Run `f`, first growing the stack if less than the red zone remains.
///
/// ```text
/// fn walk(&mut self, id: NodeId) -> ControlFlow<()> {
///     ensure_sufficient_stack(|| {
///         // ... recurse into children ...
///     })
/// }
/// ```
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, SEGMENT_SIZE, f)
}

#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nested_depth_does_not_overflow() {
        fn depth(n: u64) -> u64 {
            ensure_sufficient_stack(|| if n == 0 { 0 } else { depth(n - 1) + 1 })
        }

        assert_eq!(depth(200_000), 200_000);
    }

    #[test]
    fn passes_through_results() {
        let result: Result<u32, &str> = ensure_sufficient_stack(|| Err("no value"));
        assert_eq!(result, Err("no value"));
    }
}
