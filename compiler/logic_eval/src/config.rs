//! Evaluation limits.

/// Default iteration cap for a single `while` loop.
pub const DEFAULT_MAX_LOOP_ITERATIONS: usize = 10_000;

/// Default cap on nested user function calls.
pub const DEFAULT_MAX_CALL_DEPTH: usize = 256;

/// Limits applied while evaluating.
///
/// Loop conditions are memoized within a call like every other node, so a
/// loop whose condition starts out true never observes it change. The
/// iteration cap turns that into a reported error instead of a hang.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EvalConfig {
    pub max_loop_iterations: usize,
    pub max_call_depth: usize,
}

impl Default for EvalConfig {
    fn default() -> Self {
        EvalConfig {
            max_loop_iterations: DEFAULT_MAX_LOOP_ITERATIONS,
            max_call_depth: DEFAULT_MAX_CALL_DEPTH,
        }
    }
}

impl EvalConfig {
    #[must_use]
    pub fn with_max_loop_iterations(mut self, limit: usize) -> Self {
        self.max_loop_iterations = limit;
        self
    }

    #[must_use]
    pub fn with_max_call_depth(mut self, limit: usize) -> Self {
        self.max_call_depth = limit;
        self
    }
}
