//! Compiler configuration.

use logic_eval::{EvalConfig, DEFAULT_MAX_CALL_DEPTH, DEFAULT_MAX_LOOP_ITERATIONS};

/// Environment variable holding a `tracing` filter directive.
pub const LOG_ENV: &str = "LOGIC_LOG";
pub const MAX_LOOP_ITERATIONS_ENV: &str = "LOGIC_MAX_LOOP_ITERATIONS";
pub const MAX_CALL_DEPTH_ENV: &str = "LOGIC_MAX_CALL_DEPTH";

/// Settings for one compile.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompilerConfig {
    /// Join the built-in prelude into every program.
    pub include_standard_library: bool,
    pub max_loop_iterations: usize,
    pub max_call_depth: usize,
    /// `tracing` filter directive for [`crate::init_tracing`].
    pub log_filter: Option<String>,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        CompilerConfig {
            include_standard_library: true,
            max_loop_iterations: DEFAULT_MAX_LOOP_ITERATIONS,
            max_call_depth: DEFAULT_MAX_CALL_DEPTH,
            log_filter: None,
        }
    }
}

impl CompilerConfig {
    /// Defaults overridden by `LOGIC_*` environment variables.
    ///
    /// Unparseable numbers fall back to the default with a warning.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`CompilerConfig::from_env`], reading variables through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        CompilerConfig {
            include_standard_library: defaults.include_standard_library,
            max_loop_iterations: parse_limit(&lookup, MAX_LOOP_ITERATIONS_ENV)
                .unwrap_or(defaults.max_loop_iterations),
            max_call_depth: parse_limit(&lookup, MAX_CALL_DEPTH_ENV).unwrap_or(defaults.max_call_depth),
            log_filter: lookup(LOG_ENV).filter(|filter| !filter.trim().is_empty()),
        }
    }

    #[must_use]
    pub fn without_standard_library(mut self) -> Self {
        self.include_standard_library = false;
        self
    }

    pub fn eval_config(&self) -> EvalConfig {
        EvalConfig::default()
            .with_max_loop_iterations(self.max_loop_iterations)
            .with_max_call_depth(self.max_call_depth)
    }
}

fn parse_limit(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<usize> {
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(limit) => Some(limit),
        Err(error) => {
            tracing::warn!(%key, value = %raw, %error, "ignoring invalid limit");
            None
        }
    }
}
