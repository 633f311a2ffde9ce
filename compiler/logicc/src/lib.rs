//! Logic front end driver.
//!
//! # Architecture
//!
//! ```text
//! program files (one shared arena)
//!     │
//!     ▼
//! join_programs ──► one Program root
//!     │
//!     ▼
//! Namespace::build ──► qualified names        (collision = CompileError)
//!     │
//!     ▼
//! Scope::build ──► reference → pattern        (undefined = reported)
//!     │
//!     ▼
//! check + unify ──► Substitution              (mismatch = CompileError)
//!     │
//!     ▼
//! ThunkGraph::build ──► EvaluationContext
//! ```

mod compiler;
mod config;
mod error;
mod prelude;

use std::sync::Once;

pub use compiler::{Compilation, Compiler};
pub use config::{CompilerConfig, LOG_ENV, MAX_CALL_DEPTH_ENV, MAX_LOOP_ITERATIONS_ENV};
pub use error::CompileError;
pub use prelude::build_prelude;

pub use logic_diagnostic::{BufferedReporter, Diagnostic, ErrorCode, Reporter, Severity, TracingReporter};
pub use logic_eval::{EvaluationContext, Memory, Value};
pub use logic_ir::{AstBuilder, NodeId, Origin};
pub use logic_types::StaticType;

static TRACING_INIT: Once = Once::new();

/// Install a hierarchical `tracing` subscriber writing to stderr.
///
/// Filters come from `filter`, else `LOGIC_LOG`, else `RUST_LOG`. With none of
/// them set this is a no-op. Only the first call has any effect.
pub fn init_tracing(filter: Option<&str>) {
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    TRACING_INIT.call_once(|| {
        let directives = filter
            .map(str::to_owned)
            .or_else(|| std::env::var(LOG_ENV).ok())
            .or_else(|| std::env::var("RUST_LOG").ok());
        let Some(directives) = directives else {
            return;
        };

        let filter = EnvFilter::try_new(&directives).unwrap_or_else(|_| EnvFilter::new("warn"));
        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_tree::HierarchicalLayer::new(2)
                    .with_targets(true)
                    .with_writer(std::io::stderr),
            )
            .try_init();
    });
}
