//! Diagnostics for the Logic front end.
//!
//! - `ErrorCode`: searchable L-codes, grouped by pass
//! - `Diagnostic`: code, severity, message and the node it is about
//! - `Reporter`: injected sink for recoverable problems
//!
//! Fatal errors (namespace collisions, unification failures) are typed
//! `Err` values in the passes that raise them; each converts into a
//! `Diagnostic` for display.

mod diagnostic;
mod error_code;
mod reporter;

pub use diagnostic::{Diagnostic, Severity};
pub use error_code::ErrorCode;
pub use reporter::{BufferedReporter, Reporter, TracingReporter};
