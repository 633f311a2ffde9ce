//! The injected diagnostic sink.
//!
//! Every pass takes a `&dyn Reporter` for recoverable problems. Fatal errors
//! never go through here; they are returned as typed `Err`s.

use std::cell::RefCell;

use crate::{Diagnostic, Severity};

/// Sink for recoverable diagnostics and progress messages.
pub trait Reporter {
    fn info(&self, message: &str);
    fn log(&self, message: &str);
    fn warn(&self, diagnostic: Diagnostic);
    fn error(&self, diagnostic: Diagnostic);
}

/// Forwards everything to `tracing` events.
#[derive(Copy, Clone, Debug, Default)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn info(&self, message: &str) {
        tracing::info!("{message}");
    }

    fn log(&self, message: &str) {
        tracing::debug!("{message}");
    }

    fn warn(&self, diagnostic: Diagnostic) {
        tracing::warn!(code = %diagnostic.code, node = ?diagnostic.node, "{}", diagnostic.message());
    }

    fn error(&self, diagnostic: Diagnostic) {
        tracing::error!(code = %diagnostic.code, node = ?diagnostic.node, "{}", diagnostic.message());
    }
}

/// Collects diagnostics in memory, in report order.
///
/// Used by tests and by tools that render diagnostics themselves.
#[derive(Debug, Default)]
pub struct BufferedReporter {
    messages: RefCell<Vec<String>>,
    diagnostics: RefCell<Vec<Diagnostic>>,
}

impl BufferedReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.diagnostics.borrow().clone()
    }

    pub fn warnings(&self) -> Vec<Diagnostic> {
        self.with_severity(Severity::Warning)
    }

    pub fn errors(&self) -> Vec<Diagnostic> {
        self.with_severity(Severity::Error)
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.borrow().iter().any(Diagnostic::is_error)
    }

    /// `info` and `log` messages.
    pub fn messages(&self) -> Vec<String> {
        self.messages.borrow().clone()
    }

    pub fn clear(&self) {
        self.messages.borrow_mut().clear();
        self.diagnostics.borrow_mut().clear();
    }

    fn with_severity(&self, severity: Severity) -> Vec<Diagnostic> {
        self.diagnostics
            .borrow()
            .iter()
            .filter(|diag| diag.severity == severity)
            .cloned()
            .collect()
    }
}

impl Reporter for BufferedReporter {
    fn info(&self, message: &str) {
        self.messages.borrow_mut().push(message.to_owned());
    }

    fn log(&self, message: &str) {
        self.messages.borrow_mut().push(message.to_owned());
    }

    fn warn(&self, diagnostic: Diagnostic) {
        self.diagnostics.borrow_mut().push(diagnostic);
    }

    fn error(&self, diagnostic: Diagnostic) {
        self.diagnostics.borrow_mut().push(diagnostic);
    }
}
