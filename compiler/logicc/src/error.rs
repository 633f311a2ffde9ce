//! Fatal compile errors and their diagnostics.

use logic_diagnostic::Diagnostic;
use logic_resolve::NamespaceError;
use logic_types::UnifyError;
use thiserror::Error;

/// A pass failure that stops the compile.
///
/// Everything recoverable goes to the [`logic_diagnostic::Reporter`] instead.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum CompileError {
    #[error(transparent)]
    Namespace(#[from] NamespaceError),

    #[error(transparent)]
    Unify(#[from] UnifyError),
}

impl CompileError {
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            CompileError::Namespace(error) => error.to_diagnostic(),
            CompileError::Unify(error) => error.to_diagnostic(),
        }
    }
}
