use std::fmt;

/// Error codes for all front-end diagnostics.
///
/// Format: L#### where the first digit names the pass:
/// - L1xxx: Namespace construction
/// - L2xxx: Scope resolution
/// - L3xxx: Type checking and unification
/// - L4xxx: Evaluation
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    // Namespace Errors (L1xxx)
    /// Qualified name declared twice
    L1001,

    // Scope Errors (L2xxx)
    /// Undefined identifier
    L2001,
    /// Undefined member expression path
    L2002,
    /// Undefined type identifier
    L2003,

    // Type Errors (L3xxx)
    /// Type constructor names differ
    L3001,
    /// Generic argument counts differ
    L3002,
    /// Positional argument counts differ
    L3003,
    /// Labeled and unlabeled arguments mixed
    L3004,
    /// Constructor unified with function
    L3005,
    /// Type variable occurs in its own binding
    L3006,
    /// Constraint against a generic parameter was skipped (warning)
    L3007,

    // Evaluation Errors (L4xxx)
    /// No thunk or value registered for a node
    L4001,
    /// Standard library call without a native implementation
    L4002,
    /// Callee is not a function value
    L4003,
    /// Native function failed
    L4004,
    /// Node depends on itself
    L4005,
    /// Condition did not evaluate to a boolean
    L4006,
    /// Loop exceeded the iteration limit
    L4007,
    /// Required argument missing at a call
    L4008,
    /// Record value has no such field
    L4009,
    /// Nested calls exceeded the depth limit
    L4010,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            // Namespace
            ErrorCode::L1001 => "L1001",
            // Scope
            ErrorCode::L2001 => "L2001",
            ErrorCode::L2002 => "L2002",
            ErrorCode::L2003 => "L2003",
            // Types
            ErrorCode::L3001 => "L3001",
            ErrorCode::L3002 => "L3002",
            ErrorCode::L3003 => "L3003",
            ErrorCode::L3004 => "L3004",
            ErrorCode::L3005 => "L3005",
            ErrorCode::L3006 => "L3006",
            ErrorCode::L3007 => "L3007",
            // Evaluation
            ErrorCode::L4001 => "L4001",
            ErrorCode::L4002 => "L4002",
            ErrorCode::L4003 => "L4003",
            ErrorCode::L4004 => "L4004",
            ErrorCode::L4005 => "L4005",
            ErrorCode::L4006 => "L4006",
            ErrorCode::L4007 => "L4007",
            ErrorCode::L4008 => "L4008",
            ErrorCode::L4009 => "L4009",
            ErrorCode::L4010 => "L4010",
        }
    }

    /// One-line summary used when a diagnostic has no message of its own.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::L1001 => "name declared more than once",
            ErrorCode::L2001 => "undefined identifier",
            ErrorCode::L2002 => "undefined member expression",
            ErrorCode::L2003 => "undefined type",
            ErrorCode::L3001 => "mismatched type names",
            ErrorCode::L3002 => "mismatched generic argument count",
            ErrorCode::L3003 => "mismatched argument count",
            ErrorCode::L3004 => "inconsistent argument labels",
            ErrorCode::L3005 => "mismatched type kinds",
            ErrorCode::L3006 => "infinite type",
            ErrorCode::L3007 => "generic parameter not unified",
            ErrorCode::L4001 => "missing evaluation dependency",
            ErrorCode::L4002 => "unhandled standard library call",
            ErrorCode::L4003 => "value is not callable",
            ErrorCode::L4004 => "native function failed",
            ErrorCode::L4005 => "cyclic evaluation",
            ErrorCode::L4006 => "condition is not a boolean",
            ErrorCode::L4007 => "loop iteration limit reached",
            ErrorCode::L4008 => "missing argument",
            ErrorCode::L4009 => "unknown record field",
            ErrorCode::L4010 => "call depth limit reached",
        }
    }

    /// Fatal codes abort compilation; the rest are reported and recovered.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            ErrorCode::L1001
                | ErrorCode::L3001
                | ErrorCode::L3002
                | ErrorCode::L3003
                | ErrorCode::L3004
                | ErrorCode::L3005
                | ErrorCode::L3006
        )
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
