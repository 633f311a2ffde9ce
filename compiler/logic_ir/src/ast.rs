//! Syntax node variants.
//!
//! A Logic program is a tree of declarations, statements, expressions and
//! type annotations. Binding sites (variable, function, parameter, record,
//! enumeration and case names) are separate `Pattern` nodes so that
//! references can resolve to the exact binding identity.

use crate::NodeRange;
use crate::NodeId;

/// Built-in type names that never get a record constructor value.
pub const PRIMITIVE_TYPE_NAMES: [&str; 5] = ["Boolean", "Number", "String", "Array", "Color"];

/// A syntax node. Children are referenced by `NodeId` / `NodeRange`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NodeKind {
    // Program structure
    /// Root of one file, or of several files joined together.
    Program { statements: NodeRange },
    /// A binding site.
    Pattern { name: String },

    // Declarations
    Import { name: NodeId },
    Namespace { name: NodeId, declarations: NodeRange },
    Variable {
        name: NodeId,
        annotation: Option<NodeId>,
        initializer: Option<NodeId>,
    },
    Function {
        name: NodeId,
        generic_parameters: NodeRange,
        parameters: NodeRange,
        return_type: NodeId,
        block: NodeRange,
    },
    Parameter {
        name: NodeId,
        annotation: NodeId,
        default_value: Option<NodeId>,
    },
    GenericParameter { name: NodeId },
    Record {
        name: NodeId,
        generic_parameters: NodeRange,
        declarations: NodeRange,
    },
    Enumeration {
        name: NodeId,
        generic_parameters: NodeRange,
        cases: NodeRange,
    },
    /// `case name(Annotation, ...)`; associated values are type annotations.
    EnumerationCase { name: NodeId, associated_values: NodeRange },

    // Statements
    Branch { condition: NodeId, block: NodeRange },
    Loop { condition: NodeId, block: NodeRange },
    Return { expression: NodeId },
    ExpressionStatement { expression: NodeId },

    // Expressions
    Identifier { name: String },
    Member { object: NodeId, member: String },
    Call { callee: NodeId, arguments: NodeRange },
    Argument {
        label: Option<String>,
        expression: NodeId,
    },
    Literal(Literal),
    Placeholder,

    // Type annotations
    TypeIdentifier {
        name: String,
        generic_arguments: NodeRange,
    },
    FunctionType { arguments: NodeRange, return_type: NodeId },
}

/// Literal payloads.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Literal {
    None,
    Boolean(bool),
    Number(f64),
    String(String),
    /// CSS-style color string, e.g. `#FF0000`.
    Color(String),
    Array(NodeRange),
}

impl NodeKind {
    /// The binding pattern this declaration introduces, if any.
    pub fn declared_pattern(&self) -> Option<NodeId> {
        match self {
            NodeKind::Import { name }
            | NodeKind::Namespace { name, .. }
            | NodeKind::Variable { name, .. }
            | NodeKind::Function { name, .. }
            | NodeKind::Parameter { name, .. }
            | NodeKind::GenericParameter { name }
            | NodeKind::Record { name, .. }
            | NodeKind::Enumeration { name, .. }
            | NodeKind::EnumerationCase { name, .. } => Some(*name),
            _ => None,
        }
    }

    /// Namespaces, records and enumerations extend the qualified-name path.
    pub fn is_container(&self) -> bool {
        matches!(
            self,
            NodeKind::Namespace { .. } | NodeKind::Record { .. } | NodeKind::Enumeration { .. }
        )
    }

    pub fn is_expression(&self) -> bool {
        matches!(
            self,
            NodeKind::Identifier { .. }
                | NodeKind::Member { .. }
                | NodeKind::Call { .. }
                | NodeKind::Literal(_)
                | NodeKind::Placeholder
        )
    }

    /// Short variant name for logs and diagnostics.
    pub fn describe(&self) -> &'static str {
        match self {
            NodeKind::Program { .. } => "program",
            NodeKind::Pattern { .. } => "pattern",
            NodeKind::Import { .. } => "import",
            NodeKind::Namespace { .. } => "namespace",
            NodeKind::Variable { .. } => "variable",
            NodeKind::Function { .. } => "function",
            NodeKind::Parameter { .. } => "parameter",
            NodeKind::GenericParameter { .. } => "generic parameter",
            NodeKind::Record { .. } => "record",
            NodeKind::Enumeration { .. } => "enumeration",
            NodeKind::EnumerationCase { .. } => "enumeration case",
            NodeKind::Branch { .. } => "branch",
            NodeKind::Loop { .. } => "loop",
            NodeKind::Return { .. } => "return",
            NodeKind::ExpressionStatement { .. } => "expression statement",
            NodeKind::Identifier { .. } => "identifier",
            NodeKind::Member { .. } => "member expression",
            NodeKind::Call { .. } => "function call",
            NodeKind::Argument { .. } => "argument",
            NodeKind::Literal(_) => "literal",
            NodeKind::Placeholder => "placeholder",
            NodeKind::TypeIdentifier { .. } => "type identifier",
            NodeKind::FunctionType { .. } => "function type",
        }
    }
}
