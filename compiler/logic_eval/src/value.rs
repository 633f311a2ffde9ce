//! Runtime values.
//!
//! Every value carries the static type it was produced at, so consumers can
//! tell a `Point` record from a `Size` record with the same fields.

use std::fmt;

use indexmap::IndexMap;
use logic_ir::NodeId;
use logic_types::StaticType;

/// A typed runtime value.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Value {
    pub ty: StaticType,
    pub memory: Memory,
}

/// Value payloads.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Memory {
    Unit,
    Bool(bool),
    Number(f64),
    String(String),
    Array(Vec<Value>),
    /// An enumeration case with its associated values in declaration order.
    Enum { tag: String, data: Vec<Value> },
    /// Record fields in declaration order.
    Record(IndexMap<String, Value>),
    Function(FunctionMemory),
}

/// A callable value: what to run, plus its argument slots.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FunctionMemory {
    pub implementation: FunctionImpl,
    /// Parameter name to declared type and optional default, in declaration
    /// order. Unlabeled arguments fill these slots by position.
    pub default_arguments: IndexMap<String, ArgumentSlot>,
    /// Parameters of the enclosing functions, bound as they were when this
    /// value was made. Empty for top-level functions and constructors.
    pub captures: Vec<(NodeId, Value)>,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ArgumentSlot {
    pub ty: StaticType,
    pub default: Option<Value>,
}

/// What a function value runs when called.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FunctionImpl {
    /// A declared function. Standard library declarations dispatch to a
    /// native by `qualified_name`.
    User {
        declaration: NodeId,
        qualified_name: Option<String>,
    },
    /// A record constructor: builds a record from the merged arguments.
    Record,
    /// An enumeration case constructor.
    Enum { tag: String },
}

impl Value {
    pub fn new(ty: StaticType, memory: Memory) -> Self {
        Value { ty, memory }
    }

    pub fn unit() -> Self {
        Value::new(StaticType::unit(), Memory::Unit)
    }

    pub fn boolean(value: bool) -> Self {
        Value::new(StaticType::boolean(), Memory::Bool(value))
    }

    pub fn number(value: f64) -> Self {
        Value::new(StaticType::number(), Memory::Number(value))
    }

    pub fn string(value: impl Into<String>) -> Self {
        Value::new(StaticType::string(), Memory::String(value.into()))
    }

    /// A `Color` record holding its CSS string in `value`.
    pub fn color(css: impl Into<String>) -> Self {
        let mut fields = IndexMap::with_capacity(1);
        fields.insert("value".to_owned(), Value::string(css));
        Value::new(StaticType::color(), Memory::Record(fields))
    }

    pub fn array(ty: StaticType, elements: Vec<Value>) -> Self {
        Value::new(ty, Memory::Array(elements))
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self.memory {
            Memory::Bool(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self.memory {
            Memory::Number(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match &self.memory {
            Memory::String(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match &self.memory {
            Memory::Array(elements) => Some(elements),
            _ => None,
        }
    }

    pub fn as_function(&self) -> Option<&FunctionMemory> {
        match &self.memory {
            Memory::Function(function) => Some(function),
            _ => None,
        }
    }

    /// A record field, by name.
    pub fn field(&self, name: &str) -> Option<&Value> {
        match &self.memory {
            Memory::Record(fields) => fields.get(name),
            _ => None,
        }
    }

    /// The enumeration case tag, if this is an enumeration value.
    pub fn tag(&self) -> Option<&str> {
        match &self.memory {
            Memory::Enum { tag, .. } => Some(tag),
            _ => None,
        }
    }

    pub fn is_unit(&self) -> bool {
        matches!(self.memory, Memory::Unit)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.memory {
            Memory::Unit => write!(f, "none"),
            Memory::Bool(value) => write!(f, "{value}"),
            Memory::Number(value) => write!(f, "{value}"),
            Memory::String(value) => write!(f, "{value:?}"),
            Memory::Array(elements) => {
                write!(f, "[")?;
                for (index, element) in elements.iter().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{element}")?;
                }
                write!(f, "]")
            }
            Memory::Enum { tag, data } => {
                write!(f, "{}.{tag}(", self.ty)?;
                for (index, value) in data.iter().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{value}")?;
                }
                write!(f, ")")
            }
            Memory::Record(fields) => {
                write!(f, "{}(", self.ty)?;
                for (index, (name, value)) in fields.iter().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{name}: {value}")?;
                }
                write!(f, ")")
            }
            Memory::Function(_) => write!(f, "<function {}>", self.ty),
        }
    }
}
