//! The type-inference domain.

use std::fmt;

/// A type variable or generic parameter name, allocated by
/// [`TypeNameGenerator`](crate::TypeNameGenerator).
#[derive(Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TypeVar(u32);

impl TypeVar {
    #[inline]
    pub const fn new(id: u32) -> Self {
        TypeVar(id)
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

/// One argument slot of a function type.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FunctionArgument {
    pub label: Option<String>,
    pub ty: StaticType,
}

impl FunctionArgument {
    pub fn labeled(label: impl Into<String>, ty: StaticType) -> Self {
        FunctionArgument {
            label: Some(label.into()),
            ty,
        }
    }

    pub fn positional(ty: StaticType) -> Self {
        FunctionArgument { label: None, ty }
    }
}

/// A static type.
///
/// `Generic` only appears in a declaration's own signature. Every use site
/// replaces it with a fresh `Variable` through [`instantiate`](crate::instantiate).
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StaticType {
    Variable(TypeVar),
    Constructor {
        name: String,
        parameters: Vec<StaticType>,
    },
    Generic(TypeVar),
    Function {
        arguments: Vec<FunctionArgument>,
        return_type: Box<StaticType>,
    },
}

impl StaticType {
    pub const BOOLEAN: &'static str = "Boolean";
    pub const NUMBER: &'static str = "Number";
    pub const STRING: &'static str = "String";
    pub const COLOR: &'static str = "Color";
    pub const ARRAY: &'static str = "Array";
    pub const UNIT: &'static str = "Unit";

    pub fn constructor(name: impl Into<String>, parameters: Vec<StaticType>) -> Self {
        StaticType::Constructor {
            name: name.into(),
            parameters,
        }
    }

    /// A constructor with no type parameters.
    pub fn named(name: impl Into<String>) -> Self {
        Self::constructor(name, Vec::new())
    }

    pub fn boolean() -> Self {
        Self::named(Self::BOOLEAN)
    }

    pub fn number() -> Self {
        Self::named(Self::NUMBER)
    }

    pub fn string() -> Self {
        Self::named(Self::STRING)
    }

    pub fn color() -> Self {
        Self::named(Self::COLOR)
    }

    pub fn unit() -> Self {
        Self::named(Self::UNIT)
    }

    pub fn array(element: StaticType) -> Self {
        Self::constructor(Self::ARRAY, vec![element])
    }

    pub fn function(arguments: Vec<FunctionArgument>, return_type: StaticType) -> Self {
        StaticType::Function {
            arguments,
            return_type: Box::new(return_type),
        }
    }

    /// Constructor name, if this is a constructor.
    pub fn constructor_name(&self) -> Option<&str> {
        match self {
            StaticType::Constructor { name, .. } => Some(name),
            _ => None,
        }
    }

    pub fn is_constructor_named(&self, expected: &str) -> bool {
        self.constructor_name() == Some(expected)
    }

    /// Return type of a function type.
    pub fn return_type(&self) -> Option<&StaticType> {
        match self {
            StaticType::Function { return_type, .. } => Some(return_type),
            _ => None,
        }
    }

    /// True if any `Generic` occurs anywhere in this type.
    pub fn has_generics(&self) -> bool {
        match self {
            StaticType::Generic(_) => true,
            StaticType::Variable(_) => false,
            StaticType::Constructor { parameters, .. } => {
                parameters.iter().any(StaticType::has_generics)
            }
            StaticType::Function {
                arguments,
                return_type,
            } => arguments.iter().any(|arg| arg.ty.has_generics()) || return_type.has_generics(),
        }
    }
}

impl fmt::Display for StaticType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StaticType::Variable(var) => write!(f, "?{}", var.raw()),
            StaticType::Generic(var) => write!(f, "'{}", var.raw()),
            StaticType::Constructor { name, parameters } => {
                write!(f, "{name}")?;
                if !parameters.is_empty() {
                    write!(f, "<")?;
                    for (i, param) in parameters.iter().enumerate() {
                        if i > 0 {
                            write!(f, ", ")?;
                        }
                        write!(f, "{param}")?;
                    }
                    write!(f, ">")?;
                }
                Ok(())
            }
            StaticType::Function {
                arguments,
                return_type,
            } => {
                write!(f, "(")?;
                for (i, arg) in arguments.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    if let Some(label) = &arg.label {
                        write!(f, "{label}: ")?;
                    }
                    write!(f, "{}", arg.ty)?;
                }
                write!(f, ") -> {return_type}")
            }
        }
    }
}

/// `head` and `tail` must denote the same type.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Constraint {
    pub head: StaticType,
    pub tail: StaticType,
}

impl Constraint {
    pub fn new(head: StaticType, tail: StaticType) -> Self {
        Constraint { head, tail }
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} == {}", self.head, self.tail)
    }
}
