//! Host implementations of standard library declarations.
//!
//! Standard library functions are declared in Logic with empty bodies. When a
//! call resolves to one, the evaluator looks its qualified name up here and
//! runs the native instead of the (empty) body. Value declarations without an
//! initializer (`Color.black`) are looked up the same way.

mod standard;

use indexmap::IndexMap;
use logic_types::StaticType;
use rustc_hash::FxHashMap;

use crate::Value;

/// Native function signature.
///
/// Receives the merged arguments of the call and the call's resolved result
/// type, which natives producing generic values (`Array.append`) adopt.
pub type NativeFn = fn(&CallArguments<'_>, &StaticType) -> Result<Value, NativeError>;

/// Why a native could not produce a value.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum NativeError {
    #[error("missing argument `{name}`")]
    MissingArgument { name: String },

    #[error("argument `{name}` should be {expected}, found {found}")]
    WrongArgumentType {
        name: String,
        expected: &'static str,
        found: String,
    },

    #[error("index {index} is out of bounds for an array of {len}")]
    IndexOutOfBounds { index: f64, len: usize },
}

/// Read access to a call's merged arguments, by parameter name.
#[derive(Copy, Clone, Debug)]
pub struct CallArguments<'a> {
    values: &'a IndexMap<String, Value>,
}

impl<'a> CallArguments<'a> {
    pub fn new(values: &'a IndexMap<String, Value>) -> Self {
        CallArguments { values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, name: &str) -> Result<&'a Value, NativeError> {
        self.values.get(name).ok_or_else(|| NativeError::MissingArgument {
            name: name.to_owned(),
        })
    }

    pub fn boolean(&self, name: &str) -> Result<bool, NativeError> {
        let value = self.get(name)?;
        value.as_bool().ok_or_else(|| wrong_type(name, "a Boolean", value))
    }

    pub fn number(&self, name: &str) -> Result<f64, NativeError> {
        let value = self.get(name)?;
        value.as_number().ok_or_else(|| wrong_type(name, "a Number", value))
    }

    pub fn string(&self, name: &str) -> Result<&'a str, NativeError> {
        let value = self.get(name)?;
        value.as_str().ok_or_else(|| wrong_type(name, "a String", value))
    }

    pub fn array(&self, name: &str) -> Result<&'a [Value], NativeError> {
        let value = self.get(name)?;
        value.as_array().ok_or_else(|| wrong_type(name, "an Array", value))
    }

    /// The CSS string of a `Color` argument.
    pub fn color(&self, name: &str) -> Result<&'a str, NativeError> {
        let value = self.get(name)?;
        value
            .field("value")
            .and_then(Value::as_str)
            .ok_or_else(|| wrong_type(name, "a Color", value))
    }
}

fn wrong_type(name: &str, expected: &'static str, found: &Value) -> NativeError {
    NativeError::WrongArgumentType {
        name: name.to_owned(),
        expected,
        found: found.ty.to_string(),
    }
}

/// Natives by fully-qualified standard library name.
#[derive(Clone, Debug, Default)]
pub struct NativeRegistry {
    functions: FxHashMap<String, NativeFn>,
    values: FxHashMap<String, Value>,
}

impl NativeRegistry {
    /// An empty registry. Every standard library call reports as unhandled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Natives for the prelude shipped with the compiler.
    pub fn standard() -> Self {
        let mut registry = Self::new();
        standard::register(&mut registry);
        registry
    }

    pub fn register_function(&mut self, qualified_name: &str, native: NativeFn) {
        self.functions.insert(qualified_name.to_owned(), native);
    }

    pub fn register_value(&mut self, qualified_name: &str, value: Value) {
        self.values.insert(qualified_name.to_owned(), value);
    }

    pub fn function(&self, qualified_name: &str) -> Option<NativeFn> {
        self.functions.get(qualified_name).copied()
    }

    pub fn value(&self, qualified_name: &str) -> Option<&Value> {
        self.values.get(qualified_name)
    }

    pub fn function_count(&self) -> usize {
        self.functions.len()
    }
}

#[cfg(test)]
mod tests;
