use indexmap::IndexMap;
use logic_types::StaticType;
use pretty_assertions::assert_eq;

use super::{CallArguments, NativeError, NativeRegistry};
use crate::Value;

fn arguments(pairs: Vec<(&str, Value)>) -> IndexMap<String, Value> {
    pairs
        .into_iter()
        .map(|(name, value)| (name.to_owned(), value))
        .collect()
}

fn call(name: &str, pairs: Vec<(&str, Value)>, result_type: &StaticType) -> Result<Value, NativeError> {
    let registry = NativeRegistry::standard();
    let Some(native) = registry.function(name) else {
        panic!("no native registered for {name}");
    };
    let values = arguments(pairs);
    native(&CallArguments::new(&values), result_type)
}

#[test]
fn arithmetic_uses_labeled_operands() {
    let sum = call(
        "Number.add",
        vec![("a", Value::number(2.0)), ("b", Value::number(3.5))],
        &StaticType::number(),
    );
    assert_eq!(sum, Ok(Value::number(5.5)));

    let less = call(
        "Number.isLessThan",
        vec![("a", Value::number(2.0)), ("b", Value::number(3.0))],
        &StaticType::boolean(),
    );
    assert_eq!(less, Ok(Value::boolean(true)));
}

#[test]
fn wrong_argument_kind_is_an_error() {
    let result = call(
        "Boolean.not",
        vec![("value", Value::number(1.0))],
        &StaticType::boolean(),
    );
    assert_eq!(
        result,
        Err(NativeError::WrongArgumentType {
            name: "value".into(),
            expected: "a Boolean",
            found: "Number".into(),
        })
    );
}

#[test]
fn missing_argument_is_an_error() {
    let result = call("String.concat", vec![("a", Value::string("x"))], &StaticType::string());
    assert_eq!(result, Err(NativeError::MissingArgument { name: "b".into() }));
}

#[test]
fn array_operations() {
    let numbers = StaticType::array(StaticType::number());
    let array = Value::array(numbers.clone(), vec![Value::number(1.0), Value::number(2.0)]);

    let appended = call(
        "Array.append",
        vec![("array", array.clone()), ("element", Value::number(3.0))],
        &numbers,
    );
    assert_eq!(
        appended.map(|value| value.as_array().map(<[Value]>::len)),
        Ok(Some(3))
    );

    let second = call(
        "Array.at",
        vec![("array", array.clone()), ("index", Value::number(1.0))],
        &StaticType::number(),
    );
    assert_eq!(second, Ok(Value::number(2.0)));

    let past_end = call(
        "Array.at",
        vec![("array", array.clone()), ("index", Value::number(2.0))],
        &StaticType::number(),
    );
    assert_eq!(past_end, Err(NativeError::IndexOutOfBounds { index: 2.0, len: 2 }));

    let count = call("Array.count", vec![("array", array)], &StaticType::number());
    assert_eq!(count, Ok(Value::number(2.0)));
}

#[test]
fn colors_compare_case_insensitively() {
    let result = call(
        "Color.isEqual",
        vec![("a", Value::color("#ffffff")), ("b", Value::color("#FFFFFF"))],
        &StaticType::boolean(),
    );
    assert_eq!(result, Ok(Value::boolean(true)));
}

#[test]
fn native_values_are_registered() {
    let registry = NativeRegistry::standard();
    assert_eq!(registry.value("Color.black"), Some(&Value::color("#000000")));
    assert_eq!(registry.value("Color.red"), None);
    assert!(NativeRegistry::new().function("Number.add").is_none());
}
