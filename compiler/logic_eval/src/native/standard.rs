//! Natives backing the compiler's prelude.
//!
//! Binary operations take labeled `a:` and `b:` arguments; unary ones take
//! `value:`. Array operations take `array:` plus their operand.

use logic_types::StaticType;

use super::{CallArguments, NativeError, NativeRegistry};
use crate::Value;

pub(super) fn register(registry: &mut NativeRegistry) {
    // Boolean
    registry.register_function("Boolean.and", boolean_and);
    registry.register_function("Boolean.or", boolean_or);
    registry.register_function("Boolean.not", boolean_not);

    // Number
    registry.register_function("Number.add", number_add);
    registry.register_function("Number.subtract", number_subtract);
    registry.register_function("Number.multiply", number_multiply);
    registry.register_function("Number.divide", number_divide);
    registry.register_function("Number.isEqual", number_is_equal);
    registry.register_function("Number.isLessThan", number_is_less_than);
    registry.register_function("Number.isGreaterThan", number_is_greater_than);

    // String
    registry.register_function("String.concat", string_concat);
    registry.register_function("String.isEqual", string_is_equal);
    registry.register_function("String.length", string_length);

    // Color
    registry.register_function("Color.isEqual", color_is_equal);
    registry.register_value("Color.black", Value::color("#000000"));
    registry.register_value("Color.white", Value::color("#FFFFFF"));

    // Array
    registry.register_function("Array.at", array_at);
    registry.register_function("Array.count", array_count);
    registry.register_function("Array.append", array_append);
}

fn boolean_and(args: &CallArguments<'_>, _: &StaticType) -> Result<Value, NativeError> {
    Ok(Value::boolean(args.boolean("a")? && args.boolean("b")?))
}

fn boolean_or(args: &CallArguments<'_>, _: &StaticType) -> Result<Value, NativeError> {
    Ok(Value::boolean(args.boolean("a")? || args.boolean("b")?))
}

fn boolean_not(args: &CallArguments<'_>, _: &StaticType) -> Result<Value, NativeError> {
    Ok(Value::boolean(!args.boolean("value")?))
}

fn number_add(args: &CallArguments<'_>, _: &StaticType) -> Result<Value, NativeError> {
    Ok(Value::number(args.number("a")? + args.number("b")?))
}

fn number_subtract(args: &CallArguments<'_>, _: &StaticType) -> Result<Value, NativeError> {
    Ok(Value::number(args.number("a")? - args.number("b")?))
}

fn number_multiply(args: &CallArguments<'_>, _: &StaticType) -> Result<Value, NativeError> {
    Ok(Value::number(args.number("a")? * args.number("b")?))
}

/// IEEE division; dividing by zero yields an infinity or NaN.
fn number_divide(args: &CallArguments<'_>, _: &StaticType) -> Result<Value, NativeError> {
    Ok(Value::number(args.number("a")? / args.number("b")?))
}

#[allow(clippy::float_cmp)]
fn number_is_equal(args: &CallArguments<'_>, _: &StaticType) -> Result<Value, NativeError> {
    Ok(Value::boolean(args.number("a")? == args.number("b")?))
}

fn number_is_less_than(args: &CallArguments<'_>, _: &StaticType) -> Result<Value, NativeError> {
    Ok(Value::boolean(args.number("a")? < args.number("b")?))
}

fn number_is_greater_than(args: &CallArguments<'_>, _: &StaticType) -> Result<Value, NativeError> {
    Ok(Value::boolean(args.number("a")? > args.number("b")?))
}

fn string_concat(args: &CallArguments<'_>, _: &StaticType) -> Result<Value, NativeError> {
    let mut joined = args.string("a")?.to_owned();
    joined.push_str(args.string("b")?);
    Ok(Value::string(joined))
}

fn string_is_equal(args: &CallArguments<'_>, _: &StaticType) -> Result<Value, NativeError> {
    Ok(Value::boolean(args.string("a")? == args.string("b")?))
}

#[allow(clippy::cast_precision_loss)]
fn string_length(args: &CallArguments<'_>, _: &StaticType) -> Result<Value, NativeError> {
    Ok(Value::number(args.string("value")?.chars().count() as f64))
}

fn color_is_equal(args: &CallArguments<'_>, _: &StaticType) -> Result<Value, NativeError> {
    let a = args.color("a")?;
    let b = args.color("b")?;
    Ok(Value::boolean(a.eq_ignore_ascii_case(b)))
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
fn array_at(args: &CallArguments<'_>, _: &StaticType) -> Result<Value, NativeError> {
    let elements = args.array("array")?;
    let index = args.number("index")?;
    let out_of_bounds = || NativeError::IndexOutOfBounds {
        index,
        len: elements.len(),
    };
    if index.fract() != 0.0 || index < 0.0 || index >= elements.len() as f64 {
        return Err(out_of_bounds());
    }
    elements.get(index as usize).cloned().ok_or_else(out_of_bounds)
}

#[allow(clippy::cast_precision_loss)]
fn array_count(args: &CallArguments<'_>, _: &StaticType) -> Result<Value, NativeError> {
    Ok(Value::number(args.array("array")?.len() as f64))
}

fn array_append(args: &CallArguments<'_>, result_type: &StaticType) -> Result<Value, NativeError> {
    let mut elements = args.array("array")?.to_vec();
    elements.push(args.get("element")?.clone());
    Ok(Value::array(result_type.clone(), elements))
}
