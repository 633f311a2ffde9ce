//! The built-in standard library.
//!
//! Declarations only. Function bodies are empty and every uninitialized
//! namespace value is backed by [`logic_eval::NativeRegistry::standard`]
//! under the same qualified name, with matching argument labels.

use logic_ir::{AstBuilder, NodeId};

/// Build the prelude program with `b`. Its file must carry
/// [`logic_ir::Origin::StandardLibrary`].
pub fn build_prelude(b: &AstBuilder) -> NodeId {
    let array_of_t = || b.type_applied("Array", [b.type_named("T")]);

    b.program([
        b.record("Boolean", &[], []),
        b.record("Number", &[], []),
        b.record("String", &[], []),
        b.record("Array", &["T"], []),
        b.record("Color", &[], [b.variable("value", Some(b.type_named("String")), None)]),
        b.enumeration(
            "Optional",
            &["Wrapped"],
            [b.case("value", [b.type_named("Wrapped")]), b.case("none", [])],
        ),
        b.namespace(
            "Boolean",
            [
                binary(b, "and", "Boolean", "Boolean"),
                binary(b, "or", "Boolean", "Boolean"),
                native(b, "not", &[], &[("value", b.type_named("Boolean"))], b.type_named("Boolean")),
            ],
        ),
        b.namespace(
            "Number",
            [
                binary(b, "add", "Number", "Number"),
                binary(b, "subtract", "Number", "Number"),
                binary(b, "multiply", "Number", "Number"),
                binary(b, "divide", "Number", "Number"),
                binary(b, "isEqual", "Number", "Boolean"),
                binary(b, "isLessThan", "Number", "Boolean"),
                binary(b, "isGreaterThan", "Number", "Boolean"),
            ],
        ),
        b.namespace(
            "String",
            [
                binary(b, "concat", "String", "String"),
                binary(b, "isEqual", "String", "Boolean"),
                native(b, "length", &[], &[("value", b.type_named("String"))], b.type_named("Number")),
            ],
        ),
        b.namespace(
            "Color",
            [
                binary(b, "isEqual", "Color", "Boolean"),
                b.variable("black", Some(b.type_named("Color")), None),
                b.variable("white", Some(b.type_named("Color")), None),
            ],
        ),
        b.namespace(
            "Array",
            [
                native(
                    b,
                    "at",
                    &["T"],
                    &[("array", array_of_t()), ("index", b.type_named("Number"))],
                    b.type_named("T"),
                ),
                native(b, "count", &["T"], &[("array", array_of_t())], b.type_named("Number")),
                native(
                    b,
                    "append",
                    &["T"],
                    &[("array", array_of_t()), ("element", b.type_named("T"))],
                    array_of_t(),
                ),
            ],
        ),
    ])
}

/// A body-less function; `parameters` are `(label, annotation)` pairs.
fn native(b: &AstBuilder, name: &str, generics: &[&str], parameters: &[(&str, NodeId)], result: NodeId) -> NodeId {
    b.function(
        name,
        generics,
        parameters
            .iter()
            .map(|(label, annotation)| b.parameter(label, *annotation, None)),
        result,
        [],
    )
}

/// `name(a: operand, b: operand) -> result`
fn binary(b: &AstBuilder, name: &str, operand: &str, result: &str) -> NodeId {
    native(
        b,
        name,
        &[],
        &[("a", b.type_named(operand)), ("b", b.type_named(operand))],
        b.type_named(result),
    )
}
