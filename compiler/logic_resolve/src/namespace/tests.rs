use logic_ir::{AstBuilder, Origin, ProgramFile};
use pretty_assertions::assert_eq;

use super::*;

fn keys(map: &IndexMap<String, NodeId>) -> Vec<&str> {
    map.keys().map(String::as_str).collect()
}

fn build_one(b: AstBuilder, root: NodeId) -> (SyntaxArena, Result<Namespace, NamespaceError>) {
    let arena = b.finish();
    let result = Namespace::build(&arena, &[ProgramFile::new(root, Origin::file("main.logic"))]);
    (arena, result)
}

#[test]
fn primitive_record_registers_type_and_fields_only() {
    // struct Color { let value: String = "" }
    let b = AstBuilder::new();
    let field = b.variable("value", Some(b.type_named("String")), Some(b.string("")));
    let color = b.record("Color", &[], [field]);
    let root = b.program([color]);
    let (_, namespace) = build_one(b, root);
    let namespace = namespace.unwrap_or_default();

    assert_eq!(keys(namespace.types()), vec!["Color"]);
    assert_eq!(keys(namespace.values()), vec!["Color.value"]);
}

#[test]
fn user_record_gets_constructor_value() {
    let b = AstBuilder::new();
    let x = b.variable("x", Some(b.type_named("Number")), Some(b.number(0.0)));
    let point = b.record("Point", &[], [x]);
    let root = b.program([point]);
    let pattern = b.pattern_of(point);
    let (_, namespace) = build_one(b, root);
    let namespace = namespace.unwrap_or_default();

    assert_eq!(keys(namespace.values()), vec!["Point.x", "Point"]);
    assert_eq!(namespace.value("Point"), pattern);
    assert_eq!(namespace.type_named("Point"), pattern);
    assert_eq!(pattern.and_then(|p| namespace.value_name(p)), Some("Point"));
}

#[test]
fn enumeration_registers_cases_not_constructor() {
    // enum TextAlign { case left(); case center(); case right() }
    let b = AstBuilder::new();
    let align = b.enumeration(
        "TextAlign",
        &[],
        [b.case("left", []), b.case("center", []), b.case("right", [])],
    );
    let root = b.program([align]);
    let (_, namespace) = build_one(b, root);
    let namespace = namespace.unwrap_or_default();

    assert_eq!(keys(namespace.types()), vec!["TextAlign"]);
    assert_eq!(
        keys(namespace.values()),
        vec!["TextAlign.left", "TextAlign.center", "TextAlign.right"]
    );
}

#[test]
fn namespaces_qualify_and_function_bodies_are_skipped() {
    let b = AstBuilder::new();
    let local = b.variable("tmp", None, Some(b.number(1.0)));
    let darken = b.function(
        "darken",
        &[],
        [b.parameter("amount", b.type_named("Number"), None)],
        b.type_named("Color"),
        [local, b.ret(b.ident("tmp"))],
    );
    let primary = b.variable("primary", None, Some(b.color("#FF0000")));
    let ns = b.namespace("Colors", [primary, darken]);
    let root = b.program([ns]);
    let (_, namespace) = build_one(b, root);
    let namespace = namespace.unwrap_or_default();

    assert_eq!(keys(namespace.values()), vec!["Colors.primary", "Colors.darken"]);
    assert!(namespace.types().is_empty());
}

#[test]
fn duplicate_type_is_fatal() {
    let b = AstBuilder::new();
    let first = b.record("Color", &[], []);
    let second = b.record("Color", &[], []);
    let root = b.program([first, second]);
    let (_, namespace) = build_one(b, root);

    let Err(NamespaceError::Collision { kind, name, .. }) = namespace else {
        panic!("expected a collision");
    };
    assert_eq!(kind, NameKind::Type);
    assert_eq!(name, "Color");
}

#[test]
fn collisions_across_files_are_fatal() {
    let b = AstBuilder::new();
    let library = b.program([b.variable("black", None, None)]);
    let user = b.program([b.variable("black", None, Some(b.number(0.0)))]);
    let arena = b.finish();

    let result = Namespace::build(
        &arena,
        &[
            ProgramFile::new(library, Origin::StandardLibrary),
            ProgramFile::new(user, Origin::file("main.logic")),
        ],
    );
    let diagnostic = result.err().map(|error| error.to_diagnostic());
    assert_eq!(diagnostic.map(|d| d.code), Some(ErrorCode::L1001));
}

#[test]
fn merge_is_disjoint_union() {
    let mut left = Namespace::default();
    let mut right = Namespace::default();
    assert_eq!(left.insert_value("a".into(), NodeId::new(1)), Ok(()));
    assert_eq!(right.insert_value("b".into(), NodeId::new(2)), Ok(()));
    assert_eq!(right.insert_type("T".into(), NodeId::new(3)), Ok(()));

    assert_eq!(left.clone().merge(right.clone()), Ok(()));
    assert_eq!(left.merge(right.clone()), Ok(()));
    assert_eq!(keys(left.values()), vec!["a", "b"]);

    let mut clash = Namespace::default();
    assert_eq!(clash.insert_value("b".into(), NodeId::new(9)), Ok(()));
    assert!(matches!(
        left.merge(clash),
        Err(NamespaceError::Collision {
            kind: NameKind::Value,
            ..
        })
    ));
}
