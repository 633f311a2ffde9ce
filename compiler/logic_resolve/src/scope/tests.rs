use logic_diagnostic::{BufferedReporter, ErrorCode};
use logic_ir::{AstBuilder, Origin, ProgramFile};
use pretty_assertions::assert_eq;

use super::*;

struct Resolved {
    scope: Scope,
    reporter: BufferedReporter,
}

fn resolve(b: AstBuilder, root: NodeId) -> Resolved {
    let arena = b.finish();
    let namespace = Namespace::build(&arena, &[ProgramFile::new(root, Origin::file("main.logic"))])
        .unwrap_or_default();
    let reporter = BufferedReporter::new();
    let scope = Scope::build(&arena, root, &namespace, &reporter);
    Resolved { scope, reporter }
}

#[test]
fn parameters_shadow_outer_declarations() {
    // let a = 1
    // func f(a: Number) -> Number { return a }
    let b = AstBuilder::new();
    let outer = b.variable("a", None, Some(b.number(1.0)));
    let param = b.parameter("a", b.type_named("Number"), None);
    let reference = b.ident("a");
    let f = b.function("f", &[], [param], b.type_named("Number"), [b.ret(reference)]);
    let number = b.record("Number", &[], []);
    let root = b.program([number, outer, f]);
    let param_pattern = b.pattern_of(param);
    let outer_pattern = b.pattern_of(outer);

    let Resolved { scope, .. } = resolve(b, root);
    assert_eq!(scope.identifier_expr_to_pattern.get(&reference).copied(), param_pattern);
    assert_ne!(param_pattern, outer_pattern);
}

#[test]
fn default_values_see_earlier_parameters() {
    // func f(a: Number, b: Number = a) -> Number {}
    let b = AstBuilder::new();
    let first = b.parameter("a", b.type_named("Number"), None);
    let default = b.ident("a");
    let second = b.parameter("b", b.type_named("Number"), Some(default));
    let f = b.function("f", &[], [first, second], b.type_named("Number"), []);
    let root = b.program([b.record("Number", &[], []), f]);
    let first_pattern = b.pattern_of(first);

    let Resolved { scope, .. } = resolve(b, root);
    assert_eq!(scope.identifier_expr_to_pattern.get(&default).copied(), first_pattern);
}

#[test]
fn member_chains_resolve_through_namespace() {
    // namespace Colors { let black = #000000 }
    // let c = Colors.black
    let b = AstBuilder::new();
    let black = b.variable("black", None, Some(b.color("#000000")));
    let ns = b.namespace("Colors", [black]);
    let chain = b.path("Colors.black");
    let c = b.variable("c", None, Some(chain));
    let root = b.program([ns, c]);
    let black_pattern = b.pattern_of(black);

    let Resolved { scope, reporter } = resolve(b, root);
    assert_eq!(scope.member_expr_to_pattern.get(&chain).copied(), black_pattern);
    // The inner `Colors` identifier is never looked up on its own.
    assert!(scope.undefined_identifiers.is_empty());
    assert!(reporter.warnings().is_empty());
}

#[test]
fn unknown_member_paths_are_recorded_not_fatal() {
    let b = AstBuilder::new();
    let chain = b.path("Colors.missing");
    let root = b.program([b.variable("c", None, Some(chain))]);

    let Resolved { scope, reporter } = resolve(b, root);
    assert!(scope.undefined_member_expressions.contains(&chain));
    let codes: Vec<ErrorCode> = reporter.warnings().iter().map(|d| d.code).collect();
    assert!(codes.contains(&ErrorCode::L2002));
    // `Colors` is then looked up as a plain identifier and is missing too.
    assert!(codes.contains(&ErrorCode::L2001));
}

#[test]
fn namespace_members_resolve_by_qualified_path() {
    // namespace UI { let gap = 4  let double = gap }
    let b = AstBuilder::new();
    let gap = b.variable("gap", None, Some(b.number(4.0)));
    let reference = b.ident("gap");
    let double = b.variable("double", None, Some(reference));
    let ns = b.namespace("UI", [gap, double]);
    let root = b.program([ns]);
    let gap_pattern = b.pattern_of(gap);

    let Resolved { scope, .. } = resolve(b, root);
    assert_eq!(scope.identifier_expr_to_pattern.get(&reference).copied(), gap_pattern);
}

#[test]
fn record_fields_are_not_bare_identifiers() {
    // struct Point { let x: Number = 0  let y: Number = x }
    let b = AstBuilder::new();
    let x = b.variable("x", Some(b.type_named("Number")), Some(b.number(0.0)));
    let reference = b.ident("x");
    let y = b.variable("y", Some(b.type_named("Number")), Some(reference));
    let point = b.record("Point", &[], [x, y]);
    let root = b.program([b.record("Number", &[], []), point]);
    let x_pattern = b.pattern_of(x);

    let Resolved { scope, .. } = resolve(b, root);
    // Only the qualified `Point.x` path exists, reached through the record's
    // namespace path, never through the lexical scope.
    assert_eq!(scope.identifier_expr_to_pattern.get(&reference).copied(), x_pattern);

    let b = AstBuilder::new();
    let x = b.variable("x", Some(b.type_named("Number")), Some(b.number(0.0)));
    let point = b.record("Point", &[], [x]);
    let outside = b.ident("x");
    let root = b.program([b.record("Number", &[], []), point, b.variable("z", None, Some(outside))]);
    let Resolved { scope, .. } = resolve(b, root);
    assert!(scope.undefined_identifiers.contains(&outside));
}

#[test]
fn generic_parameters_resolve_in_type_scope() {
    // struct Box<T> { let item: T }
    let b = AstBuilder::new();
    let annotation = b.type_named("T");
    let item = b.variable("item", Some(annotation), None);
    let record = b.record("Box", &["T"], [item]);
    let root = b.program([record]);
    let generic_pattern = b.with_arena(|arena| {
        let NodeKind::Record {
            generic_parameters, ..
        } = arena.kind(record)
        else {
            return None;
        };
        arena
            .list(*generic_parameters)
            .first()
            .and_then(|param| arena.kind(*param).declared_pattern())
    });

    let Resolved { scope, .. } = resolve(b, root);
    assert_eq!(scope.type_identifier_to_pattern.get(&annotation).copied(), generic_pattern);
}

#[test]
fn undefined_types_are_recorded() {
    let b = AstBuilder::new();
    let annotation = b.type_named("Missing");
    let root = b.program([b.variable("x", Some(annotation), None)]);

    let Resolved { scope, reporter } = resolve(b, root);
    assert!(scope.undefined_type_identifiers.contains(&annotation));
    assert_eq!(reporter.warnings()[0].code, ErrorCode::L2003);
}

#[test]
fn merge_unions_maps_and_sets() {
    let mut left = Scope::default();
    left.identifier_expr_to_pattern.insert(NodeId::new(1), NodeId::new(2));
    left.undefined_identifiers.insert(NodeId::new(3));
    let mut right = Scope::default();
    right.member_expr_to_pattern.insert(NodeId::new(4), NodeId::new(5));
    right.undefined_type_identifiers.insert(NodeId::new(6));

    left.merge(right);
    assert_eq!(left.pattern_for(NodeId::new(1)), Some(NodeId::new(2)));
    assert_eq!(left.pattern_for(NodeId::new(4)), Some(NodeId::new(5)));
    assert!(left.is_undefined(NodeId::new(3)));
    assert!(left.is_undefined(NodeId::new(6)));
}
