use logic_diagnostic::{BufferedReporter, ErrorCode};
use pretty_assertions::assert_eq;

use super::*;

fn var(id: u32) -> StaticType {
    StaticType::Variable(TypeVar::new(id))
}

fn solve(constraints: Vec<Constraint>) -> Result<Substitution, UnifyError> {
    unify(constraints, &BufferedReporter::new())
}

#[test]
fn array_element_resolves_through_annotation() {
    // let x: Array<Number> = []
    let sub = solve(vec![Constraint::new(
        StaticType::array(var(0)),
        StaticType::array(StaticType::number()),
    )])
    .unwrap_or_default();
    assert_eq!(sub.resolve(&var(0)), StaticType::number());
}

#[test]
fn bindings_propagate_to_pending_constraints() {
    let sub = solve(vec![
        Constraint::new(var(0), var(1)),
        Constraint::new(var(1), StaticType::string()),
    ])
    .unwrap_or_default();
    assert_eq!(sub.resolve(&var(0)), StaticType::string());
    assert_eq!(sub.resolve(&var(1)), StaticType::string());
}

#[test]
fn equal_constraints_are_dropped() {
    let sub = solve(vec![Constraint::new(StaticType::number(), StaticType::number())])
        .unwrap_or_default();
    assert!(sub.is_empty());
}

#[test]
fn constructor_name_mismatch_is_fatal() {
    let err = solve(vec![Constraint::new(StaticType::number(), StaticType::string())]);
    assert_eq!(
        err,
        Err(UnifyError::NameMismatch {
            expected: "Number".into(),
            found: "String".into(),
        })
    );
}

#[test]
fn generic_argument_count_mismatch_is_fatal() {
    let err = solve(vec![Constraint::new(
        StaticType::array(var(0)),
        StaticType::named("Array"),
    )]);
    assert!(matches!(
        err,
        Err(UnifyError::GenericArgumentsCountMismatch {
            expected: 1,
            found: 0,
            ..
        })
    ));
}

#[test]
fn constructor_against_function_is_kind_mismatch() {
    let err = solve(vec![Constraint::new(
        StaticType::number(),
        StaticType::function(vec![], StaticType::number()),
    )]);
    assert!(matches!(err, Err(UnifyError::KindMismatch { .. })));
    assert_eq!(err.err().map(|e| e.code()), Some(ErrorCode::L3005));
}

#[test]
fn positional_arguments_unify_pairwise() {
    let callee = StaticType::function(
        vec![
            FunctionArgument::positional(StaticType::number()),
            FunctionArgument::positional(StaticType::string()),
        ],
        StaticType::boolean(),
    );
    let call = StaticType::function(
        vec![
            FunctionArgument::positional(var(0)),
            FunctionArgument::positional(var(1)),
        ],
        var(2),
    );
    let sub = solve(vec![Constraint::new(callee, call)]).unwrap_or_default();
    assert_eq!(sub.resolve(&var(0)), StaticType::number());
    assert_eq!(sub.resolve(&var(1)), StaticType::string());
    assert_eq!(sub.resolve(&var(2)), StaticType::boolean());
}

#[test]
fn positional_arity_mismatch_is_fatal() {
    let err = solve(vec![Constraint::new(
        StaticType::function(vec![FunctionArgument::positional(var(0))], var(1)),
        StaticType::function(vec![], var(2)),
    )]);
    assert_eq!(
        err,
        Err(UnifyError::ArgumentCountMismatch {
            expected: 1,
            found: 0,
        })
    );
}

#[test]
fn mixed_labels_are_fatal() {
    let err = solve(vec![Constraint::new(
        StaticType::function(
            vec![FunctionArgument::labeled("value", StaticType::number())],
            StaticType::unit(),
        ),
        StaticType::function(vec![FunctionArgument::positional(var(0))], var(1)),
    )]);
    assert!(matches!(err, Err(UnifyError::LabelMismatch { .. })));
}

#[test]
fn labeled_arguments_unify_by_intersection() {
    let declared = StaticType::function(
        vec![
            FunctionArgument::labeled("a", StaticType::number()),
            FunctionArgument::labeled("b", StaticType::string()),
        ],
        StaticType::boolean(),
    );
    // The call passes `b` and an unknown `c`, and omits `a`.
    let call = StaticType::function(
        vec![
            FunctionArgument::labeled("c", var(0)),
            FunctionArgument::labeled("b", var(1)),
        ],
        var(2),
    );
    let sub = solve(vec![Constraint::new(declared, call)]).unwrap_or_default();
    assert_eq!(sub.resolve(&var(1)), StaticType::string());
    assert_eq!(sub.resolve(&var(0)), var(0));
    assert_eq!(sub.resolve(&var(2)), StaticType::boolean());
}

#[test]
fn generic_sides_warn_without_binding() {
    let reporter = BufferedReporter::new();
    let sub = unify(
        vec![Constraint::new(var(0), StaticType::Generic(TypeVar::new(9)))],
        &reporter,
    )
    .unwrap_or_default();
    assert!(!sub.contains(TypeVar::new(0)));
    let warnings = reporter.warnings();
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].code, ErrorCode::L3007);
}

#[test]
fn occurs_check_rejects_infinite_types() {
    let err = solve(vec![Constraint::new(var(0), StaticType::array(var(0)))]);
    assert!(matches!(err, Err(UnifyError::InfiniteType { .. })));
}

#[test]
fn errors_convert_to_diagnostics() {
    let diag = UnifyError::NameMismatch {
        expected: "Number".into(),
        found: "Color".into(),
    }
    .to_diagnostic();
    assert_eq!(diag.code, ErrorCode::L3001);
    assert_eq!(diag.message, "type `Number` does not match `Color`");
}
