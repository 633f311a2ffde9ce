//! End-to-end compiles against the built-in prelude.

use logic_resolve::NamespaceError;
use logic_types::UnifyError;
use logicc::{
    BufferedReporter, CompileError, Compilation, Compiler, CompilerConfig, Memory, NodeId, Origin,
    StaticType, Value,
};
use pretty_assertions::assert_eq;

fn compile_main(compiler: Compiler, reporter: &BufferedReporter) -> Compilation {
    match compiler.compile(reporter) {
        Ok(compilation) => compilation,
        Err(error) => panic!("compile failed: {error}"),
    }
}

fn pattern(compiler: &Compiler, declaration: NodeId) -> NodeId {
    match compiler.builder().pattern_of(declaration) {
        Some(pattern) => pattern,
        None => panic!("declaration {declaration} binds no pattern"),
    }
}

fn error_codes(reporter: &BufferedReporter) -> Vec<String> {
    reporter
        .errors()
        .iter()
        .map(|diagnostic| diagnostic.code.to_string())
        .collect()
}

#[test]
fn native_arithmetic_through_the_prelude() {
    // let sum = Number.add(a: 2, b: Number.multiply(a: 3, b: 4))
    let mut compiler = Compiler::new(CompilerConfig::default());
    let b = compiler.builder();
    let product = b.call(
        b.path("Number.multiply"),
        [b.labeled("a", b.number(3.0)), b.labeled("b", b.number(4.0))],
    );
    let sum = b.call(
        b.path("Number.add"),
        [b.labeled("a", b.number(2.0)), b.labeled("b", product)],
    );
    let main = b.program([b.variable("sum", None, Some(sum))]);
    compiler.add_file(main, Origin::file("main.logic"));

    let reporter = BufferedReporter::new();
    let compilation = compile_main(compiler, &reporter);

    assert_eq!(compilation.resolved_type(sum), Some(StaticType::number()));
    assert_eq!(compilation.evaluate_named("sum", &reporter), Some(Value::number(14.0)));
    assert!(error_codes(&reporter).is_empty());
}

#[test]
fn native_values_and_colors() {
    // let ink = Color.black
    // let same = Color.isEqual(a: ink, b: #000000)
    let mut compiler = Compiler::new(CompilerConfig::default());
    let b = compiler.builder();
    let same = b.call(
        b.path("Color.isEqual"),
        [b.labeled("a", b.ident("ink")), b.labeled("b", b.color("#000000"))],
    );
    let main = b.program([
        b.variable("ink", None, Some(b.path("Color.black"))),
        b.variable("same", None, Some(same)),
    ]);
    compiler.add_file(main, Origin::file("main.logic"));

    let reporter = BufferedReporter::new();
    let compilation = compile_main(compiler, &reporter);

    assert_eq!(compilation.evaluate_named("ink", &reporter), Some(Value::color("#000000")));
    assert_eq!(compilation.evaluate_named("same", &reporter), Some(Value::boolean(true)));
}

#[test]
fn optional_cases_carry_their_data() {
    // let maybe = Optional.value(4)
    // let nothing = Optional.none()
    let mut compiler = Compiler::new(CompilerConfig::default());
    let b = compiler.builder();
    let main = b.program([
        b.variable(
            "maybe",
            None,
            Some(b.call(b.path("Optional.value"), [b.positional(b.number(4.0))])),
        ),
        b.variable("nothing", None, Some(b.call(b.path("Optional.none"), []))),
    ]);
    compiler.add_file(main, Origin::file("main.logic"));

    let reporter = BufferedReporter::new();
    let compilation = compile_main(compiler, &reporter);

    let Some(maybe) = compilation.evaluate_named("maybe", &reporter) else {
        panic!("maybe should evaluate");
    };
    let Memory::Enum { tag, data } = &maybe.memory else {
        panic!("expected an enum, found {maybe}");
    };
    assert_eq!(tag, "value");
    assert_eq!(data.as_slice(), &[Value::number(4.0)]);

    let nothing = compilation.evaluate_named("nothing", &reporter);
    assert_eq!(nothing.as_ref().and_then(Value::tag), Some("none"));
}

#[test]
fn recursion_through_natives() {
    // func fact(n: Number) -> Number {
    //   if Number.isLessThan(a: n, b: 2) { return 1 }
    //   return Number.multiply(a: n, b: fact(n: Number.subtract(a: n, b: 1)))
    // }
    // let r = fact(n: 5)
    let mut compiler = Compiler::new(CompilerConfig::default());
    let b = compiler.builder();
    let less = b.call(
        b.path("Number.isLessThan"),
        [b.labeled("a", b.ident("n")), b.labeled("b", b.number(2.0))],
    );
    let smaller = b.call(
        b.path("Number.subtract"),
        [b.labeled("a", b.ident("n")), b.labeled("b", b.number(1.0))],
    );
    let recurse = b.call(b.ident("fact"), [b.labeled("n", smaller)]);
    let product = b.call(
        b.path("Number.multiply"),
        [b.labeled("a", b.ident("n")), b.labeled("b", recurse)],
    );
    let fact = b.function(
        "fact",
        &[],
        [b.parameter("n", b.type_named("Number"), None)],
        b.type_named("Number"),
        [b.branch(less, [b.ret(b.number(1.0))]), b.ret(product)],
    );
    let r = b.variable("r", None, Some(b.call(b.ident("fact"), [b.labeled("n", b.number(5.0))])));
    let main = b.program([fact, r]);
    compiler.add_file(main, Origin::file("main.logic"));

    let reporter = BufferedReporter::new();
    let compilation = compile_main(compiler, &reporter);
    assert_eq!(compilation.evaluate_named("r", &reporter), Some(Value::number(120.0)));
    assert!(error_codes(&reporter).is_empty());
}

#[test]
fn returned_functions_remember_their_arguments() {
    // func doubler(step: Number) -> () -> Number {
    //     func twice() -> Number { return Number.multiply(a: step, b: 2) }
    //     return twice
    // }
    // let six = doubler(step: 3)
    // let r = six()
    let mut compiler = Compiler::new(CompilerConfig::default());
    let b = compiler.builder();
    let twice = b.function(
        "twice",
        &[],
        [],
        b.type_named("Number"),
        [b.ret(b.call(
            b.path("Number.multiply"),
            [b.labeled("a", b.ident("step")), b.labeled("b", b.number(2.0))],
        ))],
    );
    let doubler = b.function(
        "doubler",
        &[],
        [b.parameter("step", b.type_named("Number"), None)],
        b.function_type([], b.type_named("Number")),
        [twice, b.ret(b.ident("twice"))],
    );
    let six = b.variable(
        "six",
        None,
        Some(b.call(b.ident("doubler"), [b.labeled("step", b.number(3.0))])),
    );
    let r = b.variable("r", None, Some(b.call(b.ident("six"), [])));
    let main = b.program([doubler, six, r]);
    compiler.add_file(main, Origin::file("main.logic"));

    let reporter = BufferedReporter::new();
    let compilation = compile_main(compiler, &reporter);
    assert_eq!(compilation.evaluate_named("r", &reporter), Some(Value::number(6.0)));
    assert!(error_codes(&reporter).is_empty());
}

#[test]
fn configured_call_depth_applies_to_contexts() {
    // func forever(n: Number) -> Number { return forever(n: n) }
    let config = CompilerConfig {
        max_call_depth: 4,
        ..CompilerConfig::default()
    };
    let mut compiler = Compiler::new(config);
    let b = compiler.builder();
    let forever = b.function(
        "forever",
        &[],
        [b.parameter("n", b.type_named("Number"), None)],
        b.type_named("Number"),
        [b.ret(b.call(b.ident("forever"), [b.labeled("n", b.ident("n"))]))],
    );
    let r = b.variable("r", None, Some(b.call(b.ident("forever"), [b.labeled("n", b.number(1.0))])));
    let main = b.program([forever, r]);
    compiler.add_file(main, Origin::file("main.logic"));

    let reporter = BufferedReporter::new();
    let compilation = compile_main(compiler, &reporter);
    assert_eq!(compilation.evaluation_context(&reporter).config().max_call_depth, 4);
    assert_eq!(compilation.evaluate_named("r", &reporter), None);
    assert_eq!(error_codes(&reporter), vec!["L4010".to_owned()]);
}

#[test]
fn redeclaring_a_prelude_name_is_fatal() {
    let mut compiler = Compiler::new(CompilerConfig::default());
    let b = compiler.builder();
    let main = b.program([b.record("Number", &[], [])]);
    compiler.add_file(main, Origin::file("main.logic"));

    let reporter = BufferedReporter::new();
    let result = compiler.compile(&reporter);
    let Err(CompileError::Namespace(NamespaceError::Collision { name, .. })) = result else {
        panic!("expected a namespace collision");
    };
    assert_eq!(name, "Number");
}

#[test]
fn type_mismatch_is_fatal() {
    // let x: Number = "text"
    let mut compiler = Compiler::new(CompilerConfig::default());
    let b = compiler.builder();
    let main = b.program([b.variable("x", Some(b.type_named("Number")), Some(b.string("text")))]);
    compiler.add_file(main, Origin::file("main.logic"));

    let reporter = BufferedReporter::new();
    let result = compiler.compile(&reporter);
    let Err(error) = result else {
        panic!("expected a unification failure");
    };
    assert!(matches!(error, CompileError::Unify(UnifyError::NameMismatch { .. })));
    assert_eq!(error.to_diagnostic().code.to_string(), "L3001");
}

#[test]
fn undefined_references_warn_then_fail_to_evaluate() {
    // let y = nowhere
    let mut compiler = Compiler::new(CompilerConfig::default());
    let b = compiler.builder();
    let main = b.program([b.variable("y", None, Some(b.ident("nowhere")))]);
    compiler.add_file(main, Origin::file("main.logic"));

    let reporter = BufferedReporter::new();
    let compilation = compile_main(compiler, &reporter);
    assert!(error_codes(&reporter).is_empty());
    let warnings: Vec<String> = reporter
        .warnings()
        .iter()
        .map(|diagnostic| diagnostic.code.to_string())
        .collect();
    assert!(warnings.contains(&"L2001".to_owned()));

    reporter.clear();
    assert_eq!(compilation.evaluate_named("y", &reporter), None);
    assert_eq!(error_codes(&reporter), vec!["L4001".to_owned()]);
}

#[test]
fn origins_and_declaration_paths() {
    let mut compiler = Compiler::new(CompilerConfig::default());
    let b = compiler.builder();
    let reference = b.path("Color.white");
    let shade = b.variable("shade", None, Some(reference));
    let main = b.program([shade]);
    let shade_pattern = pattern(&compiler, shade);
    compiler.add_file(main, Origin::file("main.logic"));

    let reporter = BufferedReporter::new();
    let compilation = compile_main(compiler, &reporter);

    let Some(white) = compilation.pattern(reference) else {
        panic!("Color.white should resolve");
    };
    assert_eq!(compilation.namespace().value("Color.white"), Some(white));
    assert!(compilation.is_from_standard_library(white));
    assert!(!compilation.is_from_standard_library(shade_pattern));
    assert!(compilation.is_from_other_file(shade_pattern, &Origin::file("other.logic")));
    assert!(!compilation.is_from_other_file(shade_pattern, &Origin::file("main.logic")));

    assert_eq!(
        compilation.declaration_path_to(white),
        Some(vec!["Color".to_owned(), "white".to_owned()])
    );
    assert_eq!(compilation.declaration_path_to(shade), Some(vec!["shade".to_owned()]));
    assert_eq!(compilation.pattern_type(shade_pattern), Some(StaticType::named("Color")));
}

#[test]
fn files_see_each_other() {
    // theme.logic: let accent = #336699
    // main.logic:  let border = accent
    let mut compiler = Compiler::new(CompilerConfig::default());
    let b = compiler.builder();
    let theme = b.program([b.variable("accent", None, Some(b.color("#336699")))]);
    let main = b.program([b.variable("border", None, Some(b.ident("accent")))]);
    compiler
        .add_file(theme, Origin::file("theme.logic"))
        .add_file(main, Origin::file("main.logic"));

    let reporter = BufferedReporter::new();
    let compilation = compile_main(compiler, &reporter);
    assert_eq!(compilation.evaluate_named("border", &reporter), Some(Value::color("#336699")));
}

#[test]
fn without_the_prelude_only_user_names_exist() {
    let mut compiler = Compiler::new(CompilerConfig::default().without_standard_library());
    let b = compiler.builder();
    let main = b.program([b.variable("x", None, Some(b.number(1.0)))]);
    compiler.add_file(main, Origin::file("main.logic"));
    assert_eq!(compiler.files().len(), 1);

    let reporter = BufferedReporter::new();
    let compilation = compile_main(compiler, &reporter);
    assert_eq!(compilation.namespace().values().len(), 1);
    assert_eq!(compilation.evaluate_named("x", &reporter), Some(Value::number(1.0)));
}
