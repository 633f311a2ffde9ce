//! Runs the analysis passes over built trees so tests can evaluate them.

use logic_diagnostic::BufferedReporter;
use logic_ir::{join_programs, AstBuilder, NodeId, Origin, OriginTable, ProgramFile, SyntaxArena};
use logic_resolve::{Namespace, Scope};
use logic_typeck::{check, TypeCheckerResult};
use logic_types::{unify, Substitution};

use crate::{EvalConfig, EvalEnv, EvaluationContext, GraphInput, NativeRegistry, ThunkGraph};

/// A small prelude: primitive records plus a few native-backed declarations.
pub(crate) fn standard_library(b: &AstBuilder) -> NodeId {
    let binary = |name: &str, operand: &str, result: &str| {
        b.function(
            name,
            &[],
            [
                b.parameter("a", b.type_named(operand), None),
                b.parameter("b", b.type_named(operand), None),
            ],
            b.type_named(result),
            [],
        )
    };
    b.program([
        b.record("Boolean", &[], []),
        b.record("Number", &[], []),
        b.record("String", &[], []),
        b.record("Array", &["T"], []),
        b.record("Color", &[], [b.variable("value", Some(b.type_named("String")), None)]),
        b.namespace(
            "Number",
            [
                binary("add", "Number", "Number"),
                binary("subtract", "Number", "Number"),
                binary("multiply", "Number", "Number"),
                binary("isLessThan", "Number", "Boolean"),
                b.function("mystery", &[], [], b.type_named("Number"), []),
            ],
        ),
        b.namespace(
            "Color",
            [
                b.variable("black", Some(b.type_named("Color")), None),
                b.variable("transparent", Some(b.type_named("Color")), None),
            ],
        ),
    ])
}

pub(crate) struct Fixture {
    pub arena: SyntaxArena,
    pub scope: Scope,
    pub origins: OriginTable,
    pub types: TypeCheckerResult,
    pub substitution: Substitution,
    pub graph: ThunkGraph,
    pub natives: NativeRegistry,
    pub reporter: BufferedReporter,
}

impl Fixture {
    /// Analyze `files`, built with `builder`, as one program.
    pub fn new(builder: AstBuilder, files: &[ProgramFile]) -> Fixture {
        let mut arena = builder.finish();
        let roots: Vec<NodeId> = files.iter().map(|file| file.root).collect();
        let root = join_programs(&mut arena, &roots);
        let reporter = BufferedReporter::new();

        let namespace = match Namespace::build(&arena, files) {
            Ok(namespace) => namespace,
            Err(error) => panic!("namespace: {error}"),
        };
        let mut scope = Scope::default();
        for file in files {
            scope.merge(Scope::build(&arena, file.root, &namespace, &reporter));
        }
        let origins = OriginTable::build(&arena, files);
        let types = check(&arena, root, &namespace, &scope);
        let substitution = match unify(types.constraints.clone(), &reporter) {
            Ok(substitution) => substitution,
            Err(error) => panic!("unify: {error}"),
        };
        let graph = ThunkGraph::build(GraphInput {
            arena: &arena,
            root,
            namespace: &namespace,
            scope: &scope,
            types: &types,
            substitution: &substitution,
            origins: &origins,
            reporter: &reporter,
        });

        Fixture {
            arena,
            scope,
            origins,
            types,
            substitution,
            graph,
            natives: NativeRegistry::standard(),
            reporter,
        }
    }

    /// `main` in one file, after the prelude built by the same builder.
    pub fn with_prelude(builder: AstBuilder, prelude: NodeId, main: NodeId) -> Fixture {
        let files = [
            ProgramFile::new(prelude, Origin::StandardLibrary),
            ProgramFile::new(main, Origin::file("main.logic")),
        ];
        Fixture::new(builder, &files)
    }

    pub fn context(&self) -> EvaluationContext<'_> {
        self.context_with(EvalConfig::default())
    }

    pub fn context_with(&self, config: EvalConfig) -> EvaluationContext<'_> {
        let env = EvalEnv {
            arena: &self.arena,
            graph: &self.graph,
            scope: &self.scope,
            origins: &self.origins,
            natives: &self.natives,
            reporter: &self.reporter,
        };
        EvaluationContext::new(env, config)
    }

    pub fn error_codes(&self) -> Vec<String> {
        self.reporter
            .errors()
            .iter()
            .map(|diagnostic| diagnostic.code.to_string())
            .collect()
    }
}
