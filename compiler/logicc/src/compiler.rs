//! The pipeline: join → namespace → scope → origins → check → unify → graph.

use logic_diagnostic::Reporter;
use logic_eval::{EvalEnv, EvaluationContext, GraphInput, NativeRegistry, ThunkGraph, Value};
use logic_ir::{join_programs, AstBuilder, NodeId, Origin, OriginTable, ProgramFile, SyntaxArena};
use logic_resolve::{Namespace, Scope};
use logic_typeck::{check, TypeCheckerResult};
use logic_types::{unify, StaticType, Substitution};

use crate::{build_prelude, CompileError, CompilerConfig};

/// Collects program files built into one shared arena, then analyzes them.
///
/// Every file must be built with [`Compiler::builder`] so node ids stay
/// unique across the whole program.
pub struct Compiler {
    config: CompilerConfig,
    builder: AstBuilder,
    files: Vec<ProgramFile>,
}

impl Compiler {
    pub fn new(config: CompilerConfig) -> Self {
        let builder = AstBuilder::new();
        let mut files = Vec::new();
        if config.include_standard_library {
            let prelude = build_prelude(&builder);
            files.push(ProgramFile::new(prelude, Origin::StandardLibrary));
        }
        Compiler {
            config,
            builder,
            files,
        }
    }

    pub fn config(&self) -> &CompilerConfig {
        &self.config
    }

    pub fn builder(&self) -> &AstBuilder {
        &self.builder
    }

    /// Register a `Program` root built with [`Compiler::builder`].
    pub fn add_file(&mut self, root: NodeId, origin: Origin) -> &mut Self {
        self.files.push(ProgramFile::new(root, origin));
        self
    }

    pub fn files(&self) -> &[ProgramFile] {
        &self.files
    }

    /// Run every analysis pass.
    ///
    /// Namespace collisions and unification failures stop the compile.
    /// Everything else is reported and leaves placeholders behind.
    #[tracing::instrument(level = "info", skip_all, fields(files = self.files.len()))]
    pub fn compile(self, reporter: &dyn Reporter) -> Result<Compilation, CompileError> {
        let Compiler {
            config,
            builder,
            files,
        } = self;
        let mut arena = builder.finish();
        let roots: Vec<NodeId> = files.iter().map(|file| file.root).collect();
        let root = join_programs(&mut arena, &roots);

        let namespace = Namespace::build(&arena, &files)?;
        reporter.log(&format!(
            "namespace: {} values, {} types",
            namespace.values().len(),
            namespace.types().len()
        ));

        let mut scope = Scope::default();
        for file in &files {
            scope.merge(Scope::build(&arena, file.root, &namespace, reporter));
        }
        let origins = OriginTable::build(&arena, &files);

        let types = check(&arena, root, &namespace, &scope);
        let substitution = unify(types.constraints.clone(), reporter)?;
        reporter.log(&format!("unified {} type variables", substitution.len()));

        let graph = ThunkGraph::build(GraphInput {
            arena: &arena,
            root,
            namespace: &namespace,
            scope: &scope,
            types: &types,
            substitution: &substitution,
            origins: &origins,
            reporter,
        });
        reporter.info(&format!(
            "compiled {} files into {} thunks",
            files.len(),
            graph.thunk_count()
        ));

        Ok(Compilation {
            config,
            arena,
            root,
            namespace,
            scope,
            origins,
            types,
            substitution,
            graph,
            natives: NativeRegistry::standard(),
        })
    }
}

/// A fully analyzed program, ready to evaluate.
pub struct Compilation {
    config: CompilerConfig,
    arena: SyntaxArena,
    root: NodeId,
    namespace: Namespace,
    scope: Scope,
    origins: OriginTable,
    types: TypeCheckerResult,
    substitution: Substitution,
    graph: ThunkGraph,
    natives: NativeRegistry,
}

impl Compilation {
    pub fn arena(&self) -> &SyntaxArena {
        &self.arena
    }

    /// The joined program root.
    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn namespace(&self) -> &Namespace {
        &self.namespace
    }

    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    pub fn origins(&self) -> &OriginTable {
        &self.origins
    }

    pub fn types(&self) -> &TypeCheckerResult {
        &self.types
    }

    pub fn substitution(&self) -> &Substitution {
        &self.substitution
    }

    pub fn graph(&self) -> &ThunkGraph {
        &self.graph
    }

    pub fn natives(&self) -> &NativeRegistry {
        &self.natives
    }

    /// Host hook for registering extra natives before evaluating.
    pub fn natives_mut(&mut self) -> &mut NativeRegistry {
        &mut self.natives
    }

    /// A fresh context with the configured limits. Contexts do not share
    /// their caches.
    pub fn evaluation_context<'g>(&'g self, reporter: &'g dyn Reporter) -> EvaluationContext<'g> {
        let env = EvalEnv {
            arena: &self.arena,
            graph: &self.graph,
            scope: &self.scope,
            origins: &self.origins,
            natives: &self.natives,
            reporter,
        };
        EvaluationContext::new(env, self.config.eval_config())
    }

    /// Evaluate the value declared under `qualified_name` in a fresh context.
    pub fn evaluate_named(&self, qualified_name: &str, reporter: &dyn Reporter) -> Option<Value> {
        let pattern = self.namespace.value(qualified_name)?;
        self.evaluation_context(reporter).evaluate(pattern)
    }

    /// The fully resolved type of any node the checker typed.
    pub fn resolved_type(&self, id: NodeId) -> Option<StaticType> {
        self.types.node_type(id).map(|ty| self.substitution.resolve(ty))
    }

    /// The fully resolved type of a binding pattern.
    pub fn pattern_type(&self, pattern: NodeId) -> Option<StaticType> {
        self.types.pattern_type(pattern).map(|ty| self.substitution.resolve(ty))
    }

    /// The pattern a reference resolves to.
    pub fn pattern(&self, id: NodeId) -> Option<NodeId> {
        self.scope.pattern_for(id)
    }

    /// Namespace path from the program root to `id`, ending in its name.
    pub fn declaration_path_to(&self, id: NodeId) -> Option<Vec<String>> {
        logic_ir::declaration_path_to(&self.arena, self.root, id)
    }

    pub fn is_from_standard_library(&self, id: NodeId) -> bool {
        self.origins.is_from_standard_library(id)
    }

    pub fn is_from_other_file(&self, id: NodeId, current: &Origin) -> bool {
        self.origins.is_from_other_file(id, current)
    }
}
