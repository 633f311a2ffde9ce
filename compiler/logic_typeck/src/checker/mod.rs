//! Type checker state shared by both passes.
//!
//! # Architecture
//!
//! ```text
//! joined program
//!     ↓
//! collect_signatures()   Pass 1: pattern types for every declaration
//!     ↓
//! generate_constraints() Pass 2: node types + equality constraints
//!     ↓
//! TypeCheckerResult      handed to logic_types::unify
//! ```

mod annotation;
mod constraints;
mod signatures;

use logic_ir::{NodeId, NodeTable, SyntaxArena};
use logic_resolve::{Namespace, Scope};
use logic_types::{instantiate, Constraint, StaticType, TypeNameGenerator, TypeVar};
use rustc_hash::FxHashMap;

/// Everything the type checker learned about one program.
#[derive(Clone, Debug, Default)]
pub struct TypeCheckerResult {
    /// Constraints in generation order; the unifier drains them FIFO.
    pub constraints: Vec<Constraint>,
    /// Inferred type of every expression, declaration and annotation node.
    pub nodes: NodeTable<StaticType>,
    /// Declared type of every binding pattern. May contain `Generic`s.
    pub pattern_types: NodeTable<StaticType>,
    /// Name source, continued by later passes that need fresh variables.
    pub generator: TypeNameGenerator,
}

impl TypeCheckerResult {
    pub fn node_type(&self, id: NodeId) -> Option<&StaticType> {
        self.nodes.get(id)
    }

    pub fn pattern_type(&self, pattern: NodeId) -> Option<&StaticType> {
        self.pattern_types.get(pattern)
    }
}

/// Generate constraints for the program rooted at `root`.
///
/// `root` is normally the joined program of every file, so declarations from
/// the standard library and other files are visible to each other.
#[tracing::instrument(level = "debug", skip_all, fields(root = %root))]
pub fn check(
    arena: &SyntaxArena,
    root: NodeId,
    namespace: &Namespace,
    scope: &Scope,
) -> TypeCheckerResult {
    let mut checker = TypeChecker::new(arena, namespace, scope);
    signatures::collect_signatures(&mut checker, root);
    constraints::generate_constraints(&mut checker, root);
    tracing::debug!(
        constraints = checker.constraints.len(),
        patterns = checker.pattern_types.len(),
        "type check complete"
    );
    TypeCheckerResult {
        constraints: checker.constraints,
        nodes: checker.nodes,
        pattern_types: checker.pattern_types,
        generator: checker.generator,
    }
}

pub(crate) struct TypeChecker<'a> {
    pub(crate) arena: &'a SyntaxArena,
    pub(crate) namespace: &'a Namespace,
    pub(crate) scope: &'a Scope,
    pub(crate) generator: TypeNameGenerator,
    pub(crate) constraints: Vec<Constraint>,
    pub(crate) nodes: NodeTable<StaticType>,
    pub(crate) pattern_types: NodeTable<StaticType>,
    /// Generic parameter pattern -> its type name.
    pub(crate) generics: FxHashMap<NodeId, TypeVar>,
}

impl<'a> TypeChecker<'a> {
    fn new(arena: &'a SyntaxArena, namespace: &'a Namespace, scope: &'a Scope) -> Self {
        TypeChecker {
            arena,
            namespace,
            scope,
            generator: TypeNameGenerator::new(),
            constraints: Vec::new(),
            nodes: NodeTable::with_capacity(arena.len()),
            pattern_types: NodeTable::new(),
            generics: FxHashMap::default(),
        }
    }

    pub(crate) fn fresh(&mut self) -> StaticType {
        self.generator.fresh_variable()
    }

    pub(crate) fn constrain(&mut self, head: StaticType, tail: StaticType) {
        tracing::trace!(%head, %tail, "constraint");
        self.constraints.push(Constraint::new(head, tail));
    }

    pub(crate) fn set_node(&mut self, id: NodeId, ty: StaticType) {
        self.nodes.insert(id, ty);
    }

    /// Type of an already-visited node, or a fresh variable.
    pub(crate) fn node_or_fresh(&mut self, id: NodeId) -> StaticType {
        match self.nodes.get(id) {
            Some(ty) => ty.clone(),
            None => self.fresh(),
        }
    }

    /// Declared type of a declaration's pattern.
    pub(crate) fn declared(&self, declaration: NodeId) -> Option<&StaticType> {
        let pattern = self.arena.kind(declaration).declared_pattern()?;
        self.pattern_types.get(pattern)
    }

    /// Declared type of `pattern` with fresh variables for its generics.
    pub(crate) fn instantiate_pattern(&mut self, pattern: NodeId) -> StaticType {
        match self.pattern_types.get(pattern) {
            Some(ty) => instantiate(ty, &mut self.generator),
            None => self.generator.fresh_variable(),
        }
    }
}
