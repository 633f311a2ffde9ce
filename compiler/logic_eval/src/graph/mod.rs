//! The dependency graph evaluation runs over.
//!
//! Every node that can produce a value gets either a seed value (non-array
//! literals) or a [`Thunk`]: a computation over the values of other nodes.
//! The graph is built once per compiled program and shared by reference
//! between every evaluation context, including the forks made for calls.
//!
//! # Identities
//!
//! References forward to the *pattern* they resolved to, and each binding
//! pattern owns the thunk producing its value:
//!
//! ```text
//! let x = 4          pattern(x) ──Forward──▶ literal 4 (seed)
//! x                  identifier ──Forward──▶ pattern(x)
//! func f(a: Number)  pattern(f) ──Function──▶ default values of a, ...
//! f(a: x)            call ──Call──▶ [identifier f, identifier x]
//! ```
//!
//! Parameter patterns have no thunk; calls bind them in a forked context.
//! A function declared inside another captures the enclosing parameters'
//! bindings when its value is made, so it can run after its parent returns.

mod builder;

use logic_diagnostic::Reporter;
use logic_ir::{NodeId, NodeTable, OriginTable, SyntaxArena};
use logic_resolve::{Namespace, Scope};
use logic_typeck::TypeCheckerResult;
use logic_types::{StaticType, Substitution};
use rustc_hash::FxHashMap;

use crate::Value;

/// A deferred computation over `dependencies`, evaluated in order.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Thunk {
    pub kind: ThunkKind,
    pub dependencies: Vec<NodeId>,
}

/// How a thunk turns its dependency values into a value.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ThunkKind {
    /// The value of the single dependency.
    Forward,
    /// A field of the record produced by the single dependency.
    FieldAccess { field: String },
    /// An array of every dependency's value.
    Array { ty: StaticType },
    /// Dependencies are the callee followed by one value per argument.
    Call {
        labels: Vec<Option<String>>,
        result_type: StaticType,
    },
    /// A declared function. Dependencies are the default values of the
    /// parameters that have one, in parameter order.
    Function {
        declaration: NodeId,
        qualified_name: Option<String>,
        ty: StaticType,
        parameters: Vec<ParameterSlot>,
    },
    /// A record's constructor. Dependencies are the field initializers.
    RecordConstructor {
        ty: StaticType,
        fields: Vec<ParameterSlot>,
    },
    /// An enumeration case's constructor, taking positional arguments.
    EnumCase {
        tag: String,
        ty: StaticType,
        associated_values: Vec<ParameterSlot>,
    },
    /// A standard library value declared without an initializer.
    NativeValue { qualified_name: String },
}

/// One argument slot of a callable thunk.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParameterSlot {
    pub name: String,
    pub ty: StaticType,
    pub has_default: bool,
}

/// Seeds, thunks, and the per-function bookkeeping calls need.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ThunkGraph {
    thunks: NodeTable<Thunk>,
    seeds: NodeTable<Value>,
    /// Every node inside a function declaration. A call forgets their
    /// cached values before running the body.
    function_locals: FxHashMap<NodeId, Vec<NodeId>>,
    /// Parameter name and binding pattern, per function declaration.
    parameters: FxHashMap<NodeId, Vec<(String, NodeId)>>,
    /// Function declarations a nested function is declared in, outermost
    /// first. Top-level functions have no entry.
    enclosing_functions: FxHashMap<NodeId, Vec<NodeId>>,
}

/// The analysis results a graph is built from.
#[derive(Copy, Clone)]
pub struct GraphInput<'a> {
    pub arena: &'a SyntaxArena,
    pub root: NodeId,
    pub namespace: &'a Namespace,
    pub scope: &'a Scope,
    pub types: &'a TypeCheckerResult,
    pub substitution: &'a Substitution,
    pub origins: &'a OriginTable,
    pub reporter: &'a dyn Reporter,
}

impl ThunkGraph {
    #[tracing::instrument(level = "debug", skip_all, fields(root = %input.root))]
    pub fn build(input: GraphInput<'_>) -> ThunkGraph {
        let graph = builder::build(input);
        tracing::debug!(
            thunks = graph.thunks.len(),
            seeds = graph.seeds.len(),
            functions = graph.function_locals.len(),
            "thunk graph built"
        );
        graph
    }

    pub fn thunk(&self, id: NodeId) -> Option<&Thunk> {
        self.thunks.get(id)
    }

    pub fn seed(&self, id: NodeId) -> Option<&Value> {
        self.seeds.get(id)
    }

    /// Whether `id` has a seed value or a thunk.
    pub fn contains(&self, id: NodeId) -> bool {
        self.thunks.contains(id) || self.seeds.contains(id)
    }

    pub fn function_locals(&self, declaration: NodeId) -> &[NodeId] {
        self.function_locals
            .get(&declaration)
            .map_or(&[], Vec::as_slice)
    }

    pub fn parameters(&self, declaration: NodeId) -> &[(String, NodeId)] {
        self.parameters.get(&declaration).map_or(&[], Vec::as_slice)
    }

    pub fn enclosing_functions(&self, declaration: NodeId) -> &[NodeId] {
        self.enclosing_functions
            .get(&declaration)
            .map_or(&[], Vec::as_slice)
    }

    /// Parameter patterns of every enclosing function. A nested function
    /// value captures whatever these are bound to where it is made.
    pub fn captured_parameters(&self, declaration: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.enclosing_functions(declaration)
            .iter()
            .flat_map(|enclosing| self.parameters(*enclosing))
            .map(|(_, pattern)| *pattern)
    }

    pub fn thunk_count(&self) -> usize {
        self.thunks.len()
    }

    pub(crate) fn insert_thunk(&mut self, id: NodeId, kind: ThunkKind, dependencies: Vec<NodeId>) {
        self.thunks.insert(id, Thunk { kind, dependencies });
    }

    pub(crate) fn insert_seed(&mut self, id: NodeId, value: Value) {
        self.seeds.insert(id, value);
    }
}
