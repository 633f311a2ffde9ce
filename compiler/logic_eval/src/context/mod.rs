//! Demand-driven evaluation with per-context memoization.
//!
//! `evaluate(id)` returns the cached value of `id`, or computes it from its
//! thunk after evaluating the thunk's dependencies in order. A missing
//! dependency aborts the computation; the failure is reported once, where it
//! happens, and every dependent yields `None`.
//!
//! Calls run in a fork of the caller's context: the cache is copied, the
//! callee's own nodes are forgotten, the parameters it captured are restored
//! and its own parameter patterns are bound to the call's arguments.

mod call;

use logic_diagnostic::{Diagnostic, ErrorCode, Reporter};
use logic_ir::{NodeId, Origin, OriginTable, SyntaxArena};
use logic_resolve::Scope;
use logic_stack::ensure_sufficient_stack;
use logic_types::StaticType;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::graph::{ParameterSlot, Thunk, ThunkGraph, ThunkKind};
use crate::native::NativeRegistry;
use crate::value::{ArgumentSlot, FunctionImpl, FunctionMemory, Memory};
use crate::{EvalConfig, Value};

/// Shared, read-only program data every context evaluates against.
#[derive(Copy, Clone)]
pub struct EvalEnv<'g> {
    pub arena: &'g SyntaxArena,
    pub graph: &'g ThunkGraph,
    pub scope: &'g Scope,
    pub origins: &'g OriginTable,
    pub natives: &'g NativeRegistry,
    pub reporter: &'g dyn Reporter,
}

/// Counters for one context and the calls it made.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct EvalStats {
    /// Thunks whose value was computed, not read from the cache.
    pub computed: usize,
    pub cache_hits: usize,
    /// User and native function invocations.
    pub calls: usize,
}

impl EvalStats {
    fn absorb(&mut self, child: EvalStats) {
        self.computed += child.computed;
        self.cache_hits += child.cache_hits;
        self.calls += child.calls;
    }
}

/// A memoizing evaluator over a [`ThunkGraph`].
pub struct EvaluationContext<'g> {
    env: EvalEnv<'g>,
    config: EvalConfig,
    values: FxHashMap<NodeId, Value>,
    /// Nodes whose computation is on the stack, for cycle detection.
    evaluating: FxHashSet<NodeId>,
    depth: usize,
    stats: EvalStats,
}

impl<'g> EvaluationContext<'g> {
    pub fn new(env: EvalEnv<'g>, config: EvalConfig) -> Self {
        EvaluationContext {
            env,
            config,
            values: FxHashMap::default(),
            evaluating: FxHashSet::default(),
            depth: 0,
            stats: EvalStats::default(),
        }
    }

    pub fn config(&self) -> EvalConfig {
        self.config
    }

    pub fn stats(&self) -> EvalStats {
        self.stats
    }

    /// The cached value of `id`, without computing anything.
    pub fn cached(&self, id: NodeId) -> Option<&Value> {
        self.values.get(&id)
    }

    /// The value of `id`, computing and caching it on first request.
    pub fn evaluate(&mut self, id: NodeId) -> Option<Value> {
        if let Some(value) = self.values.get(&id) {
            self.stats.cache_hits += 1;
            return Some(value.clone());
        }
        let graph = self.env.graph;
        if let Some(seed) = graph.seed(id) {
            self.values.insert(id, seed.clone());
            return Some(seed.clone());
        }
        let Some(thunk) = graph.thunk(id) else {
            let kind = self
                .env
                .arena
                .get(id)
                .map_or("unknown node", |kind| kind.describe());
            self.report(
                Diagnostic::error(ErrorCode::L4001)
                    .with_message(format!("nothing computes the value of {kind} {id}"))
                    .with_node(id),
            );
            return None;
        };
        if !self.evaluating.insert(id) {
            self.report(
                Diagnostic::error(ErrorCode::L4005)
                    .with_message(format!("node {id} depends on its own value"))
                    .with_node(id),
            );
            return None;
        }

        let result = ensure_sufficient_stack(|| self.compute(id, thunk));
        self.evaluating.remove(&id);

        let value = result?;
        tracing::trace!(node = %id, %value, "computed");
        self.stats.computed += 1;
        self.values.insert(id, value.clone());
        Some(value)
    }

    /// A context for running the body of `declaration`.
    ///
    /// Cached values and in-progress markers of the function's own nodes,
    /// and of the functions it is nested in, are dropped; everything else
    /// carries over. Enclosing parameters come back from the captures of the
    /// function value being called.
    pub fn fork(&self, declaration: NodeId) -> EvaluationContext<'g> {
        let graph = self.env.graph;
        let mut values = self.values.clone();
        let mut evaluating = self.evaluating.clone();
        let scopes = std::iter::once(&declaration).chain(graph.enclosing_functions(declaration));
        for local in scopes.flat_map(|function| graph.function_locals(*function)) {
            values.remove(local);
            evaluating.remove(local);
        }
        EvaluationContext {
            env: self.env,
            config: self.config,
            values,
            evaluating,
            depth: self.depth + 1,
            stats: EvalStats::default(),
        }
    }

    /// The pattern a reference node resolved to.
    pub fn pattern(&self, id: NodeId) -> Option<NodeId> {
        self.env.scope.pattern_for(id)
    }

    pub fn is_from_standard_library(&self, id: NodeId) -> bool {
        self.env.origins.is_from_standard_library(id)
    }

    pub fn is_from_other_file(&self, id: NodeId, current: &Origin) -> bool {
        self.env.origins.is_from_other_file(id, current)
    }

    fn compute(&mut self, id: NodeId, thunk: &'g Thunk) -> Option<Value> {
        let mut dependencies = Vec::with_capacity(thunk.dependencies.len());
        for dependency in &thunk.dependencies {
            dependencies.push(self.evaluate(*dependency)?);
        }

        match &thunk.kind {
            ThunkKind::Forward => dependencies.into_iter().next(),
            ThunkKind::FieldAccess { field } => {
                let object = dependencies.into_iter().next()?;
                self.field(id, &object, field)
            }
            ThunkKind::Array { ty } => Some(Value::array(ty.clone(), dependencies)),
            ThunkKind::Call {
                labels,
                result_type,
            } => {
                let mut values = dependencies.into_iter();
                let callee = values.next()?;
                let arguments = labels.iter().cloned().zip(values).collect();
                self.call(id, callee, arguments, result_type)
            }
            ThunkKind::Function {
                declaration,
                qualified_name,
                ty,
                parameters,
            } => {
                let implementation = FunctionImpl::User {
                    declaration: *declaration,
                    qualified_name: qualified_name.clone(),
                };
                let mut value = function_value(implementation, ty, parameters, dependencies);
                if let Memory::Function(function) = &mut value.memory {
                    function.captures = self.captures(*declaration);
                }
                Some(value)
            }
            ThunkKind::RecordConstructor { ty, fields } => {
                Some(function_value(FunctionImpl::Record, ty, fields, dependencies))
            }
            ThunkKind::EnumCase {
                tag,
                ty,
                associated_values,
            } => {
                let implementation = FunctionImpl::Enum { tag: tag.clone() };
                Some(function_value(implementation, ty, associated_values, dependencies))
            }
            ThunkKind::NativeValue { qualified_name } => {
                if let Some(value) = self.env.natives.value(qualified_name) {
                    return Some(value.clone());
                }
                self.report(
                    Diagnostic::error(ErrorCode::L4002)
                        .with_message(format!("no native value for `{qualified_name}`"))
                        .with_node(id),
                );
                Some(Value::unit())
            }
        }
    }

    /// Current bindings of the parameters a nested function can see.
    fn captures(&self, declaration: NodeId) -> Vec<(NodeId, Value)> {
        self.env
            .graph
            .captured_parameters(declaration)
            .filter_map(|pattern| Some((pattern, self.values.get(&pattern)?.clone())))
            .collect()
    }

    fn field(&self, id: NodeId, object: &Value, field: &str) -> Option<Value> {
        if let Some(value) = object.field(field) {
            return Some(value.clone());
        }
        self.report(
            Diagnostic::error(ErrorCode::L4009)
                .with_message(format!("`{}` has no field `{field}`", object.ty))
                .with_node(id),
        );
        None
    }

    fn report(&self, diagnostic: Diagnostic) {
        tracing::debug!(code = %diagnostic.code, "evaluation error");
        self.env.reporter.error(diagnostic);
    }
}

/// Build a function value whose defaulted slots take `defaults` in order.
fn function_value(
    implementation: FunctionImpl,
    ty: &StaticType,
    slots: &[ParameterSlot],
    defaults: Vec<Value>,
) -> Value {
    let mut defaults = defaults.into_iter();
    let default_arguments = slots
        .iter()
        .map(|slot| {
            let default = if slot.has_default {
                defaults.next()
            } else {
                None
            };
            let argument = ArgumentSlot {
                ty: slot.ty.clone(),
                default,
            };
            (slot.name.clone(), argument)
        })
        .collect();
    Value::new(
        ty.clone(),
        Memory::Function(FunctionMemory {
            implementation,
            default_arguments,
            captures: Vec::new(),
        }),
    )
}
