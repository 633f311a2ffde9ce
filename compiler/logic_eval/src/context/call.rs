//! Calls and function bodies.

use indexmap::IndexMap;
use logic_diagnostic::{Diagnostic, ErrorCode};
use logic_ir::{NodeId, NodeKind};
use logic_types::StaticType;

use super::EvaluationContext;
use crate::native::CallArguments;
use crate::value::{FunctionImpl, FunctionMemory, Memory};
use crate::Value;

/// How a block finished.
enum Flow {
    Normal,
    Return(Value),
}

impl EvaluationContext<'_> {
    /// Invoke `callee` with already-evaluated arguments.
    ///
    /// Record and enumeration constructors build their value directly, with
    /// the call's resolved type. Standard library functions dispatch to a
    /// native by qualified name; everything else runs its body in a fork.
    #[tracing::instrument(level = "debug", skip_all, fields(call = %id))]
    pub(super) fn call(
        &mut self,
        id: NodeId,
        callee: Value,
        arguments: Vec<(Option<String>, Value)>,
        result_type: &StaticType,
    ) -> Option<Value> {
        let Memory::Function(function) = callee.memory else {
            self.report(
                Diagnostic::error(ErrorCode::L4003)
                    .with_message(format!("a value of type `{}` cannot be called", callee.ty))
                    .with_node(id),
            );
            return None;
        };
        let merged = self.merge_arguments(id, &function, arguments)?;

        match function.implementation {
            FunctionImpl::Record => Some(Value::new(result_type.clone(), Memory::Record(merged))),
            FunctionImpl::Enum { tag } => {
                let data = merged.into_values().collect();
                Some(Value::new(result_type.clone(), Memory::Enum { tag, data }))
            }
            FunctionImpl::User {
                declaration,
                qualified_name,
            } => {
                if self.env.origins.is_from_standard_library(declaration) {
                    self.call_native(id, qualified_name.as_deref(), &merged, result_type)
                } else {
                    self.call_user(id, declaration, function.captures, &merged)
                }
            }
        }
    }

    /// Match actual arguments to the callee's slots, in slot order.
    ///
    /// Labeled arguments fill the slot of the same name, unlabeled ones the
    /// slot at their position. Unfilled slots take their default; a slot
    /// with neither is reported and the call fails.
    fn merge_arguments(
        &self,
        id: NodeId,
        function: &FunctionMemory,
        arguments: Vec<(Option<String>, Value)>,
    ) -> Option<IndexMap<String, Value>> {
        let slots = &function.default_arguments;
        let mut supplied: IndexMap<String, Value> = IndexMap::with_capacity(arguments.len());
        for (position, (label, value)) in arguments.into_iter().enumerate() {
            let name = match label {
                Some(label) => label,
                None => match slots.get_index(position) {
                    Some((name, _)) => name.clone(),
                    None => {
                        tracing::debug!(position, "ignoring extra positional argument");
                        continue;
                    }
                },
            };
            supplied.insert(name, value);
        }

        let mut merged = IndexMap::with_capacity(slots.len());
        for (name, slot) in slots {
            let value = match (supplied.swap_remove(name), &slot.default) {
                (Some(value), _) => value,
                (None, Some(default)) => default.clone(),
                (None, None) => {
                    self.report(
                        Diagnostic::error(ErrorCode::L4008)
                            .with_message(format!("no value for parameter `{name}`"))
                            .with_node(id),
                    );
                    return None;
                }
            };
            merged.insert(name.clone(), value);
        }
        Some(merged)
    }

    /// Run the host implementation of a standard library function.
    ///
    /// A declaration without a registered native is reported and evaluates
    /// to unit.
    fn call_native(
        &mut self,
        id: NodeId,
        qualified_name: Option<&str>,
        arguments: &IndexMap<String, Value>,
        result_type: &StaticType,
    ) -> Option<Value> {
        let name = qualified_name.unwrap_or("<anonymous>");
        let Some(native) = qualified_name.and_then(|name| self.env.natives.function(name)) else {
            self.report(
                Diagnostic::error(ErrorCode::L4002)
                    .with_message(format!("no native implementation for `{name}`"))
                    .with_node(id),
            );
            return Some(Value::unit());
        };

        self.stats.calls += 1;
        match native(&CallArguments::new(arguments), result_type) {
            Ok(value) => Some(value),
            Err(error) => {
                self.report(
                    Diagnostic::error(ErrorCode::L4004)
                        .with_message(format!("`{name}`: {error}"))
                        .with_node(id),
                );
                None
            }
        }
    }

    /// Run a declared function's body in a fork with its captures and
    /// parameters bound.
    ///
    /// Falling off the end of the body evaluates to unit.
    fn call_user(
        &mut self,
        id: NodeId,
        declaration: NodeId,
        captures: Vec<(NodeId, Value)>,
        arguments: &IndexMap<String, Value>,
    ) -> Option<Value> {
        if self.depth >= self.config.max_call_depth {
            self.report(
                Diagnostic::error(ErrorCode::L4010)
                    .with_message(format!(
                        "more than {} nested calls",
                        self.config.max_call_depth
                    ))
                    .with_node(id),
            );
            return None;
        }
        let arena = self.env.arena;
        let NodeKind::Function { block, .. } = arena.kind(declaration) else {
            self.report(
                Diagnostic::error(ErrorCode::L4003)
                    .with_message(format!("{} is not a function", arena.kind(declaration).describe()))
                    .with_node(id),
            );
            return None;
        };

        let mut frame = self.fork(declaration);
        frame.values.extend(captures);
        for (name, pattern) in self.env.graph.parameters(declaration) {
            if let Some(value) = arguments.get(name) {
                frame.values.insert(*pattern, value.clone());
            }
        }
        let flow = frame.run_block(arena.list(*block));

        self.stats.calls += 1;
        self.stats.absorb(frame.stats);
        match flow? {
            Flow::Return(value) => Some(value),
            Flow::Normal => Some(Value::unit()),
        }
    }

    fn run_block(&mut self, statements: &[NodeId]) -> Option<Flow> {
        let arena = self.env.arena;
        for statement in statements {
            match arena.kind(*statement) {
                NodeKind::Return { expression } => {
                    return self.evaluate(*expression).map(Flow::Return);
                }
                NodeKind::ExpressionStatement { expression } => {
                    // Failures are reported where they happen.
                    let _ = self.evaluate(*expression);
                }
                NodeKind::Branch { condition, block } => {
                    if self.condition(*condition)? {
                        if let Flow::Return(value) = self.run_block(arena.list(*block))? {
                            return Some(Flow::Return(value));
                        }
                    }
                }
                NodeKind::Loop { condition, block } => {
                    let mut iterations = 0;
                    while self.condition(*condition)? {
                        if iterations >= self.config.max_loop_iterations {
                            self.report(
                                Diagnostic::error(ErrorCode::L4007)
                                    .with_message(format!(
                                        "loop still running after {iterations} iterations"
                                    ))
                                    .with_node(*statement),
                            );
                            break;
                        }
                        iterations += 1;
                        if let Flow::Return(value) = self.run_block(arena.list(*block))? {
                            return Some(Flow::Return(value));
                        }
                    }
                }
                // Declarations inside a body are evaluated on demand.
                _ => {}
            }
        }
        Some(Flow::Normal)
    }

    fn condition(&mut self, id: NodeId) -> Option<bool> {
        let value = self.evaluate(id)?;
        if let Some(condition) = value.as_bool() {
            return Some(condition);
        }
        self.report(
            Diagnostic::error(ErrorCode::L4006)
                .with_message(format!("condition evaluated to {value}"))
                .with_node(id),
        );
        None
    }
}
