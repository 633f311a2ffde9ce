//! One walk over the joined program that fills a [`ThunkGraph`].

use logic_ir::{Literal, NodeId, NodeKind, NodeRange, SyntaxArena, VisitAction, Visitor};
use logic_types::StaticType;

use super::{GraphInput, ParameterSlot, ThunkGraph, ThunkKind};
use crate::Value;

pub(super) fn build(input: GraphInput<'_>) -> ThunkGraph {
    let mut builder = GraphBuilder {
        input,
        graph: ThunkGraph::default(),
        functions: Vec::new(),
        containers: Vec::new(),
    };
    let _ = logic_ir::walk(&mut builder, input.arena, input.root);
    input.reporter.log(&format!(
        "evaluation graph: {} thunks, {} seeds",
        builder.graph.thunks.len(),
        builder.graph.seeds.len()
    ));
    builder.graph
}

struct GraphBuilder<'a> {
    input: GraphInput<'a>,
    graph: ThunkGraph,
    /// Enclosing function declarations with their name patterns.
    functions: Vec<(NodeId, NodeId)>,
    /// Whether each enclosing declaration container is a record.
    containers: Vec<bool>,
}

impl GraphBuilder<'_> {
    /// Final type of a node, after substitution.
    fn resolved(&self, id: NodeId) -> StaticType {
        self.input
            .types
            .node_type(id)
            .map_or_else(StaticType::unit, |ty| self.input.substitution.resolve(ty))
    }

    fn resolved_pattern(&self, pattern: NodeId) -> StaticType {
        self.input
            .types
            .pattern_type(pattern)
            .map_or_else(StaticType::unit, |ty| self.input.substitution.resolve(ty))
    }

    fn forward(&mut self, id: NodeId, target: NodeId) {
        self.graph.insert_thunk(id, ThunkKind::Forward, vec![target]);
    }

    fn literal(&mut self, arena: &SyntaxArena, id: NodeId, literal: &Literal) {
        let value = match literal {
            Literal::None => Value::unit(),
            Literal::Boolean(value) => Value::boolean(*value),
            Literal::Number(value) => Value::number(*value),
            Literal::String(value) => Value::string(value.as_str()),
            Literal::Color(css) => Value::color(css.as_str()),
            Literal::Array(elements) => {
                let ty = self.resolved(id);
                let elements = arena.list(*elements).to_vec();
                self.graph.insert_thunk(id, ThunkKind::Array { ty }, elements);
                return;
            }
        };
        self.graph.insert_seed(id, value);
    }

    fn call(&mut self, arena: &SyntaxArena, id: NodeId, callee: NodeId, arguments: NodeRange) {
        let arguments = arena.list(arguments);
        let mut labels = Vec::with_capacity(arguments.len());
        let mut dependencies = Vec::with_capacity(arguments.len() + 1);
        dependencies.push(callee);
        for argument in arguments {
            match arena.kind(*argument) {
                NodeKind::Argument { label, expression } => {
                    labels.push(label.clone());
                    dependencies.push(*expression);
                }
                _ => {
                    labels.push(None);
                    dependencies.push(*argument);
                }
            }
        }
        let kind = ThunkKind::Call {
            labels,
            result_type: self.resolved(id),
        };
        self.graph.insert_thunk(id, kind, dependencies);
    }

    fn variable(&mut self, id: NodeId, pattern: NodeId, initializer: Option<NodeId>) {
        self.forward(id, pattern);
        let is_field = self.containers.last() == Some(&true);
        if let Some(initializer) = initializer {
            self.forward(pattern, initializer);
        } else if !is_field && self.input.origins.is_from_standard_library(id) {
            if let Some(qualified_name) = self.input.namespace.value_name(pattern) {
                let kind = ThunkKind::NativeValue {
                    qualified_name: qualified_name.to_owned(),
                };
                self.graph.insert_thunk(pattern, kind, Vec::new());
            }
        }
    }

    fn function(&mut self, arena: &SyntaxArena, id: NodeId, pattern: NodeId, parameters: NodeRange) {
        self.forward(id, pattern);

        let mut slots = Vec::new();
        let mut bindings = Vec::new();
        let mut defaults = Vec::new();
        for parameter in arena.list(parameters) {
            let NodeKind::Parameter {
                name, default_value, ..
            } = arena.kind(*parameter)
            else {
                continue;
            };
            let Some(label) = arena.name(*name) else {
                continue;
            };
            slots.push(ParameterSlot {
                name: label.to_owned(),
                ty: self.resolved_pattern(*name),
                has_default: default_value.is_some(),
            });
            bindings.push((label.to_owned(), *name));
            defaults.extend(*default_value);
        }
        self.graph.parameters.insert(id, bindings);
        if !self.functions.is_empty() {
            let enclosing = self.functions.iter().map(|(function, _)| *function).collect();
            self.graph.enclosing_functions.insert(id, enclosing);
        }

        let kind = ThunkKind::Function {
            declaration: id,
            qualified_name: self.input.namespace.value_name(pattern).map(str::to_owned),
            ty: self.resolved_pattern(pattern),
            parameters: slots,
        };
        self.graph.insert_thunk(pattern, kind, defaults);
    }

    fn record(&mut self, arena: &SyntaxArena, id: NodeId, pattern: NodeId, declarations: NodeRange) {
        self.forward(id, pattern);

        let mut fields = Vec::new();
        let mut defaults = Vec::new();
        for member in arena.list(declarations) {
            let NodeKind::Variable {
                name, initializer, ..
            } = arena.kind(*member)
            else {
                continue;
            };
            let Some(label) = arena.name(*name) else {
                continue;
            };
            fields.push(ParameterSlot {
                name: label.to_owned(),
                ty: self.resolved_pattern(*name),
                has_default: initializer.is_some(),
            });
            defaults.extend(*initializer);
        }
        let kind = ThunkKind::RecordConstructor {
            ty: self.resolved_pattern(pattern),
            fields,
        };
        self.graph.insert_thunk(pattern, kind, defaults);
    }

    fn enumeration_case(&mut self, arena: &SyntaxArena, id: NodeId, pattern: NodeId) {
        self.forward(id, pattern);

        let ty = self.resolved_pattern(pattern);
        let associated_values = match &ty {
            StaticType::Function { arguments, .. } => arguments
                .iter()
                .enumerate()
                .map(|(index, argument)| ParameterSlot {
                    name: index.to_string(),
                    ty: argument.ty.clone(),
                    has_default: false,
                })
                .collect(),
            _ => Vec::new(),
        };
        let kind = ThunkKind::EnumCase {
            tag: arena.name(pattern).unwrap_or_default().to_owned(),
            ty,
            associated_values,
        };
        self.graph.insert_thunk(pattern, kind, Vec::new());
    }

    /// Attribute `id` to every enclosing function except as its own name.
    fn record_local(&mut self, id: NodeId) {
        for (function, name) in &self.functions {
            if *name != id {
                self.graph
                    .function_locals
                    .entry(*function)
                    .or_default()
                    .push(id);
            }
        }
    }
}

impl Visitor for GraphBuilder<'_> {
    fn enter(&mut self, arena: &SyntaxArena, id: NodeId) -> VisitAction {
        self.record_local(id);

        match arena.kind(id) {
            NodeKind::Literal(literal) => self.literal(arena, id, literal),
            NodeKind::Identifier { .. } => {
                if let Some(pattern) = self.input.scope.identifier_expr_to_pattern.get(&id) {
                    self.forward(id, *pattern);
                }
            }
            NodeKind::Member { object, member } => {
                if let Some(pattern) = self.input.scope.member_expr_to_pattern.get(&id) {
                    self.forward(id, *pattern);
                } else {
                    let kind = ThunkKind::FieldAccess {
                        field: member.clone(),
                    };
                    self.graph.insert_thunk(id, kind, vec![*object]);
                }
            }
            NodeKind::Call { callee, arguments } => self.call(arena, id, *callee, *arguments),
            NodeKind::Argument { expression, .. } => self.forward(id, *expression),
            NodeKind::Variable {
                name, initializer, ..
            } => self.variable(id, *name, *initializer),
            NodeKind::Function {
                name, parameters, ..
            } => {
                self.function(arena, id, *name, *parameters);
                self.functions.push((id, *name));
                self.containers.push(false);
                self.graph.function_locals.entry(id).or_default();
            }
            NodeKind::Record {
                name, declarations, ..
            } => {
                self.record(arena, id, *name, *declarations);
                self.containers.push(true);
            }
            NodeKind::Namespace { .. } | NodeKind::Enumeration { .. } => self.containers.push(false),
            NodeKind::EnumerationCase { name, .. } => self.enumeration_case(arena, id, *name),
            // Annotations produce no values.
            NodeKind::TypeIdentifier { .. } | NodeKind::FunctionType { .. } => {
                return VisitAction::SkipChildren;
            }
            _ => {}
        }
        VisitAction::Continue
    }

    fn leave(&mut self, arena: &SyntaxArena, id: NodeId) -> VisitAction {
        match arena.kind(id) {
            NodeKind::Function { .. } => {
                self.functions.pop();
                self.containers.pop();
            }
            NodeKind::Record { .. } | NodeKind::Namespace { .. } | NodeKind::Enumeration { .. } => {
                self.containers.pop();
            }
            _ => {}
        }
        VisitAction::Continue
    }
}
