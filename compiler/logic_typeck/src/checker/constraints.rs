//! Pass 2: node types and equality constraints.
//!
//! Runs post-order, so every child's type is known when its parent leaves.

use logic_ir::{Literal, NodeId, NodeKind, SyntaxArena, VisitAction, Visitor};
use logic_types::{FunctionArgument, StaticType};

use super::TypeChecker;

#[tracing::instrument(level = "debug", skip_all)]
pub(crate) fn generate_constraints(checker: &mut TypeChecker<'_>, root: NodeId) {
    let arena = checker.arena;
    let mut generator = ConstraintGenerator {
        checker,
        returns: Vec::new(),
    };
    let _ = logic_ir::walk(&mut generator, arena, root);
}

struct ConstraintGenerator<'c, 'a> {
    checker: &'c mut TypeChecker<'a>,
    /// Declared return types of the enclosing functions, innermost last.
    returns: Vec<StaticType>,
}

impl ConstraintGenerator<'_, '_> {
    fn literal(&mut self, arena: &SyntaxArena, literal: &Literal) -> StaticType {
        match literal {
            Literal::None => StaticType::unit(),
            Literal::Boolean(_) => StaticType::boolean(),
            Literal::Number(_) => StaticType::number(),
            Literal::String(_) => StaticType::string(),
            Literal::Color(_) => StaticType::color(),
            Literal::Array(elements) => {
                let element = self.checker.fresh();
                for item in arena.list(*elements) {
                    let item = self.checker.node_or_fresh(*item);
                    self.checker.constrain(element.clone(), item);
                }
                StaticType::array(element)
            }
        }
    }

    fn reference(&mut self, resolved: Option<NodeId>) -> StaticType {
        match resolved {
            Some(pattern) => self.checker.instantiate_pattern(pattern),
            None => self.checker.fresh(),
        }
    }

    /// Synthesize `(labels...) -> ?r` from the call's own arguments and
    /// constrain the callee to it.
    fn call(&mut self, arena: &SyntaxArena, callee: NodeId, arguments: &[NodeId]) -> StaticType {
        let return_type = self.checker.fresh();
        let mut slots = Vec::with_capacity(arguments.len());
        let mut actuals = Vec::with_capacity(arguments.len());
        for argument in arguments {
            let label = match arena.kind(*argument) {
                NodeKind::Argument { label, .. } => label.clone(),
                _ => None,
            };
            let slot = self.checker.fresh();
            actuals.push((self.checker.node_or_fresh(*argument), slot.clone()));
            slots.push(FunctionArgument { label, ty: slot });
        }

        let callee_type = self.checker.node_or_fresh(callee);
        self.checker
            .constrain(callee_type, StaticType::function(slots, return_type.clone()));
        for (actual, slot) in actuals {
            self.checker.constrain(actual, slot);
        }
        return_type
    }

    fn constrain_to_declared(&mut self, declaration: NodeId, value: NodeId) {
        let declared = match self.checker.declared(declaration) {
            Some(ty) => ty.clone(),
            None => return,
        };
        let value = self.checker.node_or_fresh(value);
        self.checker.constrain(declared, value);
    }
}

impl Visitor for ConstraintGenerator<'_, '_> {
    fn enter(&mut self, arena: &SyntaxArena, id: NodeId) -> VisitAction {
        match arena.kind(id) {
            NodeKind::Function { .. } => {
                let return_type = match self.checker.declared(id).and_then(StaticType::return_type) {
                    Some(ty) => ty.clone(),
                    None => self.checker.fresh(),
                };
                self.returns.push(return_type);
                VisitAction::Continue
            }
            // Annotations were translated in pass 1.
            NodeKind::TypeIdentifier { .. } | NodeKind::FunctionType { .. } => VisitAction::SkipChildren,
            _ => VisitAction::Continue,
        }
    }

    fn leave(&mut self, arena: &SyntaxArena, id: NodeId) -> VisitAction {
        let ty = match arena.kind(id) {
            NodeKind::Literal(literal) => self.literal(arena, literal),
            NodeKind::Placeholder => {
                if self.checker.nodes.contains(id) {
                    return VisitAction::Continue;
                }
                self.checker.fresh()
            }
            NodeKind::Identifier { .. } => {
                let resolved = self.checker.scope.identifier_expr_to_pattern.get(&id).copied();
                self.reference(resolved)
            }
            NodeKind::Member { .. } => {
                let resolved = self.checker.scope.member_expr_to_pattern.get(&id).copied();
                self.reference(resolved)
            }
            NodeKind::Argument { expression, .. } | NodeKind::ExpressionStatement { expression } => {
                self.checker.node_or_fresh(*expression)
            }
            NodeKind::Call { callee, arguments } => self.call(arena, *callee, arena.list(*arguments)),
            NodeKind::Variable { initializer, .. } => {
                if let Some(initializer) = initializer {
                    self.constrain_to_declared(id, *initializer);
                }
                return VisitAction::Continue;
            }
            NodeKind::Parameter { default_value, .. } => {
                if let Some(default_value) = default_value {
                    self.constrain_to_declared(id, *default_value);
                }
                return VisitAction::Continue;
            }
            NodeKind::Return { expression } => {
                let value = self.checker.node_or_fresh(*expression);
                if let Some(expected) = self.returns.last().cloned() {
                    self.checker.constrain(expected, value.clone());
                }
                value
            }
            NodeKind::Branch { condition, .. } | NodeKind::Loop { condition, .. } => {
                let condition = self.checker.node_or_fresh(*condition);
                self.checker.constrain(condition, StaticType::boolean());
                StaticType::unit()
            }
            NodeKind::Function { .. } => {
                self.returns.pop();
                return VisitAction::Continue;
            }
            _ => return VisitAction::Continue,
        };
        self.checker.set_node(id, ty);
        VisitAction::Continue
    }
}
