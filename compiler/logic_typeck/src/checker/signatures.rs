//! Pass 1: declared types.
//!
//! Records the type of every binding pattern before any constraint is
//! generated, so uses may appear before declarations in source order.
//!
//! - Generic parameters get a fresh type name each, stored as `Generic`
//! - Variables and parameters take their annotation, or a fresh variable
//! - Functions become `Function` types labeled by parameter name
//! - Records become constructor functions labeled by field name
//! - Enumeration cases become positional functions returning the enumeration

use logic_ir::{NodeId, NodeKind, NodeRange, SyntaxArena, VisitAction, Visitor};
use logic_types::{FunctionArgument, StaticType};

use super::TypeChecker;

#[tracing::instrument(level = "debug", skip_all)]
pub(crate) fn collect_signatures(checker: &mut TypeChecker<'_>, root: NodeId) {
    let arena = checker.arena;
    let mut collector = SignatureCollector {
        checker,
        enumerations: Vec::new(),
    };
    let _ = logic_ir::walk(&mut collector, arena, root);
}

struct SignatureCollector<'c, 'a> {
    checker: &'c mut TypeChecker<'a>,
    /// Types of the enclosing enumerations, innermost last.
    enumerations: Vec<StaticType>,
}

impl SignatureCollector<'_, '_> {
    /// Allocate a type name for each generic parameter, returning them as
    /// `Generic`s in declaration order.
    fn bind_generics(&mut self, arena: &SyntaxArena, generic_parameters: NodeRange) -> Vec<StaticType> {
        arena
            .list(generic_parameters)
            .iter()
            .filter_map(|param| arena.kind(*param).declared_pattern())
            .map(|pattern| {
                let var = self.checker.generator.fresh();
                self.checker.generics.insert(pattern, var);
                self.checker
                    .pattern_types
                    .insert(pattern, StaticType::Generic(var));
                StaticType::Generic(var)
            })
            .collect()
    }

    /// `Constructor(<qualified name>, <generics>)` for a record or enumeration.
    fn self_type(&mut self, arena: &SyntaxArena, declaration: NodeId, generic_parameters: NodeRange) -> StaticType {
        let generics = self.bind_generics(arena, generic_parameters);
        let name = arena
            .kind(declaration)
            .declared_pattern()
            .and_then(|pattern| self.checker.namespace.type_name(pattern))
            .or_else(|| arena.declared_name(declaration))
            .unwrap_or_default()
            .to_owned();
        StaticType::constructor(name, generics)
    }

    fn declare(&mut self, arena: &SyntaxArena, declaration: NodeId, ty: StaticType) {
        tracing::trace!(declaration = %declaration, %ty, "signature");
        if let Some(pattern) = arena.kind(declaration).declared_pattern() {
            self.checker.pattern_types.insert(pattern, ty.clone());
        }
        self.checker.set_node(declaration, ty);
    }

    /// Pattern type of a member declaration, labeled by its name.
    fn labeled_member(&self, arena: &SyntaxArena, member: NodeId) -> Option<FunctionArgument> {
        let name = arena.declared_name(member)?;
        let ty = self.checker.declared(member)?.clone();
        Some(FunctionArgument::labeled(name, ty))
    }
}

impl Visitor for SignatureCollector<'_, '_> {
    fn enter(&mut self, arena: &SyntaxArena, id: NodeId) -> VisitAction {
        match arena.kind(id) {
            NodeKind::Function {
                generic_parameters, ..
            } => {
                self.bind_generics(arena, *generic_parameters);
            }
            NodeKind::Record {
                generic_parameters, ..
            } => {
                // The record's own type is only needed for the constructor,
                // built on leave; bind the generics now so fields see them.
                let self_type = self.self_type(arena, id, *generic_parameters);
                self.checker.set_node(id, self_type);
            }
            NodeKind::Enumeration {
                generic_parameters, ..
            } => {
                let self_type = self.self_type(arena, id, *generic_parameters);
                self.declare(arena, id, self_type.clone());
                self.enumerations.push(self_type);
            }
            _ => {}
        }
        VisitAction::Continue
    }

    fn leave(&mut self, arena: &SyntaxArena, id: NodeId) -> VisitAction {
        match arena.kind(id) {
            NodeKind::Variable { annotation, .. } => {
                let ty = self.checker.translate_optional(*annotation);
                self.declare(arena, id, ty);
            }
            NodeKind::Parameter { annotation, .. } => {
                let ty = self.checker.translate_annotation(*annotation);
                self.declare(arena, id, ty);
            }
            NodeKind::Function {
                parameters,
                return_type,
                ..
            } => {
                let arguments = arena
                    .list(*parameters)
                    .iter()
                    .filter_map(|param| self.labeled_member(arena, *param))
                    .collect();
                let return_type = self.checker.translate_annotation(*return_type);
                self.declare(arena, id, StaticType::function(arguments, return_type));
            }
            NodeKind::Record { declarations, .. } => {
                let fields = arena
                    .list(*declarations)
                    .iter()
                    .filter(|member| matches!(arena.kind(**member), NodeKind::Variable { .. }))
                    .filter_map(|field| self.labeled_member(arena, *field))
                    .collect();
                let self_type = self.checker.node_or_fresh(id);
                self.declare(arena, id, StaticType::function(fields, self_type));
            }
            NodeKind::Enumeration { .. } => {
                self.enumerations.pop();
            }
            NodeKind::EnumerationCase {
                associated_values, ..
            } => {
                let arguments = arena
                    .list(*associated_values)
                    .iter()
                    .map(|annotation| FunctionArgument::positional(self.checker.translate_annotation(*annotation)))
                    .collect();
                let return_type = match self.enumerations.last() {
                    Some(ty) => ty.clone(),
                    None => self.checker.fresh(),
                };
                self.declare(arena, id, StaticType::function(arguments, return_type));
            }
            _ => {}
        }
        VisitAction::Continue
    }
}
