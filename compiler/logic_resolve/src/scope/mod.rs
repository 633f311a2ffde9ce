//! Binds references to the declarations they name.
//!
//! Every identifier, member-expression chain and type identifier resolves to
//! a binding pattern, or is recorded as undefined. Undefined references are
//! warnings, not errors: editors need everything else resolved even while a
//! program is half-written.
//!
//! Identifier lookup order, first hit wins:
//! 1. the value scope stack, innermost frame first
//! 2. the namespace, by bare name
//! 3. the namespace, by the current namespace path plus the bare name
//!
//! Member chains `A.B.C` are looked up in the namespace by their full dotted
//! path only. Record fields never enter the value scope: they are reachable
//! through member expressions alone.

use indexmap::IndexSet;
use logic_diagnostic::{Diagnostic, ErrorCode, Reporter};
use logic_ir::{NodeId, NodeKind, SyntaxArena, VisitAction, Visitor};
use rustc_hash::FxHashMap;

use crate::Namespace;

/// Reference resolution results for one or more programs.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Scope {
    pub identifier_expr_to_pattern: FxHashMap<NodeId, NodeId>,
    pub member_expr_to_pattern: FxHashMap<NodeId, NodeId>,
    pub type_identifier_to_pattern: FxHashMap<NodeId, NodeId>,
    pub undefined_identifiers: IndexSet<NodeId>,
    pub undefined_member_expressions: IndexSet<NodeId>,
    pub undefined_type_identifiers: IndexSet<NodeId>,
}

impl Scope {
    /// Resolve every reference under `root` against `namespace`.
    #[tracing::instrument(level = "debug", skip_all, fields(root = %root))]
    pub fn build(
        arena: &SyntaxArena,
        root: NodeId,
        namespace: &Namespace,
        reporter: &dyn Reporter,
    ) -> Scope {
        let mut resolver = ScopeResolver::new(namespace, reporter);
        let _ = logic_ir::walk(&mut resolver, arena, root);
        let scope = resolver.scope;
        tracing::debug!(
            identifiers = scope.identifier_expr_to_pattern.len(),
            members = scope.member_expr_to_pattern.len(),
            types = scope.type_identifier_to_pattern.len(),
            undefined = scope.undefined_identifiers.len()
                + scope.undefined_member_expressions.len()
                + scope.undefined_type_identifiers.len(),
            "scope built"
        );
        scope
    }

    /// The pattern a reference node resolved to, of any kind.
    pub fn pattern_for(&self, id: NodeId) -> Option<NodeId> {
        self.identifier_expr_to_pattern
            .get(&id)
            .or_else(|| self.member_expr_to_pattern.get(&id))
            .or_else(|| self.type_identifier_to_pattern.get(&id))
            .copied()
    }

    pub fn is_undefined(&self, id: NodeId) -> bool {
        self.undefined_identifiers.contains(&id)
            || self.undefined_member_expressions.contains(&id)
            || self.undefined_type_identifiers.contains(&id)
    }

    /// Union with a scope built for another file over the same namespace.
    pub fn merge(&mut self, other: Scope) {
        self.identifier_expr_to_pattern
            .extend(other.identifier_expr_to_pattern);
        self.member_expr_to_pattern.extend(other.member_expr_to_pattern);
        self.type_identifier_to_pattern
            .extend(other.type_identifier_to_pattern);
        self.undefined_identifiers.extend(other.undefined_identifiers);
        self.undefined_member_expressions
            .extend(other.undefined_member_expressions);
        self.undefined_type_identifiers
            .extend(other.undefined_type_identifiers);
    }
}

/// Lexical frames of name bindings.
#[derive(Debug)]
struct ScopeStack {
    frames: Vec<FxHashMap<String, NodeId>>,
}

impl ScopeStack {
    fn new() -> Self {
        ScopeStack {
            frames: vec![FxHashMap::default()],
        }
    }

    fn push(&mut self) {
        self.frames.push(FxHashMap::default());
    }

    fn pop(&mut self) {
        if self.frames.len() > 1 {
            self.frames.pop();
        }
    }

    fn define(&mut self, name: &str, pattern: NodeId) {
        if let Some(frame) = self.frames.last_mut() {
            frame.insert(name.to_owned(), pattern);
        }
    }

    fn lookup(&self, name: &str) -> Option<NodeId> {
        self.frames
            .iter()
            .rev()
            .find_map(|frame| frame.get(name).copied())
    }
}

/// Declaration kinds that open a scope frame.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum Container {
    Namespace,
    Record,
    Enumeration,
    Function,
}

struct ScopeResolver<'a> {
    namespace: &'a Namespace,
    reporter: &'a dyn Reporter,
    values: ScopeStack,
    types: ScopeStack,
    containers: Vec<Container>,
    /// Enclosing namespace/record/enumeration names.
    path: Vec<String>,
    scope: Scope,
}

impl<'a> ScopeResolver<'a> {
    fn new(namespace: &'a Namespace, reporter: &'a dyn Reporter) -> Self {
        ScopeResolver {
            namespace,
            reporter,
            values: ScopeStack::new(),
            types: ScopeStack::new(),
            containers: Vec::new(),
            path: Vec::new(),
            scope: Scope::default(),
        }
    }

    fn open(&mut self, container: Container, name: Option<&str>) {
        self.values.push();
        self.types.push();
        self.containers.push(container);
        if let Some(name) = name {
            self.path.push(name.to_owned());
        }
    }

    fn close(&mut self, container: Container) {
        self.values.pop();
        self.types.pop();
        self.containers.pop();
        if container != Container::Function {
            self.path.pop();
        }
    }

    fn qualified_in_path(&self, name: &str) -> Option<String> {
        (!self.path.is_empty()).then(|| format!("{}.{name}", self.path.join(".")))
    }

    fn resolve_value(&self, name: &str) -> Option<NodeId> {
        self.values
            .lookup(name)
            .or_else(|| self.namespace.value(name))
            .or_else(|| {
                self.qualified_in_path(name)
                    .and_then(|qualified| self.namespace.value(&qualified))
            })
    }

    fn resolve_type(&self, name: &str) -> Option<NodeId> {
        self.types
            .lookup(name)
            .or_else(|| self.namespace.type_named(name))
            .or_else(|| {
                self.qualified_in_path(name)
                    .and_then(|qualified| self.namespace.type_named(&qualified))
            })
    }

    fn define_value(&mut self, arena: &SyntaxArena, declaration: NodeId) {
        if let (Some(pattern), Some(name)) = (
            arena.kind(declaration).declared_pattern(),
            arena.declared_name(declaration),
        ) {
            self.values.define(name, pattern);
        }
    }

    fn define_type(&mut self, arena: &SyntaxArena, declaration: NodeId) {
        if let (Some(pattern), Some(name)) = (
            arena.kind(declaration).declared_pattern(),
            arena.declared_name(declaration),
        ) {
            self.types.define(name, pattern);
        }
    }

    fn enter_identifier(&mut self, id: NodeId, name: &str) {
        if let Some(pattern) = self.resolve_value(name) {
            self.scope.identifier_expr_to_pattern.insert(id, pattern);
        } else {
            self.scope.undefined_identifiers.insert(id);
            self.reporter.warn(
                Diagnostic::warning(ErrorCode::L2001)
                    .with_message(format!("undefined identifier `{name}`"))
                    .with_node(id),
            );
        }
    }

    fn enter_member(&mut self, arena: &SyntaxArena, id: NodeId) -> VisitAction {
        let Some(path) = member_path(arena, id) else {
            // Receiver is not a plain name chain, e.g. `f().field`.
            return VisitAction::Continue;
        };
        if let Some(pattern) = self.namespace.value(&path) {
            self.scope.member_expr_to_pattern.insert(id, pattern);
            return VisitAction::SkipChildren;
        }
        self.scope.undefined_member_expressions.insert(id);
        self.reporter.warn(
            Diagnostic::warning(ErrorCode::L2002)
                .with_message(format!("`{path}` is not declared in the namespace"))
                .with_node(id),
        );
        // The receiver may still be a local, e.g. `point.x`.
        VisitAction::Continue
    }

    fn enter_type_identifier(&mut self, id: NodeId, name: &str) {
        if let Some(pattern) = self.resolve_type(name) {
            self.scope.type_identifier_to_pattern.insert(id, pattern);
        } else {
            self.scope.undefined_type_identifiers.insert(id);
            self.reporter.warn(
                Diagnostic::warning(ErrorCode::L2003)
                    .with_message(format!("undefined type `{name}`"))
                    .with_node(id),
            );
        }
    }
}

impl Visitor for ScopeResolver<'_> {
    fn enter(&mut self, arena: &SyntaxArena, id: NodeId) -> VisitAction {
        match arena.kind(id) {
            NodeKind::Namespace { .. } => {
                self.open(Container::Namespace, arena.declared_name(id));
            }
            NodeKind::Record { .. } => {
                self.define_type(arena, id);
                self.open(Container::Record, arena.declared_name(id));
            }
            NodeKind::Enumeration { .. } => {
                self.define_type(arena, id);
                self.open(Container::Enumeration, arena.declared_name(id));
            }
            NodeKind::Function { .. } => {
                // Defined before the body so functions can recurse.
                self.define_value(arena, id);
                self.open(Container::Function, None);
            }
            NodeKind::GenericParameter { .. } => self.define_type(arena, id),
            NodeKind::Identifier { name } => self.enter_identifier(id, name),
            NodeKind::Member { .. } => return self.enter_member(arena, id),
            NodeKind::TypeIdentifier { name, .. } => self.enter_type_identifier(id, name),
            _ => {}
        }
        VisitAction::Continue
    }

    fn leave(&mut self, arena: &SyntaxArena, id: NodeId) -> VisitAction {
        match arena.kind(id) {
            NodeKind::Namespace { .. } => self.close(Container::Namespace),
            NodeKind::Record { .. } => self.close(Container::Record),
            NodeKind::Enumeration { .. } => self.close(Container::Enumeration),
            NodeKind::Function { .. } => self.close(Container::Function),
            NodeKind::Parameter { .. } => self.define_value(arena, id),
            NodeKind::Variable { .. } => {
                if self.containers.last() != Some(&Container::Record) {
                    self.define_value(arena, id);
                }
            }
            _ => {}
        }
        VisitAction::Continue
    }
}

/// Dotted path of a member chain rooted at a plain identifier.
pub fn member_path(arena: &SyntaxArena, id: NodeId) -> Option<String> {
    let mut segments = Vec::new();
    let mut current = id;
    loop {
        match arena.kind(current) {
            NodeKind::Member { object, member } => {
                segments.push(member.as_str());
                current = *object;
            }
            NodeKind::Identifier { name } => {
                segments.push(name.as_str());
                break;
            }
            _ => return None,
        }
    }
    segments.reverse();
    Some(segments.join("."))
}

#[cfg(test)]
mod tests;
