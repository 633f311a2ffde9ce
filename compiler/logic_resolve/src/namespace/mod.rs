//! Flat table of qualified names.
//!
//! Values and types live in separate maps, both keyed by dotted qualified
//! names (`Colors.primary`, `TextAlign.left`) and pointing at the binding
//! pattern of the declaration. Insertion order is kept so consumers list
//! declarations in source order.

use std::fmt;

use indexmap::IndexMap;
use logic_diagnostic::{Diagnostic, ErrorCode};
use logic_ir::{NodeId, NodeKind, ProgramFile, SyntaxArena, VisitAction, Visitor, PRIMITIVE_TYPE_NAMES};
use rustc_hash::FxHashMap;
use thiserror::Error;

/// Which of the two maps a name lives in.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum NameKind {
    Value,
    Type,
}

impl fmt::Display for NameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NameKind::Value => write!(f, "value"),
            NameKind::Type => write!(f, "type"),
        }
    }
}

/// Fatal namespace construction error.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum NamespaceError {
    #[error("{kind} `{name}` is declared more than once")]
    Collision {
        kind: NameKind,
        name: String,
        existing: NodeId,
        duplicate: NodeId,
    },
}

impl NamespaceError {
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            NamespaceError::Collision {
                existing,
                duplicate,
                ..
            } => Diagnostic::error(ErrorCode::L1001)
                .with_message(self.to_string())
                .with_node(*duplicate)
                .with_note(format!("first declared at node {existing}")),
        }
    }
}

/// Qualified name tables for one compile.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Namespace {
    values: IndexMap<String, NodeId>,
    types: IndexMap<String, NodeId>,
    value_names: FxHashMap<NodeId, String>,
    type_names: FxHashMap<NodeId, String>,
}

impl Namespace {
    /// Build one namespace over every program file.
    ///
    /// Collisions abort immediately; user code cannot shadow library names.
    #[tracing::instrument(level = "debug", skip_all, fields(files = files.len()))]
    pub fn build(arena: &SyntaxArena, files: &[ProgramFile]) -> Result<Namespace, NamespaceError> {
        let mut builder = NamespaceBuilder::default();
        for file in files {
            tracing::trace!(origin = %file.origin, "namespace pass");
            let _ = logic_ir::walk(&mut builder, arena, file.root);
            if let Some(error) = builder.error.take() {
                return Err(error);
            }
        }
        tracing::debug!(
            values = builder.namespace.values.len(),
            types = builder.namespace.types.len(),
            "namespace built"
        );
        Ok(builder.namespace)
    }

    pub fn values(&self) -> &IndexMap<String, NodeId> {
        &self.values
    }

    pub fn types(&self) -> &IndexMap<String, NodeId> {
        &self.types
    }

    pub fn value(&self, qualified_name: &str) -> Option<NodeId> {
        self.values.get(qualified_name).copied()
    }

    pub fn type_named(&self, qualified_name: &str) -> Option<NodeId> {
        self.types.get(qualified_name).copied()
    }

    /// Qualified name under which `pattern` is declared as a value.
    pub fn value_name(&self, pattern: NodeId) -> Option<&str> {
        self.value_names.get(&pattern).map(String::as_str)
    }

    /// Qualified name under which `pattern` is declared as a type.
    pub fn type_name(&self, pattern: NodeId) -> Option<&str> {
        self.type_names.get(&pattern).map(String::as_str)
    }

    pub fn insert_value(&mut self, name: String, pattern: NodeId) -> Result<(), NamespaceError> {
        Self::insert(&mut self.values, &mut self.value_names, NameKind::Value, name, pattern)
    }

    pub fn insert_type(&mut self, name: String, pattern: NodeId) -> Result<(), NamespaceError> {
        Self::insert(&mut self.types, &mut self.type_names, NameKind::Type, name, pattern)
    }

    /// Disjoint union. Any shared name is a collision.
    pub fn merge(&mut self, other: Namespace) -> Result<(), NamespaceError> {
        for (name, pattern) in other.values {
            self.insert_value(name, pattern)?;
        }
        for (name, pattern) in other.types {
            self.insert_type(name, pattern)?;
        }
        Ok(())
    }

    fn insert(
        map: &mut IndexMap<String, NodeId>,
        reverse: &mut FxHashMap<NodeId, String>,
        kind: NameKind,
        name: String,
        pattern: NodeId,
    ) -> Result<(), NamespaceError> {
        if let Some(existing) = map.get(&name) {
            return Err(NamespaceError::Collision {
                kind,
                name,
                existing: *existing,
                duplicate: pattern,
            });
        }
        tracing::trace!(%kind, %name, %pattern, "declare");
        reverse.insert(pattern, name.clone());
        map.insert(name, pattern);
        Ok(())
    }
}

#[derive(Default)]
struct NamespaceBuilder {
    path: Vec<String>,
    namespace: Namespace,
    error: Option<NamespaceError>,
}

impl NamespaceBuilder {
    fn qualify(&self, name: &str) -> String {
        if self.path.is_empty() {
            name.to_owned()
        } else {
            format!("{}.{name}", self.path.join("."))
        }
    }

    fn declare(&mut self, kind: NameKind, arena: &SyntaxArena, declaration: NodeId) -> VisitAction {
        let (Some(pattern), Some(name)) = (
            arena.kind(declaration).declared_pattern(),
            arena.declared_name(declaration),
        ) else {
            return VisitAction::Continue;
        };
        let qualified = self.qualify(name);
        let result = match kind {
            NameKind::Value => self.namespace.insert_value(qualified, pattern),
            NameKind::Type => self.namespace.insert_type(qualified, pattern),
        };
        match result {
            Ok(()) => VisitAction::Continue,
            Err(error) => {
                self.error = Some(error);
                VisitAction::Stop
            }
        }
    }
}

impl Visitor for NamespaceBuilder {
    fn enter(&mut self, arena: &SyntaxArena, id: NodeId) -> VisitAction {
        match arena.kind(id) {
            NodeKind::Namespace { .. } => {
                self.path.push(arena.declared_name(id).unwrap_or_default().to_owned());
                VisitAction::Continue
            }
            NodeKind::Record { .. } | NodeKind::Enumeration { .. } => {
                let action = self.declare(NameKind::Type, arena, id);
                self.path.push(arena.declared_name(id).unwrap_or_default().to_owned());
                action
            }
            // Function bodies and initializers hold no namespace-level names.
            NodeKind::Function { .. } | NodeKind::Variable { .. } | NodeKind::EnumerationCase { .. } => {
                VisitAction::SkipChildren
            }
            _ => VisitAction::Continue,
        }
    }

    fn leave(&mut self, arena: &SyntaxArena, id: NodeId) -> VisitAction {
        match arena.kind(id) {
            NodeKind::Namespace { .. } | NodeKind::Enumeration { .. } => {
                self.path.pop();
                VisitAction::Continue
            }
            NodeKind::Record { .. } => {
                self.path.pop();
                let is_primitive = arena
                    .declared_name(id)
                    .is_some_and(|name| PRIMITIVE_TYPE_NAMES.contains(&name));
                if is_primitive {
                    VisitAction::Continue
                } else {
                    self.declare(NameKind::Value, arena, id)
                }
            }
            NodeKind::Function { .. } | NodeKind::Variable { .. } | NodeKind::EnumerationCase { .. } => {
                self.declare(NameKind::Value, arena, id)
            }
            _ => VisitAction::Continue,
        }
    }
}

#[cfg(test)]
mod tests;
