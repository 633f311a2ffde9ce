//! Arena storage for the syntax tree.
//!
//! - Contiguous storage for all nodes of a compile, every file included
//! - Child lists flattened into one `lists` store, addressed by `NodeRange`

use smallvec::SmallVec;

use crate::ast::{Literal, NodeKind};
use crate::{NodeId, NodeRange};

/// Contiguous storage for every syntax node of one compile.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SyntaxArena {
    /// All nodes, indexed by `NodeId`.
    nodes: Vec<NodeKind>,
    /// Flattened child lists.
    lists: Vec<NodeId>,
}

impl SyntaxArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a node and assign its identity.
    ///
    /// # Panics
    /// Panics if the arena exceeds `u32::MAX - 1` nodes.
    #[inline]
    pub fn alloc(&mut self, kind: NodeKind) -> NodeId {
        let index = to_index(self.nodes.len(), "nodes");
        self.nodes.push(kind);
        NodeId::new(index)
    }

    /// Get a node by id.
    ///
    /// # Panics
    /// Panics if `id` was not allocated by this arena.
    #[inline]
    #[track_caller]
    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.nodes[id.index()]
    }

    #[inline]
    pub fn get(&self, id: NodeId) -> Option<&NodeKind> {
        self.nodes.get(id.index())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Allocate a child list, return its range.
    ///
    /// # Panics
    /// Panics if the list store exceeds `u32::MAX - 1` entries.
    pub fn alloc_list(&mut self, ids: impl IntoIterator<Item = NodeId>) -> NodeRange {
        let start = self.lists.len();
        self.lists.extend(ids);
        let end = to_index(self.lists.len(), "list entries");
        let start = to_index(start, "list entries");
        NodeRange::new(start, end - start)
    }

    #[inline]
    pub fn list(&self, range: NodeRange) -> &[NodeId] {
        let start = range.start as usize;
        &self.lists[start..start + range.len()]
    }

    /// Name of a `Pattern`, `Identifier` or `TypeIdentifier` node.
    pub fn name(&self, id: NodeId) -> Option<&str> {
        match self.get(id)? {
            NodeKind::Pattern { name }
            | NodeKind::Identifier { name }
            | NodeKind::TypeIdentifier { name, .. } => Some(name),
            _ => None,
        }
    }

    /// Name of the pattern a declaration binds.
    pub fn declared_name(&self, declaration: NodeId) -> Option<&str> {
        let pattern = self.get(declaration)?.declared_pattern()?;
        self.name(pattern)
    }

    /// Children in traversal order.
    pub fn children(&self, id: NodeId) -> SmallVec<[NodeId; 8]> {
        let mut out = SmallVec::new();
        match self.kind(id) {
            NodeKind::Program { statements } => out.extend_from_slice(self.list(*statements)),
            NodeKind::Pattern { .. }
            | NodeKind::Identifier { .. }
            | NodeKind::Placeholder
            | NodeKind::Literal(
                Literal::None
                | Literal::Boolean(_)
                | Literal::Number(_)
                | Literal::String(_)
                | Literal::Color(_),
            ) => {}
            NodeKind::Import { name } | NodeKind::GenericParameter { name } => out.push(*name),
            NodeKind::Namespace { name, declarations } => {
                out.push(*name);
                out.extend_from_slice(self.list(*declarations));
            }
            NodeKind::Variable {
                name,
                annotation,
                initializer,
            } => {
                out.push(*name);
                out.extend(*annotation);
                out.extend(*initializer);
            }
            NodeKind::Function {
                name,
                generic_parameters,
                parameters,
                return_type,
                block,
            } => {
                out.push(*name);
                out.extend_from_slice(self.list(*generic_parameters));
                out.extend_from_slice(self.list(*parameters));
                out.push(*return_type);
                out.extend_from_slice(self.list(*block));
            }
            NodeKind::Parameter {
                name,
                annotation,
                default_value,
            } => {
                out.push(*name);
                out.push(*annotation);
                out.extend(*default_value);
            }
            NodeKind::Record {
                name,
                generic_parameters,
                declarations,
            } => {
                out.push(*name);
                out.extend_from_slice(self.list(*generic_parameters));
                out.extend_from_slice(self.list(*declarations));
            }
            NodeKind::Enumeration {
                name,
                generic_parameters,
                cases,
            } => {
                out.push(*name);
                out.extend_from_slice(self.list(*generic_parameters));
                out.extend_from_slice(self.list(*cases));
            }
            NodeKind::EnumerationCase {
                name,
                associated_values,
            } => {
                out.push(*name);
                out.extend_from_slice(self.list(*associated_values));
            }
            NodeKind::Branch { condition, block } | NodeKind::Loop { condition, block } => {
                out.push(*condition);
                out.extend_from_slice(self.list(*block));
            }
            NodeKind::Return { expression }
            | NodeKind::ExpressionStatement { expression }
            | NodeKind::Argument { expression, .. } => out.push(*expression),
            NodeKind::Member { object, .. } => out.push(*object),
            NodeKind::Call { callee, arguments } => {
                out.push(*callee);
                out.extend_from_slice(self.list(*arguments));
            }
            NodeKind::Literal(Literal::Array(elements)) => {
                out.extend_from_slice(self.list(*elements));
            }
            NodeKind::TypeIdentifier {
                generic_arguments, ..
            } => out.extend_from_slice(self.list(*generic_arguments)),
            NodeKind::FunctionType {
                arguments,
                return_type,
            } => {
                out.extend_from_slice(self.list(*arguments));
                out.push(*return_type);
            }
        }
        out
    }
}

/// `len` as a `u32` index, keeping `u32::MAX` free.
#[track_caller]
fn to_index(len: usize, what: &str) -> u32 {
    u32::try_from(len)
        .ok()
        .filter(|index| *index != u32::MAX)
        .unwrap_or_else(|| panic!("syntax arena exceeded {} {what}", u32::MAX - 1))
}
