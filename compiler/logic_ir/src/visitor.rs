//! Depth-first traversal with enter/leave control.
//!
//! Every pass is a `Visitor`: `enter` runs before a node's children and
//! `leave` after them. Either hook steers the walk with a [`VisitAction`]:
//!
//! - `Continue`: descend normally
//! - `SkipChildren`: do not descend, but still call `leave` for this node
//! - `Stop`: halt the whole traversal; no further hooks run
//!
//! Passes visit different subsets of children by returning `SkipChildren`
//! and walking the parts they care about themselves.
//!
//! # Example
//!
//! ```text
//! struct CountCalls {
//!     count: usize,
//! }
//!
//! impl Visitor for CountCalls {
//!     fn enter(&mut self, arena: &SyntaxArena, id: NodeId) -> VisitAction {
//!         if matches!(arena.kind(id), NodeKind::Call { .. }) {
//!             self.count += 1;
//!         }
//!         VisitAction::Continue
//!     }
//! }
//! ```

use std::ops::ControlFlow;

use logic_stack::ensure_sufficient_stack;

use crate::{NodeId, NodeKind, SyntaxArena};

/// Per-node traversal signal.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum VisitAction {
    #[default]
    Continue,
    SkipChildren,
    Stop,
}

/// Traversal hooks. Both default to `Continue`.
pub trait Visitor {
    fn enter(&mut self, arena: &SyntaxArena, id: NodeId) -> VisitAction {
        let _ = (arena, id);
        VisitAction::Continue
    }

    /// `SkipChildren` returned from here is treated as `Continue`.
    fn leave(&mut self, arena: &SyntaxArena, id: NodeId) -> VisitAction {
        let _ = (arena, id);
        VisitAction::Continue
    }
}

/// Walk the subtree rooted at `id`.
///
/// Returns `ControlFlow::Break(())` if a hook returned `Stop`.
pub fn walk<V: Visitor + ?Sized>(
    visitor: &mut V,
    arena: &SyntaxArena,
    id: NodeId,
) -> ControlFlow<()> {
    ensure_sufficient_stack(|| {
        match visitor.enter(arena, id) {
            VisitAction::Stop => return ControlFlow::Break(()),
            VisitAction::SkipChildren => {}
            VisitAction::Continue => {
                for child in arena.children(id) {
                    walk(visitor, arena, child)?;
                }
            }
        }
        match visitor.leave(arena, id) {
            VisitAction::Stop => ControlFlow::Break(()),
            VisitAction::Continue | VisitAction::SkipChildren => ControlFlow::Continue(()),
        }
    })
}

/// Adapter turning a pair of closures into a [`Visitor`].
struct FnVisitor<E, L> {
    on_enter: E,
    on_leave: L,
}

impl<E, L> Visitor for FnVisitor<E, L>
where
    E: FnMut(NodeId, &NodeKind) -> VisitAction,
    L: FnMut(NodeId, &NodeKind) -> VisitAction,
{
    fn enter(&mut self, arena: &SyntaxArena, id: NodeId) -> VisitAction {
        (self.on_enter)(id, arena.kind(id))
    }

    fn leave(&mut self, arena: &SyntaxArena, id: NodeId) -> VisitAction {
        (self.on_leave)(id, arena.kind(id))
    }
}

/// Walk `root` with closure hooks.
pub fn visit_fn(
    arena: &SyntaxArena,
    root: NodeId,
    on_enter: impl FnMut(NodeId, &NodeKind) -> VisitAction,
    on_leave: impl FnMut(NodeId, &NodeKind) -> VisitAction,
) -> ControlFlow<()> {
    walk(&mut FnVisitor { on_enter, on_leave }, arena, root)
}
