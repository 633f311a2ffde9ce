//! Qualified-name path from a program root to a declaration.
//!
//! Code generators use this to name imports across files: a function `darken`
//! inside `namespace Color` has the path `["Color", "darken"]`.

use crate::visitor::{walk, VisitAction, Visitor};
use crate::{NodeId, SyntaxArena};

struct PathFinder {
    target: NodeId,
    path: Vec<String>,
    found: Option<Vec<String>>,
}

impl PathFinder {
    fn matches(&self, arena: &SyntaxArena, id: NodeId) -> bool {
        id == self.target || arena.kind(id).declared_pattern() == Some(self.target)
    }
}

impl Visitor for PathFinder {
    fn enter(&mut self, arena: &SyntaxArena, id: NodeId) -> VisitAction {
        let kind = arena.kind(id);
        if kind.declared_pattern().is_none() {
            return VisitAction::Continue;
        }
        let name = arena.declared_name(id).unwrap_or_default().to_owned();
        if self.matches(arena, id) {
            let mut path = self.path.clone();
            path.push(name);
            self.found = Some(path);
            return VisitAction::Stop;
        }
        if kind.is_container() {
            self.path.push(name);
        }
        VisitAction::Continue
    }

    fn leave(&mut self, arena: &SyntaxArena, id: NodeId) -> VisitAction {
        if arena.kind(id).is_container() {
            self.path.pop();
        }
        VisitAction::Continue
    }
}

/// Path of namespace/record/enumeration names leading to `id`, ending with
/// the declaration's own name. `id` may be the declaration or its pattern.
pub fn declaration_path_to(arena: &SyntaxArena, root: NodeId, id: NodeId) -> Option<Vec<String>> {
    let mut finder = PathFinder {
        target: id,
        path: Vec::new(),
        found: None,
    };
    let _ = walk(&mut finder, arena, root);
    finder.found
}
