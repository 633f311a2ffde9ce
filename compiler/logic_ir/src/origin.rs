//! Program files, their origins, and joining them into one program.

use std::fmt;

use crate::visitor::{visit_fn, VisitAction};
use crate::{NodeId, NodeKind, NodeTable, SyntaxArena};

/// Where a program file came from.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Origin {
    /// The reserved tag for standard library sources.
    StandardLibrary,
    /// A user file, named by its workspace-relative path.
    File(String),
}

impl Origin {
    pub fn file(path: impl Into<String>) -> Self {
        Origin::File(path.into())
    }

    pub fn is_standard_library(&self) -> bool {
        matches!(self, Origin::StandardLibrary)
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Origin::StandardLibrary => write!(f, "<standard library>"),
            Origin::File(path) => write!(f, "{path}"),
        }
    }
}

/// One parsed file: its root `Program` node and origin tag.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProgramFile {
    pub root: NodeId,
    pub origin: Origin,
}

impl ProgramFile {
    pub fn new(root: NodeId, origin: Origin) -> Self {
        ProgramFile { root, origin }
    }
}

/// Maps every node to the file that contains it.
#[derive(Clone, Debug, Default)]
pub struct OriginTable {
    files: Vec<ProgramFile>,
    file_of: NodeTable<usize>,
}

impl OriginTable {
    pub fn build(arena: &SyntaxArena, files: &[ProgramFile]) -> Self {
        let mut file_of = NodeTable::with_capacity(arena.len());
        for (index, file) in files.iter().enumerate() {
            let _ = visit_fn(
                arena,
                file.root,
                |id, _| {
                    file_of.insert(id, index);
                    VisitAction::Continue
                },
                |_, _| VisitAction::Continue,
            );
        }
        OriginTable {
            files: files.to_vec(),
            file_of,
        }
    }

    pub fn files(&self) -> &[ProgramFile] {
        &self.files
    }

    pub fn origin(&self, id: NodeId) -> Option<&Origin> {
        let index = *self.file_of.get(id)?;
        self.files.get(index).map(|file| &file.origin)
    }

    pub fn is_from_standard_library(&self, id: NodeId) -> bool {
        self.origin(id).is_some_and(Origin::is_standard_library)
    }

    /// True when `id` belongs to a known file other than `current`.
    pub fn is_from_other_file(&self, id: NodeId, current: &Origin) -> bool {
        self.origin(id).is_some_and(|origin| origin != current)
    }
}

/// Join several file roots into one `Program` node.
///
/// Statements are concatenated in file order. No node is copied or
/// renumbered, so every identity stays valid in the joined program.
pub fn join_programs(arena: &mut SyntaxArena, roots: &[NodeId]) -> NodeId {
    let mut statements = Vec::new();
    for root in roots {
        match arena.kind(*root) {
            NodeKind::Program { statements: list } => {
                statements.extend_from_slice(arena.list(*list));
            }
            _ => statements.push(*root),
        }
    }
    let statements = arena.alloc_list(statements);
    arena.alloc(NodeKind::Program { statements })
}
