//! Logic IR - syntax tree storage shared by every pass.
//!
//! This crate contains the data every later pass joins on:
//! - `NodeId`: the stable identity of a node, assigned once at allocation
//! - `SyntaxArena`: flat storage for all nodes of a compile, all files included
//! - `NodeKind`: the closed set of syntax node variants
//! - `AstBuilder`: construction API used by front ends and tests
//! - `Visitor` / `walk`: depth-first traversal with enter/leave control
//! - `OriginTable`: which program file (user or standard library) owns a node
//!
//! # Design
//!
//! - **Flatten everything**: children are `NodeId` indices, child lists are
//!   `NodeRange`s into one list store.
//! - **One arena per compile**: every file is allocated into the same arena,
//!   so identities never collide and joining programs never renumbers.
//! - **Side tables, not caches**: derived per-node data lives in
//!   `NodeTable<T>` owned by the pass that computes it.

mod arena;
mod ast;
mod builder;
mod declaration_path;
mod node_id;
mod origin;
pub mod visitor;

pub use arena::SyntaxArena;
pub use ast::{Literal, NodeKind, PRIMITIVE_TYPE_NAMES};
pub use builder::AstBuilder;
pub use declaration_path::declaration_path_to;
pub use node_id::{NodeId, NodeRange, NodeTable};
pub use origin::{join_programs, Origin, OriginTable, ProgramFile};
pub use visitor::{visit_fn, walk, VisitAction, Visitor};
