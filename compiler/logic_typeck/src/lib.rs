//! Type checking for the Logic front end.
//!
//! Produces equality constraints over `StaticType`s for a resolved program.
//! Solving them is [`logic_types::unify`]'s job; resolving a node's final type
//! is `Substitution::resolve` applied to [`TypeCheckerResult::nodes`].

mod checker;

pub use checker::{check, TypeCheckerResult};
