//! Static types for the Logic front end.
//!
//! - `StaticType`: type variables, constructors, generics and function types
//! - `Constraint`: an equality between two types
//! - `Substitution`: bindings learned by [`unify`], resolved to a fixpoint
//! - `instantiate`: fresh variables for a generic signature at a use site

mod substitution;
pub mod traverse;
mod ty;
mod unify;

pub use substitution::{instantiate, Substitution, TypeNameGenerator};
pub use traverse::{free_variables, TypeFolder, TypeVisitor};
pub use ty::{Constraint, FunctionArgument, StaticType, TypeVar};
pub use unify::{unify, UnifyError};
