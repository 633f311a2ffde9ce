//! Name resolution for the Logic front end.
//!
//! Two passes, both run once per compile:
//! - [`Namespace::build`]: qualified name tables over every program file
//! - [`Scope::build`]: binds each reference to a declaration pattern

mod namespace;
mod scope;

pub use namespace::{NameKind, Namespace, NamespaceError};
pub use scope::{member_path, Scope};
