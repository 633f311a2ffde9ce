//! Lazy evaluation for Logic programs.
//!
//! # Architecture
//!
//! ```text
//! resolved + type-checked program
//!     ↓
//! ThunkGraph::build()        seeds for literals, thunks for everything else
//!     ↓
//! EvaluationContext          evaluate(id) on demand, memoized per context
//!     ↓ call
//! fork()                     callee locals forgotten, parameters bound
//! ```
//!
//! Standard library declarations are backed by a [`NativeRegistry`] keyed by
//! qualified name.

mod config;
mod context;
mod graph;
mod native;
mod value;

pub use config::{EvalConfig, DEFAULT_MAX_CALL_DEPTH, DEFAULT_MAX_LOOP_ITERATIONS};
pub use context::{EvalEnv, EvalStats, EvaluationContext};
pub use graph::{GraphInput, ParameterSlot, Thunk, ThunkGraph, ThunkKind};
pub use native::{CallArguments, NativeError, NativeFn, NativeRegistry};
pub use value::{ArgumentSlot, FunctionImpl, FunctionMemory, Memory, Value};

#[cfg(test)]
mod test_helpers;
