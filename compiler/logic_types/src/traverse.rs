//! Structural recursion over `StaticType`.
//!
//! Override the `fold_*` / `visit_*` hook for the variant you care about;
//! the default `fold` / `visit` dispatch and recurse into children.

use logic_stack::ensure_sufficient_stack;

use crate::{FunctionArgument, StaticType, TypeVar};

/// Rebuilds a type, variant by variant.
pub trait TypeFolder {
    fn fold(&mut self, ty: &StaticType) -> StaticType {
        ensure_sufficient_stack(|| match ty {
            StaticType::Variable(var) => self.fold_variable(*var),
            StaticType::Generic(var) => self.fold_generic(*var),
            StaticType::Constructor { name, parameters } => self.fold_constructor(name, parameters),
            StaticType::Function {
                arguments,
                return_type,
            } => self.fold_function(arguments, return_type),
        })
    }

    fn fold_variable(&mut self, var: TypeVar) -> StaticType {
        StaticType::Variable(var)
    }

    fn fold_generic(&mut self, var: TypeVar) -> StaticType {
        StaticType::Generic(var)
    }

    fn fold_constructor(&mut self, name: &str, parameters: &[StaticType]) -> StaticType {
        StaticType::Constructor {
            name: name.to_owned(),
            parameters: parameters.iter().map(|p| self.fold(p)).collect(),
        }
    }

    fn fold_function(&mut self, arguments: &[FunctionArgument], return_type: &StaticType) -> StaticType {
        StaticType::Function {
            arguments: arguments
                .iter()
                .map(|arg| FunctionArgument {
                    label: arg.label.clone(),
                    ty: self.fold(&arg.ty),
                })
                .collect(),
            return_type: Box::new(self.fold(return_type)),
        }
    }
}

/// Walks a type without rebuilding it.
pub trait TypeVisitor {
    fn visit(&mut self, ty: &StaticType) {
        ensure_sufficient_stack(|| match ty {
            StaticType::Variable(var) => self.visit_variable(*var),
            StaticType::Generic(var) => self.visit_generic(*var),
            StaticType::Constructor { parameters, .. } => {
                for param in parameters {
                    self.visit(param);
                }
            }
            StaticType::Function {
                arguments,
                return_type,
            } => {
                for arg in arguments {
                    self.visit(&arg.ty);
                }
                self.visit(return_type);
            }
        });
    }

    fn visit_variable(&mut self, _var: TypeVar) {}

    fn visit_generic(&mut self, _var: TypeVar) {}
}

/// Free type variables of `ty`, in first-occurrence order.
pub fn free_variables(ty: &StaticType) -> Vec<TypeVar> {
    struct Collector {
        vars: Vec<TypeVar>,
    }

    impl TypeVisitor for Collector {
        fn visit_variable(&mut self, var: TypeVar) {
            if !self.vars.contains(&var) {
                self.vars.push(var);
            }
        }
    }

    let mut collector = Collector { vars: Vec::new() };
    collector.visit(ty);
    collector.vars
}
