//! Constraint solving.
//!
//! Drains a FIFO queue of constraints, dispatching on the shapes of
//! `(head, tail)`. Every new binding is applied to the pending queue
//! immediately so later constraints see it.

use std::collections::VecDeque;

use logic_diagnostic::{Diagnostic, ErrorCode, Reporter};
use thiserror::Error;

use crate::{Constraint, FunctionArgument, StaticType, Substitution, TypeVar};

/// Fatal unification failure. Downstream passes assume a well-typed program.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum UnifyError {
    #[error("type `{expected}` does not match `{found}`")]
    NameMismatch { expected: String, found: String },

    #[error("type `{name}` expects {expected} generic arguments, found {found}")]
    GenericArgumentsCountMismatch {
        name: String,
        expected: usize,
        found: usize,
    },

    #[error("function expects {expected} arguments, found {found}")]
    ArgumentCountMismatch { expected: usize, found: usize },

    #[error("labeled and unlabeled arguments mixed between `{head}` and `{tail}`")]
    LabelMismatch { head: StaticType, tail: StaticType },

    #[error("`{head}` and `{tail}` are different kinds of type")]
    KindMismatch { head: StaticType, tail: StaticType },

    #[error("type variable `?{}` occurs in `{ty}`", var.raw())]
    InfiniteType { var: TypeVar, ty: StaticType },
}

impl UnifyError {
    pub fn code(&self) -> ErrorCode {
        match self {
            UnifyError::NameMismatch { .. } => ErrorCode::L3001,
            UnifyError::GenericArgumentsCountMismatch { .. } => ErrorCode::L3002,
            UnifyError::ArgumentCountMismatch { .. } => ErrorCode::L3003,
            UnifyError::LabelMismatch { .. } => ErrorCode::L3004,
            UnifyError::KindMismatch { .. } => ErrorCode::L3005,
            UnifyError::InfiniteType { .. } => ErrorCode::L3006,
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic::error(self.code()).with_message(self.to_string())
    }
}

/// Solve `constraints`, producing the substitution.
///
/// Constraints against a `Generic` are reported as warnings and skipped.
#[tracing::instrument(level = "debug", skip_all, fields(constraints = constraints.len()))]
pub fn unify(
    constraints: Vec<Constraint>,
    reporter: &dyn Reporter,
) -> Result<Substitution, UnifyError> {
    let mut unifier = Unifier {
        queue: constraints.into(),
        substitution: Substitution::new(),
        reporter,
    };
    unifier.run()?;
    tracing::debug!(bindings = unifier.substitution.len(), "unification complete");
    Ok(unifier.substitution)
}

struct Unifier<'r> {
    queue: VecDeque<Constraint>,
    substitution: Substitution,
    reporter: &'r dyn Reporter,
}

impl Unifier<'_> {
    fn run(&mut self) -> Result<(), UnifyError> {
        while let Some(Constraint { head, tail }) = self.queue.pop_front() {
            if head == tail {
                continue;
            }
            tracing::trace!(%head, %tail, "unify");
            match (head, tail) {
                (
                    StaticType::Function {
                        arguments: head_args,
                        return_type: head_ret,
                    },
                    StaticType::Function {
                        arguments: tail_args,
                        return_type: tail_ret,
                    },
                ) => {
                    self.unify_arguments(&head_args, &tail_args, &head_ret, &tail_ret)?;
                    self.queue.push_back(Constraint::new(*head_ret, *tail_ret));
                }

                (
                    StaticType::Constructor {
                        name: head_name,
                        parameters: head_params,
                    },
                    StaticType::Constructor {
                        name: tail_name,
                        parameters: tail_params,
                    },
                ) => {
                    if head_name != tail_name {
                        return Err(UnifyError::NameMismatch {
                            expected: head_name,
                            found: tail_name,
                        });
                    }
                    if head_params.len() != tail_params.len() {
                        return Err(UnifyError::GenericArgumentsCountMismatch {
                            name: head_name,
                            expected: head_params.len(),
                            found: tail_params.len(),
                        });
                    }
                    self.queue.extend(
                        head_params
                            .into_iter()
                            .zip(tail_params)
                            .map(|(h, t)| Constraint::new(h, t)),
                    );
                }

                (head @ StaticType::Generic(_), tail) | (head, tail @ StaticType::Generic(_)) => {
                    self.reporter.warn(
                        Diagnostic::warning(ErrorCode::L3007)
                            .with_message(format!("cannot unify generic type: `{head}` with `{tail}`")),
                    );
                }

                (StaticType::Variable(var), other) | (other, StaticType::Variable(var)) => {
                    self.bind(var, other)?;
                }

                (head @ StaticType::Constructor { .. }, tail @ StaticType::Function { .. })
                | (head @ StaticType::Function { .. }, tail @ StaticType::Constructor { .. }) => {
                    return Err(UnifyError::KindMismatch { head, tail });
                }
            }
        }
        Ok(())
    }

    fn unify_arguments(
        &mut self,
        head_args: &[FunctionArgument],
        tail_args: &[FunctionArgument],
        head_ret: &StaticType,
        tail_ret: &StaticType,
    ) -> Result<(), UnifyError> {
        let head_labeled = head_args.iter().any(|arg| arg.label.is_some());
        let tail_labeled = tail_args.iter().any(|arg| arg.label.is_some());

        let head_unlabeled = !head_args.is_empty() && !head_labeled;
        let tail_unlabeled = !tail_args.is_empty() && !tail_labeled;

        if (head_labeled && tail_unlabeled) || (tail_labeled && head_unlabeled) {
            return Err(UnifyError::LabelMismatch {
                head: StaticType::function(head_args.to_vec(), head_ret.clone()),
                tail: StaticType::function(tail_args.to_vec(), tail_ret.clone()),
            });
        }

        if !head_labeled && !tail_labeled {
            if head_args.len() != tail_args.len() {
                return Err(UnifyError::ArgumentCountMismatch {
                    expected: head_args.len(),
                    found: tail_args.len(),
                });
            }
            self.queue.extend(
                head_args
                    .iter()
                    .zip(tail_args)
                    .map(|(h, t)| Constraint::new(h.ty.clone(), t.ty.clone())),
            );
            return Ok(());
        }

        // Both labeled: only shared labels are unified. Extra or missing
        // labels on either side are left alone.
        for head_arg in head_args {
            let Some(label) = &head_arg.label else {
                continue;
            };
            if let Some(tail_arg) = tail_args
                .iter()
                .find(|arg| arg.label.as_deref() == Some(label.as_str()))
            {
                self.queue
                    .push_back(Constraint::new(head_arg.ty.clone(), tail_arg.ty.clone()));
            }
        }
        Ok(())
    }

    fn bind(&mut self, var: TypeVar, ty: StaticType) -> Result<(), UnifyError> {
        if let Some(bound) = self.substitution.get(var) {
            let bound = bound.clone();
            self.queue.push_back(Constraint::new(bound, ty));
            return Ok(());
        }
        if self.substitution.occurs(var, &ty) {
            return Err(UnifyError::InfiniteType { var, ty });
        }
        self.substitution.insert(var, ty);
        for constraint in &mut self.queue {
            constraint.head = self.substitution.substitute(&constraint.head);
            constraint.tail = self.substitution.substitute(&constraint.tail);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests;
