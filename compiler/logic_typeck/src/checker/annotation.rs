//! Type annotation → `StaticType`.

use logic_ir::{NodeId, NodeKind};
use logic_stack::ensure_sufficient_stack;
use logic_types::{FunctionArgument, StaticType};

use super::TypeChecker;

impl TypeChecker<'_> {
    /// Translate an annotation node.
    ///
    /// A type identifier naming a generic parameter in scope becomes that
    /// parameter's `Generic`. Other resolved names use their qualified name,
    /// so `Point` inside `namespace UI` and `UI.Point` agree. Unresolved names
    /// keep their spelling. Missing annotations (`Placeholder`) get a fresh
    /// variable.
    pub(crate) fn translate_annotation(&mut self, annotation: NodeId) -> StaticType {
        let arena = self.arena;
        ensure_sufficient_stack(|| {
            let ty = match arena.kind(annotation) {
                NodeKind::TypeIdentifier {
                    name,
                    generic_arguments,
                } => {
                    let resolved = self.scope.type_identifier_to_pattern.get(&annotation).copied();
                    if let Some(var) = resolved.and_then(|pattern| self.generics.get(&pattern)) {
                        StaticType::Generic(*var)
                    } else {
                        let qualified = resolved
                            .and_then(|pattern| self.namespace.type_name(pattern))
                            .unwrap_or(name.as_str())
                            .to_owned();
                        let parameters = arena
                            .list(*generic_arguments)
                            .iter()
                            .map(|argument| self.translate_annotation(*argument))
                            .collect();
                        StaticType::constructor(qualified, parameters)
                    }
                }
                NodeKind::FunctionType {
                    arguments,
                    return_type,
                } => {
                    let arguments: Vec<FunctionArgument> = arena
                        .list(*arguments)
                        .iter()
                        .map(|argument| FunctionArgument::positional(self.translate_annotation(*argument)))
                        .collect();
                    StaticType::function(arguments, self.translate_annotation(*return_type))
                }
                _ => self.fresh(),
            };
            self.set_node(annotation, ty.clone());
            ty
        })
    }

    /// Translate an optional annotation, defaulting to a fresh variable.
    pub(crate) fn translate_optional(&mut self, annotation: Option<NodeId>) -> StaticType {
        match annotation {
            Some(annotation) => self.translate_annotation(annotation),
            None => self.fresh(),
        }
    }
}
