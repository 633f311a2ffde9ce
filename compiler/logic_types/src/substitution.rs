//! Type variable bindings learned by the unifier, plus fresh-name allocation
//! and use-site instantiation.

use rustc_hash::FxHashMap;

use crate::traverse::{TypeFolder, TypeVisitor};
use crate::{StaticType, TypeVar};

/// Allocates type variable and generic names for one compile.
#[derive(Clone, Debug, Default)]
pub struct TypeNameGenerator {
    next: u32,
}

impl TypeNameGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fresh(&mut self) -> TypeVar {
        let var = TypeVar::new(self.next);
        self.next += 1;
        var
    }

    pub fn fresh_variable(&mut self) -> StaticType {
        StaticType::Variable(self.fresh())
    }

    /// Number of names handed out so far.
    pub fn issued(&self) -> u32 {
        self.next
    }
}

/// Replace every `Generic` in `ty` with a fresh `Variable`.
///
/// Each distinct generic maps to one variable, so `(T) -> T` instantiates to
/// `(?a) -> ?a`. Repeated calls produce independent variables.
pub fn instantiate(ty: &StaticType, generator: &mut TypeNameGenerator) -> StaticType {
    struct Instantiator<'a> {
        generator: &'a mut TypeNameGenerator,
        fresh: FxHashMap<TypeVar, TypeVar>,
    }

    impl TypeFolder for Instantiator<'_> {
        fn fold_generic(&mut self, var: TypeVar) -> StaticType {
            let generator = &mut *self.generator;
            StaticType::Variable(*self.fresh.entry(var).or_insert_with(|| generator.fresh()))
        }
    }

    if !ty.has_generics() {
        return ty.clone();
    }
    Instantiator {
        generator,
        fresh: FxHashMap::default(),
    }
    .fold(ty)
}

/// Map from type variables to the types they were unified with.
///
/// A binding may mention variables that were bound later, so one
/// [`substitute`](Self::substitute) is not always final; use
/// [`resolve`](Self::resolve) for the fixpoint.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Substitution {
    bindings: FxHashMap<TypeVar, StaticType>,
}

impl Substitution {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, var: TypeVar) -> Option<&StaticType> {
        self.bindings.get(&var)
    }

    pub fn insert(&mut self, var: TypeVar, ty: StaticType) -> Option<StaticType> {
        self.bindings.insert(var, ty)
    }

    pub fn contains(&self, var: TypeVar) -> bool {
        self.bindings.contains_key(&var)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (TypeVar, &StaticType)> {
        self.bindings.iter().map(|(var, ty)| (*var, ty))
    }

    /// Replace each bound variable in `ty` by its binding, one step deep.
    pub fn substitute(&self, ty: &StaticType) -> StaticType {
        struct OneStep<'a> {
            bindings: &'a FxHashMap<TypeVar, StaticType>,
        }

        impl TypeFolder for OneStep<'_> {
            fn fold_variable(&mut self, var: TypeVar) -> StaticType {
                self.bindings
                    .get(&var)
                    .cloned()
                    .unwrap_or(StaticType::Variable(var))
            }
        }

        if self.bindings.is_empty() {
            return ty.clone();
        }
        OneStep {
            bindings: &self.bindings,
        }
        .fold(ty)
    }

    /// Apply [`substitute`](Self::substitute) until the type stops changing.
    ///
    /// Terminates because the unifier rejects bindings that fail the occurs
    /// check.
    pub fn resolve(&self, ty: &StaticType) -> StaticType {
        let mut current = ty.clone();
        loop {
            let next = self.substitute(&current);
            if next == current {
                return current;
            }
            current = next;
        }
    }

    /// True if `var` appears in `ty`, following bindings.
    pub fn occurs(&self, var: TypeVar, ty: &StaticType) -> bool {
        struct OccursChecker<'a> {
            target: TypeVar,
            bindings: &'a FxHashMap<TypeVar, StaticType>,
            found: bool,
        }

        impl TypeVisitor for OccursChecker<'_> {
            fn visit_variable(&mut self, var: TypeVar) {
                if self.found {
                    return;
                }
                if var == self.target {
                    self.found = true;
                } else if let Some(bound) = self.bindings.get(&var) {
                    self.visit(bound);
                }
            }
        }

        let mut checker = OccursChecker {
            target: var,
            bindings: &self.bindings,
            found: false,
        };
        checker.visit(ty);
        checker.found
    }
}

#[cfg(test)]
mod tests;
