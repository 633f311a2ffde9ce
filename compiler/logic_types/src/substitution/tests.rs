use pretty_assertions::assert_eq;
use proptest::prelude::*;

use super::*;
use crate::FunctionArgument;

fn var(id: u32) -> StaticType {
    StaticType::Variable(TypeVar::new(id))
}

#[test]
fn substitute_is_single_step() {
    let mut sub = Substitution::new();
    sub.insert(TypeVar::new(0), StaticType::array(var(1)));
    sub.insert(TypeVar::new(1), StaticType::number());

    assert_eq!(sub.substitute(&var(0)), StaticType::array(var(1)));
    assert_eq!(sub.resolve(&var(0)), StaticType::array(StaticType::number()));
}

#[test]
fn unbound_variables_survive() {
    let mut sub = Substitution::new();
    sub.insert(TypeVar::new(0), StaticType::string());
    assert_eq!(sub.resolve(&var(7)), var(7));
}

#[test]
fn occurs_follows_bindings() {
    let mut sub = Substitution::new();
    sub.insert(TypeVar::new(1), StaticType::array(var(0)));
    assert!(sub.occurs(TypeVar::new(0), &var(1)));
    assert!(!sub.occurs(TypeVar::new(2), &var(1)));
}

#[test]
fn instantiate_shares_one_variable_per_generic() {
    let mut generator = TypeNameGenerator::new();
    let t = generator.fresh();
    let signature = StaticType::function(
        vec![FunctionArgument::labeled("value", StaticType::Generic(t))],
        StaticType::Generic(t),
    );

    let StaticType::Function {
        arguments,
        return_type,
    } = instantiate(&signature, &mut generator)
    else {
        panic!("expected function type");
    };
    assert!(matches!(arguments[0].ty, StaticType::Variable(_)));
    assert_eq!(arguments[0].ty, *return_type);
}

#[test]
fn instantiate_leaves_monomorphic_types_alone() {
    let mut generator = TypeNameGenerator::new();
    let ty = StaticType::array(StaticType::number());
    assert_eq!(instantiate(&ty, &mut generator), ty);
    assert_eq!(generator.issued(), 0);
}

proptest! {
    /// A chain `?0 -> ?1 -> ... -> Number` always resolves to `Number`,
    /// whatever order the bindings were inserted in.
    #[test]
    fn resolve_reaches_fixpoint_through_chains(len in 1u32..40, rotate in 0usize..40) {
        let mut links: Vec<(TypeVar, StaticType)> = (0..len)
            .map(|i| {
                let target = if i + 1 == len { StaticType::number() } else { var(i + 1) };
                (TypeVar::new(i), StaticType::array(target))
            })
            .collect();
        let split = rotate % links.len();
        links.rotate_left(split);

        let mut sub = Substitution::new();
        for (v, ty) in links {
            sub.insert(v, ty);
        }

        let resolved = sub.resolve(&var(0));
        prop_assert!(free_vars_of(&resolved).is_empty());
        prop_assert_eq!(sub.resolve(&resolved), resolved);
    }

    /// Two instantiations of the same signature never share variables.
    #[test]
    fn instantiations_are_fresh(generics in 1usize..6) {
        let mut generator = TypeNameGenerator::new();
        let params: Vec<TypeVar> = (0..generics).map(|_| generator.fresh()).collect();
        let signature = StaticType::function(
            params.iter().map(|p| FunctionArgument::positional(StaticType::Generic(*p))).collect(),
            StaticType::Generic(params[0]),
        );

        let first = free_vars_of(&instantiate(&signature, &mut generator));
        let second = free_vars_of(&instantiate(&signature, &mut generator));
        prop_assert_eq!(first.len(), generics);
        prop_assert!(first.iter().all(|v| !second.contains(v)));
    }
}

fn free_vars_of(ty: &StaticType) -> Vec<TypeVar> {
    crate::free_variables(ty)
}
