use crate::{
    engine::Engine,
    operator::{CanonicalOp, taxonomy},
    value::Value,
};
use proptest::prelude::*;

fn arb_scalar_value() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::Int),
        (-1.0e6..1.0e6).prop_map(Value::Float),
        "[a-zA-Z0-9 ]{0,8}".prop_map(Value::Text),
    ]
}

fn arb_value() -> impl Strategy<Value = Value> {
    prop_oneof![
        3 => arb_scalar_value(),
        1 => prop::collection::vec(arb_scalar_value(), 0..4).prop_map(Value::List),
    ]
}

fn arb_comparison_op() -> impl Strategy<Value = CanonicalOp> {
    prop::sample::select(
        CanonicalOp::ALL
            .into_iter()
            .filter(|op| !op.evaluates())
            .collect::<Vec<_>>(),
    )
}

// A list plus a permutation of it.
fn arb_permuted_list() -> impl Strategy<Value = (Vec<Value>, Vec<Value>)> {
    prop::collection::vec(arb_scalar_value(), 0..8)
        .prop_flat_map(|items| (Just(items.clone()), Just(items).prop_shuffle()))
}

proptest! {
    #[test]
    fn aliases_are_indistinguishable(
        op in arb_comparison_op(),
        actual in arb_value(),
        expected in arb_value(),
    ) {
        let engine = Engine::new();
        let outcomes: Vec<_> = taxonomy()
            .tokens_for(op)
            .map(|token| {
                engine
                    .verify(actual.clone(), Some(token), expected.clone(), "msg")
                    .map_err(|err| err.to_string())
            })
            .collect();

        for outcome in &outcomes {
            prop_assert_eq!(outcome, &outcomes[0]);
        }
    }

    #[test]
    fn eq_and_ne_are_exclusive(actual in arb_value(), expected in arb_value()) {
        let engine = Engine::new();
        let eq = engine.verify(actual.clone(), Some("=="), expected.clone(), "");
        let ne = engine.verify(actual, Some("!="), expected, "");

        prop_assert!(eq.is_ok() != ne.is_ok());
    }

    #[test]
    fn missing_operator_is_identity(value in arb_value(), expected in arb_value()) {
        let result = Engine::new().verify(value.clone(), None, expected, "").unwrap();
        prop_assert_eq!(result, value);
    }

    #[test]
    fn sequence_equality_ignores_order((items, permuted) in arb_permuted_list()) {
        let engine = Engine::new();
        let left = engine
            .verify_sequence(Value::List(items.clone()), Some("=="), Value::List(permuted.clone()), "")
            .unwrap();
        let right = engine
            .verify_sequence(Value::List(permuted), Some("=="), Value::List(items), "")
            .unwrap();

        prop_assert_eq!(left, right);
    }

    #[test]
    fn integer_ordering_is_trichotomous(a in any::<i64>(), b in any::<i64>()) {
        let engine = Engine::new();
        let holds = |token| {
            engine
                .verify(Value::Int(a), Some(token), Value::Int(b), "")
                .is_ok()
        };

        let held = [holds("<"), holds("=="), holds(">")];
        prop_assert_eq!(held.iter().filter(|h| **h).count(), 1);
        prop_assert_eq!(holds("<="), holds("<") || holds("=="));
        prop_assert_eq!(holds(">="), holds(">") || holds("=="));
    }

    #[test]
    fn int_and_float_equality_follows_ordering(a in any::<i32>(), b in -1.0e6f64..1.0e6) {
        let engine = Engine::new();
        let holds = |token, actual: Value, expected: Value| {
            engine.verify(actual, Some(token), expected, "").is_ok()
        };

        let eq = holds("==", Value::Int(i64::from(a)), Value::Float(b));
        let le = holds("<=", Value::Int(i64::from(a)), Value::Float(b));
        let ge = holds(">=", Value::Int(i64::from(a)), Value::Float(b));
        prop_assert_eq!(eq, le && ge);
        prop_assert!(holds("==", Value::Float(f64::from(a)), Value::Int(i64::from(a))));
    }

    #[test]
    fn int_str_accepts_integer_text(a in any::<i64>(), b in any::<i64>()) {
        let engine = Engine::new();
        let typed = engine.verify(Value::Int(a), Some("<"), Value::Int(b), "").is_ok();
        let textual = engine
            .verify_int_str(Value::Int(a), Some("<"), Value::Text(b.to_string()), "")
            .is_ok();

        prop_assert_eq!(typed, textual);
    }
}
