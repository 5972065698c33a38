use crate::value::{Value, ValueKind, canonical_cmp, order_cmp, value_eq};
use std::{cmp::Ordering, collections::BTreeMap};

// ---- helpers -----------------------------------------------------------

fn v_txt(s: &str) -> Value {
    Value::Text(s.to_string())
}

fn v_list(items: Vec<Value>) -> Value {
    Value::List(items)
}

// ---- display -----------------------------------------------------------

#[test]
fn display_renders_scalars_plainly() {
    assert_eq!(Value::Null.to_string(), "None");
    assert_eq!(Value::Bool(true).to_string(), "True");
    assert_eq!(Value::Int(-3).to_string(), "-3");
    assert_eq!(Value::Float(2.0).to_string(), "2.0");
    assert_eq!(Value::Float(2.5).to_string(), "2.5");
    assert_eq!(v_txt("Hello Robots").to_string(), "Hello Robots");
}

#[test]
fn display_quotes_text_inside_containers() {
    let list = v_list(vec![Value::Int(1), v_txt("two")]);
    assert_eq!(list.to_string(), "[1, 'two']");

    let map = Value::Map(BTreeMap::from([
        ("b".to_string(), v_txt("x")),
        ("a".to_string(), Value::Int(1)),
    ]));
    assert_eq!(map.to_string(), "{'a': 1, 'b': 'x'}");
}

// ---- truthiness ----------------------------------------------------------

#[test]
fn structural_truthiness() {
    for falsy in [
        Value::Null,
        Value::Bool(false),
        Value::Int(0),
        Value::Float(0.0),
        v_txt(""),
        v_list(vec![]),
        Value::Map(BTreeMap::new()),
    ] {
        assert!(!falsy.is_truthy(), "{falsy:?}");
    }

    for truthy in [
        Value::Bool(true),
        Value::Int(-1),
        Value::Float(0.5),
        v_txt("false"),
        v_list(vec![Value::Null]),
    ] {
        assert!(truthy.is_truthy(), "{truthy:?}");
    }
}

// ---- ordering ------------------------------------------------------------

#[test]
fn canonical_order_sorts_numbers_together() {
    let mut items = vec![
        v_txt("b"),
        Value::Float(1.5),
        Value::Null,
        Value::Int(2),
        Value::Bool(true),
        Value::Int(1),
        v_txt("a"),
    ];
    items.sort_by(canonical_cmp);

    assert_eq!(
        items,
        vec![
            Value::Null,
            Value::Bool(true),
            Value::Int(1),
            Value::Float(1.5),
            Value::Int(2),
            v_txt("a"),
            v_txt("b"),
        ]
    );
}

#[test]
fn canonical_order_compares_lists_lexicographically() {
    let short = v_list(vec![Value::Int(1)]);
    let long = v_list(vec![Value::Int(1), Value::Int(0)]);

    assert_eq!(canonical_cmp(&short, &long), Ordering::Less);
    assert_eq!(canonical_cmp(&long, &short), Ordering::Greater);
}

#[test]
fn natural_order_is_partial() {
    assert_eq!(order_cmp(&Value::Int(1), &Value::Int(2)), Some(Ordering::Less));
    assert_eq!(order_cmp(&Value::Int(2), &Value::Float(1.5)), Some(Ordering::Greater));
    assert_eq!(order_cmp(&v_txt("a"), &v_txt("a")), Some(Ordering::Equal));

    assert_eq!(order_cmp(&Value::Int(1), &v_txt("1")), None);
    assert_eq!(order_cmp(&Value::Bool(true), &Value::Bool(false)), None);
    assert_eq!(order_cmp(&Value::Float(f64::NAN), &Value::Float(1.0)), None);
    assert_eq!(order_cmp(&v_list(vec![]), &v_list(vec![])), None);
}

#[test]
fn equality_widens_numbers_only() {
    assert!(value_eq(&Value::Int(5), &Value::Float(5.0)));
    assert!(!value_eq(&Value::Int(5), &Value::Float(5.5)));
    assert!(!value_eq(&Value::Int(5), &v_txt("5")));
    assert!(!value_eq(&Value::Float(f64::NAN), &Value::Float(f64::NAN)));
    assert!(!value_eq(&Value::Bool(true), &Value::Int(1)));

    let nested = Value::Map(BTreeMap::from([(
        "k".to_string(),
        v_list(vec![Value::Int(1), Value::Float(2.0)]),
    )]));
    let widened = Value::Map(BTreeMap::from([(
        "k".to_string(),
        v_list(vec![Value::Float(1.0), Value::Int(2)]),
    )]));
    assert!(value_eq(&nested, &widened));
}

// ---- conversions ---------------------------------------------------------

#[test]
fn json_conversion_keeps_integers_integral() {
    let json = serde_json::json!({
        "count": 3,
        "ratio": 0.5,
        "name": "robot",
        "tags": ["a", null, true],
    });

    let value = Value::from(json);
    let Value::Map(map) = &value else {
        panic!("expected a map, got {value:?}");
    };

    assert_eq!(map["count"], Value::Int(3));
    assert_eq!(map["ratio"], Value::Float(0.5));
    assert_eq!(map["name"], v_txt("robot"));
    assert_eq!(
        map["tags"],
        v_list(vec![v_txt("a"), Value::Null, Value::Bool(true)])
    );
}

#[test]
fn kinds_are_labelled() {
    assert_eq!(Value::Int(1).kind(), ValueKind::Int);
    assert_eq!(Value::from(Some("x")).kind(), ValueKind::Text);
    assert_eq!(Value::from(None::<i64>).kind(), ValueKind::Null);
    assert_eq!(ValueKind::Map.to_string(), "map");
    assert!(ValueKind::List.is_container());
    assert!(!ValueKind::Text.is_container());
}
