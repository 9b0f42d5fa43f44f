use hbnb_model::AttrValue;
use proptest::prelude::*;
use serde_json::json;

#[test]
fn digits_become_integer() {
    assert_eq!(AttrValue::coerce("20"), AttrValue::Integer(20));
    assert_eq!(AttrValue::coerce("007"), AttrValue::Integer(7));
}

#[test]
fn dotted_digits_become_float() {
    assert_eq!(AttrValue::coerce("1.68"), AttrValue::Float(1.68));
    assert_eq!(AttrValue::coerce("3."), AttrValue::Float(3.0));
    assert_eq!(AttrValue::coerce(".5"), AttrValue::Float(0.5));
}

#[test]
fn anything_else_is_text() {
    assert_eq!(AttrValue::coerce("Monty"), AttrValue::Text("Monty".into()));
    assert_eq!(AttrValue::coerce(""), AttrValue::Text(String::new()));
    assert_eq!(AttrValue::coerce("."), AttrValue::Text(".".into()));
    assert_eq!(AttrValue::coerce("1.2.3"), AttrValue::Text("1.2.3".into()));
}

#[test]
fn sign_and_exponent_are_not_recognized() {
    assert_eq!(AttrValue::coerce("-3"), AttrValue::Text("-3".into()));
    assert_eq!(AttrValue::coerce("+3"), AttrValue::Text("+3".into()));
    assert_eq!(AttrValue::coerce("1e5"), AttrValue::Text("1e5".into()));
}

#[test]
fn oversized_integer_stays_text() {
    let raw = "99999999999999999999999";
    assert_eq!(AttrValue::coerce(raw), AttrValue::Text(raw.into()));
}

#[test]
fn into_json_types() {
    assert_eq!(AttrValue::coerce("20").into_json(), json!(20));
    assert_eq!(AttrValue::coerce("1.68").into_json(), json!(1.68));
    assert_eq!(AttrValue::coerce("Monty").into_json(), json!("Monty"));
}

#[test]
fn display_forms() {
    assert_eq!(AttrValue::Integer(4).to_string(), "4");
    assert_eq!(AttrValue::Float(2.0).to_string(), "2.0");
    assert_eq!(AttrValue::Text("hi".into()).to_string(), "hi");
}

proptest! {
    #[test]
    fn any_u32_coerces_to_integer(n in any::<u32>()) {
        prop_assert_eq!(AttrValue::coerce(&n.to_string()), AttrValue::Integer(i64::from(n)));
    }

    #[test]
    fn text_with_letters_stays_text(s in "[a-zA-Z][a-zA-Z0-9 ]{0,16}") {
        prop_assert_eq!(AttrValue::coerce(&s), AttrValue::Text(s.clone()));
    }
}
