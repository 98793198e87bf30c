//! Datatype code semantics, table-driven.

use edifact::spec::ComponentSpec;
use rstest::rstest;

#[rstest]
// a<n>: exactly n letters
#[case("a3", "abc", true)]
#[case("a3", "ABC", true)]
#[case("a3", "ab", false)]
#[case("a3", "abcd", false)]
#[case("a3", "ab1", false)]
#[case("a3", "", false)]
// an..<n>: up to n characters of anything, empty included
#[case("an..4", "", true)]
#[case("an..4", "a1?!", true)]
#[case("an..4", "abcde", false)]
// n<n>: exactly n digits
#[case("n4", "2024", true)]
#[case("n4", "202", false)]
#[case("n4", "20241", false)]
#[case("n4", "20a4", false)]
// n..<n>: one to n digits, empty rejected
#[case("n..6", "1", true)]
#[case("n..6", "123456", true)]
#[case("n..6", "", false)]
#[case("n..6", "1234567", false)]
#[case("n..6", "12a", false)]
// anything else is a literal
#[case("UNOC", "UNOC", true)]
#[case("UNOC", "UNOB", false)]
#[case("UNOC", "", false)]
fn component_code_validation(#[case] code: &str, #[case] text: &str, #[case] valid: bool) {
    let spec = ComponentSpec::parse(code).unwrap();
    assert_eq!(spec.is_valid(text), valid, "{:?} against {:?}", text, code);
}

#[rstest]
#[case("1", true)]
#[case("42", true)]
#[case("", true)]
#[case("999", false)]
fn optional_wrapper_accepts_empty(#[case] text: &str, #[case] valid: bool) {
    let spec = ComponentSpec::Optional(Box::new(ComponentSpec::VariableNumeric(2)));
    assert_eq!(spec.is_valid(text), valid);
}

#[rstest]
#[case("UNOA", true)]
#[case("UNOC", true)]
#[case("3", true)]
#[case("UNOX", false)]
fn alternation_takes_first_match(#[case] text: &str, #[case] valid: bool) {
    let spec = ComponentSpec::AnyOf(vec![
        ComponentSpec::Literal("UNOA".to_string()),
        ComponentSpec::Literal("UNOC".to_string()),
        ComponentSpec::FixedNumeric(1),
    ]);
    assert_eq!(spec.is_valid(text), valid);
}

#[test]
fn multibyte_text_is_counted_in_characters() {
    let spec = ComponentSpec::VariableAlphanumeric(3);
    assert!(spec.is_valid("äöü"));
    assert!(!spec.is_valid("äöüß"));
}
