#![no_main]
use abac_rs::abac::{compare, glob_match, regex_match, AttributeValue};
use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct Input {
    pattern: String,
    subject: String,
    operator: String,
    value_type: String,
}

// Matching must never panic, whatever the pattern
fuzz_target!(|input: Input| {
    let matched = glob_match(&input.pattern, &input.subject);
    if !input.pattern.contains('*') {
        assert_eq!(matched, input.pattern == input.subject);
    }
    assert!(glob_match("*", &input.subject));

    let _ = regex_match(&input.pattern, &input.subject);

    let origin = AttributeValue::String(input.subject);
    let pattern = AttributeValue::String(input.pattern);
    let _ = compare(&input.value_type, &input.operator, &origin, &pattern);
});
