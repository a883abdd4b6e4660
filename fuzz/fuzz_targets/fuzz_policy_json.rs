#![no_main]
use abac_rs::abac::{PolicyEngine, PolicySet, Request, Resource};
use libfuzzer_sys::fuzz_target;

// Malformed policy documents are rejected or evaluated, never a crash
fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(policies) = PolicySet::from_json(text) else {
        return;
    };

    let engine = PolicyEngine::new_default();
    let request = Request::new("read", Resource::new("doc", "fuzz"));
    let _ = engine.evaluate(&policies, &request);
});
