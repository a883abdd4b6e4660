//! Access-control security tests - deny precedence, fail-closed and bypass attempts

use abac_rs::abac::{
    Attribute, AttributeKind, Condition, MatchStrategy, Operator, Policy, PolicyEngine, PolicySet,
    Request, Resource, ResourceMatcher, Statement,
};
use abac_rs::{AbacError, Decision, DenyReason};

fn engine() -> PolicyEngine {
    PolicyEngine::new_default()
}

#[test]
fn test_deny_anywhere_in_tree_wins() {
    // Deny in the last statement of the last policy still overrides earlier allows
    let policies = PolicySet::new()
        .with(
            Policy::new(1, "allow-all")
                .with_statement(Statement::allow(["read"], ResourceMatcher::new("doc", ["*"]))),
        )
        .with(
            Policy::new(2, "more-allows")
                .with_statement(Statement::allow(["read"], ResourceMatcher::new("doc", ["a*"])))
                .with_statement(Statement::deny(["read"], ResourceMatcher::new("doc", ["abc"]))),
        );

    let request = Request::new("read", Resource::new("doc", "abc"));
    assert_eq!(
        engine().evaluate(&policies, &request).unwrap(),
        Decision::Denied(DenyReason::ExplicitDeny)
    );

    let request = Request::new("read", Resource::new("doc", "abd"));
    assert_eq!(engine().evaluate(&policies, &request).unwrap(), Decision::Allowed);
}

#[test]
fn test_fail_closed_without_matching_statement() {
    let policies = PolicySet::new().with(
        Policy::new(1, "docs")
            .with_statement(Statement::allow(["read"], ResourceMatcher::new("doc", ["*"]))),
    );

    for request in [
        Request::new("write", Resource::new("doc", "x")),
        Request::new("read", Resource::new("file", "x")),
        Request::new("", Resource::new("doc", "x")),
    ] {
        assert_eq!(
            engine().evaluate(&policies, &request).unwrap(),
            Decision::Denied(DenyReason::NoMatchingStatement)
        );
    }
}

#[test]
fn test_resource_type_is_not_pattern_matched() {
    let policies = PolicySet::new().with(
        Policy::new(1, "docs")
            .with_statement(Statement::allow(["read"], ResourceMatcher::new("doc*", ["*"]))),
    );

    let request = Request::new("read", Resource::new("document", "x"));
    assert!(!engine().evaluate(&policies, &request).unwrap().is_allowed());
}

#[test]
fn test_action_wildcards_are_literal() {
    let policies = PolicySet::new().with(
        Policy::new(1, "docs")
            .with_statement(Statement::allow(["*"], ResourceMatcher::new("doc", ["*"]))),
    );

    let request = Request::new("delete", Resource::new("doc", "x"));
    assert!(!engine().evaluate(&policies, &request).unwrap().is_allowed());

    let request = Request::new("*", Resource::new("doc", "x"));
    assert!(engine().evaluate(&policies, &request).unwrap().is_allowed());
}

#[test]
fn test_regex_resource_patterns_are_unanchored() {
    // An unanchored deny pattern catches the name anywhere
    let policies = PolicySet::new().with(
        Policy::new(1, "docs")
            .with_statement(Statement::allow(["read"], ResourceMatcher::new("doc", ["*"])))
            .with_statement(
                Statement::deny(["read"], ResourceMatcher::new("doc", ["secret"]))
                    .with_strategy(MatchStrategy::Regex),
            ),
    );

    let request = Request::new("read", Resource::new("doc", "old/secret/keys"));
    assert_eq!(
        engine().evaluate(&policies, &request).unwrap(),
        Decision::Denied(DenyReason::ExplicitDeny)
    );
}

#[test]
fn test_malformed_regex_never_matches() {
    let policies = PolicySet::new().with(
        Policy::new(1, "docs").with_statement(
            Statement::allow(["read"], ResourceMatcher::new("doc", ["(("]))
                .with_strategy(MatchStrategy::Regex),
        ),
    );

    let request = Request::new("read", Resource::new("doc", "(("));
    assert_eq!(
        engine().evaluate(&policies, &request).unwrap(),
        Decision::Denied(DenyReason::NoMatchingStatement)
    );
}

#[test]
fn test_attribute_kind_spoofing() {
    // A subject cannot satisfy a resource-attribute condition by naming a subject attribute the same
    let policies = PolicySet::new().with(
        Policy::new(1, "owners").with_statement(
            Statement::allow(["write"], ResourceMatcher::new("doc", ["*"])).with_condition(
                Condition::new(Operator::Eq, AttributeKind::Resource, "owner", "alice"),
            ),
        ),
    );

    let request = Request::new("write", Resource::new("doc", "x"))
        .with_attribute(Attribute::subject("owner", "alice"));
    assert!(matches!(
        engine().evaluate(&policies, &request),
        Err(AbacError::AttributeMissing {
            kind: AttributeKind::Resource,
            ..
        })
    ));

    let request = Request::new("write", Resource::new("doc", "x"))
        .with_attribute(Attribute::resource("owner", "alice"));
    assert!(engine().evaluate(&policies, &request).unwrap().is_allowed());
}

#[test]
fn test_type_confusion_is_an_error_not_an_allow() {
    let policies = PolicySet::new().with(
        Policy::new(1, "levels").with_statement(
            Statement::allow(["read"], ResourceMatcher::new("doc", ["*"])).with_condition(
                Condition::new(Operator::Gte, AttributeKind::Subject, "level", 5_i64),
            ),
        ),
    );

    // "9" > "5" lexicographically, but a string attribute never meets a number literal
    let request = Request::new("read", Resource::new("doc", "x"))
        .with_attribute(Attribute::subject("level", "9"));
    assert!(matches!(
        engine().evaluate(&policies, &request),
        Err(AbacError::ValueTypeMismatch { .. })
    ));

    let request = Request::new("read", Resource::new("doc", "x"))
        .with_attribute(Attribute::subject("level", 9_i64));
    assert!(engine().evaluate(&policies, &request).unwrap().is_allowed());
}

#[test]
fn test_duplicate_attribute_last_wins() {
    let policies = PolicySet::new().with(
        Policy::new(1, "admins").with_statement(
            Statement::allow(["delete"], ResourceMatcher::new("doc", ["*"])).with_condition(
                Condition::new(Operator::Eq, AttributeKind::Subject, "role", "admin"),
            ),
        ),
    );

    let request = Request::new("delete", Resource::new("doc", "x")).with_attributes([
        Attribute::subject("role", "admin"),
        Attribute::subject("role", "guest"),
    ]);
    assert!(!engine().evaluate(&policies, &request).unwrap().is_allowed());

    let request = Request::new("delete", Resource::new("doc", "x")).with_attributes([
        Attribute::subject("role", "guest"),
        Attribute::subject("role", "admin"),
    ]);
    assert!(engine().evaluate(&policies, &request).unwrap().is_allowed());
}
