// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::test_support::strategies::*;
use proptest::prelude::*;

#[test]
fn router_basic_resolves_literal_and_wildcard_templates() {
    let mut router: Router<&'static str> = Router::new();
    router.register("foo", "H1").unwrap();
    router.register("foo/bar", "H2").unwrap();
    router.register("foo/{x}", "H3").unwrap();
    router.register("foo/{x}/{y}", "H4").unwrap();

    let (h, params) = router.resolve("foo").unwrap();
    assert_eq!(*h, "H1");
    assert!(params.is_empty());

    let (h, params) = router.resolve("foo/bar").unwrap();
    assert_eq!(*h, "H2");
    assert!(params.is_empty());

    let (h, params) = router.resolve("foo/42").unwrap();
    assert_eq!(*h, "H3");
    assert_eq!(params, vec![("x".to_string(), "42")]);

    let (h, params) = router.resolve("foo/42/9").unwrap();
    assert_eq!(*h, "H4");
    assert_eq!(params, vec![("x".to_string(), "42"), ("y".to_string(), "9")]);
}

#[test]
fn register_rejects_leading_variable_segment() {
    let mut router: Router<&'static str> = Router::new();
    let err = router.register("{x}/bar", "H1").unwrap_err();
    assert_eq!(err, RouterError::InvalidTemplate("{x}/bar".to_string()));
}

#[test]
fn register_rejects_duplicate_template() {
    let mut router: Router<&'static str> = Router::new();
    router.register("foo", "H1").unwrap();
    let err = router.register("foo", "H2").unwrap_err();
    assert_eq!(err, RouterError::DuplicateHandler("foo".to_string()));
}

#[test]
fn literal_wins_over_wildcard_at_every_level() {
    let mut router: Router<&'static str> = Router::new();
    router.register("foo/{a}/baz", "wildcard").unwrap();
    router.register("foo/bar/baz", "literal").unwrap();

    assert_eq!(router.resolve("foo/bar/baz").unwrap().0, &"literal");
    let (h, params) = router.resolve("foo/x/baz").unwrap();
    assert_eq!(*h, "wildcard");
    assert_eq!(params, vec![("a".to_string(), "x")]);
}

#[test]
fn empty_uri_does_not_resolve() {
    let router: Router<&'static str> = Router::new();
    assert!(router.resolve("").is_none());
}

#[test]
fn trailing_slash_produces_an_unmatched_empty_segment() {
    let mut router: Router<&'static str> = Router::new();
    router.register("foo", "H1").unwrap();
    assert!(router.resolve("foo/").is_none());
}

#[test]
fn adjacent_wildcards_share_the_same_slot_at_successive_depths() {
    let mut router: Router<&'static str> = Router::new();
    router.register("foo/{a}/{b}", "H1").unwrap();
    let (_, params) = router.resolve("foo/1/2").unwrap();
    assert_eq!(params, vec![("a".to_string(), "1"), ("b".to_string(), "2")]);
}

#[test]
fn unregistered_uri_resolves_to_none() {
    let mut router: Router<&'static str> = Router::new();
    router.register("foo/bar", "H1").unwrap();
    assert!(router.resolve("foo/baz").is_none());
    assert!(router.resolve("quux").is_none());
}

#[test]
fn register_idempotent_resolution_after_additional_registrations() {
    let mut router: Router<&'static str> = Router::new();
    router.register("foo", "H1").unwrap();
    let before = *router.resolve("foo").unwrap().0;
    router.register("bar", "H2").unwrap();
    let after = *router.resolve("foo").unwrap().0;
    assert_eq!(before, after);
}

fn concretize(template: &str) -> String {
    template
        .split('/')
        .map(|segment| if segment.starts_with('{') { "42" } else { segment })
        .collect::<Vec<_>>()
        .join("/")
}

proptest! {
    #[test]
    fn resolve_is_deterministic(template in arb_template()) {
        let mut router: Router<u32> = Router::new();
        if router.register(&template, 1).is_ok() {
            let uri = concretize(&template);
            let first = router.resolve(&uri).map(|(h, params)| (*h, params));
            let second = router.resolve(&uri).map(|(h, params)| (*h, params));
            prop_assert_eq!(first, second);
        }
    }

    #[test]
    fn registering_more_templates_leaves_prior_resolutions_intact(
        template in arb_template(),
        extra in arb_template(),
    ) {
        let mut router: Router<u32> = Router::new();
        if router.register(&template, 1).is_err() {
            return Ok(());
        }
        let uri = concretize(&template);
        let before = router.resolve(&uri).map(|(h, params)| (*h, params));
        let _ = router.register(&extra, 2);
        let after = router.resolve(&uri).map(|(h, params)| (*h, params));
        prop_assert_eq!(before, after);
    }
}
