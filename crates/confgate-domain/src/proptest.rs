//! Property-based tests for the aggregator.
//!
//! These tests use proptest to verify invariants around:
//! - clause count reconciliation
//! - exception suppression
//! - routing of failure and warning emissions
//! - determinism across repeated runs

use crate::engine::Engine;
use crate::evaluator::EvalContext;
use crate::policy::PolicySet;
use crate::rules::{RuleKind, classify, exception_query, rule_query};
use crate::test_support::{ScriptedEvaluator, exception_match};
use proptest::prelude::*;
use serde_json::{Value as JsonValue, json};
use std::collections::BTreeMap;

// ============================================================================
// Strategies
// ============================================================================

/// Scripted behaviour of one rule name.
#[derive(Clone, Debug)]
struct RuleScript {
    count: usize,
    messages: usize,
    passes: usize,
    excepted: bool,
}

fn arb_rule_name() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("deny".to_string()),
        Just("warn".to_string()),
        Just("violation".to_string()),
        prop::string::string_regex("(deny|violation|warn)_[a-z]{1,8}").unwrap(),
    ]
}

fn arb_rule_script() -> impl Strategy<Value = RuleScript> {
    (1usize..6)
        .prop_flat_map(|count| (Just(count), 0..=count))
        .prop_flat_map(|(count, messages)| {
            (
                Just(count),
                Just(messages),
                0..=count - messages,
                any::<bool>(),
            )
        })
        .prop_map(|(count, messages, passes, excepted)| RuleScript {
            count,
            messages,
            passes,
            excepted,
        })
}

fn arb_rules() -> impl Strategy<Value = BTreeMap<String, RuleScript>> {
    prop::collection::btree_map(arb_rule_name(), arb_rule_script(), 1..6)
}

// ============================================================================
// Helpers
// ============================================================================

fn scripted(rules: &BTreeMap<String, RuleScript>) -> ScriptedEvaluator {
    let mut evaluator = ScriptedEvaluator::new();
    for (rule, script) in rules {
        let mut expressions: Vec<JsonValue> = vec![json!([]); script.passes];
        if script.messages > 0 {
            let messages: Vec<String> = (0..script.messages)
                .map(|i| format!("{rule} message {i}"))
                .collect();
            expressions.push(json!(messages));
        }
        evaluator = evaluator.respond(&rule_query("main", rule), expressions);
        if script.excepted {
            evaluator = evaluator.respond(&exception_query("main", rule), vec![exception_match()]);
        }
    }
    evaluator
}

fn counts(rules: &BTreeMap<String, RuleScript>) -> BTreeMap<String, usize> {
    rules.iter().map(|(r, s)| (r.clone(), s.count)).collect()
}

/// Prefixed rules share one exception lookup, so a scripted exception may
/// cover more than the rule it was declared for.
fn effectively_excepted(rules: &BTreeMap<String, RuleScript>, rule: &str) -> bool {
    let query = exception_query("main", rule);
    rules
        .iter()
        .any(|(other, script)| script.excepted && exception_query("main", other) == query)
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn every_declared_clause_is_accounted_for(rules in arb_rules()) {
        let evaluator = scripted(&rules);
        let policy = PolicySet::default();
        let ctx = EvalContext::default();

        let check = Engine::new(&evaluator, &policy, &ctx)
            .aggregate("a.yaml", &json!({}), "main", &counts(&rules))
            .expect("aggregate");

        let expected: usize = rules
            .iter()
            .map(|(rule, script)| {
                let own = if effectively_excepted(&rules, rule) {
                    script.passes + 1
                } else {
                    script.passes + script.messages
                };
                own.max(script.count)
            })
            .sum();
        prop_assert_eq!(check.total(), expected);
        prop_assert!(check.total() >= rules.values().map(|s| s.count).sum::<usize>());
    }

    #[test]
    fn excepted_rules_never_produce_findings(rules in arb_rules()) {
        let evaluator = scripted(&rules);
        let policy = PolicySet::default();
        let ctx = EvalContext::default();

        let check = Engine::new(&evaluator, &policy, &ctx)
            .aggregate("a.yaml", &json!({}), "main", &counts(&rules))
            .expect("aggregate");

        for (rule, _) in rules.iter().filter(|(r, _)| effectively_excepted(&rules, r)) {
            let prefix = format!("{rule} message ");
            prop_assert!(!check.failures.iter().any(|f| f.message.starts_with(&prefix)));
            prop_assert!(!check.warnings.iter().any(|w| w.message.starts_with(&prefix)));
        }
    }

    #[test]
    fn unexcepted_emissions_follow_rule_kind(rules in arb_rules()) {
        let evaluator = scripted(&rules);
        let policy = PolicySet::default();
        let ctx = EvalContext::default();

        let check = Engine::new(&evaluator, &policy, &ctx)
            .aggregate("a.yaml", &json!({}), "main", &counts(&rules))
            .expect("aggregate");

        for (rule, script) in &rules {
            if effectively_excepted(&rules, rule) {
                continue;
            }
            let prefix = format!("{rule} message ");
            let in_failures = check
                .failures
                .iter()
                .filter(|f| f.message.starts_with(&prefix))
                .count();
            let in_warnings = check
                .warnings
                .iter()
                .filter(|w| w.message.starts_with(&prefix))
                .count();
            match classify(rule) {
                RuleKind::Failure => {
                    prop_assert_eq!(in_failures, script.messages);
                    prop_assert_eq!(in_warnings, 0);
                }
                _ => {
                    prop_assert_eq!(in_warnings, script.messages);
                    prop_assert_eq!(in_failures, 0);
                }
            }
        }
    }

    #[test]
    fn repeated_runs_agree(rules in arb_rules()) {
        let evaluator = scripted(&rules);
        let policy = PolicySet::default();
        let ctx = EvalContext::default();
        let engine = Engine::new(&evaluator, &policy, &ctx);

        let first = engine
            .aggregate("a.yaml", &json!({}), "main", &counts(&rules))
            .expect("first run");
        let second = engine
            .aggregate("a.yaml", &json!({}), "main", &counts(&rules))
            .expect("second run");

        prop_assert_eq!(first, second);
    }
}
