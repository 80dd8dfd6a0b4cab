extern crate term_completion;

use term_completion::completion::{Completion, CompletionConfig, State};
use term_completion::critical_pairs::all_critical_pairs;
use term_completion::ordering::Ordering;
use term_completion::trace::Event;
use term_completion::*;

fn group() -> Signature {
    let mut sig = Signature::new(&[("f", 2), ("i", 1), ("e", 0)], &["x", "y", "z"])
        .expect("signature");
    sig.set_precedence(&["e", "f", "i"]).expect("precedence");
    sig
}

const GROUP_AXIOMS: &str = "f(f(x, y), z) = f(x, f(y, z)); f(e, x) = x; f(i(x), x) = e";

#[test]
fn group_completion_test() {
    let sig = group();
    let axioms = parse_equations(&sig, GROUP_AXIOMS).expect("parse of group axioms");
    let result = complete(&sig, &axioms, &CompletionConfig::default());

    assert!(result.is_success());
    assert_eq!(result.state, State::Converged);

    let normal = |s: &str| -> String {
        let term = parse_term(&result.signature, s).expect("parse of term");
        result
            .rules
            .normalize(&term, 1000)
            .expect("normal form")
            .to_string()
    };
    assert_eq!(normal("f(x, e)"), "x");
    assert_eq!(normal("f(x, i(x))"), "e");
    assert_eq!(normal("i(i(x))"), "x");
    assert_eq!(normal("i(f(f(x, y), i(z)))"), "f(z, f(i(y), i(x)))");
    // both sides of every axiom meet
    for (s, t) in &axioms {
        assert_eq!(
            result.rules.normalize(s, 1000),
            result.rules.normalize(t, 1000)
        );
    }

    // the result is confluent: every critical pair is joinable
    let mut sig = result.signature.clone();
    for (s, t) in all_critical_pairs(&mut sig, &result.rules.rules) {
        assert_eq!(
            result.rules.normalize(&s, 1000),
            result.rules.normalize(&t, 1000)
        );
    }

    // and every rule decreases
    let lpo = Lpo::new(&sig);
    for rule in &result.rules.rules {
        assert_eq!(lpo.compare(&rule.lhs, &rule.rhs), Ordering::Greater);
    }
}

#[test]
fn default_precedence_fails_on_groups_test() {
    // with f above i, the rule for i(f(x, y)) cannot be oriented
    let sig = Signature::new(&[("f", 2), ("i", 1), ("e", 0)], &["x", "y", "z"])
        .expect("signature");
    let axioms = parse_equations(&sig, GROUP_AXIOMS).expect("parse of group axioms");
    let config = CompletionConfig {
        max_steps: 2_000,
        ..CompletionConfig::default()
    };
    let result = complete(&sig, &axioms, &config);

    assert!(!result.is_success());
    assert!(match result.state {
        State::Failed(_) | State::Diverged => true,
        _ => false,
    });
}

#[test]
fn step_by_step_test() {
    let sig = group();
    let axioms = parse_equations(&sig, "f(e, x) = x").expect("parse of axiom");
    let mut completion = Completion::new(sig, &axioms, CompletionConfig::default());

    assert_eq!(completion.step(), &State::Processing);
    assert_eq!(completion.rules().len(), 1);
    assert_eq!(completion.step(), &State::Processing);
    assert_eq!(completion.step(), &State::Converged);
    assert_eq!(completion.steps(), 2);
    // stopped runs stay put
    assert_eq!(completion.step(), &State::Converged);

    let result = completion.run();
    assert!(result.is_success());
    assert_eq!(result.trace.rules_added(), 1);
}

#[test]
fn journal_records_critical_pairs_test() {
    let sig = group();
    let axioms = parse_equations(&sig, GROUP_AXIOMS).expect("parse of group axioms");
    let mut path = std::env::temp_dir();
    path.push(format!("term_completion_group_{}.log", std::process::id()));
    let _ = std::fs::remove_file(&path);
    let config = CompletionConfig {
        journal: Some(path.clone()),
        ..CompletionConfig::default()
    };

    let result = complete(&sig, &axioms, &config);
    let journal = std::fs::read_to_string(&path).expect("journal written");
    let _ = std::fs::remove_file(&path);

    assert_eq!(journal, result.trace.to_string());
    assert!(journal
        .lines()
        .any(|line| line.starts_with("Added critical pair (")));
    assert_eq!(journal.lines().count(), result.trace.len());
    assert!(match result.trace[0] {
        Event::RuleAdded(ref rule) => rule.to_string() == "f(f(x, y), z) -> f(x, f(y, z))",
        _ => false,
    });
}

#[test]
fn unorientable_identity_test() {
    let sig = group();
    let axioms = parse_equations(&sig, "f(x, y) = f(y, x)").expect("parse of commutativity");
    let result = complete(&sig, &axioms, &CompletionConfig::default());

    assert_eq!(
        result.state,
        State::Failed(OrderingIncomparable {
            lhs: Term::app("f", vec![Term::var("x"), Term::var("y")]),
            rhs: Term::app("f", vec![Term::var("y"), Term::var("x")]),
        })
    );
    assert!(result.rules.is_empty());
}

#[test]
fn budget_exhaustion_test() {
    let sig = group();
    let axioms = parse_equations(&sig, GROUP_AXIOMS).expect("parse of group axioms");
    let config = CompletionConfig {
        max_steps: 10,
        ..CompletionConfig::default()
    };
    let result = complete(&sig, &axioms, &config);

    assert_eq!(result.state, State::Diverged);
    assert_eq!(result.steps, 10);
}
