extern crate term_completion;

use std::collections::BTreeMap;

use term_completion::completion::CompletionConfig;
use term_completion::*;

fn store() -> Store {
    let sig = Signature::new(&[("f", 2), ("i", 1), ("e", 0)], &["x", "y", "z"])
        .expect("signature");
    Store::new(sig)
}

#[test]
fn signature_round_trip_test() {
    let mut store = store();
    store
        .set_functions(vec![("g".to_string(), 1), ("c".to_string(), 0)])
        .expect("set functions");
    store
        .set_variables(vec!["u".to_string(), "v".to_string()])
        .expect("set variables");

    assert_eq!(
        store.functions(),
        &[("g".to_string(), 1), ("c".to_string(), 0)][..]
    );
    assert_eq!(store.variables(), vec!["u", "v"]);
    let precedence: Vec<String> = store
        .precedence()
        .iter()
        .map(|(op, _)| op.to_string())
        .collect();
    assert_eq!(precedence, vec!["c", "g"]);
}

#[test]
fn conflicting_symbol_test() {
    let mut store = store();
    assert!(match store.add_variable("f") {
        Err(StoreError::Signature(SignatureError::Conflict { .. })) => true,
        _ => false,
    });
    assert!(match store.add_function("x", 0) {
        Err(StoreError::Signature(SignatureError::Conflict { .. })) => true,
        _ => false,
    });
}

#[test]
fn signature_edits_purge_terms_test() {
    let mut store = store();
    store.save_term("inverse", "f(i(x), x)").expect("saved term");
    store.save_term("unit", "e").expect("saved term");

    store.add_variable("w").expect("added variable");
    store.remove_variable("z").expect("removed variable");
    assert_eq!(store.load_all_terms().len(), 2);

    store.rename_variable("x", "a").expect("renamed variable");
    assert!(store.load_all_terms().is_empty());

    store.save_term("unit", "e").expect("saved term");
    store.remove_function("i").expect("removed function");
    assert_eq!(
        store.load_term("unit").map(|stored| stored.term.to_string()),
        Some("e".to_string())
    );
    store.set_arity("e", 1).expect("changed arity");
    assert!(store.load_term("unit").is_none());
}

#[test]
fn equation_map_test() {
    let mut store = store();
    let mut equations = BTreeMap::new();
    equations.insert(
        "f(e, x)".to_string(),
        vec!["x".to_string(), "f(x, e)".to_string()],
    );
    store.set_equations(equations.clone()).expect("set equations");
    assert_eq!(store.equations(), &equations);

    assert!(store.add_equation("f(e, x)", "f(x, e)").is_err());
    store.remove_equation("f(e, x)", "x").expect("removed equation");
    assert!(store.remove_equation("f(e, x)", "x").is_err());
    assert_eq!(store.equations()["f(e, x)"], vec!["f(x, e)"]);
}

#[test]
fn complete_stored_equations_test() {
    let mut store = store();
    store.set_precedence(&["e", "f", "i"]).expect("precedence");
    store
        .add_equation("f(f(x, y), z)", "f(x, f(y, z))")
        .expect("added equation");
    store.add_equation("f(e, x)", "x").expect("added equation");
    store.add_equation("f(i(x), x)", "e").expect("added equation");

    let result = store
        .complete(&CompletionConfig::default())
        .expect("parsed equations");
    assert!(result.is_success());
    assert!(result
        .rules
        .contains(&Term::app("i", vec![Term::app("e", vec![])]), &Term::app("e", vec![])));

    // stale equations surface as syntax errors
    store.remove_function("i").expect("removed function");
    assert!(match store.complete(&CompletionConfig::default()) {
        Err(StoreError::Syntax(SyntaxError::UnknownSymbol(symbol))) => symbol == "i",
        _ => false,
    });
}
