extern crate term_completion;

use term_completion::*;

fn group() -> Signature {
    Signature::new(&[("f", 2), ("i", 1), ("e", 0)], &["x", "y", "z"]).expect("signature")
}

#[test]
fn parse_print_test() {
    let sig = group();
    let term = parse_term(&sig, " f( i(x) ,f(e(), y))").expect("parse of f(i(x), f(e, y))");

    assert_eq!(term.to_string(), "f(i(x), f(e, y))");
    assert_eq!(parse_term(&sig, &term.to_string()), Ok(term.clone()));
    assert_eq!(term.size(), 6);
    assert!(!term.is_ground());
    assert!(parse_term(&sig, "f(e, i(e))").expect("parse of f(e, i(e))").is_ground());
}

#[test]
fn parse_failures_test() {
    let sig = group();

    assert_eq!(parse_term(&sig, "f(x"), Err(SyntaxError::UnbalancedParentheses));
    assert_eq!(parse_term(&sig, "f(x))"), Err(SyntaxError::UnbalancedParentheses));
    assert_eq!(parse_term(&sig, ""), Err(SyntaxError::Empty));
    assert_eq!(
        parse_term(&sig, "i(x, y)"),
        Err(SyntaxError::ArityMismatch {
            symbol: "i".to_string(),
            expected: 1,
            found: 2,
        })
    );
    assert_eq!(parse_term(&sig, "g"), Err(SyntaxError::UnknownSymbol("g".to_string())));
    assert_eq!(parse_term(&sig, "x(e)"), Err(SyntaxError::AppliedVariable("x".to_string())));
    assert!(parse_equation(&sig, "f(x, e)").is_err());
}

#[test]
fn subterm_at_test() {
    let sig = group();
    let term = parse_term(&sig, "f(x, y)").expect("parse of f(x, y)");

    assert_eq!(term.at(&[]), Ok(&term));
    assert_eq!(term.at(&[2]), Ok(&Term::var("y")));
    assert!(match term.at(&[3]) {
        Err(PositionError::OutOfRange { index: 3, arity: 2, .. }) => true,
        _ => false,
    });
    assert!(match term.at(&[1, 1]) {
        Err(PositionError::TooDeep { .. }) => true,
        _ => false,
    });
}

#[test]
fn replace_at_test() {
    let sig = group();
    let term = parse_term(&sig, "f(i(x), e)").expect("parse of f(i(x), e)");
    let replaced = term
        .replace(&[1, 1], Term::app("e", vec![]))
        .expect("replaced subterm");

    assert_eq!(replaced.to_string(), "f(i(e), e)");
    // the original is untouched
    assert_eq!(term.to_string(), "f(i(x), e)");
    assert_eq!(term.replace(&[], Term::var("z")), Ok(Term::var("z")));
}

#[test]
fn position_of_test() {
    let sig = group();
    let term = parse_term(&sig, "f(i(x), e)").expect("parse of f(i(x), e)");

    assert_eq!(term.position_of(0), Some(vec![]));
    assert_eq!(term.position_of(2), Some(vec![1, 1]));
    assert_eq!(term.position_of(3), Some(vec![2]));
    assert_eq!(term.position_of(4), None);
    assert_eq!(display_position(&[1, 1]), "1.1");
    assert_eq!(display_position(&[]), "ε");
}

#[test]
fn rewrite_test() {
    let sig = group();
    let rule = parse_rule(&sig, "f(x, x) = x").expect("parse of f(x, x) = x");

    // repeated variables must bind identical subterms
    let term = parse_term(&sig, "f(i(y), i(z))").expect("parse of f(i(y), i(z))");
    assert_eq!(rule.rewrite(&term), None);

    let term = parse_term(&sig, "i(f(f(y, y), f(y, y)))").expect("parse of term");
    let once = rule.rewrite(&term).expect("rewrite");
    assert_eq!(once.to_string(), "i(f(y, y))");

    let trs = parse_trs(&sig, "f(x, x) = x").expect("parse of trs");
    assert_eq!(trs.normalize(&term, 10).map(|t| t.to_string()), Ok("i(y)".to_string()));
}

#[test]
fn unify_test() {
    let sig = group();
    let s = parse_term(&sig, "f(x, i(y))").expect("parse of f(x, i(y))");
    let t = parse_term(&sig, "f(i(z), x)").expect("parse of f(i(z), x)");

    let sigma = unify(&[(s.clone(), t.clone())]).expect("unifier");
    assert_eq!(s.substitute(&sigma), t.substitute(&sigma));

    let f = parse_term(&sig, "i(x)").expect("parse of i(x)");
    let g = parse_term(&sig, "f(y, y)").expect("parse of f(y, y)");
    assert!(match unify(&[(f, g)]) {
        Err(UnificationFailure::SymbolClash { left, right }) => {
            left == Operator::new("i") && right == Operator::new("f")
        }
        _ => false,
    });
}

#[test]
fn tree_test() {
    let sig = group();
    let term = parse_term(&sig, "f(i(x), e)").expect("parse of f(i(x), e)");

    assert_eq!(term.tree(), "f\n+--i (1)\n   +--x (1.1)\n+--e (2)\n");
}

#[test]
fn infer_signature_test() {
    let mut sig = Signature::default();
    infer_signature(&mut sig, "g(h(u), c())").expect("inferred signature");
    infer_signature(&mut sig, "g(c, v)").expect("inferred signature");

    assert_eq!(sig.arity("g"), Some(2));
    assert_eq!(sig.arity("c"), Some(0));
    assert!(sig.is_variable("u"));
    assert!(sig.is_variable("v"));
    assert_eq!(
        parse_term(&sig, "g(h(v), c)").map(|t| t.to_string()),
        Ok("g(h(v), c)".to_string())
    );
}
