//! The lexicographic path ordering (LPO) over a [`Signature`]'s precedence.
//!
//! [`Signature`]: ../struct.Signature.html

use crate::types::{Operator, Rank, Rule, Signature, Term};
use std::cmp;
use std::collections::HashMap;
use thiserror::Error;

/// Comparison result for term ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Ordering {
    Less,
    Equal,
    Greater,
    Incomparable,
}

/// Neither side of an equation is greater than the other, so it cannot become a [`Rule`].
///
/// [`Rule`]: ../struct.Rule.html
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot orient `{lhs} = {rhs}`: the sides are incomparable")]
pub struct OrderingIncomparable {
    pub lhs: Term,
    pub rhs: Term,
}

/// An LPO instance, fixed to the precedence of one [`Signature`] snapshot.
///
/// [`Signature`]: ../struct.Signature.html
///
/// # Examples
///
/// ```
/// # use term_completion::{Signature, parse_term};
/// # use term_completion::ordering::{Lpo, Ordering};
/// let mut sig = Signature::new(&[("f", 2), ("i", 1), ("e", 0)], &["x", "y"])
///     .expect("signature");
/// sig.set_precedence(&["e", "f", "i"]).expect("precedence");
/// let lpo = Lpo::new(&sig);
///
/// let s = parse_term(&sig, "i(f(x, y))").expect("parsed term");
/// let t = parse_term(&sig, "f(i(y), i(x))").expect("parsed term");
///
/// assert_eq!(lpo.compare(&s, &t), Ordering::Greater);
/// assert_eq!(lpo.compare(&t, &s), Ordering::Less);
/// assert_eq!(lpo.compare(&s, &s), Ordering::Equal);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lpo {
    ranks: HashMap<Operator, Rank>,
}
impl Lpo {
    pub fn new(sig: &Signature) -> Lpo {
        Lpo {
            ranks: sig.precedence().into_iter().collect(),
        }
    }
    /// Compare `s` with `t`:
    ///
    /// 1. identical terms are `Equal`;
    /// 2. against a variable `x`, `s` is `Greater` iff `x` is among the symbols of `s`, and
    ///    `Incomparable` otherwise;
    /// 3. a variable is `Less` than any application;
    /// 4. applications are `Greater` or `Less` by the path ordering, or `Incomparable`.
    pub fn compare(&self, s: &Term, t: &Term) -> Ordering {
        if s == t {
            Ordering::Equal
        } else if self.greater(s, t) {
            Ordering::Greater
        } else if self.greater(t, s) {
            Ordering::Less
        } else {
            match (s, t) {
                (_, Term::Variable(_)) => Ordering::Incomparable,
                (Term::Variable(_), _) => Ordering::Less,
                _ => Ordering::Incomparable,
            }
        }
    }
    /// `true` if `s` is strictly greater than `t`.
    pub fn greater(&self, s: &Term, t: &Term) -> bool {
        match (s, t) {
            _ if s == t => false,
            // raw presence in the flattened symbol list
            (_, Term::Variable(x)) => s.atoms().iter().any(|a| a.name() == x.name()),
            (Term::Variable(_), _) => false,
            (
                Term::Application {
                    op: f,
                    args: ss,
                },
                Term::Application {
                    op: g,
                    args: ts,
                },
            ) => {
                if ss.iter().any(|si| si == t || self.greater(si, t)) {
                    return true;
                }
                match self.precedes(f, g) {
                    Some(cmp::Ordering::Greater) => self.dominates(s, ts),
                    Some(cmp::Ordering::Equal) => {
                        match ss.iter().zip(ts.iter()).find(|(si, ti)| si != ti) {
                            Some((si, ti)) => self.greater(si, ti) && self.dominates(s, ts),
                            None => false,
                        }
                    }
                    Some(cmp::Ordering::Less) | None => false,
                }
            }
        }
    }
    /// Orient an equation into a [`Rule`] whose LHS is the greater side.
    ///
    /// [`Rule`]: ../struct.Rule.html
    pub fn orient(&self, s: Term, t: Term) -> Result<Rule, OrderingIncomparable> {
        if self.greater(&s, &t) {
            Ok(Rule::new(s, t))
        } else if self.greater(&t, &s) {
            Ok(Rule::new(t, s))
        } else {
            Err(OrderingIncomparable { lhs: s, rhs: t })
        }
    }
    /// every argument of the smaller side is below `s`.
    fn dominates(&self, s: &Term, ts: &[Term]) -> bool {
        ts.iter().all(|tj| self.greater(s, tj))
    }
    fn precedes(&self, f: &Operator, g: &Operator) -> Option<cmp::Ordering> {
        if f == g {
            return Some(cmp::Ordering::Equal);
        }
        match (self.ranks.get(f), self.ranks.get(g)) {
            (Some(rf), Some(rg)) => Some(rf.cmp(rg)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group() -> Signature {
        let mut sig = Signature::new(&[("f", 2), ("i", 1), ("e", 0)], &["x", "y", "z"])
            .expect("signature");
        sig.set_precedence(&["e", "f", "i"]).expect("precedence");
        sig
    }
    fn f(a: Term, b: Term) -> Term {
        Term::app("f", vec![a, b])
    }
    fn i(a: Term) -> Term {
        Term::app("i", vec![a])
    }
    fn e() -> Term {
        Term::app("e", vec![])
    }
    fn v(name: &str) -> Term {
        Term::var(name)
    }

    #[test]
    fn variable_rules_test() {
        let lpo = Lpo::new(&group());
        assert_eq!(lpo.compare(&f(e(), v("x")), &v("x")), Ordering::Greater);
        assert_eq!(lpo.compare(&f(e(), v("y")), &v("x")), Ordering::Incomparable);
        assert_eq!(lpo.compare(&v("x"), &f(e(), v("y"))), Ordering::Less);
        assert_eq!(lpo.compare(&v("x"), &v("y")), Ordering::Incomparable);
        assert_eq!(lpo.compare(&v("x"), &v("x")), Ordering::Equal);
    }

    #[test]
    fn subterm_rule_test() {
        let lpo = Lpo::new(&group());
        // e is the least symbol, yet f(e, x) > e through its argument
        assert!(lpo.greater(&f(e(), v("x")), &e()));
        assert!(lpo.greater(&i(i(v("x"))), &i(v("x"))));
    }

    #[test]
    fn precedence_rule_test() {
        let lpo = Lpo::new(&group());
        assert!(lpo.greater(&i(e()), &e()));
        assert!(lpo.greater(&i(f(v("x"), v("y"))), &f(i(v("y")), i(v("x")))));
        assert!(!lpo.greater(&f(i(v("y")), i(v("x"))), &i(f(v("x"), v("y")))));
    }

    #[test]
    fn lexicographic_rule_test() {
        let lpo = Lpo::new(&group());
        let assoc_l = f(f(v("x"), v("y")), v("z"));
        let assoc_r = f(v("x"), f(v("y"), v("z")));
        assert_eq!(lpo.compare(&assoc_l, &assoc_r), Ordering::Greater);
        assert_eq!(lpo.compare(&assoc_r, &assoc_l), Ordering::Less);
        // commutativity cannot be oriented
        assert_eq!(
            lpo.compare(&f(v("x"), v("y")), &f(v("y"), v("x"))),
            Ordering::Incomparable
        );
    }

    #[test]
    fn orient_test() {
        let lpo = Lpo::new(&group());
        let rule = lpo.orient(v("x"), f(e(), v("x"))).expect("orientable");
        assert_eq!(rule, Rule::new(f(e(), v("x")), v("x")));

        let comm = lpo.orient(f(v("x"), v("y")), f(v("y"), v("x")));
        assert_eq!(
            comm,
            Err(OrderingIncomparable {
                lhs: f(v("x"), v("y")),
                rhs: f(v("y"), v("x")),
            })
        );
    }

    #[test]
    fn unknown_symbols_are_incomparable_test() {
        let lpo = Lpo::new(&group());
        let g = Term::app("g", vec![e()]);
        assert_eq!(lpo.compare(&g, &i(e())), Ordering::Incomparable);
        // but the subterm rule still applies
        assert!(lpo.greater(&g, &e()));
    }
}
