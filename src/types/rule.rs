use super::{Term, Variable};
use itertools::Itertools;
use std::fmt;

/// A `Rule` directs an equation: any instance of the LHS [`Term`] may be replaced by the
/// corresponding instance of the RHS.
///
/// Rules built by completion satisfy `lhs > rhs` in the lexicographic path ordering; the type
/// itself does not enforce it.
///
/// [`Term`]: enum.Term.html
///
/// # Examples
///
/// ```
/// # use term_completion::{Signature, parse_rule};
/// let sig = Signature::new(&[("f", 2), ("e", 0)], &["x"]).expect("signature");
/// let rule = parse_rule(&sig, "f(e, x) = x").expect("parsed rule");
///
/// assert_eq!(rule.to_string(), "f(e, x) -> x");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Rule {
    pub lhs: Term,
    pub rhs: Term,
}
impl Rule {
    pub fn new(lhs: Term, rhs: Term) -> Rule {
        Rule { lhs, rhs }
    }
    /// Every [`Variable`] of the `Rule`, once each, LHS first.
    ///
    /// [`Variable`]: struct.Variable.html
    pub fn variables(&self) -> Vec<Variable> {
        self.lhs
            .all_variables()
            .chain(self.rhs.all_variables())
            .unique()
            .cloned()
            .collect()
    }
    /// `true` if the `Rule` rewrites somewhere inside `term`.
    pub fn reduces(&self, term: &Term) -> bool {
        self.rewrite(term).is_some()
    }
    /// Perform one rewrite step with this `Rule`.
    ///
    /// The root is tried first, then each argument left to right, recursively: the leftmost
    /// outermost redex is contracted. A redex whose contractum is identical to it is skipped,
    /// so a result always differs from `term`. Returns `None` if nothing rewrites.
    ///
    /// # Examples
    ///
    /// ```
    /// # use term_completion::{Signature, parse_rule, parse_term};
    /// let sig = Signature::new(&[("f", 2), ("i", 1), ("e", 0)], &["x", "y"])
    ///     .expect("signature");
    /// let rule = parse_rule(&sig, "f(e, x) = x").expect("parsed rule");
    ///
    /// let term = parse_term(&sig, "i(f(e, f(e, y)))").expect("parsed term");
    /// let once = rule.rewrite(&term).expect("rewrite");
    /// assert_eq!(once.to_string(), "i(f(e, y))");
    ///
    /// let twice = rule.rewrite(&once).expect("rewrite");
    /// assert_eq!(twice.to_string(), "i(y)");
    ///
    /// assert_eq!(rule.rewrite(&twice), None);
    /// ```
    pub fn rewrite(&self, term: &Term) -> Option<Term> {
        if let Some(contractum) = self.rewrite_head(term) {
            return Some(contractum);
        }
        match term {
            Term::Variable(_) => None,
            Term::Application { op, args } => {
                for (i, arg) in args.iter().enumerate() {
                    if let Some(new_arg) = self.rewrite(arg) {
                        let mut new_args = args.clone();
                        new_args[i] = new_arg;
                        return Some(Term::Application {
                            op: op.clone(),
                            args: new_args,
                        });
                    }
                }
                None
            }
        }
    }
    /// Rewrite `term` at its root, if the LHS matches there.
    pub fn rewrite_head(&self, term: &Term) -> Option<Term> {
        let sub = Term::pmatch(&self.lhs, term)?;
        let contractum = self.rhs.substitute(&sub);
        if &contractum == term {
            None
        } else {
            Some(contractum)
        }
    }
}
impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} -> {}", self.lhs, self.rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rewrite_outermost_test() {
        // i(i(x)) -> x rewrites the outer redex of i(i(i(i(y)))) first
        let rule = Rule::new(
            Term::app("i", vec![Term::app("i", vec![Term::var("x")])]),
            Term::var("x"),
        );
        let term = Term::app(
            "i",
            vec![Term::app(
                "i",
                vec![Term::app("i", vec![Term::app("i", vec![Term::var("y")])])],
            )],
        );
        let expected = Term::app("i", vec![Term::app("i", vec![Term::var("y")])]);
        assert_eq!(rule.rewrite(&term), Some(expected));
    }

    #[test]
    fn rewrite_leftmost_test() {
        let rule = Rule::new(Term::app("a", vec![]), Term::app("b", vec![]));
        let term = Term::app("f", vec![Term::app("a", vec![]), Term::app("a", vec![])]);
        let expected = Term::app("f", vec![Term::app("b", vec![]), Term::app("a", vec![])]);
        assert_eq!(rule.rewrite(&term), Some(expected));
    }

    #[test]
    fn trivial_redex_is_skipped_test() {
        let rule = Rule::new(Term::var("x"), Term::var("x"));
        assert_eq!(rule.rewrite(&Term::app("e", vec![])), None);
    }

    #[test]
    fn variables_test() {
        let rule = Rule::new(
            Term::app("f", vec![Term::var("y"), Term::var("x")]),
            Term::app("g", vec![Term::var("x"), Term::var("z")]),
        );
        assert_eq!(
            rule.variables(),
            vec![Variable::new("y"), Variable::new("x"), Variable::new("z")]
        );
    }
}
