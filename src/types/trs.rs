use super::{Rule, Term};
use itertools::Itertools;
use std::fmt;
use thiserror::Error;

/// The error type for [`TRS`] manipulations.
///
/// [`TRS`]: struct.TRS.html
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TRSError {
    /// Returned when requesting to remove a rule that is not in the TRS.
    #[error("query rule not in TRS")]
    NotInTRS,
    /// Returned when attempting to insert a rule that already exists.
    #[error("rule already in TRS")]
    AlreadyInTRS,
    /// Returned when requesting the rule at an index that is out of range.
    #[error("index {0} greater than max index {1}")]
    InvalidIndex(usize, usize),
    /// Returned when normalization does not reach a normal form within its step budget.
    #[error("no normal form within {0} rewrite steps")]
    Diverged(usize),
}

/// A first-order term rewriting system: an ordered list of [`Rule`]s.
///
/// [`Rule`]: struct.Rule.html
///
/// # Examples
///
/// ```
/// # use term_completion::{Signature, parse_trs, parse_term};
/// let sig = Signature::new(&[("f", 2), ("i", 1), ("e", 0)], &["x"]).expect("signature");
/// let trs = parse_trs(&sig, "f(e, x) = x; i(e) = e").expect("parsed rules");
///
/// let term = parse_term(&sig, "f(i(e), f(e, e))").expect("parsed term");
/// let normal = trs.normalize(&term, 100).expect("normal form");
///
/// assert_eq!(normal.to_string(), "e");
/// assert_eq!(trs.to_string(), "f(e, x) -> x;\ni(e) -> e;");
/// ```
#[derive(Debug, Default, Hash, Clone, PartialEq, Eq)]
pub struct TRS {
    pub rules: Vec<Rule>,
}
impl TRS {
    pub fn new(rules: Vec<Rule>) -> TRS {
        TRS { rules }
    }
    pub fn len(&self) -> usize {
        self.rules.len()
    }
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
    pub fn get(&self, idx: usize) -> Result<&Rule, TRSError> {
        self.rules
            .get(idx)
            .ok_or_else(|| TRSError::InvalidIndex(idx, self.rules.len().saturating_sub(1)))
    }
    /// `true` if the `TRS` holds `lhs -> rhs` verbatim.
    pub fn contains(&self, lhs: &Term, rhs: &Term) -> bool {
        self.rules.iter().any(|r| &r.lhs == lhs && &r.rhs == rhs)
    }
    /// Append a rule unless it is already present.
    pub fn push(&mut self, rule: Rule) -> Result<(), TRSError> {
        if self.rules.contains(&rule) {
            Err(TRSError::AlreadyInTRS)
        } else {
            self.rules.push(rule);
            Ok(())
        }
    }
    /// Remove a rule, returning its former index.
    pub fn remove(&mut self, rule: &Rule) -> Result<usize, TRSError> {
        let idx = self
            .rules
            .iter()
            .position(|r| r == rule)
            .ok_or(TRSError::NotInTRS)?;
        self.rules.remove(idx);
        Ok(idx)
    }
    /// One rewrite step with the first rule, in order, that rewrites anywhere in `term`.
    pub fn rewrite(&self, term: &Term) -> Option<Term> {
        self.rules.iter().find_map(|rule| rule.rewrite(term))
    }
    /// `true` if no rule rewrites `term`.
    pub fn is_normal(&self, term: &Term) -> bool {
        self.rules.iter().all(|rule| !rule.reduces(term))
    }
    /// Rewrite `term` until no rule applies, rescanning the rules from the first one after
    /// every step. Fails once `max_steps` steps have not reached a normal form.
    pub fn normalize(&self, term: &Term, max_steps: usize) -> Result<Term, TRSError> {
        let mut current = term.clone();
        for _ in 0..max_steps {
            match self.rewrite(&current) {
                Some(next) => current = next,
                None => return Ok(current),
            }
        }
        if self.is_normal(&current) {
            Ok(current)
        } else {
            Err(TRSError::Diverged(max_steps))
        }
    }
}
impl fmt::Display for TRS {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.rules.iter().map(|r| format!("{};", r)).join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(lhs: Term, rhs: Term) -> Rule {
        Rule::new(lhs, rhs)
    }

    #[test]
    fn rewrite_uses_rule_order_test() {
        let a = Term::app("a", vec![]);
        let b = Term::app("b", vec![]);
        let c = Term::app("c", vec![]);
        let trs = TRS::new(vec![rule(a.clone(), b.clone()), rule(a.clone(), c)]);
        assert_eq!(trs.rewrite(&a), Some(b));
    }

    #[test]
    fn normalize_budget_test() {
        // a -> b, b -> a never terminates
        let a = Term::app("a", vec![]);
        let b = Term::app("b", vec![]);
        let trs = TRS::new(vec![rule(a.clone(), b.clone()), rule(b, a.clone())]);
        assert_eq!(trs.normalize(&a, 10), Err(TRSError::Diverged(10)));
    }

    #[test]
    fn push_remove_test() {
        let r = rule(Term::app("a", vec![]), Term::app("b", vec![]));
        let mut trs = TRS::default();
        assert_eq!(trs.push(r.clone()), Ok(()));
        assert_eq!(trs.push(r.clone()), Err(TRSError::AlreadyInTRS));
        assert_eq!(trs.remove(&r), Ok(0));
        assert_eq!(trs.remove(&r), Err(TRSError::NotInTRS));
        assert_eq!(trs.get(0), Err(TRSError::InvalidIndex(0, 0)));
    }
}
