//! Critical pairs: the two ways an overlap between rule left sides can be rewritten.

use crate::types::{Rule, Signature, Term};
use crate::unification::{unify_with_budget, DEFAULT_BUDGET};
use itertools::Itertools;
use std::collections::{HashMap, HashSet};
use tracing::trace;

/// A copy of `rule` whose variables shared with `avoid` are replaced by fresh ones.
///
/// Fresh names append `'` until they clash with nothing in either rule, and are registered in
/// `sig`.
pub fn rename_apart(sig: &mut Signature, rule: &Rule, avoid: &Rule) -> Rule {
    let shared: HashSet<_> = avoid.variables().into_iter().collect();
    let mut taken: HashSet<String> = shared
        .iter()
        .chain(rule.variables().iter())
        .map(|v| v.name().to_string())
        .collect();
    let mut map = HashMap::new();
    for var in rule.variables() {
        if shared.contains(&var) {
            let fresh = sig.fresh_var(var.name(), |name| taken.contains(name));
            taken.insert(fresh.name().to_string());
            map.insert(var, fresh);
        }
    }
    Rule::new(rule.lhs.rename(&map), rule.rhs.rename(&map))
}

/// The critical pair of `rule1` and `rule2` overlapping at `position` of `rule1`'s LHS, using
/// the default unification budget.
///
/// The rules must not share variables (see [`rename_apart`]). The subterm of `rule1.lhs` at
/// `position` and `rule2.lhs` are unified argument-wise; with the unifier σ the pair is
/// `(σ(rule1.rhs), σ(rule1.lhs)[σ(rule2.rhs)]_position)`. Returns `None` if the roots differ,
/// unification fails, or both sides are identical.
///
/// [`rename_apart`]: fn.rename_apart.html
///
/// # Examples
///
/// ```
/// # use term_completion::{Signature, parse_rule, parse_term};
/// # use term_completion::critical_pairs::critical_pair;
/// let sig = Signature::new(&[("f", 2), ("i", 1), ("e", 0)], &["x", "y", "z", "w"])
///     .expect("signature");
/// let assoc = parse_rule(&sig, "f(f(x, y), z) = f(x, f(y, z))").expect("parsed rule");
/// let inverse = parse_rule(&sig, "f(i(w), w) = e").expect("parsed rule");
///
/// let (left, right) = critical_pair(&assoc, &inverse, &[1]).expect("critical pair");
///
/// assert_eq!(left, parse_term(&sig, "f(i(w), f(w, z))").expect("parsed term"));
/// assert_eq!(right, parse_term(&sig, "f(e, z)").expect("parsed term"));
///
/// // the variable at position 1.1 is no overlap
/// assert_eq!(critical_pair(&assoc, &inverse, &[1, 1]), None);
/// ```
pub fn critical_pair(rule1: &Rule, rule2: &Rule, position: &[usize]) -> Option<(Term, Term)> {
    critical_pair_with_budget(rule1, rule2, position, DEFAULT_BUDGET)
}

/// Like [`critical_pair`], with an explicit unification budget.
///
/// [`critical_pair`]: fn.critical_pair.html
pub fn critical_pair_with_budget(
    rule1: &Rule,
    rule2: &Rule,
    position: &[usize],
    budget: usize,
) -> Option<(Term, Term)> {
    let subterm = rule1.lhs.at(position).ok()?;
    let (f, ss) = subterm.as_application()?;
    let (g, ts) = rule2.lhs.as_application()?;
    if f != g || ss.len() != ts.len() {
        return None;
    }
    let equations: Vec<(Term, Term)> = ss.iter().cloned().zip(ts.iter().cloned()).collect();
    let sigma = match unify_with_budget(&equations, budget) {
        Ok(sigma) => sigma,
        Err(failure) => {
            trace!(rule1 = %rule1, rule2 = %rule2, %failure, "no overlap");
            return None;
        }
    };
    let left = rule1.rhs.substitute(&sigma);
    let right = rule1
        .lhs
        .substitute(&sigma)
        .replace(position, rule2.rhs.substitute(&sigma))
        .ok()?;
    if left == right {
        None
    } else {
        trace!(rule1 = %rule1, rule2 = %rule2, %left, %right, "critical pair");
        Some((left, right))
    }
}

/// Every critical pair of `rule2` overlapping into `rule1`'s LHS.
///
/// `rule2` is first renamed apart from `rule1`. Every application position of `rule1.lhs`
/// whose symbol is the root of `rule2.lhs` is tried, except the root when both rules are the
/// same.
pub fn superpose(sig: &mut Signature, rule1: &Rule, rule2: &Rule, budget: usize) -> Vec<(Term, Term)> {
    let same = rule1 == rule2;
    let renamed = rename_apart(sig, rule2, rule1);
    let root = match renamed.lhs.as_application() {
        Some((g, _)) => g.clone(),
        None => return vec![],
    };
    rule1
        .lhs
        .function_positions()
        .into_iter()
        .filter(|p| !(same && p.is_empty()))
        .filter(|p| match rule1.lhs.at(p) {
            Ok(Term::Application { op, .. }) => *op == root,
            _ => false,
        })
        .filter_map(|p| critical_pair_with_budget(rule1, &renamed, &p, budget))
        .collect()
}

/// Every critical pair between every ordered pair of `rules`, each rule against itself
/// included.
///
/// # Examples
///
/// ```
/// # use term_completion::{Signature, parse_trs};
/// # use term_completion::critical_pairs::all_critical_pairs;
/// let mut sig = Signature::new(&[("f", 2), ("i", 1), ("e", 0)], &["x", "y", "z"])
///     .expect("signature");
/// let trs = parse_trs(&sig, "f(x, e) = x; f(i(x), x) = e").expect("parsed rules");
///
/// // the two rules overlap at the root, once in each order
/// let pairs: Vec<(String, String)> = all_critical_pairs(&mut sig, &trs.rules)
///     .into_iter()
///     .map(|(s, t)| (s.to_string(), t.to_string()))
///     .collect();
///
/// assert_eq!(
///     pairs,
///     vec![
///         ("i(e)".to_string(), "e".to_string()),
///         ("e".to_string(), "i(e)".to_string()),
///     ]
/// );
/// ```
pub fn all_critical_pairs(sig: &mut Signature, rules: &[Rule]) -> Vec<(Term, Term)> {
    let mut pairs = vec![];
    for (rule1, rule2) in rules.iter().cartesian_product(rules.iter()) {
        pairs.extend(superpose(sig, rule1, rule2, DEFAULT_BUDGET));
    }
    pairs
}
