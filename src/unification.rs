//! Syntactic unification by Martelli–Montanari transformation.
//!
//! A problem is a collection of equations between [`Term`]s. Each step takes one equation off
//! the worklist and applies the first rule that fits:
//!
//! - **Delete** `t = t`.
//! - **Decompose** `f(a1, …, an) = f(b1, …, bn)` into `ai = bi`; different symbols clash.
//! - **Orient** `t = x` into `x = t` when only `x` is a variable.
//! - **Eliminate** `x = t` when `x` does not occur in `t`, substituting `x ↦ t` everywhere else.
//!
//! [`Term`]: ../enum.Term.html

use crate::types::{Operator, Substitution, Term, Variable};
use smallvec::{smallvec, SmallVec};
use thiserror::Error;
use tracing::trace;

/// The number of transformation steps [`unify`] allows before reporting divergence.
///
/// [`unify`]: fn.unify.html
pub const DEFAULT_BUDGET: usize = 10_000;

/// Why a unification problem has no solution, or none was found.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UnificationFailure {
    /// Two applications of different symbols must be equal.
    #[error("cannot unify `{left}` with `{right}`")]
    SymbolClash { left: Operator, right: Operator },
    /// A variable would have to equal a term properly containing it.
    #[error("`{variable}` occurs in its own binding")]
    OccursCheck { variable: Variable },
    /// The transformation did not finish within its step budget.
    #[error("no solution within {budget} steps")]
    Divergence { budget: usize },
}

/// Solve `equations` with the [`DEFAULT_BUDGET`].
///
/// The result is an idempotent most general unifier.
///
/// [`DEFAULT_BUDGET`]: constant.DEFAULT_BUDGET.html
///
/// # Examples
///
/// ```
/// # use term_completion::{Signature, parse_term};
/// # use term_completion::unification::{unify, UnificationFailure};
/// let sig = Signature::new(&[("f", 2), ("g", 1), ("e", 0)], &["x", "y", "z"])
///     .expect("signature");
/// let s = parse_term(&sig, "f(x, g(y))").expect("parsed term");
/// let t = parse_term(&sig, "f(g(z), x)").expect("parsed term");
///
/// let sigma = unify(&[(s.clone(), t.clone())]).expect("unifier");
/// assert_eq!(s.substitute(&sigma), t.substitute(&sigma));
/// assert!(sigma.is_idempotent());
///
/// let clash = parse_term(&sig, "g(x)").expect("parsed term");
/// let fail = unify(&[(clash, parse_term(&sig, "e").expect("parsed term"))]);
/// assert!(match fail {
///     Err(UnificationFailure::SymbolClash { .. }) => true,
///     _ => false,
/// });
/// ```
pub fn unify(equations: &[(Term, Term)]) -> Result<Substitution, UnificationFailure> {
    unify_with_budget(equations, DEFAULT_BUDGET)
}

/// Solve a problem given as a map from each left side to the right sides it must equal.
///
/// Each right side is an independent equation with its left side.
///
/// # Examples
///
/// ```
/// # use std::collections::HashMap;
/// # use term_completion::{Signature, parse_term};
/// # use term_completion::unification::{unify_grouped, UnificationFailure};
/// let sig = Signature::new(&[("f", 1), ("g", 1)], &["x", "y"]).expect("signature");
/// let mut problem = HashMap::new();
/// problem.insert(
///     parse_term(&sig, "f(x)").expect("parsed term"),
///     vec![parse_term(&sig, "g(y)").expect("parsed term")],
/// );
///
/// assert!(match unify_grouped(&problem, 100) {
///     Err(UnificationFailure::SymbolClash { left, right }) => {
///         left.name() == "f" && right.name() == "g"
///     }
///     _ => false,
/// });
/// ```
pub fn unify_grouped<'a, I>(groups: I, budget: usize) -> Result<Substitution, UnificationFailure>
where
    I: IntoIterator<Item = (&'a Term, &'a Vec<Term>)>,
{
    let equations: Vec<(Term, Term)> = groups
        .into_iter()
        .flat_map(|(lhs, rhss)| rhss.iter().map(move |rhs| (lhs.clone(), rhs.clone())))
        .collect();
    unify_with_budget(&equations, budget)
}

/// Solve `equations`, giving up with [`UnificationFailure::Divergence`] after `budget`
/// transformation steps.
///
/// [`UnificationFailure::Divergence`]: enum.UnificationFailure.html#variant.Divergence
pub fn unify_with_budget(
    equations: &[(Term, Term)],
    budget: usize,
) -> Result<Substitution, UnificationFailure> {
    let mut pending: SmallVec<[(Term, Term); 32]> = equations.iter().rev().cloned().collect();
    let mut solved: SmallVec<[(Variable, Term); 32]> = smallvec![];
    let mut steps = 0;
    while let Some((s, t)) = pending.pop() {
        steps += 1;
        if steps > budget {
            trace!(budget, "unification diverged");
            return Err(UnificationFailure::Divergence { budget });
        }
        match (s, t) {
            // delete
            (s, t) if s == t => (),
            // decompose
            (
                Term::Application {
                    op: left,
                    args: a1,
                },
                Term::Application {
                    op: right,
                    args: a2,
                },
            ) => {
                if left != right || a1.len() != a2.len() {
                    trace!(%left, %right, "symbol clash");
                    return Err(UnificationFailure::SymbolClash { left, right });
                }
                pending.extend(a1.into_iter().zip(a2).rev());
            }
            // orient
            (s @ Term::Application { .. }, Term::Variable(x)) => {
                pending.push((Term::Variable(x), s));
            }
            // eliminate
            (Term::Variable(x), t) => {
                if t.contains_variable(&x) {
                    trace!(%x, %t, "occurs check");
                    return Err(UnificationFailure::OccursCheck { variable: x });
                }
                let mut binding = Substitution::new();
                binding.insert(x.clone(), t.clone());
                for (lhs, rhs) in pending.iter_mut() {
                    *lhs = lhs.substitute(&binding);
                    *rhs = rhs.substitute(&binding);
                }
                for (_, bound) in solved.iter_mut() {
                    *bound = bound.substitute(&binding);
                }
                solved.push((x, t));
            }
        }
    }
    let sigma = Substitution(solved.into_vec());
    check_occurs(&sigma)?;
    Ok(sigma)
}

/// Assert that no bound variable occurs in any binding of `sigma`.
fn check_occurs(sigma: &Substitution) -> Result<(), UnificationFailure> {
    for variable in sigma.domain() {
        if sigma.iter().any(|(_, t)| t.contains_variable(variable)) {
            return Err(UnificationFailure::OccursCheck {
                variable: variable.clone(),
            });
        }
    }
    Ok(())
}
