use super::{Term, Variable};
use itertools::Itertools;
use std::fmt;

/// A finite mapping from [`Variable`]s to [`Term`]s, applied simultaneously by
/// [`Term::substitute`].
///
/// [`Variable`]: struct.Variable.html
/// [`Term`]: enum.Term.html
/// [`Term::substitute`]: enum.Term.html#method.substitute
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Substitution(pub Vec<(Variable, Term)>);
impl Substitution {
    pub fn new() -> Substitution {
        Substitution::default()
    }
    pub fn get(&self, var: &Variable) -> Option<&Term> {
        self.0.iter().find(|(v, _)| v == var).map(|(_, t)| t)
    }
    /// Bind `var` to `term`, replacing any earlier binding.
    pub fn insert(&mut self, var: Variable, term: Term) {
        match self.0.iter_mut().find(|(v, _)| *v == var) {
            Some(binding) => binding.1 = term,
            None => self.0.push((var, term)),
        }
    }
    pub fn len(&self) -> usize {
        self.0.len()
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
    pub fn iter(&self) -> impl Iterator<Item = &(Variable, Term)> {
        self.0.iter()
    }
    /// The [`Variable`]s the `Substitution` binds.
    ///
    /// [`Variable`]: struct.Variable.html
    pub fn domain(&self) -> impl Iterator<Item = &Variable> {
        self.0.iter().map(|(v, _)| v)
    }
    /// `true` if no bound [`Variable`] occurs in any bound [`Term`], so applying the
    /// `Substitution` twice changes nothing.
    ///
    /// [`Variable`]: struct.Variable.html
    /// [`Term`]: enum.Term.html
    ///
    /// # Examples
    ///
    /// ```
    /// # use term_completion::{Substitution, Term, Variable};
    /// let mut sub = Substitution::new();
    /// sub.insert(Variable::new("x"), Term::app("i", vec![Term::var("y")]));
    /// assert!(sub.is_idempotent());
    ///
    /// sub.insert(Variable::new("y"), Term::var("z"));
    /// assert!(!sub.is_idempotent());
    /// ```
    pub fn is_idempotent(&self) -> bool {
        self.0
            .iter()
            .all(|(_, t)| self.domain().all(|v| !t.contains_variable(v)))
    }
}
impl fmt::Display for Substitution {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{{{}}}",
            self.0
                .iter()
                .map(|(v, t)| format!("{} ↦ {}", v, t))
                .join(", ")
        )
    }
}
