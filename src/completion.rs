//! Knuth–Bendix completion, in Huet's formulation.
//!
//! Completion keeps a queue of unoriented identities and a list of rules, each rule carrying a
//! mark once it has been superposed with every other marked rule. Every [`step`] either
//!
//! - takes the next identity, normalizes both of its sides, and drops it if they meet or orients
//!   it into a new rule with the lexicographic path ordering, interreducing the older rules; or
//! - when no identity is left, marks the first unmarked rule and enqueues the critical pairs it
//!   forms with every marked rule.
//!
//! Completion converges once no identity is left and every rule is marked. It fails when an
//! identity cannot be oriented, and diverges when its step or rewrite budget runs out.
//!
//! [`step`]: struct.Completion.html#method.step
//!
//! # Examples
//!
//! ```
//! # use term_completion::{Signature, parse_equations, parse_term};
//! # use term_completion::completion::{complete, CompletionConfig, State};
//! let mut sig = Signature::new(&[("f", 2), ("i", 1), ("e", 0)], &["x", "y", "z"])
//!     .expect("signature");
//! sig.set_precedence(&["e", "f", "i"]).expect("precedence");
//! let axioms = parse_equations(
//!     &sig,
//!     "f(f(x, y), z) = f(x, f(y, z)); f(e, x) = x; f(i(x), x) = e",
//! )
//! .expect("parsed equations");
//!
//! let result = complete(&sig, &axioms, &CompletionConfig::default());
//! assert_eq!(result.state, State::Converged);
//!
//! let normal = |s: &str| {
//!     let term = parse_term(&result.signature, s).expect("parsed term");
//!     result.rules.normalize(&term, 1000).expect("normal form").to_string()
//! };
//! assert_eq!(normal("f(x, i(x))"), "e");
//! assert_eq!(normal("i(f(x, y))"), "f(i(y), i(x))");
//! ```

use super::critical_pairs::superpose;
use super::ordering::{Lpo, OrderingIncomparable};
use super::trace::{Event, Journal, Trace};
use super::types::{Rule, Signature, Term, Variable, TRS};
use serde_derive::{Deserialize, Serialize};
use std::collections::{HashMap, VecDeque};
use std::fmt;
use std::path::PathBuf;
use tracing::{debug, info};

/// The variable names canonical renaming draws from, in order. Later rounds repeat the list
/// with one more `'` each.
const CANONICAL_NAMES: [&str; 10] = ["x", "y", "z", "w", "a", "b", "c", "d", "u", "v"];

/// Budgets and diagnostics for one completion run.
///
/// # Examples
///
/// ```
/// # use term_completion::completion::CompletionConfig;
/// let config = CompletionConfig {
///     max_steps: 500,
///     ..CompletionConfig::default()
/// };
///
/// assert_eq!(config.max_rewrites, 10_000);
/// assert_eq!(config.journal, None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompletionConfig {
    /// Identities processed plus superposition rounds before completion gives up.
    pub max_steps: usize,
    /// Rewrite steps allowed per normalization.
    pub max_rewrites: usize,
    /// Transformation steps allowed per unification problem.
    pub unification_budget: usize,
    /// A file every [`Event`] is appended to, one line each.
    ///
    /// [`Event`]: ../trace/enum.Event.html
    pub journal: Option<PathBuf>,
}
impl Default for CompletionConfig {
    fn default() -> CompletionConfig {
        CompletionConfig {
            max_steps: 100_000,
            max_rewrites: 10_000,
            unification_budget: 10_000,
            journal: None,
        }
    }
}

/// Where a completion run stands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum State {
    /// Identities remain or some rule is unmarked.
    Processing,
    /// The rules are confluent and terminating.
    Converged,
    /// An identity could not be oriented.
    Failed(OrderingIncomparable),
    /// A step or rewrite budget ran out.
    Diverged,
}
impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            State::Processing => write!(f, "processing"),
            State::Converged => write!(f, "converged"),
            State::Failed(reason) => write!(f, "failed: {}", reason),
            State::Diverged => write!(f, "diverged"),
        }
    }
}

/// The outcome of [`complete`].
///
/// [`complete`]: fn.complete.html
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionResult {
    pub state: State,
    /// The rules when completion stopped; confluent and terminating only if it converged.
    pub rules: TRS,
    /// The input signature with every variable completion introduced.
    pub signature: Signature,
    pub steps: usize,
    pub trace: Trace,
}
impl CompletionResult {
    pub fn is_success(&self) -> bool {
        self.state == State::Converged
    }
}

/// Run completion on `equations` to a verdict.
///
/// The equations must be well-formed over `sig`, whose precedence orients them.
pub fn complete(
    sig: &Signature,
    equations: &[(Term, Term)],
    config: &CompletionConfig,
) -> CompletionResult {
    Completion::new(sig.clone(), equations, config.clone()).run()
}

/// A completion run that can be driven one step at a time.
///
/// # Examples
///
/// ```
/// # use term_completion::{Signature, parse_equations};
/// # use term_completion::completion::{Completion, CompletionConfig, State};
/// let sig = Signature::new(&[("f", 2), ("e", 0)], &["x", "y"]).expect("signature");
/// let equations = parse_equations(&sig, "f(x, y) = f(y, x)").expect("parsed equations");
/// let mut completion = Completion::new(sig, &equations, CompletionConfig::default());
///
/// assert_eq!(completion.state(), &State::Processing);
/// completion.step();
/// assert!(match completion.state() {
///     State::Failed(_) => true,
///     _ => false,
/// });
/// ```
#[derive(Debug)]
pub struct Completion {
    sig: Signature,
    lpo: Lpo,
    config: CompletionConfig,
    identities: VecDeque<(Term, Term)>,
    rules: TRS,
    marked: Vec<bool>,
    steps: usize,
    state: State,
    journal: Journal,
}
impl Completion {
    pub fn new(sig: Signature, equations: &[(Term, Term)], config: CompletionConfig) -> Completion {
        let journal = Journal::open(config.journal.as_ref().map(|p| p.as_path()));
        Completion {
            lpo: Lpo::new(&sig),
            sig,
            config,
            identities: equations.iter().cloned().collect(),
            rules: TRS::default(),
            marked: vec![],
            steps: 0,
            state: State::Processing,
            journal,
        }
    }
    pub fn state(&self) -> &State {
        &self.state
    }
    pub fn rules(&self) -> &TRS {
        &self.rules
    }
    pub fn identities(&self) -> impl Iterator<Item = &(Term, Term)> {
        self.identities.iter()
    }
    pub fn steps(&self) -> usize {
        self.steps
    }
    pub fn trace(&self) -> &Trace {
        self.journal.trace()
    }
    /// Perform one transition, unless completion has already stopped.
    pub fn step(&mut self) -> &State {
        if self.state != State::Processing {
            return &self.state;
        }
        let unmarked = self.marked.iter().position(|&m| !m);
        if self.identities.is_empty() && unmarked.is_none() {
            self.state = State::Converged;
        } else if self.steps >= self.config.max_steps {
            debug!(steps = self.steps, "step budget exhausted");
            self.state = State::Diverged;
        } else {
            self.steps += 1;
            match (self.identities.pop_front(), unmarked) {
                (Some((s, t)), _) => self.process(s, t),
                (None, Some(k)) => self.superpose_marked(k),
                (None, None) => (),
            }
        }
        &self.state
    }
    /// Step until completion stops.
    pub fn run(mut self) -> CompletionResult {
        while self.state == State::Processing {
            self.step();
        }
        info!(
            state = %self.state,
            steps = self.steps,
            rules = self.rules.len(),
            "completion finished"
        );
        CompletionResult {
            state: self.state,
            rules: self.rules,
            signature: self.sig,
            steps: self.steps,
            trace: self.journal.into_trace(),
        }
    }
    fn process(&mut self, s: Term, t: Term) {
        let (s, t) = match (self.normalize(&s), self.normalize(&t)) {
            (Some(s), Some(t)) => self.canonical(&s, &t),
            _ => return,
        };
        if s == t || self.rules.contains(&s, &t) || self.rules.contains(&t, &s) {
            self.journal.record(Event::IdentityDropped(s, t));
            return;
        }
        match self.lpo.orient(s, t) {
            Ok(rule) => self.add_rule(rule),
            Err(reason) => {
                debug!(%reason, "cannot orient identity");
                self.state = State::Failed(reason);
            }
        }
    }
    /// Interreduce the rules with `rule`, then append it unmarked.
    fn add_rule(&mut self, rule: Rule) {
        let mut idx = 0;
        while idx < self.rules.len() {
            let old = self.rules.rules[idx].clone();
            if rule.reduces(&old.lhs) {
                self.rules.rules.remove(idx);
                self.marked.remove(idx);
                self.identities.push_back((old.lhs.clone(), old.rhs.clone()));
                self.journal.record(Event::RuleRetracted(old));
                continue;
            }
            if rule.reduces(&old.rhs) {
                let mut extended = self.rules.clone();
                extended.rules.push(rule.clone());
                let rhs = match extended.normalize(&old.rhs, self.config.max_rewrites) {
                    Ok(rhs) => rhs,
                    Err(err) => {
                        debug!(%err, rule = %old, "cannot renormalize rule");
                        self.state = State::Diverged;
                        return;
                    }
                };
                let new = Rule::new(old.lhs.clone(), rhs);
                if new == rule || self.rules.rules.contains(&new) {
                    self.rules.rules.remove(idx);
                    self.marked.remove(idx);
                    self.journal.record(Event::RuleRemoved(old));
                    continue;
                }
                self.rules.rules[idx] = new.clone();
                self.journal.record(Event::RuleSimplified { old, new });
            }
            idx += 1;
        }
        self.rules.rules.push(rule.clone());
        self.marked.push(false);
        self.journal.record(Event::RuleAdded(rule));
    }
    /// Mark rule `k` and enqueue its critical pairs with every marked rule.
    fn superpose_marked(&mut self, k: usize) {
        self.marked[k] = true;
        let rule = self.rules.rules[k].clone();
        self.journal.record(Event::RuleMarked(rule.clone()));
        let partners: Vec<Rule> = self
            .rules
            .rules
            .iter()
            .zip(&self.marked)
            .filter(|(_, m)| **m)
            .map(|(r, _)| r.clone())
            .collect();
        let budget = self.config.unification_budget;
        let mut pairs = vec![];
        for other in &partners {
            pairs.extend(superpose(&mut self.sig, &rule, other, budget));
            if *other != rule {
                pairs.extend(superpose(&mut self.sig, other, &rule, budget));
            }
        }
        debug!(rule = %rule, pairs = pairs.len(), "superposed");
        for (s, t) in pairs {
            let (s, t) = self.larger_first(s, t);
            let (s, t) = self.canonical(&s, &t);
            if s == t || self.is_known(&s, &t) {
                continue;
            }
            self.identities.push_back((s.clone(), t.clone()));
            self.journal.record(Event::CriticalPair(s, t));
        }
    }
    /// The pair with its longer printed side first, the LPO-greater side on equal lengths.
    fn larger_first(&self, s: Term, t: Term) -> (Term, Term) {
        let (ls, lt) = (s.to_string().len(), t.to_string().len());
        if ls > lt || (ls == lt && !self.lpo.greater(&t, &s)) {
            (s, t)
        } else {
            (t, s)
        }
    }
    /// `true` if `s = t` is already an identity or a rule, either way round.
    fn is_known(&self, s: &Term, t: &Term) -> bool {
        self.identities
            .iter()
            .any(|(a, b)| (a == s && b == t) || (a == t && b == s))
            || self.rules.contains(s, t)
            || self.rules.contains(t, s)
    }
    /// The normal form of `term` under the current rules, or `None` after setting the state to
    /// `Diverged`.
    fn normalize(&mut self, term: &Term) -> Option<Term> {
        match self.rules.normalize(term, self.config.max_rewrites) {
            Ok(normal) => Some(normal),
            Err(err) => {
                debug!(%err, %term, "cannot normalize");
                self.state = State::Diverged;
                None
            }
        }
    }
    /// Rename the variables of `s` and `t` jointly, in order of first occurrence, to the
    /// canonical names.
    fn canonical(&mut self, s: &Term, t: &Term) -> (Term, Term) {
        let mut variables = s.variables();
        for v in t.variables() {
            if !variables.contains(&v) {
                variables.push(v);
            }
        }
        let names = (0..)
            .flat_map(|round: usize| {
                CANONICAL_NAMES
                    .iter()
                    .map(move |name| format!("{}{}", name, "'".repeat(round)))
            })
            .filter(|name| !self.sig.is_function(name));
        let map: HashMap<Variable, Variable> =
            variables.into_iter().zip(names.map(Variable::new)).collect();
        for name in map.values() {
            if self.sig.ensure_var(name.name()).is_err() {
                debug!(%name, "canonical name clashes with the signature");
            }
        }
        (s.rename(&map), t.rename(&map))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

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
    fn group() -> Signature {
        let mut sig = Signature::new(&[("f", 2), ("i", 1), ("e", 0)], &["x", "y", "z"])
            .expect("signature");
        sig.set_precedence(&["e", "f", "i"]).expect("precedence");
        sig
    }
    fn axioms() -> Vec<(Term, Term)> {
        vec![
            (f(f(v("x"), v("y")), v("z")), f(v("x"), f(v("y"), v("z")))),
            (f(e(), v("x")), v("x")),
            (f(i(v("x")), v("x")), e()),
        ]
    }

    #[test]
    fn group_theory_test() {
        let result = complete(&group(), &axioms(), &CompletionConfig::default());
        assert!(result.is_success(), "{}", result.state);
        let normal = |t: Term| result.rules.normalize(&t, 1000).expect("normal form");
        assert_eq!(normal(f(v("x"), e())), v("x"));
        assert_eq!(normal(f(v("x"), i(v("x")))), e());
        assert_eq!(normal(i(i(v("x")))), v("x"));
        assert_eq!(normal(i(e())), e());
        assert_eq!(normal(i(f(v("x"), v("y")))), f(i(v("y")), i(v("x"))));
        // the standard complete system for groups
        assert_eq!(result.rules.len(), 10);
        assert!(result.trace.critical_pairs() > 0);
    }

    #[test]
    fn larger_first_test() {
        let completion = Completion::new(group(), &[], CompletionConfig::default());
        let (long, short) = (f(v("x"), e()), i(e()));
        assert_eq!(
            completion.larger_first(short.clone(), long.clone()),
            (long, short)
        );
        // "f(e, e)" and "i(i(x))" print equally long; i > f decides
        let (small, large) = (f(e(), e()), i(i(v("x"))));
        assert_eq!(
            completion.larger_first(small.clone(), large.clone()),
            (large.clone(), small.clone())
        );
        assert_eq!(completion.larger_first(large.clone(), small.clone()), (large, small));
    }

    #[test]
    fn canonical_names_test() {
        let mut completion = Completion::new(group(), &[], CompletionConfig::default());
        let (s, t) = completion.canonical(&f(v("y'"), v("q")), &i(v("y'")));
        assert_eq!((s, t), (f(v("x"), v("y")), i(v("x"))));

        let sig = Signature::new(&[("x", 0), ("g", 1)], &["p"]).expect("signature");
        let mut completion = Completion::new(sig, &[], CompletionConfig::default());
        let (s, _) = completion.canonical(&Term::app("g", vec![v("p")]), &v("p"));
        assert_eq!(s, Term::app("g", vec![v("y")]));
        assert!(completion.sig.is_variable("y"));
    }

    #[test]
    fn trivial_identity_is_dropped_test() {
        let identity = (f(v("x"), v("y")), f(v("x"), v("y")));
        let mut completion = Completion::new(group(), &[identity], CompletionConfig::default());
        completion.step();
        assert_eq!(completion.rules().len(), 0);
        assert_eq!(
            completion.trace().events(),
            &[Event::IdentityDropped(f(v("x"), v("y")), f(v("x"), v("y")))]
        );
        assert_eq!(completion.step(), &State::Converged);
    }

    #[test]
    fn commutativity_fails_test() {
        let result = complete(
            &group(),
            &[(f(v("x"), v("y")), f(v("y"), v("x")))],
            &CompletionConfig::default(),
        );
        assert_eq!(
            result.state,
            State::Failed(OrderingIncomparable {
                lhs: f(v("x"), v("y")),
                rhs: f(v("y"), v("x")),
            })
        );
        assert!(!result.is_success());
    }

    #[test]
    fn step_budget_test() {
        let config = CompletionConfig {
            max_steps: 3,
            ..CompletionConfig::default()
        };
        let result = complete(&group(), &axioms(), &config);
        assert_eq!(result.state, State::Diverged);
        assert_eq!(result.steps, 3);
        assert_eq!(result.rules.len(), 3);
    }

    #[test]
    fn retraction_test() {
        // i(i(x)) -> x reduces the left side of f(i(i(x)), e) -> x
        let mut completion = Completion::new(
            group(),
            &[(f(i(i(v("x"))), e()), v("x")), (i(i(v("x"))), v("x"))],
            CompletionConfig::default(),
        );
        completion.step();
        completion.step();
        assert_eq!(completion.rules().rules, vec![Rule::new(i(i(v("x"))), v("x"))]);
        assert_eq!(
            completion.identities().cloned().collect::<Vec<_>>(),
            vec![(f(i(i(v("x"))), e()), v("x"))]
        );
        // the retracted rule comes back normalized
        completion.step();
        assert_eq!(completion.rules().len(), 2);
        assert!(completion.rules().contains(&f(v("x"), e()), &v("x")));
    }

    #[test]
    fn simplification_test() {
        let mut completion = Completion::new(
            group(),
            &[(i(f(i(v("x")), e())), i(i(v("x")))), (i(i(v("x"))), v("x"))],
            CompletionConfig::default(),
        );
        completion.step();
        completion.step();
        assert_eq!(
            completion.rules().rules,
            vec![
                Rule::new(i(f(i(v("x")), e())), v("x")),
                Rule::new(i(i(v("x"))), v("x")),
            ]
        );
        match &completion.trace()[1] {
            Event::RuleSimplified { new, .. } => assert_eq!(new.rhs, v("x")),
            event => panic!("unexpected event {}", event),
        }
    }

    #[test]
    fn config_default_test() {
        let config = CompletionConfig::default();
        assert_eq!(config.max_steps, 100_000);
        assert_eq!(config.unification_budget, 10_000);
    }
}
