use super::{Atom, Operator, Position, Signature, Substitution, Variable};
use itertools::Itertools;
use smallvec::{smallvec, SmallVec};
use std::collections::HashMap;
use std::{fmt, iter};
use thiserror::Error;

/// The ways addressing a subterm by [`Position`] can fail.
///
/// [`Position`]: type.Position.html
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PositionError {
    /// The index is 0 or exceeds the number of arguments at that depth.
    #[error("index {index} is out of range for {arity} arguments at depth {depth}")]
    OutOfRange {
        index: usize,
        arity: usize,
        depth: usize,
    },
    /// The path continues past a leaf.
    #[error("position continues past a leaf at depth {depth}")]
    TooDeep { depth: usize },
}

/// Render a [`Position`] as dot-separated indices, or `ε` for the root.
///
/// [`Position`]: type.Position.html
///
/// # Examples
///
/// ```
/// # use term_completion::display_position;
/// assert_eq!(display_position(&[]), "ε");
/// assert_eq!(display_position(&[2, 1]), "2.1");
/// ```
pub fn display_position(position: &[usize]) -> String {
    if position.is_empty() {
        "ε".to_string()
    } else {
        position.iter().join(".")
    }
}

/// Iterates over every [`Variable`] occurrence of a [`Term`], left to right.
///
/// [`Variable`]: struct.Variable.html
/// [`Term`]: enum.Term.html
pub struct Variables<'a> {
    stack: SmallVec<[&'a Term; 32]>,
}
impl<'a> Variables<'a> {
    pub(crate) fn new(term: &'a Term) -> Self {
        Variables {
            stack: smallvec![term],
        }
    }
}
impl<'a> Iterator for Variables<'a> {
    type Item = &'a Variable;
    fn next(&mut self) -> Option<Self::Item> {
        while let Some(term) = self.stack.pop() {
            match term {
                Term::Variable(v) => return Some(v),
                Term::Application { ref args, .. } => {
                    for arg in args.iter().rev() {
                        self.stack.push(arg);
                    }
                }
            }
        }
        None
    }
}

/// A preorder traversal of a [`Term`]'s subterms.
///
/// [`Term`]: enum.Term.html
pub struct Preorder<'a> {
    stack: SmallVec<[(&'a Term, usize); 32]>,
}
impl<'a> Preorder<'a> {
    pub(crate) fn new(term: &'a Term) -> Self {
        let mut stack = SmallVec::with_capacity(term.height());
        stack.push((term, 0));
        Preorder { stack }
    }
}
impl<'a> Iterator for Preorder<'a> {
    type Item = &'a Term;
    fn next(&mut self) -> Option<Self::Item> {
        while let Some((term, arg)) = self.stack.pop() {
            match term {
                Term::Variable(_) => return Some(term),
                Term::Application { ref args, .. } => {
                    if arg < args.len() {
                        self.stack.push((term, arg + 1));
                        self.stack.push((&args[arg], 0));
                    }
                    if arg == 0 {
                        return Some(term);
                    }
                }
            }
        }
        None
    }
}

/// A first-order term: either a [`Variable`] or an [`Operator`] applied to as many arguments
/// as its arity.
///
/// [`Variable`]: struct.Variable.html
/// [`Operator`]: struct.Operator.html
///
/// # Examples
///
/// ```
/// # use term_completion::{Signature, Term, parse_term};
/// let sig = Signature::new(&[("f", 2), ("e", 0)], &["x"]).expect("signature");
///
/// let constructed = Term::app("f", vec![Term::var("x"), Term::app("e", vec![])]);
/// let parsed = parse_term(&sig, "f(x, e)").expect("parse of f(x, e)");
///
/// assert_eq!(parsed, constructed);
/// assert_eq!(parsed.to_string(), "f(x, e)");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Term {
    /// A concrete but unspecified `Term` (e.g. `x`, `y`).
    Variable(Variable),
    /// An [`Operator`] applied to zero or more `Term`s (e.g. `f(x, y)`, `e`).
    ///
    /// An application of an arity-0 [`Operator`] is a constant and prints without parentheses.
    ///
    /// [`Operator`]: struct.Operator.html
    Application { op: Operator, args: Vec<Term> },
}
impl Term {
    /// A variable term, without consulting a [`Signature`].
    ///
    /// [`Signature`]: struct.Signature.html
    pub fn var<S: Into<String>>(name: S) -> Term {
        Term::Variable(Variable::new(name))
    }
    /// An application term, without consulting a [`Signature`]. Use [`Term::apply`] to check
    /// the arity.
    ///
    /// [`Signature`]: struct.Signature.html
    /// [`Term::apply`]: #method.apply
    pub fn app<S: Into<String>>(name: S, args: Vec<Term>) -> Term {
        Term::Application {
            op: Operator::new(name),
            args,
        }
    }
    /// Apply `op` to `args` if `op` is declared with exactly that many arguments.
    ///
    /// # Examples
    ///
    /// ```
    /// # use term_completion::{Operator, Signature, Term};
    /// let sig = Signature::new(&[("i", 1)], &["x"]).expect("signature");
    /// let i = Operator::new("i");
    ///
    /// assert!(Term::apply(i.clone(), vec![Term::var("x")], &sig).is_some());
    /// assert!(Term::apply(i, vec![], &sig).is_none());
    /// ```
    pub fn apply(op: Operator, args: Vec<Term>, sig: &Signature) -> Option<Term> {
        if sig.arity(op.name()) == Some(args.len()) {
            Some(Term::Application { op, args })
        } else {
            None
        }
    }
    pub fn as_application(&self) -> Option<(&Operator, &[Term])> {
        match self {
            Term::Variable(_) => None,
            Term::Application { ref op, ref args } => Some((op, args)),
        }
    }
    pub fn is_variable(&self) -> bool {
        match self {
            Term::Variable(_) => true,
            Term::Application { .. } => false,
        }
    }
    /// `true` if the `Term` contains no [`Variable`]s.
    ///
    /// [`Variable`]: struct.Variable.html
    pub fn is_ground(&self) -> bool {
        self.all_variables().next().is_none()
    }
    /// The [`Atom`] at the root of the `Term`.
    ///
    /// [`Atom`]: enum.Atom.html
    pub fn head(&self) -> Atom {
        match self {
            Term::Variable(v) => Atom::Variable(v.clone()),
            Term::Application { op, .. } => Atom::Operator(op.clone()),
        }
    }
    /// The arguments of the `Term`; empty for variables and constants.
    pub fn args(&self) -> &[Term] {
        match self {
            Term::Variable(_) => &[],
            Term::Application { ref args, .. } => args,
        }
    }
    /// Returns an iterator performing a preorder traversal of the `Term`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use term_completion::{Signature, parse_term};
    /// let sig = Signature::new(&[("f", 2), ("i", 1)], &["x", "y"]).expect("signature");
    /// let term = parse_term(&sig, "f(i(x), y)").expect("parsed term");
    ///
    /// let preorder: Vec<String> = term.preorder().map(|t| t.to_string()).collect();
    /// assert_eq!(preorder, vec!["f(i(x), y)", "i(x)", "x", "y"]);
    /// ```
    pub fn preorder(&self) -> Preorder {
        Preorder::new(self)
    }
    /// Every symbol occurrence of the `Term` in preorder, repeats included: the flattened symbol
    /// list of the printed term.
    ///
    /// # Examples
    ///
    /// ```
    /// # use term_completion::{Signature, parse_term};
    /// let sig = Signature::new(&[("f", 2), ("i", 1)], &["x"]).expect("signature");
    /// let term = parse_term(&sig, "f(x, i(x))").expect("parsed term");
    ///
    /// let atoms: Vec<String> = term.atoms().iter().map(|a| a.to_string()).collect();
    /// assert_eq!(atoms, vec!["f", "x", "i", "x"]);
    /// ```
    pub fn atoms(&self) -> Vec<Atom> {
        self.preorder().map(Term::head).collect()
    }
    /// Every [`Variable`] used in the `Term`, once each, in order of first occurrence.
    ///
    /// [`Variable`]: struct.Variable.html
    ///
    /// # Examples
    ///
    /// ```
    /// # use term_completion::{Signature, Variable, parse_term};
    /// let sig = Signature::new(&[("f", 2)], &["x", "y"]).expect("signature");
    /// let term = parse_term(&sig, "f(f(y, x), y)").expect("parsed term");
    ///
    /// assert_eq!(term.variables(), vec![Variable::new("y"), Variable::new("x")]);
    /// ```
    pub fn variables(&self) -> Vec<Variable> {
        self.all_variables().unique().cloned().collect()
    }
    /// An iterator over every [`Variable`] occurrence, repeats included.
    ///
    /// [`Variable`]: struct.Variable.html
    pub fn all_variables(&self) -> Variables {
        Variables::new(self)
    }
    /// Every [`Operator`] used in the `Term`, once each, in order of first occurrence.
    ///
    /// [`Operator`]: struct.Operator.html
    pub fn operators(&self) -> Vec<Operator> {
        self.preorder()
            .filter_map(|t| t.as_application().map(|(op, _)| op))
            .unique()
            .cloned()
            .collect()
    }
    pub fn contains_variable(&self, var: &Variable) -> bool {
        self.all_variables().any(|v| v == var)
    }
    /// `true` if any symbol of the `Term` is called `name`.
    pub fn mentions(&self, name: &str) -> bool {
        self.preorder().any(|t| match t {
            Term::Variable(v) => v.name() == name,
            Term::Application { op, .. } => op.name() == name,
        })
    }
    /// Every subterm of the `Term` together with its [`Position`], in preorder.
    ///
    /// [`Position`]: type.Position.html
    ///
    /// # Examples
    ///
    /// ```
    /// # use term_completion::{Signature, Term, parse_term};
    /// let sig = Signature::new(&[("f", 2), ("e", 0)], &["x"]).expect("signature");
    /// let term = parse_term(&sig, "f(x, e)").expect("parsed term");
    ///
    /// let subterms: Vec<(String, Vec<usize>)> = term
    ///     .subterms()
    ///     .into_iter()
    ///     .map(|(t, p)| (t.to_string(), p))
    ///     .collect();
    ///
    /// assert_eq!(
    ///     subterms,
    ///     vec![
    ///         ("f(x, e)".to_string(), vec![]),
    ///         ("x".to_string(), vec![1]),
    ///         ("e".to_string(), vec![2]),
    ///     ]
    /// );
    /// ```
    pub fn subterms(&self) -> Vec<(&Term, Position)> {
        match *self {
            Term::Variable(_) => vec![(self, vec![])],
            Term::Application { ref args, .. } => {
                let here = iter::once((self, vec![]));
                let subterms = args.iter().enumerate().flat_map(|(i, arg)| {
                    arg.subterms().into_iter().map(move |(t, p)| {
                        let mut a = vec![i + 1];
                        a.extend(p);
                        (t, a)
                    })
                });
                here.chain(subterms).collect()
            }
        }
    }
    /// The [`Position`]s of every application (constants included) in preorder.
    ///
    /// [`Position`]: type.Position.html
    pub fn function_positions(&self) -> Vec<Position> {
        self.subterms()
            .into_iter()
            .filter(|(t, _)| !t.is_variable())
            .map(|(_, p)| p)
            .collect()
    }
    /// The [`Position`] of the symbol at `index` in the flattened symbol list (see
    /// [`Term::atoms`]), where index 0 is the root.
    ///
    /// [`Position`]: type.Position.html
    /// [`Term::atoms`]: #method.atoms
    ///
    /// # Examples
    ///
    /// ```
    /// # use term_completion::{Signature, parse_term};
    /// let sig = Signature::new(&[("f", 2), ("i", 1)], &["x", "y"]).expect("signature");
    /// let term = parse_term(&sig, "f(i(x), y)").expect("parsed term");
    ///
    /// assert_eq!(term.position_of(0), Some(vec![]));
    /// assert_eq!(term.position_of(2), Some(vec![1, 1]));
    /// assert_eq!(term.position_of(3), Some(vec![2]));
    /// assert_eq!(term.position_of(4), None);
    /// ```
    pub fn position_of(&self, index: usize) -> Option<Position> {
        self.subterms().into_iter().nth(index).map(|(_, p)| p)
    }
    /// The number of nodes in the `Term`.
    pub fn size(&self) -> usize {
        self.preorder().count()
    }
    /// The length of the longest path from the root to a leaf, counting nodes.
    pub fn height(&self) -> usize {
        match *self {
            Term::Variable(_) => 1,
            Term::Application { ref args, .. } => {
                1 + args.iter().map(Term::height).max().unwrap_or(0)
            }
        }
    }
    /// The subterm at the given [`Position`].
    ///
    /// [`Position`]: type.Position.html
    ///
    /// # Examples
    ///
    /// ```
    /// # use term_completion::{PositionError, Signature, Term, parse_term};
    /// let sig = Signature::new(&[("f", 2), ("i", 1)], &["x", "y"]).expect("signature");
    /// let term = parse_term(&sig, "f(i(x), y)").expect("parsed term");
    ///
    /// assert_eq!(term.at(&[1, 1]), Ok(&Term::var("x")));
    /// assert_eq!(
    ///     term.at(&[3]),
    ///     Err(PositionError::OutOfRange { index: 3, arity: 2, depth: 0 })
    /// );
    /// assert_eq!(term.at(&[2, 1]), Err(PositionError::TooDeep { depth: 1 }));
    /// ```
    pub fn at(&self, position: &[usize]) -> Result<&Term, PositionError> {
        let mut term = self;
        for (depth, &index) in position.iter().enumerate() {
            term = term.arg(index, depth)?;
        }
        Ok(term)
    }
    /// A copy of the `Term` where the subterm at the given [`Position`] is replaced with
    /// `subterm`. The empty position replaces the whole `Term`.
    ///
    /// [`Position`]: type.Position.html
    ///
    /// # Examples
    ///
    /// ```
    /// # use term_completion::{Signature, parse_term};
    /// let sig = Signature::new(&[("f", 2), ("e", 0)], &["x", "y"]).expect("signature");
    /// let term = parse_term(&sig, "f(x, y)").expect("parsed term");
    /// let e = parse_term(&sig, "e").expect("parsed term");
    ///
    /// let replaced = term.replace(&[2], e).expect("replacement");
    ///
    /// assert_eq!(replaced.to_string(), "f(x, e)");
    /// assert_eq!(term.to_string(), "f(x, y)");
    /// ```
    pub fn replace(&self, position: &[usize], subterm: Term) -> Result<Term, PositionError> {
        self.replace_from(position, subterm, 0)
    }
    fn replace_from(
        &self,
        position: &[usize],
        subterm: Term,
        depth: usize,
    ) -> Result<Term, PositionError> {
        match position.split_first() {
            None => Ok(subterm),
            Some((&index, rest)) => {
                let new_arg = self.arg(index, depth)?.replace_from(rest, subterm, depth + 1)?;
                match self {
                    Term::Application { op, args } => {
                        let mut new_args = args.clone();
                        new_args[index - 1] = new_arg;
                        Ok(Term::Application {
                            op: op.clone(),
                            args: new_args,
                        })
                    }
                    Term::Variable(_) => Err(PositionError::TooDeep { depth }),
                }
            }
        }
    }
    /// the 1-based argument `index`, found at `depth`.
    fn arg(&self, index: usize, depth: usize) -> Result<&Term, PositionError> {
        match self {
            Term::Application { args, .. } if !args.is_empty() => {
                if index == 0 || index > args.len() {
                    Err(PositionError::OutOfRange {
                        index,
                        arity: args.len(),
                        depth,
                    })
                } else {
                    Ok(&args[index - 1])
                }
            }
            _ => Err(PositionError::TooDeep { depth }),
        }
    }
    /// Apply a [`Substitution`] simultaneously to every [`Variable`] of the `Term`.
    ///
    /// [`Substitution`]: struct.Substitution.html
    /// [`Variable`]: struct.Variable.html
    ///
    /// # Examples
    ///
    /// ```
    /// # use term_completion::{Signature, Substitution, Term, Variable, parse_term};
    /// let sig = Signature::new(&[("f", 2)], &["x", "y"]).expect("signature");
    /// let term = parse_term(&sig, "f(x, y)").expect("parsed term");
    ///
    /// // a swap only works if the bindings are applied simultaneously
    /// let mut sub = Substitution::default();
    /// sub.insert(Variable::new("x"), Term::var("y"));
    /// sub.insert(Variable::new("y"), Term::var("x"));
    ///
    /// assert_eq!(term.substitute(&sub).to_string(), "f(y, x)");
    /// ```
    pub fn substitute(&self, sub: &Substitution) -> Term {
        match *self {
            Term::Variable(ref v) => sub.get(v).cloned().unwrap_or_else(|| self.clone()),
            Term::Application { ref op, ref args } => Term::Application {
                op: op.clone(),
                args: args.iter().map(|arg| arg.substitute(sub)).collect(),
            },
        }
    }
    /// Rename [`Variable`]s according to `map`, leaving unmapped ones alone.
    ///
    /// [`Variable`]: struct.Variable.html
    pub fn rename(&self, map: &HashMap<Variable, Variable>) -> Term {
        match *self {
            Term::Variable(ref v) => Term::Variable(map.get(v).unwrap_or(v).clone()),
            Term::Application { ref op, ref args } => Term::Application {
                op: op.clone(),
                args: args.iter().map(|arg| arg.rename(map)).collect(),
            },
        }
    }
    /// One-way matching: the [`Substitution`] σ over the variables of `pattern` with
    /// `σ(pattern) == term`, if any. Repeated variables in `pattern` must bind to identical
    /// subterms; variables of `term` are treated as constants.
    ///
    /// [`Substitution`]: struct.Substitution.html
    ///
    /// # Examples
    ///
    /// ```
    /// # use term_completion::{Signature, Term, Variable, parse_term};
    /// let sig = Signature::new(&[("f", 2), ("i", 1), ("e", 0)], &["x", "y"])
    ///     .expect("signature");
    /// let pattern = parse_term(&sig, "f(x, x)").expect("parsed pattern");
    ///
    /// let t1 = parse_term(&sig, "f(i(e), i(e))").expect("parsed term");
    /// let sub = Term::pmatch(&pattern, &t1).expect("match");
    /// assert_eq!(sub.get(&Variable::new("x")), Some(&parse_term(&sig, "i(e)").expect("parsed term")));
    ///
    /// let t2 = parse_term(&sig, "f(e, y)").expect("parsed term");
    /// assert_eq!(Term::pmatch(&pattern, &t2), None);
    /// ```
    pub fn pmatch(pattern: &Term, term: &Term) -> Option<Substitution> {
        let mut sub = Substitution::default();
        let mut stack: SmallVec<[(&Term, &Term); 32]> = smallvec![(pattern, term)];
        while let Some((p, t)) = stack.pop() {
            match (p, t) {
                (Term::Variable(v), _) => match sub.get(v) {
                    Some(bound) if bound != t => return None,
                    Some(_) => (),
                    None => sub.insert(v.clone(), t.clone()),
                },
                (
                    Term::Application {
                        op: ref h1,
                        args: ref a1,
                    },
                    Term::Application {
                        op: ref h2,
                        args: ref a2,
                    },
                ) if h1 == h2 && a1.len() == a2.len() => {
                    for pair in a1.iter().zip(a2.iter()) {
                        stack.push(pair);
                    }
                }
                _ => return None,
            }
        }
        Some(sub)
    }
}
impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Term::Variable(v) => write!(f, "{}", v),
            Term::Application { op, args } if args.is_empty() => write!(f, "{}", op),
            Term::Application { op, args } => write!(f, "{}({})", op, args.iter().join(", ")),
        }
    }
}
