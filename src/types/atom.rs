use serde_derive::{Deserialize, Serialize};
use std::fmt;

/// A symbol for an unspecified term, identified by its name.
///
/// A `Variable` only carries meaning alongside a [`Signature`] that declares it.
///
/// [`Signature`]: struct.Signature.html
///
/// # Examples
///
/// ```
/// # use term_completion::Variable;
/// let x = Variable::new("x");
///
/// assert_eq!(x.name(), "x");
/// assert_eq!(x.to_string(), "x");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Variable(String);
impl Variable {
    pub fn new<S: Into<String>>(name: S) -> Variable {
        Variable(name.into())
    }
    pub fn name(&self) -> &str {
        &self.0
    }
}
impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A function symbol, identified by its name.
///
/// The arity of an `Operator` lives in the [`Signature`]; a well-formed [`Term`] always applies
/// an `Operator` to exactly that many arguments.
///
/// [`Signature`]: struct.Signature.html
/// [`Term`]: enum.Term.html
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Operator(String);
impl Operator {
    pub fn new<S: Into<String>>(name: S) -> Operator {
        Operator(name.into())
    }
    pub fn name(&self) -> &str {
        &self.0
    }
}
impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// `Atom`s are the parts of a [`Term`] that are not constructed from smaller parts:
/// [`Variable`]s and [`Operator`]s.
///
/// [`Term`]: enum.Term.html
/// [`Variable`]: struct.Variable.html
/// [`Operator`]: struct.Operator.html
///
/// # Examples
///
/// ```
/// # use term_completion::{Atom, Operator, Variable};
/// let x = Atom::Variable(Variable::new("x"));
/// let f = Atom::Operator(Operator::new("f"));
///
/// assert_eq!(x.name(), "x");
/// assert_eq!(f.to_string(), "f");
/// assert!(x.is_variable());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Atom {
    /// The [`Variable`] variant of an `Atom`.
    ///
    /// [`Variable`]: struct.Variable.html
    Variable(Variable),
    /// The [`Operator`] variant of an `Atom`.
    ///
    /// [`Operator`]: struct.Operator.html
    Operator(Operator),
}
impl Atom {
    pub fn name(&self) -> &str {
        match self {
            Atom::Variable(v) => v.name(),
            Atom::Operator(op) => op.name(),
        }
    }
    pub fn is_variable(&self) -> bool {
        match self {
            Atom::Variable(_) => true,
            Atom::Operator(_) => false,
        }
    }
}
impl From<Variable> for Atom {
    fn from(var: Variable) -> Atom {
        Atom::Variable(var)
    }
}
impl From<Operator> for Atom {
    fn from(op: Operator) -> Atom {
        Atom::Operator(op)
    }
}
impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
