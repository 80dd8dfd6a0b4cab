use super::{Arity, Atom, Operator, Rank, Variable};
use serde_derive::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// The two kinds of symbol a [`Signature`] can declare.
///
/// [`Signature`]: struct.Signature.html
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SymbolKind {
    Function,
    Variable,
}
impl fmt::Display for SymbolKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SymbolKind::Function => write!(f, "function"),
            SymbolKind::Variable => write!(f, "variable"),
        }
    }
}

/// The ways editing a [`Signature`] can fail.
///
/// [`Signature`]: struct.Signature.html
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignatureError {
    /// The name is already declared as a symbol of the other kind.
    #[error("`{name}` is already a {existing} and cannot also be a {requested}")]
    Conflict {
        name: String,
        existing: SymbolKind,
        requested: SymbolKind,
    },
    #[error("{kind} `{name}` is already defined")]
    AlreadyDefined { name: String, kind: SymbolKind },
    #[error("unknown {kind} `{name}`")]
    Unknown { name: String, kind: SymbolKind },
}

/// How a [`Signature`] derives the precedence of its function symbols.
///
/// [`Signature`]: struct.Signature.html
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PrecedenceScheme {
    /// Larger arity ranks higher; ties are broken by registration order, later ranking higher.
    AscendingArity,
    /// Later registration ranks higher.
    Registration,
    /// Function names listed from least to greatest. Functions not listed rank below every
    /// listed one, ordered among themselves as in `AscendingArity`.
    Explicit(Vec<String>),
}
impl Default for PrecedenceScheme {
    fn default() -> PrecedenceScheme {
        PrecedenceScheme::AscendingArity
    }
}

/// Records a universe of symbols: function symbols with their arities, variables, and a total
/// precedence over the function symbols.
///
/// A name is never simultaneously a function and a variable.
///
/// Use [`Signature::default`] for a blank `Signature`, or [`Signature::new`] to initialize a
/// `Signature` with given functions and variables.
///
/// [`Signature::default`]: #method.default
/// [`Signature::new`]: #method.new
///
/// # Examples
///
/// ```
/// # use term_completion::Signature;
/// // Constructing a Signature using the default
/// let mut sig1 = Signature::default();
/// sig1.new_op("f", 2).expect("new function f");
/// sig1.new_op("e", 0).expect("new function e");
/// sig1.new_var("x").expect("new variable x");
///
/// // Constructing a Signature using Signature::new
/// let sig2 = Signature::new(&[("f", 2), ("e", 0)], &["x"]).expect("signature");
///
/// assert_eq!(sig1, sig2);
///
/// // names cannot be shared between functions and variables
/// assert!(sig1.new_var("f").is_err());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signature {
    /// Stores the (name, arity) for every function, in registration order.
    pub(crate) operators: Vec<(String, Arity)>,
    /// Stores the name for every variable, in registration order.
    pub(crate) variables: Vec<String>,
    pub(crate) scheme: PrecedenceScheme,
}
impl Signature {
    /// Construct a `Signature` with the given functions, each specified as `(name, arity)`,
    /// and the given variables.
    ///
    /// # Examples
    ///
    /// ```
    /// # use term_completion::{Signature, SignatureError, SymbolKind};
    /// let sig = Signature::new(&[("f", 2), ("i", 1), ("e", 0)], &["x", "y"])
    ///     .expect("signature");
    ///
    /// assert_eq!(sig.arity("i"), Some(1));
    /// assert!(sig.is_variable("y"));
    ///
    /// assert_eq!(
    ///     Signature::new(&[("f", 2)], &["f"]),
    ///     Err(SignatureError::Conflict {
    ///         name: "f".to_string(),
    ///         existing: SymbolKind::Function,
    ///         requested: SymbolKind::Variable,
    ///     })
    /// );
    /// ```
    pub fn new(functions: &[(&str, Arity)], variables: &[&str]) -> Result<Self, SignatureError> {
        let mut sig = Signature::default();
        for &(name, arity) in functions {
            sig.new_op(name, arity)?;
        }
        for &name in variables {
            sig.new_var(name)?;
        }
        Ok(sig)
    }
    /// Returns every [`Operator`] known to the `Signature`, in the order they were created.
    ///
    /// [`Operator`]: struct.Operator.html
    pub fn operators(&self) -> Vec<Operator> {
        self.operators
            .iter()
            .map(|(name, _)| Operator::new(name.as_str()))
            .collect()
    }
    /// Returns every function as `(name, arity)`, in the order they were created.
    pub fn functions(&self) -> &[(String, Arity)] {
        &self.operators
    }
    /// Returns every [`Variable`] known to the `Signature`, in the order they were created.
    ///
    /// [`Variable`]: struct.Variable.html
    pub fn variables(&self) -> Vec<Variable> {
        self.variables
            .iter()
            .map(|name| Variable::new(name.as_str()))
            .collect()
    }
    /// Returns every [`Atom`] known to the `Signature`.
    ///
    /// [`Atom`]: enum.Atom.html
    pub fn atoms(&self) -> Vec<Atom> {
        let vars = self.variables().into_iter().map(Atom::Variable);
        let ops = self.operators().into_iter().map(Atom::Operator);
        vars.chain(ops).collect()
    }
    /// The arity of the function `name`, if it is one.
    pub fn arity(&self, name: &str) -> Option<Arity> {
        self.operators
            .iter()
            .find(|(n, _)| n == name)
            .map(|&(_, arity)| arity)
    }
    pub fn is_function(&self, name: &str) -> bool {
        self.operators.iter().any(|(n, _)| n == name)
    }
    pub fn is_variable(&self, name: &str) -> bool {
        self.variables.iter().any(|n| n == name)
    }
    /// What kind of symbol `name` is, if it is declared at all.
    pub fn kind(&self, name: &str) -> Option<SymbolKind> {
        if self.is_function(name) {
            Some(SymbolKind::Function)
        } else if self.is_variable(name) {
            Some(SymbolKind::Variable)
        } else {
            None
        }
    }
    /// Returns the [`Operator`] called `name`, if the `Signature` declares one.
    ///
    /// [`Operator`]: struct.Operator.html
    pub fn has_op(&self, name: &str) -> Option<Operator> {
        if self.is_function(name) {
            Some(Operator::new(name))
        } else {
            None
        }
    }
    /// Declare a new function `name` of the given `arity`.
    pub fn new_op(&mut self, name: &str, arity: Arity) -> Result<Operator, SignatureError> {
        self.check_free(name, SymbolKind::Function)?;
        self.operators.push((name.to_string(), arity));
        Ok(Operator::new(name))
    }
    /// Declare a new variable `name`.
    pub fn new_var(&mut self, name: &str) -> Result<Variable, SignatureError> {
        self.check_free(name, SymbolKind::Variable)?;
        self.variables.push(name.to_string());
        Ok(Variable::new(name))
    }
    /// Declare the variable `name` unless it is already declared.
    pub fn ensure_var(&mut self, name: &str) -> Result<Variable, SignatureError> {
        if self.is_variable(name) {
            Ok(Variable::new(name))
        } else {
            self.new_var(name)
        }
    }
    /// Generate a variable by appending `'` to `base` until the name is neither a function nor
    /// `taken`, and register it.
    ///
    /// # Examples
    ///
    /// ```
    /// # use term_completion::Signature;
    /// let mut sig = Signature::new(&[("f", 2)], &["x", "y"]).expect("signature");
    ///
    /// let fresh = sig.fresh_var("x", |name| name == "x" || name == "x'");
    ///
    /// assert_eq!(fresh.name(), "x''");
    /// assert!(sig.is_variable("x''"));
    /// ```
    pub fn fresh_var<F>(&mut self, base: &str, taken: F) -> Variable
    where
        F: Fn(&str) -> bool,
    {
        let mut name = format!("{}'", base);
        while self.is_function(&name) || taken(&name) {
            name.push('\'');
        }
        if !self.is_variable(&name) {
            self.variables.push(name.clone());
        }
        Variable::new(name)
    }
    /// Rename the function `old` to `new`, keeping its arity and precedence slot.
    pub fn rename_op(&mut self, old: &str, new: &str) -> Result<Operator, SignatureError> {
        let idx = self.op_index(old)?;
        if old != new {
            self.check_free(new, SymbolKind::Function)?;
        }
        self.operators[idx].0 = new.to_string();
        if let PrecedenceScheme::Explicit(ref mut names) = self.scheme {
            for name in names.iter_mut().filter(|n| n.as_str() == old) {
                *name = new.to_string();
            }
        }
        Ok(Operator::new(new))
    }
    /// Change the arity of the function `name`.
    pub fn set_arity(&mut self, name: &str, arity: Arity) -> Result<(), SignatureError> {
        let idx = self.op_index(name)?;
        self.operators[idx].1 = arity;
        Ok(())
    }
    /// Remove the function `name`, returning its arity.
    pub fn remove_op(&mut self, name: &str) -> Result<Arity, SignatureError> {
        let idx = self.op_index(name)?;
        let (_, arity) = self.operators.remove(idx);
        if let PrecedenceScheme::Explicit(ref mut names) = self.scheme {
            names.retain(|n| n != name);
        }
        Ok(arity)
    }
    /// Rename the variable `old` to `new`.
    pub fn rename_var(&mut self, old: &str, new: &str) -> Result<Variable, SignatureError> {
        let idx = self.var_index(old)?;
        if old != new {
            self.check_free(new, SymbolKind::Variable)?;
        }
        self.variables[idx] = new.to_string();
        Ok(Variable::new(new))
    }
    /// Remove the variable `name`.
    pub fn remove_var(&mut self, name: &str) -> Result<(), SignatureError> {
        let idx = self.var_index(name)?;
        self.variables.remove(idx);
        Ok(())
    }
    /// Replace every function, failing without changes on duplicates or on names that are
    /// variables.
    pub fn set_functions(&mut self, functions: Vec<(String, Arity)>) -> Result<(), SignatureError> {
        let mut next = Signature {
            operators: vec![],
            variables: self.variables.clone(),
            scheme: self.scheme.clone(),
        };
        for (name, arity) in functions {
            next.new_op(&name, arity)?;
        }
        if let PrecedenceScheme::Explicit(ref mut names) = next.scheme {
            let known: Vec<String> = next.operators.iter().map(|(n, _)| n.clone()).collect();
            names.retain(|n| known.contains(n));
        }
        *self = next;
        Ok(())
    }
    /// Replace every variable, failing without changes on duplicates or on names that are
    /// functions.
    pub fn set_variables(&mut self, variables: Vec<String>) -> Result<(), SignatureError> {
        let mut next = Signature {
            operators: self.operators.clone(),
            variables: vec![],
            scheme: self.scheme.clone(),
        };
        for name in variables {
            next.new_var(&name)?;
        }
        *self = next;
        Ok(())
    }
    pub fn scheme(&self) -> &PrecedenceScheme {
        &self.scheme
    }
    pub fn set_scheme(&mut self, scheme: PrecedenceScheme) {
        self.scheme = scheme;
    }
    /// Fix the precedence explicitly, listing function names from least to greatest.
    ///
    /// # Examples
    ///
    /// ```
    /// # use term_completion::{Operator, Signature};
    /// let mut sig = Signature::new(&[("f", 2), ("i", 1), ("e", 0)], &[]).expect("signature");
    ///
    /// // by default, larger arity means higher precedence
    /// assert!(sig.rank(&Operator::new("f")) > sig.rank(&Operator::new("i")));
    ///
    /// sig.set_precedence(&["e", "f", "i"]).expect("precedence");
    /// assert!(sig.rank(&Operator::new("i")) > sig.rank(&Operator::new("f")));
    /// assert!(sig.rank(&Operator::new("f")) > sig.rank(&Operator::new("e")));
    ///
    /// assert!(sig.set_precedence(&["g"]).is_err());
    /// ```
    pub fn set_precedence(&mut self, order: &[&str]) -> Result<(), SignatureError> {
        for name in order {
            self.op_index(name)?;
        }
        self.scheme = PrecedenceScheme::Explicit(order.iter().map(|n| n.to_string()).collect());
        Ok(())
    }
    /// Every function with its rank, from least to greatest.
    ///
    /// # Examples
    ///
    /// ```
    /// # use term_completion::{Operator, Signature};
    /// let sig = Signature::new(&[("f", 2), ("e", 0), ("i", 1), ("c", 0)], &["x"])
    ///     .expect("signature");
    ///
    /// let names: Vec<String> = sig.precedence().iter().map(|(op, _)| op.to_string()).collect();
    ///
    /// assert_eq!(names, vec!["e", "c", "i", "f"]);
    /// ```
    pub fn precedence(&self) -> Vec<(Operator, Rank)> {
        let mut order: Vec<usize> = (0..self.operators.len()).collect();
        match self.scheme {
            PrecedenceScheme::Registration => (),
            PrecedenceScheme::AscendingArity => order.sort_by_key(|&i| self.operators[i].1),
            PrecedenceScheme::Explicit(ref names) => order.sort_by_key(|&i| {
                let (ref name, arity) = self.operators[i];
                (names.iter().position(|n| n == name), arity)
            }),
        }
        order
            .into_iter()
            .enumerate()
            .map(|(rank, i)| (Operator::new(self.operators[i].0.as_str()), rank))
            .collect()
    }
    /// The rank of `op` in the precedence, if `op` is declared.
    pub fn rank(&self, op: &Operator) -> Option<Rank> {
        self.precedence()
            .into_iter()
            .find(|(o, _)| o == op)
            .map(|(_, rank)| rank)
    }
    fn check_free(&self, name: &str, requested: SymbolKind) -> Result<(), SignatureError> {
        match self.kind(name) {
            None => Ok(()),
            Some(existing) if existing == requested => Err(SignatureError::AlreadyDefined {
                name: name.to_string(),
                kind: existing,
            }),
            Some(existing) => Err(SignatureError::Conflict {
                name: name.to_string(),
                existing,
                requested,
            }),
        }
    }
    fn op_index(&self, name: &str) -> Result<usize, SignatureError> {
        self.operators
            .iter()
            .position(|(n, _)| n == name)
            .ok_or_else(|| SignatureError::Unknown {
                name: name.to_string(),
                kind: SymbolKind::Function,
            })
    }
    fn var_index(&self, name: &str) -> Result<usize, SignatureError> {
        self.variables
            .iter()
            .position(|n| n == name)
            .ok_or_else(|| SignatureError::Unknown {
                name: name.to_string(),
                kind: SymbolKind::Variable,
            })
    }
}
