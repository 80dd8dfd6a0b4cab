//! An in-memory store for one session: a [`Signature`], named terms and the equations to
//! complete.
//!
//! Terms are stored with the text they were parsed from. Editing the signature keeps them valid:
//! once an edit renames, removes or re-aritizes a symbol that some stored term mentions, every
//! stored term is deleted.
//!
//! [`Signature`]: ../struct.Signature.html
//!
//! # Examples
//!
//! ```
//! # use term_completion::store::Store;
//! # use term_completion::Signature;
//! let sig = Signature::new(&[("f", 2), ("e", 0)], &["x", "y"]).expect("signature");
//! let mut store = Store::new(sig);
//!
//! store.save_term("left", "f(e, x)").expect("saved term");
//! store.save_term("right", "f(x, e)").expect("saved term");
//! assert_eq!(store.load_all_terms().len(), 2);
//!
//! // `y` is unused, so removing it keeps the terms
//! store.remove_variable("y").expect("removed variable");
//! assert_eq!(store.load_all_terms().len(), 2);
//!
//! // `e` is used
//! store.rename_function("e", "one").expect("renamed function");
//! assert!(store.load_term("left").is_none());
//! ```

use super::completion::{complete, CompletionConfig, CompletionResult};
use super::parser::{parse_term, SyntaxError};
use super::types::{Arity, Operator, Rank, Signature, SignatureError, Term};
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::{debug, info};

/// The error type for [`Store`] operations.
///
/// [`Store`]: struct.Store.html
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error(transparent)]
    Signature(#[from] SignatureError),
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
    #[error("equation `{0} = {1}` is already stored")]
    DuplicateEquation(String, String),
    #[error("equation `{0} = {1}` is not stored")]
    MissingEquation(String, String),
}

/// A term together with the text it was parsed from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredTerm {
    pub source: String,
    pub term: Term,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Store {
    sig: Signature,
    terms: BTreeMap<String, StoredTerm>,
    equations: BTreeMap<String, Vec<String>>,
}
impl Store {
    pub fn new(sig: Signature) -> Store {
        Store {
            sig,
            ..Store::default()
        }
    }
    pub fn signature(&self) -> &Signature {
        &self.sig
    }

    // Signature

    pub fn functions(&self) -> &[(String, Arity)] {
        self.sig.functions()
    }
    /// Replace every function. Stored terms are purged if a function they mention disappears
    /// or changes arity.
    pub fn set_functions(&mut self, functions: Vec<(String, Arity)>) -> Result<(), StoreError> {
        let changed: Vec<String> = self
            .sig
            .functions()
            .iter()
            .filter(|old| !functions.contains(old))
            .map(|(name, _)| name.clone())
            .collect();
        self.sig.set_functions(functions)?;
        self.purge_mentions(&changed);
        Ok(())
    }
    pub fn add_function(&mut self, name: &str, arity: Arity) -> Result<Operator, StoreError> {
        Ok(self.sig.new_op(name, arity)?)
    }
    pub fn rename_function(&mut self, old: &str, new: &str) -> Result<Operator, StoreError> {
        let op = self.sig.rename_op(old, new)?;
        if old != new {
            self.purge_mentions(&[old]);
        }
        Ok(op)
    }
    pub fn set_arity(&mut self, name: &str, arity: Arity) -> Result<(), StoreError> {
        let unchanged = self.sig.arity(name) == Some(arity);
        self.sig.set_arity(name, arity)?;
        if !unchanged {
            self.purge_mentions(&[name]);
        }
        Ok(())
    }
    pub fn remove_function(&mut self, name: &str) -> Result<Arity, StoreError> {
        let arity = self.sig.remove_op(name)?;
        self.purge_mentions(&[name]);
        Ok(arity)
    }
    pub fn variables(&self) -> Vec<String> {
        self.sig
            .variables()
            .iter()
            .map(|v| v.name().to_string())
            .collect()
    }
    /// Replace every variable. Stored terms are purged if a variable they mention disappears.
    pub fn set_variables(&mut self, variables: Vec<String>) -> Result<(), StoreError> {
        let removed: Vec<String> = self
            .variables()
            .into_iter()
            .filter(|old| !variables.contains(old))
            .collect();
        self.sig.set_variables(variables)?;
        self.purge_mentions(&removed);
        Ok(())
    }
    pub fn add_variable(&mut self, name: &str) -> Result<(), StoreError> {
        self.sig.new_var(name)?;
        Ok(())
    }
    pub fn rename_variable(&mut self, old: &str, new: &str) -> Result<(), StoreError> {
        self.sig.rename_var(old, new)?;
        if old != new {
            self.purge_mentions(&[old]);
        }
        Ok(())
    }
    pub fn remove_variable(&mut self, name: &str) -> Result<(), StoreError> {
        self.sig.remove_var(name)?;
        self.purge_mentions(&[name]);
        Ok(())
    }
    /// Every function with its rank, from least to greatest, recomputed from the current
    /// functions.
    pub fn precedence(&self) -> Vec<(Operator, Rank)> {
        self.sig.precedence()
    }
    /// Fix the precedence explicitly, from least to greatest.
    pub fn set_precedence(&mut self, order: &[&str]) -> Result<(), StoreError> {
        Ok(self.sig.set_precedence(order)?)
    }

    // Terms

    /// Parse `source` and store it as `name`, replacing any term of that name.
    pub fn save_term(&mut self, name: &str, source: &str) -> Result<&Term, StoreError> {
        let term = parse_term(&self.sig, source)?;
        let stored = StoredTerm {
            source: source.to_string(),
            term,
        };
        self.terms.insert(name.to_string(), stored);
        Ok(&self.terms[name].term)
    }
    pub fn load_term(&self, name: &str) -> Option<&StoredTerm> {
        self.terms.get(name)
    }
    pub fn load_all_terms(&self) -> &BTreeMap<String, StoredTerm> {
        &self.terms
    }
    pub fn delete_all_terms(&mut self) {
        debug!(terms = self.terms.len(), "deleting stored terms");
        self.terms.clear();
    }

    // Equations

    /// Every equation, as each left side with the right sides it equals.
    pub fn equations(&self) -> &BTreeMap<String, Vec<String>> {
        &self.equations
    }
    /// Replace every equation. Each one must parse; on failure nothing changes.
    pub fn set_equations(
        &mut self,
        equations: BTreeMap<String, Vec<String>>,
    ) -> Result<(), StoreError> {
        for (lhs, rhss) in &equations {
            parse_term(&self.sig, lhs)?;
            for rhs in rhss {
                parse_term(&self.sig, rhs)?;
            }
        }
        self.equations = equations;
        Ok(())
    }
    /// Add `lhs = rhs`, which must parse and must not be stored yet.
    pub fn add_equation(&mut self, lhs: &str, rhs: &str) -> Result<(), StoreError> {
        parse_term(&self.sig, lhs)?;
        parse_term(&self.sig, rhs)?;
        let (lhs, rhs) = (lhs.trim().to_string(), rhs.trim().to_string());
        let rhss = self.equations.entry(lhs.clone()).or_insert_with(Vec::new);
        if rhss.contains(&rhs) {
            return Err(StoreError::DuplicateEquation(lhs, rhs));
        }
        rhss.push(rhs);
        Ok(())
    }
    /// Remove `lhs = rhs`, which must be stored.
    pub fn remove_equation(&mut self, lhs: &str, rhs: &str) -> Result<(), StoreError> {
        let (lhs, rhs) = (lhs.trim(), rhs.trim());
        let missing = || StoreError::MissingEquation(lhs.to_string(), rhs.to_string());
        let rhss = self.equations.get_mut(lhs).ok_or_else(missing)?;
        let idx = rhss.iter().position(|r| r == rhs).ok_or_else(missing)?;
        rhss.remove(idx);
        if rhss.is_empty() {
            self.equations.remove(lhs);
        }
        Ok(())
    }
    /// Replace the stored `old_lhs = old_rhs` with `new_lhs = new_rhs`, which must parse and
    /// must not be stored yet. On failure nothing changes.
    pub fn modify_equation(
        &mut self,
        old_lhs: &str,
        old_rhs: &str,
        new_lhs: &str,
        new_rhs: &str,
    ) -> Result<(), StoreError> {
        parse_term(&self.sig, new_lhs)?;
        parse_term(&self.sig, new_rhs)?;
        let (old_lhs, old_rhs) = (old_lhs.trim(), old_rhs.trim());
        let (new_lhs, new_rhs) = (new_lhs.trim(), new_rhs.trim());
        if !self.has_equation(old_lhs, old_rhs) {
            return Err(StoreError::MissingEquation(
                old_lhs.to_string(),
                old_rhs.to_string(),
            ));
        }
        if self.has_equation(new_lhs, new_rhs) {
            return Err(StoreError::DuplicateEquation(
                new_lhs.to_string(),
                new_rhs.to_string(),
            ));
        }
        self.remove_equation(old_lhs, old_rhs)?;
        self.equations
            .entry(new_lhs.to_string())
            .or_insert_with(Vec::new)
            .push(new_rhs.to_string());
        debug!(old_lhs, old_rhs, new_lhs, new_rhs, "modified equation");
        Ok(())
    }
    fn has_equation(&self, lhs: &str, rhs: &str) -> bool {
        self.equations
            .get(lhs)
            .map_or(false, |rhss| rhss.iter().any(|r| r == rhs))
    }
    /// Parse every equation against the current signature and run completion on them.
    ///
    /// # Examples
    ///
    /// ```
    /// # use term_completion::store::Store;
    /// # use term_completion::completion::CompletionConfig;
    /// # use term_completion::Signature;
    /// let sig = Signature::new(&[("f", 2), ("e", 0)], &["x"]).expect("signature");
    /// let mut store = Store::new(sig);
    /// store.add_equation("f(e, x)", "x").expect("added equation");
    /// store.add_equation("f(x, e)", "x").expect("added equation");
    ///
    /// let result = store.complete(&CompletionConfig::default()).expect("parsed equations");
    ///
    /// assert!(result.is_success());
    /// assert_eq!(result.rules.len(), 2);
    /// ```
    pub fn complete(&self, config: &CompletionConfig) -> Result<CompletionResult, StoreError> {
        let mut identities = vec![];
        for (lhs, rhss) in &self.equations {
            let lhs = parse_term(&self.sig, lhs)?;
            for rhs in rhss {
                identities.push((lhs.clone(), parse_term(&self.sig, rhs)?));
            }
        }
        info!(equations = identities.len(), "completing stored equations");
        Ok(complete(&self.sig, &identities, config))
    }

    /// Delete every stored term if any of them mentions one of `names`.
    fn purge_mentions<S: AsRef<str>>(&mut self, names: &[S]) {
        let stale = self.terms.values().any(|stored| {
            names
                .iter()
                .any(|name| stored.term.mentions(name.as_ref()))
        });
        if stale {
            self.delete_all_terms();
        }
    }
}
