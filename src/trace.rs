//! Record the course of a completion run.
//!
//! Every transition of the completion procedure that changes its rules or identities is
//! recorded as an [`Event`]. The events of one run form a [`Trace`], returned with the
//! [`CompletionResult`] and, when [`CompletionConfig::journal`] names a file, appended to that
//! file one line per event.
//!
//! [`Event`]: enum.Event.html
//! [`Trace`]: struct.Trace.html
//! [`CompletionResult`]: ../completion/struct.CompletionResult.html
//! [`CompletionConfig::journal`]: ../completion/struct.CompletionConfig.html#structfield.journal
//!
//! # Examples
//!
//! ```
//! # use term_completion::{Signature, parse_equations};
//! # use term_completion::completion::{complete, CompletionConfig};
//! # use term_completion::trace::Event;
//! let sig = Signature::new(&[("f", 2), ("e", 0)], &["x"]).expect("signature");
//! let equations = parse_equations(&sig, "f(e, x) = x").expect("parsed equations");
//! let result = complete(&sig, &equations, &CompletionConfig::default());
//!
//! let lines: Vec<String> = result.trace.iter().map(|event| event.to_string()).collect();
//! assert_eq!(
//!     lines,
//!     vec![
//!         "Added rule f(e, x) -> x to the set of rules.",
//!         "Superposed rule f(e, x) -> x.",
//!     ]
//! );
//! match result.trace[0] {
//!     Event::RuleAdded(ref rule) => assert_eq!(rule.to_string(), "f(e, x) -> x"),
//!     _ => unreachable!(),
//! }
//! ```

use super::types::{Rule, Term};
use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::ops::Index;
use std::path::Path;
use std::slice;
use tracing::{debug, warn};

/// One change to the rules or identities of a completion run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// An identity was oriented into a new rule.
    RuleAdded(Rule),
    /// A critical pair was enqueued as a new identity.
    CriticalPair(Term, Term),
    /// An identity normalized to a trivial or already known equation.
    IdentityDropped(Term, Term),
    /// A new rule reduced the left side of an older one, which went back to the identities.
    RuleRetracted(Rule),
    /// The right side of a rule was renormalized.
    RuleSimplified { old: Rule, new: Rule },
    /// A renormalized rule turned out to duplicate another one.
    RuleRemoved(Rule),
    /// A rule was marked and superposed with every marked rule.
    RuleMarked(Rule),
}
impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Event::RuleAdded(rule) => write!(f, "Added rule {} to the set of rules.", rule),
            Event::CriticalPair(s, t) => write!(
                f,
                "Added critical pair ({}, {}) to the set of identities.",
                s, t
            ),
            Event::IdentityDropped(s, t) => write!(f, "Dropped identity ({}, {}).", s, t),
            Event::RuleRetracted(rule) => write!(
                f,
                "Moved rule {} back to the set of identities.",
                rule
            ),
            Event::RuleSimplified { old, new } => {
                write!(f, "Simplified rule {} to {}.", old, new)
            }
            Event::RuleRemoved(rule) => write!(f, "Removed duplicate rule {}.", rule),
            Event::RuleMarked(rule) => write!(f, "Superposed rule {}.", rule),
        }
    }
}

/// The events of one completion run, in order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Trace {
    events: Vec<Event>,
}
impl Trace {
    pub fn new() -> Trace {
        Trace::default()
    }
    pub fn push(&mut self, event: Event) {
        self.events.push(event)
    }
    pub fn len(&self) -> usize {
        self.events.len()
    }
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
    pub fn iter(&self) -> slice::Iter<Event> {
        self.events.iter()
    }
    pub fn events(&self) -> &[Event] {
        &self.events
    }
    /// The number of rules ever added, retracted rules included.
    pub fn rules_added(&self) -> usize {
        self.events
            .iter()
            .filter(|e| match e {
                Event::RuleAdded(_) => true,
                _ => false,
            })
            .count()
    }
    /// The number of critical pairs enqueued as identities.
    pub fn critical_pairs(&self) -> usize {
        self.events
            .iter()
            .filter(|e| match e {
                Event::CriticalPair(..) => true,
                _ => false,
            })
            .count()
    }
}
impl Index<usize> for Trace {
    type Output = Event;
    fn index(&self, idx: usize) -> &Event {
        &self.events[idx]
    }
}
impl<'a> IntoIterator for &'a Trace {
    type Item = &'a Event;
    type IntoIter = slice::Iter<'a, Event>;
    fn into_iter(self) -> Self::IntoIter {
        self.events.iter()
    }
}
impl fmt::Display for Trace {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for event in &self.events {
            writeln!(f, "{}", event)?;
        }
        Ok(())
    }
}

/// Records events into a [`Trace`] and, optionally, an append-only file.
///
/// A journal file that cannot be opened or written is reported once and then ignored; it never
/// affects the outcome of completion.
///
/// [`Trace`]: struct.Trace.html
#[derive(Debug)]
pub(crate) struct Journal {
    trace: Trace,
    file: Option<File>,
}
impl Journal {
    pub(crate) fn open(path: Option<&Path>) -> Journal {
        let file = path.and_then(|path| {
            match OpenOptions::new().create(true).append(true).open(path) {
                Ok(file) => Some(file),
                Err(err) => {
                    warn!(path = %path.display(), %err, "cannot open journal");
                    None
                }
            }
        });
        Journal {
            trace: Trace::new(),
            file,
        }
    }
    pub(crate) fn record(&mut self, event: Event) {
        debug!(%event);
        if let Some(file) = self.file.as_mut() {
            if let Err(err) = writeln!(file, "{}", event) {
                warn!(%err, "cannot write journal, disabling it");
                self.file = None;
            }
        }
        self.trace.push(event);
    }
    pub(crate) fn trace(&self) -> &Trace {
        &self.trace
    }
    pub(crate) fn into_trace(self) -> Trace {
        self.trace
    }
}
