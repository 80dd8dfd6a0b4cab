//! A [Rust][0] library for parsing, rewriting, unifying, ordering and [completing][1] first-order
//! equational theories.
//!
//! # Example
//!
//! ```
//! use term_completion::*;
//! use term_completion::completion::{complete, CompletionConfig};
//!
//! // A signature declares every function with its arity, and every variable.
//! let mut sig = Signature::new(&[("f", 2), ("i", 1), ("e", 0)], &["x", "y", "z"])
//!     .expect("signature");
//! sig.set_precedence(&["e", "f", "i"]).expect("precedence");
//!
//! // Terms are parsed against the signature,
//! let parsed_term = parse_term(&sig, "f(x, i(e))").expect("parsed term");
//!
//! // and can also be constructed by hand.
//! let constructed_term = Term::app(
//!     "f",
//!     vec![Term::var("x"), Term::app("i", vec![Term::app("e", vec![])])],
//! );
//! assert_eq!(parsed_term, constructed_term);
//!
//! // Completing the axioms of a group yields a rewrite system deciding its word problem.
//! let axioms = parse_equations(
//!     &sig,
//!     "f(f(x, y), z) = f(x, f(y, z)); f(e, x) = x; f(i(x), x) = e",
//! )
//! .expect("parsed axioms");
//! let result = complete(&sig, &axioms, &CompletionConfig::default());
//! assert!(result.is_success());
//!
//! let normal_form = result.rules.normalize(&parsed_term, 100).expect("normal form");
//! assert_eq!(normal_form.to_string(), "x");
//! ```
//!
//! # Completion
//!
//! An equational theory is a [`Signature`] together with a set of equations _s = t_ between
//! terms. Two terms are equal in the theory if one can be turned into the other by repeatedly
//! replacing instances of one side of an equation by the corresponding instance of the other.
//! Deciding this directly means searching in both directions without bound.
//!
//! Completion instead orients every equation into a rewrite rule _l → r_ with _l > r_ in a
//! reduction ordering, here the [lexicographic path ordering][`Lpo`], so that rewriting always
//! terminates. Wherever two rules overlap, the two ways of rewriting the overlap form a
//! [critical pair][`critical_pairs`]; completion adds the critical pairs that do not rewrite to
//! a common term as new equations, until none are left. The resulting system is confluent and
//! terminating: two terms are equal in the theory exactly when they have the same normal form.
//! Completion fails when an equation cannot be oriented, and may not terminate at all, which is
//! why every run is bounded by a [`CompletionConfig`].
//!
//! [`Signature`]: struct.Signature.html
//! [`Lpo`]: ordering/struct.Lpo.html
//! [`critical_pairs`]: critical_pairs/index.html
//! [`CompletionConfig`]: completion/struct.CompletionConfig.html
//!
//! ### Further Reading
//!
//! - Baader & Nipkow (1999). [Term rewriting and all that][2]. Cambridge University Press.
//! - Knuth & Bendix (1970). Simple word problems in universal algebras. In _Computational
//!   Problems in Abstract Algebra_, 263–297. Pergamon Press.
//! - Huet (1981). A complete proof of correctness of the Knuth-Bendix completion algorithm.
//!   _Journal of Computer and System Sciences_, 23(1), 11–21.
//! - [Knuth–Bendix completion algorithm][1]. Wikipedia.
//!
//! [0]: https://www.rust-lang.org
//!      "The Rust Programming Language"
//! [1]: https://en.wikipedia.org/wiki/Knuth%E2%80%93Bendix_completion_algorithm
//!      "Wikipedia - Knuth-Bendix Completion"
//! [2]: http://www.cambridge.org/us/academic/subjects/computer-science/programming-languages-and-applied-logic/term-rewriting-and-all
//!      "Term Rewriting and All That"

#[cfg(test)]
#[macro_use]
extern crate quickcheck;

pub mod completion;
pub mod critical_pairs;
pub mod ordering;
mod parser;
mod pretty;
pub mod store;
pub mod trace;
pub mod types;
pub mod unification;

pub use completion::{complete, CompletionConfig, CompletionResult, State};
pub use ordering::{Lpo, OrderingIncomparable};
pub use parser::*;
pub use store::{Store, StoreError};
pub use types::*;
pub use unification::{unify, UnificationFailure};
