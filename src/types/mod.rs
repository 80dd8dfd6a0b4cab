//! The term data model: symbols, signatures, terms, substitutions and rewrite systems.

/// Represents the number of arguments an `Operator` takes.
pub type Arity = usize;

/// Represents the place of an `Operator` in a `Signature`'s precedence; higher is greater.
pub type Rank = usize;

/// Represents a path of 1-based argument indices from the root of a `Term` to one of its
/// subterms. The empty path is the root.
pub type Position = Vec<usize>;

pub use self::atom::*;
mod atom;

pub use self::signature::*;
mod signature;

pub use self::term::*;
mod term;

pub use self::substitution::*;
mod substitution;

pub use self::rule::*;
mod rule;

pub use self::trs::*;
mod trs;
