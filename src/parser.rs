use crate::types::*;

use nom::{
    bytes::complete::take_while1,
    character::complete::char,
    combinator::{all_consuming, opt},
    multi::separated_list0,
    sequence::delimited,
    IResult,
};
use thiserror::Error;

/// The error type for parsing operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyntaxError {
    #[error("empty term")]
    Empty,
    #[error("unbalanced parentheses")]
    UnbalancedParentheses,
    /// The text does not follow the term grammar; carries the unparsed remainder.
    #[error("malformed term near `{0}`")]
    Malformed(String),
    #[error("unknown symbol `{0}`")]
    UnknownSymbol(String),
    #[error("`{symbol}` takes {expected} arguments but was given {found}")]
    ArityMismatch {
        symbol: String,
        expected: Arity,
        found: Arity,
    },
    #[error("variable `{0}` cannot take arguments")]
    AppliedVariable(String),
    /// A symbol is used both with and without arguments while inferring a signature.
    #[error("`{0}` is used both as a variable and as a function")]
    InconsistentSymbol(String),
    /// Parentheses nest deeper than [`MAX_DEPTH`].
    ///
    /// [`MAX_DEPTH`]: constant.MAX_DEPTH.html
    #[error("terms nest at most {limit} deep")]
    TooDeep { limit: usize },
    #[error("expected exactly one `=` in `{0}`")]
    NotAnEquation(String),
    #[error(transparent)]
    Signature(#[from] SignatureError),
}

/// The deepest parenthesis nesting [`parse_term`] accepts.
///
/// [`parse_term`]: fn.parse_term.html
pub const MAX_DEPTH: usize = 256;

/// A term as written, before its symbols are checked against a [`Signature`].
///
/// [`Signature`]: ../types/struct.Signature.html
#[derive(Debug, PartialEq)]
struct Raw<'a> {
    name: &'a str,
    args: Option<Vec<Raw<'a>>>,
}

fn symbol(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c != '(' && c != ')' && c != ',')(input)
}

fn raw_term(input: &str) -> IResult<&str, Raw> {
    let (input, name) = symbol(input)?;
    let (input, args) = opt(delimited(
        char('('),
        separated_list0(char(','), raw_term),
        char(')'),
    ))(input)?;
    Ok((input, Raw { name, args }))
}

fn strip(input: &str) -> String {
    input.chars().filter(|c| !c.is_whitespace()).collect()
}

fn check_parentheses(text: &str) -> Result<(), SyntaxError> {
    let mut depth = 0usize;
    for c in text.chars() {
        match c {
            '(' => {
                depth += 1;
                if depth > MAX_DEPTH {
                    return Err(SyntaxError::TooDeep { limit: MAX_DEPTH });
                }
            }
            ')' => {
                depth = depth
                    .checked_sub(1)
                    .ok_or(SyntaxError::UnbalancedParentheses)?
            }
            _ => (),
        }
    }
    if depth == 0 {
        Ok(())
    } else {
        Err(SyntaxError::UnbalancedParentheses)
    }
}

fn scan(text: &str) -> Result<Raw, SyntaxError> {
    if text.is_empty() {
        return Err(SyntaxError::Empty);
    }
    check_parentheses(text)?;
    match all_consuming(raw_term)(text) {
        Ok((_, raw)) => Ok(raw),
        Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e)) => {
            Err(SyntaxError::Malformed(e.input.to_string()))
        }
        Err(nom::Err::Incomplete(_)) => Err(SyntaxError::Malformed(text.to_string())),
    }
}

fn build(sig: &Signature, raw: &Raw) -> Result<Term, SyntaxError> {
    match raw.args {
        None if sig.is_variable(raw.name) => Ok(Term::var(raw.name)),
        Some(_) if sig.is_variable(raw.name) => {
            Err(SyntaxError::AppliedVariable(raw.name.to_string()))
        }
        ref args => {
            let found = args.as_ref().map_or(0, Vec::len);
            match sig.arity(raw.name) {
                None => Err(SyntaxError::UnknownSymbol(raw.name.to_string())),
                Some(expected) if expected != found => Err(SyntaxError::ArityMismatch {
                    symbol: raw.name.to_string(),
                    expected,
                    found,
                }),
                Some(_) => {
                    let args = args
                        .iter()
                        .flatten()
                        .map(|arg| build(sig, arg))
                        .collect::<Result<Vec<_>, _>>()?;
                    Ok(Term::app(raw.name, args))
                }
            }
        }
    }
}

fn infer(sig: &mut Signature, raw: &Raw) -> Result<(), SyntaxError> {
    match raw.args {
        None => match sig.kind(raw.name) {
            Some(SymbolKind::Variable) => Ok(()),
            Some(SymbolKind::Function) => match sig.arity(raw.name) {
                Some(0) => Ok(()),
                expected => Err(SyntaxError::ArityMismatch {
                    symbol: raw.name.to_string(),
                    expected: expected.unwrap_or(0),
                    found: 0,
                }),
            },
            None => {
                sig.new_var(raw.name)?;
                Ok(())
            }
        },
        Some(ref args) => {
            match sig.kind(raw.name) {
                Some(SymbolKind::Variable) => {
                    return Err(SyntaxError::InconsistentSymbol(raw.name.to_string()))
                }
                Some(SymbolKind::Function) => match sig.arity(raw.name) {
                    Some(expected) if expected == args.len() => (),
                    expected => {
                        return Err(SyntaxError::ArityMismatch {
                            symbol: raw.name.to_string(),
                            expected: expected.unwrap_or(0),
                            found: args.len(),
                        })
                    }
                },
                None => {
                    sig.new_op(raw.name, args.len())?;
                }
            }
            args.iter().try_for_each(|arg| infer(sig, arg))
        }
    }
}

/// Parse a string as a [`Term`] over the symbols of `sig`.
///
/// # Term syntax
///
/// ```text
/// term   = symbol [ "(" [ term *( "," term ) ] ")" ]
/// symbol = 1*( any character except "(", ")", "," and whitespace )
/// ```
///
/// Whitespace is insignificant. A symbol followed by `(` must be a function whose arity matches
/// the number of arguments; `f()` and `f` both denote the constant `f`. A bare symbol must be a
/// variable or a constant. Parentheses may nest at most [`MAX_DEPTH`] deep.
///
/// [`Term`]: enum.Term.html
/// [`MAX_DEPTH`]: constant.MAX_DEPTH.html
///
/// # Examples
///
/// ```
/// # use term_completion::{Signature, SyntaxError, parse_term};
/// let sig = Signature::new(&[("f", 2), ("e", 0)], &["x", "y"]).expect("signature");
///
/// let term = parse_term(&sig, " f( x,f(e(), y) )").expect("parse of f(x, f(e, y))");
/// assert_eq!(term.to_string(), "f(x, f(e, y))");
///
/// assert_eq!(parse_term(&sig, "f(x"), Err(SyntaxError::UnbalancedParentheses));
/// assert_eq!(parse_term(&sig, "g(x)"), Err(SyntaxError::UnknownSymbol("g".to_string())));
/// assert_eq!(
///     parse_term(&sig, "f(x)"),
///     Err(SyntaxError::ArityMismatch { symbol: "f".to_string(), expected: 2, found: 1 })
/// );
/// ```
pub fn parse_term(sig: &Signature, input: &str) -> Result<Term, SyntaxError> {
    let text = strip(input);
    let raw = scan(&text)?;
    build(sig, &raw)
}

/// Parse a string of the form `lhs = rhs` as a [`Rule`].
///
/// [`Rule`]: struct.Rule.html
pub fn parse_rule(sig: &Signature, input: &str) -> Result<Rule, SyntaxError> {
    let (lhs, rhs) = parse_equation(sig, input)?;
    Ok(Rule::new(lhs, rhs))
}

/// Parse a string of the form `lhs = rhs` as an unoriented equation.
pub fn parse_equation(sig: &Signature, input: &str) -> Result<(Term, Term), SyntaxError> {
    let mut sides = input.split('=');
    match (sides.next(), sides.next(), sides.next()) {
        (Some(lhs), Some(rhs), None) => Ok((parse_term(sig, lhs)?, parse_term(sig, rhs)?)),
        _ => Err(SyntaxError::NotAnEquation(input.trim().to_string())),
    }
}

/// Parse `;`-separated equations `lhs = rhs`. Empty statements are ignored.
///
/// # Examples
///
/// ```
/// # use term_completion::{Signature, parse_equations};
/// let sig = Signature::new(&[("f", 2), ("i", 1), ("e", 0)], &["x", "y", "z"])
///     .expect("signature");
///
/// let equations = parse_equations(
///     &sig,
///     "f(f(x, y), z) = f(x, f(y, z));
///      f(e, x) = x;
///      f(i(x), x) = e;",
/// )
/// .expect("parsed equations");
///
/// assert_eq!(equations.len(), 3);
/// assert_eq!(equations[2].1.to_string(), "e");
/// ```
pub fn parse_equations(sig: &Signature, input: &str) -> Result<Vec<(Term, Term)>, SyntaxError> {
    input
        .split(';')
        .filter(|statement| !statement.trim().is_empty())
        .map(|statement| parse_equation(sig, statement))
        .collect()
}

/// Similar to [`parse_equations`], but orients every equation left to right into a [`TRS`].
///
/// [`parse_equations`]: fn.parse_equations.html
/// [`TRS`]: struct.TRS.html
pub fn parse_trs(sig: &Signature, input: &str) -> Result<TRS, SyntaxError> {
    let rules = parse_equations(sig, input)?
        .into_iter()
        .map(|(lhs, rhs)| Rule::new(lhs, rhs))
        .collect();
    Ok(TRS::new(rules))
}

/// Extend `sig` with the symbols a term string uses.
///
/// A symbol written with parentheses becomes a function whose arity is its argument count at
/// first occurrence; every later occurrence must agree. A bare symbol that is not already a
/// constant becomes a variable, so constants must be written `c()` at their first occurrence.
/// On failure `sig` is left unchanged.
///
/// This is a best-effort convenience for bootstrapping a signature, not a validator: use
/// [`parse_term`] against a known signature for that.
///
/// [`parse_term`]: fn.parse_term.html
///
/// # Examples
///
/// ```
/// # use term_completion::{Signature, SyntaxError, infer_signature};
/// let mut sig = Signature::default();
/// infer_signature(&mut sig, "f(i(x), f(e(), e))").expect("inferred signature");
///
/// assert_eq!(sig.arity("f"), Some(2));
/// assert_eq!(sig.arity("i"), Some(1));
/// assert_eq!(sig.arity("e"), Some(0));
/// assert!(sig.is_variable("x"));
///
/// assert_eq!(
///     infer_signature(&mut sig, "f(x)"),
///     Err(SyntaxError::ArityMismatch { symbol: "f".to_string(), expected: 2, found: 1 })
/// );
/// assert_eq!(
///     infer_signature(&mut sig, "x(e)"),
///     Err(SyntaxError::InconsistentSymbol("x".to_string()))
/// );
/// ```
pub fn infer_signature(sig: &mut Signature, input: &str) -> Result<(), SyntaxError> {
    let text = strip(input);
    let raw = scan(&text)?;
    let mut next = sig.clone();
    infer(&mut next, &raw)?;
    *sig = next;
    Ok(())
}
