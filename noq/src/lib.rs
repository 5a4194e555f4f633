//! Rewriting of first-order terms such as `swap(pair(a, b))`.
//!
//! Text is tokenized and parsed by [`parser`] into [`term::Expr`] trees.
//! [`matcher::pattern_match`] finds the bindings of a pattern against a term,
//! [`substitute::substitute`] plugs them into a template and
//! [`term::Rule::apply_all`] combines both over a whole tree.

#[macro_use]
pub mod term;
pub mod error;
pub mod lang;
pub mod matcher;
pub mod parser;
pub mod prelude;
pub mod rewriter;
pub mod stack;
pub mod substitute;

pub use error::{Error, Result};
