use thiserror::Error;

use crate::{
    parser::{LexError, ParseError},
    substitute::SubstitutionError,
};

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum Error {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Substitution(#[from] SubstitutionError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
