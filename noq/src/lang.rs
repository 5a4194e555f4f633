use crate::prelude::*;

#[derive(PartialEq, Eq, Hash, Clone, derive_more::Display, Debug)]
pub enum Token {
    #[display(fmt = "{_0}")]
    Symbol(Identifier),
    #[display(fmt = "(")]
    LParen,
    #[display(fmt = ")")]
    RParen,
    #[display(fmt = ",")]
    Comma,
    #[display(fmt = "=")]
    Equals,
    /// Always the last token of a lexed input.
    #[display(fmt = "end of input")]
    Sentinel,
}

impl Token {
    pub fn kind(&self) -> TokenKind {
        match self {
            Token::Symbol(_) => TokenKind::Symbol,
            Token::LParen => TokenKind::LParen,
            Token::RParen => TokenKind::RParen,
            Token::Comma => TokenKind::Comma,
            Token::Equals => TokenKind::Equals,
            Token::Sentinel => TokenKind::Sentinel,
        }
    }
}

/// A [`Token`] without its payload, as reported by parse errors.
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, derive_more::Display, Debug)]
pub enum TokenKind {
    #[display(fmt = "symbol")]
    Symbol,
    #[display(fmt = "`(`")]
    LParen,
    #[display(fmt = "`)`")]
    RParen,
    #[display(fmt = "`,`")]
    Comma,
    #[display(fmt = "`=`")]
    Equals,
    #[display(fmt = "end of input")]
    Sentinel,
}
