use std::rc::Rc;

use chumsky::prelude::*;
use thiserror::Error;

use crate::{
    error,
    lang::{Token, TokenKind},
    prelude::*,
    term::{Expr, ExprRef, Rule},
};

pub trait SimpleParser<I: Clone + std::hash::Hash, O>:
    Parser<I, O, Error = SimpleError<I>> + Clone
{
    #[allow(clippy::type_complexity)]
    fn spanned(self) -> chumsky::combinator::MapWithSpan<Self, fn(O, Span) -> Spanned<O>, O>
    where
        Self: Sized,
        I: std::cmp::Eq,
    {
        self.map_with_span(|value, span| Spanned { span, value })
    }

    fn refcounted(self) -> chumsky::combinator::Map<Self, fn(O) -> std::rc::Rc<O>, O>
    where
        Self: Sized,
        I: std::cmp::Eq,
    {
        self.map(Rc::new)
    }
}
impl<I: Clone + std::hash::Hash, O, T> SimpleParser<I, O> for T where
    T: Parser<I, O, Error = SimpleError<I>> + Clone
{
}

#[derive(Debug, Error, PartialEq, Eq, Clone)]
#[error("cannot tokenize {} at position {position}", describe_char(.found))]
pub struct LexError {
    /// `None` if the input ended unexpectedly.
    pub found: Option<char>,
    /// Offset in characters.
    pub position: usize,
}

fn describe_char(c: &Option<char>) -> String {
    c.map_or_else(|| "end of the input".to_string(), |c| format!("`{c}`"))
}

impl LexError {
    fn from_errors(source: &str, errors: Vec<SimpleError<char>>) -> Self {
        match errors.into_iter().next() {
            Some(e) => Self {
                found: e.found().copied(),
                position: e.span().start,
            },
            None => Self {
                found: None,
                position: source.chars().count(),
            },
        }
    }

    pub fn span(&self) -> Span {
        self.position..self.position + 1
    }
}

#[derive(Debug, Error, PartialEq, Eq, Clone)]
#[error("unexpected {found}, expected {}", describe_expected(.expected))]
pub struct ParseError {
    pub span: Span,
    /// Sorted, without duplicates.
    pub expected: Vec<TokenKind>,
    pub found: TokenKind,
}

fn describe_expected(expected: &[TokenKind]) -> String {
    if expected.is_empty() {
        return "something else".to_string();
    }
    expected
        .iter()
        .map(TokenKind::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

impl ParseError {
    fn from_errors(eoi: Span, errors: Vec<SimpleError<Token>>) -> Self {
        match errors.into_iter().next() {
            Some(e) => e.into(),
            None => Self {
                span: eoi,
                expected: vec![],
                found: TokenKind::Sentinel,
            },
        }
    }
}

impl From<SimpleError<Token>> for ParseError {
    fn from(e: SimpleError<Token>) -> Self {
        let mut expected = e
            .expected()
            .map(|t| t.as_ref().map_or(TokenKind::Sentinel, Token::kind))
            .collect::<Vec<_>>();
        expected.sort();
        expected.dedup();
        Self {
            span: e.span(),
            expected,
            found: e.found().map_or(TokenKind::Sentinel, Token::kind),
        }
    }
}

pub fn lexer() -> impl SimpleParser<char, Vec<Spanned<Token>>> {
    let punctuation = choice((
        just('(').to(Token::LParen),
        just(')').to(Token::RParen),
        just(',').to(Token::Comma),
        just('=').to(Token::Equals),
    ));
    let symbol = filter(|c: &char| c.is_alphanumeric())
        .repeated()
        .at_least(1)
        .collect::<String>()
        .map(|name| Token::Symbol(name.into()));
    choice((punctuation, symbol))
        .spanned()
        .padded()
        .repeated()
        .then_ignore(end())
}

/// Tokenizes `source`. The result always ends with a single [`Token::Sentinel`].
pub fn lex(source: &str) -> Result<Vec<Spanned<Token>>, LexError> {
    let len = source.chars().count();
    let mut tokens = lexer()
        .parse(source)
        .map_err(|es| LexError::from_errors(source, es))?;
    tokens.push(Spanned {
        span: len..len,
        value: Token::Sentinel,
    });
    Ok(tokens)
}

fn term_parser() -> impl SimpleParser<Token, ExprRef> {
    recursive(|term: Recursive<_, ExprRef, _>| {
        // not `select!`: its label is dropped when errors at the same position merge
        let symbol = filter_map(|span, token| match token {
            Token::Symbol(name) => Ok(name),
            found => Err(Simple::expected_input_found(
                span,
                [Some(Token::Symbol("".into()))],
                Some(found),
            )),
        });

        // f(a, b)
        let args = term
            .separated_by(just(Token::Comma))
            .delimited_by(just(Token::LParen), just(Token::RParen));

        symbol
            .then(args.or_not())
            .map(|(name, args)| match args {
                Some(args) => Expr::Functor(name, args),
                None => Expr::Symbol(name),
            })
            .refcounted()
    })
}

fn rule_parser() -> impl SimpleParser<Token, Rule> {
    term_parser()
        .then_ignore(just(Token::Equals))
        .then(term_parser())
        .map(|(head, body)| Rule::new(head, body))
}

fn parse_full<T>(
    tokens: Vec<Spanned<Token>>,
    parser: impl SimpleParser<Token, T>,
) -> Result<T, ParseError> {
    let eoi = tokens.last().map_or(0..0, Spanned::span);
    parser
        .then_ignore(just(Token::Sentinel))
        .parse(chumsky::Stream::from_iter(
            eoi.clone(),
            tokens
                .into_iter()
                .map(|Spanned { span, value }| (value, span)),
        ))
        .map_err(|es| ParseError::from_errors(eoi, es))
}

/// Parses a whole token sequence, as produced by [`lex`], into a single term.
pub fn parse_term_tokens(tokens: Vec<Spanned<Token>>) -> Result<ExprRef, ParseError> {
    parse_full(tokens, term_parser())
}

/// Parses a whole token sequence, as produced by [`lex`], into `head = body`.
pub fn parse_rule_tokens(tokens: Vec<Spanned<Token>>) -> Result<Rule, ParseError> {
    parse_full(tokens, rule_parser())
}

pub fn parse_term(source: &str) -> error::Result<ExprRef> {
    Ok(parse_term_tokens(lex(source)?)?)
}

pub fn parse_rule(source: &str) -> error::Result<Rule> {
    Ok(parse_rule_tokens(lex(source)?)?)
}
