use std::rc::Rc;

use crate::prelude::*;

pub type ExprRef = Rc<Expr>;

#[derive(PartialEq, Eq, Hash, Clone, Debug)]
pub enum Expr {
    /// `a`
    Symbol(Identifier),
    /// `f(a, b)`
    Functor(Identifier, Vec<ExprRef>),
}

impl Expr {
    pub fn symbol(name: impl Into<Identifier>) -> Self {
        Expr::Symbol(name.into())
    }

    pub fn functor(name: impl Into<Identifier>, args: impl IntoIterator<Item = ExprRef>) -> Self {
        Expr::Functor(name.into(), args.into_iter().collect())
    }

    pub fn human_name(&self) -> &'static str {
        match self {
            Expr::Symbol(_) => "a symbol",
            Expr::Functor(_, _) => "a functor",
        }
    }
}

impl std::fmt::Display for Expr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Expr::Symbol(name) => f.write_str(name),
            Expr::Functor(name, args) => {
                f.write_str(name)?;
                f.write_str("(")?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    f.write_fmt(format_args!("{arg}"))?;
                }
                f.write_str(")")
            }
        }
    }
}

/// `head = body`: every subterm matching `head` is rewritten into `body`.
#[derive(PartialEq, Eq, Clone, derive_more::Display, Debug)]
#[display(fmt = "{head} = {body}")]
pub struct Rule {
    pub head: ExprRef,
    pub body: ExprRef,
}

impl Rule {
    pub fn new(head: ExprRef, body: ExprRef) -> Self {
        Self { head, body }
    }
}

#[cfg(test)]
macro_rules! sym {
    ($name:ident) => {
        $crate::term::ExprRef::new($crate::term::Expr::Symbol(stringify!($name).into()))
    };
}

#[cfg(test)]
macro_rules! fun {
    ($name:ident($($arg:expr),* $(,)?)) => {
        $crate::term::ExprRef::new($crate::term::Expr::Functor(
            stringify!($name).into(),
            vec![$($arg),*],
        ))
    };
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(sym!(a).to_string(), "a");
        assert_eq!(fun!(f()).to_string(), "f()");
        assert_eq!(fun!(f(sym!(a))).to_string(), "f(a)");
        assert_eq!(fun!(f(sym!(a), sym!(b))).to_string(), "f(a, b)");
        assert_eq!(
            fun!(foo(fun!(gee(sym!(abc))), fun!(hue()))).to_string(),
            "foo(gee(abc), hue())"
        );
        assert_eq!(
            Rule::new(
                fun!(swap(fun!(pair(sym!(a), sym!(b))))),
                fun!(pair(sym!(b), sym!(a)))
            )
            .to_string(),
            "swap(pair(a, b)) = pair(b, a)"
        );
    }

    #[test]
    fn test_equality_is_structural() {
        assert_eq!(fun!(f(sym!(a), sym!(b))), fun!(f(sym!(a), sym!(b))));
        assert_ne!(fun!(f(sym!(a), sym!(b))), fun!(f(sym!(b), sym!(a))));
        assert_ne!(fun!(f(sym!(a))), fun!(f(sym!(a), sym!(a))));
        assert_ne!(*fun!(f()), *sym!(f));
        assert_eq!(
            Expr::functor("f", [ExprRef::new(Expr::symbol("a"))]),
            *fun!(f(sym!(a)))
        );
    }
}
