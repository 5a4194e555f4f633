use rpds::HashTrieMap;
use tracing::trace;

use crate::{
    prelude::*,
    term::{Expr, ExprRef},
};

/// Variables captured by a successful [`pattern_match`].
///
/// Persistent: [`Bindings::bind`] returns a new set and leaves `self` untouched,
/// so a match that fails half-way simply drops whatever it had bound.
#[derive(PartialEq, Eq, Clone, Default, Debug)]
pub struct Bindings(HashTrieMap<Identifier, ExprRef>);

impl Bindings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&ExprRef> {
        self.0.get(name)
    }

    pub fn bind(&self, name: Identifier, value: ExprRef) -> Self {
        Self(self.0.insert(name, value))
    }

    pub fn len(&self) -> usize {
        self.0.size()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Identifier, &ExprRef)> {
        self.0.iter()
    }
}

impl FromIterator<(Identifier, ExprRef)> for Bindings {
    fn from_iter<T: IntoIterator<Item = (Identifier, ExprRef)>>(iter: T) -> Self {
        iter.into_iter()
            .fold(Self::new(), |bindings, (name, value)| {
                bindings.bind(name, value)
            })
    }
}

impl std::fmt::Display for Bindings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut entries = self.iter().collect::<Vec<_>>();
        entries.sort_by(|(lhs, _), (rhs, _)| lhs.cmp(rhs));
        f.write_str("{")?;
        for (i, (name, value)) in entries.into_iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            f.write_fmt(format_args!("{name}: {value}"))?;
        }
        f.write_str("}")
    }
}

/// Matches `expr` against `pattern`, where every symbol of `pattern` is a variable.
///
/// Returns `None` if there is no match. `Some` of an empty set means the pattern
/// matched without binding anything.
pub fn pattern_match(pattern: &Expr, expr: &ExprRef) -> Option<Bindings> {
    fn match_rec(pattern: &Expr, expr: &ExprRef, bindings: Bindings) -> Option<Bindings> {
        match (pattern, expr.as_ref()) {
            (Expr::Symbol(name), _) => match bindings.get(name) {
                // a repeated variable must capture the same term every time
                Some(bound) => (bound == expr).then_some(bindings),
                None => Some(bindings.bind(name.clone(), expr.clone())),
            },
            (Expr::Functor(name, args), Expr::Functor(expr_name, expr_args))
                if name == expr_name && args.len() == expr_args.len() =>
            {
                args.iter()
                    .zip(expr_args)
                    .try_fold(bindings, |bindings, (arg, expr_arg)| {
                        match_rec(arg, expr_arg, bindings)
                    })
            }
            (Expr::Functor(_, _), _) => None,
        }
    }
    let bindings = match_rec(pattern, expr, Bindings::new());
    trace!(%pattern, %expr, matched = bindings.is_some(), "pattern match");
    bindings
}
