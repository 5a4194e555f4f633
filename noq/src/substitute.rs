use thiserror::Error;

use crate::{
    matcher::Bindings,
    prelude::*,
    term::{Expr, ExprRef},
};

#[derive(Debug, Error, PartialEq, Eq, Clone)]
#[error("expected a symbol in place of functor `{name}`, but it is bound to {} `{value}`", .value.human_name())]
pub struct SubstitutionError {
    pub name: Identifier,
    pub value: ExprRef,
}

/// Replaces every bound symbol of `template` with the term it is bound to.
///
/// Functor names are substituted too, so a pattern may abstract over them, but
/// only a symbol can stand in a name position. Unbound symbols are kept as is.
pub fn substitute(bindings: &Bindings, template: &ExprRef) -> Result<ExprRef, SubstitutionError> {
    Ok(match template.as_ref() {
        Expr::Symbol(name) => bindings.get(name).unwrap_or(template).clone(),
        Expr::Functor(name, args) => {
            let name = match bindings.get(name) {
                None => name.clone(),
                Some(value) => match value.as_ref() {
                    Expr::Symbol(renamed) => renamed.clone(),
                    Expr::Functor(_, _) => {
                        return Err(SubstitutionError {
                            name: name.clone(),
                            value: value.clone(),
                        })
                    }
                },
            };
            let args = args
                .iter()
                .map(|arg| substitute(bindings, arg))
                .collect::<Result<Vec<_>, _>>()?;
            Expr::Functor(name, args).into()
        }
    })
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::matcher::pattern_match;

    fn bindings(entries: impl IntoIterator<Item = (&'static str, ExprRef)>) -> Bindings {
        entries
            .into_iter()
            .map(|(name, value)| (Identifier::from(name), value))
            .collect()
    }

    #[test]
    fn test_substitute() {
        let bindings = bindings([("a", fun!(f(sym!(a)))), ("b", fun!(g(sym!(b))))]);
        let expr = fun!(pair(sym!(a), sym!(b)));
        assert_eq!(
            substitute(&bindings, &expr).unwrap().to_string(),
            "pair(f(a), g(b))"
        );
    }

    #[test]
    fn test_unbound_symbols_are_literals() {
        let bindings = bindings([("a", sym!(x))]);
        assert_eq!(
            substitute(&bindings, &fun!(f(sym!(a), sym!(c), fun!(g())))).unwrap(),
            fun!(f(sym!(x), sym!(c), fun!(g())))
        );
        assert_eq!(substitute(&Bindings::new(), &sym!(c)).unwrap(), sym!(c));
    }

    #[test]
    fn test_functor_name() {
        let renamed = bindings([("op", sym!(plus)), ("x", sym!(one))]);
        assert_eq!(
            substitute(&renamed, &fun!(op(sym!(x), sym!(x)))).unwrap(),
            fun!(plus(sym!(one), sym!(one)))
        );

        let not_a_name = bindings([("op", fun!(plus(sym!(one))))]);
        assert_eq!(
            substitute(&not_a_name, &fun!(wrap(fun!(op(sym!(x)))))),
            Err(SubstitutionError {
                name: "op".into(),
                value: fun!(plus(sym!(one))),
            })
        );
    }

    #[test]
    fn test_substitute_inverts_match() {
        let heads = [
            fun!(swap(fun!(pair(sym!(a), sym!(b))))),
            fun!(f(sym!(x), fun!(g(sym!(x), sym!(y))))),
            sym!(x),
        ];
        let exprs = [
            fun!(swap(fun!(pair(fun!(f(sym!(c))), fun!(g()))))),
            fun!(f(fun!(h()), fun!(g(fun!(h()), sym!(k))))),
            fun!(f(sym!(k))),
        ];
        for (head, expr) in heads.iter().zip(&exprs) {
            let bindings = pattern_match(head, expr).unwrap();
            assert_eq!(&substitute(&bindings, head).unwrap(), expr);
        }
    }
}
