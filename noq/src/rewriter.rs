use tracing::debug;

use crate::{
    matcher::pattern_match,
    substitute::{substitute, SubstitutionError},
    term::{Expr, ExprRef, Rule},
};

impl Rule {
    /// Rewrites every subterm of `expr` that matches the head, in one top-down pass.
    ///
    /// A matching node is replaced as a whole and its replacement is not scanned
    /// again; the children of a node are only visited when the node itself does
    /// not match.
    pub fn apply_all(&self, expr: &ExprRef) -> Result<ExprRef, SubstitutionError> {
        if let Some(bindings) = pattern_match(&self.head, expr) {
            debug!(rule = %self, %bindings, "rewriting {expr}");
            return substitute(&bindings, &self.body);
        }
        Ok(match expr.as_ref() {
            Expr::Symbol(_) => expr.clone(),
            Expr::Functor(name, args) => {
                let args = args
                    .iter()
                    .map(|arg| self.apply_all(arg))
                    .collect::<Result<Vec<_>, _>>()?;
                Expr::Functor(name.clone(), args).into()
            }
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        parser::{parse_rule, parse_term},
        stack::with_large_stack,
    };

    fn swap() -> Rule {
        Rule::new(
            fun!(swap(fun!(pair(sym!(a), sym!(b))))),
            fun!(pair(sym!(b), sym!(a))),
        )
    }

    #[test]
    fn test_apply_all() {
        let expr = fun!(foo(
            fun!(swap(fun!(pair(fun!(f(sym!(a))), fun!(g(sym!(b))))))),
            fun!(swap(fun!(pair(fun!(q(sym!(c))), fun!(z(sym!(d))))))),
        ));
        assert_eq!(
            swap().apply_all(&expr).unwrap().to_string(),
            "foo(pair(g(b), f(a)), pair(z(d), q(c)))"
        );
    }

    #[test]
    fn test_no_match_is_identity() {
        for expr in [
            sym!(swap),
            fun!(swap()),
            fun!(foo(fun!(swap(sym!(a))), fun!(pair(sym!(a), sym!(b))))),
            fun!(swap(fun!(pair(sym!(a), sym!(b), sym!(c))))),
        ] {
            assert_eq!(swap().apply_all(&expr).unwrap(), expr);
        }
    }

    #[test]
    fn test_single_pass() {
        // the replacement contains a fresh redex which is left alone
        let wrap = Rule::new(fun!(f(sym!(x))), fun!(f(fun!(f(sym!(x))))));
        assert_eq!(
            wrap.apply_all(&fun!(g(fun!(f(sym!(a)))))).unwrap(),
            fun!(g(fun!(f(fun!(f(sym!(a)))))))
        );

        // once the outer node matched its children are not visited
        assert_eq!(
            wrap.apply_all(&fun!(f(fun!(f(sym!(a)))))).unwrap(),
            fun!(f(fun!(f(fun!(f(sym!(a)))))))
        );

        // a bare variable head matches the root and nothing else
        let everything = Rule::new(sym!(x), fun!(h(sym!(x))));
        assert_eq!(
            everything.apply_all(&fun!(g(sym!(a), sym!(b)))).unwrap(),
            fun!(h(fun!(g(sym!(a), sym!(b)))))
        );
    }

    #[test]
    fn test_substitution_error() {
        let apply = Rule::new(fun!(apply(sym!(f), sym!(x))), fun!(f(sym!(x))));
        assert_eq!(
            apply
                .apply_all(&fun!(list(fun!(apply(sym!(succ), sym!(zero))))))
                .unwrap(),
            fun!(list(fun!(succ(sym!(zero)))))
        );
        assert_eq!(
            apply.apply_all(&fun!(list(fun!(apply(fun!(compose()), sym!(zero)))))),
            Err(SubstitutionError {
                name: "f".into(),
                value: fun!(compose()),
            })
        );
    }

    #[test]
    fn test_apply_parsed_rule() -> crate::Result<()> {
        let rule = parse_rule("swap(pair(a, b)) = pair(b, a)")?;
        let expr = parse_term("foo(swap(pair(f(a), g(b))), swap(pair(q(c), z(d))))")?;
        assert_eq!(
            rule.apply_all(&expr)?,
            parse_term("foo(pair(g(b), f(a)), pair(z(d), q(c)))")?
        );
        Ok(())
    }

    #[test]
    fn test_deeply_nested() {
        const DEPTH: usize = 1000;
        let nested = |inner: &str| format!("{}{inner}{}", "s(".repeat(DEPTH), ")".repeat(DEPTH));
        let (source, expected) = (nested("z()"), nested("one()"));
        let rewritten = with_large_stack(move || {
            let rewrite = || -> crate::Result<String> {
                let rule = parse_rule("z() = one()")?;
                let expr = parse_term(&source)?;
                Ok(rule.apply_all(&expr)?.to_string())
            };
            rewrite().map_err(|e| e.to_string())
        })
        .unwrap();
        assert_eq!(rewritten, Ok(expected));
    }
}
