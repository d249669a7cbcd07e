use swc_core::{atoms::Atom, ecma::ast::*};

/// The shape of a callee, as far as matching against imports is concerned.
#[derive(Debug, PartialEq)]
pub(crate) enum CallTarget<'a> {
    /// `foo()`
    Ident(&'a Ident),
    /// `foo.bar.baz()`: `root` is `foo`, `props` are `[bar, baz]`.
    StaticMemberChain { root: &'a Ident, props: Vec<&'a Atom> },
    /// Anything involving computed or private access, calls, literals, ...
    Unsupported,
}

impl<'a> CallTarget<'a> {
    pub fn resolve(callee: &'a Expr) -> Self {
        match unparen(callee) {
            Expr::Ident(ident) => CallTarget::Ident(ident),
            Expr::Member(member) => {
                let mut props = Vec::new();
                let mut current = member;
                loop {
                    let MemberProp::Ident(prop) = &current.prop else {
                        return CallTarget::Unsupported;
                    };
                    props.push(&prop.sym);

                    match unparen(&current.obj) {
                        Expr::Ident(root) => {
                            props.reverse();
                            return CallTarget::StaticMemberChain { root, props };
                        }
                        Expr::Member(next) => current = next,
                        _ => return CallTarget::Unsupported,
                    }
                }
            }
            _ => CallTarget::Unsupported,
        }
    }
}

/// Parentheses are transparent, sequences (`(0, foo.bar)()`) are not.
fn unparen(mut expr: &Expr) -> &Expr {
    while let Expr::Paren(ParenExpr { expr: inner, .. }) = expr {
        expr = &**inner;
    }
    expr
}

#[cfg(test)]
mod tests {
    use swc_core::{
        common::{FileName, GLOBALS, SourceMap, sync::Lrc},
        ecma::parser::{EsSyntax, Syntax, parse_file_as_expr},
    };

    use super::*;

    fn with_callee(code: &str, f: impl FnOnce(CallTarget<'_>)) {
        GLOBALS.set(&Default::default(), || {
            let cm = Lrc::new(SourceMap::default());
            let fm = cm.new_source_file(Lrc::new(FileName::Anon), code.to_string());
            let expr = parse_file_as_expr(
                &fm,
                Syntax::Es(EsSyntax::default()),
                EsVersion::latest(),
                None,
                &mut vec![],
            )
            .expect("Failed to parse");

            let callee = match &*expr {
                Expr::Call(CallExpr {
                    callee: Callee::Expr(callee),
                    ..
                }) => &**callee,
                Expr::New(NewExpr { callee, .. }) => &**callee,
                _ => panic!("expected a call in {code}"),
            };
            f(CallTarget::resolve(callee))
        })
    }

    fn names(target: &CallTarget<'_>) -> Option<Vec<String>> {
        match target {
            CallTarget::Ident(ident) => Some(vec![ident.sym.to_string()]),
            CallTarget::StaticMemberChain { root, props } => Some(
                std::iter::once(root.sym.to_string())
                    .chain(props.iter().map(|prop| prop.to_string()))
                    .collect(),
            ),
            CallTarget::Unsupported => None,
        }
    }

    #[test]
    fn identifier() {
        with_callee("foo()", |target| {
            assert!(matches!(target, CallTarget::Ident(_)));
            assert_eq!(names(&target).unwrap(), ["foo"]);
        });
    }

    #[test]
    fn static_chain() {
        with_callee("object.path.to.method(1, 2)", |target| {
            assert!(matches!(target, CallTarget::StaticMemberChain { .. }));
            assert_eq!(names(&target).unwrap(), ["object", "path", "to", "method"]);
        });
    }

    #[test]
    fn constructor() {
        with_callee("new ns.Foo()", |target| {
            assert_eq!(names(&target).unwrap(), ["ns", "Foo"]);
        });
    }

    #[test]
    fn parenthesized() {
        with_callee("(foo.bar)()", |target| {
            assert_eq!(names(&target).unwrap(), ["foo", "bar"]);
        });
        with_callee("((foo).bar)()", |target| {
            assert_eq!(names(&target).unwrap(), ["foo", "bar"]);
        });
    }

    #[test]
    fn computed_access_anywhere() {
        for code in [
            "object[key]()",
            "object['key']()",
            "object[key].method()",
            "object.path[key].method()",
        ] {
            with_callee(code, |target| assert_eq!(target, CallTarget::Unsupported, "{code}"));
        }
    }

    #[test]
    fn unsupported_shapes() {
        for code in [
            "foo().bar()",
            "foo()()",
            "this.foo()",
            "'str'.trim()",
            "(0, foo.bar)()",
            "(function () {})()",
        ] {
            with_callee(code, |target| assert_eq!(target, CallTarget::Unsupported, "{code}"));
        }
    }
}
