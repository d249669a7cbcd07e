//! Marks calls to known side-effect-free module exports with `/*#__PURE__*/`.
//!
//! With `{ "pureCalls": { "m": ["create", "default", ["object", "path", "method"]] } }`
//! every call below is annotated, so that minifiers may drop it when its result
//! is unused:
//!
//! ```js
//! import dflt, { create, object, object as alias } from "m";
//!
//! create();
//! new create();
//! dflt();
//! object.path.method();
//! alias.path.method();
//! ```
//!
//! `"*"` names the namespace import (`import * as ns from "m"`). Callees are only
//! followed through static property access: `object[key]()`,
//! `object.path().method()` or locals shadowing an import never match.

use rustc_hash::FxHashSet;
use swc_core::{
    common::{BytePos, Span, comments::Comments, util::take::Take},
    ecma::{
        ast::*,
        visit::{VisitMut, VisitMutWith, noop_visit_mut_type, visit_mut_pass},
    },
};

use self::{
    annotation::{annotate_as_pure, move_pure_annotation},
    call_target::CallTarget,
    config::PureCallTable,
    import_bindings::ImportBindings,
};
pub use self::config::{Config, PureCallPattern, PureCalls};

mod annotation;
mod call_target;
mod config;
mod import_bindings;

/// Note: This pass requires running `resolver` **before** running this.
pub fn annotate_module_pure<C: Comments>(config: Config, comments: C) -> impl Pass + VisitMut {
    visit_mut_pass(AnnotateModulePure {
        pure_calls: PureCallTable::new(config.pure_calls),
        comments,
        imports: Default::default(),
        annotated: Default::default(),
    })
}

struct AnnotateModulePure<C: Comments> {
    pure_calls: PureCallTable,
    comments: C,
    /// Import bindings of the module being visited.
    imports: ImportBindings,
    /// Start positions of the nodes this pass annotated.
    annotated: FxHashSet<BytePos>,
}

impl<C: Comments> AnnotateModulePure<C> {
    fn is_pure_callee(&self, callee: &Expr) -> bool {
        match CallTarget::resolve(callee) {
            CallTarget::Ident(ident) => self.pure_calls.iter().any(|(module, patterns)| {
                !patterns.plain.is_empty()
                    && self
                        .imports
                        .references_import(ident, module, &patterns.plain)
            }),
            CallTarget::StaticMemberChain { root, props } => {
                self.pure_calls.iter().any(|(module, patterns)| {
                    patterns.chains.iter().any(|chain| {
                        // `chain.props` only has to be a prefix of `props`.
                        props.len() >= chain.props.len()
                            && chain
                                .props
                                .iter()
                                .zip(&props)
                                .all(|(expected, prop)| **prop == **expected)
                            && self.imports.references_import(
                                root,
                                module,
                                std::slice::from_ref(&chain.root),
                            )
                    })
                })
            }
            CallTarget::Unsupported => false,
        }
    }

    fn annotate(&mut self, span: Span) {
        if annotate_as_pure(&self.comments, span) {
            tracing::trace!("annotated call at {:?} as pure", span);
            self.annotated.insert(span.lo);
        }
    }

    /// Comments are keyed by position, so a marker on `foo()` in `foo().bar()`
    /// would also sit in front of the outer call. Give the annotated head its
    /// own position and wrap it in parentheses: `(/*#__PURE__*/ foo()).bar()`.
    ///
    /// The head is found through member access, optional chains and the
    /// TypeScript wrappers that don't move the start position (`foo()!.bar()`).
    fn parenthesize_annotated_head(&mut self, expr: &mut Expr, outer: BytePos) {
        let span = match expr {
            Expr::Member(member) => {
                return self.parenthesize_annotated_head(&mut member.obj, outer);
            }
            Expr::OptChain(chain) => {
                return self.parenthesize_opt_chain_head(chain, outer);
            }
            Expr::TsNonNull(TsNonNullExpr { expr, .. })
            | Expr::TsAs(TsAsExpr { expr, .. })
            | Expr::TsSatisfies(TsSatisfiesExpr { expr, .. })
            | Expr::TsConstAssertion(TsConstAssertion { expr, .. })
            | Expr::TsInstantiation(TsInstantiation { expr, .. }) => {
                return self.parenthesize_annotated_head(expr, outer);
            }
            Expr::Call(CallExpr { span, .. }) | Expr::New(NewExpr { span, .. }) => *span,
            _ => return,
        };
        if span.lo != outer || !self.annotated.remove(&span.lo) {
            return;
        }

        let marker_span = Span::dummy_with_cmt();
        move_pure_annotation(&self.comments, span.lo, marker_span.lo);

        let head = match expr.take() {
            Expr::Call(call) => Expr::Call(CallExpr {
                span: marker_span,
                ..call
            }),
            Expr::New(new) => Expr::New(NewExpr {
                span: marker_span,
                ..new
            }),
            other => other,
        };
        *expr = Expr::Paren(ParenExpr {
            span,
            expr: Box::new(head),
        });
    }

    fn parenthesize_opt_chain_head(&mut self, chain: &mut OptChainExpr, outer: BytePos) {
        match &mut *chain.base {
            OptChainBase::Member(member) => {
                self.parenthesize_annotated_head(&mut member.obj, outer);
            }
            OptChainBase::Call(call) => {
                self.parenthesize_annotated_head(&mut call.callee, outer);
            }
        }
    }
}

impl<C: Comments> VisitMut for AnnotateModulePure<C> {
    noop_visit_mut_type!();

    fn visit_mut_module(&mut self, module: &mut Module) {
        if self.pure_calls.is_empty() {
            return;
        }

        self.imports = ImportBindings::collect(module);
        if self.imports.is_empty() {
            return;
        }

        module.visit_mut_children_with(self);

        self.imports = Default::default();
        self.annotated.clear();
    }

    // Scripts can't import anything.
    fn visit_mut_script(&mut self, _: &mut Script) {}

    fn visit_mut_call_expr(&mut self, call: &mut CallExpr) {
        call.visit_mut_children_with(self);

        if let Callee::Expr(callee) = &mut call.callee {
            self.parenthesize_annotated_head(callee, call.span.lo);

            if self.is_pure_callee(callee) {
                self.annotate(call.span);
            }
        }
    }

    fn visit_mut_new_expr(&mut self, new: &mut NewExpr) {
        new.visit_mut_children_with(self);

        if self.is_pure_callee(&new.callee) {
            self.annotate(new.span);
        }
    }

    // `foo()?.bar()` and `foo()?.()` are never marked themselves, but may start
    // with a marked call.
    fn visit_mut_opt_chain_expr(&mut self, chain: &mut OptChainExpr) {
        chain.visit_mut_children_with(self);

        let outer = chain.span.lo;
        self.parenthesize_opt_chain_head(chain, outer);
    }

    fn visit_mut_tagged_tpl(&mut self, tpl: &mut TaggedTpl) {
        tpl.visit_mut_children_with(self);

        self.parenthesize_annotated_head(&mut tpl.tag, tpl.span.lo);
    }
}
