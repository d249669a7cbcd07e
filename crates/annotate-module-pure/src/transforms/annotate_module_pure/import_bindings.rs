use rustc_hash::FxHashMap;
use swc_core::{
    atoms::{Atom, Wtf8Atom},
    ecma::ast::*,
};

/// How an import introduced its local binding.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum ImportKind {
    /// `import foo from "m"`
    Default,
    /// `import * as foo from "m"`
    Namespace,
    /// `import { foo } from "m"` or `import { foo as bar } from "m"`, holding the
    /// exported name (`foo` in both cases).
    Named(Atom),
}

#[derive(Clone, Debug)]
pub(crate) struct ImportBinding {
    pub src: Wtf8Atom,
    pub kind: ImportKind,
}

/// Value bindings introduced by the `import` declarations of a module.
///
/// Note: keyed by [Id], so `resolver` must have run. Locals shadowing an
/// import get their own syntax context and never resolve to it.
#[derive(Debug, Default)]
pub(crate) struct ImportBindings {
    bindings: FxHashMap<Id, ImportBinding>,
}

impl ImportBindings {
    pub fn collect(module: &Module) -> Self {
        let mut bindings = FxHashMap::default();

        for item in &module.body {
            let ModuleItem::ModuleDecl(ModuleDecl::Import(import)) = item else {
                continue;
            };
            if import.type_only {
                continue;
            }

            for specifier in &import.specifiers {
                let (local, kind) = match specifier {
                    ImportSpecifier::Named(ImportNamedSpecifier { is_type_only, .. })
                        if *is_type_only =>
                    {
                        continue;
                    }
                    ImportSpecifier::Named(ImportNamedSpecifier {
                        local, imported, ..
                    }) => (
                        local,
                        ImportKind::Named(imported.as_ref().map_or_else(
                            || local.sym.clone(),
                            |imported| imported.atom().into_owned(),
                        )),
                    ),
                    ImportSpecifier::Default(ImportDefaultSpecifier { local, .. }) => {
                        (local, ImportKind::Default)
                    }
                    ImportSpecifier::Namespace(ImportStarAsSpecifier { local, .. }) => {
                        (local, ImportKind::Namespace)
                    }
                };

                tracing::trace!(
                    "import binding {}{:?} = {:?} from {:?}",
                    local.sym,
                    local.ctxt,
                    kind,
                    import.src.value
                );
                bindings.insert(
                    local.to_id(),
                    ImportBinding {
                        src: import.src.value.clone(),
                        kind,
                    },
                );
            }
        }

        ImportBindings { bindings }
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// The import that introduced `ident`, if any.
    pub fn get(&self, ident: &Ident) -> Option<&ImportBinding> {
        self.bindings.get(&ident.to_id())
    }

    /// Whether `ident` refers to an import from `module` whose imported name is
    /// one of `imported_names`. `"default"` accepts a default import and `"*"` a
    /// namespace import.
    pub fn references_import(
        &self,
        ident: &Ident,
        module: &str,
        imported_names: &[String],
    ) -> bool {
        let Some(binding) = self.get(ident) else {
            return false;
        };
        if binding.src.as_str() != Some(module) {
            return false;
        }

        let accepts = |name: &str| imported_names.iter().any(|n| n == name);
        match &binding.kind {
            ImportKind::Default => accepts("default"),
            ImportKind::Namespace => accepts("*"),
            ImportKind::Named(exported) => accepts(&**exported),
        }
    }
}
