use anyhow::{Context, Result};
use serde::{Deserialize, de::IgnoredAny};

use crate::FxIndexMap;

/// Module specifier → patterns of calls known to be free of side effects.
///
/// Keys are compared verbatim against the source of `import` declarations.
pub type PureCalls = FxIndexMap<String, Vec<PureCallPattern>>;

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct Config {
    #[serde(default)]
    pub pure_calls: PureCalls,
}

impl Config {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("invalid annotate-module-pure options")
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
pub enum PureCallPattern {
    /// `"name"`: a call of the imported binding itself.
    ///
    /// `"default"` names the default import and `"*"` the namespace import.
    Plain(String),
    /// `["root", "a", "b"]`: a call of `root.a.b` (or any longer static chain
    /// starting with it) where `root` is the imported binding.
    Chain(Vec<String>),
    /// Anything else. Kept so a single odd entry doesn't reject the whole
    /// configuration; it never matches.
    Unrecognized(IgnoredAny),
}

/// Property suffix of a chain pattern, keyed by the exported name of its root.
#[derive(Debug)]
pub(crate) struct ChainPattern {
    pub root: String,
    pub props: Vec<String>,
}

#[derive(Debug, Default)]
pub(crate) struct ModulePatterns {
    pub plain: Vec<String>,
    pub chains: Vec<ChainPattern>,
}

/// [PureCalls] split per module into plain names and chains, in configuration
/// order.
#[derive(Debug, Default)]
pub(crate) struct PureCallTable {
    modules: Vec<(String, ModulePatterns)>,
}

impl PureCallTable {
    pub fn new(pure_calls: PureCalls) -> Self {
        let modules = pure_calls
            .into_iter()
            .map(|(module, patterns)| {
                let mut table = ModulePatterns::default();
                for pattern in patterns {
                    match pattern {
                        PureCallPattern::Plain(name) => table.plain.push(name),
                        PureCallPattern::Chain(mut segments) => match segments.len() {
                            0 => {
                                tracing::debug!("skipping empty chain pattern for {module:?}");
                            }
                            // A lone root only identifies the root call.
                            1 => table.plain.extend(segments.pop()),
                            _ => {
                                let root = segments.remove(0);
                                table.chains.push(ChainPattern {
                                    root,
                                    props: segments,
                                });
                            }
                        },
                        PureCallPattern::Unrecognized(_) => {
                            tracing::debug!("skipping unrecognized pattern for {module:?}");
                        }
                    }
                }
                (module, table)
            })
            .collect();

        PureCallTable { modules }
    }

    pub fn is_empty(&self) -> bool {
        self.modules
            .iter()
            .all(|(_, patterns)| patterns.plain.is_empty() && patterns.chains.is_empty())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ModulePatterns)> {
        self.modules
            .iter()
            .map(|(module, patterns)| (module.as_str(), patterns))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plugin_options() {
        let config = Config::from_json(
            r#"{ "pureCalls": { "foo": ["foo", ["foo", "bar"]], "react": [["default", "createContext"]] } }"#,
        )
        .unwrap();

        let modules: Vec<_> = config.pure_calls.keys().map(String::as_str).collect();
        assert_eq!(modules, ["foo", "react"]);

        let foo = &config.pure_calls["foo"];
        assert!(matches!(&foo[0], PureCallPattern::Plain(name) if name == "foo"));
        assert!(matches!(&foo[1], PureCallPattern::Chain(chain) if chain == &["foo", "bar"]));
    }

    #[test]
    fn tolerates_unrecognized_entries() {
        let config = Config::from_json(r#"{ "pureCalls": { "foo": [1, ["foo", 2], {}, "foo"] } }"#)
            .unwrap();
        let table = PureCallTable::new(config.pure_calls);

        let (module, patterns) = table.iter().next().unwrap();
        assert_eq!(module, "foo");
        assert_eq!(patterns.plain, ["foo"]);
        assert!(patterns.chains.is_empty());
    }

    #[test]
    fn rejects_unknown_options() {
        assert!(Config::from_json(r#"{ "pure": {} }"#).is_err());
    }

    #[test]
    fn normalizes_chain_patterns() {
        let config = Config::from_json(
            r#"{ "pureCalls": { "m": [[], ["object"], ["object", "a", "b"]] } }"#,
        )
        .unwrap();
        let table = PureCallTable::new(config.pure_calls);
        assert!(!table.is_empty());

        let (_, patterns) = table.iter().next().unwrap();
        assert_eq!(patterns.plain, ["object"]);
        assert_eq!(patterns.chains.len(), 1);
        assert_eq!(patterns.chains[0].root, "object");
        assert_eq!(patterns.chains[0].props, ["a", "b"]);
    }

    #[test]
    fn empty_table() {
        let config = Config::from_json(r#"{ "pureCalls": { "m": [[]] } }"#).unwrap();
        assert!(PureCallTable::new(config.pure_calls).is_empty());
        assert!(PureCallTable::new(Default::default()).is_empty());
    }
}
