//! Entry-point resolution and `__main__` bootstrap rendering.

use indexmap::IndexMap;
use std::fmt;

use super::error::{Error, Result};

/// Picks the entry point string for the archive.
///
/// An explicit override wins verbatim. Otherwise the first script declared by
/// the project (in declaration order) is used. `None` means the archive relies
/// on a `__main__.py` already present in the library tree.
pub fn resolve(explicit: Option<&str>, declared_scripts: &IndexMap<String, String>) -> Option<String> {
    if let Some(main) = explicit {
        return Some(main.to_string());
    }

    declared_scripts.first().map(|(name, target)| {
        log::debug!("Using first declared script {name:?} -> {target}");
        target.clone()
    })
}

/// A parsed entry point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryPoint {
    /// `module:callable`, where `callable` may itself be dotted.
    Callable {
        /// Dotted module path.
        module: String,
        /// Dotted attribute path inside the module.
        callable: String,
    },
    /// A module executed as `__main__`.
    Module(String),
}

impl EntryPoint {
    /// Parses `module` or `module:callable`, validating every dotted part.
    pub fn parse(raw: &str) -> Result<Self> {
        let invalid = || Error::InvalidEntryPoint(raw.to_string());

        let entry = match raw.split_once(':') {
            Some((module, callable)) => EntryPoint::Callable {
                module: module.to_string(),
                callable: callable.to_string(),
            },
            None => EntryPoint::Module(raw.to_string()),
        };

        let valid = match &entry {
            EntryPoint::Callable { module, callable } => {
                is_dotted_identifier(module) && is_dotted_identifier(callable)
            }
            EntryPoint::Module(module) => is_dotted_identifier(module),
        };

        if valid { Ok(entry) } else { Err(invalid()) }
    }

    /// Renders the `__main__.py` source that invokes this entry point.
    pub fn bootstrap(&self) -> String {
        match self {
            EntryPoint::Callable { module, callable } => format!(
                "# -*- coding: utf-8 -*-\nimport {module}\n{module}.{callable}()\n"
            ),
            EntryPoint::Module(module) => format!(
                "# -*- coding: utf-8 -*-\nimport runpy\nrunpy.run_module({module:?}, run_name=\"__main__\", alter_sys=True)\n"
            ),
        }
    }
}

impl fmt::Display for EntryPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryPoint::Callable { module, callable } => write!(f, "{module}:{callable}"),
            EntryPoint::Module(module) => f.write_str(module),
        }
    }
}

fn is_dotted_identifier(s: &str) -> bool {
    !s.is_empty() && s.split('.').all(is_identifier)
}

fn is_identifier(part: &str) -> bool {
    let mut chars = part.chars();
    match chars.next() {
        Some(c) if c == '_' || c.is_alphabetic() => chars.all(|c| c == '_' || c.is_alphanumeric()),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scripts(pairs: &[(&str, &str)]) -> IndexMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn first_declared_script_wins() {
        let declared = scripts(&[("a", "pkg.mod:a_main"), ("b", "pkg.mod:b_main")]);
        assert_eq!(resolve(None, &declared).as_deref(), Some("pkg.mod:a_main"));
    }

    #[test]
    fn declaration_order_is_not_sorted() {
        let declared = scripts(&[("zeta", "z:main"), ("alpha", "a:main")]);
        assert_eq!(resolve(None, &declared).as_deref(), Some("z:main"));
    }

    #[test]
    fn explicit_override_is_verbatim() {
        let declared = scripts(&[("a", "pkg.mod:a_main")]);
        assert_eq!(resolve(Some("x.y:z"), &declared).as_deref(), Some("x.y:z"));
        assert_eq!(resolve(Some("not valid!"), &declared).as_deref(), Some("not valid!"));
    }

    #[test]
    fn nothing_declared_resolves_to_none() {
        assert_eq!(resolve(None, &IndexMap::new()), None);
    }

    #[test]
    fn parses_callable_and_module_forms() {
        assert_eq!(
            EntryPoint::parse("pkg.cli:app.run").unwrap(),
            EntryPoint::Callable {
                module: "pkg.cli".into(),
                callable: "app.run".into()
            }
        );
        assert_eq!(
            EntryPoint::parse("pkg.__main__").unwrap(),
            EntryPoint::Module("pkg.__main__".into())
        );
    }

    #[test]
    fn rejects_malformed_entry_points() {
        for raw in [
            "",
            ":main",
            "pkg:",
            "pkg..mod:main",
            "1pkg:main",
            "pkg:ma-in",
            "a:b:c",
            "app.cli : main",
            " app.cli:main",
            "tool ",
        ] {
            assert!(
                matches!(EntryPoint::parse(raw), Err(Error::InvalidEntryPoint(_))),
                "{raw:?} should be rejected"
            );
        }
    }

    #[test]
    fn callable_bootstrap_calls_once() {
        let entry = EntryPoint::parse("x.y:z").unwrap();
        assert_eq!(
            entry.bootstrap(),
            "# -*- coding: utf-8 -*-\nimport x.y\nx.y.z()\n"
        );
    }

    #[test]
    fn module_bootstrap_uses_runpy() {
        let entry = EntryPoint::parse("tool").unwrap();
        assert!(entry.bootstrap().contains("runpy.run_module(\"tool\", run_name=\"__main__\""));
    }
}
