use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Key in a per-family map that matches any distro family.
pub const WILDCARD_FAMILY: &str = "*";

/// A command template that either applies to every distro family or is
/// chosen per family.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CommandTemplate {
    Literal(String),
    PerFamily(BTreeMap<String, String>),
}

impl CommandTemplate {
    /// Resolve the template for a distro family.
    ///
    /// Per-family maps try the exact family key, then `"*"`. Blank results
    /// are treated as absent.
    pub fn resolve(&self, family: &str) -> Option<&str> {
        let resolved = match self {
            CommandTemplate::Literal(cmd) => Some(cmd.as_str()),
            CommandTemplate::PerFamily(map) => map
                .get(family)
                .or_else(|| map.get(WILDCARD_FAMILY))
                .map(String::as_str),
        };
        resolved.filter(|cmd| !cmd.trim().is_empty())
    }

    /// Build a per-family template from `(family, command)` pairs.
    pub fn per_family<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        CommandTemplate::PerFamily(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl From<&str> for CommandTemplate {
    fn from(cmd: &str) -> Self {
        CommandTemplate::Literal(cmd.to_string())
    }
}

impl From<String> for CommandTemplate {
    fn from(cmd: String) -> Self {
        CommandTemplate::Literal(cmd)
    }
}

/// Resolve an optional template, treating `None` as absent.
pub fn resolve_optional<'a>(template: Option<&'a CommandTemplate>, family: &str) -> Option<&'a str> {
    template.and_then(|t| t.resolve(family))
}
