//! Stored catalog records and their one-time conversion into domain types.
//!
//! Template and metadata fields may be stored as structured JSON or as JSON
//! text inside a string. They are parsed here so the engine never sees raw
//! text.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::model::{CommandTemplate, ScriptMetadata, Source};

fn default_true() -> bool {
    true
}

/// Top-level catalog document.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CatalogDocument {
    #[serde(default)]
    pub distros: Vec<StoredDistro>,
    #[serde(default)]
    pub sources: Vec<StoredSource>,
    #[serde(default)]
    pub apps: Vec<StoredApp>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredDistro {
    #[serde(default)]
    pub id: String,
    pub name: String,
    pub slug: String,
    pub family: String,
    #[serde(default)]
    pub sources: Vec<StoredBinding>,
}

/// A distro-to-source binding, referencing the source by slug.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredBinding {
    pub source: String,
    #[serde(default)]
    pub priority: i32,
    #[serde(default)]
    pub is_default: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredSource {
    #[serde(default)]
    pub id: String,
    pub slug: String,
    pub name: String,
    #[serde(default)]
    pub install_cmd: Option<String>,
    #[serde(default)]
    pub remove_cmd: Option<String>,
    #[serde(default)]
    pub setup_cmd: Option<Value>,
    #[serde(default)]
    pub cleanup_cmd: Option<Value>,
    #[serde(default)]
    pub require_sudo: bool,
    #[serde(default)]
    pub supports_dependency_cleanup: bool,
    #[serde(default)]
    pub dependency_cleanup_cmd: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredApp {
    pub id: String,
    pub display_name: String,
    #[serde(default)]
    pub packages: Vec<StoredPackage>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredPackage {
    /// Slug of the owning source
    pub source: String,
    pub identifier: String,
    #[serde(default = "default_true")]
    pub is_available: bool,
    #[serde(default)]
    pub package_setup_cmd: Option<Value>,
    #[serde(default)]
    pub package_cleanup_cmd: Option<Value>,
    #[serde(default)]
    pub uninstall_metadata: Option<Value>,
}

impl StoredSource {
    pub fn to_source(&self) -> Source {
        Source {
            id: if self.id.is_empty() {
                self.slug.clone()
            } else {
                self.id.clone()
            },
            slug: self.slug.clone(),
            name: self.name.clone(),
            install_cmd: non_blank(self.install_cmd.as_deref()),
            remove_cmd: non_blank(self.remove_cmd.as_deref()),
            setup_cmd: parse_template(self.setup_cmd.as_ref()),
            cleanup_cmd: parse_template(self.cleanup_cmd.as_ref()),
            require_sudo: self.require_sudo,
            supports_dependency_cleanup: self.supports_dependency_cleanup,
            dependency_cleanup_cmd: non_blank(self.dependency_cleanup_cmd.as_deref()),
        }
    }
}

fn non_blank(s: Option<&str>) -> Option<String> {
    s.filter(|s| !s.trim().is_empty()).map(str::to_string)
}

fn string_entries(map: &serde_json::Map<String, Value>) -> Option<CommandTemplate> {
    let entries: BTreeMap<String, String> = map
        .iter()
        .filter_map(|(k, v)| v.as_str().map(|s| (k.clone(), s.to_string())))
        .collect();
    if entries.is_empty() {
        None
    } else {
        Some(CommandTemplate::PerFamily(entries))
    }
}

/// Parse a stored template field.
///
/// Never fails: text that is not valid JSON is kept as a literal command
/// unless it looks like a broken object or array, in which case the field is
/// treated as absent.
pub fn parse_template(value: Option<&Value>) -> Option<CommandTemplate> {
    match value? {
        Value::String(raw) => parse_template_text(raw),
        Value::Object(map) => string_entries(map),
        _ => None,
    }
}

fn parse_template_text(raw: &str) -> Option<CommandTemplate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    match serde_json::from_str::<Value>(trimmed) {
        Ok(Value::Object(map)) => string_entries(&map),
        Ok(Value::String(inner)) => non_blank(Some(inner.as_str())).map(CommandTemplate::Literal),
        Ok(_) | Err(_) if trimmed.starts_with('{') || trimmed.starts_with('[') => None,
        _ => Some(CommandTemplate::Literal(raw.to_string())),
    }
}

/// Parse stored uninstall metadata. Anything unparseable is absent.
pub fn parse_metadata(value: Option<&Value>) -> Option<ScriptMetadata> {
    match value? {
        Value::String(raw) => serde_json::from_str::<ScriptMetadata>(raw).ok(),
        v @ Value::Object(_) => serde_json::from_value::<ScriptMetadata>(v.clone()).ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_template_from_object() {
        let value = json!({"debian": "sudo apt autoremove -y", "*": "echo none", "arch": 3});
        let template = parse_template(Some(&value)).unwrap();
        assert_eq!(template.resolve("debian"), Some("sudo apt autoremove -y"));
        assert_eq!(template.resolve("arch"), Some("echo none"));
    }

    #[test]
    fn test_template_from_json_text() {
        let value = json!(r#"{"rhel": "sudo dnf autoremove -y"}"#);
        let template = parse_template(Some(&value)).unwrap();
        assert_eq!(template.resolve("rhel"), Some("sudo dnf autoremove -y"));
        assert_eq!(template.resolve("debian"), None);
    }

    #[test]
    fn test_template_plain_text_is_literal() {
        let value = json!("rm -rf ~/.config/app");
        assert_eq!(
            parse_template(Some(&value)),
            Some(CommandTemplate::from("rm -rf ~/.config/app"))
        );
    }

    #[test]
    fn test_template_numeric_text_is_literal() {
        // valid JSON, but not an object, so kept as a command
        let value = json!("true");
        assert_eq!(parse_template(Some(&value)), Some(CommandTemplate::from("true")));
    }

    #[test]
    fn test_template_broken_object_is_absent() {
        let value = json!(r#"{"debian": "sudo apt"#);
        assert_eq!(parse_template(Some(&value)), None);
    }

    #[test]
    fn test_template_blank_and_null_are_absent() {
        assert_eq!(parse_template(Some(&json!("  "))), None);
        assert_eq!(parse_template(Some(&Value::Null)), None);
        assert_eq!(parse_template(None), None);
    }

    #[test]
    fn test_metadata_from_text_and_object() {
        let text = json!(r#"{"linux": "rm ~/bin/tool", "manualInstructions": "Remove it"}"#);
        let meta = parse_metadata(Some(&text)).unwrap();
        assert_eq!(meta.linux.as_deref(), Some("rm ~/bin/tool"));
        assert_eq!(meta.manual_instructions.as_deref(), Some("Remove it"));

        let object = json!({"windows": "del tool.exe"});
        let meta = parse_metadata(Some(&object)).unwrap();
        assert_eq!(meta.windows.as_deref(), Some("del tool.exe"));
    }

    #[test]
    fn test_malformed_metadata_is_absent() {
        assert_eq!(parse_metadata(Some(&json!("{not json"))), None);
        assert_eq!(parse_metadata(Some(&json!({"linux": 42}))), None);
        assert_eq!(parse_metadata(Some(&json!(["linux"]))), None);
    }

    #[test]
    fn test_stored_source_blank_commands_are_absent() {
        let stored: StoredSource = serde_json::from_value(json!({
            "slug": "snap",
            "name": "Snap",
            "installCmd": "snap install",
            "removeCmd": "",
            "requireSudo": true
        }))
        .unwrap();

        let source = stored.to_source();
        assert_eq!(source.id, "snap");
        assert_eq!(source.install_cmd.as_deref(), Some("snap install"));
        assert_eq!(source.remove_cmd, None);
    }
}
