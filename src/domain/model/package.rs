use serde::{Deserialize, Serialize};

use super::{CommandTemplate, Source};

/// Free-form uninstall information for script-based packages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ScriptMetadata {
    #[serde(default)]
    pub linux: Option<String>,
    #[serde(default)]
    pub windows: Option<String>,
    #[serde(default)]
    pub manual_instructions: Option<String>,
}

impl ScriptMetadata {
    /// Script for the given OS key (`"linux"` or `"windows"`), if non-blank.
    pub fn script_for(&self, windows: bool) -> Option<&str> {
        let script = if windows { &self.windows } else { &self.linux };
        script.as_deref().filter(|s| !s.trim().is_empty())
    }

    pub fn instructions(&self) -> Option<&str> {
        self.manual_instructions
            .as_deref()
            .filter(|s| !s.trim().is_empty())
    }
}

/// An available package of an app, tagged with its owning source.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Package {
    /// The string passed to the shell command
    pub identifier: String,
    pub source: Source,
    pub setup_cmd: Option<CommandTemplate>,
    pub cleanup_cmd: Option<CommandTemplate>,
    pub uninstall_metadata: Option<ScriptMetadata>,
}

/// An app with its currently available packages, in catalog order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct App {
    pub id: String,
    pub display_name: String,
    pub packages: Vec<Package>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_for_picks_os_entry() {
        let meta = ScriptMetadata {
            linux: Some("rm -rf ~/.local/bin/tool".into()),
            windows: Some("Remove-Item tool.exe".into()),
            manual_instructions: None,
        };
        assert_eq!(meta.script_for(false), Some("rm -rf ~/.local/bin/tool"));
        assert_eq!(meta.script_for(true), Some("Remove-Item tool.exe"));
    }

    #[test]
    fn test_blank_entries_are_absent() {
        let meta = ScriptMetadata {
            linux: Some("  ".into()),
            windows: None,
            manual_instructions: Some("".into()),
        };
        assert_eq!(meta.script_for(false), None);
        assert_eq!(meta.instructions(), None);
    }
}
