use serde::{Deserialize, Serialize};

use super::CommandTemplate;

/// Slug of the distro that never receives a `sudo` prefix.
pub const WINDOWS_SLUG: &str = "windows";

/// A distribution channel for packages (apt, flatpak, script, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Source {
    pub id: String,
    pub slug: String,
    pub name: String,
    #[serde(default)]
    pub install_cmd: Option<String>,
    /// `None` means uninstalling through this source is unsupported
    #[serde(default)]
    pub remove_cmd: Option<String>,
    #[serde(default)]
    pub setup_cmd: Option<CommandTemplate>,
    #[serde(default)]
    pub cleanup_cmd: Option<CommandTemplate>,
    #[serde(default)]
    pub require_sudo: bool,
    #[serde(default)]
    pub supports_dependency_cleanup: bool,
    #[serde(default)]
    pub dependency_cleanup_cmd: Option<String>,
}

/// A source bound to a distro, with its distro-local ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceBinding {
    pub priority: i32,
    #[serde(default)]
    pub is_default: bool,
    pub source: Source,
}

/// Target operating environment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Distro {
    pub id: String,
    pub name: String,
    pub slug: String,
    /// Drives template resolution ("debian", "rhel", "arch", "nix", "windows", ...)
    pub family: String,
    #[serde(default)]
    pub bindings: Vec<SourceBinding>,
}

impl Distro {
    /// Find the binding for a source slug.
    pub fn binding_for(&self, source_slug: &str) -> Option<&SourceBinding> {
        self.bindings.iter().find(|b| b.source.slug == source_slug)
    }

    pub fn is_windows(&self) -> bool {
        self.slug == WINDOWS_SLUG
    }

    /// Prefix `cmd` with `sudo ` when the source requires it and the distro
    /// is not Windows.
    pub fn with_sudo(&self, require_sudo: bool, cmd: &str) -> String {
        if require_sudo && !self.is_windows() {
            format!("sudo {}", cmd)
        } else {
            cmd.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn distro(slug: &str) -> Distro {
        Distro {
            id: slug.into(),
            name: slug.into(),
            slug: slug.into(),
            family: "debian".into(),
            bindings: vec![SourceBinding {
                priority: 10,
                is_default: true,
                source: Source {
                    slug: "apt".into(),
                    name: "APT".into(),
                    ..Default::default()
                },
            }],
        }
    }

    #[test]
    fn test_with_sudo_on_linux() {
        let d = distro("ubuntu");
        assert_eq!(d.with_sudo(true, "apt remove -y"), "sudo apt remove -y");
        assert_eq!(d.with_sudo(false, "apt remove -y"), "apt remove -y");
    }

    #[test]
    fn test_windows_never_gets_sudo() {
        let d = distro("windows");
        assert_eq!(d.with_sudo(true, "winget uninstall"), "winget uninstall");
    }

    #[test]
    fn test_binding_for() {
        let d = distro("ubuntu");
        assert_eq!(d.binding_for("apt").map(|b| b.priority), Some(10));
        assert!(d.binding_for("flatpak").is_none());
    }
}
