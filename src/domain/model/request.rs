use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Upper bound on app ids accepted in one request.
pub const MAX_APP_IDS: usize = 100;

/// Which way the commands go.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Install,
    Uninstall,
}

impl Direction {
    pub fn is_uninstall(self) -> bool {
        matches!(self, Direction::Uninstall)
    }

    /// Capitalized verb used in warnings ("Install", "Uninstall").
    pub fn verb(self) -> &'static str {
        match self {
            Direction::Install => "Install",
            Direction::Uninstall => "Uninstall",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Install => write!(f, "install"),
            Direction::Uninstall => write!(f, "uninstall"),
        }
    }
}

/// How packages are managed on NixOS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NixInstallMethod {
    NixShell,
    NixEnv,
    NixFlakes,
}

impl fmt::Display for NixInstallMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NixInstallMethod::NixShell => write!(f, "nix-shell"),
            NixInstallMethod::NixEnv => write!(f, "nix-env"),
            NixInstallMethod::NixFlakes => write!(f, "nix-flakes"),
        }
    }
}

impl FromStr for NixInstallMethod {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "nix-shell" => Ok(NixInstallMethod::NixShell),
            "nix-env" => Ok(NixInstallMethod::NixEnv),
            "nix-flakes" => Ok(NixInstallMethod::NixFlakes),
            _ => anyhow::bail!(
                "Unknown NixOS install method: {}. Expected nix-shell, nix-env, or nix-flakes.",
                s
            ),
        }
    }
}

/// Options shared by both directions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerateOptions {
    /// Source slug that receives a +100 score bonus
    pub source_preference: Option<String>,
    pub nix_install_method: Option<NixInstallMethod>,
    /// Collect setup (install) or cleanup (uninstall) commands
    pub include_setup_cleanup: bool,
    /// Collect dependency cleanup commands (uninstall only)
    pub include_dependency_cleanup: bool,
}

/// A request to generate commands for a set of apps on one distro.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateRequest {
    pub distro_slug: String,
    pub app_ids: Vec<String>,
    pub options: GenerateOptions,
}

impl GenerateRequest {
    pub fn new(distro_slug: impl Into<String>, app_ids: Vec<String>) -> Self {
        Self {
            distro_slug: distro_slug.into(),
            app_ids,
            options: GenerateOptions::default(),
        }
    }

    pub fn prefer(mut self, source_slug: impl Into<String>) -> Self {
        self.options.source_preference = Some(source_slug.into());
        self
    }

    pub fn nix_method(mut self, method: NixInstallMethod) -> Self {
        self.options.nix_install_method = Some(method);
        self
    }

    pub fn setup_cleanup(mut self, include: bool) -> Self {
        self.options.include_setup_cleanup = include;
        self
    }

    pub fn dependency_cleanup(mut self, include: bool) -> Self {
        self.options.include_dependency_cleanup = include;
        self
    }

    /// App ids with duplicates removed, first occurrence kept.
    pub fn unique_app_ids(&self) -> Vec<String> {
        let mut seen = std::collections::HashSet::new();
        self.app_ids
            .iter()
            .filter(|id| seen.insert(id.as_str()))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nix_method_parse() {
        assert_eq!(
            "nix-shell".parse::<NixInstallMethod>().unwrap(),
            NixInstallMethod::NixShell
        );
        assert_eq!(
            "NIX-ENV".parse::<NixInstallMethod>().unwrap(),
            NixInstallMethod::NixEnv
        );
        assert_eq!(
            "nix-flakes".parse::<NixInstallMethod>().unwrap(),
            NixInstallMethod::NixFlakes
        );
        assert!("nix-channel".parse::<NixInstallMethod>().is_err());
    }

    #[test]
    fn test_nix_method_display_round_trips_serde_name() {
        let json = serde_json::to_string(&NixInstallMethod::NixFlakes).unwrap();
        assert_eq!(json, format!("\"{}\"", NixInstallMethod::NixFlakes));
    }

    #[test]
    fn test_unique_app_ids_keeps_first_occurrence() {
        let req = GenerateRequest::new(
            "ubuntu",
            vec!["git".into(), "vlc".into(), "git".into()],
        );
        assert_eq!(req.unique_app_ids(), vec!["git".to_string(), "vlc".to_string()]);
    }

    #[test]
    fn test_builder_sets_options() {
        let req = GenerateRequest::new("nixos", vec!["git".into()])
            .prefer("nix")
            .nix_method(NixInstallMethod::NixEnv)
            .setup_cleanup(true)
            .dependency_cleanup(true);

        assert_eq!(req.options.source_preference.as_deref(), Some("nix"));
        assert_eq!(req.options.nix_install_method, Some(NixInstallMethod::NixEnv));
        assert!(req.options.include_setup_cleanup);
        assert!(req.options.include_dependency_cleanup);
    }
}
