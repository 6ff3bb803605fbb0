use anyhow::Result;
use log::debug;
use std::path::PathBuf;

use crate::runtime::Runtime;

/// Environment variable naming the catalog file.
pub const CATALOG_ENV: &str = "PKGCMD_CATALOG";

/// Resolved CLI configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub catalog_path: PathBuf,
}

impl Config {
    /// Resolve the catalog path: explicit flag, then `PKGCMD_CATALOG`, then
    /// `<config_dir>/pkgcmd/catalog.json`.
    pub fn load<R: Runtime>(runtime: &R, catalog: Option<PathBuf>) -> Result<Self> {
        let catalog_path = match catalog {
            Some(path) => path,
            None => match runtime.env_var(CATALOG_ENV) {
                Ok(path) if !path.trim().is_empty() => PathBuf::from(path),
                _ => default_catalog_path(runtime)?,
            },
        };
        debug!("Using catalog {:?}", catalog_path);

        if !runtime.exists(&catalog_path) {
            anyhow::bail!(
                "Catalog file {:?} does not exist. Pass --catalog or set {}.",
                catalog_path,
                CATALOG_ENV
            );
        }

        Ok(Self { catalog_path })
    }
}

fn default_catalog_path<R: Runtime>(runtime: &R) -> Result<PathBuf> {
    runtime
        .config_dir()
        .map(|dir| dir.join("pkgcmd").join("catalog.json"))
        .ok_or_else(|| {
            anyhow::anyhow!(
                "Could not determine config directory. Pass --catalog or set {}.",
                CATALOG_ENV
            )
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::MockRuntime;
    use mockall::predicate::eq;

    #[test]
    fn test_explicit_path_wins() {
        // --- Setup ---
        let mut runtime = MockRuntime::new();
        runtime.expect_exists().returning(|_| true);

        // --- Execute ---
        let config = Config::load(&runtime, Some(PathBuf::from("/srv/catalog.json"))).unwrap();

        // --- Verify ---
        assert_eq!(config.catalog_path, PathBuf::from("/srv/catalog.json"));
    }

    #[test]
    fn test_env_var_used_without_flag() {
        // --- Setup ---
        let mut runtime = MockRuntime::new();
        runtime
            .expect_env_var()
            .with(eq(CATALOG_ENV))
            .returning(|_| Ok("/opt/catalog.json".to_string()));
        runtime.expect_exists().returning(|_| true);

        // --- Execute ---
        let config = Config::load(&runtime, None).unwrap();

        // --- Verify ---
        assert_eq!(config.catalog_path, PathBuf::from("/opt/catalog.json"));
    }

    #[test]
    fn test_default_under_config_dir() {
        // --- Setup ---
        let mut runtime = MockRuntime::new();
        runtime
            .expect_env_var()
            .returning(|_| Err(std::env::VarError::NotPresent));
        runtime
            .expect_config_dir()
            .returning(|| Some(PathBuf::from("/home/user/.config")));
        runtime.expect_exists().returning(|_| true);

        // --- Execute ---
        let config = Config::load(&runtime, None).unwrap();

        // --- Verify ---
        assert_eq!(
            config.catalog_path,
            PathBuf::from("/home/user/.config/pkgcmd/catalog.json")
        );
    }

    #[test]
    fn test_missing_catalog_is_error() {
        let mut runtime = MockRuntime::new();
        runtime.expect_exists().returning(|_| false);

        let err = Config::load(&runtime, Some(PathBuf::from("/nope.json"))).unwrap_err();
        assert!(err.to_string().contains("does not exist"));
    }

    #[test]
    fn test_no_config_dir_is_error() {
        let mut runtime = MockRuntime::new();
        runtime
            .expect_env_var()
            .returning(|_| Err(std::env::VarError::NotPresent));
        runtime.expect_config_dir().returning(|| None);

        let err = Config::load(&runtime, None).unwrap_err();
        assert!(err.to_string().contains("Could not determine config directory"));
    }
}
