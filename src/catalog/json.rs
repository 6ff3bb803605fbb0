use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use async_trait::async_trait;
use log::{debug, warn};

use super::raw::{CatalogDocument, parse_metadata, parse_template};
use super::{AppCatalog, DistroCatalog};
use crate::domain::model::{App, Distro, Package, Source, SourceBinding};
use crate::runtime::Runtime;

/// Catalog backed by a single JSON document, parsed once at load time.
#[derive(Debug, Clone, Default)]
pub struct JsonCatalog {
    distros: Vec<Distro>,
    apps: HashMap<String, App>,
}

impl JsonCatalog {
    /// Load a catalog document from disk.
    #[tracing::instrument(skip(runtime))]
    pub fn load<R: Runtime>(runtime: &R, path: &Path) -> Result<Self> {
        let content = runtime
            .read_to_string(path)
            .with_context(|| format!("Failed to read catalog {:?}", path))?;
        let catalog = Self::from_json(&content)
            .with_context(|| format!("Failed to parse catalog {:?}", path))?;
        debug!(
            "Loaded catalog {:?}: {} distros, {} apps",
            path,
            catalog.distros.len(),
            catalog.apps.len()
        );
        Ok(catalog)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        let document: CatalogDocument = serde_json::from_str(content)?;
        Ok(Self::from_document(document))
    }

    pub fn from_document(document: CatalogDocument) -> Self {
        let sources: HashMap<String, Source> = document
            .sources
            .iter()
            .map(|s| (s.slug.clone(), s.to_source()))
            .collect();

        let distros = document
            .distros
            .into_iter()
            .map(|d| {
                let bindings = d
                    .sources
                    .iter()
                    .filter_map(|b| match sources.get(&b.source) {
                        Some(source) => Some(SourceBinding {
                            priority: b.priority,
                            is_default: b.is_default,
                            source: source.clone(),
                        }),
                        None => {
                            warn!("Distro {} binds unknown source {}", d.slug, b.source);
                            None
                        }
                    })
                    .collect();
                Distro {
                    id: if d.id.is_empty() { d.slug.clone() } else { d.id },
                    name: d.name,
                    slug: d.slug,
                    family: d.family,
                    bindings,
                }
            })
            .collect();

        let apps = document
            .apps
            .into_iter()
            .map(|a| {
                let packages = a
                    .packages
                    .iter()
                    .filter(|p| p.is_available)
                    .filter_map(|p| match sources.get(&p.source) {
                        Some(source) => Some(Package {
                            identifier: p.identifier.clone(),
                            source: source.clone(),
                            setup_cmd: parse_template(p.package_setup_cmd.as_ref()),
                            cleanup_cmd: parse_template(p.package_cleanup_cmd.as_ref()),
                            uninstall_metadata: parse_metadata(p.uninstall_metadata.as_ref()),
                        }),
                        None => {
                            warn!("App {} references unknown source {}", a.id, p.source);
                            None
                        }
                    })
                    .collect();
                let app = App {
                    id: a.id.clone(),
                    display_name: a.display_name,
                    packages,
                };
                (a.id, app)
            })
            .collect();

        Self { distros, apps }
    }
}

#[async_trait]
impl DistroCatalog for JsonCatalog {
    async fn get_distro_with_bound_sources(&self, slug: &str) -> Result<Option<Distro>> {
        Ok(self.distros.iter().find(|d| d.slug == slug).cloned())
    }
}

#[async_trait]
impl AppCatalog for JsonCatalog {
    async fn get_apps_with_available_packages(&self, app_ids: &[String]) -> Result<Vec<App>> {
        Ok(app_ids
            .iter()
            .filter_map(|id| self.apps.get(id).cloned())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::MockRuntime;
    use crate::test_utils::CATALOG_JSON;
    use std::path::PathBuf;

    #[tokio::test]
    async fn test_distro_bindings_resolved_by_slug() {
        // --- Setup ---
        let catalog = JsonCatalog::from_json(CATALOG_JSON).unwrap();

        // --- Execute ---
        let distro = catalog
            .get_distro_with_bound_sources("ubuntu")
            .await
            .unwrap()
            .unwrap();

        // --- Verify ---
        assert_eq!(distro.family, "debian");
        let slugs: Vec<_> = distro.bindings.iter().map(|b| b.source.slug.as_str()).collect();
        assert_eq!(slugs, vec!["apt", "flatpak"]);
        assert!(distro.bindings[0].is_default);
        assert_eq!(distro.bindings[0].source.remove_cmd.as_deref(), Some("apt remove -y"));
    }

    #[tokio::test]
    async fn test_unknown_distro_is_none() {
        let catalog = JsonCatalog::from_json(CATALOG_JSON).unwrap();
        let distro = catalog.get_distro_with_bound_sources("haiku").await.unwrap();
        assert!(distro.is_none());
    }

    #[tokio::test]
    async fn test_apps_in_request_order_and_unknown_omitted() {
        // --- Setup ---
        let catalog = JsonCatalog::from_json(CATALOG_JSON).unwrap();
        let ids = vec!["vlc".to_string(), "nope".to_string(), "firefox".to_string()];

        // --- Execute ---
        let apps = catalog.get_apps_with_available_packages(&ids).await.unwrap();

        // --- Verify ---
        let names: Vec<_> = apps.iter().map(|a| a.display_name.as_str()).collect();
        assert_eq!(names, vec!["VLC", "Firefox"]);
    }

    #[tokio::test]
    async fn test_unavailable_packages_filtered() {
        let catalog = JsonCatalog::from_json(CATALOG_JSON).unwrap();
        let apps = catalog
            .get_apps_with_available_packages(&["git".to_string()])
            .await
            .unwrap();

        // the snap package of git is marked unavailable
        assert_eq!(apps[0].packages.len(), 1);
        assert_eq!(apps[0].packages[0].source.slug, "apt");
    }

    #[test]
    fn test_load_reads_through_runtime() {
        // --- Setup ---
        let mut runtime = MockRuntime::new();
        runtime
            .expect_read_to_string()
            .returning(|_| Ok(CATALOG_JSON.to_string()));

        // --- Execute ---
        let catalog = JsonCatalog::load(&runtime, &PathBuf::from("/etc/pkgcmd/catalog.json"));

        // --- Verify ---
        assert!(catalog.is_ok());
    }

    #[test]
    fn test_load_reports_parse_errors() {
        let mut runtime = MockRuntime::new();
        runtime
            .expect_read_to_string()
            .returning(|_| Ok("{ not json".to_string()));

        let err = JsonCatalog::load(&runtime, &PathBuf::from("/tmp/catalog.json")).unwrap_err();
        assert!(err.to_string().contains("Failed to parse catalog"));
    }
}
