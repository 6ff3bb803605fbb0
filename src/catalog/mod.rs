//! Catalog abstraction for distros, sources and apps.
//!
//! The engine only reads from the catalog. Two lookups are exposed so they
//! can be issued concurrently; implementations hand out already-parsed
//! domain types and filter out unavailable packages.

mod json;
pub mod raw;

use anyhow::Result;
use async_trait::async_trait;

pub use json::JsonCatalog;

use crate::domain::model::{App, Distro};

/// Lookup of a distro and the sources bound to it.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DistroCatalog: Send + Sync {
    /// Fetch a distro by slug with its source bindings. `Ok(None)` if unknown.
    async fn get_distro_with_bound_sources(&self, slug: &str) -> Result<Option<Distro>>;
}

/// Lookup of apps and their available packages.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AppCatalog: Send + Sync {
    /// Fetch the known apps among `app_ids`, in request order.
    async fn get_apps_with_available_packages(&self, app_ids: &[String]) -> Result<Vec<App>>;
}
