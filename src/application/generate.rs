//! Generate use case - drives resolution and compilation for one request.
//!
//! This use case coordinates:
//! - Request validation
//! - Concurrent distro and app lookups
//! - Package resolution, command compilation and cleanup assembly
//! - Shaping the direction-specific result

use log::info;

use crate::catalog::{AppCatalog, DistroCatalog};
use crate::domain::model::{
    App, Direction, Distro, GenerateOptions, GenerateRequest, InstallPlan, MAX_APP_IDS, Plan,
    UninstallPlan,
};
use crate::domain::service::{CleanupAssembler, Collector, CommandCompiler, PackageResolver};

use super::GenerateError;

/// Check the request shape before touching the catalog.
pub fn validate(request: &GenerateRequest) -> Result<(), GenerateError> {
    if request.distro_slug.trim().is_empty() {
        return Err(GenerateError::InvalidRequest(
            "distro slug must not be empty".into(),
        ));
    }
    let count = request.unique_app_ids().len();
    if count == 0 || request.app_ids.iter().any(|id| id.trim().is_empty()) {
        return Err(GenerateError::InvalidRequest(
            "at least one non-empty app id is required".into(),
        ));
    }
    if count > MAX_APP_IDS {
        return Err(GenerateError::InvalidRequest(format!(
            "at most {} app ids are allowed, got {}",
            MAX_APP_IDS, count
        )));
    }
    Ok(())
}

/// Run the engine over already-fetched catalog data.
///
/// All accumulators live in this call only.
pub fn build_plan(
    distro: &Distro,
    apps: &[App],
    direction: Direction,
    options: &GenerateOptions,
) -> Plan {
    let mut collector = Collector::new();
    let mut assembler = CleanupAssembler::new(distro, direction, options);

    let selected = PackageResolver::new(distro, options.source_preference.as_deref())
        .resolve(apps, &mut collector);
    let compiled = CommandCompiler::new(distro, direction, options.nix_install_method).compile(
        &selected,
        &mut collector,
        &mut assembler,
    );

    let (auxiliary_commands, dependency_cleanup_commands) = assembler.finish();
    let (warnings, manual_steps) = collector.into_parts();

    Plan {
        commands: compiled.commands,
        auxiliary_commands,
        dependency_cleanup_commands,
        warnings,
        breakdown: compiled.breakdown,
        manual_steps,
    }
}

/// Generates install and uninstall commands against a catalog.
pub struct CommandGenerator<'a> {
    distros: &'a dyn DistroCatalog,
    apps: &'a dyn AppCatalog,
}

impl<'a> CommandGenerator<'a> {
    pub fn new(distros: &'a dyn DistroCatalog, apps: &'a dyn AppCatalog) -> Self {
        Self { distros, apps }
    }

    pub async fn install(&self, request: &GenerateRequest) -> Result<InstallPlan, GenerateError> {
        Ok(self.generate(Direction::Install, request).await?.into())
    }

    pub async fn uninstall(
        &self,
        request: &GenerateRequest,
    ) -> Result<UninstallPlan, GenerateError> {
        Ok(self.generate(Direction::Uninstall, request).await?.into())
    }

    /// Validate, fetch, and run the engine in the given direction.
    #[tracing::instrument(skip(self, request), fields(distro = %request.distro_slug))]
    pub async fn generate(
        &self,
        direction: Direction,
        request: &GenerateRequest,
    ) -> Result<Plan, GenerateError> {
        validate(request)?;
        let app_ids = request.unique_app_ids();

        let (distro, apps) = tokio::try_join!(
            self.distros
                .get_distro_with_bound_sources(&request.distro_slug),
            self.apps.get_apps_with_available_packages(&app_ids),
        )?;

        let distro = distro.ok_or(GenerateError::DistroNotFound)?;
        if distro.bindings.is_empty() {
            return Err(GenerateError::NoSourcesConfigured { name: distro.name });
        }
        if apps.is_empty() {
            return Err(GenerateError::NoAppsFound);
        }

        info!(
            "Generating {} commands for {} app(s) on {}",
            direction,
            apps.len(),
            distro.name
        );
        Ok(build_plan(&distro, &apps, direction, &request.options))
    }
}
