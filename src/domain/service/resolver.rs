//! Picks one package per app among the sources bound to the target distro.

use log::{debug, info};

use crate::domain::model::{App, CommandTemplate, Direction, Distro, Package, ScriptMetadata, Source};

use super::Collector;

/// Score bonus for the user's preferred source.
pub const PREFERENCE_BONUS: i64 = 100;
/// Score bonus for the distro's default source.
pub const DEFAULT_BONUS: i64 = 5;

/// The winning package for one app.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedPackage {
    pub app_name: String,
    pub identifier: String,
    pub source: Source,
    pub setup_cmd: Option<CommandTemplate>,
    pub cleanup_cmd: Option<CommandTemplate>,
    pub uninstall_metadata: Option<ScriptMetadata>,
    pub score: i64,
}

impl SelectedPackage {
    fn new(app: &App, package: &Package, score: i64) -> Self {
        Self {
            app_name: app.display_name.clone(),
            identifier: package.identifier.clone(),
            source: package.source.clone(),
            setup_cmd: package.setup_cmd.clone(),
            cleanup_cmd: package.cleanup_cmd.clone(),
            uninstall_metadata: package.uninstall_metadata.clone(),
            score,
        }
    }

    /// Package-level setup (install) or cleanup (uninstall) override.
    pub fn auxiliary_cmd(&self, direction: Direction) -> Option<&CommandTemplate> {
        match direction {
            Direction::Install => self.setup_cmd.as_ref(),
            Direction::Uninstall => self.cleanup_cmd.as_ref(),
        }
    }
}

/// Scores candidates against a distro's bindings and a source preference.
pub struct PackageResolver<'a> {
    distro: &'a Distro,
    source_preference: Option<&'a str>,
}

impl<'a> PackageResolver<'a> {
    pub fn new(distro: &'a Distro, source_preference: Option<&'a str>) -> Self {
        Self {
            distro,
            source_preference,
        }
    }

    /// Score a package, or `None` if its source is not bound to the distro.
    ///
    /// Scores are widened to `i64` so any stored priority plus both bonuses
    /// stays exact.
    pub fn score(&self, package: &Package) -> Option<i64> {
        let binding = self.distro.binding_for(&package.source.slug)?;
        let mut score = i64::from(binding.priority);
        if self.source_preference == Some(package.source.slug.as_str()) {
            score += PREFERENCE_BONUS;
        }
        if binding.is_default {
            score += DEFAULT_BONUS;
        }
        Some(score)
    }

    /// Pick the best package for an app.
    ///
    /// On equal scores the candidate listed first by the catalog wins, so the
    /// outcome of a tie depends on catalog ordering.
    pub fn pick<'p>(&self, app: &'p App) -> Option<(&'p Package, i64)> {
        let mut best: Option<(&Package, i64)> = None;
        for package in &app.packages {
            let Some(score) = self.score(package) else {
                continue;
            };
            debug!(
                "{}: candidate {} via {} scored {}",
                app.display_name, package.identifier, package.source.slug, score
            );
            match best {
                Some((_, best_score)) if best_score >= score => {}
                _ => best = Some((package, score)),
            }
        }
        best
    }

    /// Resolve every app, recording unresolvable ones in the collector.
    pub fn resolve(&self, apps: &[App], collector: &mut Collector) -> Vec<SelectedPackage> {
        let mut selected = Vec::with_capacity(apps.len());
        for app in apps {
            match self.pick(app) {
                Some((package, score)) => {
                    info!(
                        "{}: selected {} from {} (score {})",
                        app.display_name, package.identifier, package.source.name, score
                    );
                    selected.push(SelectedPackage::new(app, package, score));
                }
                None => collector.unresolvable(&app.display_name, &self.distro.name),
            }
        }
        selected
    }
}
