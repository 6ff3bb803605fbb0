//! Setup/cleanup and dependency-cleanup command assembly.

use std::collections::HashSet;

use log::debug;

use crate::domain::model::{Direction, Distro, GenerateOptions, Source, resolve_optional};

use super::SelectedPackage;

/// Collects deduplicated auxiliary commands for the groups that produced
/// output. Build one per run.
pub struct CleanupAssembler<'a> {
    distro: &'a Distro,
    direction: Direction,
    include_setup_cleanup: bool,
    include_dependency_cleanup: bool,
    auxiliary: Vec<String>,
    seen_auxiliary: HashSet<String>,
    processed_sources: HashSet<String>,
    dependency_cleanup: Vec<String>,
    seen_dependency_cleanup: HashSet<String>,
}

impl<'a> CleanupAssembler<'a> {
    pub fn new(distro: &'a Distro, direction: Direction, options: &GenerateOptions) -> Self {
        Self {
            distro,
            direction,
            include_setup_cleanup: options.include_setup_cleanup,
            include_dependency_cleanup: direction.is_uninstall()
                && options.include_dependency_cleanup,
            auxiliary: Vec::new(),
            seen_auxiliary: HashSet::new(),
            processed_sources: HashSet::new(),
            dependency_cleanup: Vec::new(),
            seen_dependency_cleanup: HashSet::new(),
        }
    }

    /// Record the auxiliary commands of one source group.
    ///
    /// Install puts the source setup before package setups; uninstall puts
    /// package cleanups before the source cleanup.
    pub fn add_group(&mut self, source: &Source, packages: &[&SelectedPackage]) {
        if self.include_setup_cleanup {
            match self.direction {
                Direction::Install => {
                    self.add_source_command(source);
                    self.add_package_commands(packages);
                }
                Direction::Uninstall => {
                    self.add_package_commands(packages);
                    self.add_source_command(source);
                }
            }
        }

        if self.include_dependency_cleanup {
            self.add_dependency_cleanup(source);
        }
    }

    fn add_package_commands(&mut self, packages: &[&SelectedPackage]) {
        let family = self.distro.family.as_str();
        for package in packages {
            if let Some(cmd) = resolve_optional(package.auxiliary_cmd(self.direction), family) {
                Self::push_unique(&mut self.auxiliary, &mut self.seen_auxiliary, cmd);
            }
        }
    }

    fn add_source_command(&mut self, source: &Source) {
        if !self.processed_sources.insert(source.slug.clone()) {
            return;
        }
        let template = match self.direction {
            Direction::Install => source.setup_cmd.as_ref(),
            Direction::Uninstall => source.cleanup_cmd.as_ref(),
        };
        if let Some(cmd) = resolve_optional(template, &self.distro.family) {
            Self::push_unique(&mut self.auxiliary, &mut self.seen_auxiliary, cmd);
        }
    }

    fn add_dependency_cleanup(&mut self, source: &Source) {
        if !source.supports_dependency_cleanup {
            return;
        }
        let Some(cmd) = source
            .dependency_cleanup_cmd
            .as_deref()
            .filter(|c| !c.trim().is_empty())
        else {
            return;
        };
        let cmd = self.distro.with_sudo(source.require_sudo, cmd);
        Self::push_unique(
            &mut self.dependency_cleanup,
            &mut self.seen_dependency_cleanup,
            &cmd,
        );
    }

    fn push_unique(list: &mut Vec<String>, seen: &mut HashSet<String>, cmd: &str) {
        if seen.insert(cmd.to_string()) {
            list.push(cmd.to_string());
        } else {
            debug!("skipping duplicate command: {}", cmd);
        }
    }

    /// Returns `(setup or cleanup commands, dependency cleanup commands)`.
    pub fn finish(self) -> (Vec<String>, Vec<String>) {
        (self.auxiliary, self.dependency_cleanup)
    }
}
