//! Turns selected packages into shell commands, one group per source.

use log::{debug, warn};

use crate::domain::model::{BreakdownEntry, Direction, Distro, NixInstallMethod, Source};

use super::{CleanupAssembler, Collector, SelectedPackage};

pub const NIX_SLUG: &str = "nix";
pub const SCRIPT_SLUG: &str = "script";

/// Selected packages sharing one source, in first-seen order.
#[derive(Debug)]
pub struct SourceGroup<'a> {
    pub source: &'a Source,
    pub packages: Vec<&'a SelectedPackage>,
}

impl SourceGroup<'_> {
    pub fn identifiers(&self) -> Vec<String> {
        self.packages.iter().map(|p| p.identifier.clone()).collect()
    }
}

/// Group packages by source slug, keeping first-seen group order and
/// app order within each group.
pub fn group_by_source(selected: &[SelectedPackage]) -> Vec<SourceGroup<'_>> {
    let mut groups: Vec<SourceGroup<'_>> = Vec::new();
    for package in selected {
        match groups
            .iter_mut()
            .find(|g| g.source.slug == package.source.slug)
        {
            Some(group) => group.packages.push(package),
            None => groups.push(SourceGroup {
                source: &package.source,
                packages: vec![package],
            }),
        }
    }
    groups
}

/// Commands and breakdown produced by the compiler.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct CompiledCommands {
    pub commands: Vec<String>,
    pub breakdown: Vec<BreakdownEntry>,
}

/// Renders per-source commands for one distro and direction.
pub struct CommandCompiler<'a> {
    distro: &'a Distro,
    direction: Direction,
    nix_method: Option<NixInstallMethod>,
}

impl<'a> CommandCompiler<'a> {
    pub fn new(
        distro: &'a Distro,
        direction: Direction,
        nix_method: Option<NixInstallMethod>,
    ) -> Self {
        Self {
            distro,
            direction,
            nix_method,
        }
    }

    pub fn compile(
        &self,
        selected: &[SelectedPackage],
        collector: &mut Collector,
        assembler: &mut CleanupAssembler<'_>,
    ) -> CompiledCommands {
        let mut out = CompiledCommands::default();

        for group in group_by_source(selected) {
            let emitted = match (group.source.slug.as_str(), self.nix_method) {
                (NIX_SLUG, Some(method)) => {
                    self.compile_nix(&group, method, &mut out.commands, collector)
                }
                (SCRIPT_SLUG, _) => {
                    self.compile_script(&group, &mut out.commands, collector);
                    true
                }
                _ => self.compile_templated(&group, &mut out.commands, collector),
            };

            if !emitted {
                debug!("skipping source group {}", group.source.slug);
                continue;
            }

            assembler.add_group(group.source, &group.packages);
            out.breakdown.push(BreakdownEntry {
                source: group.source.name.clone(),
                packages: group.identifiers(),
            });
        }

        out
    }

    /// One command per group: `[sudo ]<template> <ids...>`.
    fn compile_templated(
        &self,
        group: &SourceGroup<'_>,
        commands: &mut Vec<String>,
        collector: &mut Collector,
    ) -> bool {
        let template = match self.direction {
            Direction::Install => group.source.install_cmd.as_deref(),
            Direction::Uninstall => group.source.remove_cmd.as_deref(),
        }
        .filter(|t| !t.trim().is_empty());

        let Some(template) = template else {
            warn!(
                "{} source has no {} command",
                group.source.name, self.direction
            );
            for package in &group.packages {
                collector.unsupported(&package.app_name, &group.source.name, self.direction);
            }
            return false;
        };

        let prefix = self.distro.with_sudo(group.source.require_sudo, template);
        commands.push(format!("{} {}", prefix, group.identifiers().join(" ")));
        true
    }

    /// Script packages are handled one at a time.
    ///
    /// Install runs the package identifier as the script; uninstall metadata
    /// is only read for uninstall.
    fn compile_script(
        &self,
        group: &SourceGroup<'_>,
        commands: &mut Vec<String>,
        collector: &mut Collector,
    ) {
        for package in &group.packages {
            match self.direction {
                Direction::Install => {
                    if package.identifier.trim().is_empty() {
                        collector.missing_script(&package.app_name, self.direction);
                    } else {
                        commands.push(package.identifier.clone());
                    }
                }
                Direction::Uninstall => {
                    let metadata = package.uninstall_metadata.as_ref();
                    if let Some(script) =
                        metadata.and_then(|m| m.script_for(self.distro.is_windows()))
                    {
                        commands.push(script.to_string());
                    } else if let Some(instructions) = metadata.and_then(|m| m.instructions()) {
                        collector.manual_step(&package.app_name, instructions);
                    } else {
                        collector.missing_script(&package.app_name, self.direction);
                    }
                }
            }
        }
    }

    /// Method-specific templates replace the nix source's own.
    fn compile_nix(
        &self,
        group: &SourceGroup<'_>,
        method: NixInstallMethod,
        commands: &mut Vec<String>,
        collector: &mut Collector,
    ) -> bool {
        let ids = group.identifiers();
        match (method, self.direction) {
            (NixInstallMethod::NixShell, direction) => {
                collector.ephemeral(direction);
                return false;
            }
            (NixInstallMethod::NixEnv, Direction::Install) => {
                let attrs: Vec<_> = ids.iter().map(|id| format!("nixpkgs.{}", id)).collect();
                commands.push(format!("nix-env -iA {}", attrs.join(" ")));
            }
            (NixInstallMethod::NixFlakes, Direction::Install) => {
                let refs: Vec<_> = ids.iter().map(|id| format!("nixpkgs#{}", id)).collect();
                commands.push(format!("nix profile install {}", refs.join(" ")));
            }
            (NixInstallMethod::NixEnv, Direction::Uninstall) => {
                commands.push(format!("nix-env -e {}", ids.join(" ")));
                commands.push("nix-collect-garbage -d".to_string());
            }
            (NixInstallMethod::NixFlakes, Direction::Uninstall) => {
                commands.push(format!("nix profile remove {}", ids.join(" ")));
                commands.push("nix store gc".to_string());
            }
        }
        true
    }
}
