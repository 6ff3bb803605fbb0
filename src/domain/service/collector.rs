//! Accumulates non-fatal degradations for one generation run.

use log::debug;

use crate::domain::model::{Direction, ManualStep};

/// Per-run collector of warnings and manual steps.
#[derive(Debug, Default)]
pub struct Collector {
    warnings: Vec<String>,
    manual_steps: Vec<ManualStep>,
    ephemeral_reported: bool,
}

impl Collector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn warn(&mut self, message: impl Into<String>) {
        let message = message.into();
        debug!("warning: {}", message);
        self.warnings.push(message);
    }

    /// No package of the app is offered by a source bound to the distro.
    pub fn unresolvable(&mut self, app_name: &str, distro_name: &str) {
        self.warn(format!("{}: No package available for {}", app_name, distro_name));
    }

    /// The source has no template for this direction.
    pub fn unsupported(&mut self, app_name: &str, source_name: &str, direction: Direction) {
        self.warn(format!(
            "{}: {} not supported for {} source",
            app_name,
            direction.verb(),
            source_name
        ));
    }

    /// A script package has nothing automatable for this direction.
    pub fn missing_script(&mut self, app_name: &str, direction: Direction) {
        let message = match direction {
            Direction::Uninstall => format!(
                "{}: No uninstall metadata available for script-based installation",
                app_name
            ),
            Direction::Install => format!(
                "{}: No install script available for script-based installation",
                app_name
            ),
        };
        self.warn(message);
    }

    /// nix-shell environments produce nothing to run. Reported once per run.
    pub fn ephemeral(&mut self, direction: Direction) {
        if self.ephemeral_reported {
            return;
        }
        self.ephemeral_reported = true;
        self.warn(format!(
            "nix-shell environments are ephemeral - no {} needed",
            direction
        ));
    }

    pub fn manual_step(&mut self, app_name: &str, instructions: &str) {
        self.manual_steps.push(ManualStep {
            app_name: app_name.to_string(),
            instructions: instructions.to_string(),
        });
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn manual_steps(&self) -> &[ManualStep] {
        &self.manual_steps
    }

    pub fn into_parts(self) -> (Vec<String>, Vec<ManualStep>) {
        (self.warnings, self.manual_steps)
    }
}
