//! Plain-text rendering of generated plans.

use crate::domain::model::{BreakdownEntry, InstallPlan, ManualStep, UninstallPlan};

fn section(out: &mut String, title: &str, lines: &[String]) {
    if lines.is_empty() {
        return;
    }
    out.push_str(&format!("# {}\n", title));
    for line in lines {
        out.push_str(line);
        out.push('\n');
    }
    out.push('\n');
}

fn breakdown(out: &mut String, entries: &[BreakdownEntry]) {
    if entries.is_empty() {
        return;
    }
    out.push_str("# Packages by source\n");
    for entry in entries {
        out.push_str(&format!("#   {}: {}\n", entry.source, entry.packages.join(", ")));
    }
    out.push('\n');
}

fn manual_steps(out: &mut String, steps: &[ManualStep]) {
    if steps.is_empty() {
        return;
    }
    out.push_str("# Manual steps\n");
    for step in steps {
        out.push_str(&format!("#   [ ] {}: {}\n", step.app_name, step.instructions));
    }
    out.push('\n');
}

fn warnings(out: &mut String, warnings: &[String]) {
    for warning in warnings {
        out.push_str(&format!("# warning: {}\n", warning));
    }
}

pub fn render_install(plan: &InstallPlan) -> String {
    let mut out = String::new();
    section(&mut out, "Setup", &plan.setup_commands);
    section(&mut out, "Install", &plan.commands);
    breakdown(&mut out, &plan.breakdown);
    warnings(&mut out, &plan.warnings);
    out
}

pub fn render_uninstall(plan: &UninstallPlan) -> String {
    let mut out = String::new();
    section(&mut out, "Uninstall", &plan.commands);
    section(&mut out, "Cleanup", &plan.cleanup_commands);
    section(&mut out, "Dependency cleanup", &plan.dependency_cleanup_commands);
    breakdown(&mut out, &plan.breakdown);
    manual_steps(&mut out, &plan.manual_steps);
    warnings(&mut out, &plan.warnings);
    out
}
