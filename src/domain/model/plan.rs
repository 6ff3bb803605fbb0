use serde::{Deserialize, Serialize};

/// Package identifiers that were routed through one source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BreakdownEntry {
    /// Source display name
    pub source: String,
    pub packages: Vec<String>,
}

/// An instruction the user has to carry out by hand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManualStep {
    pub app_name: String,
    pub instructions: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstallPlan {
    pub commands: Vec<String>,
    pub setup_commands: Vec<String>,
    pub warnings: Vec<String>,
    pub breakdown: Vec<BreakdownEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UninstallPlan {
    pub commands: Vec<String>,
    pub cleanup_commands: Vec<String>,
    pub dependency_cleanup_commands: Vec<String>,
    pub warnings: Vec<String>,
    pub breakdown: Vec<BreakdownEntry>,
    pub manual_steps: Vec<ManualStep>,
}

/// Direction-independent output of one generation run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Plan {
    pub commands: Vec<String>,
    /// Setup commands (install) or cleanup commands (uninstall)
    pub auxiliary_commands: Vec<String>,
    pub dependency_cleanup_commands: Vec<String>,
    pub warnings: Vec<String>,
    pub breakdown: Vec<BreakdownEntry>,
    pub manual_steps: Vec<ManualStep>,
}

impl From<Plan> for InstallPlan {
    fn from(plan: Plan) -> Self {
        InstallPlan {
            commands: plan.commands,
            setup_commands: plan.auxiliary_commands,
            warnings: plan.warnings,
            breakdown: plan.breakdown,
        }
    }
}

impl From<Plan> for UninstallPlan {
    fn from(plan: Plan) -> Self {
        UninstallPlan {
            commands: plan.commands,
            cleanup_commands: plan.auxiliary_commands,
            dependency_cleanup_commands: plan.dependency_cleanup_commands,
            warnings: plan.warnings,
            breakdown: plan.breakdown,
            manual_steps: plan.manual_steps,
        }
    }
}
