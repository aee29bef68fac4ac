//! In-memory mock data source rendered by the dashboard.
//!
//! Everything here is read-only demo data. The types derive serde traits so
//! the same shapes can later be fed from a file or a service without
//! touching the views; [`Dataset::mock`] is the only constructor today.

use crate::error::{FwdashError, Result};
use crate::phase::StepKind;
use serde::{Deserialize, Serialize};

/// A silicon program the dashboard can browse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub name: String,
    pub code_name: String,
    pub last_accessed: String,
}

/// Display status of a workflow stage or step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StepStatus {
    Success,
    InProgress,
    Pending,
}

impl StepStatus {
    pub fn label(self) -> &'static str {
        match self {
            StepStatus::Success => "Success",
            StepStatus::InProgress => "In progress",
            StepStatus::Pending => "Pending",
        }
    }
}

/// A selectable unit inside a stage; carries one lifecycle machine when open.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowStep {
    pub id: String,
    pub name: String,
    pub status: StepStatus,
    pub kind: StepKind,
}

/// A named group of steps in the displayed pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowStage {
    pub id: String,
    pub name: String,
    pub status: StepStatus,
    pub progress: u8,
    pub steps: Vec<WorkflowStep>,
}

/// One build dependency release row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Release {
    pub id: String,
    pub version: String,
    pub changed_deps: String,
    pub released_by: String,
    pub released_date: String,
    pub released_ww: String,
    #[serde(default)]
    pub is_modified: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KnobStatus {
    Active,
    Warning,
    Error,
}

/// A BIOS/firmware configuration override entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Knob {
    pub id: String,
    pub name: String,
    pub path: String,
    pub display_value: String,
    pub raw_value: String,
    pub status: KnobStatus,
    #[serde(default)]
    pub is_overridden: bool,
}

/// Static settings table shown on the test step view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestSettings {
    pub platform: String,
    pub build_type: String,
    pub silicon_stepping: String,
    pub compiler: String,
    pub boot_guard: String,
    pub signing_key: String,
}

/// Identity line of the displayed workflow run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunHeader {
    pub name: String,
    pub run_id: u32,
    pub triggered_by: String,
    pub suite: String,
    pub branch: String,
    pub orchestrator: String,
}

/// The complete injected data source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub projects: Vec<Project>,
    pub workflow: Vec<WorkflowStage>,
    pub build_deps: Vec<Release>,
    pub knobs: Vec<Knob>,
    pub test_settings: TestSettings,
    pub run_header: RunHeader,
}

impl Dataset {
    /// The built-in demo tables.
    pub fn mock() -> Self {
        Self {
            projects: vec![
                project("p1", "Meteor Lake-S", "MTL-S", "2h ago"),
                project("p2", "Lunar Lake-M", "LNL-M", "4h ago"),
                project("p3", "Arrow Lake-H", "ARL-H", "1d ago"),
                project("p4", "Panther Canyon", "PAC-S", "2d ago"),
            ],
            workflow: vec![
                WorkflowStage {
                    id: "stage1".to_string(),
                    name: "IFWI Build".to_string(),
                    status: StepStatus::Success,
                    progress: 100,
                    steps: vec![step(
                        "step1",
                        "IFWI Build Step",
                        StepStatus::Success,
                        StepKind::Build,
                    )],
                },
                WorkflowStage {
                    id: "stage2".to_string(),
                    name: "Validation".to_string(),
                    status: StepStatus::InProgress,
                    progress: 45,
                    steps: vec![
                        step("step2", "Test Step", StepStatus::InProgress, StepKind::Test),
                        step(
                            "step3",
                            "Performance Step",
                            StepStatus::Pending,
                            StepKind::Test,
                        ),
                    ],
                },
            ],
            build_deps: vec![
                release("R102", "v24.1.0", "2/4", "System", "Today", "WW25.1", true),
                release("R099", "v23.9.4", "0/0", "System", "Yesterday", "WW24.9", false),
                release("R084", "v22.0.1", "1/2", "System", "2d ago", "WW24.7", true),
                release("R077", "v21.5.0", "0/0", "System", "1w ago", "WW24.1", false),
                release("R065", "v20.2.1", "1/5", "Admin", "2w ago", "WW24.0", true),
                release("R052", "v19.1.0", "0/0", "Admin", "3w ago", "WW23.9", false),
                release("R041", "v18.4.2", "3/3", "BuildBot", "1m ago", "WW23.5", true),
                release("R038", "v18.0.0", "0/0", "BuildBot", "1.2m ago", "WW23.1", false),
            ],
            knobs: vec![
                knob(
                    "k1",
                    "PchEnergyReport",
                    "Intel Advanced Menu/PCH-IO Configuration/Energy Reporting",
                    "Disabled",
                    "0x00",
                    true,
                ),
                knob("k2", "FastBootTimeOut", "Boot/Boot Configuration", "1", "0x0001", false),
                knob(
                    "k4",
                    "CpuPcieSlot1_GenSpeed",
                    "Intel Advanced Menu/CPU Configuration/PCI Express/Speed",
                    "Auto",
                    "0xFF",
                    false,
                ),
                knob(
                    "k5",
                    "TccActivationOffset",
                    "Intel Advanced Menu/CPU Configuration",
                    "0",
                    "0x00",
                    true,
                ),
                knob("k6", "VmxEnable", "CPU/Security", "Enabled", "0x01", false),
                knob("k7", "HyperThreading", "CPU/Performance", "Enabled", "0x01", false),
                knob("k8", "IgpMemorySize", "Graphics/Internal", "64MB", "0x40", true),
                knob("k12", "DramVoltage", "Memory/Overclocking", "1.2V", "0x04B0", true),
                knob("k13", "SecureBootMode", "Security/Boot", "Standard", "0x00", false),
                knob("k14", "TpmState", "Security/TPM", "Enabled", "0x01", false),
            ],
            test_settings: TestSettings {
                platform: "Meteor Lake-S".to_string(),
                build_type: "RELEASE".to_string(),
                silicon_stepping: "B0".to_string(),
                compiler: "GCC 11.2.0".to_string(),
                boot_guard: "Enabled (Profile 5)".to_string(),
                signing_key: "RSA-4096-PROD".to_string(),
            },
            run_header: RunHeader {
                name: "Foo_2025_12_17_14_21_30".to_string(),
                run_id: 507,
                triggered_by: "JD Dayan, Roni".to_string(),
                suite: "ARL_H_VAL_V3".to_string(),
                branch: "main/firmware_rc".to_string(),
                orchestrator: "NGA_PROD_11.x".to_string(),
            },
        }
    }

    /// Look up a project by id or (case-insensitive) name.
    pub fn find_project(&self, query: &str) -> Result<&Project> {
        self.projects
            .iter()
            .find(|p| p.id == query || p.name.eq_ignore_ascii_case(query))
            .ok_or_else(|| FwdashError::ProjectNotFound(query.to_string()))
    }

    /// Look up a workflow step by id.
    pub fn find_step(&self, step_id: &str) -> Result<&WorkflowStep> {
        self.workflow
            .iter()
            .flat_map(|stage| stage.steps.iter())
            .find(|step| step.id == step_id)
            .ok_or_else(|| FwdashError::StepNotFound(step_id.to_string()))
    }

    /// All steps in pipeline order.
    pub fn steps(&self) -> impl Iterator<Item = &WorkflowStep> {
        self.workflow.iter().flat_map(|stage| stage.steps.iter())
    }

    /// Knobs carrying an explicit override.
    pub fn overridden_knobs(&self) -> impl Iterator<Item = &Knob> {
        self.knobs.iter().filter(|k| k.is_overridden)
    }
}

fn project(id: &str, name: &str, code_name: &str, last_accessed: &str) -> Project {
    Project {
        id: id.to_string(),
        name: name.to_string(),
        code_name: code_name.to_string(),
        last_accessed: last_accessed.to_string(),
    }
}

fn step(id: &str, name: &str, status: StepStatus, kind: StepKind) -> WorkflowStep {
    WorkflowStep {
        id: id.to_string(),
        name: name.to_string(),
        status,
        kind,
    }
}

fn release(
    id: &str,
    version: &str,
    changed_deps: &str,
    released_by: &str,
    released_date: &str,
    released_ww: &str,
    is_modified: bool,
) -> Release {
    Release {
        id: id.to_string(),
        version: version.to_string(),
        changed_deps: changed_deps.to_string(),
        released_by: released_by.to_string(),
        released_date: released_date.to_string(),
        released_ww: released_ww.to_string(),
        is_modified,
    }
}

fn knob(
    id: &str,
    name: &str,
    path: &str,
    display_value: &str,
    raw_value: &str,
    is_overridden: bool,
) -> Knob {
    Knob {
        id: id.to_string(),
        name: name.to_string(),
        path: path.to_string(),
        display_value: display_value.to_string(),
        raw_value: raw_value.to_string(),
        status: KnobStatus::Active,
        is_overridden,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_dataset_shape() {
        let data = Dataset::mock();
        assert_eq!(data.projects.len(), 4);
        assert_eq!(data.workflow.len(), 2);
        assert_eq!(data.steps().count(), 3);
        assert!(!data.build_deps.is_empty());
        assert!(!data.knobs.is_empty());
    }

    #[test]
    fn test_find_project_by_id_and_name() {
        let data = Dataset::mock();
        assert_eq!(data.find_project("p3").unwrap().code_name, "ARL-H");
        assert_eq!(data.find_project("lunar lake-m").unwrap().id, "p2");
        assert!(matches!(
            data.find_project("nope"),
            Err(FwdashError::ProjectNotFound(_))
        ));
    }

    #[test]
    fn test_find_step() {
        let data = Dataset::mock();
        let step = data.find_step("step2").unwrap();
        assert_eq!(step.kind, StepKind::Test);
        assert_eq!(step.status, StepStatus::InProgress);

        let build = data.find_step("step1").unwrap();
        assert_eq!(build.kind, StepKind::Build);

        assert!(matches!(
            data.find_step("step99"),
            Err(FwdashError::StepNotFound(_))
        ));
    }

    #[test]
    fn test_overridden_knobs_filter() {
        let data = Dataset::mock();
        let overridden: Vec<_> = data.overridden_knobs().collect();
        assert!(!overridden.is_empty());
        assert!(overridden.iter().all(|k| k.is_overridden));
        assert!(overridden.len() < data.knobs.len());
    }

    #[test]
    fn test_dataset_round_trips_through_json() {
        let data = Dataset::mock();
        let json = serde_json::to_string(&data).unwrap();
        let back: Dataset = serde_json::from_str(&json).unwrap();
        assert_eq!(back, data);
    }
}
