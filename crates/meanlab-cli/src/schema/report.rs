use meanlab_engine::{
    DeviationRow, LessonState, MeanComparison, Sandbox, Step, deviation_rows,
    predicates::{self, GroupFeedback, Verdict},
};
use serde::Serialize;

/// Everything a learner would see after a sequence of actions.
#[derive(Debug, Clone, Serialize)]
pub struct LessonReport {
    pub lesson: String,
    pub current_step: Step,
    pub current_step_title: &'static str,
    pub highest_unlocked_step: Step,
    pub step_a_complete: bool,
    pub step_b_complete: bool,
    pub step_c_complete: bool,
    pub groups: Vec<GroupReport>,
    pub manual_final_mean: Option<f64>,
    pub final_mean_verdict: Verdict,
    pub original_mean: Option<f64>,
    pub current_mean: Option<f64>,
    pub summary_comparison: Option<MeanComparison>,
    pub raw_data_mean: f64,
    pub deviation_rows: Vec<DeviationRow>,
    pub sandbox: SandboxReport,
}

#[derive(Debug, Clone, Serialize)]
pub struct GroupReport {
    pub label: String,
    pub expected_frequency: usize,
    pub assigned_values: Vec<f64>,
    pub completed: bool,
    pub feedback: GroupFeedback,
}

impl LessonReport {
    pub fn new(state: &LessonState) -> Self {
        let groups = state
            .groups()
            .iter()
            .enumerate()
            .map(|(index, group)| GroupReport {
                label: group.label().to_owned(),
                expected_frequency: group.expected_frequency(),
                assigned_values: group.assigned_values().to_vec(),
                completed: state.completed_groups().contains(index),
                feedback: GroupFeedback::for_group(group),
            })
            .collect();
        Self {
            lesson: state.definition().name.clone(),
            current_step: state.current_step(),
            current_step_title: state.current_step().title(),
            highest_unlocked_step: state.highest_unlocked_step(),
            step_a_complete: state.is_step_a_complete(),
            step_b_complete: state.is_step_b_complete(),
            step_c_complete: state.is_step_c_complete(),
            groups,
            manual_final_mean: state.manual_final_mean(),
            final_mean_verdict: predicates::final_mean_verdict(state),
            original_mean: state.original_mean(),
            current_mean: state.current_mean(),
            summary_comparison: state.summary_comparison(),
            raw_data_mean: state.raw_data_mean(),
            deviation_rows: deviation_rows(state.groups()),
            sandbox: SandboxReport::new(state.sandbox()),
        }
    }
}

/// Step D view of the sandbox.
#[derive(Debug, Clone, Serialize)]
pub struct SandboxReport {
    pub raw_values: Vec<f64>,
    pub groups: Vec<SandboxGroupReport>,
    pub raw_mean: f64,
    pub grouped_mean: f64,
    pub midpoint_mean: f64,
    pub grouped_vs_raw: MeanComparison,
    pub midpoint_vs_raw: MeanComparison,
}

#[derive(Debug, Clone, Serialize)]
pub struct SandboxGroupReport {
    pub label: String,
    pub frequency: usize,
    pub mean: Option<f64>,
    pub midpoint: f64,
}

impl SandboxReport {
    pub fn new(sandbox: &Sandbox) -> Self {
        let groups = sandbox
            .groups()
            .iter()
            .map(|group| SandboxGroupReport {
                label: group.label().to_owned(),
                frequency: group.assigned_count(),
                mean: (group.assigned_count() > 0).then(|| group.assigned_mean()),
                midpoint: group.class_midpoint(),
            })
            .collect();
        Self {
            raw_values: sandbox.raw_values().to_vec(),
            groups,
            raw_mean: sandbox.raw_mean(),
            grouped_mean: sandbox.grouped_mean(),
            midpoint_mean: sandbox.midpoint_mean(),
            grouped_vs_raw: sandbox.comparison(),
            midpoint_vs_raw: sandbox.midpoint_comparison(),
        }
    }
}
