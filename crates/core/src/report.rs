use std::time::Duration;

use chrono::{DateTime, Utc};

/// Result of one scenario step.
///
/// Assertion mismatches and transport errors fail only the step that hit
/// them; a step whose precondition was never established reports `Blocked`
/// without having issued a request.
#[derive(Debug, Clone, PartialEq)]
pub enum StepOutcome {
    Passed,
    Failed(Vec<String>),
    Blocked(String),
    Error(String),
}

impl StepOutcome {
    pub fn is_pass(&self) -> bool {
        matches!(self, StepOutcome::Passed)
    }

    pub fn label(&self) -> &'static str {
        match &self {
            StepOutcome::Passed => "pass",
            StepOutcome::Failed(_) => "fail",
            StepOutcome::Blocked(_) => "blocked",
            StepOutcome::Error(_) => "error",
        }
    }
}

#[derive(Debug, Clone)]
pub struct StepReport {
    pub name: &'static str,
    pub outcome: StepOutcome,
    pub elapsed: Duration,
}

/// Aggregate result of one scenario run.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub steps: Vec<StepReport>,
}

impl RunReport {
    pub fn passed(&self) -> usize {
        self.steps
            .iter()
            .filter(|step| step.outcome.is_pass())
            .count()
    }

    pub fn failed(&self) -> usize {
        self.steps.len() - self.passed()
    }

    pub fn all_passed(&self) -> bool {
        self.steps.iter().all(|step| step.outcome.is_pass())
    }

    pub fn outcome_of(&self, name: &str) -> Option<&StepOutcome> {
        self.steps
            .iter()
            .find(|step| step.name == name)
            .map(|step| &step.outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report_with(outcomes: Vec<(&'static str, StepOutcome)>) -> RunReport {
        let now = Utc::now();
        RunReport {
            started_at: now,
            finished_at: now,
            steps: outcomes
                .into_iter()
                .map(|(name, outcome)| StepReport {
                    name,
                    outcome,
                    elapsed: Duration::from_millis(1),
                })
                .collect(),
        }
    }

    #[test]
    fn counts_distinguish_pass_from_every_other_outcome() {
        let report = report_with(vec![
            ("a", StepOutcome::Passed),
            ("b", StepOutcome::Failed(vec!["boom".to_string()])),
            ("c", StepOutcome::Blocked("no id".to_string())),
            ("d", StepOutcome::Error("timeout".to_string())),
        ]);
        assert_eq!(report.passed(), 1);
        assert_eq!(report.failed(), 3);
        assert!(!report.all_passed());
    }

    #[test]
    fn outcome_lookup_by_step_name() {
        let report = report_with(vec![("create_food", StepOutcome::Passed)]);
        assert_eq!(
            report.outcome_of("create_food"),
            Some(&StepOutcome::Passed)
        );
        assert_eq!(report.outcome_of("missing"), None);
    }
}
