mod steps;

pub use steps::MISSING_FOOD_ID;

use std::time::Instant;

use async_trait::async_trait;
use chrono::Utc;
use reqwest::StatusCode;

use crate::client::{ApiClient, ApiResponse};
use crate::report::{RunReport, StepOutcome, StepReport};

/// Mutable state shared across the steps of one run.
///
/// The create step writes the new record's identifier here; the edit step
/// reads it and the delete step consumes it. The driver hands the context
/// to one step at a time, so there is nothing to lock.
#[derive(Debug, Default)]
pub struct ScenarioContext {
    pub created_food_id: Option<String>,
}

/// One ordered test case with pre/post conditions tied to the shared
/// context.
#[async_trait]
pub trait ScenarioStep: Send + Sync {
    /// Stable name used in reports and logs.
    fn name(&self) -> &'static str;

    async fn run(&self, client: &ApiClient, ctx: &mut ScenarioContext) -> StepOutcome;
}

/// Collects assertion failures for one step; empty means the step passed.
#[derive(Debug, Default)]
pub struct Checks {
    failures: Vec<String>,
}

impl Checks {
    pub fn expect_status(&mut self, response: &ApiResponse, expected: StatusCode) {
        if response.status != expected {
            self.failures.push(format!(
                "expected status {expected}, got {}",
                response.status
            ));
        }
    }

    pub fn expect_body_contains(&mut self, response: &ApiResponse, needle: &str) {
        if !response.body_contains(needle) {
            self.failures.push(format!(
                "body does not contain '{needle}': {}",
                preview(&response.body)
            ));
        }
    }

    pub fn fail(&mut self, message: impl Into<String>) {
        self.failures.push(message.into());
    }

    pub fn into_outcome(self) -> StepOutcome {
        if self.failures.is_empty() {
            StepOutcome::Passed
        } else {
            StepOutcome::Failed(self.failures)
        }
    }
}

// Bodies can be whole JSON documents; keep failure messages readable.
fn preview(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() <= MAX {
        return body.to_string();
    }
    let mut end = MAX;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &body[..end])
}

/// The ordered step list and the sequential driver that executes it.
pub struct Scenario {
    steps: Vec<Box<dyn ScenarioStep>>,
}

impl Scenario {
    /// The full CRUD pass over the Food revues API, in its required order.
    pub fn standard() -> Self {
        Self {
            steps: vec![
                Box::new(steps::CreateFood),
                Box::new(steps::EditFood),
                Box::new(steps::ListFoods),
                Box::new(steps::DeleteFood),
                Box::new(steps::CreateFoodInvalid),
                Box::new(steps::EditMissingFood),
                Box::new(steps::DeleteMissingFood),
            ],
        }
    }

    pub fn step_names(&self) -> Vec<&'static str> {
        self.steps.iter().map(|step| step.name()).collect()
    }

    /// Runs every step in declared order. A failing step never halts the
    /// run and nothing is retried; later steps whose precondition was not
    /// established report [`StepOutcome::Blocked`].
    pub async fn run(&self, client: &ApiClient) -> RunReport {
        let started_at = Utc::now();
        let mut ctx = ScenarioContext::default();
        let mut reports = Vec::with_capacity(self.steps.len());

        for step in &self.steps {
            let clock = Instant::now();
            let outcome = step.run(client, &mut ctx).await;
            let elapsed = clock.elapsed();
            match &outcome {
                StepOutcome::Passed => tracing::debug!(step = step.name(), "step passed"),
                StepOutcome::Failed(failures) => {
                    tracing::warn!(step = step.name(), ?failures, "step failed");
                }
                StepOutcome::Blocked(reason) => {
                    tracing::warn!(step = step.name(), %reason, "step blocked");
                }
                StepOutcome::Error(message) => {
                    tracing::warn!(step = step.name(), %message, "transport failure");
                }
            }
            reports.push(StepReport {
                name: step.name(),
                outcome,
                elapsed,
            });
        }

        RunReport {
            started_at,
            finished_at: Utc::now(),
            steps: reports,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(status: StatusCode, body: &str) -> ApiResponse {
        ApiResponse {
            status,
            body: body.to_string(),
        }
    }

    #[test]
    fn checks_pass_when_nothing_recorded() {
        let checks = Checks::default();
        assert_eq!(checks.into_outcome(), StepOutcome::Passed);
    }

    #[test]
    fn checks_collect_every_mismatch() {
        let mut checks = Checks::default();
        let reply = response(StatusCode::NOT_FOUND, "nope");
        checks.expect_status(&reply, StatusCode::OK);
        checks.expect_body_contains(&reply, "Successfully edited");
        match checks.into_outcome() {
            StepOutcome::Failed(failures) => {
                assert_eq!(failures.len(), 2);
                assert!(failures[0].contains("expected status 200 OK"));
                assert!(failures[1].contains("Successfully edited"));
            }
            other => panic!("expected Failed, got {other:?}"),
        }
    }

    #[test]
    fn long_bodies_are_previewed_in_failures() {
        let mut checks = Checks::default();
        let reply = response(StatusCode::OK, &"x".repeat(500));
        checks.expect_body_contains(&reply, "absent");
        match checks.into_outcome() {
            StepOutcome::Failed(failures) => {
                assert!(failures[0].len() < 300);
                assert!(failures[0].ends_with("..."));
            }
            other => panic!("expected Failed, got {other:?}"),
        }
    }

    #[test]
    fn standard_scenario_declares_required_order() {
        let names = Scenario::standard().step_names();
        assert_eq!(
            names,
            vec![
                "create_food",
                "edit_food",
                "list_foods",
                "delete_food",
                "create_food_invalid",
                "edit_missing_food",
                "delete_missing_food",
            ]
        );
    }
}
