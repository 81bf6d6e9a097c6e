use async_trait::async_trait;
use reqwest::StatusCode;

use crate::client::{ApiClient, ApiError};
use crate::food::{CreatedFood, FoodRecord, PatchOperation};
use crate::report::StepOutcome;
use crate::scenario::{Checks, ScenarioContext, ScenarioStep};

/// Identifier the service is known to have no record for.
pub const MISSING_FOOD_ID: &str = "123";

fn transport(error: ApiError) -> StepOutcome {
    StepOutcome::Error(error.to_string())
}

/// Creates a valid food revue and stores its id for the dependent steps.
pub(super) struct CreateFood;

#[async_trait]
impl ScenarioStep for CreateFood {
    fn name(&self) -> &'static str {
        "create_food"
    }

    async fn run(&self, client: &ApiClient, ctx: &mut ScenarioContext) -> StepOutcome {
        let response = match client.create_food(&FoodRecord::sample()).await {
            Ok(response) => response,
            Err(error) => return transport(error),
        };

        let mut checks = Checks::default();
        checks.expect_status(&response, StatusCode::CREATED);
        match response.json::<CreatedFood>() {
            Ok(created) if !created.food_id.is_empty() => {
                ctx.created_food_id = Some(created.food_id);
            }
            Ok(_) => checks.fail("created food id is empty"),
            Err(error) => checks.fail(format!("create reply is not valid JSON: {error}")),
        }
        checks.into_outcome()
    }
}

/// Replaces the name of the record created earlier in the run.
pub(super) struct EditFood;

#[async_trait]
impl ScenarioStep for EditFood {
    fn name(&self) -> &'static str {
        "edit_food"
    }

    async fn run(&self, client: &ApiClient, ctx: &mut ScenarioContext) -> StepOutcome {
        let Some(food_id) = ctx.created_food_id.clone() else {
            return StepOutcome::Blocked("no created food id in context".to_string());
        };

        let changes = [PatchOperation::replace("/name", "Updated Food Name")];
        let response = match client.edit_food(&food_id, &changes).await {
            Ok(response) => response,
            Err(error) => return transport(error),
        };

        let mut checks = Checks::default();
        checks.expect_status(&response, StatusCode::OK);
        checks.expect_body_contains(&response, "Successfully edited");
        checks.into_outcome()
    }
}

/// Lists all records; only the structure of the reply is checked.
pub(super) struct ListFoods;

#[async_trait]
impl ScenarioStep for ListFoods {
    fn name(&self) -> &'static str {
        "list_foods"
    }

    async fn run(&self, client: &ApiClient, _ctx: &mut ScenarioContext) -> StepOutcome {
        let response = match client.list_foods().await {
            Ok(response) => response,
            Err(error) => return transport(error),
        };

        let mut checks = Checks::default();
        checks.expect_status(&response, StatusCode::OK);
        match response.json::<Vec<serde_json::Value>>() {
            Ok(foods) if foods.is_empty() => checks.fail("food list is empty"),
            Ok(_) => {}
            Err(error) => checks.fail(format!("list reply is not a JSON array: {error}")),
        }
        checks.into_outcome()
    }
}

/// Deletes the created record. The id is consumed here; no later step may
/// reuse it.
pub(super) struct DeleteFood;

#[async_trait]
impl ScenarioStep for DeleteFood {
    fn name(&self) -> &'static str {
        "delete_food"
    }

    async fn run(&self, client: &ApiClient, ctx: &mut ScenarioContext) -> StepOutcome {
        let Some(food_id) = ctx.created_food_id.take() else {
            return StepOutcome::Blocked("no created food id in context".to_string());
        };

        let response = match client.delete_food(&food_id).await {
            Ok(response) => response,
            Err(error) => return transport(error),
        };

        let mut checks = Checks::default();
        checks.expect_status(&response, StatusCode::OK);
        checks.expect_body_contains(&response, "Deleted successfully!");
        checks.into_outcome()
    }
}

/// The server must reject an all-empty record.
pub(super) struct CreateFoodInvalid;

#[async_trait]
impl ScenarioStep for CreateFoodInvalid {
    fn name(&self) -> &'static str {
        "create_food_invalid"
    }

    async fn run(&self, client: &ApiClient, _ctx: &mut ScenarioContext) -> StepOutcome {
        let response = match client.create_food(&FoodRecord::invalid()).await {
            Ok(response) => response,
            Err(error) => return transport(error),
        };

        let mut checks = Checks::default();
        checks.expect_status(&response, StatusCode::BAD_REQUEST);
        checks.into_outcome()
    }
}

/// Editing an unknown id must come back 404 with the service's "no
/// records" text.
pub(super) struct EditMissingFood;

#[async_trait]
impl ScenarioStep for EditMissingFood {
    fn name(&self) -> &'static str {
        "edit_missing_food"
    }

    async fn run(&self, client: &ApiClient, _ctx: &mut ScenarioContext) -> StepOutcome {
        let changes = [PatchOperation::replace("/name", "new title")];
        let response = match client.edit_food(MISSING_FOOD_ID, &changes).await {
            Ok(response) => response,
            Err(error) => return transport(error),
        };

        let mut checks = Checks::default();
        checks.expect_status(&response, StatusCode::NOT_FOUND);
        checks.expect_body_contains(&response, "No food revues...");
        checks.into_outcome()
    }
}

/// Deleting an unknown id must be refused with 400.
pub(super) struct DeleteMissingFood;

#[async_trait]
impl ScenarioStep for DeleteMissingFood {
    fn name(&self) -> &'static str {
        "delete_missing_food"
    }

    async fn run(&self, client: &ApiClient, _ctx: &mut ScenarioContext) -> StepOutcome {
        let response = match client.delete_food(MISSING_FOOD_ID).await {
            Ok(response) => response,
            Err(error) => return transport(error),
        };

        let mut checks = Checks::default();
        checks.expect_status(&response, StatusCode::BAD_REQUEST);
        checks.expect_body_contains(&response, "Unable to delete this food revue!");
        checks.into_outcome()
    }
}
