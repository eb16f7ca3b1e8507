use tracing::{debug, warn};

use super::dto::{MealType, PlannerResponse, RecipeRef};
use crate::{config::EdamamConfig, error::DietError, gateway::HttpGateway};

const ACCEPTED_STATUSES: [&str; 2] = ["OK", "INCOMPLETE"];

/// Posts the plan request to the meal planner and returns the assigned
/// recipes, grouped Breakfast, Lunch, Dinner, each in encounter order.
pub async fn select_recipes(
    gateway: &dyn HttpGateway,
    cfg: &EdamamConfig,
    request: &serde_json::Value,
) -> Result<Vec<RecipeRef>, DietError> {
    let url = format!(
        "{}/api/meal-planner/v1/{}/select",
        cfg.base_url, cfg.planner_app_id
    );
    let params = [
        ("app_id", cfg.planner_app_id.as_str()),
        ("app_key", cfg.planner_app_key.as_str()),
    ];
    let env = gateway.post(&url, request, &params).await;
    if !env.is_ok() {
        warn!(status = env.status_code, error = ?env.error, "meal planner request failed");
        return Err(DietError::Upstream(env.error_text()));
    }

    let resp: PlannerResponse = serde_json::from_str(&env.body)
        .map_err(|e| DietError::Shape(format!("planner response: {}", e)))?;
    if !ACCEPTED_STATUSES.contains(&resp.status.as_str()) {
        warn!(status = %resp.status, "meal planner status not OK");
        return Err(DietError::PlannerStatus(resp.status));
    }
    if resp.status == "INCOMPLETE" {
        debug!("meal planner returned a partial plan");
    }
    extract_refs(&resp)
}

pub fn extract_refs(resp: &PlannerResponse) -> Result<Vec<RecipeRef>, DietError> {
    let mut per_meal: [Vec<String>; 3] = Default::default();
    for set in &resp.selection {
        for (name, section) in &set.sections {
            let Some(uri) = section.assigned.as_deref().filter(|s| !s.is_empty()) else {
                continue;
            };
            let meal = MealType::from_section(name)
                .ok_or_else(|| DietError::Shape(format!("unknown meal section {}", name)))?;
            let id = uri
                .split('#')
                .nth(1)
                .ok_or_else(|| DietError::Shape(format!("assigned uri without fragment: {}", uri)))?;
            per_meal[meal as usize].push(id.to_string());
        }
    }

    let mut refs = Vec::new();
    for (meal, ids) in MealType::ALL.into_iter().zip(per_meal) {
        for id in ids {
            let r = RecipeRef::new(meal, id);
            // a repeated reference keeps its first position
            if !refs.contains(&r) {
                refs.push(r);
            }
        }
    }
    Ok(refs)
}
