use futures::future::try_join_all;
use tracing::{debug, warn};

use super::dto::{Nutrient, RecipeCard, RecipeDetail, RecipeEnvelope, RecipeRef};
use crate::{config::EdamamConfig, error::DietError, gateway::HttpGateway};

/// Fetches every reference concurrently; the output keeps the input order.
pub async fn resolve_all(
    gateway: &dyn HttpGateway,
    cfg: &EdamamConfig,
    refs: Vec<RecipeRef>,
) -> Result<Vec<(RecipeRef, RecipeCard)>, DietError> {
    let fetches = refs.into_iter().map(|r| async move {
        let card = resolve(gateway, cfg, &r.recipe_id).await?;
        Ok::<_, DietError>((r, card))
    });
    let cards = try_join_all(fetches).await?;
    debug!(count = cards.len(), "recipes resolved");
    Ok(cards)
}

pub async fn resolve(
    gateway: &dyn HttpGateway,
    cfg: &EdamamConfig,
    recipe_id: &str,
) -> Result<RecipeCard, DietError> {
    let url = format!("{}/api/recipes/v2/{}", cfg.base_url, recipe_id);
    let params = [
        ("type", "public"),
        ("app_id", cfg.recipe_app_id.as_str()),
        ("app_key", cfg.recipe_app_key.as_str()),
    ];
    let env = gateway.get(&url, &params).await;
    if !env.is_ok() {
        warn!(%recipe_id, status = env.status_code, error = ?env.error, "recipe lookup failed");
        return Err(DietError::Shape(format!(
            "recipe {} returned status {}",
            recipe_id, env.status_code
        )));
    }
    let parsed: RecipeEnvelope = serde_json::from_str(&env.body)
        .map_err(|e| DietError::Shape(format!("recipe {}: {}", recipe_id, e)))?;
    to_card(parsed.recipe)
}

pub fn to_card(recipe: RecipeDetail) -> Result<RecipeCard, DietError> {
    let servings = recipe.servings;
    if servings.is_nan() || servings <= 0.0 {
        return Err(DietError::Shape(format!(
            "recipe {} has yield {}",
            recipe.label, servings
        )));
    }
    let n = &recipe.total_nutrients;
    Ok(RecipeCard {
        calories: per_serving(&n.energy, servings),
        protein: per_serving(&n.protein, servings),
        carbs: per_serving(&n.carbs, servings),
        fat: per_serving(&n.fat, servings),
        name: recipe.label,
        image: recipe.images.small.url,
        servings,
        source: recipe.source,
        url: recipe.url,
        instructions: recipe.ingredient_lines,
    })
}

/// `"<int> <unit>"`, truncating the per-serving amount.
pub fn per_serving(n: &Nutrient, servings: f64) -> String {
    let value = (n.quantity / servings).trunc() as i64;
    format!("{} {}", value, n.unit)
}
