use std::sync::PoisonError;

use tracing::debug;

use super::{dto::WeeklyPlan, grid, planner, recipes};
use crate::{error::DietError, state::AppState};

/// Planner selection, recipe lookups, grid assembly, then backfill.
pub async fn build_weekly_plan(
    state: &AppState,
    request: &serde_json::Value,
) -> Result<WeeklyPlan, DietError> {
    let cfg = &state.config.edamam;
    let gateway = state.gateway.as_ref();

    let refs = planner::select_recipes(gateway, cfg, request).await?;
    debug!(references = refs.len(), "planner selection extracted");
    let cards = recipes::resolve_all(gateway, cfg, refs).await?;
    let mut plan = grid::assemble(cards)?;

    {
        let mut rng = state.rng.lock().unwrap_or_else(PoisonError::into_inner);
        grid::backfill(&mut plan, &mut *rng)?;
    }
    Ok(plan)
}
