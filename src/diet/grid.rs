use rand::{seq::SliceRandom, Rng};
use tracing::{debug, info};

use super::dto::{DayPlan, MealType, RecipeCard, RecipeRef, WeeklyPlan, DAYS};
use crate::error::DietError;

/// Places resolved recipes into the week. Each meal type keeps its own day
/// counter, so a day's breakfast and lunch may come from different planner
/// selections.
pub fn assemble(cards: Vec<(RecipeRef, RecipeCard)>) -> Result<WeeklyPlan, DietError> {
    let mut plan = WeeklyPlan::default();
    let mut next_day = [1usize; 3];
    for (r, card) in cards {
        let meal = MealType::classify(&r.key());
        let counter = &mut next_day[meal as usize];
        let day = plan.day_mut(*counter).ok_or_else(|| {
            DietError::Shape(format!("more than {} {} selections", DAYS, meal))
        })?;
        *day.slot_mut(meal) = Some(card);
        *counter += 1;
    }
    Ok(plan)
}

/// 1-based index of the first day missing any meal.
pub fn break_point(plan: &WeeklyPlan) -> Option<usize> {
    plan.days
        .iter()
        .position(|d| !d.is_complete())
        .map(|i| i + 1)
}

/// Replaces every day from the break point on with a random copy of one of
/// the complete days before it. Fails when day 1 is itself incomplete.
pub fn backfill<R: Rng + ?Sized>(plan: &mut WeeklyPlan, rng: &mut R) -> Result<(), DietError> {
    let Some(b) = break_point(plan) else {
        debug!("plan complete, no backfill");
        return Ok(());
    };
    if b == 1 {
        return Err(DietError::IncompleteFirstDay);
    }
    info!(break_day = b, "backfilling plan from complete days");
    let complete: Vec<DayPlan> = plan.days[..b - 1].to_vec();
    for day in &mut plan.days[b - 1..] {
        if let Some(src) = complete.choose(rng) {
            *day = src.clone();
        }
    }
    Ok(())
}
