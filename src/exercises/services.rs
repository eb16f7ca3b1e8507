use tracing::debug;

use super::dto::{Exercise, ExerciseFilter, ExerciseWeeklyPlan};
use super::repo::ExerciseCatalog;
use crate::diet::dto::DAYS;
use crate::error::ApiError;

/// Every muscle group is doubled until it holds at least this many entries,
/// enough for seven non-overlapping slices.
pub const MIN_GROUP_LEN: usize = 22;
pub const PER_DAY: usize = 3;

pub async fn weekly_plan(
    catalog: &dyn ExerciseCatalog,
    filter: &ExerciseFilter,
) -> Result<ExerciseWeeklyPlan, ApiError> {
    let entries = catalog.find(filter).await?;
    debug!(matches = entries.len(), "catalog lookup done");
    let mut groups = group_by_muscle(entries);
    if groups.is_empty() {
        return Err(ApiError::NoExercises);
    }
    for (_, group) in &mut groups {
        pad(group);
    }
    Ok(ExerciseWeeklyPlan {
        days: distribute(&groups),
    })
}

/// Groups in first-seen muscle order.
pub fn group_by_muscle(entries: Vec<Exercise>) -> Vec<(String, Vec<Exercise>)> {
    let mut groups: Vec<(String, Vec<Exercise>)> = Vec::new();
    for e in entries {
        match groups.iter_mut().find(|(m, _)| *m == e.muscle) {
            Some((_, group)) => group.push(e),
            None => groups.push((e.muscle.clone(), vec![e])),
        }
    }
    groups
}

/// Self-concatenates; repeats are expected for short groups.
pub fn pad(group: &mut Vec<Exercise>) {
    if group.is_empty() {
        return;
    }
    while group.len() < MIN_GROUP_LEN {
        group.extend_from_within(..);
    }
}

/// Round-robin over the groups, one `PER_DAY` slice per group per round,
/// each group advancing its own offset. Rounds continue until at least seven
/// slices exist; the surplus of the final round is dropped.
pub fn distribute(groups: &[(String, Vec<Exercise>)]) -> Vec<Vec<Exercise>> {
    if groups.is_empty() {
        return Vec::new();
    }
    let mut offsets = vec![0usize; groups.len()];
    let mut slices = Vec::with_capacity(DAYS + groups.len());
    while slices.len() < DAYS {
        for ((_, group), offset) in groups.iter().zip(offsets.iter_mut()) {
            let start = (*offset).min(group.len());
            let end = (*offset + PER_DAY).min(group.len());
            slices.push(group[start..end].to_vec());
            *offset += PER_DAY;
        }
    }
    slices.truncate(DAYS);
    slices
}
