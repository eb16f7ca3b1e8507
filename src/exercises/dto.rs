use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use sqlx::FromRow;

use crate::diet::dto::day_label;

/// Catalog entry; unique on everything but `instructions`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Exercise {
    pub name: String,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub kind: String,
    pub muscle: String,
    pub equipment: String,
    pub difficulty: String,
    pub instructions: String,
}

/// Body of `/getExercises`.
#[derive(Debug, Clone, Deserialize)]
pub struct ExerciseFilter {
    pub difficulty: String,
    #[serde(rename = "type")]
    pub types: Vec<String>,
    #[serde(rename = "muscle")]
    pub muscles: Vec<String>,
}

/// Seven slices of up to three exercises, one slice per day.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExerciseWeeklyPlan {
    pub days: Vec<Vec<Exercise>>,
}

impl Serialize for ExerciseWeeklyPlan {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.days.len()))?;
        for (i, day) in self.days.iter().enumerate() {
            map.serialize_entry(&day_label(i + 1), day)?;
        }
        map.end()
    }
}

#[derive(Debug, Serialize)]
pub struct ExerciseResponse {
    pub exercise_data: ExerciseWeeklyPlan,
    pub success: bool,
}
