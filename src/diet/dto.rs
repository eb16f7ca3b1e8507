use std::collections::BTreeMap;
use std::fmt;

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

pub const DAYS: usize = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
}

impl MealType {
    pub const ALL: [MealType; 3] = [MealType::Breakfast, MealType::Lunch, MealType::Dinner];

    pub fn as_str(self) -> &'static str {
        match self {
            MealType::Breakfast => "Breakfast",
            MealType::Lunch => "Lunch",
            MealType::Dinner => "Dinner",
        }
    }

    pub fn from_section(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.as_str() == name)
    }

    /// Substring match in priority order Breakfast, Lunch, then Dinner as the
    /// fallback. A key that mentions several meal names resolves by priority,
    /// not by the list it came from.
    pub fn classify(key: &str) -> Self {
        if key.contains("Breakfast") {
            MealType::Breakfast
        } else if key.contains("Lunch") {
            MealType::Lunch
        } else {
            MealType::Dinner
        }
    }
}

impl fmt::Display for MealType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One recipe assignment taken from a planner selection.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RecipeRef {
    pub meal: MealType,
    pub recipe_id: String,
}

impl RecipeRef {
    pub fn new(meal: MealType, recipe_id: impl Into<String>) -> Self {
        Self {
            meal,
            recipe_id: recipe_id.into(),
        }
    }

    /// `"<Meal>::<recipe_id>"`
    pub fn key(&self) -> String {
        format!("{}::{}", self.meal, self.recipe_id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecipeCard {
    pub name: String,
    pub image: String,
    pub servings: f64,
    pub calories: String,
    pub protein: String,
    pub carbs: String,
    pub fat: String,
    pub source: String,
    pub url: String,
    pub instructions: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DayPlan {
    pub breakfast: Option<RecipeCard>,
    pub lunch: Option<RecipeCard>,
    pub dinner: Option<RecipeCard>,
}

impl DayPlan {
    pub fn slot_mut(&mut self, meal: MealType) -> &mut Option<RecipeCard> {
        match meal {
            MealType::Breakfast => &mut self.breakfast,
            MealType::Lunch => &mut self.lunch,
            MealType::Dinner => &mut self.dinner,
        }
    }

    pub fn slot(&self, meal: MealType) -> Option<&RecipeCard> {
        match meal {
            MealType::Breakfast => self.breakfast.as_ref(),
            MealType::Lunch => self.lunch.as_ref(),
            MealType::Dinner => self.dinner.as_ref(),
        }
    }

    pub fn is_complete(&self) -> bool {
        MealType::ALL.into_iter().all(|m| self.slot(m).is_some())
    }
}

impl Serialize for DayPlan {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let filled: Vec<_> = MealType::ALL
            .into_iter()
            .filter_map(|m| self.slot(m).map(|card| (m, card)))
            .collect();
        let mut map = serializer.serialize_map(Some(filled.len()))?;
        for (meal, card) in filled {
            map.serialize_entry(meal.as_str(), card)?;
        }
        map.end()
    }
}

/// Seven days, serialized as `{"Day_1": {...}, ..., "Day_7": {...}}`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeeklyPlan {
    pub days: [DayPlan; DAYS],
}

impl WeeklyPlan {
    /// 1-based lookup, `None` outside `1..=7`.
    pub fn day(&self, n: usize) -> Option<&DayPlan> {
        n.checked_sub(1).and_then(|i| self.days.get(i))
    }

    pub fn day_mut(&mut self, n: usize) -> Option<&mut DayPlan> {
        n.checked_sub(1).and_then(move |i| self.days.get_mut(i))
    }

    pub fn is_complete(&self) -> bool {
        self.days.iter().all(DayPlan::is_complete)
    }
}

pub fn day_label(n: usize) -> String {
    format!("Day_{}", n)
}

impl Serialize for WeeklyPlan {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(DAYS))?;
        for (i, day) in self.days.iter().enumerate() {
            map.serialize_entry(&day_label(i + 1), day)?;
        }
        map.end()
    }
}

/// Body of `/viewDiet` responses.
#[derive(Debug, Serialize)]
pub struct DietResponse {
    pub success: bool,
    pub data: WeeklyPlan,
    pub error: String,
}

// --- upstream payloads ---

#[derive(Debug, Deserialize)]
pub struct PlannerResponse {
    pub status: String,
    pub selection: Vec<SelectionSet>,
}

#[derive(Debug, Deserialize)]
pub struct SelectionSet {
    pub sections: BTreeMap<String, Section>,
}

#[derive(Debug, Deserialize)]
pub struct Section {
    #[serde(default)]
    pub assigned: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RecipeEnvelope {
    pub recipe: RecipeDetail,
}

#[derive(Debug, Deserialize)]
pub struct RecipeDetail {
    pub label: String,
    pub images: RecipeImages,
    #[serde(rename = "yield")]
    pub servings: f64,
    #[serde(rename = "totalNutrients")]
    pub total_nutrients: TotalNutrients,
    pub source: String,
    pub url: String,
    #[serde(rename = "ingredientLines")]
    pub ingredient_lines: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct RecipeImages {
    #[serde(rename = "SMALL")]
    pub small: ImageInfo,
}

#[derive(Debug, Deserialize)]
pub struct ImageInfo {
    pub url: String,
}

#[derive(Debug, Deserialize)]
pub struct TotalNutrients {
    #[serde(rename = "ENERC_KCAL")]
    pub energy: Nutrient,
    #[serde(rename = "PROCNT")]
    pub protein: Nutrient,
    #[serde(rename = "CHOCDF")]
    pub carbs: Nutrient,
    #[serde(rename = "FAT")]
    pub fat: Nutrient,
}

#[derive(Debug, Deserialize)]
pub struct Nutrient {
    pub quantity: f64,
    pub unit: String,
}
