use serde::Deserialize;

/// A body field that may arrive as a JSON number or a numeric string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Numeric {
    Int(i64),
    Float(f64),
    Text(String),
}

impl Numeric {
    /// Integer value; floats truncate, strings must be integers.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Numeric::Int(v) => Some(*v),
            Numeric::Float(v) if v.is_finite() => Some(v.trunc() as i64),
            Numeric::Float(_) => None,
            Numeric::Text(s) => s.trim().parse().ok(),
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Numeric::Int(v) => Some(*v as f64),
            Numeric::Float(v) => Some(*v),
            Numeric::Text(s) => s.trim().parse().ok(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityLevel {
    Sedentary,
    LightlyActive,
    ModeratelyActive,
    /// Anything not recognised above.
    VeryActive,
}

impl ActivityLevel {
    pub fn parse(s: &str) -> Self {
        match s {
            "sedentary" => ActivityLevel::Sedentary,
            "lightly active" => ActivityLevel::LightlyActive,
            "moderately active" => ActivityLevel::ModeratelyActive,
            _ => ActivityLevel::VeryActive,
        }
    }

    pub fn multiplier(self) -> f64 {
        match self {
            ActivityLevel::Sedentary => 1.2,
            ActivityLevel::LightlyActive => 1.375,
            ActivityLevel::ModeratelyActive => 1.55,
            ActivityLevel::VeryActive => 1.725,
        }
    }
}

/// `None` for a non-positive height.
pub fn bmi(weight_kg: i64, height_cm: i64) -> Option<f64> {
    if height_cm <= 0 {
        return None;
    }
    let meters = height_cm as f64 / 100.0;
    Some(weight_kg as f64 / (meters * meters))
}

pub fn cm_to_inches(cm: f64) -> f64 {
    cm / 2.54
}

pub fn kg_to_pounds(kg: f64) -> f64 {
    kg * 2.20462
}

/// Harris-Benedict in imperial units; any gender other than `"male"` uses
/// the female constants.
pub fn bmr(weight_lb: f64, height_in: f64, age: f64, gender: &str) -> f64 {
    if gender == "male" {
        66.0 + 6.3 * weight_lb + 12.9 * height_in - 6.8 * age
    } else {
        655.0 + 4.3 * weight_lb + 4.7 * height_in - 4.7 * age
    }
}

pub fn daily_calories(weight_kg: i64, height_cm: i64, age: f64, gender: &str, activity: ActivityLevel) -> f64 {
    let base = bmr(
        kg_to_pounds(weight_kg as f64),
        cm_to_inches(height_cm as f64),
        age,
        gender,
    );
    base * activity.multiplier()
}
