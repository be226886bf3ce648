//models.rs
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use tracing::warn;

/// Declares a closed set of string labels with their exact wire spelling.
macro_rules! labeled_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $label:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(#[serde(rename = $label)] $variant,)+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

labeled_enum!(BodyPart {
    Chest => "chest",
    Back => "back",
    Legs => "legs",
    Shoulders => "shoulders",
    Arms => "arms",
    Abs => "abs",
});

labeled_enum!(Equipment {
    BodyWeight => "body weight",
    Dumbbell => "dumbbell",
    Barbell => "barbell",
});

labeled_enum!(Target {
    Abductors => "abductors",
    Abs => "abs",
    Adductors => "adductors",
    Biceps => "biceps",
    Calves => "calves",
    CardiovascularSystem => "cardiovascular system",
    Delts => "delts",
    Forearms => "forearms",
    Glutes => "glutes",
    Hamstrings => "hamstrings",
    Lats => "lats",
    LevatorScapulae => "levator scapulae",
    Pectorals => "pectorals",
    Quads => "quads",
    SerratusAnterior => "serratus anterior",
    Core => "core",
    Spine => "spine",
    Traps => "traps",
    Triceps => "triceps",
    UpperBack => "upper back",
});

labeled_enum!(
    /// Variants are declared in rank order, so `Ord` sorts easiest first.
    Difficulty {
        Beginner => "beginner",
        Intermediate => "intermediate",
        Advanced => "advanced",
    }
);

labeled_enum!(WorkoutType {
    Strength => "strength",
    Cardio => "cardio",
    Flexibility => "flexibility",
    Balance => "balance",
    Endurance => "endurance",
    Hiit => "HIIT",
    Circuit => "circuit",
    Bodyweight => "bodyweight",
    Resistance => "resistance",
    Plyometric => "plyometric",
});

labeled_enum!(FitnessGoal {
    LoseWeight => "loseWeight",
    BuildMuscle => "buildMuscle",
    KeepFit => "keepFit",
});

labeled_enum!(ActivityLevel {
    Sedentary => "sedentary",
    Moderate => "moderate",
    Active => "active",
});

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Exercise {
    #[serde(rename = "_id", alias = "id", skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub name: String,
    #[serde(deserialize_with = "known_or_none", serialize_with = "none_as_blank")]
    pub body_part: Option<BodyPart>,
    #[serde(deserialize_with = "known_or_none", serialize_with = "none_as_blank")]
    pub equipment: Option<Equipment>,
    #[serde(deserialize_with = "known_or_none", serialize_with = "none_as_blank")]
    pub target: Option<Target>,
    #[serde(deserialize_with = "known_labels")]
    pub secondary_muscles: Vec<Target>,
    #[serde(deserialize_with = "text_or_lines")]
    pub instructions: String,
    #[serde(deserialize_with = "known_or_none", serialize_with = "none_as_blank")]
    pub difficulty: Option<Difficulty>,
    pub gif_url: String,
    pub is_banned: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Plan {
    #[serde(rename = "_id", alias = "id", skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub background_image: String,
    pub is_pro: bool,
    pub accent_color: String,
    pub target_audience: TargetAudience,
    pub duration: PlanDuration,
    pub weeks: Vec<Week>,
}

impl Default for Plan {
    fn default() -> Self {
        Self {
            id: String::new(),
            title: String::new(),
            subtitle: String::new(),
            description: String::new(),
            background_image: String::new(),
            is_pro: false,
            accent_color: "#000000".to_string(),
            target_audience: TargetAudience::default(),
            duration: PlanDuration::default(),
            weeks: Vec::new(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlanDuration {
    #[serde(deserialize_with = "lenient_u32")]
    pub weeks: u32,
    #[serde(deserialize_with = "lenient_u32")]
    pub days_per_week: u32,
}

impl PlanDuration {
    pub const MAX_WEEKS: u32 = 8;
    pub const MAX_DAYS_PER_WEEK: u32 = 7;

    pub fn new(weeks: u32, days_per_week: u32) -> Self {
        Self {
            weeks: weeks.clamp(1, Self::MAX_WEEKS),
            days_per_week: days_per_week.clamp(1, Self::MAX_DAYS_PER_WEEK),
        }
    }
}

impl Default for PlanDuration {
    fn default() -> Self {
        Self {
            weeks: 1,
            days_per_week: 1,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Week {
    pub week_number: u32,
    pub days: Vec<Day>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Day {
    pub day_number: u32,
    #[serde(deserialize_with = "known_labels")]
    pub focus_area: Vec<BodyPart>,
    #[serde(deserialize_with = "known_or_none", serialize_with = "none_as_blank")]
    pub level: Option<Difficulty>,
    pub total_time: String,
    pub exercises: Vec<PlanExercise>,
}

impl Day {
    pub fn empty(day_number: u32) -> Self {
        Self {
            day_number,
            focus_area: Vec::new(),
            level: None,
            total_time: "0 minutes".to_string(),
            exercises: Vec::new(),
        }
    }
}

impl Default for Day {
    fn default() -> Self {
        Day::empty(1)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlanExercise {
    pub name: String,
    /// Seconds per set
    #[serde(deserialize_with = "lenient_opt_u32")]
    pub duration: Option<u32>,
    #[serde(deserialize_with = "lenient_u32")]
    pub sets: u32,
    #[serde(deserialize_with = "lenient_u32")]
    pub reps: u32,
    #[serde(
        rename = "type",
        deserialize_with = "known_or_none",
        serialize_with = "none_as_blank"
    )]
    pub kind: Option<WorkoutType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exercise_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gif_url: Option<String>,
}

impl Default for PlanExercise {
    fn default() -> Self {
        Self {
            name: String::new(),
            duration: None,
            sets: 1,
            reps: 0,
            kind: None,
            exercise_id: None,
            gif_url: None,
        }
    }
}

/// Who a plan is aimed at.
///
/// The backend keeps every field twice: a scalar and a single-element list
/// (`experienceLevel` / `experienceLevels`, ...). The scalar held here is the
/// source of truth; both wire forms are written from it.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "TargetAudienceWire", into = "TargetAudienceWire")]
pub struct TargetAudience {
    pub experience_level: Option<Difficulty>,
    pub fitness_goal: Option<FitnessGoal>,
    pub equipment_needed: Option<Equipment>,
    pub activity_level: Option<ActivityLevel>,
}

#[derive(Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct TargetAudienceWire {
    experience_level: Value,
    experience_levels: Value,
    fitness_goal: Value,
    fitness_goals: Value,
    equipment_needed: Value,
    equipment_neededs: Value,
    activity_level: Value,
    activity_levels: Value,
}

impl From<TargetAudienceWire> for TargetAudience {
    fn from(wire: TargetAudienceWire) -> Self {
        Self {
            experience_level: first_of(&wire.experience_levels, &wire.experience_level),
            fitness_goal: first_of(&wire.fitness_goals, &wire.fitness_goal),
            equipment_needed: first_of(&wire.equipment_neededs, &wire.equipment_needed),
            activity_level: first_of(&wire.activity_levels, &wire.activity_level),
        }
    }
}

impl From<TargetAudience> for TargetAudienceWire {
    fn from(audience: TargetAudience) -> Self {
        fn pair(label: Option<&'static str>) -> (Value, Value) {
            match label {
                Some(label) => (Value::from(label), Value::from(vec![label])),
                None => (Value::from(""), Value::Array(Vec::new())),
            }
        }
        let (experience_level, experience_levels) =
            pair(audience.experience_level.map(|v| v.as_str()));
        let (fitness_goal, fitness_goals) = pair(audience.fitness_goal.map(|v| v.as_str()));
        let (equipment_needed, equipment_neededs) =
            pair(audience.equipment_needed.map(|v| v.as_str()));
        let (activity_level, activity_levels) =
            pair(audience.activity_level.map(|v| v.as_str()));
        Self {
            experience_level,
            experience_levels,
            fitness_goal,
            fitness_goals,
            equipment_needed,
            equipment_neededs,
            activity_level,
            activity_levels,
        }
    }
}

/// First usable value: the plural list wins, then the scalar key (which the
/// backend sometimes stores as a list too).
fn first_of<T: DeserializeOwned>(plural: &Value, scalar: &Value) -> Option<T> {
    fn pick<T: DeserializeOwned>(value: &Value) -> Option<T> {
        match value {
            Value::Array(items) => items.first().and_then(pick::<T>),
            Value::String(s) if s.is_empty() => None,
            Value::Null => None,
            other => serde_json::from_value(other.clone()).ok(),
        }
    }
    pick::<T>(plural).or_else(|| pick::<T>(scalar))
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Banner {
    #[serde(rename = "_id", alias = "id", skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub name: String,
    pub image_url: String,
    pub expiry_date: Option<DateTime<Utc>>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct User {
    #[serde(rename = "_id", alias = "id", skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub name: String,
    pub email: String,
    pub personal_info: PersonalInfo,
    pub verified: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersonalInfo {
    pub gender: String,
}

// ─────────────────────────────────────────────────────────────────
// Lenient field codecs
// ─────────────────────────────────────────────────────────────────

/// `""` and `null` both mean "not chosen yet". Labels outside the closed set
/// are logged and dropped so one odd record cannot sink a whole page.
fn known_or_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(known_label(Value::deserialize(deserializer)?))
}

fn known_labels<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    match Value::deserialize(deserializer)? {
        Value::Array(items) => Ok(items.into_iter().filter_map(known_label).collect()),
        other => Ok(known_label(other).into_iter().collect()),
    }
}

fn known_label<T: DeserializeOwned>(value: Value) -> Option<T> {
    match value {
        Value::Null => None,
        Value::String(ref s) if s.is_empty() => None,
        other => serde_json::from_value(other.clone())
            .inspect_err(|_| warn!("Ignoring unknown label {}", other))
            .ok(),
    }
}

fn none_as_blank<S, T>(value: &Option<T>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
    T: Serialize,
{
    match value {
        Some(v) => v.serialize(serializer),
        None => serializer.serialize_str(""),
    }
}

/// Instructions arrive either as one text block or as a list of steps.
fn text_or_lines<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Array(lines) => Ok(lines
            .iter()
            .filter_map(Value::as_str)
            .collect::<Vec<_>>()
            .join("\n")),
        Value::Null => Ok(String::new()),
        other => Err(serde::de::Error::custom(format!(
            "expected text, got {other}"
        ))),
    }
}

fn number_from(value: &Value) -> Option<u32> {
    match value {
        Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Numbers typed into form fields were historically stored as strings.
fn lenient_u32<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(number_from(&Value::deserialize(deserializer)?).unwrap_or_default())
}

fn lenient_opt_u32<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(number_from(&Value::deserialize(deserializer)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_labels_match_wire_strings() {
        assert_eq!(Equipment::BodyWeight.to_string(), "body weight");
        assert_eq!(WorkoutType::Hiit.as_str(), "HIIT");
        assert_eq!(Target::ALL.len(), 20);
        assert_eq!(
            serde_json::from_value::<Target>(json!("levator scapulae")).unwrap(),
            Target::LevatorScapulae
        );
    }

    #[test]
    fn test_difficulty_orders_by_rank() {
        let mut levels = vec![
            Difficulty::Advanced,
            Difficulty::Beginner,
            Difficulty::Intermediate,
        ];
        levels.sort();
        assert_eq!(levels, Difficulty::ALL.to_vec());
    }

    #[test]
    fn test_exercise_from_backend_document() {
        let exercise: Exercise = serde_json::from_value(json!({
            "_id": "665f",
            "name": "bench press",
            "bodyPart": "chest",
            "equipment": "barbell",
            "target": "pectorals",
            "secondaryMuscles": ["triceps", "delts"],
            "instructions": ["Lie down.", "Press."],
            "difficulty": "",
            "gifUrl": "https://cdn.example.com/bench.gif",
            "isBanned": true
        }))
        .unwrap();

        assert_eq!(exercise.id, "665f");
        assert_eq!(exercise.body_part, Some(BodyPart::Chest));
        assert_eq!(exercise.secondary_muscles, vec![Target::Triceps, Target::Delts]);
        assert_eq!(exercise.instructions, "Lie down.\nPress.");
        assert_eq!(exercise.difficulty, None);
        assert!(exercise.is_banned);
    }

    #[test]
    fn test_unknown_labels_decode_as_unset() {
        let day: Day = serde_json::from_value(json!({
            "dayNumber": 1,
            "focusArea": ["chest", "waist"],
            "level": "expert",
            "exercises": [{"name": "burpee", "type": "hiit"}]
        }))
        .unwrap();

        assert_eq!(day.focus_area, vec![BodyPart::Chest]);
        assert_eq!(day.level, None);
        assert_eq!(day.exercises[0].kind, None);
        assert_eq!(day.exercises[0].name, "burpee");
    }

    #[test]
    fn test_plan_exercise_accepts_string_numbers() {
        let slot: PlanExercise = serde_json::from_value(json!({
            "name": "squat",
            "duration": "45",
            "sets": "3",
            "reps": 10,
            "type": "strength"
        }))
        .unwrap();

        assert_eq!(slot.duration, Some(45));
        assert_eq!(slot.sets, 3);
        assert_eq!(slot.kind, Some(WorkoutType::Strength));
    }

    #[test]
    fn test_unset_level_serializes_blank() {
        let value = serde_json::to_value(Day::empty(2)).unwrap();
        assert_eq!(value["level"], json!(""));
        assert_eq!(value["dayNumber"], json!(2));
        assert_eq!(value["totalTime"], json!("0 minutes"));
    }

    #[test]
    fn test_target_audience_reads_plural_first() {
        let audience: TargetAudience = serde_json::from_value(json!({
            "experienceLevel": "advanced",
            "experienceLevels": ["beginner"],
            "equipmentNeeded": ["dumbbell"],
            "fitnessGoal": "keepFit"
        }))
        .unwrap();

        assert_eq!(audience.experience_level, Some(Difficulty::Beginner));
        assert_eq!(audience.equipment_needed, Some(Equipment::Dumbbell));
        assert_eq!(audience.fitness_goal, Some(FitnessGoal::KeepFit));
        assert_eq!(audience.activity_level, None);
    }

    #[test]
    fn test_target_audience_writes_scalar_and_list() {
        let audience = TargetAudience {
            equipment_needed: Some(Equipment::BodyWeight),
            ..Default::default()
        };
        let value = serde_json::to_value(&audience).unwrap();

        assert_eq!(value["equipmentNeeded"], json!("body weight"));
        assert_eq!(value["equipmentNeededs"], json!(["body weight"]));
        assert_eq!(value["experienceLevel"], json!(""));
        assert_eq!(value["experienceLevels"], json!([]));
    }

    #[test]
    fn test_plan_duration_new_clamps() {
        assert_eq!(PlanDuration::new(0, 9), PlanDuration::new(1, 7));
        assert_eq!(PlanDuration::new(12, 3).weeks, 8);
    }
}
