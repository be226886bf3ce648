//! Nested plan form: weeks -> days -> exercise slots
//!
//! The week/day matrix always matches `duration`. Each day's `totalTime` is
//! rewritten whenever one of its exercises changes, and the exercise picker
//! candidates are derived from the current draft on demand.

use tracing::{debug, warn};

use crate::api::{decode_page, ApiRequest, Backend, ListQuery, Part, Payload, SortOrder};
use crate::config::UploadSettings;
use crate::error::{Error, Result};
use crate::forms::EntityForm;
use crate::models::{
    BodyPart, Day, Difficulty, Exercise, Plan, PlanDuration, PlanExercise, TargetAudience, Week,
    WorkoutType,
};
use crate::submit::Submitter;
use crate::upload::{compress_image, ImageField};

/// A fresh matrix for `duration`, every day empty.
pub fn regenerate_weeks(duration: PlanDuration) -> Vec<Week> {
    (1..=duration.weeks)
        .map(|week_number| Week {
            week_number,
            days: (1..=duration.days_per_week).map(Day::empty).collect(),
        })
        .collect()
}

/// Resize `weeks` to `duration`, keeping the content of every week and day
/// whose index is still in range.
pub fn reconcile_weeks(mut weeks: Vec<Week>, duration: PlanDuration) -> Vec<Week> {
    weeks.truncate(duration.weeks as usize);
    for week_number in weeks.len() as u32 + 1..=duration.weeks {
        weeks.push(Week {
            week_number,
            days: Vec::new(),
        });
    }
    for (w, week) in weeks.iter_mut().enumerate() {
        week.week_number = w as u32 + 1;
        week.days.truncate(duration.days_per_week as usize);
        for day_number in week.days.len() as u32 + 1..=duration.days_per_week {
            week.days.push(Day::empty(day_number));
        }
        for (d, day) in week.days.iter_mut().enumerate() {
            day.day_number = d as u32 + 1;
        }
    }
    weeks
}

/// Duration of a stored plan. A missing duration decodes as 1x1 and a
/// zeroed axis is unusable, so the week/day matrix fills in either case.
fn stored_duration(plan: &Plan) -> PlanDuration {
    let shape_weeks = plan.weeks.len() as u32;
    let shape_days = plan.weeks.iter().map(|w| w.days.len()).max().unwrap_or(0) as u32;
    let stored = plan.duration;
    if stored == PlanDuration::default() && shape_weeks > 0 {
        return PlanDuration::new(shape_weeks, shape_days);
    }
    let weeks = if stored.weeks == 0 { shape_weeks } else { stored.weeks };
    let days = if stored.days_per_week == 0 { shape_days } else { stored.days_per_week };
    PlanDuration::new(weeks, days)
}

/// `round(Σ duration × sets / 60)` as display text.
///
/// A missing duration counts as 0 seconds and zero sets count as one set.
pub fn total_time(exercises: &[PlanExercise]) -> String {
    let seconds: u64 = exercises
        .iter()
        .map(|slot| {
            let sets = if slot.sets == 0 { 1 } else { slot.sets };
            u64::from(slot.duration.unwrap_or(0)) * u64::from(sets)
        })
        .sum();
    let minutes = (seconds as f64 / 60.0).round() as u64;
    format!("{minutes} minutes")
}

/// Catalog exercises usable on a day: matching equipment, a body part in the
/// day's focus, easiest first. Ties keep catalog order.
pub fn candidates_for<'a>(
    catalog: &'a [Exercise],
    audience: &TargetAudience,
    focus_area: &[BodyPart],
) -> Vec<&'a Exercise> {
    let mut matches: Vec<&Exercise> = catalog
        .iter()
        .filter(|ex| ex.equipment.is_some() && ex.equipment == audience.equipment_needed)
        .filter(|ex| ex.body_part.is_some_and(|part| focus_area.contains(&part)))
        .collect();
    matches.sort_by_key(|ex| ex.difficulty);
    matches
}

pub struct PlanForm {
    editing_id: Option<String>,
    pub draft: Plan,
    pub background: ImageField,
    catalog: Vec<Exercise>,
    upload: UploadSettings,
    submitter: Submitter,
}

impl PlanForm {
    pub fn new(existing: Option<&Plan>, upload: UploadSettings) -> Self {
        let mut draft = existing.cloned().unwrap_or_default();
        draft.duration = stored_duration(&draft);
        draft.weeks = if draft.weeks.is_empty() {
            regenerate_weeks(draft.duration)
        } else {
            reconcile_weeks(std::mem::take(&mut draft.weeks), draft.duration)
        };
        if draft.accent_color.is_empty() {
            draft.accent_color = Plan::default().accent_color;
        }

        Self {
            editing_id: existing.map(|p| p.id.clone()),
            background: ImageField::from_url(&draft.background_image),
            draft,
            catalog: Vec::new(),
            upload,
            submitter: Submitter::default(),
        }
    }

    pub fn is_edit(&self) -> bool {
        self.editing_id.is_some()
    }

    pub fn submit_label(&self) -> &'static str {
        if self.is_edit() {
            "Update Plan"
        } else {
            "Add Plan"
        }
    }

    pub fn submitter_ref(&self) -> &Submitter {
        &self.submitter
    }

    // ─────────────────────────────────────────────────────────────
    // Exercise catalog
    // ─────────────────────────────────────────────────────────────

    #[cfg(test)]
    pub fn catalog(&self) -> &[Exercise] {
        &self.catalog
    }

    #[cfg(test)]
    pub fn set_catalog(&mut self, catalog: Vec<Exercise>) {
        self.catalog = catalog;
    }

    /// Load up to `limit` exercises for the per-slot pickers.
    pub fn load_catalog(&mut self, backend: &dyn Backend, limit: usize) -> Result<()> {
        let query = ListQuery {
            search: String::new(),
            page: 0,
            limit,
            sort: SortOrder::NameAsc,
        };
        let page = backend
            .execute(ApiRequest::list("exercises", &query))
            .and_then(decode_page::<Exercise>)?;
        debug!("Loaded {} catalog exercises", page.items.len());
        self.catalog = page.items;
        Ok(())
    }

    fn lookup(&self, name: &str) -> Option<&Exercise> {
        self.catalog.iter().find(|ex| ex.name == name)
    }

    // ─────────────────────────────────────────────────────────────
    // Matrix shape
    // ─────────────────────────────────────────────────────────────

    pub fn set_duration(&mut self, weeks: u32, days_per_week: u32) {
        let duration = PlanDuration::new(weeks, days_per_week);
        if duration == self.draft.duration {
            return;
        }
        self.draft.duration = duration;
        self.draft.weeks = reconcile_weeks(std::mem::take(&mut self.draft.weeks), duration);
    }

    pub fn day(&self, week: usize, day: usize) -> Option<&Day> {
        self.draft.weeks.get(week)?.days.get(day)
    }

    fn day_mut(&mut self, week: usize, day: usize) -> Option<&mut Day> {
        self.draft.weeks.get_mut(week)?.days.get_mut(day)
    }

    // ─────────────────────────────────────────────────────────────
    // Day edits
    // ─────────────────────────────────────────────────────────────

    #[cfg(test)]
    pub fn set_focus_area(&mut self, week: usize, day: usize, focus_area: Vec<BodyPart>) {
        if let Some(d) = self.day_mut(week, day) {
            d.focus_area = focus_area;
        }
    }

    pub fn toggle_focus_area(&mut self, week: usize, day: usize, part: BodyPart) {
        if let Some(d) = self.day_mut(week, day) {
            match d.focus_area.iter().position(|p| *p == part) {
                Some(idx) => {
                    d.focus_area.remove(idx);
                }
                None => d.focus_area.push(part),
            }
        }
    }

    pub fn set_level(&mut self, week: usize, day: usize, level: Option<Difficulty>) {
        if let Some(d) = self.day_mut(week, day) {
            d.level = level;
        }
    }

    pub fn add_exercise(&mut self, week: usize, day: usize) {
        if let Some(d) = self.day_mut(week, day) {
            d.exercises.push(PlanExercise::default());
        }
    }

    pub fn remove_exercise(&mut self, week: usize, day: usize, slot: usize) {
        if let Some(d) = self.day_mut(week, day) {
            if slot < d.exercises.len() {
                d.exercises.remove(slot);
                d.total_time = total_time(&d.exercises);
            }
        }
    }

    // ─────────────────────────────────────────────────────────────
    // Exercise slot edits
    // ─────────────────────────────────────────────────────────────

    fn edit_slot(&mut self, week: usize, day: usize, slot: usize, f: impl FnOnce(&mut PlanExercise)) {
        let Some(d) = self.day_mut(week, day) else {
            return;
        };
        let Some(exercise) = d.exercises.get_mut(slot) else {
            return;
        };
        f(exercise);
        d.total_time = total_time(&d.exercises);
    }

    /// Set the slot's exercise and resolve its id and GIF from the catalog.
    pub fn set_exercise_name(&mut self, week: usize, day: usize, slot: usize, name: &str) {
        let resolved = self
            .lookup(name)
            .map(|ex| (ex.id.clone(), ex.gif_url.clone()));
        if resolved.is_none() {
            debug!("No catalog exercise named {:?}", name);
        }
        self.edit_slot(week, day, slot, |exercise| {
            exercise.name = name.to_string();
            match resolved {
                Some((id, gif)) => {
                    exercise.exercise_id = Some(id);
                    exercise.gif_url = Some(gif);
                }
                None => {
                    exercise.exercise_id = None;
                    exercise.gif_url = None;
                }
            }
        });
    }

    pub fn set_exercise_duration(&mut self, week: usize, day: usize, slot: usize, seconds: Option<u32>) {
        self.edit_slot(week, day, slot, |exercise| exercise.duration = seconds);
    }

    pub fn set_exercise_sets(&mut self, week: usize, day: usize, slot: usize, sets: u32) {
        self.edit_slot(week, day, slot, |exercise| exercise.sets = sets);
    }

    pub fn set_exercise_reps(&mut self, week: usize, day: usize, slot: usize, reps: u32) {
        self.edit_slot(week, day, slot, |exercise| exercise.reps = reps);
    }

    pub fn set_exercise_type(&mut self, week: usize, day: usize, slot: usize, kind: Option<WorkoutType>) {
        self.edit_slot(week, day, slot, |exercise| exercise.kind = kind);
    }

    /// Picker options for every slot of one day.
    pub fn candidates(&self, week: usize, day: usize) -> Vec<&Exercise> {
        match self.day(week, day) {
            Some(d) => candidates_for(&self.catalog, &self.draft.target_audience, &d.focus_area),
            None => Vec::new(),
        }
    }

    // ─────────────────────────────────────────────────────────────
    // Accent colour
    // ─────────────────────────────────────────────────────────────

    pub fn accent_rgb(&self) -> [u8; 3] {
        parse_hex_color(&self.draft.accent_color).unwrap_or([0, 0, 0])
    }

    pub fn set_accent_rgb(&mut self, rgb: [u8; 3]) {
        self.draft.accent_color = format!("#{:02x}{:02x}{:02x}", rgb[0], rgb[1], rgb[2]);
    }

    // ─────────────────────────────────────────────────────────────
    // Submission
    // ─────────────────────────────────────────────────────────────

    /// The draft as it will be sent: ids resolved, background URL applied.
    fn outgoing_plan(&self) -> Plan {
        let mut plan = self.draft.clone();
        plan.id.clear();
        plan.background_image = match self.background.file {
            Some(_) => String::new(),
            None => self.background.url.trim().to_string(),
        };
        for exercise in plan
            .weeks
            .iter_mut()
            .flat_map(|week| week.days.iter_mut())
            .flat_map(|day| day.exercises.iter_mut())
        {
            if let Some(found) = self.lookup(&exercise.name) {
                exercise.exercise_id = Some(found.id.clone());
                exercise.gif_url = Some(found.gif_url.clone());
            } else if !exercise.name.is_empty() {
                warn!("Plan exercise {:?} is not in the catalog", exercise.name);
            }
        }
        plan
    }
}

impl EntityForm for PlanForm {
    fn request(&self) -> Result<ApiRequest> {
        if self.draft.title.trim().is_empty() {
            return Err(Error::Validation { field: "Title" });
        }

        let plan = self.outgoing_plan();
        let mut parts = vec![
            Part::text("title", serde_json::to_string(&plan.title)?),
            Part::text("subtitle", serde_json::to_string(&plan.subtitle)?),
            Part::text("description", serde_json::to_string(&plan.description)?),
            Part::text("isPro", serde_json::to_string(&plan.is_pro)?),
            Part::text("accentColor", serde_json::to_string(&plan.accent_color)?),
            Part::text("duration", serde_json::to_string(&plan.duration)?),
            Part::text("weeks", serde_json::to_string(&plan.weeks)?),
            Part::text(
                "targetAudience",
                serde_json::to_string(&plan.target_audience)?,
            ),
            Part::text("planData", serde_json::to_string(&plan)?),
        ];
        if let Some(file) = &self.background.file {
            parts.push(compress_image(file.clone(), &self.upload).into_part("backgroundImage"));
        }

        Ok(ApiRequest::save::<Plan>(
            self.editing_id.as_deref(),
            Payload::Multipart(parts),
        ))
    }

    fn submitter(&mut self) -> &mut Submitter {
        &mut self.submitter
    }
}

fn parse_hex_color(hex: &str) -> Option<[u8; 3]> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
    Some([channel(0)?, channel(2)?, channel(4)?])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::MockBackend;
    use crate::api::Method;
    use crate::models::Equipment;
    use crate::upload::UploadedFile;
    use serde_json::{json, Value};

    fn catalog_entry(id: &str, name: &str, part: BodyPart, eq: Equipment, level: Difficulty) -> Exercise {
        Exercise {
            id: id.to_string(),
            name: name.to_string(),
            body_part: Some(part),
            equipment: Some(eq),
            difficulty: Some(level),
            gif_url: format!("https://cdn.example.com/{id}.gif"),
            ..Default::default()
        }
    }

    fn slot(duration: u32, sets: u32) -> PlanExercise {
        PlanExercise {
            duration: Some(duration),
            sets,
            ..Default::default()
        }
    }

    fn form() -> PlanForm {
        let mut form = PlanForm::new(None, UploadSettings::default());
        form.set_catalog(vec![
            catalog_entry("e1", "bench press", BodyPart::Chest, Equipment::Barbell, Difficulty::Advanced),
            catalog_entry("e2", "floor press", BodyPart::Chest, Equipment::Barbell, Difficulty::Beginner),
            catalog_entry("e3", "deadlift", BodyPart::Back, Equipment::Barbell, Difficulty::Intermediate),
            catalog_entry("e4", "push up", BodyPart::Chest, Equipment::BodyWeight, Difficulty::Beginner),
        ]);
        form
    }

    #[test]
    fn test_regenerate_matches_every_duration() {
        for weeks in 1..=PlanDuration::MAX_WEEKS {
            for days in 1..=PlanDuration::MAX_DAYS_PER_WEEK {
                let matrix = regenerate_weeks(PlanDuration::new(weeks, days));
                assert_eq!(matrix.len(), weeks as usize);
                for (w, week) in matrix.iter().enumerate() {
                    assert_eq!(week.week_number, w as u32 + 1);
                    assert_eq!(week.days.len(), days as usize);
                    assert!(week.days.iter().all(|d| d.exercises.is_empty()
                        && d.focus_area.is_empty()
                        && d.level.is_none()
                        && d.total_time == "0 minutes"));
                }
            }
        }
    }

    #[test]
    fn test_new_plan_starts_with_one_by_one_matrix() {
        let form = PlanForm::new(None, UploadSettings::default());
        assert_eq!(form.draft.weeks.len(), 1);
        assert_eq!(form.draft.weeks[0].days.len(), 1);
        assert_eq!(form.draft.accent_color, "#000000");
        assert_eq!(form.submit_label(), "Add Plan");
    }

    #[test]
    fn test_duration_change_keeps_in_range_content() {
        let mut form = form();
        form.set_duration(2, 3);
        form.add_exercise(0, 1);
        form.set_exercise_name(0, 1, 0, "bench press");
        form.set_level(1, 2, Some(Difficulty::Advanced));

        form.set_duration(3, 2);

        assert_eq!(form.draft.weeks.len(), 3);
        assert!(form.draft.weeks.iter().all(|w| w.days.len() == 2));
        assert_eq!(form.day(0, 1).unwrap().exercises[0].name, "bench press");
        // day 3 of week 2 fell off the boundary
        assert!(form.day(1, 2).is_none());
        assert_eq!(form.draft.weeks[2].week_number, 3);
        assert_eq!(form.day(2, 1).unwrap().day_number, 2);
    }

    #[test]
    fn test_missing_duration_comes_from_stored_weeks() {
        let stored: Plan = serde_json::from_value(json!({
            "_id": "p1",
            "title": "No duration",
            "weeks": [
                {"weekNumber": 1, "days": [{"dayNumber": 1}, {"dayNumber": 2, "focusArea": ["legs"]}]},
                {"weekNumber": 2, "days": [{"dayNumber": 1}, {"dayNumber": 2}]},
                {"weekNumber": 3, "days": [{"dayNumber": 1}, {"dayNumber": 2}]}
            ]
        }))
        .unwrap();

        let form = PlanForm::new(Some(&stored), UploadSettings::default());

        assert_eq!(form.draft.duration, PlanDuration::new(3, 2));
        assert_eq!(form.draft.weeks.len(), 3);
        assert_eq!(form.day(0, 1).unwrap().focus_area, vec![BodyPart::Legs]);

        let zeroed = Plan {
            duration: PlanDuration { weeks: 0, days_per_week: 2 },
            ..stored
        };
        let form = PlanForm::new(Some(&zeroed), UploadSettings::default());
        assert_eq!(form.draft.duration, PlanDuration::new(3, 2));
    }

    #[test]
    fn test_stored_duration_still_wins_when_present() {
        let stored = Plan {
            duration: PlanDuration::new(2, 1),
            weeks: regenerate_weeks(PlanDuration::new(3, 3)),
            ..Default::default()
        };
        let form = PlanForm::new(Some(&stored), UploadSettings::default());
        assert_eq!(form.draft.duration, PlanDuration::new(2, 1));
        assert_eq!(form.draft.weeks.len(), 2);
    }

    #[test]
    fn test_duration_is_clamped() {
        let mut form = form();
        form.set_duration(20, 0);
        assert_eq!(form.draft.duration, PlanDuration::new(8, 1));
        assert_eq!(form.draft.weeks.len(), 8);
    }

    #[test]
    fn test_total_time_rounds_minutes() {
        assert_eq!(total_time(&[slot(60, 2), slot(30, 1)]), "3 minutes");
        assert_eq!(total_time(&[]), "0 minutes");
        // zero sets count once, missing duration counts nothing
        assert_eq!(total_time(&[slot(90, 0), PlanExercise::default()]), "2 minutes");
    }

    #[test]
    fn test_exercise_edits_rewrite_total_time() {
        let mut form = form();
        form.add_exercise(0, 0);
        form.add_exercise(0, 0);
        form.set_exercise_duration(0, 0, 0, Some(60));
        form.set_exercise_sets(0, 0, 0, 2);
        form.set_exercise_duration(0, 0, 1, Some(30));
        assert_eq!(form.day(0, 0).unwrap().total_time, "3 minutes");

        form.remove_exercise(0, 0, 0);
        assert_eq!(form.day(0, 0).unwrap().total_time, "1 minutes");
    }

    #[test]
    fn test_candidates_filter_then_sort_by_difficulty() {
        let mut form = form();
        form.draft.target_audience.equipment_needed = Some(Equipment::Barbell);
        form.set_focus_area(0, 0, vec![BodyPart::Chest]);

        let names: Vec<_> = form.candidates(0, 0).iter().map(|ex| ex.name.as_str()).collect();
        assert_eq!(names, vec!["floor press", "bench press"]);

        form.toggle_focus_area(0, 0, BodyPart::Back);
        let names: Vec<_> = form.candidates(0, 0).iter().map(|ex| ex.name.as_str()).collect();
        assert_eq!(names, vec!["floor press", "deadlift", "bench press"]);
    }

    #[test]
    fn test_candidates_empty_without_equipment_or_focus() {
        let mut form = form();
        form.set_focus_area(0, 0, vec![BodyPart::Chest]);
        assert!(form.candidates(0, 0).is_empty());

        form.draft.target_audience.equipment_needed = Some(Equipment::BodyWeight);
        form.set_focus_area(0, 0, Vec::new());
        assert!(form.candidates(0, 0).is_empty());
    }

    #[test]
    fn test_name_change_resolves_catalog_reference() {
        let mut form = form();
        form.add_exercise(0, 0);

        form.set_exercise_name(0, 0, 0, "push up");
        let slot = &form.day(0, 0).unwrap().exercises[0];
        assert_eq!(slot.exercise_id.as_deref(), Some("e4"));
        assert_eq!(slot.gif_url.as_deref(), Some("https://cdn.example.com/e4.gif"));

        form.set_exercise_name(0, 0, 0, "mystery move");
        let slot = &form.day(0, 0).unwrap().exercises[0];
        assert_eq!(slot.exercise_id, None);
        assert_eq!(slot.gif_url, None);
    }

    #[test]
    fn test_out_of_range_edits_are_ignored() {
        let mut form = form();
        form.add_exercise(4, 4);
        form.set_exercise_sets(0, 0, 3, 9);
        assert!(form.day(0, 0).unwrap().exercises.is_empty());
    }

    #[test]
    fn test_load_catalog_accepts_envelope() {
        let backend = MockBackend::with_list(json!({
            "exercises": [{"_id": "x", "name": "lunge", "bodyPart": "legs"}],
            "total": 1
        }));
        let mut form = PlanForm::new(None, UploadSettings::default());

        form.load_catalog(&backend, 500).unwrap();

        assert_eq!(form.catalog().len(), 1);
        let call = &backend.calls()[0];
        assert!(call.query.contains(&("limit", "500".to_string())));
    }

    #[test]
    fn test_request_requires_title() {
        let form = form();
        assert!(matches!(
            form.request(),
            Err(Error::Validation { field: "Title" })
        ));
    }

    #[test]
    fn test_request_encodes_each_field_and_plan_data() {
        let mut form = form();
        form.draft.title = "Strong Start".to_string();
        form.draft.is_pro = true;
        form.draft.target_audience.equipment_needed = Some(Equipment::Barbell);
        form.background.url = "https://cdn.example.com/bg.png".to_string();
        form.set_duration(1, 2);
        form.add_exercise(0, 1);
        form.set_exercise_name(0, 1, 0, "deadlift");

        let request = form.request().unwrap();
        let payload = &request.payload;

        assert_eq!(request.method, Method::Post);
        assert_eq!(request.path, "plans");
        assert_eq!(payload.text_field("title"), Some("\"Strong Start\""));
        assert_eq!(payload.text_field("isPro"), Some("true"));
        assert_eq!(
            payload.text_field("duration"),
            Some(r#"{"weeks":1,"daysPerWeek":2}"#)
        );
        let weeks: Value = serde_json::from_str(payload.text_field("weeks").unwrap()).unwrap();
        assert_eq!(weeks[0]["days"][1]["exercises"][0]["exerciseId"], json!("e3"));

        let plan: Value = serde_json::from_str(payload.text_field("planData").unwrap()).unwrap();
        assert_eq!(plan["backgroundImage"], json!("https://cdn.example.com/bg.png"));
        assert_eq!(plan["targetAudience"]["equipmentNeededs"], json!(["barbell"]));
        assert!(payload.text_field("backgroundImage").is_none());
        assert!(!payload.has_file("backgroundImage"));
    }

    #[test]
    fn test_request_attaches_background_file_on_update() {
        let existing = Plan {
            id: "p7".to_string(),
            title: "Existing".to_string(),
            ..Default::default()
        };
        let mut form = PlanForm::new(Some(&existing), UploadSettings::default());
        form.background.file = Some(UploadedFile::new("bg.png", vec![9, 9]));

        let request = form.request().unwrap();

        assert_eq!(request.method, Method::Patch);
        assert_eq!(request.path, "plans/p7");
        assert!(request.payload.has_file("backgroundImage"));
        let plan: Value =
            serde_json::from_str(request.payload.text_field("planData").unwrap()).unwrap();
        assert_eq!(plan["backgroundImage"], json!(""));
        assert!(plan.get("_id").is_none());
    }

    #[test]
    fn test_accent_color_round_trip() {
        let mut form = form();
        form.set_accent_rgb([253, 99, 0]);
        assert_eq!(form.draft.accent_color, "#fd6300");
        assert_eq!(form.accent_rgb(), [253, 99, 0]);

        form.draft.accent_color = "orange".to_string();
        assert_eq!(form.accent_rgb(), [0, 0, 0]);
    }
}
