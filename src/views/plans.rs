//! Plan list plus the nested weeks/days/exercises editor

use eframe::egui::{self, Color32, RichText, Ui};
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::api::Backend;
use crate::config::{Settings, UploadSettings};
use crate::forms::EntityForm;
use crate::list::ListController;
use crate::models::{
    ActivityLevel, BodyPart, Difficulty, Equipment, FitnessGoal, Plan, PlanDuration, WorkoutType,
};
use crate::plan_builder::PlanForm;
use crate::upload::UploadedFile;
use crate::views::table::{list_screen, ScreenAction, TableRow};
use crate::views::{enum_combo, image_field, multi_select, submit_row};

impl TableRow for Plan {
    const TITLE: &'static str = "Plans";
    const COLUMNS: &'static [&'static str] = &["Title", "Duration", "Level", "Access"];

    fn cells(&self) -> Vec<RichText> {
        let level = self
            .target_audience
            .experience_level
            .map(|l| l.as_str())
            .unwrap_or("-");
        vec![
            RichText::new(&self.title).strong(),
            RichText::new(format!(
                "{} weeks, {} days/week",
                self.duration.weeks, self.duration.days_per_week
            )),
            RichText::new(level),
            if self.is_pro {
                RichText::new("Pro").color(Color32::GOLD)
            } else {
                RichText::new("Free")
            },
        ]
    }
}

/// Matrix edits collected while drawing and applied once the frame's
/// borrows of the draft are released.
enum PlanEdit {
    Duration { weeks: u32, days: u32 },
    ToggleFocus(usize, usize, BodyPart),
    Level(usize, usize, Option<Difficulty>),
    AddExercise(usize, usize),
    RemoveExercise(usize, usize, usize),
    Name(usize, usize, usize, String),
    Seconds(usize, usize, usize, Option<u32>),
    Sets(usize, usize, usize, u32),
    Reps(usize, usize, usize, u32),
    Kind(usize, usize, usize, Option<WorkoutType>),
    ReloadCatalog,
}

pub struct PlansScreen {
    pub list: ListController<Plan>,
    form: Option<PlanForm>,
    catalog_error: Option<String>,
    path_input: String,
    upload: UploadSettings,
    catalog_limit: usize,
}

impl PlansScreen {
    pub fn new(settings: &Settings) -> Self {
        Self {
            list: ListController::new(&settings.list),
            form: None,
            catalog_error: None,
            path_input: String::new(),
            upload: settings.upload,
            catalog_limit: settings.list.catalog_limit,
        }
    }

    pub fn attach(&mut self, file: UploadedFile) {
        if let Some(form) = self.form.as_mut() {
            form.background.file = Some(file);
        }
    }

    pub fn show(&mut self, ui: &mut Ui, backend: &Arc<dyn Backend>) {
        match list_screen(ui, &mut self.list, backend.as_ref(), Some("+ Add Plan")) {
            ScreenAction::Add => self.open(None, backend.as_ref()),
            ScreenAction::Edit(plan) => self.open(Some(&plan), backend.as_ref()),
            ScreenAction::None => {}
        }
        self.show_form(ui.ctx(), backend);
    }

    fn open(&mut self, existing: Option<&Plan>, backend: &dyn Backend) {
        let mut form = PlanForm::new(existing, self.upload);
        self.catalog_error = Self::load_catalog(&mut form, backend, self.catalog_limit);
        self.form = Some(form);
        self.path_input.clear();
    }

    fn load_catalog(form: &mut PlanForm, backend: &dyn Backend, limit: usize) -> Option<String> {
        match form.load_catalog(backend, limit) {
            Ok(()) => None,
            Err(e) => {
                error!("Could not load the exercise catalog: {}", e);
                Some(format!("Could not load exercises: {}", e.user_message()))
            }
        }
    }

    fn show_form(&mut self, ctx: &egui::Context, backend: &Arc<dyn Backend>) {
        let Some(form) = self.form.as_mut() else {
            return;
        };

        if form.submitter().poll().is_some() {
            info!("Plan saved");
            self.list.fetch(backend.as_ref());
            self.form = None;
            return;
        }

        let mut open = true;
        let mut submit = false;
        let mut edits = Vec::new();
        let title = if form.is_edit() { "Edit Plan" } else { "Add Plan" };
        let catalog_error = self.catalog_error.as_deref();
        let path_input = &mut self.path_input;

        egui::Window::new(title)
            .id(egui::Id::new("plan_form"))
            .open(&mut open)
            .collapsible(false)
            .default_width(760.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().max_height(720.0).show(ui, |ui| {
                    details(ui, form, path_input);
                    ui.separator();
                    audience(ui, form);
                    ui.separator();

                    if let Some(message) = catalog_error {
                        ui.horizontal(|ui| {
                            ui.label(RichText::new(message).color(Color32::LIGHT_RED));
                            if ui.small_button("Retry").clicked() {
                                edits.push(PlanEdit::ReloadCatalog);
                            }
                        });
                    }
                    schedule(ui, form, &mut edits);
                    ui.add_space(8.0);

                    submit = submit_row(ui, form.submit_label(), form.submitter_ref());
                });
            });

        for edit in edits {
            match edit {
                PlanEdit::Duration { weeks, days } => form.set_duration(weeks, days),
                PlanEdit::ToggleFocus(w, d, part) => form.toggle_focus_area(w, d, part),
                PlanEdit::Level(w, d, level) => form.set_level(w, d, level),
                PlanEdit::AddExercise(w, d) => form.add_exercise(w, d),
                PlanEdit::RemoveExercise(w, d, s) => form.remove_exercise(w, d, s),
                PlanEdit::Name(w, d, s, name) => form.set_exercise_name(w, d, s, &name),
                PlanEdit::Seconds(w, d, s, secs) => form.set_exercise_duration(w, d, s, secs),
                PlanEdit::Sets(w, d, s, sets) => form.set_exercise_sets(w, d, s, sets),
                PlanEdit::Reps(w, d, s, reps) => form.set_exercise_reps(w, d, s, reps),
                PlanEdit::Kind(w, d, s, kind) => form.set_exercise_type(w, d, s, kind),
                PlanEdit::ReloadCatalog => {
                    self.catalog_error =
                        Self::load_catalog(form, backend.as_ref(), self.catalog_limit);
                }
            }
        }

        if submit {
            if let Err(e) = form.submit(backend.clone()) {
                warn!("Plan not submitted: {}", e);
            }
        }
        if !open {
            self.form = None;
        }
    }
}

fn details(ui: &mut Ui, form: &mut PlanForm, path_input: &mut String) {
    egui::Grid::new("plan_details")
        .num_columns(2)
        .spacing([12.0, 6.0])
        .show(ui, |ui| {
            ui.label("Title");
            ui.text_edit_singleline(&mut form.draft.title);
            ui.end_row();

            ui.label("Subtitle");
            ui.text_edit_singleline(&mut form.draft.subtitle);
            ui.end_row();

            ui.label("Description");
            ui.add(egui::TextEdit::multiline(&mut form.draft.description).desired_rows(3));
            ui.end_row();

            ui.label("Accent Color");
            let mut rgb = form.accent_rgb();
            if ui.color_edit_button_srgb(&mut rgb).changed() {
                form.set_accent_rgb(rgb);
            }
            ui.end_row();

            ui.label("Pro");
            ui.checkbox(&mut form.draft.is_pro, "Pro members only");
            ui.end_row();
        });
    image_field(ui, "Background Image URL", &mut form.background, path_input);
}

fn audience(ui: &mut Ui, form: &mut PlanForm) {
    ui.strong("Target Audience");
    let audience = &mut form.draft.target_audience;
    enum_combo(
        ui,
        "audience_level",
        "Experience Level",
        &mut audience.experience_level,
        Difficulty::ALL,
    );
    enum_combo(
        ui,
        "audience_goal",
        "Fitness Goal",
        &mut audience.fitness_goal,
        FitnessGoal::ALL,
    );
    enum_combo(
        ui,
        "audience_equipment",
        "Equipment Needed",
        &mut audience.equipment_needed,
        Equipment::ALL,
    );
    enum_combo(
        ui,
        "audience_activity",
        "Activity Level",
        &mut audience.activity_level,
        ActivityLevel::ALL,
    );
}

fn schedule(ui: &mut Ui, form: &PlanForm, edits: &mut Vec<PlanEdit>) {
    let duration = form.draft.duration;
    ui.horizontal(|ui| {
        ui.strong("Duration");
        let mut weeks = duration.weeks;
        let mut days = duration.days_per_week;
        egui::ComboBox::from_id_salt("plan_weeks")
            .selected_text(format!("{weeks} weeks"))
            .show_ui(ui, |ui| {
                for n in 1..=PlanDuration::MAX_WEEKS {
                    ui.selectable_value(&mut weeks, n, n.to_string());
                }
            });
        egui::ComboBox::from_id_salt("plan_days")
            .selected_text(format!("{days} days per week"))
            .show_ui(ui, |ui| {
                for n in 1..=PlanDuration::MAX_DAYS_PER_WEEK {
                    ui.selectable_value(&mut days, n, n.to_string());
                }
            });
        if weeks != duration.weeks || days != duration.days_per_week {
            edits.push(PlanEdit::Duration { weeks, days });
        }
    });

    for (w, week) in form.draft.weeks.iter().enumerate() {
        egui::CollapsingHeader::new(format!("Week {}", week.week_number))
            .id_salt(("week", w))
            .default_open(w == 0)
            .show(ui, |ui| {
                for (d, day) in week.days.iter().enumerate() {
                    egui::CollapsingHeader::new(format!(
                        "Day {} ({})",
                        day.day_number, day.total_time
                    ))
                    .id_salt(("day", w, d))
                    .show(ui, |ui| day_editor(ui, form, w, d, edits));
                }
            });
    }
}

fn day_editor(ui: &mut Ui, form: &PlanForm, w: usize, d: usize, edits: &mut Vec<PlanEdit>) {
    let Some(day) = form.day(w, d) else {
        return;
    };

    if let Some(part) = multi_select(ui, "Focus Area", &day.focus_area, BodyPart::ALL) {
        edits.push(PlanEdit::ToggleFocus(w, d, part));
    }
    let mut level = day.level;
    if enum_combo(ui, ("day_level", w, d), "Level", &mut level, Difficulty::ALL) {
        edits.push(PlanEdit::Level(w, d, level));
    }

    let candidates = form.candidates(w, d);
    if candidates.is_empty() {
        ui.weak("Choose the equipment needed and a focus area to pick exercises");
    }

    for (s, slot) in day.exercises.iter().enumerate() {
        ui.group(|ui| {
            ui.horizontal(|ui| {
                egui::ComboBox::from_id_salt(("slot_name", w, d, s))
                    .selected_text(if slot.name.is_empty() { "Select exercise" } else { slot.name.as_str() })
                    .width(220.0)
                    .show_ui(ui, |ui| {
                        for candidate in &candidates {
                            if ui
                                .selectable_label(slot.name == candidate.name, &candidate.name)
                                .clicked()
                            {
                                edits.push(PlanEdit::Name(w, d, s, candidate.name.clone()));
                            }
                        }
                    });
                if ui.small_button("Remove").clicked() {
                    edits.push(PlanEdit::RemoveExercise(w, d, s));
                }
            });

            ui.horizontal(|ui| {
                let mut seconds = slot.duration.unwrap_or(0);
                ui.label("Duration");
                if ui
                    .add(egui::DragValue::new(&mut seconds).range(0..=3600).suffix(" s"))
                    .changed()
                {
                    edits.push(PlanEdit::Seconds(w, d, s, Some(seconds)));
                }

                let mut sets = slot.sets;
                ui.label("Sets");
                if ui.add(egui::DragValue::new(&mut sets).range(1..=20)).changed() {
                    edits.push(PlanEdit::Sets(w, d, s, sets));
                }

                let mut reps = slot.reps;
                ui.label("Reps");
                if ui.add(egui::DragValue::new(&mut reps).range(0..=100)).changed() {
                    edits.push(PlanEdit::Reps(w, d, s, reps));
                }
            });

            let mut kind = slot.kind;
            if enum_combo(ui, ("slot_type", w, d, s), "Type", &mut kind, WorkoutType::ALL) {
                edits.push(PlanEdit::Kind(w, d, s, kind));
            }
        });
    }

    if ui.button("+ Add Exercise").clicked() {
        edits.push(PlanEdit::AddExercise(w, d));
    }
}
