use eframe::egui::{self, RichText, Ui};
use std::sync::Arc;
use tracing::{info, warn};

use crate::api::Backend;
use crate::config::Settings;
use crate::forms::{EntityForm, ExerciseForm};
use crate::list::ListController;
use crate::models::{BodyPart, Difficulty, Equipment, Exercise, Target};
use crate::upload::UploadedFile;
use crate::views::table::{list_screen, ScreenAction, TableRow};
use crate::views::{enum_combo, image_field, multi_select, submit_row};

impl TableRow for Exercise {
    const TITLE: &'static str = "Exercises";
    const COLUMNS: &'static [&'static str] =
        &["Name", "Body Part", "Equipment", "Target", "Difficulty", "Status"];

    fn cells(&self) -> Vec<RichText> {
        let label = |v: Option<&'static str>| RichText::new(v.unwrap_or("-"));
        vec![
            RichText::new(&self.name).strong(),
            label(self.body_part.map(|v| v.as_str())),
            label(self.equipment.map(|v| v.as_str())),
            label(self.target.map(|v| v.as_str())),
            label(self.difficulty.map(|v| v.as_str())),
            if self.is_banned {
                RichText::new("Banned").color(egui::Color32::LIGHT_RED)
            } else {
                RichText::new("Active")
            },
        ]
    }
}

pub struct ExercisesScreen {
    pub list: ListController<Exercise>,
    form: Option<ExerciseForm>,
    path_input: String,
}

impl ExercisesScreen {
    pub fn new(settings: &Settings) -> Self {
        Self {
            list: ListController::new(&settings.list),
            form: None,
            path_input: String::new(),
        }
    }

    pub fn attach(&mut self, file: UploadedFile) {
        if let Some(form) = self.form.as_mut() {
            form.image.file = Some(file);
        }
    }

    pub fn show(&mut self, ui: &mut Ui, backend: &Arc<dyn Backend>) {
        match list_screen(ui, &mut self.list, backend.as_ref(), Some("+ Add Exercise")) {
            ScreenAction::Add => self.open(None),
            ScreenAction::Edit(exercise) => self.open(Some(&exercise)),
            ScreenAction::None => {}
        }
        self.show_form(ui.ctx(), backend);
    }

    fn open(&mut self, existing: Option<&Exercise>) {
        self.form = Some(ExerciseForm::new(existing));
        self.path_input.clear();
    }

    fn show_form(&mut self, ctx: &egui::Context, backend: &Arc<dyn Backend>) {
        let Some(form) = self.form.as_mut() else {
            return;
        };

        if form.submitter().poll().is_some() {
            info!("Exercise saved");
            self.list.fetch(backend.as_ref());
            self.form = None;
            return;
        }

        let mut open = true;
        let mut submit = false;
        let title = if form.is_edit() { "Edit Exercise" } else { "Add Exercise" };
        egui::Window::new(title)
            .id(egui::Id::new("exercise_form"))
            .open(&mut open)
            .collapsible(false)
            .default_width(520.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().max_height(640.0).show(ui, |ui| {
                    ui.horizontal(|ui| {
                        ui.label("Name");
                        ui.text_edit_singleline(&mut form.draft.name);
                    });
                    enum_combo(ui, "exercise_body_part", "Body Part", &mut form.draft.body_part, BodyPart::ALL);
                    enum_combo(ui, "exercise_equipment", "Equipment", &mut form.draft.equipment, Equipment::ALL);
                    enum_combo(ui, "exercise_target", "Target", &mut form.draft.target, Target::ALL);
                    enum_combo(
                        ui,
                        "exercise_difficulty",
                        "Difficulty",
                        &mut form.draft.difficulty,
                        Difficulty::ALL,
                    );
                    ui.separator();

                    if let Some(muscle) = multi_select(
                        ui,
                        "Secondary Muscles",
                        &form.draft.secondary_muscles,
                        Target::ALL,
                    ) {
                        form.toggle_secondary_muscle(muscle);
                    }
                    ui.separator();

                    ui.label("Instructions");
                    ui.add(
                        egui::TextEdit::multiline(&mut form.draft.instructions)
                            .desired_rows(4)
                            .desired_width(f32::INFINITY),
                    );
                    image_field(ui, "GIF URL", &mut form.image, &mut self.path_input);
                    ui.checkbox(&mut form.draft.is_banned, "Banned");
                    ui.add_space(8.0);

                    submit = submit_row(ui, form.submit_label(), form.submitter_ref());
                });
            });

        if submit {
            if let Err(e) = form.submit(backend.clone()) {
                warn!("Exercise not submitted: {}", e);
            }
        }
        if !open {
            self.form = None;
        }
    }
}
