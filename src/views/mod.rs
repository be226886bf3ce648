//! egui screens and the widgets they share

pub mod banners;
pub mod exercises;
pub mod plans;
pub mod shell;
pub mod table;
pub mod users;

use eframe::egui::{self, Color32, RichText, Ui};
use std::fmt::Display;
use std::hash::Hash;
use std::path::Path;
use tracing::warn;

use crate::submit::{SubmitState, Submitter};
use crate::upload::{ImageField, UploadedFile};

pub const ACCENT: Color32 = Color32::from_rgb(253, 99, 0);

/// Files dropped onto the window this frame.
pub fn dropped_uploads(ctx: &egui::Context) -> Vec<UploadedFile> {
    ctx.input(|i| i.raw.dropped_files.clone())
        .into_iter()
        .filter_map(|file| {
            if let Some(bytes) = file.bytes {
                return Some(UploadedFile::new(file.name, bytes.to_vec()));
            }
            let path = file.path?;
            UploadedFile::from_path(&path)
                .inspect_err(|e| warn!("Could not read dropped file {:?}: {}", path, e))
                .ok()
        })
        .collect()
}

pub fn error_banner(ui: &mut Ui, message: &str) -> bool {
    let mut dismissed = false;
    ui.horizontal(|ui| {
        ui.label(RichText::new(message).color(Color32::LIGHT_RED).strong());
        if ui.small_button("✖").clicked() {
            dismissed = true;
        }
    });
    dismissed
}

/// Single choice from a closed set; returns true when the value changed.
pub fn enum_combo<T: Copy + PartialEq + Display>(
    ui: &mut Ui,
    id_salt: impl Hash,
    label: &str,
    value: &mut Option<T>,
    options: &[T],
) -> bool {
    let mut changed = false;
    ui.horizontal(|ui| {
        ui.label(label);
        egui::ComboBox::from_id_salt(id_salt)
            .selected_text(value.map(|v| v.to_string()).unwrap_or_default())
            .width(220.0)
            .show_ui(ui, |ui| {
                for option in options {
                    if ui
                        .selectable_label(*value == Some(*option), option.to_string())
                        .clicked()
                    {
                        *value = Some(*option);
                        changed = true;
                    }
                }
            });
    });
    changed
}

/// Checkbox per option; returns the option the user toggled, if any.
pub fn multi_select<T: Copy + PartialEq + Display>(
    ui: &mut Ui,
    label: &str,
    selected: &[T],
    options: &[T],
) -> Option<T> {
    let mut toggled = None;
    ui.label(label);
    ui.horizontal_wrapped(|ui| {
        for option in options {
            let mut checked = selected.contains(option);
            if ui.checkbox(&mut checked, option.to_string()).changed() {
                toggled = Some(*option);
            }
        }
    });
    toggled
}

/// URL input plus a file picked by path or dropped on the window.
pub fn image_field(ui: &mut Ui, label: &str, field: &mut ImageField, path_input: &mut String) {
    ui.horizontal(|ui| {
        ui.label(label);
        ui.text_edit_singleline(&mut field.url);
    });
    ui.horizontal(|ui| {
        ui.add(egui::TextEdit::singleline(path_input).hint_text("Path to an image file"));
        if ui.button("Attach").clicked() && !path_input.trim().is_empty() {
            match UploadedFile::from_path(Path::new(path_input.trim())) {
                Ok(file) => field.file = Some(file),
                Err(e) => warn!("Could not attach {:?}: {}", path_input, e),
            }
        }
    });
    match &field.file {
        Some(file) => {
            let mut clear = false;
            ui.horizontal(|ui| {
                ui.label(format!("Selected file: {} ({} KB)", file.name, file.bytes.len() / 1024));
                clear = ui.small_button("Remove").clicked();
            });
            if clear {
                field.file = None;
            }
        }
        None => {
            ui.weak("Drag 'n' drop an image onto the window, or attach one by path");
        }
    }
}

/// Submit button plus in-flight and failure feedback. True when clicked.
pub fn submit_row(ui: &mut Ui, label: &str, submitter: &Submitter) -> bool {
    let mut clicked = false;
    ui.horizontal(|ui| {
        let button = egui::Button::new(RichText::new(label).color(Color32::WHITE)).fill(ACCENT);
        clicked = ui.add_enabled(!submitter.is_submitting(), button).clicked();
        if submitter.is_submitting() {
            ui.spinner();
        }
    });
    if let SubmitState::Failed(message) = submitter.state() {
        ui.label(RichText::new(message).color(Color32::LIGHT_RED));
    }
    clicked
}
