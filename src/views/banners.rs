use eframe::egui::{self, RichText, Ui};
use egui_extras::DatePickerButton;
use std::sync::Arc;
use tracing::{info, warn};

use crate::api::Backend;
use crate::config::Settings;
use crate::forms::{BannerForm, EntityForm};
use crate::list::ListController;
use crate::models::Banner;
use crate::upload::UploadedFile;
use crate::views::table::{list_screen, ScreenAction, TableRow};
use crate::views::{image_field, submit_row};

impl TableRow for Banner {
    const TITLE: &'static str = "Banners";
    const COLUMNS: &'static [&'static str] = &["Name", "Image", "Expires"];

    fn cells(&self) -> Vec<RichText> {
        let expires = self
            .expiry_date
            .map(|d| d.format("%b %d, %Y").to_string())
            .unwrap_or_else(|| "-".to_string());
        vec![
            RichText::new(&self.name).strong(),
            RichText::new(&self.image_url).weak(),
            RichText::new(expires),
        ]
    }
}

pub struct BannersScreen {
    pub list: ListController<Banner>,
    form: Option<BannerForm>,
    path_input: String,
}

impl BannersScreen {
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
        match list_screen(ui, &mut self.list, backend.as_ref(), Some("+ Create Banner")) {
            ScreenAction::Add => self.open(None),
            ScreenAction::Edit(banner) => self.open(Some(&banner)),
            ScreenAction::None => {}
        }
        self.show_form(ui.ctx(), backend);
    }

    fn open(&mut self, existing: Option<&Banner>) {
        self.form = Some(BannerForm::new(existing));
        self.path_input.clear();
    }

    fn show_form(&mut self, ctx: &egui::Context, backend: &Arc<dyn Backend>) {
        let Some(form) = self.form.as_mut() else {
            return;
        };

        if form.submitter().poll().is_some() {
            info!("Banner saved");
            self.list.fetch(backend.as_ref());
            self.form = None;
            return;
        }

        let mut open = true;
        let mut submit = false;
        let title = if form.is_edit() { "Edit Banner" } else { "Create Banner" };
        egui::Window::new(title)
            .id(egui::Id::new("banner_form"))
            .open(&mut open)
            .collapsible(false)
            .default_width(460.0)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label("Banner Name");
                    ui.text_edit_singleline(&mut form.name);
                });
                image_field(ui, "Image URL", &mut form.image, &mut self.path_input);

                ui.horizontal(|ui| {
                    ui.label("Expiry Date");
                    let mut date = form
                        .expiry_date
                        .unwrap_or_else(|| chrono::Local::now().date_naive());
                    if ui
                        .add(DatePickerButton::new(&mut date).id_salt("banner_expiry"))
                        .changed()
                    {
                        form.expiry_date = Some(date);
                    }
                    if form.expiry_date.is_none() {
                        ui.weak("not set");
                    }
                });
                ui.add_space(8.0);

                submit = submit_row(ui, form.submit_label(), form.submitter_ref());
            });

        if submit {
            if let Err(e) = form.submit(backend.clone()) {
                warn!("Banner not submitted: {}", e);
            }
        }
        if !open {
            self.form = None;
        }
    }
}
