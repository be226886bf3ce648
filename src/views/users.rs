use eframe::egui::{RichText, Ui};
use std::sync::Arc;

use crate::api::Backend;
use crate::config::Settings;
use crate::list::ListController;
use crate::models::User;
use crate::views::table::{list_screen, TableRow};

impl TableRow for User {
    const TITLE: &'static str = "Users";
    const COLUMNS: &'static [&'static str] = &["Name", "Email", "Gender", "Verified"];
    const EDITABLE: bool = false;

    fn cells(&self) -> Vec<RichText> {
        vec![
            RichText::new(&self.name).strong(),
            RichText::new(&self.email),
            RichText::new(if self.personal_info.gender.is_empty() {
                "N/A"
            } else {
                self.personal_info.gender.as_str()
            }),
            RichText::new(if self.verified { "Yes" } else { "No" }),
        ]
    }
}

pub struct UsersScreen {
    pub list: ListController<User>,
}

impl UsersScreen {
    pub fn new(settings: &Settings) -> Self {
        Self {
            list: ListController::new(&settings.list),
        }
    }

    pub fn show(&mut self, ui: &mut Ui, backend: &Arc<dyn Backend>) {
        // no add/edit for users; the action is always None
        list_screen(ui, &mut self.list, backend.as_ref(), None);
    }
}
