//! Shared list screen: toolbar, selectable table, pagination, delete prompt

use eframe::egui::{self, Align2, RichText, Ui};
use egui_extras::{Column, TableBuilder};
use std::time::Instant;

use crate::api::{Backend, Resource, SortOrder};
use crate::list::{HeaderCheck, ListController, PAGE_SIZES};
use crate::views::{error_banner, ACCENT};

/// How an entity shows up as a table row.
pub trait TableRow: Resource {
    const TITLE: &'static str;
    const COLUMNS: &'static [&'static str];
    /// Users can only be deleted from this dashboard
    const EDITABLE: bool = true;

    fn cells(&self) -> Vec<RichText>;
}

/// What the surrounding screen should do after this frame.
pub enum ScreenAction<R> {
    None,
    Add,
    Edit(R),
}

enum RowAction {
    SelectAll(bool),
    Toggle(String),
    Edit(usize),
    Delete(String),
}

pub fn list_screen<R: TableRow>(
    ui: &mut Ui,
    list: &mut ListController<R>,
    backend: &dyn Backend,
    add_label: Option<&str>,
) -> ScreenAction<R> {
    let mut action = ScreenAction::None;

    ui.horizontal(|ui| {
        ui.heading(R::TITLE);
        if let Some(label) = add_label {
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let button = egui::Button::new(RichText::new(label).color(egui::Color32::WHITE))
                    .fill(ACCENT);
                if ui.add(button).clicked() {
                    action = ScreenAction::Add;
                }
            });
        }
    });
    ui.add_space(8.0);

    if let Some(message) = list.last_error().map(str::to_string) {
        if error_banner(ui, &message) {
            list.dismiss_error();
        }
    }

    toolbar(ui, list, backend);
    ui.separator();

    let mut row_actions = Vec::new();
    table(ui, list, &mut row_actions);
    for row_action in row_actions {
        match row_action {
            RowAction::SelectAll(checked) => list.toggle_select_all(checked),
            RowAction::Toggle(id) => list.toggle_select(&id),
            RowAction::Edit(idx) => {
                if let Some(item) = list.items().get(idx) {
                    action = ScreenAction::Edit(item.clone());
                }
            }
            RowAction::Delete(id) => list.request_delete(&id),
        }
    }

    ui.separator();
    pagination(ui, list, backend);
    confirm_dialog(ui.ctx(), list, backend);

    action
}

fn toolbar<R: TableRow>(ui: &mut Ui, list: &mut ListController<R>, backend: &dyn Backend) {
    ui.horizontal(|ui| {
        if !list.selected().is_empty() {
            ui.label(format!("{} selected", list.selected().len()));
            if ui.button("🗑 Delete").clicked() {
                list.request_delete_selected();
            }
            return;
        }

        let mut term = list.search_term().to_string();
        let search = egui::TextEdit::singleline(&mut term)
            .hint_text(format!("Search {}...", R::NOUN))
            .desired_width(280.0);
        if ui.add(search).changed() {
            list.set_search_term(term, Instant::now());
        }
        if list.search_pending() {
            ui.spinner();
        }

        ui.menu_button(format!("⏷ {}", list.sort_order().label()), |ui| {
            for sort in SortOrder::ALL {
                if ui
                    .selectable_label(list.sort_order() == sort, sort.label())
                    .clicked()
                {
                    list.set_sort_order(sort, backend);
                    ui.close_menu();
                }
            }
        });
    });
}

fn table<R: TableRow>(ui: &mut Ui, list: &ListController<R>, actions: &mut Vec<RowAction>) {
    let header_state = list.header_check();

    TableBuilder::new(ui)
        .id_salt(R::PATH)
        .striped(true)
        .resizable(false)
        .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
        .column(Column::exact(28.0))
        .columns(Column::auto().at_least(120.0), R::COLUMNS.len())
        .column(Column::remainder())
        .header(24.0, |mut header| {
            header.col(|ui| {
                let mut all = header_state == HeaderCheck::Checked;
                let checkbox = egui::Checkbox::new(&mut all, "")
                    .indeterminate(header_state == HeaderCheck::Indeterminate);
                if ui.add(checkbox).changed() {
                    actions.push(RowAction::SelectAll(all));
                }
            });
            for column in R::COLUMNS {
                header.col(|ui| {
                    ui.strong(*column);
                });
            }
            header.col(|ui| {
                ui.strong("Actions");
            });
        })
        .body(|mut body| {
            for (idx, item) in list.items().iter().enumerate() {
                body.row(30.0, |mut row| {
                    row.col(|ui| {
                        let mut checked = list.is_selected(item.id());
                        if ui.checkbox(&mut checked, "").changed() {
                            actions.push(RowAction::Toggle(item.id().to_string()));
                        }
                    });
                    for cell in item.cells() {
                        row.col(|ui| {
                            ui.label(cell);
                        });
                    }
                    row.col(|ui| {
                        ui.menu_button("⋮", |ui| {
                            if R::EDITABLE && ui.button("Edit").clicked() {
                                actions.push(RowAction::Edit(idx));
                                ui.close_menu();
                            }
                            if ui.button("Delete").clicked() {
                                actions.push(RowAction::Delete(item.id().to_string()));
                                ui.close_menu();
                            }
                        });
                    });
                });
            }
        });
}

fn pagination<R: TableRow>(ui: &mut Ui, list: &mut ListController<R>, backend: &dyn Backend) {
    ui.horizontal(|ui| {
        ui.label("Rows per page:");
        let mut page_size = list.page_size();
        egui::ComboBox::from_id_salt((R::PATH, "page_size"))
            .selected_text(page_size.to_string())
            .width(60.0)
            .show_ui(ui, |ui| {
                for size in PAGE_SIZES {
                    ui.selectable_value(&mut page_size, size, size.to_string());
                }
            });
        if page_size != list.page_size() {
            list.set_page_size(page_size, backend);
        }

        let first = list.page() * list.page_size();
        let shown = if list.total() == 0 {
            "0 of 0".to_string()
        } else {
            let last = (first + list.items().len()).min(list.total());
            format!("{}–{} of {}", first + 1, last, list.total())
        };
        ui.label(shown);

        if ui.add_enabled(list.page() > 0, egui::Button::new("‹")).clicked() {
            list.set_page(list.page() - 1, backend);
        }
        if ui
            .add_enabled(list.page() + 1 < list.page_count(), egui::Button::new("›"))
            .clicked()
        {
            list.set_page(list.page() + 1, backend);
        }
    });
}

fn confirm_dialog<R: TableRow>(
    ctx: &egui::Context,
    list: &mut ListController<R>,
    backend: &dyn Backend,
) {
    let Some(prompt) = list.pending_delete().map(|p| p.prompt(R::NOUN)) else {
        return;
    };

    let mut confirmed = false;
    let mut cancelled = false;
    egui::Window::new("Confirm delete")
        .id(egui::Id::new((R::PATH, "confirm")))
        .collapsible(false)
        .resizable(false)
        .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.label(prompt);
            ui.add_space(8.0);
            ui.horizontal(|ui| {
                confirmed = ui.button("Delete").clicked();
                cancelled = ui.button("Cancel").clicked();
            });
        });

    if confirmed {
        list.confirm_delete(backend);
    } else if cancelled {
        list.cancel_delete();
    }
}
