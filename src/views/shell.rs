//! Navigation chrome: sidebar, top bar and the routes they point at

use eframe::egui::{self, Align, Color32, Layout, RichText, Stroke, Vec2};

use crate::views::ACCENT;

const SIDEBAR_WIDTH: f32 = 340.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Route {
    #[default]
    Exercises,
    Plans,
    Banners,
    Users,
}

impl Route {
    pub const ALL: [Route; 4] = [Route::Exercises, Route::Plans, Route::Banners, Route::Users];

    pub fn path(&self) -> &'static str {
        match self {
            Route::Exercises => "/exercises",
            Route::Plans => "/plans",
            Route::Banners => "/banner",
            Route::Users => "/users",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Route::Exercises => "Exercises",
            Route::Plans => "Plans",
            Route::Banners => "Banners",
            Route::Users => "Users",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Route::Exercises => "🏋",
            Route::Plans => "📅",
            Route::Banners => "🖼",
            Route::Users => "👥",
        }
    }

    #[cfg(test)]
    pub fn from_path(path: &str) -> Option<Route> {
        Route::ALL.into_iter().find(|route| route.path() == path)
    }

    /// Exact match only: `/plans/new` does not light up `/plans`.
    pub fn is_active(&self, current_path: &str) -> bool {
        self.path() == current_path
    }
}

/// Decorative top bar state. Nothing here talks to the backend.
#[derive(Debug, Default)]
pub struct HeaderState {
    search_open: bool,
    search_text: String,
}

/// Fixed-width navigation list. Returns the route the user clicked.
pub fn sidebar(ctx: &egui::Context, current: Route) -> Option<Route> {
    let mut picked = None;
    egui::SidePanel::left("sidebar")
        .exact_width(SIDEBAR_WIDTH)
        .resizable(false)
        .show(ctx, |ui| {
            ui.add_space(16.0);
            ui.heading(RichText::new("Fitness Admin").color(ACCENT).strong());
            ui.add_space(24.0);

            for route in Route::ALL {
                let active = route.is_active(current.path());
                let text = RichText::new(format!("{}  {}", route.icon(), route.label())).size(18.0);
                let text = if active { text.color(ACCENT).strong() } else { text };
                let button = egui::Button::new(text)
                    .frame(active)
                    .min_size(Vec2::new(ui.available_width(), 40.0));
                if ui.add(button).clicked() && !active {
                    picked = Some(route);
                }
                ui.add_space(4.0);
            }
        });
    picked
}

pub fn top_bar(ctx: &egui::Context, header: &mut HeaderState) {
    egui::TopBottomPanel::top("top_bar")
        .exact_height(56.0)
        .show(ctx, |ui| {
            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                avatar(ui);
                ui.add_space(12.0);
                notification_badge(ui, 3);
                ui.add_space(12.0);

                if ui.button("🔍").clicked() {
                    header.search_open = !header.search_open;
                }
                if header.search_open {
                    ui.add(
                        egui::TextEdit::singleline(&mut header.search_text)
                            .hint_text("Search...")
                            .desired_width(240.0),
                    );
                }
            });
        });
}

fn notification_badge(ui: &mut egui::Ui, count: u32) {
    let (rect, _) = ui.allocate_exact_size(Vec2::splat(28.0), egui::Sense::hover());
    let painter = ui.painter();
    painter.text(
        rect.center(),
        egui::Align2::CENTER_CENTER,
        "🔔",
        egui::FontId::proportional(18.0),
        ui.visuals().text_color(),
    );
    let dot = rect.right_top() + Vec2::new(-4.0, 4.0);
    painter.circle_filled(dot, 8.0, Color32::RED);
    painter.text(
        dot,
        egui::Align2::CENTER_CENTER,
        count.to_string(),
        egui::FontId::proportional(10.0),
        Color32::WHITE,
    );
}

fn avatar(ui: &mut egui::Ui) {
    let (rect, _) = ui.allocate_exact_size(Vec2::splat(36.0), egui::Sense::hover());
    let painter = ui.painter();
    painter.circle(rect.center(), 18.0, ACCENT, Stroke::new(1.0, Color32::WHITE));
    painter.text(
        rect.center(),
        egui::Align2::CENTER_CENTER,
        "A",
        egui::FontId::proportional(16.0),
        Color32::WHITE,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_routes_round_trip_through_paths() {
        for route in Route::ALL {
            assert_eq!(Route::from_path(route.path()), Some(route));
        }
        assert_eq!(Route::from_path("/banners"), None);
    }

    #[test]
    fn test_active_route_needs_exact_path() {
        assert!(Route::Plans.is_active("/plans"));
        assert!(!Route::Plans.is_active("/plans/new"));
        assert!(!Route::Plans.is_active("/"));
        assert!(Route::Banners.is_active("/banner"));
    }

    #[test]
    fn test_default_route_is_exercises() {
        assert_eq!(Route::default(), Route::Exercises);
    }
}
