use eframe::{egui, App, CreationContext, Frame};
use egui_aesthetix::Aesthetix;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::debug;

use crate::api::{Backend, HttpBackend};
use crate::config::Settings;
use crate::views::banners::BannersScreen;
use crate::views::exercises::ExercisesScreen;
use crate::views::plans::PlansScreen;
use crate::views::shell::{self, HeaderState, Route};
use crate::views::users::UsersScreen;
use crate::views::dropped_uploads;

/// Keeps debounced searches and background submissions moving while idle.
const TICK: Duration = Duration::from_millis(100);

pub struct AdminApp {
    backend: Arc<dyn Backend>,
    route: Route,
    /// Route whose list was last loaded; a change triggers a fetch
    loaded: Option<Route>,
    header: HeaderState,
    exercises: ExercisesScreen,
    plans: PlansScreen,
    banners: BannersScreen,
    users: UsersScreen,
}

impl AdminApp {
    pub fn new(cc: &CreationContext, settings: Settings) -> Self {
        cc.egui_ctx
            .set_style(egui_aesthetix::themes::NordDark.custom_style());

        let backend: Arc<dyn Backend> = Arc::new(HttpBackend::new(&settings.api));
        Self::with_backend(backend, &settings)
    }

    fn with_backend(backend: Arc<dyn Backend>, settings: &Settings) -> Self {
        Self {
            backend,
            route: Route::default(),
            loaded: None,
            header: HeaderState::default(),
            exercises: ExercisesScreen::new(settings),
            plans: PlansScreen::new(settings),
            banners: BannersScreen::new(settings),
            users: UsersScreen::new(settings),
        }
    }

    fn enter_route(&mut self) {
        if self.loaded == Some(self.route) {
            return;
        }
        debug!("Entering {}", self.route.path());
        let backend = self.backend.as_ref();
        match self.route {
            Route::Exercises => self.exercises.list.fetch(backend),
            Route::Plans => self.plans.list.fetch(backend),
            Route::Banners => self.banners.list.fetch(backend),
            Route::Users => self.users.list.fetch(backend),
        }
        self.loaded = Some(self.route);
    }

    fn poll_search(&mut self) {
        let backend = self.backend.as_ref();
        let now = Instant::now();
        match self.route {
            Route::Exercises => self.exercises.list.poll(backend, now),
            Route::Plans => self.plans.list.poll(backend, now),
            Route::Banners => self.banners.list.poll(backend, now),
            Route::Users => self.users.list.poll(backend, now),
        };
    }
}

impl App for AdminApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        if let Some(route) = shell::sidebar(ctx, self.route) {
            self.route = route;
        }
        shell::top_bar(ctx, &mut self.header);

        self.enter_route();
        self.poll_search();

        for file in dropped_uploads(ctx) {
            debug!("Dropped {} ({} bytes)", file.name, file.bytes.len());
            match self.route {
                Route::Exercises => self.exercises.attach(file),
                Route::Plans => self.plans.attach(file),
                Route::Banners => self.banners.attach(file),
                Route::Users => {}
            }
        }

        egui::CentralPanel::default().show(ctx, |ui| match self.route {
            Route::Exercises => self.exercises.show(ui, &self.backend),
            Route::Plans => self.plans.show(ui, &self.backend),
            Route::Banners => self.banners.show(ui, &self.backend),
            Route::Users => self.users.show(ui, &self.backend),
        });

        ctx.request_repaint_after(TICK);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::MockBackend;
    use crate::api::Method;
    use serde_json::json;

    fn app(backend: Arc<MockBackend>) -> AdminApp {
        AdminApp::with_backend(backend, &Settings::default())
    }

    #[test]
    fn test_entering_a_route_fetches_once() {
        let backend = Arc::new(MockBackend::with_list(json!([])));
        let mut app = app(backend.clone());

        app.enter_route();
        app.enter_route();

        let calls = backend.calls_with(Method::Get);
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].path, "exercises");
    }

    #[test]
    fn test_switching_routes_fetches_new_list() {
        let backend = Arc::new(MockBackend::with_list(json!({"users": [], "total": 0})));
        let mut app = app(backend.clone());

        app.enter_route();
        app.route = Route::Users;
        app.enter_route();

        let paths: Vec<_> = backend
            .calls_with(Method::Get)
            .into_iter()
            .map(|call| call.path)
            .collect();
        assert_eq!(paths, vec!["exercises", "users"]);
    }
}
