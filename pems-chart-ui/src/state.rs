//! Application state managed via Dioxus context.
//!
//! `AppState` bundles the reactive signals into a single struct provided via
//! `use_context_provider`. Child components retrieve it with
//! `use_context::<AppState>()` and route every selection change through
//! [`AppState::apply`].

use pems_db::models::DashboardView;
use pems_db::Session;
use dioxus::prelude::*;

/// Shared state of one dashboard page.
#[derive(Clone, Copy)]
pub struct AppState {
    /// This page's session (None until the fixtures are loaded)
    pub session: Signal<Option<Session>>,
    /// Result of the latest recomputation
    pub view: Signal<Option<DashboardView>>,
    /// Whether the app is still loading
    pub loading: Signal<bool>,
    /// Error message if something went wrong
    pub error_msg: Signal<Option<String>>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            session: Signal::new(None),
            view: Signal::new(None),
            loading: Signal::new(true),
            error_msg: Signal::new(None),
        }
    }

    /// Install a freshly opened session and its first view.
    pub fn start(&mut self, session: Session) {
        match session.view() {
            Ok(view) => {
                self.view.set(Some(view));
                self.session.set(Some(session));
            }
            Err(e) => {
                log::error!("[QPeMS] state: initial view failed: {}", e);
                self.error_msg.set(Some(format!("Failed to compute flow profile: {}", e)));
            }
        }
        self.loading.set(false);
    }

    /// Apply one selection change to the session and publish the new view.
    ///
    /// A rejected change leaves both the session and the current view as
    /// they were and surfaces the error.
    pub fn apply(&mut self, change: impl FnOnce(&mut Session) -> anyhow::Result<DashboardView>) {
        let result = {
            let mut session = self.session.write();
            match session.as_mut() {
                Some(session) => change(session),
                None => {
                    log::warn!("[QPeMS] state: selection change before session opened");
                    return;
                }
            }
        };
        match result {
            Ok(view) => {
                self.error_msg.set(None);
                self.view.set(Some(view));
            }
            Err(e) => {
                log::warn!("[QPeMS] state: selection rejected: {}", e);
                self.error_msg.set(Some(e.to_string()));
            }
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
