//! Global Application State
//!
//! Reactive state management using Leptos signals.

use leptos::*;
use tiketin::{ApiError, NotificationPreferences};

use crate::api;

/// Global application state provided to all components
#[derive(Clone)]
pub struct GlobalState {
    /// Whether a token is stored; drives the navigation links
    pub signed_in: RwSignal<bool>,
    /// Notification preferences committed by the last save in this session
    pub notification_prefs: RwSignal<NotificationPreferences>,
    /// Global loading state
    pub loading: RwSignal<bool>,
    /// Error message to display
    pub error: RwSignal<Option<String>>,
    /// Success message (for toasts)
    pub success: RwSignal<Option<String>>,
}

/// Provide global state to the component tree
pub fn provide_global_state() {
    let state = GlobalState {
        signed_in: create_rw_signal(api::auth().is_signed_in()),
        notification_prefs: create_rw_signal(NotificationPreferences::default()),
        loading: create_rw_signal(false),
        error: create_rw_signal(None),
        success: create_rw_signal(None),
    };

    provide_context(state);
}

impl GlobalState {
    /// Show a success message (auto-clears after timeout)
    pub fn show_success(&self, message: &str) {
        self.success.set(Some(message.to_string()));

        let success_signal = self.success;
        gloo_timers::callback::Timeout::new(3000, move || {
            success_signal.set(None);
        })
        .forget();
    }

    /// Show an error message (auto-clears after timeout)
    pub fn show_error(&self, message: &str) {
        self.error.set(Some(message.to_string()));

        let error_signal = self.error;
        gloo_timers::callback::Timeout::new(5000, move || {
            error_signal.set(None);
        })
        .forget();
    }

    /// Log an API failure to the console and toast its message
    pub fn report(&self, context: &str, error: &ApiError) {
        web_sys::console::error_1(&format!("{}: {}", context, error).into());
        self.show_error(error.message());
    }

    /// Re-read the token store after login or logout
    pub fn refresh_session(&self) {
        self.signed_in.set(api::auth().is_signed_in());
    }

    /// Clear error message
    pub fn clear_error(&self) {
        self.error.set(None);
    }
}
