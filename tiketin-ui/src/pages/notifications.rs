//! Notification Settings Page
//!
//! Edits a copy of the session's notification preferences. Saving waits
//! [`SAVE_DELAY_MS`], commits the copy to global state, alerts once and goes
//! back one page. Nothing is sent to the server.

use gloo_timers::future::TimeoutFuture;
use leptos::*;
use tiketin::{Channel, ChannelGroup, NotificationPanel, SaveHost, SAVE_DELAY_MS};

use crate::components::{InlineLoading, Toggle};
use crate::state::GlobalState;

/// Save side effects in the browser: `alert()` and `history.back()`
struct BrowserHost;

impl SaveHost for BrowserHost {
    fn confirm(&mut self, message: &str) {
        if let Some(window) = web_sys::window() {
            let _ = window.alert_with_message(message);
        }
    }

    fn navigate_back(&mut self) {
        go_back();
    }
}

fn go_back() {
    if let Some(history) = web_sys::window().and_then(|w| w.history().ok()) {
        let _ = history.back();
    }
}

/// Notification settings page component
#[component]
pub fn NotificationSettings() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let committed = state.notification_prefs;

    let panel = create_rw_signal(NotificationPanel::new(committed.get_untracked()));
    let saving = Signal::derive(move || panel.with(NotificationPanel::is_saving));

    let state_for_toggle = state.clone();
    let toggle = move |channel: Channel| {
        if let Some(Err(e)) = panel.try_update(|p| p.toggle(channel)) {
            state_for_toggle.show_error(&e.to_string());
        }
    };

    let save = move |_| {
        match panel.try_update(NotificationPanel::begin_save) {
            Some(Ok(())) => {}
            Some(Err(e)) => {
                state.show_error(&e.to_string());
                return;
            }
            None => return,
        }

        spawn_local(async move {
            TimeoutFuture::new(SAVE_DELAY_MS).await;

            let mut host = BrowserHost;
            let finished = panel.try_update(|p| p.finish_save(&mut host)).flatten();
            if let Some(preferences) = finished {
                committed.set(preferences);
            }
        });
    };

    view! {
        <div class="container mx-auto px-4 py-10 max-w-2xl">
            <div class="flex items-center justify-between mb-6">
                <div>
                    <h1 class="text-2xl font-bold">"Notification Settings"</h1>
                    <p class="text-slate-500 text-sm mt-1">"Choose what we tell you about"</p>
                </div>
                <button
                    on:click=move |_| go_back()
                    class="px-4 py-2 bg-white border rounded-lg hover:bg-slate-50 text-sm"
                >
                    "Back"
                </button>
            </div>

            <div class="space-y-6">
                {ChannelGroup::ALL.into_iter().map(|group| {
                    let toggle = toggle.clone();
                    view! {
                        <section class="bg-white rounded-3xl shadow p-6">
                            <h4 class="font-semibold mb-4">{group.title()}</h4>
                            <div class="divide-y">
                                {group.channels().into_iter().map(|channel| {
                                    let toggle = toggle.clone();
                                    view! {
                                        <div class="flex items-center justify-between py-3">
                                            <div>
                                                <div class="font-medium">{channel.title()}</div>
                                                <div class="text-sm text-slate-500">{channel.description()}</div>
                                            </div>
                                            <Toggle
                                                checked=Signal::derive(move || panel.with(|p| p.is_enabled(channel)))
                                                locked=channel.is_locked()
                                                on_toggle=move |_| toggle(channel)
                                            />
                                        </div>
                                    }
                                }).collect_view()}
                            </div>
                        </section>
                    }
                }).collect_view()}
            </div>

            <div class="mt-8 flex justify-end">
                <button
                    on:click=save
                    disabled=move || saving.get()
                    class="px-6 py-3 bg-blue-600 hover:bg-blue-700 disabled:bg-slate-400 text-white rounded-lg font-semibold transition-colors"
                >
                    {move || if saving.get() {
                        view! { <InlineLoading /> " Saving..." }.into_view()
                    } else {
                        "Save Settings".into_view()
                    }}
                </button>
            </div>
        </div>
    }
}
