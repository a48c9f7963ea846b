//! Login Page

use leptos::*;
use leptos_router::*;
use tiketin::Credentials;

use crate::api;
use crate::components::InlineLoading;
use crate::state::GlobalState;

/// Login form; organizers land on the dashboard, everyone else on the catalog
#[component]
pub fn Login() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let navigate = use_navigate();

    let (identifier, set_identifier) = create_signal(String::new());
    let (password, set_password) = create_signal(String::new());
    let (submitting, set_submitting) = create_signal(false);

    let submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        let credentials = Credentials {
            identifier: identifier.get_untracked().trim().to_string(),
            password: password.get_untracked(),
        };
        if credentials.identifier.is_empty() || credentials.password.is_empty() {
            state.show_error("Email/username and password are required");
            return;
        }

        set_submitting.set(true);
        let state = state.clone();
        let navigate = navigate.clone();
        spawn_local(async move {
            match api::api().login(&credentials).await {
                Ok(response) => {
                    state.refresh_session();
                    state.show_success(&format!(
                        "Welcome, {}!",
                        response.name.as_deref().unwrap_or(&credentials.identifier)
                    ));
                    navigate(landing_path(response.role.as_deref()), Default::default());
                }
                Err(e) => state.report("Login failed", &e),
            }
            set_submitting.set(false);
        });
    };

    view! {
        <div class="min-h-[70vh] flex items-center justify-center px-4">
            <form on:submit=submit class="w-full max-w-md bg-white rounded-3xl shadow p-8 space-y-5">
                <div class="text-center">
                    <h1 class="text-2xl font-bold">"Welcome back"</h1>
                    <p class="text-slate-500 text-sm mt-1">"Log in to book tickets and manage events"</p>
                </div>

                <div>
                    <label class="block text-sm text-slate-600 mb-1">"Email or username"</label>
                    <input
                        type="text"
                        autocomplete="username"
                        prop:value=move || identifier.get()
                        on:input=move |ev| set_identifier.set(event_target_value(&ev))
                        class="w-full border rounded-lg px-4 py-3 focus:outline-none focus:ring-2 focus:ring-blue-400"
                    />
                </div>

                <div>
                    <label class="block text-sm text-slate-600 mb-1">"Password"</label>
                    <input
                        type="password"
                        autocomplete="current-password"
                        prop:value=move || password.get()
                        on:input=move |ev| set_password.set(event_target_value(&ev))
                        class="w-full border rounded-lg px-4 py-3 focus:outline-none focus:ring-2 focus:ring-blue-400"
                    />
                </div>

                <button
                    type="submit"
                    disabled=move || submitting.get()
                    class="w-full py-3 bg-blue-600 hover:bg-blue-700 disabled:bg-slate-400 text-white rounded-lg font-semibold transition-colors"
                >
                    {move || if submitting.get() {
                        view! { <InlineLoading /> " Logging in..." }.into_view()
                    } else {
                        "Log In".into_view()
                    }}
                </button>

                <p class="text-center text-sm text-slate-500">
                    "No account yet? "
                    <A href="/register" class="text-blue-600 hover:underline">"Register"</A>
                </p>
            </form>
        </div>
    }
}

/// Where to go after a successful login
fn landing_path(role: Option<&str>) -> &'static str {
    match role {
        Some(role) if role.eq_ignore_ascii_case("admin") => "/organizer/dashboard",
        _ => "/",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_landing_path() {
        assert_eq!(landing_path(Some("admin")), "/organizer/dashboard");
        assert_eq!(landing_path(Some("user")), "/");
        assert_eq!(landing_path(None), "/");
    }
}
