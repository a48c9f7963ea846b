//! Register Page

use leptos::*;
use leptos_router::*;
use tiketin::{Registration, Role};

use crate::api;
use crate::components::InlineLoading;
use crate::state::GlobalState;

/// Account creation form for attendees and organizers
#[component]
pub fn Register() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let navigate = use_navigate();

    let (name, set_name) = create_signal(String::new());
    let (email, set_email) = create_signal(String::new());
    let (password, set_password) = create_signal(String::new());
    let (role, set_role) = create_signal(Role::User);
    let (submitting, set_submitting) = create_signal(false);

    let submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        let registration = Registration {
            name: name.get_untracked().trim().to_string(),
            email: email.get_untracked().trim().to_string(),
            password: password.get_untracked(),
            role: role.get_untracked(),
        };
        if registration.name.is_empty()
            || registration.email.is_empty()
            || registration.password.is_empty()
        {
            state.show_error("Please fill in every field");
            return;
        }

        set_submitting.set(true);
        let state = state.clone();
        let navigate = navigate.clone();
        spawn_local(async move {
            match api::api().register(&registration).await {
                Ok(receipt) => {
                    state.show_success(
                        receipt
                            .message
                            .as_deref()
                            .unwrap_or("Registration successful, please log in"),
                    );
                    navigate("/login", Default::default());
                }
                Err(e) => state.report("Registration failed", &e),
            }
            set_submitting.set(false);
        });
    };

    view! {
        <div class="min-h-[70vh] flex items-center justify-center px-4">
            <form on:submit=submit class="w-full max-w-md bg-white rounded-3xl shadow p-8 space-y-5">
                <div class="text-center">
                    <h1 class="text-2xl font-bold">"Create an account"</h1>
                    <p class="text-slate-500 text-sm mt-1">"Join to book tickets or publish your own events"</p>
                </div>

                <TextField label="Name" kind="text" value=name set_value=set_name />
                <TextField label="Email" kind="email" value=email set_value=set_email />
                <TextField label="Password" kind="password" value=password set_value=set_password />

                <div>
                    <label class="block text-sm text-slate-600 mb-1">"I want to"</label>
                    <select
                        class="w-full border rounded-lg px-4 py-3"
                        on:change=move |ev| {
                            if let Ok(selected) = event_target_value(&ev).parse::<Role>() {
                                set_role.set(selected);
                            }
                        }
                    >
                        <option value="user" selected=move || role.get() == Role::User>"Buy tickets"</option>
                        <option value="admin" selected=move || role.get() == Role::Admin>"Organize events"</option>
                    </select>
                </div>

                <button
                    type="submit"
                    disabled=move || submitting.get()
                    class="w-full py-3 bg-blue-600 hover:bg-blue-700 disabled:bg-slate-400 text-white rounded-lg font-semibold transition-colors"
                >
                    {move || if submitting.get() {
                        view! { <InlineLoading /> " Creating account..." }.into_view()
                    } else {
                        "Register".into_view()
                    }}
                </button>

                <p class="text-center text-sm text-slate-500">
                    "Already registered? "
                    <A href="/login" class="text-blue-600 hover:underline">"Log in"</A>
                </p>
            </form>
        </div>
    }
}

#[component]
fn TextField(
    label: &'static str,
    kind: &'static str,
    value: ReadSignal<String>,
    set_value: WriteSignal<String>,
) -> impl IntoView {
    view! {
        <div>
            <label class="block text-sm text-slate-600 mb-1">{label}</label>
            <input
                type=kind
                prop:value=move || value.get()
                on:input=move |ev| set_value.set(event_target_value(&ev))
                class="w-full border rounded-lg px-4 py-3 focus:outline-none focus:ring-2 focus:ring-blue-400"
            />
        </div>
    }
}
