//! Profile Page
//!
//! Shows the signed-in user's profile and submits edits as multipart form
//! data, avatar included.

use leptos::*;
use leptos_router::*;
use tiketin::{FileUpload, MultipartForm, Profile};

use crate::api;
use crate::components::{InlineLoading, Loading};
use crate::pages::read_selected_file;
use crate::state::GlobalState;

/// Editable text fields: (form key, label)
const EDITABLE_FIELDS: [(&str, &str); 3] = [("name", "Name"), ("email", "Email"), ("phone", "Phone")];

/// Profile page component
#[component]
pub fn ProfilePage() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let profile = create_rw_signal(None::<Profile>);
    let (loading, set_loading) = create_signal(true);

    let state_for_load = state.clone();
    create_effect(move |_| {
        let state = state_for_load.clone();
        spawn_local(async move {
            match api::api().get_profile().await {
                Ok(loaded) => profile.set(Some(loaded)),
                Err(e) => state.report("Failed to load profile", &e),
            }
            set_loading.set(false);
        });
    });

    view! {
        <div class="container mx-auto px-4 py-10 max-w-3xl space-y-6">
            <div class="flex items-center justify-between">
                <div>
                    <h1 class="text-3xl font-bold">"My Profile"</h1>
                    <p class="text-slate-500 mt-1">"Your account details"</p>
                </div>
                <A
                    href="/profile/notifications"
                    class="px-4 py-2 bg-white border rounded-lg hover:bg-slate-50 text-sm font-medium"
                >
                    "🔔 Notification Settings"
                </A>
            </div>

            {move || {
                if loading.get() {
                    view! { <Loading /> }.into_view()
                } else if let Some(current) = profile.get() {
                    view! {
                        <ProfileDetails profile=current.clone() />
                        <ProfileForm initial=current on_saved=move |updated: Profile| profile.set(Some(updated)) />
                    }.into_view()
                } else {
                    view! {
                        <div class="text-center py-16 bg-white rounded-3xl shadow">
                            <p class="text-slate-500 mb-4">"Log in to see your profile."</p>
                            <A href="/login" class="text-blue-600 hover:underline">"Log in"</A>
                        </div>
                    }.into_view()
                }
            }}
        </div>
    }
}

#[component]
fn ProfileDetails(profile: Profile) -> impl IntoView {
    let avatar = profile
        .get_str("avatar_url")
        .or_else(|| profile.get_str("avatar"))
        .map(str::to_string);

    view! {
        <section class="bg-white rounded-3xl shadow p-6 flex gap-6 items-start">
            {avatar.map(|src| view! {
                <img src=src alt="avatar" class="w-20 h-20 rounded-full object-cover" />
            })}
            <dl class="grid grid-cols-3 gap-x-4 gap-y-2 text-sm flex-1">
                {profile.display_fields().into_iter().map(|(key, value)| view! {
                    <dt class="text-slate-500 capitalize">{key.replace('_', " ")}</dt>
                    <dd class="col-span-2 font-medium break-all">{value}</dd>
                }).collect_view()}
            </dl>
        </section>
    }
}

#[component]
fn ProfileForm(
    initial: Profile,
    #[prop(into)]
    on_saved: Callback<Profile>,
) -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let fields = EDITABLE_FIELDS.map(|(key, _)| {
        create_rw_signal(initial.get_str(key).unwrap_or_default().to_string())
    });
    let avatar = create_rw_signal(None::<FileUpload>);
    let (saving, set_saving) = create_signal(false);

    let pick_avatar = move |ev: web_sys::Event| {
        spawn_local(async move {
            avatar.set(read_selected_file(ev).await);
        });
    };

    let submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        let values = fields.map(|f| f.get_untracked());
        let form = profile_form(&values, avatar.get_untracked());
        if form.is_empty() {
            state.show_error("Nothing to update");
            return;
        }

        set_saving.set(true);
        let state = state.clone();
        spawn_local(async move {
            match api::api().update_profile(form).await {
                Ok(updated) => {
                    state.show_success("Profile updated");
                    on_saved.call(updated);
                }
                Err(e) => state.report("Failed to update profile", &e),
            }
            set_saving.set(false);
        });
    };

    view! {
        <form on:submit=submit class="bg-white rounded-3xl shadow p-6 space-y-4">
            <h2 class="text-xl font-semibold">"Edit Profile"</h2>

            {EDITABLE_FIELDS.into_iter().zip(fields).map(|((_, label), value)| view! {
                <div>
                    <label class="block text-sm text-slate-600 mb-1">{label}</label>
                    <input
                        type="text"
                        prop:value=move || value.get()
                        on:input=move |ev| value.set(event_target_value(&ev))
                        class="w-full border rounded-lg px-4 py-3 focus:outline-none focus:ring-2 focus:ring-blue-400"
                    />
                </div>
            }).collect_view()}

            <div>
                <label class="block text-sm text-slate-600 mb-1">"Avatar"</label>
                <input type="file" accept="image/*" on:change=pick_avatar class="w-full text-sm" />
            </div>

            <div class="flex justify-end">
                <button
                    type="submit"
                    disabled=move || saving.get()
                    class="px-6 py-3 bg-blue-600 hover:bg-blue-700 disabled:bg-slate-400 text-white rounded-lg font-semibold transition-colors"
                >
                    {move || if saving.get() {
                        view! { <InlineLoading /> " Saving..." }.into_view()
                    } else {
                        "Save Profile".into_view()
                    }}
                </button>
            </div>
        </form>
    }
}

/// Multipart body for the profile update; blank text fields are left out
fn profile_form(values: &[String; 3], avatar: Option<FileUpload>) -> MultipartForm {
    let mut form = MultipartForm::new();
    for ((key, _), value) in EDITABLE_FIELDS.iter().zip(values) {
        let value = value.trim();
        if !value.is_empty() {
            form = form.text(*key, value);
        }
    }
    if let Some(upload) = avatar {
        form = form.file("avatar", upload);
    }
    form
}
