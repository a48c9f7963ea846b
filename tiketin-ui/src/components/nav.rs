//! Navigation Component
//!
//! Header navigation bar with logo and links.

use leptos::*;
use leptos_router::*;

use crate::api;
use crate::state::GlobalState;

/// Navigation header component
#[component]
pub fn Nav() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let signed_in = state.signed_in;
    let navigate = use_navigate();

    let logout = move |_| {
        match api::api().logout() {
            Ok(()) => {
                state.refresh_session();
                state.show_success("Logged out");
                navigate("/", Default::default());
            }
            Err(e) => state.show_error(&e.to_string()),
        }
    };

    view! {
        <nav class="bg-white/90 backdrop-blur border-b border-slate-200 sticky top-0 z-40">
            <div class="container mx-auto px-4">
                <div class="flex items-center justify-between h-16">
                    // Logo and brand
                    <A href="/" class="flex items-center space-x-2">
                        <span class="text-2xl">"🎟"</span>
                        <span class="text-xl font-bold text-blue-700">"Tiketin"</span>
                    </A>

                    // Navigation links
                    <div class="flex items-center space-x-1">
                        <NavLink href="/" label="Events" />
                        {move || {
                            if signed_in.get() {
                                view! {
                                    <NavLink href="/organizer/dashboard" label="Dashboard" />
                                    <NavLink href="/profile" label="Profile" />
                                    <button
                                        on:click=logout.clone()
                                        class="px-4 py-2 rounded-lg text-slate-600 hover:text-red-600 hover:bg-slate-100 transition-colors"
                                    >
                                        "Logout"
                                    </button>
                                }.into_view()
                            } else {
                                view! {
                                    <NavLink href="/login" label="Login" />
                                    <A
                                        href="/register"
                                        class="px-4 py-2 rounded-lg bg-blue-600 hover:bg-blue-700 text-white font-medium transition-colors"
                                    >
                                        "Register"
                                    </A>
                                }.into_view()
                            }
                        }}
                    </div>
                </div>
            </div>
        </nav>
    }
}

/// Individual navigation link
#[component]
fn NavLink(
    href: &'static str,
    label: &'static str,
) -> impl IntoView {
    view! {
        <A
            href=href
            class="px-4 py-2 rounded-lg text-slate-600 hover:text-blue-700 hover:bg-slate-100 transition-colors"
            active_class="bg-slate-100 text-blue-700"
        >
            {label}
        </A>
    }
}
