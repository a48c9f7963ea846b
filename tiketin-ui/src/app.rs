//! App Root Component
//!
//! Main application component with routing and global providers.

use leptos::*;
use leptos_router::*;

use crate::components::{InlineLoading, Nav, Toast};
use crate::pages::{
    Booking, EventList, Login, NotificationSettings, OrganizerDashboard, ProfilePage, Register,
};
use crate::state::{provide_global_state, GlobalState};

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    // Provide global state to all components
    provide_global_state();

    view! {
        <Router>
            <div class="min-h-screen bg-blue-50 text-slate-800 flex flex-col">
                <Nav />

                <main class="flex-1 pb-24">
                    <Routes>
                        <Route path="/" view=EventList />
                        <Route path="/login" view=Login />
                        <Route path="/register" view=Register />
                        <Route path="/organizer/dashboard" view=OrganizerDashboard />
                        <Route path="/booking/:id" view=Booking />
                        <Route path="/profile" view=ProfilePage />
                        <Route path="/profile/notifications" view=NotificationSettings />
                        <Route path="/*any" view=NotFound />
                    </Routes>
                </main>

                <Footer />

                <Toast />
            </div>
        </Router>
    }
}

/// Footer with the API host and a pending-request indicator
#[component]
fn Footer() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let year = {
        use chrono::Datelike;
        chrono::Local::now().year()
    };
    let api_base = crate::api::get_api_base();

    view! {
        <footer class="fixed bottom-0 left-0 right-0 bg-white border-t border-slate-200 py-3 px-4">
            <div class="container mx-auto flex items-center justify-between text-sm text-slate-500">
                <span>{format!("© {} Tiketin", year)}</span>

                <span class="hidden md:inline truncate">{api_base}</span>

                {move || {
                    if state.loading.get() {
                        view! {
                            <span class="flex items-center space-x-2 text-blue-600">
                                <InlineLoading />
                                <span>"Loading..."</span>
                            </span>
                        }.into_view()
                    } else {
                        view! {}.into_view()
                    }
                }}
            </div>
        </footer>
    }
}

/// 404 Not Found page
#[component]
fn NotFound() -> impl IntoView {
    view! {
        <div class="flex flex-col items-center justify-center min-h-[60vh] text-center">
            <div class="text-6xl mb-4">"🔍"</div>
            <h1 class="text-3xl font-bold mb-2">"Page Not Found"</h1>
            <p class="text-slate-500 mb-6">"The page you're looking for doesn't exist."</p>
            <A
                href="/"
                class="px-6 py-3 bg-blue-600 hover:bg-blue-700 text-white rounded-lg font-medium transition-colors"
            >
                "Browse Events"
            </A>
        </div>
    }
}
