//! Event List Page
//!
//! The storefront: fetches every event once, then searches and pages
//! through them in memory.

use leptos::*;
use tiketin::{Catalog, Event};

use crate::api;
use crate::components::loading::CardSkeleton;
use crate::components::{EventCard, Pagination};
use crate::state::GlobalState;

/// Event catalog page
#[component]
pub fn EventList() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let catalog = create_rw_signal(Catalog::default());
    let (loading, set_loading) = create_signal(true);

    // Fetch events on mount
    create_effect(move |_| {
        let state = state.clone();
        spawn_local(async move {
            let events = match api::api().list_events().await {
                Ok(events) => events,
                Err(e) => {
                    state.report("Failed to load events", &e);
                    Vec::new()
                }
            };
            catalog.update(|c| c.set_events(events));
            set_loading.set(false);
        });
    });

    let page = Signal::derive(move || catalog.with(Catalog::page));
    let page_count = Signal::derive(move || catalog.with(Catalog::page_count));
    let page_items = move || {
        catalog.with(|c| c.page_items().into_iter().cloned().collect::<Vec<Event>>())
    };
    let has_results = move || catalog.with(|c| c.filtered_len() > 0);

    view! {
        <div class="events-page">
            // Hero with search
            <section class="events-hero bg-gradient-to-br from-blue-700 to-indigo-700 pt-24 pb-20 px-6 text-center">
                <div class="inline-flex items-center gap-2 bg-white/10 border border-white/20 px-4 py-1 rounded-full text-blue-50 text-xs font-bold uppercase tracking-wider mb-4">
                    "🎟 Event List"
                </div>
                <h1 class="text-3xl md:text-4xl font-extrabold text-white mb-2 tracking-tight">
                    "Find Great Events Near You"
                </h1>
                <p class="text-blue-100 font-light">
                    "Concerts, workshops, festivals and more, all in one place."
                </p>

                <div class="mt-6">
                    <input
                        type="search"
                        class="search-bar w-full max-w-md mx-auto p-3 rounded-full text-slate-800 focus:outline-none focus:ring-2 focus:ring-blue-400 shadow-xl"
                        placeholder="Search events, venues or categories"
                        prop:value=move || catalog.with(|c| c.query().to_string())
                        on:input=move |ev| {
                            let query = event_target_value(&ev);
                            catalog.update(|c| c.set_query(query));
                        }
                    />
                </div>
            </section>

            <div class="container mx-auto px-4 py-8">
                {move || {
                    if loading.get() {
                        view! {
                            <div class="grid sm:grid-cols-2 lg:grid-cols-4 gap-6">
                                {(0..8).map(|_| view! { <CardSkeleton /> }).collect_view()}
                            </div>
                        }.into_view()
                    } else if has_results() {
                        view! {
                            <div class="events-rows grid sm:grid-cols-2 lg:grid-cols-4 gap-6">
                                {page_items()
                                    .into_iter()
                                    .map(|event| view! { <EventCard event=event /> })
                                    .collect_view()}
                            </div>

                            <Pagination
                                page=page
                                page_count=page_count
                                on_prev=move |_| catalog.update(Catalog::prev_page)
                                on_next=move |_| catalog.update(Catalog::next_page)
                            />
                        }.into_view()
                    } else {
                        view! { <EmptyState /> }.into_view()
                    }
                }}
            </div>
        </div>
    }
}

#[component]
fn EmptyState() -> impl IntoView {
    view! {
        <div class="text-center py-20 bg-white rounded-3xl border border-dashed border-slate-300">
            <div class="text-5xl mb-4 text-slate-300">"🎟"</div>
            <h3 class="text-lg font-medium text-slate-900">"No events available"</h3>
            <p class="text-slate-500">"Try another search, or check back later."</p>
        </div>
    }
}
