//! Organizer Dashboard
//!
//! Publish new events and remove existing ones. The route is guarded:
//! without a stored token the page redirects to `/login`.

use leptos::*;
use leptos_router::*;
use tiketin::{ApiError, Event, EventDraft, EventId};

use crate::api;
use crate::components::{InlineLoading, Loading};
use crate::pages::read_selected_file;
use crate::state::GlobalState;

/// Organizer dashboard page
#[component]
pub fn OrganizerDashboard() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    if !api::auth().is_signed_in() {
        state.show_error("Please log in to manage events");
        return view! { <Redirect path="/login" /> }.into_view();
    }

    let events = create_rw_signal(Vec::<Event>::new());
    let (loading, set_loading) = create_signal(true);
    let reload = create_rw_signal(0u32);

    let state_for_load = state.clone();
    create_effect(move |_| {
        reload.track();
        let state = state_for_load.clone();
        spawn_local(async move {
            match api::api().list_events().await {
                Ok(list) => events.set(list),
                Err(e) => state.report("Failed to load events", &e),
            }
            set_loading.set(false);
        });
    });

    let on_created = Callback::new(move |_: ()| reload.update(|n| *n += 1));

    let delete = move |id: EventId, title: String| {
        if !confirm_delete(&title) {
            return;
        }
        let state = state.clone();
        spawn_local(async move {
            match api::api().delete_event(id).await {
                Ok(receipt) => {
                    events.update(|list| list.retain(|e| e.id != id));
                    state.show_success(receipt.message.as_deref().unwrap_or("Event deleted"));
                }
                Err(e) => state.report("Failed to delete event", &e),
            }
        });
    };

    view! {
        <div class="container mx-auto px-4 py-10 space-y-8">
            <div>
                <h1 class="text-3xl font-bold">"Organizer Dashboard"</h1>
                <p class="text-slate-500 mt-1">"Publish and manage your events"</p>
            </div>

            <CreateEventForm on_created=on_created />

            <section class="bg-white rounded-3xl shadow p-6">
                <h2 class="text-xl font-semibold mb-4">"Events"</h2>
                {move || {
                    if loading.get() {
                        return view! { <Loading /> }.into_view();
                    }
                    let list = events.get();
                    if list.is_empty() {
                        return view! {
                            <p class="text-slate-500 text-center py-8">"No events yet. Create your first one above."</p>
                        }.into_view();
                    }
                    view! {
                        <table class="w-full text-left text-sm">
                            <thead class="text-slate-500 border-b">
                                <tr>
                                    <th class="py-2">"Title"</th>
                                    <th class="py-2">"Date"</th>
                                    <th class="py-2">"Location"</th>
                                    <th class="py-2 text-right">"Price"</th>
                                    <th class="py-2"></th>
                                </tr>
                            </thead>
                            <tbody>
                                {list.into_iter().map(|event| {
                                    let delete = delete.clone();
                                    let id = event.id;
                                    let title = event.title.clone();
                                    let [name, date, place, price] = row_cells(&event);
                                    view! {
                                        <tr class="border-b last:border-0">
                                            <td class="py-3 font-medium">
                                                <A href=format!("/booking/{}", id) class="hover:text-blue-700">
                                                    {name}
                                                </A>
                                            </td>
                                            <td class="py-3">{date}</td>
                                            <td class="py-3">{place}</td>
                                            <td class="py-3 text-right">{price}</td>
                                            <td class="py-3 text-right">
                                                <button
                                                    on:click=move |_| delete(id, title.clone())
                                                    class="px-3 py-1 text-red-600 hover:bg-red-50 rounded-lg"
                                                >
                                                    "Delete"
                                                </button>
                                            </td>
                                        </tr>
                                    }
                                }).collect_view()}
                            </tbody>
                        </table>
                    }.into_view()
                }}
            </section>
        </div>
    }
    .into_view()
}

/// Table cells of one event row: title, date, place, price
fn row_cells(event: &Event) -> [String; 4] {
    [
        event.title.clone(),
        event.display_date(),
        event.place().to_string(),
        event.display_price(),
    ]
}

fn confirm_delete(title: &str) -> bool {
    web_sys::window()
        .and_then(|w| {
            w.confirm_with_message(&format!("Delete \"{}\"?", title))
                .ok()
        })
        .unwrap_or(false)
}

/// Create form; validates locally, then submits as multipart
#[component]
fn CreateEventForm(on_created: Callback<()>) -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let draft = create_rw_signal(EventDraft::default());
    let field_errors = create_rw_signal(None::<ApiError>);
    let (submitting, set_submitting) = create_signal(false);

    let pick_image = move |ev: web_sys::Event| {
        spawn_local(async move {
            let upload = read_selected_file(ev).await;
            draft.update(|d| d.image = upload);
        });
    };

    let submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        let form = match draft.with_untracked(EventDraft::validate) {
            Ok(form) => form,
            Err(e) => {
                state.show_error(e.message());
                field_errors.set(Some(e));
                return;
            }
        };
        field_errors.set(None);

        set_submitting.set(true);
        state.loading.set(true);
        let state = state.clone();
        spawn_local(async move {
            match api::api().create_event(&form).await {
                Ok(receipt) => {
                    state.show_success(receipt.message.as_deref().unwrap_or("Event created"));
                    draft.set(EventDraft::default());
                    on_created.call(());
                }
                Err(e) => {
                    state.report("Failed to create event", &e);
                    field_errors.set(Some(e));
                }
            }
            set_submitting.set(false);
            state.loading.set(false);
        });
    };

    view! {
        <section class="bg-white rounded-3xl shadow p-6">
            <h2 class="text-xl font-semibold mb-4">"New Event"</h2>
            <form on:submit=submit class="grid md:grid-cols-2 gap-4">
                {DraftKey::ALL.into_iter().map(|key| view! {
                    <DraftField field=key draft=draft errors=field_errors />
                }).collect_view()}

                <div>
                    <label class="block text-sm text-slate-600 mb-1">"Poster"</label>
                    <input type="file" accept=".jpg,.jpeg,.png,.gif" on:change=pick_image class="w-full text-sm" />
                    <FieldError name="image" errors=field_errors />
                </div>

                <div class="md:col-span-2">
                    <label class="block text-sm text-slate-600 mb-1">"Description"</label>
                    <textarea
                        rows="4"
                        prop:value=move || draft.with(|d| d.description.clone())
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            draft.update(|d| d.description = value);
                        }
                        class="w-full border rounded-lg px-4 py-3 focus:outline-none focus:ring-2 focus:ring-blue-400"
                    />
                </div>

                <div class="md:col-span-2 flex justify-end">
                    <button
                        type="submit"
                        disabled=move || submitting.get()
                        class="px-6 py-3 bg-blue-600 hover:bg-blue-700 disabled:bg-slate-400 text-white rounded-lg font-semibold transition-colors"
                    >
                        {move || if submitting.get() {
                            view! { <InlineLoading /> " Publishing..." }.into_view()
                        } else {
                            "Publish Event".into_view()
                        }}
                    </button>
                </div>
            </form>
        </section>
    }
}

/// Text inputs of the create form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DraftKey {
    Title,
    Date,
    Location,
    Venue,
    Tag,
    Capacity,
    TicketPrice,
}

impl DraftKey {
    const ALL: [DraftKey; 7] = [
        DraftKey::Title,
        DraftKey::Date,
        DraftKey::Location,
        DraftKey::Venue,
        DraftKey::Tag,
        DraftKey::Capacity,
        DraftKey::TicketPrice,
    ];

    /// Field name used in validation errors
    fn name(self) -> &'static str {
        match self {
            DraftKey::Title => "title",
            DraftKey::Date => "date",
            DraftKey::Location => "location",
            DraftKey::Venue => "venue",
            DraftKey::Tag => "tag",
            DraftKey::Capacity => "capacity",
            DraftKey::TicketPrice => "ticket_price",
        }
    }

    fn label(self) -> &'static str {
        match self {
            DraftKey::Title => "Title",
            DraftKey::Date => "Date & time",
            DraftKey::Location => "Location",
            DraftKey::Venue => "Venue",
            DraftKey::Tag => "Category",
            DraftKey::Capacity => "Capacity",
            DraftKey::TicketPrice => "Ticket price (Rp)",
        }
    }

    fn input_type(self) -> &'static str {
        match self {
            DraftKey::Date => "datetime-local",
            DraftKey::Capacity | DraftKey::TicketPrice => "number",
            _ => "text",
        }
    }

    fn slot(self, draft: &mut EventDraft) -> &mut String {
        match self {
            DraftKey::Title => &mut draft.title,
            DraftKey::Date => &mut draft.date,
            DraftKey::Location => &mut draft.location,
            DraftKey::Venue => &mut draft.venue,
            DraftKey::Tag => &mut draft.tag,
            DraftKey::Capacity => &mut draft.capacity,
            DraftKey::TicketPrice => &mut draft.ticket_price,
        }
    }

    fn value(self, draft: &EventDraft) -> &str {
        match self {
            DraftKey::Title => &draft.title,
            DraftKey::Date => &draft.date,
            DraftKey::Location => &draft.location,
            DraftKey::Venue => &draft.venue,
            DraftKey::Tag => &draft.tag,
            DraftKey::Capacity => &draft.capacity,
            DraftKey::TicketPrice => &draft.ticket_price,
        }
    }
}

#[component]
fn DraftField(
    field: DraftKey,
    draft: RwSignal<EventDraft>,
    errors: RwSignal<Option<ApiError>>,
) -> impl IntoView {
    view! {
        <div>
            <label class="block text-sm text-slate-600 mb-1">{field.label()}</label>
            <input
                type=field.input_type()
                prop:value=move || draft.with(|d| field.value(d).to_string())
                on:input=move |ev| {
                    let value = event_target_value(&ev);
                    draft.update(|d| *field.slot(d) = value);
                }
                class="w-full border rounded-lg px-4 py-3 focus:outline-none focus:ring-2 focus:ring-blue-400"
            />
            <FieldError name=field.name() errors=errors />
        </div>
    }
}

/// Message for one field of the last validation error
#[component]
fn FieldError(name: &'static str, errors: RwSignal<Option<ApiError>>) -> impl IntoView {
    move || {
        errors
            .with(|e| e.as_ref().and_then(|e| e.field(name)).map(str::to_string))
            .map(|msg| view! { <p class="text-xs text-red-600 mt-1">{msg}</p> })
    }
}
