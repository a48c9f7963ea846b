//! Booking Page
//!
//! Ticket purchase for a single event (`/booking/:id`).

use leptos::*;
use leptos_router::*;
use tiketin::models::booking_total;
use tiketin::{format_price, BookingRequest, Event, EventId};

use crate::api;
use crate::components::{InlineLoading, Loading};
use crate::state::GlobalState;

/// Largest quantity offered in one booking
const MAX_QUANTITY: u32 = 10;

/// Booking page component
#[component]
pub fn Booking() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let params = use_params_map();
    let event_id = move || params.with(|p| p.get("id").and_then(|id| id.parse::<EventId>().ok()));

    let event = create_rw_signal(None::<Event>);
    let (loading, set_loading) = create_signal(true);
    let (quantity, set_quantity) = create_signal(1u32);
    let (submitting, set_submitting) = create_signal(false);
    let (booking_code, set_booking_code) = create_signal(None::<String>);

    let state_for_load = state.clone();
    create_effect(move |_| {
        let state = state_for_load.clone();
        let Some(id) = event_id() else {
            set_loading.set(false);
            return;
        };
        set_loading.set(true);
        spawn_local(async move {
            match api::api().get_event(id).await {
                Ok(loaded) => event.set(Some(loaded)),
                Err(e) => state.report("Failed to load event", &e),
            }
            set_loading.set(false);
        });
    });

    let total = move || {
        event.with(|e| {
            e.as_ref()
                .map(|e| format_price(booking_total(e.price, quantity.get())))
                .unwrap_or_default()
        })
    };

    let submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        let Some(event_id) = event.with_untracked(|e| e.as_ref().map(|e| e.id)) else {
            return;
        };
        let request = BookingRequest {
            event_id,
            quantity: quantity.get_untracked(),
        };

        set_submitting.set(true);
        state.loading.set(true);
        let state = state.clone();
        spawn_local(async move {
            match api::api().create_booking(&request).await {
                Ok(receipt) => {
                    set_booking_code.set(receipt.booking_code.clone());
                    state.show_success(
                        receipt.message.as_deref().unwrap_or("Booking successful"),
                    );
                }
                Err(e) => state.report("Booking failed", &e),
            }
            set_submitting.set(false);
            state.loading.set(false);
        });
    };

    let signed_in = use_context::<GlobalState>()
        .expect("GlobalState not found")
        .signed_in;

    view! {
        <div class="container mx-auto px-4 py-10 max-w-3xl">
            {move || {
                if loading.get() {
                    return view! { <Loading /> }.into_view();
                }
                let Some(current) = event.get() else {
                    return view! {
                        <div class="text-center py-20">
                            <h2 class="text-2xl font-bold mb-2">"Event not found"</h2>
                            <A href="/" class="text-blue-600 hover:underline">"Back to events"</A>
                        </div>
                    }.into_view();
                };

                view! {
                    <div class="bg-white rounded-3xl shadow overflow-hidden">
                        {current.image.clone().filter(|src| !src.trim().is_empty()).map(|src| view! {
                            <img src=src alt=current.title.clone() class="w-full h-64 object-cover" />
                        })}
                        <div class="p-8 space-y-4">
                            <div>
                                <span class="text-xs uppercase tracking-wider text-blue-600 font-semibold">
                                    {current.tag.clone()}
                                </span>
                                <h1 class="text-3xl font-bold">{current.title.clone()}</h1>
                                <p class="text-slate-500 mt-1">
                                    {format!("{} • {}", current.display_date(), current.place())}
                                </p>
                            </div>

                            {current.description.clone().filter(|d| !d.is_empty()).map(|d| view! {
                                <p class="text-slate-700 whitespace-pre-line">{d}</p>
                            })}

                            <div class="flex items-center justify-between border-t pt-4">
                                <span class="text-slate-500">"Price per ticket"</span>
                                <span class="font-semibold">{current.display_price()}</span>
                            </div>
                        </div>
                    </div>
                }.into_view()
            }}

            <Show when=move || event.with(Option::is_some)>
                <form on:submit=submit.clone() class="bg-white rounded-3xl shadow p-8 mt-6 space-y-4">
                    <div class="flex items-center justify-between">
                        <label class="text-slate-600" for="quantity">"Quantity"</label>
                        <select
                            id="quantity"
                            class="border rounded-lg px-3 py-2"
                            on:change=move |ev| set_quantity.set(parse_quantity(&event_target_value(&ev)))
                        >
                            {(1..=MAX_QUANTITY).map(|n| view! {
                                <option value=n.to_string() selected=move || quantity.get() == n>{n}</option>
                            }).collect_view()}
                        </select>
                    </div>

                    <div class="flex items-center justify-between text-lg">
                        <span class="font-medium">"Total"</span>
                        <span class="font-bold text-blue-700">{total}</span>
                    </div>

                    {move || {
                        if signed_in.get() {
                            view! {
                                <button
                                    type="submit"
                                    disabled=move || submitting.get()
                                    class="w-full py-3 bg-blue-600 hover:bg-blue-700 disabled:bg-slate-400 text-white rounded-lg font-semibold transition-colors"
                                >
                                    {move || if submitting.get() {
                                        view! { <InlineLoading /> " Booking..." }.into_view()
                                    } else {
                                        "Book Now".into_view()
                                    }}
                                </button>
                            }.into_view()
                        } else {
                            view! {
                                <A
                                    href="/login"
                                    class="block text-center w-full py-3 bg-slate-200 hover:bg-slate-300 rounded-lg font-semibold"
                                >
                                    "Log in to book"
                                </A>
                            }.into_view()
                        }
                    }}

                    {move || booking_code.get().map(|code| view! {
                        <div class="p-4 bg-green-50 border border-green-200 rounded-lg text-green-800">
                            "Your booking code: "
                            <span class="font-mono font-bold">{code}</span>
                        </div>
                    })}
                </form>
            </Show>
        </div>
    }
}

/// Quantity from the select box, clamped to `1..=MAX_QUANTITY`
fn parse_quantity(raw: &str) -> u32 {
    raw.trim()
        .parse::<u32>()
        .unwrap_or(1)
        .clamp(1, MAX_QUANTITY)
}
