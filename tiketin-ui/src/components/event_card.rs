//! Event Card Component
//!
//! One catalog entry: poster, tag, price, title, date and place.

use leptos::*;
use leptos_router::*;
use tiketin::Event;

/// Event card with a "Buy Ticket" link
#[component]
pub fn EventCard(event: Event) -> impl IntoView {
    let poster = poster_url(&event);
    let meta = meta_line(&event);
    let price = event.display_price();
    let booking_href = format!("/booking/{}", event.id);

    view! {
        <div class="event-card bg-white rounded-2xl shadow hover:shadow-lg transition-shadow overflow-hidden">
            <div class="event-thumb relative h-40 bg-gradient-to-br from-blue-50 to-indigo-50">
                {poster.map(|src| view! {
                    <img src=src alt=event.title.clone() class="w-full h-full object-cover" />
                })}
                {(!event.tag.is_empty()).then(|| view! {
                    <div class="tag absolute top-3 left-3 px-2 py-0.5 rounded-full bg-white/90 text-xs font-semibold text-blue-700">
                        {event.tag.clone()}
                    </div>
                })}
                <div class="price-pill absolute bottom-3 right-3 px-3 py-1 rounded-full bg-blue-600 text-white text-sm font-bold">
                    {price}
                </div>
            </div>

            <div class="p-4">
                <h3 class="event-title font-semibold text-slate-900">{event.title.clone()}</h3>
                <div class="event-meta text-sm text-slate-500 mt-1">{meta}</div>

                <div class="flex justify-between items-center mt-3">
                    <div class="text-sm text-slate-400">{event.tag.clone()}</div>
                    <A
                        href=booking_href
                        class="px-4 py-2 bg-blue-600 hover:bg-blue-700 text-white rounded-lg text-sm font-medium transition-colors"
                    >
                        "Buy Ticket"
                    </A>
                </div>
            </div>
        </div>
    }
}

/// Image reference as served by the API, when it looks usable
fn poster_url(event: &Event) -> Option<String> {
    event
        .image
        .as_deref()
        .map(str::trim)
        .filter(|src| !src.is_empty())
        .map(str::to_string)
}

/// "date • place" line under the title
fn meta_line(event: &Event) -> String {
    match (event.display_date(), event.place()) {
        (date, "") => date,
        (date, place) if date.is_empty() => place.to_string(),
        (date, place) => format!("{} • {}", date, place),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(value: serde_json::Value) -> Event {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_poster_url() {
        assert_eq!(poster_url(&event(serde_json::json!({"id": 1, "title": "A"}))), None);
        assert_eq!(
            poster_url(&event(serde_json::json!({"id": 1, "title": "A", "image_url": " "}))),
            None
        );
        assert_eq!(
            poster_url(&event(
                serde_json::json!({"id": 1, "title": "A", "image_url": "/static/uploads/a.png"})
            )),
            Some("/static/uploads/a.png".to_string())
        );
    }

    #[test]
    fn test_meta_line_skips_missing_place() {
        let e = event(serde_json::json!({"id": 1, "title": "A", "date": "2025-08-17 19:30"}));
        assert_eq!(meta_line(&e), e.display_date());

        let e = event(serde_json::json!({
            "id": 1, "title": "A", "date": "2025-08-17 19:30", "venue": "GBK"
        }));
        assert!(meta_line(&e).ends_with("• GBK"));
    }
}
