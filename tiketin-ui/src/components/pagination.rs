//! Pagination Component

use leptos::*;

/// Prev / Next controls with a "Page x / y" label; hidden for a single page
#[component]
pub fn Pagination(
    #[prop(into)]
    page: Signal<usize>,
    #[prop(into)]
    page_count: Signal<usize>,
    #[prop(into)]
    on_prev: Callback<()>,
    #[prop(into)]
    on_next: Callback<()>,
) -> impl IntoView {
    view! {
        <Show when=move || { page_count.get() > 1 }>
            <div class="mt-8 flex items-center justify-center gap-3">
                <button
                    class="px-4 py-2 bg-white border rounded-lg hover:bg-slate-50 disabled:opacity-50"
                    on:click=move |_| on_prev.call(())
                    disabled=move || { page.get() <= 1 }
                >
                    "Prev"
                </button>
                <div class="text-sm text-slate-600">
                    {move || format!("Page {} / {}", page.get(), page_count.get())}
                </div>
                <button
                    class="px-4 py-2 bg-white border rounded-lg hover:bg-slate-50 disabled:opacity-50"
                    on:click=move |_| on_next.call(())
                    disabled=move || { page.get() >= page_count.get() }
                >
                    "Next"
                </button>
            </div>
        </Show>
    }
}
