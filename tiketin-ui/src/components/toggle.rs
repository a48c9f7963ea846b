//! Toggle Switch Component

use leptos::*;

/// On/off switch. A locked switch is always rendered on and disabled.
#[component]
pub fn Toggle(
    #[prop(into)]
    checked: Signal<bool>,
    #[prop(default = false)]
    locked: bool,
    #[prop(into)]
    on_toggle: Callback<()>,
) -> impl IntoView {
    let track = move || {
        let base = "relative inline-flex h-6 w-11 items-center rounded-full transition-colors";
        match (locked, checked.get()) {
            (true, _) => format!("{} bg-blue-300 cursor-not-allowed", base),
            (false, true) => format!("{} bg-blue-600", base),
            (false, false) => format!("{} bg-slate-300", base),
        }
    };
    let knob = move || {
        let base = "inline-block h-4 w-4 transform rounded-full bg-white transition-transform";
        if locked || checked.get() {
            format!("{} translate-x-6", base)
        } else {
            format!("{} translate-x-1", base)
        }
    };

    view! {
        <button
            type="button"
            role="switch"
            aria-checked=move || (locked || checked.get()).to_string()
            disabled=locked
            class=track
            on:click=move |_| {
                if !locked {
                    on_toggle.call(());
                }
            }
        >
            <span class=knob />
        </button>
    }
}
