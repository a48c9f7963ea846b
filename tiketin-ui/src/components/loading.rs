//! Loading Component
//!
//! Loading spinners and skeleton states.

use leptos::*;

/// Full-page loading spinner
#[component]
pub fn Loading() -> impl IntoView {
    view! {
        <div class="flex items-center justify-center py-24">
            <div class="loading-spinner w-12 h-12" />
        </div>
    }
}

/// Inline loading spinner
#[component]
pub fn InlineLoading() -> impl IntoView {
    view! {
        <span class="inline-block loading-spinner w-4 h-4" />
    }
}

/// Skeleton loader for event cards
#[component]
pub fn CardSkeleton() -> impl IntoView {
    view! {
        <div class="bg-white rounded-2xl shadow animate-pulse">
            <div class="h-40 bg-slate-200 rounded-t-2xl" />
            <div class="p-4 space-y-2">
                <div class="h-4 bg-slate-200 rounded w-2/3" />
                <div class="h-3 bg-slate-200 rounded w-1/2" />
            </div>
        </div>
    }
}
