//! Tiketin Storefront
//!
//! Event ticketing storefront built with Leptos (WASM).
//!
//! # Features
//!
//! - Event catalog with search and pagination
//! - Ticket booking
//! - Organizer dashboard for publishing events
//! - Profile and notification preferences
//!
//! # Architecture
//!
//! This is a client-side rendered (CSR) Leptos application that compiles to
//! WebAssembly. All API calls go through the shared `tiketin` client over a
//! gloo-net transport.

use leptos::*;

mod api;
mod app;
mod components;
mod pages;
mod state;

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    mount_to_body(|| view! { <app::App /> });
}
