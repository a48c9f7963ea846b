//! Browser bindings for the Tiketin API client.

pub mod client;

pub use client::{api, auth, get_api_base};
