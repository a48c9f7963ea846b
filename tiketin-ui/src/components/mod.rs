//! UI Components
//!
//! Reusable Leptos components for the storefront.

pub mod event_card;
pub mod loading;
pub mod nav;
pub mod pagination;
pub mod toast;
pub mod toggle;

pub use event_card::EventCard;
pub use loading::{InlineLoading, Loading};
pub use nav::Nav;
pub use pagination::Pagination;
pub use toast::Toast;
pub use toggle::Toggle;
