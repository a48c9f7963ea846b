//! # Tiketin
//!
//! Event ticketing storefront client - browse and search events, manage a
//! profile, publish events as an organizer, and book tickets through the
//! Tiketin REST API.
//!
//! ## Modules
//!
//! - [`catalog`]: In-memory search and pagination of the event list
//! - [`client`]: REST client over a pluggable [`client::Transport`]
//! - [`auth`]: Bearer token storage shared by every request
//! - [`error`]: The single error type every API call reports
//! - [`models`]: Records exchanged with the API
//! - [`form`]: Multipart payloads and organizer event input
//! - [`notifications`]: Client-only notification preferences
//! - `config`: CLI configuration (`native` feature)
//!
//! The browser frontend (`tiketin-ui`) builds on this crate with the
//! `native` feature disabled.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use tiketin::{ApiClient, AuthContext, Catalog, ReqwestTransport};
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let transport = ReqwestTransport::new(Duration::from_secs(30))?;
//!     let api = ApiClient::new(transport, AuthContext::anonymous(), tiketin::DEFAULT_API_BASE);
//!
//!     let mut catalog = Catalog::new(api.list_events().await?);
//!     catalog.set_query("musik");
//!
//!     for event in catalog.page_items() {
//!         println!("{} - {}", event.title, event.display_price());
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod catalog;
pub mod client;
#[cfg(feature = "native")]
pub mod config;
pub mod error;
pub mod form;
pub mod models;
pub mod notifications;

// Re-export top-level types for convenience
pub use auth::{AuthContext, MemoryTokenStore, TokenStore, TokenStoreError, TOKEN_KEY};

#[cfg(feature = "native")]
pub use auth::FileTokenStore;

pub use catalog::{Catalog, PAGE_SIZE};

pub use client::{
    ApiClient, ApiRequest, ApiResponse, Method, RequestBody, Transport, DEFAULT_API_BASE,
};

#[cfg(feature = "native")]
pub use client::http::ReqwestTransport;

pub use error::{ApiError, ApiResult};

pub use form::{EventDraft, EventForm, FileUpload, MultipartForm, PartValue};

pub use models::{
    format_price, BookingReceipt, BookingRequest, BookingSummary, Credentials, Event, EventId, LoginResponse,
    Profile, Registration, Role, WriteReceipt,
};

pub use notifications::{
    Channel, ChannelGroup, NotificationPanel, NotificationPreferences, PreferenceError, SaveHost,
    SAVE_CONFIRMATION, SAVE_DELAY_MS,
};

#[cfg(feature = "native")]
pub use config::{Config, ConfigError};
