//! Pages
//!
//! Top-level page components for each route.

pub mod booking;
pub mod dashboard;
pub mod event_list;
pub mod login;
pub mod notifications;
pub mod profile;
pub mod register;

pub use booking::Booking;
pub use dashboard::OrganizerDashboard;
pub use event_list::EventList;
pub use login::Login;
pub use notifications::NotificationSettings;
pub use profile::ProfilePage;
pub use register::Register;

/// Selected file from an `<input type="file">` change event, read into memory
pub(crate) async fn read_selected_file(ev: web_sys::Event) -> Option<tiketin::FileUpload> {
    use wasm_bindgen::JsCast;

    let input: web_sys::HtmlInputElement = ev.target()?.dyn_into().ok()?;
    let file = input.files()?.get(0)?;
    let buffer = wasm_bindgen_futures::JsFuture::from(file.array_buffer())
        .await
        .ok()?;
    let bytes = js_sys::Uint8Array::new(&buffer).to_vec();
    let mime_type = Some(file.type_()).filter(|t| !t.is_empty());

    Some(tiketin::FileUpload::new(file.name(), mime_type, bytes))
}
