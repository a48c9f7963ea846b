//! Ticketing API Client
//!
//! One client covers every endpoint the storefront uses. The HTTP machinery
//! sits behind [`Transport`] so the same client runs in the browser
//! (gloo-net), in the CLI (reqwest) and in tests (a recording double).
//!
//! # Endpoints
//!
//! | Operation | Request | Auth |
//! |---|---|---|
//! | [`ApiClient::list_events`] | `GET /events` | no |
//! | [`ApiClient::get_event`] | `GET /events/{id}` | no |
//! | [`ApiClient::create_event`] | `POST /events` (multipart) | yes |
//! | [`ApiClient::update_event`] | `PUT /events/{id}` (multipart) | yes |
//! | [`ApiClient::delete_event`] | `DELETE /events/{id}` | yes |
//! | [`ApiClient::get_profile`] | `GET /profile` | yes |
//! | [`ApiClient::update_profile`] | `POST /profile` (multipart) | yes |
//! | [`ApiClient::login`] | `POST /login` (JSON) | no |
//! | [`ApiClient::register`] | `POST /register` (JSON) | no |
//! | [`ApiClient::create_booking`] | `POST /bookings` (JSON) | yes |
//! | [`ApiClient::my_bookings`] | `GET <configured path>` | yes |
//!
//! Authenticated requests carry `Authorization: Bearer <token>` when the
//! [`AuthContext`] holds a token and no `Authorization` header otherwise.

#[cfg(feature = "native")]
pub mod http;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::auth::{AuthContext, TokenStoreError};
use crate::error::{ApiError, ApiResult};
use crate::form::{EventForm, MultipartForm};
use crate::models::{
    BookingReceipt, BookingRequest, BookingSummary, Credentials, Event, EventId, LoginResponse,
    Profile, Registration, WriteReceipt,
};

/// Default API base URL
pub const DEFAULT_API_BASE: &str = "https://alimukti.pythonanywhere.com/api";

/// HTTP method of an API request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

/// Body of an API request
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Empty,
    Json(Value),
    /// Content type and boundary are left to the transport
    Multipart(MultipartForm),
}

/// A fully resolved request handed to a [`Transport`]
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: RequestBody,
}

impl ApiRequest {
    /// Value of a header, compared case-insensitively
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Raw response returned by a [`Transport`]
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends requests over HTTP.
///
/// Implementations only report [`ApiError::Network`]; status handling and
/// body decoding are done by [`ApiClient`].
#[async_trait(?Send)]
pub trait Transport {
    async fn send(&self, request: ApiRequest) -> ApiResult<ApiResponse>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Access {
    Public,
    Authenticated,
}

/// Client for the ticketing REST API
#[derive(Debug, Clone)]
pub struct ApiClient<T> {
    transport: T,
    auth: AuthContext,
    base_url: String,
}

impl<T: Transport> ApiClient<T> {
    /// Create a client; a trailing slash on `base_url` is ignored
    pub fn new(transport: T, auth: AuthContext, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            transport,
            auth,
            base_url,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn auth(&self) -> &AuthContext {
        &self.auth
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    // ============ Events ============

    /// Fetch the full event collection; records that fail to decode are skipped
    pub async fn list_events(&self) -> ApiResult<Vec<Event>> {
        let records: Vec<Value> = self
            .call(Method::Get, "/events", RequestBody::Empty, Access::Public)
            .await?;

        Ok(records
            .into_iter()
            .filter_map(|record| match serde_json::from_value(record) {
                Ok(event) => Some(event),
                Err(e) => {
                    tracing::warn!("Skipping malformed event record: {}", e);
                    None
                }
            })
            .collect())
    }

    /// Fetch one event
    pub async fn get_event(&self, id: EventId) -> ApiResult<Event> {
        self.call(
            Method::Get,
            &format!("/events/{}", id),
            RequestBody::Empty,
            Access::Public,
        )
        .await
    }

    /// Create an event (organizer)
    pub async fn create_event(&self, form: &EventForm) -> ApiResult<WriteReceipt> {
        self.write(
            Method::Post,
            "/events",
            RequestBody::Multipart(form.to_multipart()),
        )
        .await
    }

    /// Replace an event's fields (organizer)
    pub async fn update_event(&self, id: EventId, form: &EventForm) -> ApiResult<WriteReceipt> {
        self.write(
            Method::Put,
            &format!("/events/{}", id),
            RequestBody::Multipart(form.to_multipart()),
        )
        .await
    }

    /// Delete an event (organizer)
    pub async fn delete_event(&self, id: EventId) -> ApiResult<WriteReceipt> {
        self.write(Method::Delete, &format!("/events/{}", id), RequestBody::Empty)
            .await
    }

    // ============ Profile ============

    /// Fetch the signed-in user's profile
    pub async fn get_profile(&self) -> ApiResult<Profile> {
        self.call(
            Method::Get,
            "/profile",
            RequestBody::Empty,
            Access::Authenticated,
        )
        .await
    }

    /// Submit profile fields; returns the server's updated profile
    pub async fn update_profile(&self, form: MultipartForm) -> ApiResult<Profile> {
        self.call(
            Method::Post,
            "/profile",
            RequestBody::Multipart(form),
            Access::Authenticated,
        )
        .await
    }

    // ============ Accounts ============

    /// Log in and keep the issued token in the auth context
    pub async fn login(&self, credentials: &Credentials) -> ApiResult<LoginResponse> {
        let response: LoginResponse = self
            .call(
                Method::Post,
                "/login",
                json_body(credentials)?,
                Access::Public,
            )
            .await?;

        self.auth.sign_in(&response.token).map_err(|e| ApiError::Auth {
            status: 200,
            message: e.to_string(),
        })?;

        Ok(response)
    }

    /// Create an account
    pub async fn register(&self, registration: &Registration) -> ApiResult<WriteReceipt> {
        self.call(
            Method::Post,
            "/register",
            json_body(registration)?,
            Access::Public,
        )
        .await
    }

    /// Forget the stored token
    pub fn logout(&self) -> Result<(), TokenStoreError> {
        self.auth.sign_out()
    }

    // ============ Bookings ============

    /// Book tickets for an event
    pub async fn create_booking(&self, request: &BookingRequest) -> ApiResult<BookingReceipt> {
        self.call(
            Method::Post,
            "/bookings",
            json_body(request)?,
            Access::Authenticated,
        )
        .await
    }

    /// Booking history of the signed-in user, newest first as the server orders it.
    /// The endpoint path is deployment specific and passed in by the caller.
    pub async fn my_bookings(&self, path: &str) -> ApiResult<Vec<BookingSummary>> {
        let path = if path.starts_with('/') {
            path.to_string()
        } else {
            format!("/{}", path)
        };
        self.call(Method::Get, &path, RequestBody::Empty, Access::Authenticated)
            .await
    }

    // ============ Plumbing ============

    /// Authenticated write whose 2xx body may still carry a rejection
    async fn write(&self, method: Method, path: &str, body: RequestBody) -> ApiResult<WriteReceipt> {
        let value: Value = self.call(method, path, body, Access::Authenticated).await?;

        if let Some(err) = ApiError::from_soft_failure(200, &value) {
            tracing::warn!(
                method = method.as_str(),
                path,
                error_kind = err.kind(),
                "API rejected request: {}",
                err
            );
            return Err(err);
        }

        serde_json::from_value(value).map_err(|e| ApiError::Server {
            status: 200,
            message: format!("Unexpected response body: {}", e),
        })
    }

    async fn call<R: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: RequestBody,
        access: Access,
    ) -> ApiResult<R> {
        let mut headers = vec![("Accept".to_string(), "application/json".to_string())];
        let bearer = match access {
            Access::Authenticated => self.auth.bearer(),
            Access::Public => None,
        };
        let authenticated = bearer.is_some();
        if let Some(value) = bearer {
            headers.push(("Authorization".to_string(), value));
        }

        let request = ApiRequest {
            method,
            url: format!("{}{}", self.base_url, path),
            headers,
            body,
        };

        tracing::debug!(method = method.as_str(), path, authenticated, "API request");

        let response = self.transport.send(request).await.map_err(|e| {
            tracing::warn!(method = method.as_str(), path, "API unreachable: {}", e);
            e
        })?;

        if !response.is_success() {
            let err = ApiError::from_response(response.status, &response.body);
            tracing::warn!(
                method = method.as_str(),
                path,
                status = response.status,
                error_kind = err.kind(),
                "API error response: {}",
                err.message()
            );
            return Err(err);
        }

        serde_json::from_slice(&response.body).map_err(|e| ApiError::Server {
            status: response.status,
            message: format!("Unexpected response body: {}", e),
        })
    }
}

fn json_body<B: Serialize>(body: &B) -> ApiResult<RequestBody> {
    serde_json::to_value(body)
        .map(RequestBody::Json)
        .map_err(|e| ApiError::Validation {
            message: format!("Cannot encode request: {}", e),
            fields: Default::default(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::MemoryTokenStore;
    use crate::form::EventDraft;
    use serde_json::json;
    use std::cell::RefCell;
    use std::collections::VecDeque;

    /// Transport double replaying canned responses and recording requests
    #[derive(Default)]
    struct RecordingTransport {
        pub requests: RefCell<Vec<ApiRequest>>,
        responses: RefCell<VecDeque<ApiResult<ApiResponse>>>,
    }

    impl RecordingTransport {
        pub fn reply(self, status: u16, body: Value) -> Self {
            self.responses.borrow_mut().push_back(Ok(ApiResponse {
                status,
                body: body.to_string().into_bytes(),
            }));
            self
        }

        pub fn fail(self, message: &str) -> Self {
            self.responses
                .borrow_mut()
                .push_back(Err(ApiError::Network(message.to_string())));
            self
        }

        pub fn last(&self) -> ApiRequest {
            self.requests.borrow().last().cloned().expect("no request sent")
        }
    }

    #[async_trait(?Send)]
    impl Transport for RecordingTransport {
        async fn send(&self, request: ApiRequest) -> ApiResult<ApiResponse> {
            self.requests.borrow_mut().push(request);
            self.responses
                .borrow_mut()
                .pop_front()
                .unwrap_or_else(|| Ok(ApiResponse { status: 200, body: b"{}".to_vec() }))
        }
    }

    fn client(transport: RecordingTransport, token: Option<&str>) -> ApiClient<RecordingTransport> {
        let auth = match token {
            Some(t) => AuthContext::new(MemoryTokenStore::with_token(t)),
            None => AuthContext::anonymous(),
        };
        ApiClient::new(transport, auth, "https://tickets.example/api/")
    }

    fn valid_form() -> EventForm {
        EventDraft {
            title: "Konser Indie".to_string(),
            date: "2025-08-17T19:30".to_string(),
            location: "Bandar Lampung".to_string(),
            capacity: "100".to_string(),
            ticket_price: "50000".to_string(),
            ..EventDraft::default()
        }
        .validate()
        .unwrap()
    }

    #[tokio::test]
    async fn test_list_events_is_public() {
        let transport = RecordingTransport::default().reply(
            200,
            json!([{"id": 1, "title": "A"}, {"id": 2, "title": "B"}]),
        );
        let api = client(transport, Some("tok"));

        let events = api.list_events().await.unwrap();
        assert_eq!(events.len(), 2);

        let sent = api.transport().last();
        assert_eq!(sent.method, Method::Get);
        assert_eq!(sent.url, "https://tickets.example/api/events");
        assert_eq!(sent.header("authorization"), None);
    }

    #[tokio::test]
    async fn test_list_events_skips_malformed_records() {
        let transport = RecordingTransport::default().reply(
            200,
            json!([
                {"id": 1, "title": "A", "price": 10, "ticket_price": 10},
                {"title": "no id"},
                {"id": 3, "title": "C"}
            ]),
        );
        let api = client(transport, None);

        let events = api.list_events().await.unwrap();
        let ids: Vec<EventId> = events.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![1, 3]);
        assert_eq!(events[0].price, 10.0);
    }

    #[tokio::test]
    async fn test_write_requests_without_token_have_no_auth_header() {
        let api = client(RecordingTransport::default(), None);

        let _ = api.get_profile().await;
        let _ = api.update_profile(MultipartForm::new().text("name", "Ali")).await;
        let _ = api.create_event(&valid_form()).await;
        let _ = api.update_event(4, &valid_form()).await;
        let _ = api.delete_event(4).await;

        let requests = api.transport().requests.borrow();
        assert_eq!(requests.len(), 5);
        for request in requests.iter() {
            assert_eq!(request.header("Authorization"), None, "{}", request.url);
        }
    }

    #[tokio::test]
    async fn test_write_requests_with_token_carry_exact_bearer() {
        let api = client(RecordingTransport::default(), Some("abc123"));

        let _ = api.get_profile().await;
        let _ = api.update_profile(MultipartForm::new()).await;
        let _ = api.create_event(&valid_form()).await;
        let _ = api.update_event(4, &valid_form()).await;
        let _ = api.delete_event(4).await;

        let requests = api.transport().requests.borrow();
        for request in requests.iter() {
            let auth: Vec<_> = request
                .headers
                .iter()
                .filter(|(k, _)| k.eq_ignore_ascii_case("authorization"))
                .collect();
            assert_eq!(auth.len(), 1);
            assert_eq!(auth[0].1, "Bearer abc123");
        }
    }

    #[tokio::test]
    async fn test_create_event_surfaces_server_message() {
        let transport =
            RecordingTransport::default().reply(400, json!({"message": "Title required"}));
        let api = client(transport, Some("tok"));

        let err = api.create_event(&valid_form()).await.unwrap_err();
        assert_eq!(err.message(), "Title required");
        assert_eq!(err.to_string(), "Title required");
        assert!(matches!(err, ApiError::Validation { .. }));

        let sent = api.transport().last();
        assert_eq!(sent.method, Method::Post);
        assert!(matches!(sent.body, RequestBody::Multipart(_)));
    }

    #[tokio::test]
    async fn test_every_operation_normalizes_errors() {
        let transport = RecordingTransport::default()
            .reply(404, json!({"message": "Event not found"}))
            .reply(500, json!({"error": "db down"}))
            .fail("connection refused")
            .reply(401, json!({"message": "Missing Token"}));
        let api = client(transport, None);

        assert_eq!(
            api.get_event(99).await.unwrap_err(),
            ApiError::NotFound("Event not found".to_string())
        );
        assert_eq!(
            api.list_events().await.unwrap_err(),
            ApiError::Server {
                status: 500,
                message: "db down".to_string()
            }
        );
        assert!(matches!(
            api.delete_event(1).await.unwrap_err(),
            ApiError::Network(_)
        ));
        assert!(api.get_profile().await.unwrap_err().is_auth());
    }

    #[tokio::test]
    async fn test_soft_auth_failure_on_write() {
        let transport = RecordingTransport::default().reply(200, json!({"message": "Forbidden"}));
        let api = client(transport, Some("user-token"));

        let err = api.delete_event(3).await.unwrap_err();
        assert!(err.is_auth());
        assert_eq!(err.message(), "Forbidden");
    }

    #[tokio::test]
    async fn test_successful_write_receipt() {
        let transport = RecordingTransport::default().reply(
            200,
            json!({"message": "Event created successfully", "id": 12, "image_url": null}),
        );
        let api = client(transport, Some("tok"));

        let receipt = api.create_event(&valid_form()).await.unwrap();
        assert_eq!(receipt.id, Some(12));
        assert_eq!(api.transport().last().url, "https://tickets.example/api/events");
    }

    #[tokio::test]
    async fn test_update_and_delete_target_the_event() {
        let api = client(RecordingTransport::default(), Some("tok"));

        api.update_event(7, &valid_form()).await.unwrap();
        let sent = api.transport().last();
        assert_eq!(sent.method, Method::Put);
        assert_eq!(sent.url, "https://tickets.example/api/events/7");

        api.delete_event(7).await.unwrap();
        let sent = api.transport().last();
        assert_eq!(sent.method, Method::Delete);
        assert_eq!(sent.body, RequestBody::Empty);
    }

    #[tokio::test]
    async fn test_profile_is_returned_verbatim() {
        let body = json!({"name": "Ali", "email": "ali@gmail.com", "avatar": null});
        let transport = RecordingTransport::default().reply(200, body.clone());
        let api = client(transport, Some("tok"));

        let profile = api.get_profile().await.unwrap();
        assert_eq!(serde_json::to_value(&profile).unwrap(), body);
    }

    #[tokio::test]
    async fn test_login_stores_token_for_later_requests() {
        let transport = RecordingTransport::default()
            .reply(200, json!({"message": "Login success", "token": "jwt-1", "role": "admin", "name": "Ali"}))
            .reply(200, json!({"name": "Ali"}));
        let api = client(transport, None);

        let response = api
            .login(&Credentials {
                identifier: "ali@gmail.com".to_string(),
                password: "secret".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(response.role.as_deref(), Some("admin"));

        let login_request = api.transport().last();
        assert_eq!(login_request.header("Authorization"), None);
        assert_eq!(
            login_request.body,
            RequestBody::Json(json!({"identifier": "ali@gmail.com", "password": "secret"}))
        );

        api.get_profile().await.unwrap();
        assert_eq!(
            api.transport().last().header("Authorization"),
            Some("Bearer jwt-1")
        );

        api.logout().unwrap();
        assert!(!api.auth().is_signed_in());
    }

    #[tokio::test]
    async fn test_failed_login_keeps_previous_state() {
        let transport = RecordingTransport::default()
            .reply(401, json!({"message": "Invalid username/email or password"}));
        let api = client(transport, None);

        let err = api
            .login(&Credentials {
                identifier: "ali".to_string(),
                password: "wrong".to_string(),
            })
            .await
            .unwrap_err();

        assert_eq!(err.message(), "Invalid username/email or password");
        assert!(!api.auth().is_signed_in());
    }

    #[tokio::test]
    async fn test_booking_is_authenticated_json() {
        let transport = RecordingTransport::default().reply(
            200,
            json!({"message": "Booking successful!", "booking_id": 5, "booking_code": "TK-5", "total_price": 150000.0}),
        );
        let api = client(transport, Some("tok"));

        let receipt = api
            .create_booking(&BookingRequest {
                event_id: 3,
                quantity: 2,
            })
            .await
            .unwrap();
        assert_eq!(receipt.booking_code.as_deref(), Some("TK-5"));

        let sent = api.transport().last();
        assert_eq!(sent.url, "https://tickets.example/api/bookings");
        assert_eq!(sent.header("Authorization"), Some("Bearer tok"));
        assert_eq!(
            sent.body,
            RequestBody::Json(json!({"event_id": 3, "quantity": 2}))
        );
    }

    #[tokio::test]
    async fn test_my_bookings_uses_given_path() {
        let transport = RecordingTransport::default().reply(
            200,
            json!([{"id": 5, "booking_code": "TK-5", "event_title": "Konser", "quantity": 2, "total_price": 100000.0}]),
        );
        let api = client(transport, Some("tok"));

        let bookings = api.my_bookings("history").await.unwrap();
        assert_eq!(bookings.len(), 1);
        assert_eq!(bookings[0].booking_code, "TK-5");

        let sent = api.transport().last();
        assert_eq!(sent.method, Method::Get);
        assert_eq!(sent.url, "https://tickets.example/api/history");
        assert_eq!(sent.header("Authorization"), Some("Bearer tok"));
    }

    #[tokio::test]
    async fn test_my_bookings_unauthorized() {
        let transport = RecordingTransport::default()
            .reply(401, json!({"message": "Token missing or invalid"}));
        let api = client(transport, None);

        let err = api.my_bookings("/history").await.unwrap_err();
        assert!(err.is_auth());
    }

    #[tokio::test]
    async fn test_undecodable_body_is_server_error() {
        let transport = RecordingTransport::default().reply(200, json!({"unexpected": true}));
        let api = client(transport, None);

        let err = api.list_events().await.unwrap_err();
        assert!(matches!(err, ApiError::Server { status: 200, .. }));
    }
}
