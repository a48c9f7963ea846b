//! Native HTTP Transport
//!
//! [`Transport`] implementation on top of reqwest, used by the CLI.

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use std::time::Duration;

use super::{ApiRequest, ApiResponse, Method, RequestBody, Transport};
use crate::error::{ApiError, ApiResult};
use crate::form::{MultipartForm, PartValue};

/// reqwest-backed transport
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Create a transport with a per-request timeout
    pub fn new(timeout: Duration) -> ApiResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("tiketin/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ApiError::Network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }

    /// Wrap an existing reqwest client
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait(?Send)]
impl Transport for ReqwestTransport {
    async fn send(&self, request: ApiRequest) -> ApiResult<ApiResponse> {
        let method = match request.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        };

        let mut builder = self.client.request(method, &request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        builder = match request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.json(&value),
            RequestBody::Multipart(form) => builder.multipart(to_reqwest_form(&form)?),
        };

        let response = builder.send().await.map_err(network_error)?;
        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(network_error)?;

        Ok(ApiResponse {
            status,
            body: body.to_vec(),
        })
    }
}

fn to_reqwest_form(form: &MultipartForm) -> ApiResult<Form> {
    let mut out = Form::new();

    for part in form.parts() {
        out = match &part.value {
            PartValue::Text(value) => out.text(part.name.clone(), value.clone()),
            PartValue::File {
                file_name,
                mime_type,
                bytes,
            } => {
                let file = Part::bytes(bytes.clone())
                    .file_name(file_name.clone())
                    .mime_str(mime_type)
                    .map_err(|e| {
                        let mut fields = std::collections::BTreeMap::new();
                        fields.insert(part.name.clone(), format!("Invalid file type: {}", e));
                        ApiError::invalid_fields(fields)
                    })?;
                out.part(part.name.clone(), file)
            }
        };
    }

    Ok(out)
}

fn network_error(e: reqwest::Error) -> ApiError {
    if e.is_timeout() {
        ApiError::Network("Request timed out".to_string())
    } else if e.is_connect() {
        ApiError::Network(format!("Cannot connect to API: {}", e))
    } else {
        ApiError::Network(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{AuthContext, MemoryTokenStore};
    use crate::client::ApiClient;
    use crate::form::{EventDraft, FileUpload};
    use serde_json::json;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn transport() -> ReqwestTransport {
        ReqwestTransport::new(Duration::from_secs(5)).unwrap()
    }

    fn events(count: u64) -> serde_json::Value {
        json!((1..=count)
            .map(|i| json!({"id": i, "title": format!("Event {}", i), "ticket_price": 10000}))
            .collect::<Vec<_>>())
    }

    #[tokio::test]
    async fn test_fetch_sixteen_events_into_two_pages() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/events"))
            .respond_with(ResponseTemplate::new(200).set_body_json(events(16)))
            .expect(1)
            .mount(&server)
            .await;

        let api = ApiClient::new(
            transport(),
            AuthContext::anonymous(),
            format!("{}/api", server.uri()),
        );
        let mut catalog = crate::catalog::Catalog::new(api.list_events().await.unwrap());

        assert_eq!(catalog.page_count(), 2);
        assert_eq!(catalog.page_items().len(), 15);
        catalog.next_page();
        assert_eq!(catalog.page_items().len(), 1);
    }

    #[tokio::test]
    async fn test_profile_without_token_sends_no_authorization() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/profile"))
            .respond_with(
                ResponseTemplate::new(401).set_body_json(json!({"message": "Missing Token"})),
            )
            .mount(&server)
            .await;

        let api = ApiClient::new(
            transport(),
            AuthContext::anonymous(),
            format!("{}/api", server.uri()),
        );
        let err = api.get_profile().await.unwrap_err();
        assert!(err.is_auth());

        let received = server.received_requests().await.unwrap();
        assert_eq!(received.len(), 1);
        assert!(received[0].headers.get("authorization").is_none());
    }

    #[tokio::test]
    async fn test_profile_with_token_sends_bearer() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/profile"))
            .and(header("Authorization", "Bearer jwt-42"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"name": "Ali"})))
            .expect(1)
            .mount(&server)
            .await;

        let api = ApiClient::new(
            transport(),
            AuthContext::new(MemoryTokenStore::with_token("jwt-42")),
            format!("{}/api", server.uri()),
        );
        let profile = api.get_profile().await.unwrap();
        assert_eq!(profile.name(), Some("Ali"));
    }

    #[tokio::test]
    async fn test_create_event_sends_multipart_and_surfaces_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/events"))
            .respond_with(
                ResponseTemplate::new(400).set_body_json(json!({"message": "Title required"})),
            )
            .mount(&server)
            .await;

        let api = ApiClient::new(
            transport(),
            AuthContext::new(MemoryTokenStore::with_token("organizer")),
            format!("{}/api/", server.uri()),
        );
        let form = EventDraft {
            title: "Workshop Foto".to_string(),
            date: "2025-10-01T09:00".to_string(),
            location: "Metro".to_string(),
            capacity: "30".to_string(),
            ticket_price: "100000".to_string(),
            image: Some(FileUpload::new("poster.png", None, vec![137, 80, 78, 71])),
            ..EventDraft::default()
        }
        .validate()
        .unwrap();

        let err = api.create_event(&form).await.unwrap_err();
        assert_eq!(err.message(), "Title required");

        let received = server.received_requests().await.unwrap();
        let request = &received[0];
        let content_type = request
            .headers
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default();
        assert!(content_type.starts_with("multipart/form-data; boundary="));

        let body = String::from_utf8_lossy(&request.body);
        assert!(body.contains("name=\"title\""));
        assert!(body.contains("Workshop Foto"));
        assert!(body.contains("filename=\"poster.png\""));
        assert_eq!(
            request
                .headers
                .get("authorization")
                .and_then(|v| v.to_str().ok()),
            Some("Bearer organizer")
        );
    }

    #[tokio::test]
    async fn test_unreachable_server_is_network_error() {
        // Nothing listens on port 9 (discard) on test machines
        let api = ApiClient::new(
            ReqwestTransport::new(Duration::from_millis(500)).unwrap(),
            AuthContext::anonymous(),
            "http://127.0.0.1:9/api",
        );

        let err = api.list_events().await.unwrap_err();
        assert!(matches!(err, ApiError::Network(_)));
    }
}
