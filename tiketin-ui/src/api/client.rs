//! HTTP API Client
//!
//! gloo-net transport and `localStorage` token store for the shared
//! [`tiketin::ApiClient`].

use async_trait::async_trait;
use gloo_net::http::{Method as HttpMethod, RequestBuilder};
use wasm_bindgen::JsValue;

use tiketin::{
    ApiClient, ApiError, ApiRequest, ApiResponse, ApiResult, AuthContext, Method, MultipartForm,
    PartValue, RequestBody, TokenStore, TokenStoreError, Transport, DEFAULT_API_BASE, TOKEN_KEY,
};

/// localStorage key overriding the API base URL
pub const API_URL_KEY: &str = "tiketin_api_url";

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok()?
}

/// Get the API base URL from local storage or use default
pub fn get_api_base() -> String {
    let stored = local_storage().and_then(|s| s.get_item(API_URL_KEY).ok().flatten());
    normalize_base(stored.as_deref())
}

fn normalize_base(stored: Option<&str>) -> String {
    match stored.map(str::trim) {
        Some(url) if !url.is_empty() => url.trim_end_matches('/').to_string(),
        _ => DEFAULT_API_BASE.to_string(),
    }
}

/// Bearer token kept in `localStorage` under `token`
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalStorageTokenStore;

impl TokenStore for LocalStorageTokenStore {
    fn load(&self) -> Option<String> {
        local_storage()?.get_item(TOKEN_KEY).ok().flatten()
    }

    fn save(&self, token: &str) -> Result<(), TokenStoreError> {
        let storage = local_storage()
            .ok_or_else(|| TokenStoreError::Unavailable("localStorage".to_string()))?;
        storage
            .set_item(TOKEN_KEY, token)
            .map_err(|e| TokenStoreError::Write(js_error(&e)))
    }

    fn clear(&self) -> Result<(), TokenStoreError> {
        let storage = local_storage()
            .ok_or_else(|| TokenStoreError::Unavailable("localStorage".to_string()))?;
        storage
            .remove_item(TOKEN_KEY)
            .map_err(|e| TokenStoreError::Write(js_error(&e)))
    }
}

/// Auth context over the browser token store
pub fn auth() -> AuthContext {
    AuthContext::new(LocalStorageTokenStore)
}

/// API client for the current page
pub fn api() -> ApiClient<GlooTransport> {
    ApiClient::new(GlooTransport, auth(), get_api_base())
}

/// fetch-based transport
#[derive(Debug, Default, Clone, Copy)]
pub struct GlooTransport;

#[async_trait(?Send)]
impl Transport for GlooTransport {
    async fn send(&self, request: ApiRequest) -> ApiResult<ApiResponse> {
        let method = match request.method {
            Method::Get => HttpMethod::GET,
            Method::Post => HttpMethod::POST,
            Method::Put => HttpMethod::PUT,
            Method::Delete => HttpMethod::DELETE,
        };

        let mut builder = RequestBuilder::new(&request.url).method(method);
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }

        let prepared = match &request.body {
            RequestBody::Empty => builder.build(),
            RequestBody::Json(value) => builder.json(value),
            // The browser sets the multipart boundary itself
            RequestBody::Multipart(form) => builder.body(to_form_data(form)?),
        }
        .map_err(|e| ApiError::Network(format!("Request build error: {}", e)))?;

        let response = prepared
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        let status = response.status();
        let body = response
            .binary()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Ok(ApiResponse { status, body })
    }
}

fn to_form_data(form: &MultipartForm) -> ApiResult<web_sys::FormData> {
    let data = web_sys::FormData::new().map_err(form_error)?;

    for part in form.parts() {
        match &part.value {
            PartValue::Text(value) => data.append_with_str(&part.name, value),
            PartValue::File {
                file_name,
                mime_type,
                bytes,
            } => {
                let blob = to_blob(bytes, mime_type)?;
                data.append_with_blob_and_filename(&part.name, &blob, file_name)
            }
        }
        .map_err(form_error)?;
    }

    Ok(data)
}

fn to_blob(bytes: &[u8], mime_type: &str) -> ApiResult<web_sys::Blob> {
    let chunks = js_sys::Array::of1(&js_sys::Uint8Array::from(bytes));
    let options = web_sys::BlobPropertyBag::new();
    options.set_type(mime_type);
    web_sys::Blob::new_with_u8_array_sequence_and_options(&chunks, &options).map_err(form_error)
}

fn form_error(e: JsValue) -> ApiError {
    ApiError::Network(format!("Failed to build form data: {}", js_error(&e)))
}

fn js_error(e: &JsValue) -> String {
    e.as_string().unwrap_or_else(|| format!("{:?}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_base() {
        assert_eq!(normalize_base(None), DEFAULT_API_BASE);
        assert_eq!(normalize_base(Some("  ")), DEFAULT_API_BASE);
        assert_eq!(
            normalize_base(Some("http://localhost:5000/api/")),
            "http://localhost:5000/api"
        );
    }
}
