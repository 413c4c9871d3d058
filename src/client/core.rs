//! Request/response pipeline for the ProductFinder API.
//!
//! Every verb funnels through one path: build the request, stamp a fresh
//! trace header, retry once on 401, short-circuit 403, normalize any other
//! failure, parse the success body.

use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::client::builder::ApiClientBuilder;
use crate::client::payload::{BlobResponse, FormPayload, GetOptions, ResponseType};
use crate::trace::{TraceContext, TRACEPARENT};
use crate::{Error, Result};

const UNKNOWN_ERROR: &str = "Unknown error";

/// HTTP client for the ProductFinder backend.
///
/// Owns the base URL and the underlying connection pool (cookie store
/// enabled, so session credentials accompany every call). Cloning is cheap
/// and shares the pool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

/// Request body, tracked through the pipeline because error normalization
/// and response shaping both key on form-ness.
enum Body {
    Empty,
    Json(serde_json::Value),
    Form(FormPayload),
}

impl Body {
    fn is_form(&self) -> bool {
        matches!(self, Body::Form(_))
    }
}

impl ApiClient {
    /// Create a client with default transport settings.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        ApiClientBuilder::new(base_url).build()
    }

    pub(crate) fn from_parts(http: reqwest::Client, base_url: String) -> Self {
        Self { http, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET `path` and parse the JSON response.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.get_with(path, GetOptions::default()).await
    }

    /// GET with an explicit response-type hint.
    ///
    /// Blob shaping is keyed on the request being multipart (see
    /// [`ApiClient::post_form_blob`]); a blob hint on a plain GET still
    /// parses the body as JSON.
    pub async fn get_with<T: DeserializeOwned>(
        &self,
        path: &str,
        options: GetOptions,
    ) -> Result<T> {
        if options.response_type == ResponseType::Blob {
            debug!(path, "blob response hint ignored for non-multipart request");
        }
        let res = self.dispatch(Method::GET, path, &Body::Empty).await?;
        Ok(res.json().await?)
    }

    /// POST a JSON body and parse the JSON response.
    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send_json(Method::POST, path, body).await
    }

    /// PUT a JSON body and parse the JSON response.
    pub async fn put<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send_json(Method::PUT, path, body).await
    }

    /// PATCH a JSON body and parse the JSON response.
    pub async fn patch<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send_json(Method::PATCH, path, body).await
    }

    /// POST a multipart form and parse the JSON response.
    pub async fn post_form<T: DeserializeOwned>(
        &self,
        path: &str,
        form: &FormPayload,
    ) -> Result<T> {
        self.send_form(Method::POST, path, form).await
    }

    /// PUT a multipart form and parse the JSON response.
    pub async fn put_form<T: DeserializeOwned>(&self, path: &str, form: &FormPayload) -> Result<T> {
        self.send_form(Method::PUT, path, form).await
    }

    /// PATCH a multipart form and parse the JSON response.
    pub async fn patch_form<T: DeserializeOwned>(
        &self,
        path: &str,
        form: &FormPayload,
    ) -> Result<T> {
        self.send_form(Method::PATCH, path, form).await
    }

    /// POST a multipart form and return the raw response body with its
    /// headers. This is the only path with blob shaping.
    pub async fn post_form_blob(&self, path: &str, form: &FormPayload) -> Result<BlobResponse> {
        let body = Body::Form(form.clone());
        let res = self.dispatch(Method::POST, path, &body).await?;
        let headers = res.headers().clone();
        let data = res.bytes().await?;
        Ok(BlobResponse { data, headers })
    }

    /// DELETE the resource at `path`. Any response body is ignored.
    pub async fn delete(&self, path: &str) -> Result<()> {
        let url = format!("{}{}", self.base_url, path);
        debug!(url = url.as_str(), "calling ProductFinder API");

        self.dispatch(Method::DELETE, path, &Body::Empty).await?;

        debug!(url = url.as_str(), "successful call to ProductFinder API");
        Ok(())
    }

    async fn send_json<B, T>(&self, method: Method, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = Body::Json(serde_json::to_value(body)?);
        let res = self.dispatch(method, path, &body).await?;
        Ok(res.json().await?)
    }

    async fn send_form<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        form: &FormPayload,
    ) -> Result<T> {
        let body = Body::Form(form.clone());
        let res = self.dispatch(method, path, &body).await?;
        Ok(res.json().await?)
    }

    /// One pipeline for every verb: 401 retry, 403 short-circuit, error
    /// normalization.
    async fn dispatch(
        &self,
        method: Method,
        path: &str,
        body: &Body,
    ) -> Result<reqwest::Response> {
        let url = format!("{}{}", self.base_url, path);

        let mut res = self.send_attempt(method.clone(), &url, body).await?;

        if res.status() == StatusCode::UNAUTHORIZED {
            // One retry with a fresh trace context. Whatever it returns is
            // final; no further retries.
            warn!(url = url.as_str(), "unauthorized response, retrying once");
            res = self.send_attempt(method, &url, body).await?;
        }

        if res.status() == StatusCode::FORBIDDEN {
            return Err(Error::AccessDenied);
        }

        if !res.status().is_success() {
            return Err(self.normalize_error(res, body.is_form()).await);
        }

        Ok(res)
    }

    /// A single network attempt with its own trace context.
    async fn send_attempt(
        &self,
        method: Method,
        url: &str,
        body: &Body,
    ) -> Result<reqwest::Response> {
        let trace = TraceContext::generate();
        let req = self
            .http
            .request(method, url)
            .header(TRACEPARENT, trace.header_value());

        let req = match body {
            // Content type is set even without a body; only multipart
            // requests leave it to the transport (boundary parameter).
            Body::Empty => req.header(reqwest::header::CONTENT_TYPE, "application/json"),
            Body::Json(value) => req.json(value),
            Body::Form(form) => req.multipart(form.to_form()?),
        };

        Ok(req.send().await?)
    }

    /// Build the normalized error for a non-success response.
    async fn normalize_error(&self, res: reqwest::Response, was_form: bool) -> Error {
        let status = res.status();
        let status_text = status.canonical_reason().unwrap_or("").to_string();
        info!(
            http_status = status.as_u16(),
            url = res.url().as_str(),
            "ProductFinder request failed"
        );

        let message = if was_form {
            // Binary error bodies: best-effort stringification.
            match res.bytes().await {
                Ok(bytes) => String::from_utf8(bytes.to_vec())
                    .unwrap_or_else(|_| UNKNOWN_ERROR.to_string()),
                Err(_) => UNKNOWN_ERROR.to_string(),
            }
        } else {
            match res.json::<serde_json::Value>().await {
                Ok(body) => extract_message(&body),
                Err(_) => UNKNOWN_ERROR.to_string(),
            }
        };

        Error::Api {
            status: status.as_u16(),
            status_text,
            message,
        }
    }
}

/// `message` may be a plain string or a list of strings (validation
/// errors); take the string verbatim, or the first list element.
fn extract_message(body: &serde_json::Value) -> String {
    match body.get("message") {
        Some(serde_json::Value::String(s)) => s.clone(),
        Some(serde_json::Value::Array(items)) => items
            .first()
            .and_then(|v| v.as_str())
            .map(str::to_string)
            .unwrap_or_else(|| UNKNOWN_ERROR.to_string()),
        _ => UNKNOWN_ERROR.to_string(),
    }
}
