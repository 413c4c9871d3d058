//! Request payload and response shaping types.

use bytes::Bytes;
use reqwest::header::HeaderMap;
use reqwest::multipart;

use crate::Result;

/// Response handling hint for GET requests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ResponseType {
    #[default]
    Json,
    Blob,
}

/// Options accepted by [`ApiClient::get_with`](crate::ApiClient::get_with).
#[derive(Debug, Clone, Copy, Default)]
pub struct GetOptions {
    pub response_type: ResponseType,
}

impl GetOptions {
    pub fn blob() -> Self {
        Self {
            response_type: ResponseType::Blob,
        }
    }
}

/// A multipart form body that can be materialized more than once.
///
/// `reqwest::multipart::Form` is consumed on send, but the 401 retry has to
/// reissue the identical request, so the client keeps the named parts and
/// builds a fresh form per attempt.
#[derive(Debug, Clone, Default)]
pub struct FormPayload {
    parts: Vec<FormPart>,
}

#[derive(Debug, Clone)]
struct FormPart {
    name: String,
    value: PartValue,
}

#[derive(Debug, Clone)]
enum PartValue {
    Text(String),
    File {
        bytes: Bytes,
        file_name: String,
        mime: Option<String>,
    },
}

impl FormPayload {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a plain text field.
    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.parts.push(FormPart {
            name: name.into(),
            value: PartValue::Text(value.into()),
        });
        self
    }

    /// Append a file part. The transport picks the content type.
    pub fn file(
        self,
        name: impl Into<String>,
        file_name: impl Into<String>,
        bytes: impl Into<Bytes>,
    ) -> Self {
        self.file_inner(name.into(), file_name.into(), bytes.into(), None)
    }

    /// Append a file part with an explicit mime type.
    pub fn file_with_mime(
        self,
        name: impl Into<String>,
        file_name: impl Into<String>,
        bytes: impl Into<Bytes>,
        mime: impl Into<String>,
    ) -> Self {
        self.file_inner(name.into(), file_name.into(), bytes.into(), Some(mime.into()))
    }

    fn file_inner(
        mut self,
        name: String,
        file_name: String,
        bytes: Bytes,
        mime: Option<String>,
    ) -> Self {
        self.parts.push(FormPart {
            name,
            value: PartValue::File {
                bytes,
                file_name,
                mime,
            },
        });
        self
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Materialize a fresh `reqwest` form for one attempt.
    pub(crate) fn to_form(&self) -> Result<multipart::Form> {
        let mut form = multipart::Form::new();
        for part in &self.parts {
            form = match &part.value {
                PartValue::Text(value) => form.text(part.name.clone(), value.clone()),
                PartValue::File {
                    bytes,
                    file_name,
                    mime,
                } => {
                    let mut p = multipart::Part::bytes(bytes.to_vec()).file_name(file_name.clone());
                    if let Some(mime) = mime {
                        p = p.mime_str(mime)?;
                    }
                    form.part(part.name.clone(), p)
                }
            };
        }
        Ok(form)
    }
}

/// Binary response body together with its headers.
///
/// Produced only for multipart uploads that ask for blob handling; see
/// [`ApiClient::post_form_blob`](crate::ApiClient::post_form_blob).
#[derive(Debug)]
pub struct BlobResponse {
    pub data: Bytes,
    pub headers: HeaderMap,
}
