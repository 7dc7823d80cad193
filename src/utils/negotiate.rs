//! Response content negotiation between JSON and XML.

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{ser::SerializeStruct, Serialize, Serializer};

use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseFormat {
    Json,
    Xml,
}

impl ResponseFormat {
    /// Picks the format from an `Accept` header value, honouring q-values.
    /// A missing or empty header means JSON; `None` means nothing we can produce.
    pub fn from_accept(accept: Option<&str>) -> Option<Self> {
        let accept = match accept.map(str::trim) {
            Some(accept) if !accept.is_empty() => accept,
            _ => return Some(ResponseFormat::Json),
        };

        let mut ranges: Vec<(String, f32)> = accept
            .split(',')
            .filter_map(|range| {
                let mut parts = range.split(';');
                let media = parts.next()?.trim().to_ascii_lowercase();
                let q = parts
                    .filter_map(|p| p.trim().strip_prefix("q="))
                    .find_map(|q| q.parse::<f32>().ok())
                    .unwrap_or(1.0);
                (!media.is_empty() && q > 0.0).then_some((media, q))
            })
            .collect();
        ranges.sort_by(|a, b| b.1.total_cmp(&a.1));

        ranges.iter().find_map(|(media, _)| match media.as_str() {
            "application/json" | "text/json" | "application/problem+json" | "application/*"
            | "*/*" => Some(ResponseFormat::Json),
            "application/xml" | "text/xml" => Some(ResponseFormat::Xml),
            _ => None,
        })
    }
}

impl<S> FromRequestParts<S> for ResponseFormat
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let accept = parts
            .headers
            .get(header::ACCEPT)
            .and_then(|v| v.to_str().ok());
        ResponseFormat::from_accept(accept).ok_or(AppError::NotAcceptable)
    }
}

/// A response body rendered in the negotiated format.
pub struct Negotiated<T> {
    format: ResponseFormat,
    status: StatusCode,
    root: &'static str,
    item: Option<&'static str>,
    body: T,
}

impl<T: Serialize> Negotiated<T> {
    /// Single object; `root` names the XML document element.
    pub fn new(format: ResponseFormat, root: &'static str, body: T) -> Self {
        Self {
            format,
            status: StatusCode::OK,
            root,
            item: None,
            body,
        }
    }

    /// Sequence body; XML wraps each element in `item` under `root`.
    pub fn list(format: ResponseFormat, root: &'static str, item: &'static str, body: T) -> Self {
        Self {
            format,
            status: StatusCode::OK,
            root,
            item: Some(item),
            body,
        }
    }

    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }
}

struct XmlSequence<'a, T> {
    tag: &'static str,
    items: &'a T,
}

impl<T: Serialize> Serialize for XmlSequence<'_, T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("XmlSequence", 1)?;
        state.serialize_field(self.tag, self.items)?;
        state.end()
    }
}

impl<T: Serialize> IntoResponse for Negotiated<T> {
    fn into_response(self) -> Response {
        match self.format {
            ResponseFormat::Json => (self.status, Json(self.body)).into_response(),
            ResponseFormat::Xml => {
                let rendered = match self.item {
                    Some(tag) => quick_xml::se::to_string_with_root(
                        self.root,
                        &XmlSequence {
                            tag,
                            items: &self.body,
                        },
                    ),
                    None => quick_xml::se::to_string_with_root(self.root, &self.body),
                };
                match rendered {
                    Ok(xml) => (
                        self.status,
                        [(
                            header::CONTENT_TYPE,
                            HeaderValue::from_static("application/xml; charset=utf-8"),
                        )],
                        xml,
                    )
                        .into_response(),
                    Err(e) => AppError::Internal(format!("Failed to render XML: {}", e))
                        .into_response(),
                }
            }
        }
    }
}
