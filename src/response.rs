use http::StatusCode;
use serde::{Deserialize, Serialize};

/// One reportable error in a JSON API response body.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ErrorInstance {
    /// Short human-readable summary. Always emitted, even when empty.
    pub title: String,
    /// Longer explanation, when one can be surfaced safely.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    /// Opaque identifier correlating this instance to server-side diagnostics.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Machine-readable error code, if the source carried one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

/// A full JSON API error reply: an ordered list of error instances plus the
/// HTTP status the hosting framework should write.
///
/// Value semantics throughout: `add`/`add_error` consume the response and
/// return an updated one, so concurrent requests never share mutable state.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Response {
    pub errors: Vec<ErrorInstance>,
    /// Transport metadata only; `None` means the caller must supply one.
    /// Never part of the serialized body.
    #[serde(skip)]
    pub status: Option<StatusCode>,
}

impl Response {
    /// Appends an instance carrying only `title`.
    pub fn add_error(self, title: impl Into<String>) -> Self {
        self.add(ErrorInstance {
            title: title.into(),
            ..Default::default()
        })
    }

    /// Appends a pre-built instance.
    pub fn add(mut self, instance: ErrorInstance) -> Self {
        self.errors.push(instance);
        self
    }

    /// Replaces the out-of-band HTTP status.
    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status = Some(status);
        self
    }

    /// Serializes to the canonical wire form `{"errors":[...]}`, omitting
    /// absent optional fields and the status entirely.
    ///
    /// Panics if serialization fails. The model holds nothing but strings,
    /// so that is unreachable by construction; hitting it is a programming
    /// error, not a runtime condition to recover from.
    #[expect(clippy::expect_used, reason = "serialization is infallible by construction")]
    pub fn must_serialize(&self) -> Vec<u8> {
        serde_json::to_vec(self).expect("error response failed to serialize")
    }

    /// The canonical single-error response for unrecognized failures:
    /// title "Unexpected error", optional correlation id, status 500.
    pub fn unexpected_error(id: Option<String>) -> Self {
        Self {
            errors: vec![ErrorInstance {
                title: "Unexpected error".to_string(),
                id,
                ..Default::default()
            }],
            status: Some(StatusCode::INTERNAL_SERVER_ERROR),
        }
    }
}
