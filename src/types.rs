/// A trusted error produced by the RPC framework's validation machinery.
///
/// Unlike arbitrary errors, a `ServiceError` is expected to carry only
/// information that is safe to surface to clients — with one exception:
/// when `fault` is set the message may contain internal diagnostic detail
/// and must be masked before it reaches a response body.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[error("{name}: {message}")]
pub struct ServiceError {
    /// Stable error name (e.g. `"missing_field"`), used as the response title.
    pub name: String,
    /// Opaque identifier correlating this error to server-side diagnostics.
    pub id: String,
    /// Human-readable description of the failure.
    pub message: String,
    /// The failure stems from an internal defect rather than caller misuse.
    pub fault: bool,
    /// The failure was caused by a timeout.
    pub timeout: bool,
    /// The failure is transient and may succeed on retry.
    pub temporary: bool,
}

impl ServiceError {
    /// A caller-misuse error with no fault/timeout/temporary semantics.
    pub fn new(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id: new_error_id(),
            message: message.into(),
            fault: false,
            timeout: false,
            temporary: false,
        }
    }

    /// An internal-defect error. Its message is masked on output.
    pub fn fault(message: impl Into<String>) -> Self {
        Self {
            fault: true,
            ..Self::new("fault", message)
        }
    }

    /// A transient error the caller may retry immediately.
    pub fn temporary(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            temporary: true,
            ..Self::new(name, message)
        }
    }

    /// A timeout the caller should not blindly retry.
    pub fn permanent_timeout(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            timeout: true,
            ..Self::new(name, message)
        }
    }

    /// A timeout worth retrying after a backoff.
    pub fn temporary_timeout(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            timeout: true,
            temporary: true,
            ..Self::new(name, message)
        }
    }
}

/// Returns a fresh opaque identifier with no embedded semantic content,
/// suitable for correlating a client-visible error with server-side logs.
pub fn new_error_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}
