use http::StatusCode;

use crate::types::ServiceError;

/// Maps a service error's semantic flags to an HTTP status code, inferring
/// it the same way the framework core does.
///
/// First match wins, and the order is load-bearing: a fault must dominate
/// every other flag so callers never retry an internal defect as if it were
/// a client error.
pub fn status_for_flags(fault: bool, timeout: bool, temporary: bool) -> StatusCode {
    if fault {
        return StatusCode::INTERNAL_SERVER_ERROR;
    }
    if timeout {
        if temporary {
            return StatusCode::GATEWAY_TIMEOUT;
        }
        return StatusCode::REQUEST_TIMEOUT;
    }
    if temporary {
        return StatusCode::SERVICE_UNAVAILABLE;
    }
    StatusCode::BAD_REQUEST
}

impl ServiceError {
    /// The HTTP status implied by this error's fault/timeout/temporary flags.
    pub fn status_code(&self) -> StatusCode {
        status_for_flags(self.fault, self.timeout, self.temporary)
    }
}
