use std::error::Error as StdError;

use http::StatusCode;

use crate::envelope::{self, EnvelopeRegistry};
use crate::response::{ErrorInstance, Response};
use crate::types::{ServiceError, new_error_id};

/// Which of the three classification tiers handled an error.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    strum_macros::Display,
    strum_macros::EnumString,
    strum_macros::AsRefStr,
)]
#[strum(serialize_all = "lowercase")]
pub enum ErrorTier {
    /// A trusted [`ServiceError`] from the framework's validation machinery.
    Service,
    /// A structurally detected generated-error container.
    Generated,
    /// Everything else: reduced to a single opaque instance.
    Unknown,
}

type IdGenerator = Box<dyn Fn() -> String + Send + Sync>;

/// Reduces arbitrary error values to the uniform JSON API response shape.
///
/// Using this as the hosting framework's error formatter bypasses both its
/// generic error handling and the generated serialization for designed
/// types: service errors keep their validation information, containers that
/// look like generated JSON API errors are mapped across, and everything
/// else becomes a generic response that leaks nothing.
///
/// Logging of unhandled errors is assumed to be dealt with by a separate
/// component; only the correlation id is recorded here.
pub struct ErrorFormatter {
    registry: EnvelopeRegistry,
    id_generator: IdGenerator,
}

impl Default for ErrorFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ErrorFormatter {
    pub fn new() -> Self {
        Self {
            registry: EnvelopeRegistry::new(),
            id_generator: Box::new(new_error_id),
        }
    }

    /// Replaces the opaque-identifier generator used for unknown errors.
    /// The generator must be safe for concurrent invocation.
    pub fn with_id_generator(
        mut self,
        generator: impl Fn() -> String + Send + Sync + 'static,
    ) -> Self {
        self.id_generator = Box::new(generator);
        self
    }

    /// Registers a generated-error container type for structural detection.
    pub fn register_envelope<T>(mut self) -> Self
    where
        T: StdError + serde::Serialize + Send + Sync + 'static,
    {
        self.registry.register::<T>();
        self
    }

    /// The tier `format` would classify `err` into, without building the
    /// response.
    pub fn tier(&self, err: &(dyn StdError + 'static)) -> ErrorTier {
        if downcast_service_error(err).is_some() {
            return ErrorTier::Service;
        }
        if self.registry.detect(err).is_some() {
            return ErrorTier::Generated;
        }
        ErrorTier::Unknown
    }

    /// Formats one failed request's error into a [`Response`].
    ///
    /// Tiers are tried in strict order: recognized service error, detected
    /// generated container, then the opaque fallback. Pure and total — this
    /// never errors, blocks, or mutates the input.
    pub fn format(&self, err: &(dyn StdError + 'static)) -> Response {
        if let Some(service_error) = downcast_service_error(err) {
            return service_error_response(service_error);
        }

        if let Some(shape) = self.registry.detect(err) {
            // status stays unset on this tier; the framework derives it
            return Response {
                errors: envelope::extract_instances(&shape),
                status: None,
            };
        }

        let id = (self.id_generator)();
        tracing::debug!(error_id = %id, tier = %ErrorTier::Unknown, "unhandled error reduced to generic response");
        Response {
            errors: vec![ErrorInstance {
                title: "Internal server error".to_string(),
                id: Some(id),
                ..Default::default()
            }],
            status: Some(StatusCode::INTERNAL_SERVER_ERROR),
        }
    }
}

fn downcast_service_error<'a>(err: &'a (dyn StdError + 'static)) -> Option<&'a ServiceError> {
    err.downcast_ref::<ServiceError>()
        .or_else(|| err.downcast_ref::<Box<ServiceError>>().map(|boxed| boxed.as_ref()))
}

fn service_error_response(err: &ServiceError) -> Response {
    let detail = if err.fault {
        // a fault's message may carry internal diagnostic detail
        "Internal error".to_string()
    } else {
        err.message.clone()
    };

    Response {
        errors: vec![ErrorInstance {
            title: err.name.clone(),
            detail: Some(detail),
            id: Some(err.id.clone()),
            code: None,
        }],
        status: Some(err.status_code()),
    }
}
