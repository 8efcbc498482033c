#![cfg_attr(
    not(test),
    deny(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::dbg_macro,
        clippy::print_stdout,
        clippy::print_stderr,
        clippy::panic,
    )
)]

pub mod classify;
pub mod envelope;
pub mod response;
pub mod status;
pub mod types;

pub use classify::{ErrorFormatter, ErrorTier};
pub use envelope::{EnvelopeRegistry, GENERATED_MARKER, extract_instances};
pub use response::{ErrorInstance, Response};
pub use status::status_for_flags;
pub use types::{ServiceError, new_error_id};
