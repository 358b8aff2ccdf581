// --- File: crates/slotify_common/src/error.rs ---
use thiserror::Error;

/// The base error type shared across Slotify crates.
///
/// Each crate defines its own specific error enum and converts into this
/// taxonomy where a caller needs a uniform view (HTTP mapping, logging).
#[derive(Error, Debug)]
pub enum SlotifyError {
    /// Bad input shape or range, user-correctable
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Resource exists or is not in the required state
    #[error("Conflict: {0}")]
    ConflictError(String),

    /// Actor does not own the resource
    #[error("Not authorized: {0}")]
    AuthorizationError(String),

    /// Unknown slot, host, or availability
    #[error("Not found: {0}")]
    NotFoundError(String),

    /// An upstream provider call failed; never retried automatically
    #[error("Upstream service error: {service_name} - {message}")]
    UpstreamError {
        service_name: String,
        message: String,
    },

    /// Repository call failed
    #[error("Persistence error: {0}")]
    PersistenceError(String),

    /// Missing or invalid configuration
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Error that doesn't fit into any other category
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// A trait for converting errors to HTTP status codes.
///
/// Implemented by error types that are surfaced through the HTTP layer so
/// handlers can map them without matching every variant themselves.
pub trait HttpStatusCode {
    /// Returns the HTTP status code for this error.
    fn status_code(&self) -> u16;
}

impl HttpStatusCode for SlotifyError {
    fn status_code(&self) -> u16 {
        match self {
            SlotifyError::ValidationError(_) => 400,
            SlotifyError::ConflictError(_) => 409,
            SlotifyError::AuthorizationError(_) => 403,
            SlotifyError::NotFoundError(_) => 404,
            SlotifyError::UpstreamError { .. } => 502,
            SlotifyError::PersistenceError(_) => 500,
            SlotifyError::ConfigError(_) => 500,
            SlotifyError::InternalError(_) => 500,
        }
    }
}

// Utility constructors, mirroring the variants callers reach for most often
pub fn validation_error<T: std::fmt::Display>(message: T) -> SlotifyError {
    SlotifyError::ValidationError(message.to_string())
}

pub fn conflict<T: std::fmt::Display>(message: T) -> SlotifyError {
    SlotifyError::ConflictError(message.to_string())
}

pub fn not_found<T: std::fmt::Display>(message: T) -> SlotifyError {
    SlotifyError::NotFoundError(message.to_string())
}

pub fn upstream_error<T: std::fmt::Display>(service_name: &str, message: T) -> SlotifyError {
    SlotifyError::UpstreamError {
        service_name: service_name.to_string(),
        message: message.to_string(),
    }
}

pub fn config_error<T: std::fmt::Display>(message: T) -> SlotifyError {
    SlotifyError::ConfigError(message.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn taxonomy_maps_to_expected_status_codes() {
        assert_eq!(validation_error("bad input").status_code(), 400);
        assert_eq!(conflict("duplicate").status_code(), 409);
        assert_eq!(not_found("missing").status_code(), 404);
        assert_eq!(upstream_error("calendar", "down").status_code(), 502);
        assert_eq!(config_error("missing section").status_code(), 500);
        assert_eq!(
            SlotifyError::AuthorizationError("not yours".into()).status_code(),
            403
        );
    }
}
