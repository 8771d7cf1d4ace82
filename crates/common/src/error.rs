//! Service error taxonomy shared by every commerce service.
//!
//! A [`ServiceError`] is what a domain service hands back to its caller. It
//! crosses the remote-call boundary as a [`WireError`], a single encoded
//! string, and is decoded back on the calling side. Decoding never fails:
//! anything that cannot be understood becomes an internal error.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// What kind of failure occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorClass {
    /// The caller sent a malformed or invalid request.
    BadRequest,
    /// The referenced entity does not exist.
    NotFound,
    /// Storage or infrastructure failure.
    InternalError,
    /// A failure the translating side did not recognize.
    #[serde(other)]
    Unknown,
}

impl std::fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ErrorClass::BadRequest => "BadRequest",
            ErrorClass::NotFound => "NotFound",
            ErrorClass::InternalError => "InternalError",
            ErrorClass::Unknown => "Unknown",
        };
        f.write_str(name)
    }
}

/// Transport-level status family an error maps onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransportHint {
    BadRequest,
    NotFound,
    InternalError,
}

impl TransportHint {
    /// Returns the HTTP status code for this hint.
    pub fn status_code(&self) -> u16 {
        match self {
            TransportHint::BadRequest => 400,
            TransportHint::NotFound => 404,
            TransportHint::InternalError => 500,
        }
    }

    /// The hint every error of `class` carries.
    pub fn for_class(class: ErrorClass) -> Self {
        match class {
            ErrorClass::BadRequest => TransportHint::BadRequest,
            ErrorClass::NotFound => TransportHint::NotFound,
            ErrorClass::InternalError | ErrorClass::Unknown => TransportHint::InternalError,
        }
    }

    /// Maps an HTTP status code back onto a hint. Anything other than
    /// 400 or 404 is treated as an internal error.
    pub fn from_status_code(code: u16) -> Self {
        match code {
            400 => TransportHint::BadRequest,
            404 => TransportHint::NotFound,
            _ => TransportHint::InternalError,
        }
    }
}

/// A classified failure produced by a domain service.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{class} ({code}): {message}", code = .hint.status_code())]
pub struct ServiceError {
    class: ErrorClass,
    hint: TransportHint,
    message: String,
}

impl ServiceError {
    /// Creates a service error from its three parts.
    pub fn new(class: ErrorClass, hint: TransportHint, message: impl Into<String>) -> Self {
        Self {
            class,
            hint,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(ErrorClass::BadRequest, TransportHint::BadRequest, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorClass::NotFound, TransportHint::NotFound, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(
            ErrorClass::InternalError,
            TransportHint::InternalError,
            message,
        )
    }

    /// An error nobody classified. Carries internal-error severity.
    pub fn unknown(message: impl Into<String>) -> Self {
        Self::new(ErrorClass::Unknown, TransportHint::InternalError, message)
    }

    pub fn class(&self) -> ErrorClass {
        self.class
    }

    pub fn hint(&self) -> TransportHint {
        self.hint
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the HTTP status code derived from the transport hint.
    pub fn status_code(&self) -> u16 {
        self.hint.status_code()
    }

    /// Returns true when the failure is the caller's fault (4xx).
    pub fn is_client_error(&self) -> bool {
        matches!(
            self.hint,
            TransportHint::BadRequest | TransportHint::NotFound
        )
    }

    /// Encodes this error into its single-string wire form.
    pub fn encode(&self) -> String {
        serde_json::json!({
            "class": self.class,
            "code": self.hint.status_code(),
            "message": self.message,
        })
        .to_string()
    }

    /// Decodes an error from its wire form.
    ///
    /// A payload that does not parse yields an `InternalError`; a payload that
    /// parses but names an unrecognized class yields `Unknown`. The hint is
    /// derived from the decoded class, never from the wire `code`.
    pub fn decode(wire: &str) -> Self {
        match serde_json::from_str::<WirePayload>(wire) {
            Ok(payload) => Self {
                class: payload.class,
                hint: TransportHint::for_class(payload.class),
                message: payload.message,
            },
            Err(e) => Self::internal(format!("undecodable service error ({e}): {wire}")),
        }
    }
}

#[derive(Deserialize)]
struct WirePayload {
    class: ErrorClass,
    message: String,
}

/// A service error in transit across a remote call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct WireError(String);

impl WireError {
    /// Wraps an already-encoded payload as received from the transport.
    pub fn from_raw(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<ServiceError> for WireError {
    fn from(err: ServiceError) -> Self {
        Self(err.encode())
    }
}

impl From<WireError> for ServiceError {
    fn from(err: WireError) -> Self {
        ServiceError::decode(&err.0)
    }
}

/// Failure reported by a storage collaborator.
///
/// Services never pass this through raw; they wrap it into their own
/// domain error with the operation that failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct StorageError(String);

impl StorageError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}
