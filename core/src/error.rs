//! Error types for the clinic API client and its controllers.
//!
//! # Design
//! `ApiError` covers a single request/response exchange. `NotFound` keeps a
//! dedicated variant so callers can tell "that id does not exist" apart from
//! other server failures. Controllers never let these escape a user action;
//! they are classified with `ApiError::failure` and turned into a
//! `Notification`.

/// Coarse classification of a failed exchange, as shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Failure {
    /// No connectivity, DNS failure, or timeout.
    Network,
    /// The server answered with a non-2xx status or an unreadable body.
    Server,
    /// Login succeeded with a role the client cannot route.
    UnknownRole,
    /// A name lookup during identity re-derivation found nothing.
    NotFound,
    /// Form input rejected before any request was made.
    InvalidInput,
}

/// Errors returned by `ClinicClient` parse methods and by transports.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request never produced a response.
    #[error("network failure: {0}")]
    Network(String),

    /// The server returned 404.
    #[error("resource not found")]
    NotFound,

    /// The server returned a non-2xx status other than 404.
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),
}

impl ApiError {
    pub fn failure(&self) -> Failure {
        match self {
            ApiError::Network(_) => Failure::Network,
            _ => Failure::Server,
        }
    }
}

/// Errors from the login exchange and from identity re-derivation.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The email was rejected locally; no request was sent.
    #[error("{0}")]
    InvalidEmail(String),

    /// Login succeeded but the role value is not one the client routes.
    #[error("unknown role: {0}")]
    UnknownRole(String),

    /// No polyclinic carries the given center name.
    #[error("medical center not found: {0}")]
    CenterNotFound(String),
}

impl SessionError {
    pub fn failure(&self) -> Failure {
        match self {
            SessionError::Api(e) => e.failure(),
            SessionError::InvalidEmail(_) => Failure::InvalidInput,
            SessionError::UnknownRole(_) => Failure::UnknownRole,
            SessionError::CenterNotFound(_) => Failure::NotFound,
        }
    }
}

/// Misuse of a CRUD dialog.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum DialogError {
    #[error("dialog is not open")]
    NotOpen,

    #[error("unknown field: {0}")]
    UnknownField(String),

    /// The selected parent center is not among the fetched options.
    #[error("unknown medical center id: {0}")]
    UnknownCenter(i64),
}

/// Invalid client configuration.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("base url cannot be empty")]
    EmptyBaseUrl,

    #[error("invalid timeout {0:?}: expected whole seconds")]
    InvalidTimeout(String),
}
