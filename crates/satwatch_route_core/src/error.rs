use thiserror::Error;

pub const MISSING_DESTINATION_MSG: &str = "Please enter a destination.";
pub const BACKEND_UNREACHABLE_MSG: &str =
    "Could not connect to the route analysis server. Is the backend running?";
pub const UNKNOWN_SERVER_ERROR_MSG: &str = "An unknown error occurred.";
pub const GEOLOCATION_UNSUPPORTED_MSG: &str = "Geolocation is not supported on this system.";

/// Everything that can end an analysis attempt. The `Display` text is what
/// the results panel shows.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalysisError {
    #[error("{}", MISSING_DESTINATION_MSG)]
    MissingDestination,

    #[error("{}", BACKEND_UNREACHABLE_MSG)]
    BackendUnreachable,

    /// Message reported by the backend in the `error` field (or the fallback).
    #[error("{0}")]
    Server(String),

    #[error("Unable to retrieve your location: {0}")]
    Geolocation(String),

    #[error("{}", GEOLOCATION_UNSUPPORTED_MSG)]
    GeolocationUnsupported,

    #[error("Invalid response from server: {0}")]
    InvalidResponse(String),

    #[error("{0}")]
    Network(String),

    #[error("An analysis is already in progress.")]
    Busy,
}

/// Failure reported by a transport before any HTTP status is available.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TransportError {
    #[error("connection failed: {0}")]
    Connect(String),

    #[error("{0}")]
    Other(String),
}

impl From<TransportError> for AnalysisError {
    fn from(e: TransportError) -> Self {
        match e {
            TransportError::Connect(_) => AnalysisError::BackendUnreachable,
            TransportError::Other(msg) => AnalysisError::Network(msg),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeolocationError {
    #[error("{}", GEOLOCATION_UNSUPPORTED_MSG)]
    Unsupported,

    #[error("{0}")]
    Failed(String),
}

impl From<GeolocationError> for AnalysisError {
    fn from(e: GeolocationError) -> Self {
        match e {
            GeolocationError::Unsupported => AnalysisError::GeolocationUnsupported,
            GeolocationError::Failed(msg) => AnalysisError::Geolocation(msg),
        }
    }
}
