//! Error types for the simulator and its HTTP server.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Errors raised while resolving a request against the simulated streams.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SimulatorError {
    #[error("Must provide one or more events.")]
    NoEventsProvided,

    #[error("invalid version: {0}")]
    InvalidVersion(i64),

    #[error("parse error: {0}")]
    ParseError(String),

    #[error("event not found: {0}")]
    EventNotFound(String),

    #[error("stream not found: {0}")]
    StreamNotFound(String),

    #[error("stream {stream}: expected event number {expected}, found {found}")]
    NonContiguousEvents {
        stream: String,
        expected: u64,
        found: u64,
    },

    #[error("serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for SimulatorError {
    fn from(e: serde_json::Error) -> Self {
        SimulatorError::Serialization(e.to_string())
    }
}

/// Errors raised while starting a simulator server.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Simulator(#[from] SimulatorError),
}

impl SimulatorError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            SimulatorError::InvalidVersion(_) | SimulatorError::ParseError(_) => {
                StatusCode::BAD_REQUEST
            }
            SimulatorError::EventNotFound(_) | SimulatorError::StreamNotFound(_) => {
                StatusCode::NOT_FOUND
            }
            SimulatorError::NoEventsProvided
            | SimulatorError::NonContiguousEvents { .. }
            | SimulatorError::Serialization(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for SimulatorError {
    fn into_response(self) -> Response {
        (self.status_code(), self.to_string()).into_response()
    }
}

pub type Result<T> = std::result::Result<T, SimulatorError>;
