//! Error types for Hyprland IPC operations

use std::path::PathBuf;
use thiserror::Error;

use crate::codec::DecodeError;

/// Errors that can occur when talking to the Hyprland compositor
#[derive(Debug, Error)]
pub enum HyprError {
    /// The HYPRLAND_INSTANCE_SIGNATURE environment variable is not set
    #[error("HYPRLAND_INSTANCE_SIGNATURE environment variable not set - is Hyprland running?")]
    InstanceNotSet,

    /// Failed to connect to a Hyprland socket
    #[error("Failed to connect to Hyprland socket at {path}: {source}")]
    ConnectionFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An event line did not contain the `>>` separator
    #[error("Malformed event line (missing `>>`): {line:?}")]
    MalformedEvent { line: String },

    /// A known event's arguments failed typed conversion
    #[error("Failed to decode `{kind}` event: {source}")]
    Decode {
        kind: String,
        #[source]
        source: DecodeError,
    },

    /// The compositor closed the event connection
    #[error("Hyprland event stream closed unexpectedly")]
    StreamClosed,

    /// The caller cancelled the listening session
    #[error("Event listener cancelled")]
    Cancelled,

    /// A control socket request failed
    #[error("Hyprland request `{command}` failed: {source}")]
    Request {
        command: String,
        #[source]
        source: RequestError,
    },
}

impl HyprError {
    /// Whether this error came from resolving or opening a socket
    pub fn is_socket_error(&self) -> bool {
        matches!(self, Self::InstanceNotSet | Self::ConnectionFailed { .. })
    }
}

/// Failures of a single control socket round trip
#[derive(Debug, Error)]
pub enum RequestError {
    /// Failed to connect to the control socket
    #[error("failed to connect to {path}: {source}")]
    Connect {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write the command
    #[error("failed to send command: {0}")]
    Send(#[source] std::io::Error),

    /// The reply was not the expected JSON document
    #[error("failed to decode reply: {0}")]
    Decode(#[source] serde_json::Error),
}
