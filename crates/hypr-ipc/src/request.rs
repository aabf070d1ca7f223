//! Control socket client
//!
//! Queries go to Hyprland's request socket (`.socket.sock`). Every request
//! opens its own connection, writes `j/<command>` (the `j/` prefix asks for a
//! JSON reply), decodes the reply and closes the connection again. Calls are
//! blocking.

use std::io::{BufReader, Write};
use std::os::unix::net::UnixStream;
use std::path::PathBuf;

use hypr_ipc_config::{Config, SocketConfig};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::socket;
use crate::types::{Animations, Bind, Client, CursorPosition, Monitor, Workspace};
use crate::{HyprError, RequestError};

/// Query verbs with a typed method on [`RequestClient`]
pub const QUERY_VERBS: [&str; 8] = [
    "activewindow",
    "animations",
    "binds",
    "cursorpos",
    "clients",
    "monitors",
    "workspaces",
    "activeworkspace",
];

/// Client for Hyprland's control socket
///
/// Holds no connection between calls.
///
/// # Example
///
/// ```ignore
/// let client = RequestClient::default();
/// for workspace in client.workspaces()? {
///     println!("{} on {}", workspace.name, workspace.monitor);
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct RequestClient {
    socket: SocketConfig,
}

impl RequestClient {
    pub fn new(socket: SocketConfig) -> Self {
        Self { socket }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.socket.clone())
    }

    /// Path of the control socket requests are sent to
    ///
    /// # Errors
    ///
    /// Returns `HyprError::InstanceNotSet` if no instance signature is known.
    pub fn socket_path(&self) -> Result<PathBuf, HyprError> {
        socket::request_socket_path(&self.socket)
    }

    /// Send `j/<command>` and decode the JSON reply into `T`
    ///
    /// # Errors
    ///
    /// Returns `HyprError::InstanceNotSet` if the socket cannot be resolved, or
    /// `HyprError::Request` wrapping the connect, send or decode failure.
    pub fn request<T: DeserializeOwned>(&self, command: &str) -> Result<T, HyprError> {
        let path = self.socket_path()?;
        let fail = |source| HyprError::Request {
            command: command.to_string(),
            source,
        };

        debug!("Sending `{}` to {}", command, path.display());
        let mut stream = UnixStream::connect(&path).map_err(|e| {
            fail(RequestError::Connect {
                path: path.clone(),
                source: e,
            })
        })?;

        stream
            .write_all(format!("j/{}", command).as_bytes())
            .map_err(|e| fail(RequestError::Send(e)))?;

        serde_json::from_reader(BufReader::new(&stream))
            .map_err(|e| fail(RequestError::Decode(e)))
    }

    /// Send any command and return the reply as untyped JSON
    pub fn request_raw(&self, command: &str) -> Result<serde_json::Value, HyprError> {
        self.request(command)
    }

    /// The focused window; `Client::default()` when nothing is focused
    pub fn active_window(&self) -> Result<Client, HyprError> {
        self.request("activewindow")
    }

    pub fn animations(&self) -> Result<Animations, HyprError> {
        self.request("animations")
    }

    pub fn binds(&self) -> Result<Vec<Bind>, HyprError> {
        self.request("binds")
    }

    pub fn cursor_position(&self) -> Result<CursorPosition, HyprError> {
        self.request("cursorpos")
    }

    pub fn clients(&self) -> Result<Vec<Client>, HyprError> {
        self.request("clients")
    }

    pub fn monitors(&self) -> Result<Vec<Monitor>, HyprError> {
        self.request("monitors")
    }

    pub fn workspaces(&self) -> Result<Vec<Workspace>, HyprError> {
        self.request("workspaces")
    }

    pub fn active_workspace(&self) -> Result<Workspace, HyprError> {
        self.request("activeworkspace")
    }
}
