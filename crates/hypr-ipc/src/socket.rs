//! Hyprland socket discovery
//!
//! Hyprland places both of its sockets under
//! `$XDG_RUNTIME_DIR/hypr/$HYPRLAND_INSTANCE_SIGNATURE/`:
//!
//! - `.socket.sock`: request/response control socket
//! - `.socket2.sock`: one-way event stream
//!
//! Values from [`SocketConfig`] take precedence over the environment.

use std::path::PathBuf;

use hypr_ipc_config::SocketConfig;

use crate::HyprError;

/// Environment variable carrying the running instance's signature
pub const INSTANCE_SIGNATURE_ENV: &str = "HYPRLAND_INSTANCE_SIGNATURE";

/// Environment variable for the per-user runtime directory
const RUNTIME_DIR_ENV: &str = "XDG_RUNTIME_DIR";

/// File name of the control socket
pub const REQUEST_SOCKET_NAME: &str = ".socket.sock";

/// File name of the event socket
pub const EVENT_SOCKET_NAME: &str = ".socket2.sock";

/// Resolve the path of the event stream socket
///
/// # Errors
///
/// Returns `HyprError::InstanceNotSet` if no instance signature is configured
/// and `$HYPRLAND_INSTANCE_SIGNATURE` is not set.
pub fn event_socket_path(config: &SocketConfig) -> Result<PathBuf, HyprError> {
    socket_path(config, EVENT_SOCKET_NAME)
}

/// Resolve the path of the control (request/response) socket
///
/// # Errors
///
/// Returns `HyprError::InstanceNotSet` if no instance signature is configured
/// and `$HYPRLAND_INSTANCE_SIGNATURE` is not set.
pub fn request_socket_path(config: &SocketConfig) -> Result<PathBuf, HyprError> {
    socket_path(config, REQUEST_SOCKET_NAME)
}

fn socket_path(config: &SocketConfig, name: &str) -> Result<PathBuf, HyprError> {
    let instance = match &config.instance {
        Some(instance) => instance.clone(),
        None => std::env::var(INSTANCE_SIGNATURE_ENV).map_err(|_| HyprError::InstanceNotSet)?,
    };

    let runtime_dir = match &config.runtime_dir {
        Some(dir) => dir.clone(),
        None => runtime_dir(),
    };

    Ok(runtime_dir.join("hypr").join(instance).join(name))
}

/// `$XDG_RUNTIME_DIR`, or `/run/user/<uid>` when unset
fn runtime_dir() -> PathBuf {
    match std::env::var(RUNTIME_DIR_ENV) {
        Ok(dir) => PathBuf::from(dir),
        Err(_) => {
            let uid = nix::unistd::getuid();
            tracing::debug!("{} not set, falling back to /run/user/{}", RUNTIME_DIR_ENV, uid);
            PathBuf::from("/run/user").join(uid.to_string())
        }
    }
}
