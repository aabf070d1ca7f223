//! Client for Hyprland's IPC sockets
//!
//! Hyprland exposes two Unix sockets per running instance:
//!
//! - an event socket (`.socket2.sock`) streaming one `kind>>args` line per
//!   compositor event
//! - a control socket (`.socket.sock`) answering one query per connection
//!
//! ## Architecture
//!
//! - `EventContext`: one framed event line (kind, raw tail, timestamp)
//! - `codec` / `catalog`: per-kind argument shapes and the typed `Event`
//! - `EventListener`: connection owner, read loop and dispatcher; callbacks
//!   and an optional `EventHandler` observer receive the events
//! - `RequestClient`: blocking `j/<verb>` queries decoded into `types`
//! - `HyprError`: error type shared by both sides

mod callbacks;
pub mod catalog;
pub mod codec;
mod error;
mod event;
mod handler;
mod listener;
mod request;
pub mod socket;
pub mod types;

pub use catalog::{Event, EventKind};
pub use codec::{DecodeError, FieldType, Shape, Value};
pub use error::{HyprError, RequestError};
pub use event::{EventContext, EVENT_SEPARATOR};
pub use handler::EventHandler;
pub use listener::EventListener;
pub use request::{RequestClient, QUERY_VERBS};
pub use types::{
    Animation, Animations, Bezier, Bind, Client, CursorPosition, Monitor, SimpleWorkspace,
    Workspace,
};

pub use hypr_ipc_config::{Config, DecodePolicy, ListenerConfig, SocketConfig};
pub use tokio_util::sync::CancellationToken;
