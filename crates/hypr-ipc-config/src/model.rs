//! Configuration data model

use std::path::PathBuf;

/// Default capacity of the queue between the socket reader and dispatch
pub const DEFAULT_QUEUE_CAPACITY: usize = 10;

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    pub global: GlobalConfig,
    pub socket: SocketConfig,
    pub listener: ListenerConfig,
}

/// Global settings
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GlobalConfig {
    pub log_level: LogLevel,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    #[default]
    Warn,
    Error,
}

impl LogLevel {
    /// Directive string understood by `tracing_subscriber::EnvFilter`
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

impl std::str::FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(Self::Trace),
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warn" | "warning" => Ok(Self::Warn),
            "error" => Ok(Self::Error),
            _ => Err(format!("Unknown log level: {}", s)),
        }
    }
}

/// Overrides for Hyprland socket discovery
///
/// Unset fields fall back to the environment (`HYPRLAND_INSTANCE_SIGNATURE`,
/// `XDG_RUNTIME_DIR`, then `/run/user/<uid>`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SocketConfig {
    /// Hyprland instance signature
    pub instance: Option<String>,
    /// Runtime directory containing the `hypr/` socket tree
    pub runtime_dir: Option<PathBuf>,
}

/// Event listener tuning
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListenerConfig {
    /// Number of lines buffered between the socket reader and dispatch
    pub queue_capacity: usize,
    /// What to do when a known event's arguments fail to decode
    pub decode_policy: DecodePolicy,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            decode_policy: DecodePolicy::default(),
        }
    }
}

/// Handling of event lines whose arguments fail typed conversion
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DecodePolicy {
    /// Abort the listening session with the decode error
    #[default]
    Fail,
    /// Log a warning and skip typed delivery for the offending line
    Skip,
}

impl std::str::FromStr for DecodePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "fail" => Ok(Self::Fail),
            "skip" => Ok(Self::Skip),
            _ => Err(format!(
                "Unknown decode policy: {} (expected \"fail\" or \"skip\")",
                s
            )),
        }
    }
}
