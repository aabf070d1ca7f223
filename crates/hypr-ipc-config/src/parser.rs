//! KDL configuration parser

use std::path::Path;

use crate::error::ConfigError;
use crate::model::*;

/// Parse a configuration file from the given path
pub fn parse_config(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    parse_config_str(&content)
}

/// Parse configuration from a string
pub fn parse_config_str(content: &str) -> Result<Config, ConfigError> {
    let doc: kdl::KdlDocument = content.parse().map_err(|e: kdl::KdlError| {
        // kdl uses an older miette version, so we need to extract offset/len manually
        let offset = e.span.offset();
        let len = e.span.len();
        let span = miette::SourceSpan::from((offset, len));
        ConfigError::ParseError {
            src: content.to_string(),
            span,
            source: e,
        }
    })?;

    let mut config = Config::default();

    for node in doc.nodes() {
        match node.name().value() {
            "log-level" => {
                let val = string_arg(node)?;
                config.global.log_level = val
                    .parse()
                    .map_err(|message| ConfigError::Invalid { message })?;
            }
            "socket" => {
                config.socket = parse_socket(node)?;
            }
            "listener" => {
                config.listener = parse_listener(node)?;
            }
            name => {
                tracing::warn!("Unknown top-level node: {}", name);
            }
        }
    }

    Ok(config)
}

fn parse_socket(node: &kdl::KdlNode) -> Result<SocketConfig, ConfigError> {
    let mut socket = SocketConfig::default();

    if let Some(children) = node.children() {
        for child in children.nodes() {
            match child.name().value() {
                "instance" => {
                    let val = string_arg(child)?;
                    if val.is_empty() {
                        return Err(ConfigError::Invalid {
                            message: "socket instance must not be empty".to_string(),
                        });
                    }
                    socket.instance = Some(val.to_string());
                }
                "runtime-dir" => {
                    let val = string_arg(child)?;
                    socket.runtime_dir = Some(shellexpand::tilde(val).into_owned().into());
                }
                name => {
                    tracing::warn!("Unknown socket config option: {}", name);
                }
            }
        }
    }

    Ok(socket)
}

fn parse_listener(node: &kdl::KdlNode) -> Result<ListenerConfig, ConfigError> {
    let mut listener = ListenerConfig::default();

    if let Some(children) = node.children() {
        for child in children.nodes() {
            match child.name().value() {
                "queue-capacity" => {
                    let val = child
                        .entries()
                        .first()
                        .and_then(|e| e.value().as_i64())
                        .ok_or_else(|| ConfigError::MissingValue {
                            node: "queue-capacity".to_string(),
                        })?;
                    if val < 1 {
                        return Err(ConfigError::Invalid {
                            message: format!("queue-capacity must be at least 1, got {}", val),
                        });
                    }
                    listener.queue_capacity = val as usize;
                }
                "on-decode-error" => {
                    let val = string_arg(child)?;
                    listener.decode_policy = val
                        .parse()
                        .map_err(|message| ConfigError::Invalid { message })?;
                }
                name => {
                    tracing::warn!("Unknown listener config option: {}", name);
                }
            }
        }
    }

    Ok(listener)
}

/// First argument of a node as a string
fn string_arg(node: &kdl::KdlNode) -> Result<&str, ConfigError> {
    node.entries()
        .first()
        .and_then(|e| e.value().as_string())
        .ok_or_else(|| ConfigError::MissingValue {
            node: node.name().value().to_string(),
        })
}
