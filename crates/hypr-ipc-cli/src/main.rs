//! hypr-ipc CLI
//!
//! Watch Hyprland's event stream and run control socket queries.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use hypr_ipc::{
    CancellationToken, Config, EventKind, EventListener, HyprError, RequestClient, QUERY_VERBS,
};
use miette::IntoDiagnostic;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

const DEFAULT_CONFIG_PATH: &str = "~/.config/hypr-ipc/config.kdl";

#[derive(Parser, Debug)]
#[command(name = "hypr-ipc")]
#[command(about = "Inspect Hyprland through its IPC sockets")]
#[command(version)]
struct Cli {
    /// Path to configuration file [default: ~/.config/hypr-ipc/config.kdl]
    #[arg(short, long)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print events as they arrive until interrupted
    Events {
        /// Print the decoded event instead of the raw line
        #[arg(short, long)]
        decoded: bool,
    },

    /// Run a control socket query and print the JSON reply
    Query {
        /// Query verb, e.g. `clients` or `monitors`
        verb: String,
    },

    /// List known event kinds and their arguments
    Kinds,

    /// Validate the configuration file
    Validate,
}

fn main() -> miette::Result<()> {
    let cli = Cli::parse();

    let explicit = cli.config.is_some();
    let config_path = cli.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);
    let config_path: PathBuf = shellexpand::tilde(config_path).into_owned().into();

    // validate reports parse errors itself instead of failing up front
    let config = match cli.command {
        Commands::Validate => Config::default(),
        _ => load_config(&config_path, explicit)?,
    };
    init_tracing(&config);
    tracing::debug!("Using configuration {:?}", config);

    match cli.command {
        Commands::Events { decoded } => cmd_events(&config, decoded),
        Commands::Query { verb } => cmd_query(&config, &verb),
        Commands::Kinds => cmd_kinds(),
        Commands::Validate => cmd_validate(&config_path),
    }
}

/// `RUST_LOG` wins over the configured level
fn init_tracing(config: &Config) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.global.log_level.as_str())),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Load the configuration; a missing file at the default path means defaults
fn load_config(path: &Path, explicit: bool) -> miette::Result<Config> {
    if !explicit && !path.exists() {
        return Ok(Config::default());
    }
    hypr_ipc_config::parse_config(path).map_err(|e| miette::miette!("{}", e))
}

fn cmd_events(config: &Config, decoded: bool) -> miette::Result<()> {
    let runtime = tokio::runtime::Runtime::new().into_diagnostic()?;

    runtime.block_on(async {
        let listener = EventListener::from_config(config);

        if decoded {
            for kind in EventKind::ALL {
                listener.on(kind, |ctx, event| {
                    println!("{} {:?}", ctx.received_at().format("%H:%M:%S"), event);
                });
            }
            listener.on_unknown(|ctx| {
                println!("{} unknown {}", ctx.received_at().format("%H:%M:%S"), ctx.raw());
            });
        } else {
            listener.on_all_events(|ctx| {
                println!("{} {}", ctx.received_at().format("%H:%M:%S"), ctx.raw());
            });
        }

        let cancel = CancellationToken::new();
        let interrupt = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                interrupt.cancel();
            }
        });

        match listener.listen(cancel).await {
            Ok(()) | Err(HyprError::Cancelled) => Ok(()),
            Err(e) => Err(miette::miette!("{}", e)),
        }
    })
}

fn cmd_query(config: &Config, verb: &str) -> miette::Result<()> {
    let client = RequestClient::from_config(config);

    let reply = match verb {
        "activewindow" => to_json(client.active_window()),
        "animations" => to_json(client.animations()),
        "binds" => to_json(client.binds()),
        "cursorpos" => to_json(client.cursor_position()),
        "clients" => to_json(client.clients()),
        "monitors" => to_json(client.monitors()),
        "workspaces" => to_json(client.workspaces()),
        "activeworkspace" => to_json(client.active_workspace()),
        other => {
            tracing::debug!(
                "`{}` is not one of {:?}, sending it untyped",
                other,
                QUERY_VERBS
            );
            client
                .request_raw(other)
                .map_err(|e| miette::miette!("{}", e))
        }
    }?;

    println!("{}", serde_json::to_string_pretty(&reply).into_diagnostic()?);
    Ok(())
}

fn to_json<T: Serialize>(reply: Result<T, HyprError>) -> miette::Result<serde_json::Value> {
    let reply = reply.map_err(|e| miette::miette!("{}", e))?;
    serde_json::to_value(reply).into_diagnostic()
}

fn cmd_kinds() -> miette::Result<()> {
    for kind in EventKind::ALL {
        let shape = kind.shape();
        let fields: Vec<String> = shape.fields.iter().map(|f| f.to_string()).collect();
        let note = if shape.spill || shape.arity() < 2 {
            ""
        } else {
            " (last field stops at a comma)"
        };
        println!("  {:<20} ({}){}", kind, fields.join(", "), note);
    }
    Ok(())
}

fn cmd_validate(config_path: &Path) -> miette::Result<()> {
    println!("Validating configuration: {}", config_path.display());

    match hypr_ipc_config::parse_config(config_path) {
        Ok(config) => {
            println!("Configuration is valid!");
            println!("  Log level: {}", config.global.log_level.as_str());
            println!(
                "  Instance: {}",
                config.socket.instance.as_deref().unwrap_or("<from environment>")
            );
            println!(
                "  Runtime dir: {}",
                config
                    .socket
                    .runtime_dir
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| "<from environment>".to_string())
            );
            println!("  Queue capacity: {}", config.listener.queue_capacity);
            println!("  On decode error: {:?}", config.listener.decode_policy);
            Ok(())
        }
        Err(e) => Err(miette::miette!("{}", e)),
    }
}
