//! CLI entrypoint for the GAM MCP server
//!
//! This is the main binary that wires together all layers using
//! dependency injection, then hands stdin/stdout to the protocol loop.
//! All diagnostics go to stderr; stdout carries only JSON-RPC.

use anyhow::{Context, Result, bail};
use clap::Parser;
use gam_application::{DispatchConfig, ToolDispatcher};
use gam_infrastructure::{
    ConfigLoader, FileConfig, GamProcessExecutor, JsonlInvocationLogger, McpServer,
    default_tool_spec,
};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "gam-mcp", version, about = "MCP server for GAM Google Workspace administration")]
struct Cli {
    /// Path to a config file (overrides discovered configs)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Skip config file discovery; use built-in defaults
    #[arg(long)]
    no_config: bool,

    /// Path to the gam binary (overrides config)
    #[arg(long)]
    gam_path: Option<String>,

    /// Per-command timeout in seconds (overrides config)
    #[arg(long)]
    timeout: Option<u64>,

    /// Path to the JSONL audit log (overrides config)
    #[arg(long)]
    audit_log: Option<PathBuf>,

    /// Print config sources and the effective configuration, then exit
    #[arg(long)]
    print_config: bool,

    /// Verify the gam binary is reachable, then exit
    #[arg(long)]
    check: bool,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level. Stderr only: stdout is
    // the protocol channel.
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let mut config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref()).context("could not load configuration")?
    };
    apply_cli_overrides(&mut config, &cli);
    config.validate().context("invalid configuration")?;

    if cli.print_config {
        ConfigLoader::print_config_sources();
        eprintln!();
        eprintln!("{}", toml::to_string_pretty(&config)?);
        return Ok(());
    }

    let gam_path = resolve_gam_binary(&config.gam.binary_path);
    if cli.check {
        return match &gam_path {
            Some(path) => {
                eprintln!("gam binary: {}", path.display());
                Ok(())
            }
            None => bail!("gam binary '{}' not found on PATH", config.gam.binary_path),
        };
    }
    if gam_path.is_none() {
        warn!(
            "gam binary '{}' not found on PATH; tool calls will fail to start",
            config.gam.binary_path
        );
    }

    // === Dependency Injection ===
    let mut executor = GamProcessExecutor::new();
    if let Some(dir) = &config.gam.config_dir {
        executor = executor.with_env("GAMCFGDIR", dir.to_string_lossy());
    }

    let dispatch_config = DispatchConfig {
        gam_path: config.gam.binary_path.clone(),
        default_timeout: Duration::from_secs(config.gam.timeout_secs),
        output_cap_bytes: config.gam.output_cap_bytes,
    };

    let mut dispatcher =
        ToolDispatcher::new(default_tool_spec(), Arc::new(executor), dispatch_config);

    if let Some(path) = &config.logging.audit_path {
        match JsonlInvocationLogger::new(path) {
            Some(logger) => {
                info!("Audit log: {}", logger.path().display());
                dispatcher = dispatcher.with_invocation_logger(Arc::new(logger));
            }
            None => warn!("Audit log disabled: {} not writable", path.display()),
        }
    }

    info!("Starting gam-mcp on stdio");
    McpServer::new(Arc::new(dispatcher)).serve_stdio().await?;
    info!("Client closed stdin; shutting down");
    Ok(())
}

fn apply_cli_overrides(config: &mut FileConfig, cli: &Cli) {
    if let Some(path) = &cli.gam_path {
        config.gam.binary_path = path.clone();
    }
    if let Some(secs) = cli.timeout {
        config.gam.timeout_secs = secs;
    }
    if let Some(path) = &cli.audit_log {
        config.logging.audit_path = Some(path.clone());
    }
}

/// Locate the gam binary. Explicit paths are taken as-is; bare names are
/// resolved via PATH.
fn resolve_gam_binary(binary_path: &str) -> Option<PathBuf> {
    let path = PathBuf::from(binary_path);
    if path.components().count() > 1 {
        path.exists().then_some(path)
    } else {
        which::which(binary_path).ok()
    }
}
