mod commands;

use anyhow::{Context, Result};
use appwrite::config::Config;
use appwrite::Client;
use clap::{Parser, ValueEnum};
use commands::Command;
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::fmt::writer::MakeWriterExt;

/// Command line client for the Appwrite server API
#[derive(Parser, Debug)]
#[command(name = "appwrite", version, about, long_about = None)]
struct Args {
    /// API endpoint, e.g. https://cloud.appwrite.io/v1
    #[arg(long, global = true)]
    endpoint: Option<String>,

    /// Project id
    #[arg(short, long, global = true)]
    project: Option<String>,

    /// Server API key
    #[arg(short, long, global = true)]
    key: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json", global = true)]
    output: OutputFormat,

    /// Log level for debugging
    #[arg(long, value_enum, default_value = "off", global = true)]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Json,
    Yaml,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn to_tracing_level(self) -> Option<Level> {
        match self {
            LogLevel::Off => None,
            LogLevel::Error => Some(Level::ERROR),
            LogLevel::Warn => Some(Level::WARN),
            LogLevel::Info => Some(Level::INFO),
            LogLevel::Debug => Some(Level::DEBUG),
            LogLevel::Trace => Some(Level::TRACE),
        }
    }
}

fn setup_logging(level: LogLevel) -> Result<Option<tracing_appender::non_blocking::WorkerGuard>> {
    let Some(tracing_level) = level.to_tracing_level() else {
        return Ok(None);
    };

    let log_path = get_log_path();

    if let Some(parent) = log_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }

    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("Failed to open log file {}", log_path.display()))?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file);

    tracing_subscriber::fmt()
        .with_max_level(tracing_level)
        .with_writer(non_blocking.with_max_level(tracing_level))
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("appwrite {} started with log level: {:?}", appwrite::VERSION, level);
    tracing::info!("Log file: {:?}", log_path);

    Ok(Some(guard))
}

fn get_log_path() -> PathBuf {
    if let Some(config_dir) = dirs::config_dir() {
        return config_dir.join("appwrite").join("appwrite.log");
    }
    if let Some(home) = dirs::home_dir() {
        return home.join(".appwrite").join("appwrite.log");
    }
    PathBuf::from("appwrite.log")
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let log_guard = setup_logging(args.log_level)?;

    let file_config = Config::load();

    // Only flags are persisted, environment values stay out of the file
    if let Command::Configure { self_signed } = args.command {
        let config = Config {
            self_signed,
            ..file_config.with_overrides(
                args.endpoint.as_deref(),
                args.project.as_deref(),
                args.key.as_deref(),
            )
        };
        config.save().context("Failed to save configuration")?;
        match Config::config_path() {
            Some(path) => println!("Configuration saved to {}", path.display()),
            None => println!("No config directory available, nothing saved"),
        }
        return Ok(());
    }

    let config = file_config.with_env().with_overrides(
        args.endpoint.as_deref(),
        args.project.as_deref(),
        args.key.as_deref(),
    );

    let client_config = config.client_config().context(
        "No Appwrite project configured. Set APPWRITE_PROJECT, use --project, or run `appwrite configure`",
    )?;

    tracing::info!(
        "Using endpoint: {}, project: {}",
        client_config.endpoint,
        client_config.project
    );

    let client = Client::new(client_config).context("Failed to create Appwrite client")?;

    if let Err(err) = commands::run(&client, args.command, args.output).await {
        tracing::error!("Command failed: {:#}", err);
        let message = match err.downcast_ref::<appwrite::Error>() {
            Some(err) => appwrite::format_error(err),
            None => format!("{:#}", err),
        };
        eprintln!("Error: {}", message);
        // Flush the log file before exiting
        drop(log_guard);
        std::process::exit(1);
    }

    Ok(())
}
