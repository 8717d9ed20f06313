//! Subcommands of the `appwrite` binary
//!
//! Each subcommand maps onto one façade call and prints the typed result.

use crate::OutputFormat;
use anyhow::{Context, Result};
use appwrite::services::storage::InputFile;
use appwrite::{Client, Database, Functions, Health, Storage, Users};
use clap::Subcommand;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Save endpoint, project and key given as flags to the config file
    Configure {
        /// Accept self-signed TLS certificates
        #[arg(long)]
        self_signed: bool,
    },
    /// Service health probes
    Health {
        #[arg(value_enum, default_value = "http")]
        check: HealthCheck,
    },
    /// Manage users
    #[command(subcommand)]
    Users(UsersCommand),
    /// Browse databases, collections and documents
    #[command(subcommand)]
    Databases(DatabasesCommand),
    /// Browse functions
    #[command(subcommand)]
    Functions(FunctionsCommand),
    /// Browse buckets and files
    #[command(subcommand)]
    Storage(StorageCommand),
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum HealthCheck {
    All,
    Http,
    Db,
    Cache,
    Time,
    Storage,
    Antivirus,
    QueueWebhooks,
    QueueLogs,
    QueueCertificates,
    QueueFunctions,
}

#[derive(Subcommand, Debug)]
pub enum UsersCommand {
    List {
        #[arg(short, long)]
        search: Option<String>,
        /// Query strings, e.g. 'limit(25)'
        #[arg(short, long)]
        query: Vec<String>,
    },
    Get { user_id: String },
    Prefs { user_id: String },
    Logs { user_id: String },
    Sessions { user_id: String },
    /// Block or unblock a user
    Status {
        user_id: String,
        #[arg(action = clap::ArgAction::Set)]
        enabled: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum DatabasesCommand {
    List {
        #[arg(short, long)]
        search: Option<String>,
    },
    Get { database_id: String },
    Collections {
        database_id: String,
        #[arg(short, long)]
        search: Option<String>,
    },
    Documents {
        database_id: String,
        collection_id: String,
        #[arg(short, long)]
        query: Vec<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum FunctionsCommand {
    List {
        #[arg(short, long)]
        search: Option<String>,
    },
    Get { function_id: String },
    Executions { function_id: String },
    Variables { function_id: String },
    /// Trigger a function
    Execute {
        function_id: String,
        #[arg(short, long)]
        body: Option<String>,
        /// Return once queued instead of waiting for the result
        #[arg(long)]
        r#async: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum StorageCommand {
    Buckets {
        #[arg(short, long)]
        search: Option<String>,
    },
    Files {
        bucket_id: String,
        #[arg(short, long)]
        search: Option<String>,
        #[arg(long)]
        limit: Option<u32>,
        #[arg(long)]
        offset: Option<u32>,
    },
    /// Upload a local file
    Upload {
        bucket_id: String,
        file: PathBuf,
        /// File id, `unique()` lets the server choose
        #[arg(long, default_value = "unique()")]
        file_id: String,
    },
    /// Download a file to disk
    Download {
        bucket_id: String,
        file_id: String,
        #[arg(short = 'O', long)]
        out: PathBuf,
    },
}

/// Run a subcommand against the configured project
pub async fn run(client: &Client, command: Command, output: OutputFormat) -> Result<()> {
    tracing::debug!("run: {:?}", command);

    match command {
        // Handled before a client exists
        Command::Configure { .. } => Ok(()),
        Command::Health { check } => run_health(client, check, output).await,
        Command::Users(cmd) => run_users(client, cmd, output).await,
        Command::Databases(cmd) => run_databases(client, cmd, output).await,
        Command::Functions(cmd) => run_functions(client, cmd, output).await,
        Command::Storage(cmd) => run_storage(client, cmd, output).await,
    }
}

async fn run_health(client: &Client, check: HealthCheck, output: OutputFormat) -> Result<()> {
    let health = Health::new(client);

    match check {
        HealthCheck::All => {
            let report = health.check_all().await?;
            print(&report, output)?;
            if !report.is_healthy() {
                anyhow::bail!("One or more services are unhealthy");
            }
            Ok(())
        },
        HealthCheck::Http => print(&health.get().await?, output),
        HealthCheck::Db => print(&health.get_db().await?, output),
        HealthCheck::Cache => print(&health.get_cache().await?, output),
        HealthCheck::Time => print(&health.get_time().await?, output),
        HealthCheck::Storage => print(&health.get_storage_local().await?, output),
        HealthCheck::Antivirus => print(&health.get_antivirus().await?, output),
        HealthCheck::QueueWebhooks => print(&health.get_queue_webhooks().await?, output),
        HealthCheck::QueueLogs => print(&health.get_queue_logs().await?, output),
        HealthCheck::QueueCertificates => print(&health.get_queue_certificates().await?, output),
        HealthCheck::QueueFunctions => print(&health.get_queue_functions().await?, output),
    }
}

async fn run_users(client: &Client, cmd: UsersCommand, output: OutputFormat) -> Result<()> {
    let users = Users::new(client);

    match cmd {
        UsersCommand::List { search, query } => {
            let queries = as_strs(&query);
            print(&users.list(search.as_deref(), &queries).await?, output)
        },
        UsersCommand::Get { user_id } => print(&users.get(&user_id).await?, output),
        UsersCommand::Prefs { user_id } => print(&users.get_prefs(&user_id).await?, output),
        UsersCommand::Logs { user_id } => print(&users.get_logs(&user_id, &[]).await?, output),
        UsersCommand::Sessions { user_id } => {
            print(&users.list_sessions(&user_id).await?, output)
        },
        UsersCommand::Status { user_id, enabled } => {
            print(&users.update_status(&user_id, enabled).await?, output)
        },
    }
}

async fn run_databases(client: &Client, cmd: DatabasesCommand, output: OutputFormat) -> Result<()> {
    let database = Database::new(client);

    match cmd {
        DatabasesCommand::List { search } => {
            print(&database.list_databases(search.as_deref(), &[]).await?, output)
        },
        DatabasesCommand::Get { database_id } => {
            print(&database.get_database(&database_id).await?, output)
        },
        DatabasesCommand::Collections {
            database_id,
            search,
        } => print(
            &database
                .list_collections(&database_id, search.as_deref(), &[])
                .await?,
            output,
        ),
        DatabasesCommand::Documents {
            database_id,
            collection_id,
            query,
        } => {
            let queries = as_strs(&query);
            print(
                &database
                    .list_documents(&database_id, &collection_id, &queries)
                    .await?,
                output,
            )
        },
    }
}

async fn run_functions(client: &Client, cmd: FunctionsCommand, output: OutputFormat) -> Result<()> {
    let functions = Functions::new(client);

    match cmd {
        FunctionsCommand::List { search } => {
            print(&functions.list_functions(search.as_deref(), &[]).await?, output)
        },
        FunctionsCommand::Get { function_id } => {
            print(&functions.get_function(&function_id).await?, output)
        },
        FunctionsCommand::Executions { function_id } => print(
            &functions.list_executions(&function_id, None, &[]).await?,
            output,
        ),
        FunctionsCommand::Variables { function_id } => print(
            &functions.list_variables(&function_id, None, &[]).await?,
            output,
        ),
        FunctionsCommand::Execute {
            function_id,
            body,
            r#async,
        } => print(
            &functions
                .create_execution(&function_id, body.as_deref(), r#async)
                .await?,
            output,
        ),
    }
}

async fn run_storage(client: &Client, cmd: StorageCommand, output: OutputFormat) -> Result<()> {
    let storage = Storage::new(client);

    match cmd {
        StorageCommand::Buckets { search } => print(
            &storage.list_buckets(search.as_deref(), None, None, None).await?,
            output,
        ),
        StorageCommand::Files {
            bucket_id,
            search,
            limit,
            offset,
        } => print(
            &storage
                .list_files(&bucket_id, search.as_deref(), limit, offset, None)
                .await?,
            output,
        ),
        StorageCommand::Upload {
            bucket_id,
            file,
            file_id,
        } => {
            let input = InputFile::from_path(&file)
                .await
                .with_context(|| format!("Failed to read {}", file.display()))?;
            print(
                &storage.create_file(&bucket_id, &file_id, input, None).await?,
                output,
            )
        },
        StorageCommand::Download {
            bucket_id,
            file_id,
            out,
        } => {
            let data = storage.get_file_download(&bucket_id, &file_id).await?;
            tokio::fs::write(&out, &data)
                .await
                .with_context(|| format!("Failed to write {}", out.display()))?;
            eprintln!("Wrote {} bytes to {}", data.len(), out.display());
            Ok(())
        },
    }
}

fn as_strs(values: &[String]) -> Vec<&str> {
    values.iter().map(String::as_str).collect()
}

fn print<T: Serialize>(value: &T, output: OutputFormat) -> Result<()> {
    let rendered = match output {
        OutputFormat::Json => serde_json::to_string_pretty(value)?,
        OutputFormat::Yaml => serde_yaml::to_string(value)?,
    };
    println!("{}", rendered.trim_end());
    Ok(())
}
