use anyhow::Result;
use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use fastly_logging::config::Config;
use fastly_logging::fastly::auth::{self, API_KEY_ENV};
use fastly_logging::fastly::bigquery::{
    self, CreateBigQueryInput, DeleteBigQueryInput, ListBigQueryInput, UpdateBigQueryInput,
};
use fastly_logging::fastly::client::FastlyClient;
use fastly_logging::fastly::error::ValidationError;
use fastly_logging::fastly::http::format_api_error;
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::Level;
use tracing_subscriber::fmt::writer::MakeWriterExt;

/// Manage Fastly BigQuery logging endpoints
#[derive(Parser, Debug)]
#[command(name = "fastly-logging", version, about, long_about = None)]
struct Args {
    /// Fastly API token (defaults to FASTLY_API_KEY, then the config file)
    #[arg(long, global = true)]
    api_key: Option<String>,

    /// API endpoint override
    #[arg(long, global = true)]
    endpoint: Option<String>,

    /// Log level for debugging
    #[arg(long, value_enum, default_value = "off", global = true)]
    log_level: LogLevel,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json", global = true)]
    output: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List BigQuery endpoints of a service version
    List {
        #[command(flatten)]
        target: Target,
    },
    /// Create a BigQuery endpoint
    Create {
        #[command(flatten)]
        target: Target,
        /// Endpoint name
        #[arg(long)]
        name: String,
        /// GCP project ID
        #[arg(long)]
        project_id: String,
        /// BigQuery dataset
        #[arg(long)]
        dataset: String,
        /// BigQuery table
        #[arg(long)]
        table: String,
        /// Service account with write access to the dataset
        #[arg(long)]
        user: String,
        /// Service account private key
        #[arg(long, env = "FASTLY_BIGQUERY_SECRET_KEY", hide_env_values = true)]
        secret_key: String,
    },
    /// Rename a BigQuery endpoint
    Update {
        #[command(flatten)]
        target: Target,
        /// Current endpoint name
        #[arg(long)]
        name: String,
        /// New endpoint name
        #[arg(long)]
        new_name: String,
    },
    /// Delete a BigQuery endpoint
    Delete {
        #[command(flatten)]
        target: Target,
        /// Endpoint name
        #[arg(long)]
        name: String,
    },
    /// Remember a default service ID
    UseService {
        service: String,
    },
}

#[derive(ClapArgs, Debug)]
struct Target {
    /// Service ID (defaults to FASTLY_SERVICE_ID, then the config file)
    #[arg(short, long)]
    service: Option<String>,

    /// Service version number
    #[arg(long = "version", short = 'n')]
    service_version: u32,
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

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Json,
    Yaml,
}

fn setup_logging(level: LogLevel) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let tracing_level = level.to_tracing_level()?;

    let log_path = get_log_path();

    if let Some(parent) = log_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }

    let file = match std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
    {
        Ok(file) => file,
        Err(e) => {
            eprintln!("Failed to open log file {:?}: {}", log_path, e);
            return None;
        }
    };

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

    tracing::info!("fastly-logging started with log level: {:?}", level);
    tracing::info!("Log file: {:?}", log_path);

    Some(guard)
}

fn get_log_path() -> PathBuf {
    if let Some(config_dir) = dirs::config_dir() {
        return config_dir.join("fastly-logging").join("fastly-logging.log");
    }
    if let Some(home) = dirs::home_dir() {
        return home.join(".fastly-logging").join("fastly-logging.log");
    }
    PathBuf::from("fastly-logging.log")
}

fn render<T: Serialize>(value: &T, format: OutputFormat) -> Result<String> {
    Ok(match format {
        OutputFormat::Json => serde_json::to_string_pretty(value)?,
        OutputFormat::Yaml => serde_yaml::to_string(value)?,
    })
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    let _log_guard = setup_logging(args.log_level);

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("Command failed: {:#}", err);
            if let Some(validation) = err.downcast_ref::<ValidationError>() {
                eprintln!("Error: {}", validation);
            } else {
                eprintln!("Error: {}", format_api_error(&err));
            }
            ExitCode::FAILURE
        }
    }
}

fn connect(api_key: Option<&str>, endpoint: Option<&str>, config: &Config) -> Result<FastlyClient> {
    let Some(api_key) = auth::resolve_api_key(api_key, config.api_key.as_deref()) else {
        return Err(anyhow::anyhow!(
            "No Fastly API key configured. Set {} or use --api-key",
            API_KEY_ENV
        ));
    };

    let endpoint = config.effective_endpoint(endpoint);
    tracing::info!("Using endpoint: {}", endpoint);
    FastlyClient::with_endpoint(api_key, &endpoint)
}

async fn run(args: Args) -> Result<()> {
    let Args {
        api_key,
        endpoint,
        output,
        command,
        ..
    } = args;
    let mut config = Config::load();

    let client = || connect(api_key.as_deref(), endpoint.as_deref(), &config);
    let service = |target: &Target| config.effective_service(target.service.as_deref());

    let rendered = match command {
        Command::List { target } => {
            let input = ListBigQueryInput::new(&service(&target), target.service_version);
            let endpoints = bigquery::list_bigqueries(&client()?, &input).await?;
            render(&endpoints, output)?
        }
        Command::Create {
            target,
            name,
            project_id,
            dataset,
            table,
            user,
            secret_key,
        } => {
            let input = CreateBigQueryInput {
                service: service(&target),
                version: target.service_version,
                name,
                project_id,
                dataset,
                table,
                user,
                secret_key,
            };
            let endpoint = bigquery::create_bigquery(&client()?, &input).await?;
            render(&endpoint, output)?
        }
        Command::Update {
            target,
            name,
            new_name,
        } => {
            let input = UpdateBigQueryInput {
                service: service(&target),
                version: target.service_version,
                name,
                new_name,
            };
            let endpoint = bigquery::update_bigquery(&client()?, &input).await?;
            render(&endpoint, output)?
        }
        Command::Delete { target, name } => {
            let input = DeleteBigQueryInput {
                service: service(&target),
                version: target.service_version,
                name,
            };
            bigquery::delete_bigquery(&client()?, &input).await?;
            render(&serde_json::json!({ "status": "ok" }), output)?
        }
        Command::UseService { service } => {
            config.set_service(&service)?;
            format!("Default service set to {}", service)
        }
    };

    println!("{}", rendered.trim_end());
    Ok(())
}
