// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{anyhow, Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{info, warn, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::fs::File;
use std::io::BufReader;
use std::io::Write;
use std::path::Path;

use crate::app_config::Config;
use app_controller::Controller;

mod app_config;
mod app_controller;
mod database;
mod errors;
mod providers;
mod speech;
mod storage;
mod transcript;

/// CLI Wrapper for SchemaVariant to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliSchemaVariant {
    PairList,
    TitleBody,
}

impl From<CliSchemaVariant> for transcript::SchemaVariant {
    fn from(cli_variant: CliSchemaVariant) -> Self {
        match cli_variant {
            CliSchemaVariant::PairList => transcript::SchemaVariant::PairList,
            CliSchemaVariant::TitleBody => transcript::SchemaVariant::TitleBody,
        }
    }
}

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create bilingual audio content from a web article URL (default command)
    #[command(alias = "process")]
    Process(ProcessArgs),

    /// List created content for a tenant
    List {
        /// Tenant to list content for (defaults to the configured tenant)
        #[arg(short, long)]
        tenant: Option<String>,

        /// Configuration file path
        #[arg(short, long, default_value = "conf.json")]
        config_path: String,
    },

    /// Generate shell completions for articleplay
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct ProcessArgs {
    /// Web article URL to process
    #[arg(value_name = "URL")]
    url: String,

    /// Tenant the created content belongs to
    #[arg(short, long)]
    tenant: Option<String>,

    /// Model name to use for transcription
    #[arg(short, long)]
    model: Option<String>,

    /// JSON shape the model is asked to emit
    #[arg(short, long, value_enum)]
    schema_variant: Option<CliSchemaVariant>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// ArticlePlay - Listen to any article, bilingually
///
/// Turns a web article URL into a sentence-aligned English/Japanese
/// transcript with one audio clip per sentence, cataloged locally.
#[derive(Parser, Debug)]
#[command(name = "articleplay")]
#[command(version = "1.0.0")]
#[command(about = "Bilingual article transcription and audio tool")]
#[command(long_about = "ArticlePlay transcribes a web article into sentence-aligned
English/Japanese pairs with a generative model, synthesizes one audio clip per
sentence, and catalogs the result locally.

EXAMPLES:
    articleplay https://example.com/post          # Process using default config
    articleplay -m gemini-1.5-pro <URL>           # Use a specific model
    articleplay -t alice <URL>                    # Create content for tenant 'alice'
    articleplay --log-level debug <URL>           # Process with debug logging
    articleplay list                              # List created content
    articleplay completions bash > ap.bash        # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default
    one will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Web article URL to process
    #[arg(value_name = "URL")]
    url: Option<String>,

    /// Tenant the created content belongs to
    #[arg(short, long)]
    tenant: Option<String>,

    /// Model name to use for transcription
    #[arg(short, long)]
    model: Option<String>,

    /// JSON shape the model is asked to emit
    #[arg(short, long, value_enum)]
    schema_variant: Option<CliSchemaVariant>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color for log level
    fn get_color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let color = Self::get_color_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(stderr, "{}{} {}\x1B[0m", color, now, record.args());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize the logger once with info level by default
    // We'll update the level after loading the config if needed
    CustomLogger::init(LevelFilter::Info)?;

    // Parse command line arguments using clap
    let cli = CommandLineOptions::parse();

    // Handle subcommands
    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "articleplay", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::List {
            tenant,
            config_path,
        }) => run_list(tenant, &config_path).await,
        Some(Commands::Process(args)) => run_process(args).await,
        None => {
            // Default behavior - use top-level args for convenience
            let url = cli
                .url
                .ok_or_else(|| anyhow!("URL is required when no subcommand is specified"))?;

            let process_args = ProcessArgs {
                url,
                tenant: cli.tenant,
                model: cli.model,
                schema_variant: cli.schema_variant,
                config_path: cli.config_path,
                log_level: cli.log_level,
            };
            run_process(process_args).await
        }
    }
}

async fn run_process(options: ProcessArgs) -> Result<()> {
    // If log level is set via command line, apply it immediately
    if let Some(cmd_log_level) = &options.log_level {
        log::set_max_level(level_filter_for(&cmd_log_level.clone().into()));
    }

    let mut config = load_or_create_config(&options.config_path)?;

    // Override config with CLI options if provided
    if let Some(tenant) = &options.tenant {
        config.tenant_id = tenant.clone();
    }

    if let Some(model) = &options.model {
        config.provider.model = model.clone();
    }

    if let Some(variant) = &options.schema_variant {
        config.schema_variant = variant.clone().into();
    }

    if let Some(log_level) = &options.log_level {
        config.log_level = log_level.clone().into();
    }

    // Validate the configuration after loading and overriding
    config.validate().context("Configuration validation failed")?;

    // If log level was not set via command line, update it from config now
    if options.log_level.is_none() {
        log::set_max_level(level_filter_for(&config.log_level));
    }

    let controller = Controller::with_config(config)?;

    let outcome = controller.process_url(&options.url).await?;

    info!(
        "Created content {} with {} sentence pairs and {} audio clips",
        outcome.content_id,
        outcome.document.body.len(),
        outcome.audio_count
    );
    if outcome.recovered {
        warn!("The transcript was recovered from a truncated model response");
    }
    if !outcome.document.title.is_empty() {
        println!("{}", outcome.document.title);
    }
    println!("{}", outcome.content_id);

    Ok(())
}

async fn run_list(tenant: Option<String>, config_path: &str) -> Result<()> {
    let config = load_or_create_config(config_path)?;
    let tenant = tenant.unwrap_or_else(|| config.tenant_id.clone());

    let repository = database::Repository::new_default()?;
    let records = repository.list_contents(&tenant).await?;

    if records.is_empty() {
        println!("No content for tenant '{}'", tenant);
        return Ok(());
    }

    for record in records {
        println!(
            "{}  {:<10}  {:>3} clips  {}  {}",
            record.content_id,
            record.status.to_string(),
            record.audio_count,
            record.created_at,
            if record.title.is_empty() {
                record.url.as_str()
            } else {
                record.title.as_str()
            }
        );
    }

    Ok(())
}

fn load_or_create_config(config_path: &str) -> Result<Config> {
    if Path::new(config_path).exists() {
        // Load existing configuration
        let file = File::open(config_path)
            .context(format!("Failed to open config file: {}", config_path))?;

        let reader = BufReader::new(file);
        let config: Config = serde_json::from_reader(reader)
            .context(format!("Failed to parse config file: {}", config_path))?;

        Ok(config)
    } else {
        // Create default configuration if not exists
        warn!(
            "Config file not found at '{}', creating default config.",
            config_path
        );

        let config = Config::default();

        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;

        std::fs::write(config_path, config_json)
            .context(format!("Failed to write default config to file: {}", config_path))?;

        Ok(config)
    }
}

fn level_filter_for(level: &app_config::LogLevel) -> LevelFilter {
    match level {
        app_config::LogLevel::Error => LevelFilter::Error,
        app_config::LogLevel::Warn => LevelFilter::Warn,
        app_config::LogLevel::Info => LevelFilter::Info,
        app_config::LogLevel::Debug => LevelFilter::Debug,
        app_config::LogLevel::Trace => LevelFilter::Trace,
    }
}
