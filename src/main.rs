// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Result, anyhow, Context};
use log::{warn, info, LevelFilter, Log, Metadata, Record, Level, SetLoggerError};
use std::io::Write;
use std::path::{Path, PathBuf};
use clap::{Parser, ValueEnum, CommandFactory, Subcommand};
use clap_complete::{generate, Shell};

use crate::app_config::{Config, TranslationProvider};
use crate::app_controller::Controller;
use crate::translation::PromptStrategy;

mod app_config;
mod app_controller;
mod errors;
mod file_utils;
mod language_utils;
mod providers;
mod translation;

/// CLI Wrapper for TranslationProvider to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliTranslationProvider {
    Gemini,
    Ollama,
}

impl From<CliTranslationProvider> for TranslationProvider {
    fn from(cli_provider: CliTranslationProvider) -> Self {
        match cli_provider {
            CliTranslationProvider::Gemini => TranslationProvider::Gemini,
            CliTranslationProvider::Ollama => TranslationProvider::Ollama,
        }
    }
}

/// CLI Wrapper for PromptStrategy to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliPromptStrategy {
    Minimal,
    SingleExample,
    MultiExample,
    StepwiseReasoning,
}

impl From<CliPromptStrategy> for PromptStrategy {
    fn from(cli_strategy: CliPromptStrategy) -> Self {
        match cli_strategy {
            CliPromptStrategy::Minimal => PromptStrategy::Minimal,
            CliPromptStrategy::SingleExample => PromptStrategy::SingleExample,
            CliPromptStrategy::MultiExample => PromptStrategy::MultiExample,
            CliPromptStrategy::StepwiseReasoning => PromptStrategy::StepwiseReasoning,
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
    /// Translate text using the glossary-first pipeline (default command)
    Translate(TranslateArgs),

    /// Inspect or edit the persistent glossary
    Glossary {
        #[command(subcommand)]
        command: GlossaryCommands,
    },

    /// Generate shell completions for traduki
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand, Debug)]
enum GlossaryCommands {
    /// List glossary entries for the configured target language
    List,

    /// Add a phrase translation to the glossary
    Add {
        /// Source phrase
        phrase: String,

        /// Target language identifier
        language: String,

        /// Translation of the phrase
        translation: String,
    },
}

#[derive(Parser, Debug)]
struct TranslateArgs {
    /// Text to translate
    #[arg(value_name = "TEXT")]
    text: Option<String>,

    /// Translate each non-empty line of this file instead
    #[arg(short, long, conflicts_with = "text")]
    input_file: Option<PathBuf>,

    /// Output file for batch results (JSON lines)
    #[arg(short, long, requires = "input_file")]
    output_file: Option<PathBuf>,

    /// Target language identifier (e.g., 'French', 'es')
    #[arg(short, long)]
    target_language: Option<String>,

    /// Source language identifier; omit to let the model detect it
    #[arg(short, long)]
    source_language: Option<String>,

    /// Force a prompt strategy instead of the automatic classifier
    #[arg(long, value_enum)]
    strategy: Option<CliPromptStrategy>,

    /// Translation provider to use
    #[arg(short, long, value_enum)]
    provider: Option<CliTranslationProvider>,

    /// Model name to use for translation
    #[arg(short, long)]
    model: Option<String>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,

    /// Only test the provider connection, then exit
    #[arg(long)]
    check: bool,
}

/// traduki - glossary-first AI translation
///
/// A translation orchestrator that answers repeated requests from a
/// persistent glossary and reaches for a generative model only on misses.
#[derive(Parser, Debug)]
#[command(name = "traduki")]
#[command(version = "0.1.0")]
#[command(about = "Glossary-first AI translation orchestrator")]
#[command(long_about = "traduki resolves translation requests from a persistent glossary first
and invokes a generative-language provider only when retrieval misses.

EXAMPLES:
    traduki \"hello\" -t Spanish                # Glossary hit, no model call
    traduki \"how are you today\" -t French     # Model path with auto strategy
    traduki --strategy stepwise-reasoning \"...\" -t German
    traduki -i notes.txt -o results.jsonl -t Spanish
    traduki glossary add \"see you\" French \"à plus\"
    traduki completions bash > traduki.bash

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default
    one will be created automatically.

SUPPORTED PROVIDERS:
    gemini - Google Generative Language API (requires API key)
    ollama - Local Ollama server (default: llama3.2)")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    translate: TranslateArgs,
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

    // @returns: ANSI color code for log level
    fn color_for_level(level: Level) -> &'static str {
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
            let now = chrono::Local::now().format("%H:%M:%S%.3f");
            let color = Self::color_for_level(record.level());

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

    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "traduki", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Glossary { command }) => {
            let config = load_config(&cli.translate).await?;
            let controller = Controller::with_config(config, None)?;
            match command {
                GlossaryCommands::List => controller.list_glossary(),
                GlossaryCommands::Add { phrase, language, translation } => {
                    controller.add_glossary_entry(&phrase, &language, &translation)
                }
            }
        }
        Some(Commands::Translate(args)) => run_translate(args).await,
        None => run_translate(cli.translate).await,
    }
}

async fn load_config(options: &TranslateArgs) -> Result<Config> {
    // If log level is set via command line, apply it immediately
    if let Some(cmd_log_level) = &options.log_level {
        apply_log_level(&cmd_log_level.clone().into());
    }

    // Load or create configuration
    let config_path = &options.config_path;
    let mut config = if Path::new(config_path).exists() {
        let content = std::fs::read_to_string(config_path)
            .context(format!("Failed to open config file: {}", config_path))?;

        serde_json::from_str::<Config>(&content)
            .context(format!("Failed to parse config file: {}", config_path))?
    } else {
        // Create default configuration if not exists
        warn!("Config file not found at '{}', creating default config.", config_path);

        let config = Config::default();
        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;

        std::fs::write(config_path, config_json)
            .context(format!("Failed to write default config to file: {}", config_path))?;

        config
    };

    // Override config with CLI options if provided
    if let Some(provider) = &options.provider {
        config.translation.provider = provider.clone().into();
    }

    if let Some(model) = &options.model {
        let provider_str = config.translation.provider.to_lowercase_string();
        if let Some(provider_config) = config.translation.available_providers.iter_mut()
            .find(|p| p.provider_type == provider_str) {
            provider_config.model = model.clone();
        }
    }

    if let Some(target_lang) = &options.target_language {
        config.target_language = target_lang.clone();
    }

    if let Some(source_lang) = &options.source_language {
        config.source_language = Some(source_lang.clone());
    }

    if let Some(log_level) = &options.log_level {
        config.log_level = log_level.clone().into();
    } else {
        apply_log_level(&config.log_level);
    }

    config.validate().context("Configuration validation failed")?;

    Ok(config)
}

fn apply_log_level(level: &app_config::LogLevel) {
    let filter = match level {
        app_config::LogLevel::Error => LevelFilter::Error,
        app_config::LogLevel::Warn => LevelFilter::Warn,
        app_config::LogLevel::Info => LevelFilter::Info,
        app_config::LogLevel::Debug => LevelFilter::Debug,
        app_config::LogLevel::Trace => LevelFilter::Trace,
    };
    log::set_max_level(filter);
}

async fn run_translate(options: TranslateArgs) -> Result<()> {
    let config = load_config(&options).await?;
    let strategy = options.strategy.clone().map(Into::into);

    let controller = Controller::with_config(config, strategy)?;

    if options.check {
        controller.check_connection().await?;
        info!("Connection check passed");
        return Ok(());
    }

    if let Some(input_file) = &options.input_file {
        return controller.run_file(input_file, options.output_file.clone()).await;
    }

    let text = options.text.as_deref().ok_or_else(|| {
        anyhow!("TEXT is required unless --input-file is given")
    })?;

    controller.run_text(text).await
}
