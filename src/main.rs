// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{anyhow, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{debug, info, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::Write;
use std::path::PathBuf;

use ytscript::app_config::{self, Config};
use ytscript::script_request::LANGUAGE_CHOICES;
use ytscript::{Audience, Controller, ScriptRequest, Tone, UseCase, VideoLength};

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

fn level_filter(level: &app_config::LogLevel) -> LevelFilter {
    match level {
        app_config::LogLevel::Error => LevelFilter::Error,
        app_config::LogLevel::Warn => LevelFilter::Warn,
        app_config::LogLevel::Info => LevelFilter::Info,
        app_config::LogLevel::Debug => LevelFilter::Debug,
        app_config::LogLevel::Trace => LevelFilter::Trace,
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Write a YouTube script with AI
    Generate(GenerateArgs),

    /// List the tones, audiences, lengths, languages and use cases
    Options,

    /// Generate shell completions for ytscript
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct GenerateArgs {
    /// What the video is about, in a few sentences
    #[arg(short, long, value_name = "TEXT")]
    topic: Option<String>,

    /// Tone and style
    #[arg(long, default_value_t = Tone::default())]
    tone: Tone,

    /// Target audience; repeat or separate with commas for several
    #[arg(short, long = "audience", value_name = "AUDIENCE", value_delimiter = ',')]
    audiences: Vec<Audience>,

    /// Video length
    #[arg(long, default_value_t = VideoLength::default())]
    length: VideoLength,

    /// Script language: a name such as 'Italian' or an ISO code such as 'it'
    #[arg(long, default_value = "English")]
    language: String,

    /// What kind of video the script is for
    #[arg(short, long, default_value_t = UseCase::default())]
    use_case: UseCase,

    /// Write the script to this file instead of standard output
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print the prompt and exit without calling the model
    #[arg(long)]
    print_prompt: bool,

    /// AWS region of the model
    #[arg(long)]
    region: Option<String>,

    /// Model identifier to invoke
    #[arg(short, long)]
    model_id: Option<String>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: PathBuf,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,

    /// Do not draw the progress spinner
    #[arg(long)]
    no_progress: bool,
}

/// ytscript - AI-powered YouTube script generator
///
/// Describe your video, choose tone, audience, length, language and use case,
/// and get a ready-to-record script written by a model on Amazon Bedrock.
#[derive(Parser, Debug)]
#[command(name = "ytscript")]
#[command(version)]
#[command(about = "AI-powered YouTube script generator")]
#[command(long_about = "ytscript builds a script-writing prompt from your choices and sends it to a model on Amazon Bedrock.

EXAMPLES:
    ytscript generate -t \"Top 5 budget laptops\" -a tech-enthusiasts --use-case product-reviews
    ytscript generate -t \"Sourdough for beginners\" -a beginners,foodies --tone humorous --length medium
    ytscript generate -t \"Morning routines\" -a students --language es -o script.md
    ytscript generate -t \"Rust in 100 seconds\" -a students --print-prompt
    ytscript options                            # List every choice
    ytscript completions bash > ytscript.bash   # Generate bash completions

CREDENTIALS:
    AWS_ACCESS_KEY_ID and AWS_SECRET_ACCESS_KEY are required, AWS_SESSION_TOKEN is
    optional. AWS_REGION and BEDROCK_MODEL_ID override the configured region and
    model. A .env file in the current directory is loaded first.

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default one
    will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,
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
        let logger = Box::new(CustomLogger::new(LevelFilter::Trace));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: Emoji and ANSI color for log level
    fn decoration_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("❌ ", "1;31"),
            Level::Warn => ("🚧 ", "1;33"),
            Level::Info => (" ", "1;32"),
            Level::Debug => ("🔍 ", "1;36"),
            Level::Trace => ("📋 ", "1;35"),
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level && metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        // SDK internals log through the same facade; keep only our own records
        if !record.target().starts_with("ytscript") {
            return;
        }
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let (emoji, color) = Self::decoration_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(stderr, "\x1B[{}m{} {} {}\x1B[0m", color, now, emoji, record.args());
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

    let cli = CommandLineOptions::parse();

    match cli.command {
        Commands::Generate(args) => run_generate(args).await,
        Commands::Options => {
            print_options();
            Ok(())
        }
        Commands::Completions { shell } => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "ytscript", &mut std::io::stdout());
            Ok(())
        }
    }
}

async fn run_generate(options: GenerateArgs) -> Result<()> {
    // If log level is set via command line, apply it immediately
    if let Some(cmd_log_level) = &options.log_level {
        log::set_max_level(level_filter(&cmd_log_level.clone().into()));
    }

    match dotenvy::dotenv() {
        Ok(path) => debug!("Loaded environment from {}", path.display()),
        Err(e) if e.not_found() => {}
        Err(e) => return Err(anyhow!("Failed to load .env file: {}", e)),
    }

    // A dry run leaves the working directory untouched
    let mut config = if options.print_prompt {
        Config::load_or_default(&options.config_path)?
    } else {
        Config::load_or_create(&options.config_path)?
    };
    config.apply_env_overrides();

    // Override config with CLI options if provided
    if let Some(region) = &options.region {
        config.generation.region = region.clone();
    }
    if let Some(model_id) = &options.model_id {
        config.generation.model_id = model_id.clone();
    }
    if let Some(log_level) = &options.log_level {
        config.log_level = log_level.clone().into();
    } else {
        // Just update the max level without reinitializing the logger
        log::set_max_level(level_filter(&config.log_level));
    }

    let controller = Controller::with_config(config)?.with_progress(!options.no_progress);

    let request = ScriptRequest::new(options.topic.unwrap_or_default())
        .tone(options.tone)
        .audiences(options.audiences)
        .length(options.length)
        .language(&options.language)
        .use_case(options.use_case);

    if options.print_prompt {
        let prompt = controller.build_prompt(&request)?;
        println!("{}", prompt);
        return Ok(());
    }

    let script = controller.run(&request).await?;

    match &options.output {
        Some(path) => {
            controller.save_script(&script, path)?;
        }
        None => {
            println!("```\n{}\n```", script);
        }
    }
    info!("🎉 Script generated successfully!");

    Ok(())
}

fn print_options() {
    fn print_section<T: 'static>(title: &str, items: &[T], id: fn(&T) -> &'static str, label: fn(&T) -> &'static str) {
        println!("{}:", title);
        for item in items {
            println!("  {:<24} {}", id(item), label(item));
        }
        println!();
    }

    print_section("Tones (--tone)", Tone::ALL, Tone::id, Tone::label);
    print_section("Audiences (--audience)", Audience::ALL, Audience::id, Audience::label);
    print_section("Lengths (--length)", VideoLength::ALL, VideoLength::id, VideoLength::label);
    print_section("Use cases (--use-case)", UseCase::ALL, UseCase::id, UseCase::label);

    println!("Languages (--language):");
    for language in LANGUAGE_CHOICES.iter().filter(|l| **l != "Other") {
        println!("  {}", language);
    }
    println!("  ...or any other language name or ISO 639 code");
}
