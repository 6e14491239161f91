use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, error, info};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::app_config::{AwsCredentials, Config};
use crate::errors::{AppError, InputError};
use crate::generation::GenerationClient;
use crate::prompts::ScriptPromptBuilder;
use crate::providers::Provider;
use crate::providers::bedrock::Bedrock;
use crate::script_request::ScriptRequest;

// @module: Application controller for script generation

/// Main application controller for script generation
///
/// Plays the form's part: validates the request, builds the prompt, waits
/// for the generation client while a spinner runs, and hands back the script.
pub struct Controller<P: Provider = Bedrock> {
    // @field: App configuration
    config: Config,
    // @field: Client used for generation
    client: GenerationClient<P>,
    // @field: Whether to draw a spinner while waiting
    show_progress: bool,
}

impl Controller<Bedrock> {
    /// Create a controller for Bedrock, reading credentials from the environment
    pub fn with_config(config: Config) -> Result<Self> {
        let credentials = AwsCredentials::from_env();
        if credentials.is_none() {
            debug!("No AWS credentials in the environment");
        }
        Self::with_config_and_credentials(config, credentials)
    }

    // @method: Create a Bedrock controller with explicit credentials
    pub fn with_config_and_credentials(config: Config, credentials: Option<AwsCredentials>) -> Result<Self> {
        let provider = Bedrock::new(Duration::from_secs(config.generation.timeout_secs));
        Self::with_provider(config, credentials, provider)
    }
}

impl<P: Provider> Controller<P> {
    /// Create a controller around any provider
    pub fn with_provider(config: Config, credentials: Option<AwsCredentials>, provider: P) -> Result<Self> {
        config.validate().context("Configuration validation failed")?;
        let client = GenerationClient::new(&config, credentials, provider);

        Ok(Self {
            config,
            client,
            show_progress: true,
        })
    }

    /// Enable or disable the spinner
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// The configuration in use
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The generation client in use
    pub fn client(&self) -> &GenerationClient<P> {
        &self.client
    }

    /// Validate the request and build its prompt
    pub fn build_prompt(&self, request: &ScriptRequest) -> Result<String, InputError> {
        request.validate()?;
        Ok(ScriptPromptBuilder::new(request)
            .with_template(self.config.generation.template())
            .build())
    }

    /// Generate a script for the request
    ///
    /// Input errors are returned before anything is sent.
    pub async fn run(&self, request: &ScriptRequest) -> Result<String, AppError> {
        let prompt = self.build_prompt(request)?;
        debug!("Prompt ({} chars):\n{}", prompt.len(), prompt);

        let spinner = self.spinner();
        let start_time = Instant::now();
        let result = self.client.generate(&prompt).await;
        spinner.finish_and_clear();

        match result {
            Ok(script) => {
                info!(
                    "Script generated successfully in {}",
                    Self::format_duration(start_time.elapsed())
                );
                Ok(script)
            }
            Err(e) => {
                error!("Failed to write the script: {}", e);
                Err(e.into())
            }
        }
    }

    /// Save a generated script to a file
    pub fn save_script(&self, script: &str, output_path: &Path) -> Result<PathBuf> {
        if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        let mut content = script.trim_end().to_string();
        content.push('\n');
        std::fs::write(output_path, content)
            .with_context(|| format!("Failed to write script to: {}", output_path.display()))?;

        info!("Success: {}", output_path.display());
        Ok(output_path.to_path_buf())
    }

    fn spinner(&self) -> ProgressBar {
        if !self.show_progress {
            return ProgressBar::hidden();
        }

        let spinner = ProgressBar::new_spinner();
        let style = ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg} [{elapsed_precise}]")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());
        spinner.set_style(style);
        spinner.set_message("Assigning AI professional to write your YT script…");
        spinner.enable_steady_tick(Duration::from_millis(120));
        spinner
    }

    // Format duration in a human-readable format
    fn format_duration(duration: Duration) -> String {
        let total_seconds = duration.as_secs();
        let minutes = total_seconds / 60;
        let seconds = total_seconds % 60;

        if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}.{:03}s", seconds, duration.subsec_millis())
        }
    }
}
