/*!
 * Error types for the ytscript application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

/// Errors in the user's script request, reported before anything is sent
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    /// The topic is empty or whitespace-only
    #[error("Please provide the main points about your video")]
    EmptyTopic,

    /// No target audience was selected
    #[error("Please select at least one target audience")]
    NoAudience,

    /// A choice value that matches none of the known options
    #[error("Unknown {field} '{value}'")]
    UnknownChoice {
        /// Name of the form field
        field: &'static str,
        /// Value that was supplied
        value: String,
    },
}

/// Errors in the process configuration that no retry can fix
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Access key id or secret key is not available
    #[error("AWS credentials are not set: AWS_ACCESS_KEY_ID and AWS_SECRET_ACCESS_KEY are required")]
    MissingCredentials,
}

/// Errors that can occur when working with provider APIs
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when building the payload or parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String,
    },

    /// Error establishing or maintaining a connection
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Error related to rate limiting
    #[error("Rate limit exceeded: {0}")]
    RateLimitExceeded(String),

    /// Error with authentication
    #[error("Authentication error: {0}")]
    AuthenticationError(String),

    /// The call succeeded but the generated text was empty
    #[error("No text was generated by the model")]
    EmptyResponse,
}

/// Outcome of a generation that did not produce a script
#[derive(Error, Debug)]
pub enum GenerationError {
    /// Fatal configuration problem, detected before the first attempt
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigError),

    /// Every attempt failed; carries the error of the last one
    #[error("Generation failed after {attempts} attempt(s): {last_error}")]
    Exhausted {
        /// Number of attempts made
        attempts: u32,
        /// Error returned by the final attempt
        #[source]
        last_error: ProviderError,
    },
}

impl GenerationError {
    /// Number of provider calls made before giving up
    pub fn attempts(&self) -> u32 {
        match self {
            Self::Configuration(_) => 0,
            Self::Exhausted { attempts, .. } => *attempts,
        }
    }
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error in the user's input
    #[error("Input error: {0}")]
    Input(#[from] InputError),

    /// Error in the configuration
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Error from script generation
    #[error("Generation error: {0}")]
    Generation(#[from] GenerationError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
