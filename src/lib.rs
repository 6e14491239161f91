/*!
 * # ytscript - AI-powered YouTube script generator
 *
 * A Rust library for writing YouTube video scripts with a hosted LLM.
 *
 * ## Features
 *
 * - Collect the video's topic, tone, audiences, length, language and use case
 * - Build a structured script-writing prompt from those choices
 * - Generate the script through Amazon Bedrock
 * - Retry failed generations with randomized exponential backoff
 * - Configurable model, sampling parameters and retry policy
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management and credentials
 * - `script_request`: The user's choices and their validation
 * - `prompts`: Prompt templates and the script prompt builder
 * - `retry`: Bounded retry with randomized exponential backoff
 * - `generation`: Generation client (payload, response parsing, retries)
 * - `providers`: Client implementations for generation endpoints:
 *   - `providers::bedrock`: Amazon Bedrock Runtime client
 *   - `providers::mock`: Scripted provider for tests
 * - `app_controller`: Main application controller
 * - `language_utils`: Target language resolution
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod errors;
pub mod generation;
pub mod language_utils;
pub mod prompts;
pub mod providers;
pub mod retry;
pub mod script_request;

// Re-export main types for easier usage
pub use app_config::{AwsCredentials, Config};
pub use app_controller::Controller;
pub use errors::{AppError, ConfigError, GenerationError, InputError, ProviderError};
pub use generation::GenerationClient;
pub use prompts::{PromptTemplate, ScriptPromptBuilder};
pub use retry::{Jitter, RetryPolicy};
pub use script_request::{Audience, ScriptRequest, Tone, UseCase, VideoLength};
