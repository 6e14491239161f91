/*!
 * Tests for application configuration functionality
 */

use std::collections::HashMap;

use anyhow::Result;
use ytscript::app_config::{AwsCredentials, Config, LogLevel, MAX_RETRY_WAIT_SECS};
use ytscript::RetryPolicy;
use crate::common;

fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

/// Test default configuration values
#[test]
fn test_default_config_withNoParameters_shouldHaveCorrectDefaults() {
    let config = Config::default();

    assert_eq!(config.generation.region, "us-east-1");
    assert_eq!(config.generation.model_id, "anthropic.claude-v2");
    assert_eq!(config.generation.max_output_tokens, 3000);
    assert_eq!(config.generation.temperature, 0.7);
    assert_eq!(config.generation.top_p, 0.9);
    assert_eq!(config.generation.stop_sequences, vec!["\n\n".to_string()]);
    assert!(config.generation.prompt_template.is_none());

    assert_eq!(config.retry.max_attempts, 6);
    assert_eq!(config.retry.min_wait_secs, 1);
    assert_eq!(config.retry.max_wait_secs, 60);

    assert_eq!(config.log_level, LogLevel::Info);
    assert!(config.validate().is_ok());
}

/// Test configuration validation
#[test]
fn test_config_validation_withVariousConfigs_shouldValidateCorrectly() {
    let mut config = Config::default();

    config.generation.temperature = 1.5;
    assert!(config.validate().is_err());
    config.generation.temperature = 0.7;

    config.generation.top_p = -0.1;
    assert!(config.validate().is_err());
    config.generation.top_p = 0.9;

    config.generation.model_id = "  ".to_string();
    assert!(config.validate().is_err());
    config.generation.model_id = "anthropic.claude-v2".to_string();

    config.retry.max_attempts = 0;
    assert!(config.validate().is_err());
    config.retry.max_attempts = 6;

    config.retry.min_wait_secs = 90;
    assert!(config.validate().is_err());
    config.retry.min_wait_secs = 1;

    config.retry.multiplier = 0.0;
    assert!(config.validate().is_err());
    config.retry.multiplier = 1.0;

    config.generation.prompt_template = Some("No placeholders here".to_string());
    assert!(config.validate().is_err());
    config.generation.prompt_template = Some("Write about {topic}".to_string());
    assert!(config.validate().is_ok());
}

/// Test that retry bounds too large for a wait are rejected
#[test]
fn test_config_validation_withOversizedRetryBounds_shouldFail() {
    let mut config = Config::default();
    config.retry.max_wait_secs = u64::MAX;
    config.retry.multiplier = 1e20;
    assert!(config.validate().is_err());

    config.retry.max_wait_secs = MAX_RETRY_WAIT_SECS + 1;
    config.retry.multiplier = 1.0;
    assert!(config.validate().is_err());

    config.retry.max_wait_secs = MAX_RETRY_WAIT_SECS;
    config.retry.multiplier = 1e20;
    assert!(config.validate().is_err());

    config.retry.multiplier = MAX_RETRY_WAIT_SECS as f64;
    assert!(config.validate().is_ok());

    let policy = RetryPolicy::from_config(&config.retry);
    for attempt in [1, 64, 65, 1000] {
        assert!(policy.wait_for(attempt) <= std::time::Duration::from_secs(MAX_RETRY_WAIT_SECS));
    }
}

/// Test that a partial config file is completed with defaults
#[test]
fn test_deserialize_withPartialJson_shouldFillDefaults() -> Result<()> {
    let json = r#"{ "generation": { "model_id": "meta.llama3-70b-instruct-v1:0" }, "log_level": "debug" }"#;
    let config: Config = serde_json::from_str(json)?;

    assert_eq!(config.generation.model_id, "meta.llama3-70b-instruct-v1:0");
    assert_eq!(config.generation.region, "us-east-1");
    assert_eq!(config.retry.max_attempts, 6);
    assert_eq!(config.log_level, LogLevel::Debug);
    Ok(())
}

/// Test that a missing config file is created with defaults
#[test]
fn test_loadOrCreate_withMissingFile_shouldWriteDefaults() -> Result<()> {
    let dir = common::create_temp_dir()?;
    let path = dir.path().join("conf.json");

    let config = Config::load_or_create(&path)?;
    assert_eq!(config, Config::default());
    assert!(path.exists());

    let reloaded = Config::load_or_create(&path)?;
    assert_eq!(reloaded, config);
    Ok(())
}

/// Test that a missing config file is not written when only reading
#[test]
fn test_loadOrDefault_withMissingFile_shouldNotWriteFile() -> Result<()> {
    let dir = common::create_temp_dir()?;
    let path = dir.path().join("conf.json");

    let config = Config::load_or_default(&path)?;

    assert_eq!(config, Config::default());
    assert!(!path.exists());
    Ok(())
}

/// Test that an existing config file is read when only reading
#[test]
fn test_loadOrDefault_withExistingFile_shouldReadIt() -> Result<()> {
    let dir = common::create_temp_dir()?;
    let path = common::create_test_file(dir.path(), "conf.json", r#"{ "log_level": "trace" }"#)?;

    let config = Config::load_or_default(&path)?;

    assert_eq!(config.log_level, LogLevel::Trace);
    Ok(())
}

/// Test loading an existing config file
#[test]
fn test_loadOrCreate_withExistingFile_shouldReadIt() -> Result<()> {
    let dir = common::create_temp_dir()?;
    let path = common::create_test_file(
        dir.path(),
        "conf.json",
        r#"{ "retry": { "max_attempts": 3, "max_wait_secs": 10 } }"#,
    )?;

    let config = Config::load_or_create(&path)?;
    assert_eq!(config.retry.max_attempts, 3);
    assert_eq!(config.retry.max_wait_secs, 10);
    assert_eq!(config.retry.min_wait_secs, 1);
    Ok(())
}

/// Test that an invalid config file is reported
#[test]
fn test_loadOrCreate_withInvalidJson_shouldFail() -> Result<()> {
    let dir = common::create_temp_dir()?;
    let path = common::create_test_file(dir.path(), "conf.json", "{ not json")?;

    let error = Config::load_or_create(&path).unwrap_err();
    assert!(error.to_string().contains("Failed to parse config file"));
    Ok(())
}

/// Test region and model overrides
#[test]
fn test_applyOverrides_shouldPreferAwsRegionOverDefaultRegion() {
    let mut config = Config::default();
    config.apply_overrides_from(lookup(&[
        ("AWS_REGION", "eu-west-3"),
        ("AWS_DEFAULT_REGION", "us-west-2"),
        ("BEDROCK_MODEL_ID", "anthropic.claude-instant-v1"),
    ]));

    assert_eq!(config.generation.region, "eu-west-3");
    assert_eq!(config.generation.model_id, "anthropic.claude-instant-v1");

    let mut config = Config::default();
    config.apply_overrides_from(lookup(&[("AWS_REGION", " "), ("AWS_DEFAULT_REGION", "us-west-2")]));
    assert_eq!(config.generation.region, "us-west-2");
    assert_eq!(config.generation.model_id, "anthropic.claude-v2");
}

/// Test reading credentials through a lookup
#[test]
fn test_credentials_fromLookup_shouldRequireKeyAndSecret() {
    let credentials = AwsCredentials::from_lookup(lookup(&[
        ("AWS_ACCESS_KEY_ID", "AKIDEXAMPLE"),
        ("AWS_SECRET_ACCESS_KEY", "secret"),
        ("AWS_SESSION_TOKEN", "token"),
    ]))
    .expect("credentials should be present");
    assert_eq!(credentials.access_key_id, "AKIDEXAMPLE");
    assert_eq!(credentials.session_token.as_deref(), Some("token"));

    assert!(AwsCredentials::from_lookup(lookup(&[("AWS_ACCESS_KEY_ID", "AKIDEXAMPLE")])).is_none());
    assert!(AwsCredentials::from_lookup(lookup(&[
        ("AWS_ACCESS_KEY_ID", ""),
        ("AWS_SECRET_ACCESS_KEY", "secret"),
    ]))
    .is_none());

    let without_token = AwsCredentials::from_lookup(lookup(&[
        ("AWS_ACCESS_KEY_ID", "AKIDEXAMPLE"),
        ("AWS_SECRET_ACCESS_KEY", "secret"),
        ("AWS_SESSION_TOKEN", "  "),
    ]))
    .expect("credentials should be present");
    assert!(without_token.session_token.is_none());
}

/// Test that debug output never shows the secret
#[test]
fn test_credentials_debug_shouldRedactSecrets() {
    let credentials = AwsCredentials::new("AKIDEXAMPLE", "super-secret", Some("session".to_string()));
    let debug = format!("{:?}", credentials);

    assert!(debug.contains("AKIDEXAMPLE"));
    assert!(!debug.contains("super-secret"));
    assert!(!debug.contains("session\""));
}
