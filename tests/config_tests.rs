//! Configuration loading tests

use kafka_acl_graph::config::{
    LogFormat, OutputFormat, TokenScheme, load_config, load_config_from_str,
};
use kafka_acl_graph::error::ConfigError;

const MINIMAL_CONFIG: &str = r#"
[aiven]
project = "data"
service = "kafka-prod"
token = "test-token"
"#;

const FULL_CONFIG: &str = r#"
[aiven]
url = "https://aiven.internal.example.com/v1"
project = "data"
service = "kafka-prod"
token = "test-token"
token_scheme = "bearer"
timeout_secs = 60
max_retries = 5

[cache]
ttl_secs = 30
max_schemas = 10

[server]
host = "0.0.0.0"
port = 9000
public_url = "https://acl.example.com"

[renderer]
command = "/usr/local/bin/dot"
format = "png"
work_dir = "/var/tmp/kafka-acl-graph"

[logging]
level = "debug"
format = "json"
"#;

/// Env vars read by the loader; cleared around each env test
const ENV_VARS: &[&str] = &[
    "AIVEN_PROJECT",
    "AIVEN_SERVICE",
    "AIVEN_API_TOKEN",
    "SERVER_NAME",
    "KAFKA_ACL_GRAPH__AIVEN__PROJECT",
    "KAFKA_ACL_GRAPH__SERVER__PORT",
];

fn clear_env() {
    for var in ENV_VARS {
        // SAFETY: env tests run serially
        unsafe { std::env::remove_var(var) };
    }
}

fn write_config(dir: &tempfile::TempDir, content: &str) -> String {
    let path = dir.path().join("config.toml");
    std::fs::write(&path, content).unwrap();
    path.to_string_lossy().into_owned()
}

#[test]
fn test_minimal_config() {
    let config = load_config_from_str(MINIMAL_CONFIG).unwrap();

    assert_eq!(config.aiven.url, "https://api.aiven.io/v1");
    assert_eq!(config.aiven.project, "data");
    assert_eq!(config.aiven.service, "kafka-prod");
    assert_eq!(config.aiven.token_scheme, TokenScheme::AivenV1);
    assert_eq!(config.aiven.timeout_secs, 30);
    assert_eq!(config.aiven.max_retries, 3);
    assert_eq!(config.cache.ttl_secs, 600);
    assert_eq!(config.cache.max_schemas, 100);
    assert_eq!(config.server.host, "127.0.0.1");
    assert_eq!(config.server.port, 8080);
    assert_eq!(config.renderer.command, "dot");
    assert_eq!(config.renderer.format, OutputFormat::Svg);
    assert_eq!(config.logging.format, LogFormat::Pretty);
}

#[test]
fn test_full_config() {
    let config = load_config_from_str(FULL_CONFIG).unwrap();

    assert_eq!(config.aiven.url, "https://aiven.internal.example.com/v1");
    assert_eq!(config.aiven.token_scheme, TokenScheme::Bearer);
    assert_eq!(config.aiven.timeout_secs, 60);
    assert_eq!(config.aiven.max_retries, 5);
    assert_eq!(
        config.aiven.service_url(),
        "https://aiven.internal.example.com/v1/project/data/service/kafka-prod"
    );

    assert_eq!(config.cache.ttl_secs, 30);
    assert_eq!(config.cache.max_schemas, 10);

    assert_eq!(config.server.port, 9000);
    assert_eq!(config.server.base_url(), "https://acl.example.com");

    assert_eq!(config.renderer.command, "/usr/local/bin/dot");
    assert_eq!(config.renderer.format, OutputFormat::Png);
    assert_eq!(
        config.renderer.work_dir,
        std::path::PathBuf::from("/var/tmp/kafka-acl-graph")
    );

    assert_eq!(config.logging.level, "debug");
    assert_eq!(config.logging.format, LogFormat::Json);
}

#[test]
fn test_empty_config_uses_defaults() {
    let config = load_config_from_str("").unwrap();
    assert!(config.aiven.project.is_empty());
    assert!(config.aiven.token.is_none());
    assert_eq!(config.server.base_url(), "http://127.0.0.1:8080");
}

#[test]
fn test_token_is_redacted_in_debug() {
    let config = load_config_from_str(MINIMAL_CONFIG).unwrap();
    let debug = format!("{:?}", config);
    assert!(!debug.contains("test-token"));
}

#[test]
fn test_invalid_token_scheme() {
    let toml = r#"
[aiven]
token_scheme = "basic"
"#;
    assert!(matches!(
        load_config_from_str(toml),
        Err(ConfigError::Load(_))
    ));
}

#[test]
fn test_empty_renderer_command_rejected() {
    let toml = r#"
[renderer]
command = "  "
"#;
    assert!(matches!(
        load_config_from_str(toml),
        Err(ConfigError::Missing { .. })
    ));
}

#[test]
fn test_excessive_retries_rejected() {
    let toml = r#"
[aiven]
max_retries = 64
"#;
    assert!(matches!(
        load_config_from_str(toml),
        Err(ConfigError::Invalid { .. })
    ));

    let toml = r#"
[aiven]
max_retries = 10
"#;
    assert_eq!(load_config_from_str(toml).unwrap().aiven.max_retries, 10);
}

#[test]
fn test_missing_explicit_file() {
    let result = load_config(Some("/nonexistent/kafka-acl-graph.toml"), false);
    assert!(matches!(result, Err(ConfigError::Load(_))));
}

#[test]
#[serial_test::serial]
fn test_load_from_file() {
    clear_env();
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(&dir, FULL_CONFIG);

    let config = load_config(Some(&path), true).unwrap();
    assert_eq!(config.aiven.project, "data");
    assert_eq!(config.server.port, 9000);
}

#[test]
#[serial_test::serial]
fn test_strict_load_requires_credentials() {
    clear_env();
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(&dir, "[server]\nport = 9000\n");

    assert!(matches!(
        load_config(Some(&path), true),
        Err(ConfigError::Missing { .. })
    ));
    // Offline use needs no credentials
    assert!(load_config(Some(&path), false).is_ok());
}

#[test]
#[serial_test::serial]
fn test_conventional_env_vars() {
    clear_env();
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(&dir, "[server]\nport = 9000\n");

    unsafe {
        std::env::set_var("AIVEN_PROJECT", "env-project");
        std::env::set_var("AIVEN_SERVICE", "env-service");
        std::env::set_var("AIVEN_API_TOKEN", "env-token");
        std::env::set_var("SERVER_NAME", "https://acl.example.com");
    }

    let config = load_config(Some(&path), true).unwrap();
    assert_eq!(config.aiven.project, "env-project");
    assert_eq!(config.aiven.service, "env-service");
    assert_eq!(
        config.aiven.token.as_ref().map(|t| t.expose_secret()),
        Some("env-token")
    );
    assert_eq!(config.server.base_url(), "https://acl.example.com");

    clear_env();
}

#[test]
#[serial_test::serial]
fn test_prefixed_env_vars_override_file() {
    clear_env();
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(&dir, MINIMAL_CONFIG);

    unsafe {
        std::env::set_var("KAFKA_ACL_GRAPH__AIVEN__PROJECT", "prefixed-project");
        std::env::set_var("KAFKA_ACL_GRAPH__SERVER__PORT", "9100");
    }

    let config = load_config(Some(&path), true).unwrap();
    assert_eq!(config.aiven.project, "prefixed-project");
    assert_eq!(config.server.port, 9100);
    assert_eq!(config.aiven.service, "kafka-prod");

    clear_env();
}

#[test]
#[serial_test::serial]
fn test_conventional_env_var_wins_over_prefixed() {
    clear_env();
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(&dir, MINIMAL_CONFIG);

    unsafe {
        std::env::set_var("KAFKA_ACL_GRAPH__AIVEN__PROJECT", "prefixed-project");
        std::env::set_var("AIVEN_PROJECT", "conventional-project");
    }

    let config = load_config(Some(&path), true).unwrap();
    assert_eq!(config.aiven.project, "conventional-project");

    clear_env();
}
