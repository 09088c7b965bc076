use std::{collections::HashMap, fs, time::Duration};

use nova_config::{
    ConfigLoadError, ConfigLoader, EnvConfig, TokenMode,
    validation::ConfigGuardRailError,
};
use tempfile::TempDir;

fn env_from(pairs: &[(&str, &str)]) -> EnvConfig {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect();
    EnvConfig::from_lookup(|key| vars.get(key).cloned())
}

fn write_config(contents: &str) -> (TempDir, std::path::PathBuf) {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("nova.toml");
    fs::write(&path, contents).expect("write config");
    (dir, path)
}

#[test]
fn defaults_apply_without_file_or_env() {
    let load = ConfigLoader::new()
        .load_with_env(env_from(&[]))
        .expect("defaults load");
    let config = load.config;

    assert_eq!(config.server.host, "0.0.0.0");
    assert_eq!(config.server.port, 3030);
    assert!(!config.dev_mode);
    assert_eq!(
        config.cors.allowed_origins,
        vec!["http://localhost:5173", "http://localhost:3000"]
    );
    assert_eq!(config.metadata_api.language, "en-US");
    assert_eq!(config.metadata_api.timeout, Duration::from_secs(15));
    assert_eq!(config.anime_api.timeout, Duration::from_secs(30));
    assert_eq!(config.sports_api.timeout, Duration::from_secs(10));
    assert_eq!(config.auth.token_mode, TokenMode::Mock);

    let seed = config.auth.seed_user.expect("seed user enabled by default");
    assert_eq!(seed.username, "user");
    assert_eq!(seed.password, "password");
    assert_eq!(seed.email, "user@nova.com");

    let messages: Vec<&str> =
        load.warnings.iter().map(|w| w.message.as_str()).collect();
    assert!(messages.iter().any(|m| m.contains("TMDB_API_KEY")));
    assert!(messages.iter().any(|m| m.contains("No nova.toml")));
}

#[test]
fn file_values_override_defaults_and_env_overrides_file() {
    let (_dir, path) = write_config(
        r#"
        [server]
        host = "127.0.0.1"
        port = 4000

        [metadata]
        api_key = "from-file"
        timeout = "3s"

        [sports]
        base_url = "http://sports.internal/api"
        "#,
    );

    let load = ConfigLoader::new()
        .with_config_path(&path)
        .load_with_env(env_from(&[
            ("SERVER_PORT", "5050"),
            ("TMDB_API_KEY", "from-env"),
        ]))
        .expect("config loads");
    let config = load.config;

    assert_eq!(config.server.host, "127.0.0.1");
    assert_eq!(config.server.port, 5050);
    assert_eq!(config.metadata_api.api_key.as_deref(), Some("from-env"));
    assert_eq!(config.metadata_api.timeout, Duration::from_secs(3));
    assert_eq!(config.sports_api.base_url, "http://sports.internal/api");
    assert_eq!(config.metadata.config_path.as_deref(), Some(path.as_path()));
}

#[test]
fn config_path_from_env_is_honoured() {
    let (_dir, path) = write_config("[server]\nport = 7070\n");
    let path_str = path.to_string_lossy().to_string();

    let load = ConfigLoader::new()
        .load_with_env(env_from(&[("NOVA_CONFIG_PATH", &path_str)]))
        .expect("config loads");

    assert_eq!(load.config.server.port, 7070);
}

#[test]
fn missing_explicit_config_is_an_error() {
    let dir = TempDir::new().expect("temp dir");
    let err = ConfigLoader::new()
        .with_config_path(dir.path().join("absent.toml"))
        .load_with_env(env_from(&[]))
        .expect_err("missing file should fail");

    assert!(matches!(err, ConfigLoadError::MissingConfig { .. }));
}

#[test]
fn malformed_toml_reports_parse_error() {
    let (_dir, path) = write_config("[server\nport = 1");
    let err = ConfigLoader::new()
        .with_config_path(&path)
        .load_with_env(env_from(&[]))
        .expect_err("parse should fail");

    assert!(matches!(err, ConfigLoadError::Parse { .. }));
}

#[test]
fn invalid_duration_is_rejected() {
    let err = ConfigLoader::new()
        .load_with_env(env_from(&[("SPORTS_API_TIMEOUT", "soon")]))
        .expect_err("duration should fail");

    assert!(matches!(
        err,
        ConfigLoadError::InvalidDuration { key: "SPORTS_API_TIMEOUT", .. }
    ));
}

#[test]
fn wildcard_cors_requires_dev_mode() {
    let err = ConfigLoader::new()
        .load_with_env(env_from(&[("CORS_ALLOWED_ORIGINS", "*")]))
        .expect_err("wildcard should fail outside dev mode");
    assert!(matches!(
        err,
        ConfigLoadError::GuardRail(ConfigGuardRailError::DangerousCorsWildcard)
    ));

    let load = ConfigLoader::new()
        .load_with_env(env_from(&[
            ("CORS_ALLOWED_ORIGINS", "*"),
            ("DEV_MODE", "true"),
        ]))
        .expect("wildcard allowed in dev mode");
    assert!(load.config.cors.is_wildcard_included());
}

#[test]
fn signed_tokens_need_a_real_key() {
    let err = ConfigLoader::new()
        .load_with_env(env_from(&[("AUTH_TOKEN_MODE", "signed")]))
        .expect_err("default key should be refused");
    assert!(matches!(
        err,
        ConfigLoadError::GuardRail(ConfigGuardRailError::WeakSecret {
            field: "AUTH_TOKEN_KEY",
            ..
        })
    ));

    let load = ConfigLoader::new()
        .load_with_env(env_from(&[
            ("AUTH_TOKEN_MODE", "signed"),
            ("AUTH_TOKEN_KEY", "0123456789abcdef0123456789abcdef"),
        ]))
        .expect("strong key accepted");
    assert_eq!(load.config.auth.token_mode, TokenMode::Signed);
}

#[test]
fn unknown_token_mode_is_rejected() {
    let err = ConfigLoader::new()
        .load_with_env(env_from(&[("AUTH_TOKEN_MODE", "jwt")]))
        .expect_err("unknown mode");
    assert!(matches!(err, ConfigLoadError::InvalidTokenMode { .. }));
}

#[test]
fn invalid_upstream_url_is_rejected() {
    let err = ConfigLoader::new()
        .load_with_env(env_from(&[("ANIME_API_BASE_URL", "not a url")]))
        .expect_err("bad url");
    assert!(matches!(
        err,
        ConfigLoadError::GuardRail(ConfigGuardRailError::InvalidUpstreamUrl {
            upstream: "anime",
            ..
        })
    ));
}

#[test]
fn seed_user_can_be_disabled() {
    let (_dir, path) =
        write_config("[auth.seed_user]\nenabled = false\n");
    let load = ConfigLoader::new()
        .with_config_path(&path)
        .load_with_env(env_from(&[]))
        .expect("config loads");
    assert!(load.config.auth.seed_user.is_none());

    let load = ConfigLoader::new()
        .load_with_env(env_from(&[("AUTH_SEED_DISABLED", "1")]))
        .expect("config loads");
    assert!(load.config.auth.seed_user.is_none());
}

#[test]
fn invalid_port_and_flags_are_rejected() {
    let err = ConfigLoader::new()
        .load_with_env(env_from(&[("SERVER_PORT", "http")]))
        .expect_err("port should fail");
    assert!(matches!(
        err,
        ConfigLoadError::InvalidValue { key: "SERVER_PORT", ref value } if value == "http"
    ));

    let err = ConfigLoader::new()
        .load_with_env(env_from(&[("SERVER_PORT", "70000")]))
        .expect_err("out of range port should fail");
    assert!(matches!(
        err,
        ConfigLoadError::InvalidValue { key: "SERVER_PORT", .. }
    ));

    let err = ConfigLoader::new()
        .load_with_env(env_from(&[("DEV_MODE", "maybe")]))
        .expect_err("flag should fail");
    assert!(matches!(
        err,
        ConfigLoadError::InvalidValue { key: "DEV_MODE", .. }
    ));

    let err = ConfigLoader::new()
        .load_with_env(env_from(&[("AUTH_SEED_DISABLED", "sometimes")]))
        .expect_err("flag should fail");
    assert!(matches!(
        err,
        ConfigLoadError::InvalidValue { key: "AUTH_SEED_DISABLED", .. }
    ));
}

#[test]
fn env_port_overrides_file_port() {
    let (_dir, path) = write_config("dev_mode = true\n[server]\nport = 4000\n");
    let load = ConfigLoader::new()
        .with_config_path(&path)
        .load_with_env(env_from(&[("SERVER_PORT", " 8088 "), ("DEV_MODE", "off")]))
        .expect("config loads");

    assert_eq!(load.config.server.port, 8088);
    assert!(!load.config.dev_mode);
}

#[test]
fn explicit_env_file_is_loaded() {
    let dir = TempDir::new().expect("temp dir");
    let env_path = dir.path().join("nova.env");
    fs::write(&env_path, "NOVA_LOADER_TEST_MARKER=1\n").expect("write env");
    let (_config_dir, config_path) = write_config("[server]\nport = 6060\n");

    let load = ConfigLoader::new()
        .with_config_path(&config_path)
        .with_env_file(&env_path)
        .load()
        .expect("config loads");
    assert!(load.config.metadata.env_file_loaded);
    assert_eq!(
        std::env::var("NOVA_LOADER_TEST_MARKER").as_deref(),
        Ok("1")
    );

    let load = ConfigLoader::new()
        .with_config_path(&config_path)
        .with_env_file(dir.path().join("absent.env"))
        .load()
        .expect("missing env file is not fatal");
    assert!(!load.config.metadata.env_file_loaded);
}
