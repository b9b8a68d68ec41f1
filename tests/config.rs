use clap::Parser;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;
use ticketdesk::cli::Args;
use ticketdesk::config::{ApiConfig, Config, FileConfig, SessionConfig};

fn env_of(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |name: &str| vars.get(name).cloned()
}

fn file_config() -> FileConfig {
    FileConfig {
        api: ApiConfig {
            base_url: Some("https://file.example/api".to_string()),
            timeout_secs: Some(12),
        },
        session: SessionConfig {
            verbose: Some(true),
            path: Some("/tmp/from-file.json".to_string()),
        },
    }
}

#[test]
fn test_cli_flag_beats_env_and_file() {
    let args = Args::parse_from(["ticketdesk", "--api-url", "https://cli.example/api", "whoami"]);
    let env = env_of(&[("TICKETDESK_API_URL", "https://env.example/api")]);

    let config = Config::from_sources(&args, file_config(), env).unwrap();

    assert_eq!(config.api_url, "https://cli.example/api");
}

#[test]
fn test_env_beats_file() {
    let args = Args::parse_from(["ticketdesk", "whoami"]);
    let env = env_of(&[
        ("TICKETDESK_API_URL", "https://env.example/api"),
        ("TICKETDESK_TIMEOUT", "5"),
        ("TICKETDESK_VERBOSE", "no"),
        ("TICKETDESK_SESSION_FILE", "/tmp/env-session.json"),
    ]);

    let config = Config::from_sources(&args, file_config(), env).unwrap();

    assert_eq!(config.api_url, "https://env.example/api");
    assert_eq!(config.timeout_secs, 5);
    assert!(!config.verbose);
    assert_eq!(config.session_path, PathBuf::from("/tmp/env-session.json"));
}

#[test]
fn test_file_beats_defaults() {
    let args = Args::parse_from(["ticketdesk", "tasks"]);

    let config = Config::from_sources(&args, file_config(), env_of(&[])).unwrap();

    assert_eq!(config.api_url, "https://file.example/api");
    assert_eq!(config.timeout_secs, 12);
    assert!(config.verbose);
    assert_eq!(config.session_path, PathBuf::from("/tmp/from-file.json"));
}

#[test]
fn test_defaults_and_env_expansion() {
    let args = Args::parse_from(["ticketdesk", "-v", "whoami"]);
    let mut file = FileConfig::default();
    file.api.base_url = Some("https://${DESK_HOST}/api".to_string());
    file.session.path = Some("/tmp/session.json".to_string());
    let env = env_of(&[("DESK_HOST", "desk.example"), ("TICKETDESK_TIMEOUT", "0")]);

    let config = Config::from_sources(&args, file, env).unwrap();

    assert_eq!(config.api_url, "https://desk.example/api");
    assert_eq!(config.timeout_secs, 30);
    assert!(config.verbose);
}

#[test]
fn test_load_yaml_and_json_files() {
    let temp_dir = TempDir::new().unwrap();
    let yaml = temp_dir.path().join(".ticketdesk.yaml");
    fs::write(
        &yaml,
        "api:\n  base_url: https://yaml.example/api\n  timeout_secs: 9\nsession:\n  verbose: true\n",
    )
    .unwrap();
    let json = temp_dir.path().join(".ticketdesk.json");
    fs::write(&json, r#"{"api": {"base_url": "https://json.example/api"}}"#).unwrap();

    let from_yaml = FileConfig::load_from(&yaml).unwrap();
    assert_eq!(from_yaml.api.base_url.as_deref(), Some("https://yaml.example/api"));
    assert_eq!(from_yaml.api.timeout_secs, Some(9));
    assert_eq!(from_yaml.session.verbose, Some(true));

    let from_json = FileConfig::load_from(&json).unwrap();
    assert_eq!(from_json.api.base_url.as_deref(), Some("https://json.example/api"));
    assert_eq!(from_json.session.path, None);
}

#[test]
fn test_malformed_file_is_an_error() {
    let temp_dir = TempDir::new().unwrap();
    let yaml = temp_dir.path().join("broken.yaml");
    fs::write(&yaml, "api: [unclosed").unwrap();

    let err = FileConfig::load_from(&yaml).unwrap_err();
    assert!(format!("{:#}", err).contains("Failed to parse YAML config file"));
}
