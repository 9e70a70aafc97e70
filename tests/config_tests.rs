use std::io::Write;

use serde::Deserialize;
use tempfile::NamedTempFile;

use conductor::error::{ConfigError, Error};
use conductor::infrastructure::config::settings::Config;

const FULL: &str = r#"
[server]
addr = "127.0.0.1:8080"
debug = true
startup_grace_ms = 250

[logging]
level = "debug"
format = "json"

[venues.alpha]
url = "wss://alpha.example/ws"
symbols = ["BTC_JPY", "ETH_JPY"]

[venues.beta]

[robot]
trade_algorithms = ["spread"]
arbitrage_algorithms = ["cross"]
arbitrage_interval_ms = 750

[robot.settings.spread]
threshold = 0.25

[notifier]
log = false
"#;

fn write_config(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp config");
    file.write_all(contents.as_bytes()).expect("write temp config");
    file
}

#[test]
fn loads_full_document_from_file() {
    let file = write_config(FULL);
    let config = Config::load(file.path()).unwrap();

    assert_eq!(config.server.addr, "127.0.0.1:8080");
    assert!(config.server.debug);
    assert_eq!(config.server.startup_grace().as_millis(), 250);
    assert_eq!(config.logging.level, "debug");
    assert_eq!(config.logging.format, "json");
    assert!(config.venues.is_enabled("alpha"));
    assert!(!config.venues.is_enabled("beta"));
    assert!(!config.venues.is_enabled("gamma"));
    assert_eq!(config.robot.arbitrage_interval().as_millis(), 750);
    assert!(!config.notifier.log);
}

#[test]
fn venue_section_decodes_into_connector_settings() {
    #[derive(Debug, Deserialize)]
    struct AlphaSettings {
        url: String,
        symbols: Vec<String>,
    }

    let config = Config::parse_toml(FULL).unwrap();
    let section = config.venues.get("alpha").unwrap();
    let settings: AlphaSettings = section.deserialize().unwrap();

    assert_eq!(section.owner(), "alpha");
    assert_eq!(settings.url, "wss://alpha.example/ws");
    assert_eq!(settings.symbols, vec!["BTC_JPY", "ETH_JPY"]);
}

#[test]
fn algorithm_settings_default_to_empty() {
    let config = Config::parse_toml(FULL).unwrap();

    let spread = config.robot.algorithm_settings("spread");
    assert_eq!(spread.get("threshold").and_then(|v| v.as_float()), Some(0.25));

    let cross = config.robot.algorithm_settings("cross");
    assert!(cross.is_empty());
    assert_eq!(cross.owner(), "cross");
}

#[test]
fn missing_file_is_a_read_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = Config::load(dir.path().join("absent.toml")).unwrap_err();

    assert!(matches!(err, Error::Config(ConfigError::ReadFile(_))));
}

#[test]
fn malformed_toml_is_a_parse_error() {
    let err = Config::parse_toml("[server\naddr = ").unwrap_err();
    assert!(matches!(err, Error::Config(ConfigError::Parse(_))));
}

#[test]
fn mistyped_field_is_a_parse_error() {
    let err = Config::parse_toml("[robot]\narbitrage_interval_ms = \"fast\"\n").unwrap_err();
    assert!(matches!(err, Error::Config(ConfigError::Parse(_))));
}

#[test]
fn zero_startup_grace_is_invalid() {
    let err = Config::parse_toml("[server]\nstartup_grace_ms = 0\n").unwrap_err();
    assert!(err.to_string().contains("startup_grace_ms"));
}
