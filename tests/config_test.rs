//! Tests for TOML configuration.

use arcade_tictactoe::{
    ArcadeConfig, DEFAULT_FEE_LAMPORTS, DEFAULT_RECEIVER, Difficulty, FULL_DEPTH, SearchMode,
};
use std::io::Write;
use std::time::Duration;

#[test]
fn test_defaults() {
    let config = ArcadeConfig::default();
    assert_eq!(*config.fee_lamports(), DEFAULT_FEE_LAMPORTS);
    assert_eq!(DEFAULT_FEE_LAMPORTS, 10_000_000);
    assert_eq!(config.receiver(), DEFAULT_RECEIVER);
    assert_eq!(*config.difficulty(), Difficulty::Medium);
    assert_eq!(config.opponent_delay(), Duration::from_millis(500));
    assert_eq!(config.payment_timeout(), Duration::from_secs(60));
    assert!(!*config.depth_discount());
}

#[test]
fn test_empty_toml_uses_defaults() {
    let config = ArcadeConfig::from_toml("").unwrap();
    assert_eq!(config, ArcadeConfig::default());
}

#[test]
fn test_parse_full_config() {
    let toml = r#"
fee_lamports = 5000000
receiver = "FeeReceiver111"
difficulty = "hard"
opponent_delay_ms = 100
payment_timeout_ms = 30000
depth_discount = true

[policy.easy]
mode = "random"

[policy.hard]
mode = "minimax"
depth = 5
"#;
    let config = ArcadeConfig::from_toml(toml).unwrap();
    assert_eq!(*config.fee_lamports(), 5_000_000);
    assert_eq!(*config.difficulty(), Difficulty::Hard);
    assert_eq!(config.opponent_delay(), Duration::from_millis(100));
    assert!(*config.depth_discount());

    let policy = config.policy();
    assert_eq!(policy.mode(Difficulty::Easy), SearchMode::Random);
    assert_eq!(policy.mode(Difficulty::Medium), SearchMode::Minimax { depth: 3 });
    assert_eq!(policy.mode(Difficulty::Hard), SearchMode::Minimax { depth: 5 });

    let request = config.payment_request();
    assert_eq!(request.fee_lamports, 5_000_000);
    assert_eq!(request.receiver, "FeeReceiver111");
}

#[test]
fn test_default_hard_is_exhaustive() {
    let config = ArcadeConfig::default();
    assert_eq!(
        config.policy().mode(Difficulty::Hard),
        SearchMode::Minimax { depth: FULL_DEPTH }
    );
}

#[test]
fn test_rejects_invalid_values() {
    let err = ArcadeConfig::from_toml("receiver = \"  \"").unwrap_err();
    assert!(err.message.contains("receiver"));

    let err = ArcadeConfig::from_toml("payment_timeout_ms = 0").unwrap_err();
    assert!(err.message.contains("payment_timeout_ms"));

    let err = ArcadeConfig::from_toml("difficulty = \"impossible\"").unwrap_err();
    assert!(err.message.starts_with("Failed to parse config"));
}

#[test]
fn test_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "difficulty = \"easy\"").unwrap();
    writeln!(file, "opponent_delay_ms = 0").unwrap();

    let config = ArcadeConfig::from_file(file.path()).unwrap();
    assert_eq!(*config.difficulty(), Difficulty::Easy);
    assert_eq!(config.opponent_delay(), Duration::ZERO);
    assert_eq!(config.receiver(), DEFAULT_RECEIVER);
}

#[test]
fn test_missing_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = ArcadeConfig::from_file(dir.path().join("missing.toml")).unwrap_err();
    assert!(err.message.contains("Failed to read config file"));
    assert!(err.to_string().starts_with("Config error:"));
}

#[test]
fn test_builder_overrides() {
    let config = ArcadeConfig::default()
        .with_difficulty(Difficulty::Hard)
        .with_opponent_delay(Duration::from_millis(20))
        .with_payment_timeout(Duration::from_millis(250));
    assert_eq!(*config.difficulty(), Difficulty::Hard);
    assert_eq!(config.opponent_delay(), Duration::from_millis(20));
    assert_eq!(config.payment_timeout(), Duration::from_millis(250));
}
