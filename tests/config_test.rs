//! Tests for client configuration loading.

use goban_client::ClientConfig;
use std::io::Write;

#[test]
fn test_defaults() {
    let config = ClientConfig::default();
    assert_eq!(config.server_url, "http://127.0.0.1:3000");
    assert_eq!(config.board_size, 9);
    assert!(config.hit_radius_ratio > 0.0);
}

#[test]
fn test_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("goban.toml");
    let mut file = std::fs::File::create(&path).unwrap();
    writeln!(file, "server_url = \"http://games.example:9000\"").unwrap();
    writeln!(file, "board_size = 13").unwrap();

    let config = ClientConfig::from_file(&path).unwrap();
    assert_eq!(config.server_url, "http://games.example:9000");
    assert_eq!(config.board_size, 13);
    // Missing keys fall back to defaults.
    assert_eq!(config.hit_radius_ratio, ClientConfig::default().hit_radius_ratio);
}

#[test]
fn test_invalid_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("goban.toml");
    std::fs::write(&path, "server_url = [not toml").unwrap();

    let err = ClientConfig::from_file(&path).unwrap_err();
    assert!(err.message.contains("parse"));
}

#[test]
fn test_missing_file_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = ClientConfig::load_or_default(dir.path().join("absent.toml")).unwrap();
    assert_eq!(config.board_size, ClientConfig::default().board_size);
}
