//! Configuration loading tests.

use std::path::PathBuf;
use vidsplit::config;
use vidsplit_av::Container;

#[test]
fn loads_config_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("vidsplit.toml");
    std::fs::write(
        &path,
        r#"
        [library]
        path = "/srv/media/segments"

        [split]
        max_seconds = 45
        container = "mov"
        "#,
    )
    .unwrap();

    let config = config::load_config(&path).unwrap();
    assert_eq!(config.library.path, PathBuf::from("/srv/media/segments"));
    assert_eq!(config.split.max_seconds, 45);
    assert_eq!(config.split.confirm_threshold, 10);
    assert_eq!(config.split.container, Container::Mov);
}

#[test]
fn expands_tilde_in_library_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("vidsplit.toml");
    std::fs::write(&path, "[library]\npath = \"~/segments\"\n").unwrap();

    let config = config::load_config(&path).unwrap();
    assert!(!config.library.path.to_string_lossy().starts_with('~'));
}

#[test]
fn rejects_malformed_toml() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("vidsplit.toml");
    std::fs::write(&path, "[split\nmax_seconds = ").unwrap();

    assert!(config::load_config(&path).is_err());
}

#[test]
fn rejects_zero_confirm_threshold() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("vidsplit.toml");
    std::fs::write(&path, "[split]\nconfirm_threshold = 0\n").unwrap();

    assert!(config::load_config(&path).is_err());
}

#[test]
fn missing_custom_config_is_an_error() {
    assert!(config::load_config(std::path::Path::new("/nonexistent/vidsplit.toml")).is_err());
}
