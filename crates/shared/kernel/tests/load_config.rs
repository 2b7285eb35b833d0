use hearth_domain::config::AppConfig;
use hearth_kernel::config::{ConfigError, load_config};
use std::io::Write;
use tempfile::NamedTempFile;

fn toml_file(contents: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn file_values_override_defaults() {
    let file = toml_file(
        r#"
        [storage]
        data_dir = "/var/lib/hearth"

        [journal]
        capacity = 40
        "#,
    );

    let cfg: AppConfig = load_config(Some(file.path())).unwrap();
    assert_eq!(cfg.storage.data_dir, std::path::PathBuf::from("/var/lib/hearth"));
    assert_eq!(cfg.journal.capacity, 40);
    assert_eq!(cfg.export.recent_entries, 10);
}

#[test]
fn explicit_missing_file_is_an_error() {
    let result: Result<AppConfig, ConfigError> = load_config(Some("/definitely/not/here.toml"));
    assert!(matches!(result, Err(ConfigError::Config { .. })));
}
