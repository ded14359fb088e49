use super::{load_settings_with, normalize_database_url, prepare_database_url, Settings};

use std::{collections::HashMap, fs, path::Path};

fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |name| vars.get(name).cloned()
}

#[test]
fn defaults_apply_without_file_or_env() {
    let (settings, warnings) =
        load_settings_with(Path::new("/nonexistent/feedback.toml"), env_from(&[]));
    assert_eq!(settings, Settings::default());
    assert!(warnings.is_empty());
    assert_eq!(settings.page_size, 5);
}

#[test]
fn file_values_override_defaults_and_env_overrides_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("feedback.toml");
    fs::write(
        &path,
        "database_url = \"sqlite://./from-file.db\"\npage_size = 8\nlog_filter = \"debug\"\n",
    )
    .expect("write config");

    let (from_file, _) = load_settings_with(&path, env_from(&[]));
    assert_eq!(from_file.database_url, "sqlite://./from-file.db");
    assert_eq!(from_file.page_size, 8);
    assert_eq!(from_file.log_filter, "debug");

    let (from_env, _) = load_settings_with(
        &path,
        env_from(&[
            ("FEEDBACK_DATABASE_URL", "sqlite://./from-env.db"),
            ("APP__PAGE_SIZE", "3"),
        ]),
    );
    assert_eq!(from_env.database_url, "sqlite://./from-env.db");
    assert_eq!(from_env.page_size, 3);
}

#[test]
fn unreadable_file_and_bad_page_sizes_fall_back() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("feedback.toml");
    fs::write(&path, "page_size = \"many\"").expect("write config");

    let (settings, warnings) = load_settings_with(
        &path,
        env_from(&[("FEEDBACK_PAGE_SIZE", "zero"), ("APP__PAGE_SIZE", "0")]),
    );
    assert_eq!(settings.page_size, 5);
    assert_eq!(warnings.len(), 3, "{warnings:?}");
    assert!(warnings[0].contains("unreadable settings file"));
    assert!(warnings[1].contains("FEEDBACK_PAGE_SIZE=zero"));
    assert!(warnings[2].contains("page size must be positive"));
}

#[test]
fn normalizes_plain_file_path_to_sqlite_url() {
    assert_eq!(
        normalize_database_url("./data/test.db"),
        "sqlite://./data/test.db"
    );
    assert_eq!(normalize_database_url("  "), Settings::default().database_url);
    assert_eq!(normalize_database_url("sqlite::memory:"), "sqlite::memory:");
}

#[test]
fn keeps_windows_absolute_path_with_single_sqlite_colon() {
    assert_eq!(
        normalize_database_url("sqlite:C:\\Users\\alice\\test.db"),
        "sqlite:C:/Users/alice/test.db"
    );
    assert_eq!(
        normalize_database_url("C:\\Users\\alice\\test.db"),
        "sqlite:C:/Users/alice/test.db"
    );
    assert_eq!(
        normalize_database_url("sqlite://C:/Users/alice/test.db"),
        "sqlite:C:/Users/alice/test.db"
    );
}

#[test]
fn creates_parent_dir_for_sqlite_url() {
    let temp_root = tempfile::tempdir().expect("tempdir");
    let db_path = temp_root.path().join("data").join("test.db");

    let prepared = prepare_database_url(db_path.to_string_lossy().as_ref()).expect("prepare");
    assert!(prepared.starts_with("sqlite:"));
    assert!(temp_root.path().join("data").exists());
}

#[tokio::test]
async fn prepared_database_url_creates_openable_sqlite_file() {
    let temp_root = tempfile::tempdir().expect("tempdir");
    let db_path = temp_root.path().join("nested").join("feedback.db");

    let prepared = prepare_database_url(db_path.to_string_lossy().as_ref()).expect("prepare");
    let storage = storage::Storage::new(&prepared).await.expect("open sqlite");
    storage.health_check().await.expect("health");
    drop(storage);

    assert!(
        db_path.exists(),
        "database file should be created: {}",
        db_path.display()
    );
}
