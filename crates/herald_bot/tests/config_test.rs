//! Configuration layering: bundled defaults, TOML file, environment.

use herald_bot::{HeraldConfig, ScheduleType};
use std::collections::HashMap;
use std::path::PathBuf;
use tempfile::TempDir;

fn no_env(_: &str) -> Option<String> {
    None
}

fn write_config(contents: &str) -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("custom.toml");
    std::fs::write(&path, contents).unwrap();
    (dir, path)
}

#[test]
fn test_bundled_defaults() {
    let (_dir, path) = write_config("");
    let config = HeraldConfig::load_with(Some(&path), no_env).unwrap();

    assert_eq!(config.paths().content_dir(), &PathBuf::from("./content/md_files"));
    assert_eq!(config.paths().image_dir(), &PathBuf::from("./content/images"));
    assert_eq!(config.paths().history_dir(), &PathBuf::from("./content/history"));

    assert_eq!(config.generation().host(), "http://localhost:11434");
    assert_eq!(config.generation().model(), "llama3.1:latest");
    assert_eq!(*config.generation().temperature(), 0.7);
    assert_eq!(*config.generation().max_tokens(), 100);

    assert_eq!(config.graph().base_url(), "https://graph.facebook.com");
    assert_eq!(config.graph().api_version(), "v20.0");

    assert!(config.facebook().credentials().is_none());
    assert!(config.instagram().credentials().is_none());

    assert_eq!(config.schedule().trigger(), &ScheduleType::Interval { seconds: 60 });
    assert_eq!(*config.schedule().poll_seconds(), 30);
    assert!(*config.schedule().halt_on_error());
}

#[test]
fn test_file_overrides_defaults() {
    let (_dir, path) = write_config(
        r#"
[paths]
image_dir = "/srv/images"

[generation]
model = "mistral:latest"

[schedule]
halt_on_error = false

[schedule.trigger]
type = "daily"
at = "14:00"
"#,
    );
    let config = HeraldConfig::load_with(Some(&path), no_env).unwrap();

    assert_eq!(config.paths().image_dir(), &PathBuf::from("/srv/images"));
    assert_eq!(config.paths().content_dir(), &PathBuf::from("./content/md_files"));
    assert_eq!(config.generation().model(), "mistral:latest");
    assert_eq!(config.generation().host(), "http://localhost:11434");
    assert_eq!(
        config.schedule().trigger(),
        &ScheduleType::Daily { at: "14:00".to_string() }
    );
    assert!(!*config.schedule().halt_on_error());
    assert_eq!(*config.schedule().poll_seconds(), 30);
}

#[test]
fn test_environment_overrides_file() {
    let (_dir, path) = write_config(
        r#"
[generation]
model = "mistral:latest"

[facebook]
page_id = "from-file"
"#,
    );
    let env: HashMap<&str, &str> = HashMap::from([
        ("OLLAMA_MODEL", "llama3.2:latest"),
        ("OLLAMA_HOST", "http://gpu-box:11434"),
        ("FACEBOOK_PAGE_ID", "12345"),
        ("FACEBOOK_ACCESS_TOKEN", "fb-token"),
        ("INSTAGRAM_ACCOUNT_ID", "178"),
        ("INSTAGRAM_ACCESS_TOKEN", "ig-token"),
        ("INSTAGRAM_PUBLIC_BASE_URL", "https://cdn.example.com/images"),
    ]);
    let config =
        HeraldConfig::load_with(Some(&path), |key| env.get(key).map(|v| v.to_string())).unwrap();

    assert_eq!(config.generation().model(), "llama3.2:latest");
    assert_eq!(config.generation().host(), "http://gpu-box:11434");
    assert_eq!(config.facebook().credentials(), Some(("12345", "fb-token")));
    assert_eq!(config.instagram().credentials(), Some(("178", "ig-token")));
    assert_eq!(
        config.instagram().public_base_url().as_deref(),
        Some("https://cdn.example.com/images")
    );
    assert!(config.validate().is_empty());
}

#[test]
fn test_empty_environment_values_ignored() {
    let (_dir, path) = write_config(
        r#"
[facebook]
page_id = "from-file"
access_token = "file-token"
"#,
    );
    let config = HeraldConfig::load_with(Some(&path), |key| match key {
        "FACEBOOK_PAGE_ID" => Some(String::new()),
        _ => None,
    })
    .unwrap();

    assert_eq!(config.facebook().credentials(), Some(("from-file", "file-token")));
}

#[test]
fn test_missing_explicit_file_is_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("absent.toml");

    assert!(HeraldConfig::load_with(Some(&path), no_env).is_err());
}

#[test]
fn test_validate_warnings() {
    let (_dir, path) = write_config(
        r#"
[facebook]
page_id = "12345"

[instagram]
account_id = "178"
access_token = "ig-token"

[schedule]
poll_seconds = 0

[schedule.trigger]
type = "cron"
expression = "bogus"
"#,
    );
    let config = HeraldConfig::load_with(Some(&path), no_env).unwrap();
    let warnings = config.validate();

    assert!(warnings.iter().any(|w| w.starts_with("Facebook disabled")));
    assert!(!warnings.iter().any(|w| w.starts_with("Instagram disabled")));
    assert!(warnings.iter().any(|w| w.contains("INSTAGRAM_PUBLIC_BASE_URL")));
    assert!(warnings.iter().any(|w| w.contains("invalid cron expression")));
    assert!(warnings.iter().any(|w| w.contains("poll_seconds")));
}
