use super::*;

use std::{
    collections::HashMap,
    env,
    path::PathBuf,
    time::{SystemTime, UNIX_EPOCH},
};

fn temp_settings_file(tag: &str, contents: &str) -> PathBuf {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let dir = env::temp_dir().join(format!("effect_cli_config_test_{tag}_{suffix}"));
    fs::create_dir_all(&dir).expect("temp dir");
    let path = dir.join(SETTINGS_FILE);
    fs::write(&path, contents).expect("write settings");
    path
}

fn no_env(_: &str) -> Option<String> {
    None
}

#[test]
fn defaults_apply_without_file_or_env() {
    let settings = load_settings_from(Path::new("/nonexistent/effects.toml"), no_env);
    assert_eq!(settings, Settings::default());
    assert_eq!(settings.server_url, "http://127.0.0.1:5000");
    assert_eq!(settings.request_timeout(), Duration::from_secs(120));
}

#[test]
fn file_values_override_defaults() {
    let path = temp_settings_file(
        "file",
        "server_url = \"http://effects.local:8080\"\nrequest_timeout_seconds = 30\n",
    );

    let settings = load_settings_from(&path, no_env);

    assert_eq!(settings.server_url, "http://effects.local:8080");
    assert_eq!(settings.request_timeout_seconds, 30);
    fs::remove_dir_all(path.parent().expect("parent")).expect("cleanup");
}

#[test]
fn env_overrides_file_and_prefixed_key_wins() {
    let path = temp_settings_file("env", "server_url = \"http://from-file\"\n");
    let vars: HashMap<&str, &str> = [
        ("EFFECT_SERVER_URL", "http://from-plain-env"),
        ("APP__SERVER_URL", "http://from-app-env"),
        ("APP__REQUEST_TIMEOUT_SECONDS", "5"),
    ]
    .into_iter()
    .collect();

    let settings = load_settings_from(&path, |key| vars.get(key).map(|v| v.to_string()));

    assert_eq!(settings.server_url, "http://from-app-env");
    assert_eq!(settings.request_timeout_seconds, 5);
    fs::remove_dir_all(path.parent().expect("parent")).expect("cleanup");
}

#[test]
fn malformed_inputs_are_ignored() {
    let path = temp_settings_file("malformed", "server_url = [not toml");

    let settings = load_settings_from(&path, |key| {
        (key == "APP__REQUEST_TIMEOUT_SECONDS").then(|| "soon".to_string())
    });

    assert_eq!(settings, Settings::default());
    fs::remove_dir_all(path.parent().expect("parent")).expect("cleanup");
}
