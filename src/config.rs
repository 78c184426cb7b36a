use serde::Deserialize;
use std::{
    env, fs,
    path::{Path, PathBuf},
    time::Duration,
};
use thiserror::Error;
use tracing::warn;

pub const DEFAULT_COLLECTION: &str = "daily_stats";
pub const DEFAULT_DATABASE: &str = "(default)";
pub const DEFAULT_BASE_URL: &str = "https://firestore.googleapis.com/v1";
pub const DEFAULT_CONFIG_FILE: &str = "firebase-config.json";
const DEFAULT_TIMEOUT_SECS: u64 = 15;
const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid firebase config in {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// The subset of a Firebase web config object the dashboard needs.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FirebaseConfig {
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub project_id: Option<String>,
    #[serde(default)]
    pub database_id: Option<String>,
    #[serde(default)]
    pub collection: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FirestoreSettings {
    pub api_key: String,
    pub project_id: String,
    pub database_id: String,
    pub collection: String,
    pub base_url: String,
    pub timeout: Duration,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SourceSettings {
    Firestore(FirestoreSettings),
    Snapshot(PathBuf),
    Missing,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub port: u16,
    pub source: SourceSettings,
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let port = var("PORT")
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);

        if let Some(path) = var("DASHBOARD_SNAPSHOT_PATH") {
            return Ok(Self {
                port,
                source: SourceSettings::Snapshot(PathBuf::from(path)),
            });
        }

        let file = match var("FIREBASE_CONFIG_PATH") {
            Some(path) => match read_config_file(Path::new(&path)) {
                Err(ConfigError::Read { path, source })
                    if source.kind() == std::io::ErrorKind::NotFound =>
                {
                    warn!("firebase config {} not found; continuing without it", path.display());
                    FirebaseConfig::default()
                }
                other => other?,
            },
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                read_config_file(Path::new(DEFAULT_CONFIG_FILE))?
            }
            None => FirebaseConfig::default(),
        };

        let api_key = var("FIREBASE_API_KEY").or(file.api_key);
        let project_id = var("FIREBASE_PROJECT_ID").or(file.project_id);

        let source = match (api_key, project_id) {
            (Some(api_key), Some(project_id)) => SourceSettings::Firestore(FirestoreSettings {
                api_key,
                project_id,
                database_id: var("FIREBASE_DATABASE_ID")
                    .or(file.database_id)
                    .unwrap_or_else(|| DEFAULT_DATABASE.to_string()),
                collection: var("FIRESTORE_COLLECTION")
                    .or(file.collection)
                    .unwrap_or_else(|| DEFAULT_COLLECTION.to_string()),
                base_url: var("FIRESTORE_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
                timeout: Duration::from_secs(
                    var("FIRESTORE_TIMEOUT_SECS")
                        .and_then(|value| value.parse::<u64>().ok())
                        .unwrap_or(DEFAULT_TIMEOUT_SECS),
                ),
            }),
            _ => SourceSettings::Missing,
        };

        Ok(Self { port, source })
    }
}

pub fn read_config_file(path: &Path) -> Result<FirebaseConfig, ConfigError> {
    let bytes = fs::read(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_slice(&bytes).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn settings(vars: &[(&str, &str)]) -> Result<Settings, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Settings::from_lookup(|key| map.get(key).cloned())
    }

    fn temp_path(tag: &str) -> PathBuf {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let mut path = std::env::temp_dir();
        path.push(format!("pageview_config_{tag}_{}_{}.json", std::process::id(), nanos));
        path
    }

    #[test]
    fn env_credentials_select_firestore_with_defaults() {
        let settings = settings(&[
            ("FIREBASE_API_KEY", "key"),
            ("FIREBASE_PROJECT_ID", "tracker"),
            ("PORT", "9090"),
        ])
        .unwrap();
        assert_eq!(settings.port, 9090);
        let SourceSettings::Firestore(firestore) = settings.source else {
            panic!("expected firestore source");
        };
        assert_eq!(firestore.collection, DEFAULT_COLLECTION);
        assert_eq!(firestore.database_id, DEFAULT_DATABASE);
        assert_eq!(firestore.timeout, Duration::from_secs(15));
    }

    #[test]
    fn missing_credentials_are_reported_as_missing() {
        let settings = settings(&[("FIREBASE_API_KEY", "key")]).unwrap();
        assert_eq!(settings.source, SourceSettings::Missing);
        assert_eq!(settings.port, 8080);
    }

    #[test]
    fn snapshot_path_wins_over_credentials() {
        let settings = settings(&[
            ("DASHBOARD_SNAPSHOT_PATH", "/tmp/records.json"),
            ("FIREBASE_API_KEY", "key"),
            ("FIREBASE_PROJECT_ID", "tracker"),
        ])
        .unwrap();
        assert_eq!(
            settings.source,
            SourceSettings::Snapshot(PathBuf::from("/tmp/records.json"))
        );
    }

    #[test]
    fn config_file_is_merged_with_env_overrides() {
        let path = temp_path("merge");
        std::fs::write(
            &path,
            r#"{"apiKey":"file-key","projectId":"file-project","authDomain":"x.firebaseapp.com"}"#,
        )
        .unwrap();
        let path_str = path.to_string_lossy().to_string();
        let settings = settings(&[
            ("FIREBASE_CONFIG_PATH", path_str.as_str()),
            ("FIREBASE_PROJECT_ID", "env-project"),
        ])
        .unwrap();
        let _ = std::fs::remove_file(&path);

        let SourceSettings::Firestore(firestore) = settings.source else {
            panic!("expected firestore source");
        };
        assert_eq!(firestore.api_key, "file-key");
        assert_eq!(firestore.project_id, "env-project");
    }

    #[test]
    fn absent_config_file_means_missing_configuration() {
        let path = temp_path("absent");
        let path_str = path.to_string_lossy().to_string();
        let settings = settings(&[("FIREBASE_CONFIG_PATH", path_str.as_str())]).unwrap();
        assert_eq!(settings.source, SourceSettings::Missing);
    }

    #[test]
    fn absent_config_file_still_accepts_env_credentials() {
        let path = temp_path("absent_env");
        let path_str = path.to_string_lossy().to_string();
        let settings = settings(&[
            ("FIREBASE_CONFIG_PATH", path_str.as_str()),
            ("FIREBASE_API_KEY", "key"),
            ("FIREBASE_PROJECT_ID", "tracker"),
        ])
        .unwrap();
        assert!(matches!(settings.source, SourceSettings::Firestore(_)));
    }

    #[test]
    fn malformed_config_file_is_an_error() {
        let path = temp_path("bad");
        std::fs::write(&path, "not json").unwrap();
        let path_str = path.to_string_lossy().to_string();
        let result = settings(&[("FIREBASE_CONFIG_PATH", path_str.as_str())]);
        let _ = std::fs::remove_file(&path);
        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }
}
