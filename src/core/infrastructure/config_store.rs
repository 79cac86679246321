//! Persistence of the dashboard configuration record in a single JSON file.

use crate::core::domain::{
    error::{DashboardError, DashboardResult},
    model::dashboard_config::{ConfigRecord, DashboardConfig, EnvOverlay, resolve},
};
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Read/write access to the configuration record.
///
/// `get` never fails: an unreadable file degrades to the environment overlay.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ConfigRepository: Send + Sync {
    /// Returns the effective configuration (environment over persisted file).
    async fn get(&self) -> DashboardConfig;

    /// Shallow-merges `partial` over the persisted record, writes it and
    /// returns the new persisted record (without the environment overlay).
    ///
    /// Every key of `partial` replaces the stored one, `null` included.
    async fn save(&self, partial: ConfigRecord) -> DashboardResult<DashboardConfig>;
}

/// Where the environment overlay comes from.
#[derive(Debug, Clone)]
enum EnvSource {
    Process,
    Fixed(EnvOverlay),
}

/// File-backed [`ConfigRepository`].
///
/// The file is read on every call and rewritten wholesale on save. There is
/// no locking: concurrent saves race and the last writer wins.
#[derive(Debug, Clone)]
pub struct JsonConfigStore {
    path: PathBuf,
    env: EnvSource,
}

impl JsonConfigStore {
    /// A store whose overlay is read from the process environment on every call.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            env: EnvSource::Process,
        }
    }

    /// A store with a fixed overlay, independent of the process environment.
    pub fn with_env(path: impl Into<PathBuf>, env: EnvOverlay) -> Self {
        Self {
            path: path.into(),
            env: EnvSource::Fixed(env),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn env_snapshot(&self) -> EnvOverlay {
        match &self.env {
            EnvSource::Process => EnvOverlay::from_env(),
            EnvSource::Fixed(overlay) => overlay.clone(),
        }
    }

    async fn ensure_data_dir(&self) -> std::io::Result<()> {
        match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => fs::create_dir_all(dir).await,
            _ => Ok(()),
        }
    }

    async fn read_record(&self) -> std::io::Result<ConfigRecord> {
        let text = fs::read_to_string(&self.path).await?;
        serde_json::from_str(&text).map_err(|e| std::io::Error::new(ErrorKind::InvalidData, e))
    }

    async fn read_persisted(&self) -> std::io::Result<DashboardConfig> {
        let record = self.read_record().await?;
        DashboardConfig::from_record(&record)
            .map_err(|e| std::io::Error::new(ErrorKind::InvalidData, e))
    }
}

#[async_trait]
impl ConfigRepository for JsonConfigStore {
    async fn get(&self) -> DashboardConfig {
        let env = self.env_snapshot();

        if let Err(e) = self.ensure_data_dir().await {
            tracing::warn!(path = %self.path.display(), error = %e, "cannot create config directory");
            return env.into_config();
        }

        match self.read_persisted().await {
            Ok(persisted) => resolve(env, persisted),
            Err(e) if e.kind() == ErrorKind::NotFound => env.into_config(),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "error reading config, using environment only");
                env.into_config()
            }
        }
    }

    async fn save(&self, partial: ConfigRecord) -> DashboardResult<DashboardConfig> {
        DashboardConfig::from_record(&partial)
            .map_err(|e| DashboardError::MalformedBody(format!("invalid configuration: {e}")))?;

        self.ensure_data_dir().await.map_err(|e| {
            DashboardError::Storage(format!("cannot create config directory: {e}"))
        })?;

        let mut record = match self.read_record().await {
            Ok(record) => record,
            Err(e) if e.kind() == ErrorKind::NotFound => ConfigRecord::new(),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "unreadable config replaced on save");
                ConfigRecord::new()
            }
        };
        record.extend(partial);

        let saved = DashboardConfig::from_record(&record).map_err(|e| {
            DashboardError::Storage(format!("persisted configuration is invalid: {e}"))
        })?;
        let json = serde_json::to_string_pretty(&record)
            .map_err(|e| DashboardError::Storage(format!("cannot serialize config: {e}")))?;
        fs::write(&self.path, json).await.map_err(|e| {
            DashboardError::Storage(format!("cannot write {}: {e}", self.path.display()))
        })?;

        tracing::info!(path = %self.path.display(), "configuration saved");
        Ok(saved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn record(value: serde_json::Value) -> ConfigRecord {
        match value {
            serde_json::Value::Object(map) => map,
            other => panic!("not an object: {other}"),
        }
    }

    fn store_in(dir: &TempDir, env: EnvOverlay) -> JsonConfigStore {
        JsonConfigStore::with_env(dir.path().join("data").join("config.json"), env)
    }

    #[tokio::test]
    async fn test_missing_file_returns_environment_only() {
        let dir = TempDir::new().unwrap();
        let env = EnvOverlay {
            proxmox_url: Some("https://env:8006".into()),
            ..Default::default()
        };
        let store = store_in(&dir, env);

        let config = store.get().await;
        assert_eq!(config.proxmox_url.as_deref(), Some("https://env:8006"));
        assert_eq!(config.proxmox_user, None);
        // The data directory is created lazily.
        assert!(dir.path().join("data").is_dir());
    }

    #[tokio::test]
    async fn test_corrupt_file_falls_back_to_environment() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir, EnvOverlay::default());
        std::fs::create_dir_all(dir.path().join("data")).unwrap();
        std::fs::write(store.path(), "{ not json").unwrap();

        assert_eq!(store.get().await, DashboardConfig::default());
    }

    #[tokio::test]
    async fn test_partial_saves_merge_in_order() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir, EnvOverlay::default());

        store
            .save(record(serde_json::json!({
                "proxmoxUrl": "https://a:8006",
                "proxmoxUser": "a@pam"
            })))
            .await
            .unwrap();
        let saved = store
            .save(record(serde_json::json!({
                "proxmoxUser": "b@pam",
                "tailscaleAuthKey": "tskey-auth"
            })))
            .await
            .unwrap();

        let expected = DashboardConfig {
            proxmox_url: Some("https://a:8006".into()),
            proxmox_user: Some("b@pam".into()),
            tailscale_auth_key: Some("tskey-auth".into()),
            ..Default::default()
        };
        assert_eq!(saved, expected);
        assert_eq!(store.get().await, expected);

        let on_disk: DashboardConfig =
            serde_json::from_str(&std::fs::read_to_string(store.path()).unwrap()).unwrap();
        assert_eq!(on_disk, expected);
    }

    #[tokio::test]
    async fn test_env_overrides_saved_value_but_is_never_persisted() {
        let dir = TempDir::new().unwrap();
        let env = EnvOverlay {
            tailscale_tailnet: Some("env-net".into()),
            ..Default::default()
        };
        let store = store_in(&dir, env);

        let saved = store
            .save(record(serde_json::json!({ "tailscaleTailnet": "file-net" })))
            .await
            .unwrap();
        assert_eq!(saved.tailscale_tailnet.as_deref(), Some("file-net"));
        assert_eq!(store.get().await.tailscale_tailnet.as_deref(), Some("env-net"));
    }

    #[tokio::test]
    async fn test_save_over_corrupt_file_starts_fresh() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir, EnvOverlay::default());
        std::fs::create_dir_all(dir.path().join("data")).unwrap();
        std::fs::write(store.path(), "garbage").unwrap();

        let saved = store
            .save(record(serde_json::json!({ "proxmoxTokenId": "dash" })))
            .await
            .unwrap();
        assert_eq!(saved.proxmox_token_id.as_deref(), Some("dash"));
        assert_eq!(saved.proxmox_url, None);
    }

    #[tokio::test]
    async fn test_null_overwrites_stored_value() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir, EnvOverlay::default());

        store
            .save(record(serde_json::json!({
                "proxmoxUrl": "https://a:8006",
                "proxmoxUser": "u"
            })))
            .await
            .unwrap();
        let saved = store
            .save(record(serde_json::json!({ "proxmoxUrl": null })))
            .await
            .unwrap();

        assert_eq!(saved.proxmox_url, None);
        assert_eq!(saved.proxmox_user.as_deref(), Some("u"));
        assert_eq!(store.get().await.proxmox_url, None);
    }

    #[tokio::test]
    async fn test_unknown_keys_survive_save() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir, EnvOverlay::default());
        std::fs::create_dir_all(dir.path().join("data")).unwrap();
        std::fs::write(
            store.path(),
            r#"{"proxmoxUrl":"https://a:8006","theme":"dark"}"#,
        )
        .unwrap();

        store
            .save(record(serde_json::json!({ "proxmoxUser": "u" })))
            .await
            .unwrap();

        let on_disk: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(store.path()).unwrap()).unwrap();
        assert_eq!(
            on_disk,
            serde_json::json!({
                "proxmoxUrl": "https://a:8006",
                "proxmoxUser": "u",
                "theme": "dark"
            })
        );
    }

    #[tokio::test]
    async fn test_wrongly_typed_field_is_rejected_before_write() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir, EnvOverlay::default());

        let result = store
            .save(record(serde_json::json!({ "proxmoxUrl": 8006 })))
            .await;

        assert!(matches!(result, Err(DashboardError::MalformedBody(_))));
        assert!(!store.path().exists());
    }
}
