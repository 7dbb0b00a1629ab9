//! Deployment configuration.
//!
//! Loaded from YAML by the binary; the core itself only consumes the
//! constructed values. Identity mode selects between the fixed-identity
//! single-evaluator deployment and per-session anonymous judges.

use crate::client::StorePrefix;
use crate::identity::{FixedIdentity, IdentityProvider, SessionIdentity};
use crate::store::{DocumentStore, MemoryStore, SqliteStore, StoreError};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;

pub const DEFAULT_JUDGE_ID: &str = "default_judge";

/// Store path value meaning "ephemeral, in-process only".
pub const EPHEMERAL_STORE: &str = ":memory:";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum IdentityMode {
    /// Single-evaluator deployment: one constant judge id.
    Fixed { judge_id: String },
    /// Multi-judge deployment: anonymous per-session identity.
    Anonymous,
}

impl Default for IdentityMode {
    fn default() -> Self {
        IdentityMode::Fixed {
            judge_id: DEFAULT_JUDGE_ID.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DeploymentConfig {
    /// SQLite file path, or `:memory:` for an ephemeral store.
    #[serde(default = "default_store_path")]
    pub store_path: String,
    #[serde(default = "default_namespace")]
    pub namespace: String,
    #[serde(default = "default_app_instance_id")]
    pub app_instance_id: String,
    #[serde(default)]
    pub identity: IdentityMode,
}

fn default_store_path() -> String {
    "scoresheet.db".to_string()
}

fn default_namespace() -> String {
    "artifacts".to_string()
}

fn default_app_instance_id() -> String {
    "scoresheet-local".to_string()
}

impl Default for DeploymentConfig {
    fn default() -> Self {
        Self {
            store_path: default_store_path(),
            namespace: default_namespace(),
            app_instance_id: default_app_instance_id(),
            identity: IdentityMode::default(),
        }
    }
}

impl DeploymentConfig {
    pub fn open_store(&self) -> Result<Arc<dyn DocumentStore>, StoreError> {
        if self.store_path == EPHEMERAL_STORE {
            Ok(Arc::new(MemoryStore::new()))
        } else {
            Ok(Arc::new(SqliteStore::open(Path::new(&self.store_path))?))
        }
    }

    pub fn identity_provider(&self) -> Arc<dyn IdentityProvider> {
        match &self.identity {
            IdentityMode::Fixed { judge_id } => Arc::new(FixedIdentity::new(judge_id.clone())),
            IdentityMode::Anonymous => Arc::new(SessionIdentity::new()),
        }
    }

    pub fn prefix(&self) -> StorePrefix {
        StorePrefix::new(self.namespace.clone(), self.app_instance_id.clone())
    }
}

pub fn load_config(path: &Path) -> anyhow::Result<DeploymentConfig> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let config: DeploymentConfig = serde_yaml::from_str(&raw)
        .with_context(|| format!("failed to parse config {}", path.display()))?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_fill_every_field() {
        let config: DeploymentConfig = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config.store_path, "scoresheet.db");
        assert_eq!(config.namespace, "artifacts");
        assert!(matches!(
            config.identity,
            IdentityMode::Fixed { ref judge_id } if judge_id == DEFAULT_JUDGE_ID
        ));
    }

    #[test]
    fn parses_anonymous_identity_mode() {
        let yaml = "
store_path: ':memory:'
app_instance_id: hackathon-2026
identity:
  mode: anonymous
";
        let config: DeploymentConfig = serde_yaml::from_str(yaml).unwrap();
        assert!(matches!(config.identity, IdentityMode::Anonymous));
        let provider = config.identity_provider();
        assert!(provider.judge_identity().unwrap().starts_with("anon-"));
    }

    #[test]
    fn rejects_unknown_fields() {
        let yaml = "store_path: x\napi_key: abc\n";
        assert!(serde_yaml::from_str::<DeploymentConfig>(yaml).is_err());
    }

    #[test]
    fn load_config_reports_missing_file() {
        let err = load_config(Path::new("/nonexistent/scoresheet.yaml")).unwrap_err();
        assert!(err.to_string().contains("failed to read config"));
    }
}
