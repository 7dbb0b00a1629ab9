pub mod criteria;
pub mod evaluate;
pub mod show;
pub mod watch;

use crate::cli::args::{Cli, Command};
use anyhow::Result;
use scoresheet_core::config::{load_config, DeploymentConfig};
use scoresheet_core::identity::IdentityProvider;
use scoresheet_core::EvaluationStore;
use std::path::PathBuf;
use std::sync::Arc;

pub async fn dispatch(cli: Cli) -> Result<i32> {
    let config = resolve_config(cli.config.as_deref())?;
    match cli.cmd {
        Command::Criteria => criteria::run(),
        Command::Evaluate(args) => evaluate::run(args, &config).await,
        Command::Show(args) => show::run(args, &config).await,
        Command::Watch(args) => watch::run(args, &config).await,
    }
}

fn resolve_config(path: Option<&std::path::Path>) -> Result<DeploymentConfig> {
    match path {
        Some(path) => load_config(path),
        None => {
            let default = PathBuf::from("scoresheet.yaml");
            if default.exists() {
                load_config(&default)
            } else {
                Ok(DeploymentConfig::default())
            }
        }
    }
}

pub(crate) fn open_context(
    config: &DeploymentConfig,
) -> Result<(EvaluationStore, Arc<dyn IdentityProvider>)> {
    let store = config.open_store()?;
    let client = EvaluationStore::new(store, config.prefix());
    Ok((client, config.identity_provider()))
}
