use std::sync::Arc;

use loanbot_agent::runtime::ActionRuntime;
use loanbot_core::config::{AppConfig, ConfigError, LoadOptions};
use loanbot_core::ApplicationError;
use thiserror::Error;
use tracing::info;

pub struct Application {
    pub config: AppConfig,
    pub runtime: Arc<ActionRuntime>,
}

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("action runtime failed to initialize: {0}")]
    Runtime(#[source] ApplicationError),
}

pub fn bootstrap(options: LoadOptions) -> Result<Application, BootstrapError> {
    let config = AppConfig::load(options)?;
    bootstrap_with_config(config)
}

pub fn bootstrap_with_config(config: AppConfig) -> Result<Application, BootstrapError> {
    info!(
        event_name = "system.bootstrap.start",
        correlation_id = "bootstrap",
        scoring_url = %config.scoring.url,
        "starting application bootstrap"
    );

    let runtime =
        ActionRuntime::loan_application(&config.scoring).map_err(BootstrapError::Runtime)?;
    info!(
        event_name = "system.bootstrap.actions_registered",
        correlation_id = "bootstrap",
        actions = ?runtime.action_names(),
        "action runtime initialized"
    );

    Ok(Application { config, runtime: Arc::new(runtime) })
}
