//! # Application State
//!
//! Everything a command needs, built once per process.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ClientConfig::load(--config)  ─►  --api-url override  ─►  validate    │
//! │          │                                                              │
//! │          ├──► HttpClient::new           (reqwest, timeout)              │
//! │          └──► FileStorage::open(session_path) ─► AuthStore::load        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use lnf_client::{AuthStore, ClientConfig, FileStorage, HttpClient};
use tracing::debug;

pub struct AppState {
    pub config: ClientConfig,
    pub config_path: Option<PathBuf>,
    pub api: HttpClient,
    pub auth: AuthStore,
}

impl AppState {
    pub fn init(config_path: Option<PathBuf>, api_url: Option<String>) -> anyhow::Result<Self> {
        let mut config =
            ClientConfig::load(config_path.clone()).context("loading client configuration")?;
        if let Some(url) = api_url {
            config.api.base_url = url;
            config.validate().context("checking --api-url")?;
        }

        let api = HttpClient::new(&config).context("building HTTP client")?;

        let session_path = config.session_path()?;
        debug!(path = ?session_path, "Opening session file");
        let storage = FileStorage::open(&session_path)
            .with_context(|| format!("opening session file {}", session_path.display()))?;
        let auth = AuthStore::load(Arc::new(storage)).context("restoring session")?;

        Ok(AppState {
            config,
            config_path,
            api,
            auth,
        })
    }
}
