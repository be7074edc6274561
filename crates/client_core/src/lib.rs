use std::sync::Arc;

use anyhow::{Context, Result};
use storage::{FileStore, LocalStore};
use tracing::info;

pub mod config;
pub mod fallback;
pub mod gateway;
pub mod session;
pub mod stats;
pub mod transport;

pub use config::{load_settings, Settings};
pub use fallback::FallbackData;
pub use gateway::ApiGateway;
pub use session::{AdminAccount, SessionStore};
pub use transport::HttpTransport;

/// Session store and gateway wired to one shared local store.
#[derive(Clone)]
pub struct AdminClient {
    pub session: Arc<SessionStore>,
    pub api: Arc<ApiGateway>,
}

impl AdminClient {
    pub fn new(settings: &Settings, store: Arc<dyn LocalStore>, fallback: FallbackData) -> Result<Self> {
        let transport = HttpTransport::new(
            &settings.api_base_url,
            settings.request_timeout(),
            Arc::clone(&store),
        )?;
        let session = SessionStore::new(store, AdminAccount::default(), settings.login_delay());
        Ok(Self {
            session: Arc::new(session),
            api: Arc::new(ApiGateway::new(transport, fallback)),
        })
    }

    /// Opens the on-disk store under the configured data dir and restores
    /// any persisted session.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let data_dir = settings.resolve_data_dir()?;
        let store = FileStore::in_dir(&data_dir)
            .with_context(|| format!("failed to open local store in {}", data_dir.display()))?;
        let client = Self::new(settings, Arc::new(store), FallbackData::fixture())?;
        if let Some(principal) = client.session.restore_session() {
            info!(admin = %principal.email, "client: resumed persisted session");
        }
        Ok(client)
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod session_tests;
