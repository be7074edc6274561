use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc, PoisonError, RwLock,
    },
    time::Duration,
};

use shared::{
    domain::{AdminId, AdminRole, Principal},
    error::AdminError,
};
use storage::{LocalStore, SESSION_KEY, TOKEN_KEY};
use tracing::{info, warn};

/// The single administrator the console accepts.
#[derive(Debug, Clone)]
pub struct AdminAccount {
    pub principal: Principal,
    pub password: String,
}

impl Default for AdminAccount {
    fn default() -> Self {
        Self {
            principal: Principal {
                id: AdminId::from("1"),
                email: "hradmin@cloudutility.in".to_string(),
                name: "HR Admin".to_string(),
                role: AdminRole::SuperAdmin,
            },
            password: "hradmin@1234".to_string(),
        }
    }
}

impl AdminAccount {
    fn matches(&self, email: &str, password: &str) -> bool {
        self.principal.email == email && self.password == password
    }
}

/// Owns the signed-in principal and mirrors it into local storage so a
/// restart can pick the session back up.
pub struct SessionStore {
    store: Arc<dyn LocalStore>,
    account: AdminAccount,
    login_delay: Duration,
    principal: RwLock<Option<Principal>>,
    loading: AtomicBool,
}

impl SessionStore {
    pub fn new(store: Arc<dyn LocalStore>, account: AdminAccount, login_delay: Duration) -> Self {
        Self {
            store,
            account,
            login_delay,
            principal: RwLock::new(None),
            loading: AtomicBool::new(false),
        }
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<Principal, AdminError> {
        self.loading.store(true, Ordering::SeqCst);
        tokio::time::sleep(self.login_delay).await;

        let outcome = if self.account.matches(email, password) {
            let principal = self.account.principal.clone();
            self.persist(&principal);
            *self.principal.write().unwrap_or_else(PoisonError::into_inner) =
                Some(principal.clone());
            info!(admin = %principal.id, "session: signed in");
            Ok(principal)
        } else {
            warn!("session: rejected sign-in attempt");
            Err(AdminError::InvalidCredentials)
        };

        self.loading.store(false, Ordering::SeqCst);
        outcome
    }

    /// Always succeeds, even with nobody signed in.
    pub fn logout(&self) {
        *self.principal.write().unwrap_or_else(PoisonError::into_inner) = None;
        if let Err(err) = self.store.remove(SESSION_KEY) {
            warn!("session: failed to clear persisted session: {err:#}");
        }
        info!("session: signed out");
    }

    /// Loads a persisted principal. A stored value that does not decode is
    /// discarded and the session starts unauthenticated.
    pub fn restore_session(&self) -> Option<Principal> {
        let raw = match self.store.get(SESSION_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(err) => {
                warn!("session: unable to read persisted session: {err:#}");
                return None;
            }
        };

        match serde_json::from_str::<Principal>(&raw) {
            Ok(principal) => {
                *self.principal.write().unwrap_or_else(PoisonError::into_inner) =
                    Some(principal.clone());
                info!(admin = %principal.id, "session: restored");
                Some(principal)
            }
            Err(err) => {
                let err = AdminError::CorruptSession(err.to_string());
                warn!(code = err.code().as_str(), "session: {err}; clearing stored value");
                if let Err(err) = self.store.remove(SESSION_KEY) {
                    warn!("session: failed to clear corrupt session: {err:#}");
                }
                *self.principal.write().unwrap_or_else(PoisonError::into_inner) = None;
                None
            }
        }
    }

    pub fn current(&self) -> Option<Principal> {
        self.principal
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.principal
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::SeqCst)
    }

    pub fn require_principal(&self) -> Result<Principal, AdminError> {
        self.current().ok_or(AdminError::NotSignedIn)
    }

    pub fn set_token(&self, token: &str) -> anyhow::Result<()> {
        self.store.set(TOKEN_KEY, token)
    }

    pub fn clear_token(&self) -> anyhow::Result<()> {
        self.store.remove(TOKEN_KEY)
    }

    fn persist(&self, principal: &Principal) {
        let encoded = match serde_json::to_string(principal) {
            Ok(encoded) => encoded,
            Err(err) => {
                warn!("session: failed to encode principal: {err}");
                return;
            }
        };
        if let Err(err) = self.store.set(SESSION_KEY, &encoded) {
            warn!("session: failed to persist session: {err:#}");
        }
    }
}
