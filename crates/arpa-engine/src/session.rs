use crate::config::ArpaConfig;
use crate::store::{Store, StoreError};
use arpa_core::{Action, Domain, DomNode, PageState, evaluate};
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Storage-backed record/lookup choreography for one browsing session.
///
/// Every operation reloads the hostname's blob and, on mutation, writes the
/// full object graph back; the persisted copy is the sole source of truth.
/// The read-modify-write runs behind an internal lock, so a lookup issued
/// after a save on the same session observes that save. Races against other
/// processes writing the shared store are unguarded, last write wins.
pub struct Session<S: Store> {
    store: S,
    config: ArpaConfig,
    lock: Mutex<()>,
}

impl<S: Store> Session<S> {
    pub fn new(store: S, config: ArpaConfig) -> Self {
        Self {
            store,
            config,
            lock: Mutex::new(()),
        }
    }

    pub fn config(&self) -> &ArpaConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Record a click on `el`. Returns `Ok(false)` without touching storage
    /// when the click has no interactive ancestor.
    pub async fn record_click<N: DomNode>(
        &self,
        el: &N,
        root: &N,
        page: &PageState,
    ) -> Result<bool, SessionError> {
        let Some(action) = Action::from_element(el, root) else {
            debug!(hostname = %page.hostname, "click has no interactive ancestor, ignoring");
            return Ok(false);
        };
        self.record_action(action, page).await?;
        Ok(true)
    }

    /// Record an already-built action, e.g. when re-triggering the current
    /// target.
    pub async fn record_action(&self, action: Action, page: &PageState) -> Result<(), SessionError> {
        let _guard = self.lock.lock().await;

        let mut domain = self
            .load_domain(&page.hostname)
            .await?
            .unwrap_or_else(|| Domain::new(&page.hostname));
        domain.save_action(action, page, &self.config.sensors);

        let blob = serde_json::to_value(&domain)?;
        self.store.set(&page.hostname, blob).await?;
        debug!(hostname = %page.hostname, "action saved");
        Ok(())
    }

    /// The element to surface for the current page state, or `None` when
    /// nothing recorded for this context still resolves.
    pub async fn lookup<N: DomNode>(
        &self,
        root: &N,
        page: &PageState,
    ) -> Result<Option<N>, SessionError> {
        let _guard = self.lock.lock().await;

        let Some(domain) = self.load_domain(&page.hostname).await? else {
            return Ok(None);
        };
        Ok(evaluate(root, &domain, page, &self.config.sensors))
    }

    /// Load and decode one hostname blob. Unreadable or hostname-less blobs
    /// degrade to "no domain" with a warning; prior persisted state is never
    /// replaced on the read path.
    async fn load_domain(&self, hostname: &str) -> Result<Option<Domain>, SessionError> {
        let Some(blob) = self.store.get(hostname).await? else {
            return Ok(None);
        };
        match serde_json::from_value::<Domain>(blob) {
            Ok(domain) if !domain.hostname.is_empty() => Ok(Some(domain)),
            Ok(_) => {
                warn!(hostname, "stored blob has no hostname, ignoring");
                Ok(None)
            }
            Err(e) => {
                warn!(hostname, error = %e, "stored blob is unreadable, ignoring");
                Ok(None)
            }
        }
    }
}
