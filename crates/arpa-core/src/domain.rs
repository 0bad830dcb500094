use crate::action::Action;
use crate::context::Context;
use crate::dom::DomNode;
use crate::hash::hash_code;
use crate::page::PageState;
use crate::sensors::SensorTable;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

/// All contexts recorded for one hostname.
///
/// Instances are transient: reconstructed from the persisted blob at the
/// start of every read/write cycle and serialized back whole after every
/// mutation. The persisted copy is the sole source of truth between page
/// loads.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Domain {
    pub hostname: String,
    #[serde(default)]
    pub contexts: HashMap<String, Context>,
}

impl Domain {
    pub fn new(hostname: &str) -> Self {
        Self {
            hostname: hostname.to_string(),
            contexts: HashMap::new(),
        }
    }

    /// Derive the context key for `page`: path segment count, hash segment
    /// count, and the summed hash of every sensor-selected segment that
    /// exists at its index. Hostnames with no configured sensors collapse to
    /// a key built from segment counts alone, coarse but deterministic.
    pub fn context_key(page: &PageState, sensors: &SensorTable) -> String {
        let mut h: u64 = 0;
        if let Some(cfg) = sensors.get(&page.hostname) {
            for &idx in &cfg.path {
                if let Some(seg) = page.path_segments.get(idx) {
                    h += u64::from(hash_code(seg));
                }
            }
            for &idx in &cfg.hash {
                if let Some(seg) = page.hash_segments.get(idx) {
                    h += u64::from(hash_code(seg));
                }
            }
        }

        let key = format!(
            "{}-{}-{}",
            page.path_segments.len(),
            page.hash_segments.len(),
            h
        );
        debug!(hostname = %page.hostname, %key, "derived context key");
        key
    }

    /// Read-only context lookup; `None` when the derived key has never been
    /// recorded. Does not mutate state.
    pub fn context(&self, page: &PageState, sensors: &SensorTable) -> Option<&Context> {
        self.contexts.get(&Self::context_key(page, sensors))
    }

    /// Create-if-missing context lookup.
    pub fn context_mut(&mut self, page: &PageState, sensors: &SensorTable) -> &mut Context {
        self.contexts
            .entry(Self::context_key(page, sensors))
            .or_default()
    }

    /// Record one use of `action` in the context `page` belongs to, creating
    /// the context when needed.
    pub fn save_action(&mut self, action: Action, page: &PageState, sensors: &SensorTable) {
        self.context_mut(page, sensors).save_action(action);
    }

    /// The best-ranked resolvable element for the context `page` belongs to,
    /// or `None` when the context does not exist or nothing in it resolves.
    pub fn target<N: DomNode>(
        &self,
        root: &N,
        page: &PageState,
        sensors: &SensorTable,
    ) -> Option<N> {
        self.context(page, sensors).and_then(|c| c.target(root))
    }
}
