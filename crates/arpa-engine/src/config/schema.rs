use arpa_core::SensorTable;
use serde::{Deserialize, Serialize};

/// Engine configuration: the per-hostname sensor table and the hostnames the
/// run loop refuses to operate on.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ArpaConfig {
    pub sensors: SensorTable,
    pub blacklist: Vec<String>,
}

impl Default for ArpaConfig {
    fn default() -> Self {
        Self {
            sensors: SensorTable::builtin(),
            // Mouse interactions misbehave there; keep off until fixed.
            blacklist: vec!["www.notion.so".to_string()],
        }
    }
}

impl ArpaConfig {
    pub fn blacklisted(&self, hostname: &str) -> bool {
        self.blacklist.iter().any(|h| h == hostname)
    }
}
