use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// URL-segment indices that fold page-state signals into a context key for
/// one hostname. `path` indices select path segments, `hash` indices select
/// fragment segments.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Sensors {
    pub path: Vec<usize>,
    pub hash: Vec<usize>,
}

/// Per-hostname sensor configuration, injected at startup.
///
/// A manually curated heuristic, not a generic solution: hostnames without an
/// entry get empty sensor lists and collapse to context keys built from
/// segment counts alone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SensorTable(HashMap<String, Sensors>);

impl SensorTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, hostname: &str, sensors: Sensors) {
        self.0.insert(hostname.to_string(), sensors);
    }

    pub fn get(&self, hostname: &str) -> Option<&Sensors> {
        self.0.get(hostname)
    }

    /// The hand-curated table the extension shipped with.
    pub fn builtin() -> Self {
        let mut table = Self::new();
        table.insert("github.com", Sensors { path: vec![2], hash: vec![] });
        table.insert(
            "console.cloud.google.com",
            Sensors { path: vec![1, 2], hash: vec![] },
        );
        table.insert(
            "us-east-2.console.aws.amazon.com",
            Sensors { path: vec![1, 2, 4], hash: vec![] },
        );
        table.insert(
            "mail.protonmail.com",
            Sensors { path: vec![1], hash: vec![] },
        );
        table
    }
}
