//! Per-machine configuration.

use serde::{Deserialize, Serialize};

/// Options applied when a machine is constructed.
///
/// Deserializable so hosts can embed it in their own configuration files;
/// missing fields take their defaults.
///
/// ```rust
/// use statecraft::MachineConfig;
///
/// let config: MachineConfig = serde_json::from_str(r#"{ "history_limit": 50 }"#).unwrap();
///
/// assert!(config.record_history);
/// assert_eq!(config.history_limit, Some(50));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MachineConfig {
    /// Keep an in-memory log of committed transitions.
    pub record_history: bool,
    /// Maximum number of records kept; oldest are dropped first.
    pub history_limit: Option<usize>,
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self {
            record_history: true,
            history_limit: None,
        }
    }
}

impl MachineConfig {
    /// Configuration with history recording turned off.
    pub fn without_history() -> Self {
        Self {
            record_history: false,
            history_limit: None,
        }
    }

    pub fn history_limit(mut self, limit: usize) -> Self {
        self.history_limit = Some(limit);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_record_unbounded_history() {
        let config = MachineConfig::default();

        assert!(config.record_history);
        assert_eq!(config.history_limit, None);
    }

    #[test]
    fn empty_document_uses_defaults() {
        let config: MachineConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, MachineConfig::default());
    }

    #[test]
    fn history_can_be_disabled() {
        let config: MachineConfig =
            serde_json::from_str(r#"{ "record_history": false }"#).unwrap();

        assert_eq!(config, MachineConfig::without_history());
    }

    #[test]
    fn limit_builder() {
        let config = MachineConfig::default().history_limit(10);
        assert_eq!(config.history_limit, Some(10));
    }
}
