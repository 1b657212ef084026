//! Events presented to a machine.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// An event name plus any positional arguments the host wants hooks to see.
///
/// ```rust
/// use statecraft::runtime::Event;
///
/// let event = Event::new("insert_coin").arg(25).arg("quarter");
///
/// assert_eq!(event.name(), "insert_coin");
/// assert_eq!(event.args().len(), 2);
/// assert_eq!(event.arg_at(0).and_then(|v| v.as_u64()), Some(25));
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Event {
    name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    args: Vec<Value>,
}

impl Event {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            args: Vec::new(),
        }
    }

    /// Append a positional argument.
    pub fn arg(mut self, value: impl Into<Value>) -> Self {
        self.args.push(value.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn args(&self) -> &[Value] {
        &self.args
    }

    pub fn arg_at(&self, position: usize) -> Option<&Value> {
        self.args.get(position)
    }
}

impl From<&str> for Event {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Event {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn event_without_args() {
        let event = Event::from("close");

        assert_eq!(event.name(), "close");
        assert!(event.args().is_empty());
        assert!(event.arg_at(0).is_none());
    }

    #[test]
    fn args_keep_position() {
        let event = Event::new("crank").arg(90).arg(json!({"force": "gentle"}));

        assert_eq!(event.arg_at(0), Some(&json!(90)));
        assert_eq!(event.arg_at(1), Some(&json!({"force": "gentle"})));
    }

    #[test]
    fn event_round_trips_through_json() {
        let event = Event::new("lock").arg(true);
        let json = serde_json::to_string(&event).unwrap();

        assert_eq!(serde_json::from_str::<Event>(&json).unwrap(), event);
    }
}
