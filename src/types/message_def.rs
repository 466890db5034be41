use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::signal_def::SignalDefinition;

/// Bus message defined in the catalog.
///
/// Holds the message `name`, the declared payload length (`byte_length`) and
/// the signal layout. Signals are keyed by name; the map is ordered so that
/// iteration (and therefore decoded output) is deterministic.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MessageDefinition {
    /// Message name.
    pub name: String,
    /// Declared payload length in bytes.
    pub byte_length: u16,
    /// Signals composing this message, keyed by signal name.
    /// A repeated name replaces the earlier definition (last parsed wins).
    pub signals: BTreeMap<String, SignalDefinition>,
}

impl MessageDefinition {
    pub fn new(name: &str, byte_length: u16) -> Self {
        MessageDefinition {
            name: name.to_string(),
            byte_length,
            signals: BTreeMap::new(),
        }
    }

    /// Attaches a signal, replacing any earlier definition with the same name.
    pub fn add_signal(&mut self, signal: SignalDefinition) {
        self.signals.insert(signal.name.clone(), signal);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_signal_last_occurrence_wins() {
        let mut msg = MessageDefinition::new("ENGINE_DATA", 8);
        msg.add_signal(SignalDefinition {
            name: "RPM".to_string(),
            factor: 1.0,
            ..Default::default()
        });
        msg.add_signal(SignalDefinition {
            name: "RPM".to_string(),
            factor: 0.25,
            ..Default::default()
        });

        assert_eq!(msg.signals.len(), 1);
        assert_eq!(msg.signals["RPM"].factor, 0.25);
    }

    #[test]
    fn signal_iteration_is_name_ordered() {
        let mut msg = MessageDefinition::new("M", 8);
        for name in ["Zeta", "Alpha", "Mid"] {
            msg.add_signal(SignalDefinition {
                name: name.to_string(),
                ..Default::default()
            });
        }
        let names: Vec<&str> = msg.signals.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["Alpha", "Mid", "Zeta"]);
    }
}
