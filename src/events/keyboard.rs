use crate::mappings::KeyNames;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Код клавиши (evdev коды)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct KeyCode(pub u16);

impl KeyCode {
    pub fn value(&self) -> u16 {
        self.0
    }
}

impl fmt::Display for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match KeyNames::name_of(*self) {
            Some(name) => write!(f, "{}", name),
            None => write!(f, "KEY_{}", self.0),
        }
    }
}

/// Набор одновременно зажатых клавиш
pub type PressedKeys = BTreeSet<KeyCode>;

/// Снимок состояния клавиатуры на момент опроса
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeySnapshot {
    pub keys: PressedKeys,
}

impl KeySnapshot {
    pub fn new<I: IntoIterator<Item = KeyCode>>(keys: I) -> Self {
        Self {
            keys: keys.into_iter().collect(),
        }
    }

    pub fn empty() -> Self {
        Self::new(std::iter::empty())
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl fmt::Display for KeySnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.keys.is_empty() {
            return write!(f, "none");
        }
        let names: Vec<String> = self.keys.iter().map(|k| k.to_string()).collect();
        write!(f, "{}", names.join("+"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_deduplicates_and_sorts() {
        let snapshot = KeySnapshot::new([KeyCode(56), KeyCode(29), KeyCode(56)]);
        assert_eq!(snapshot.keys.len(), 2);
        assert_eq!(snapshot.to_string(), "ctrl+alt");
    }

    #[test]
    fn test_empty_snapshot() {
        let snapshot = KeySnapshot::empty();
        assert!(snapshot.is_empty());
        assert_eq!(snapshot.to_string(), "none");
    }

    #[test]
    fn test_unknown_code_display() {
        assert_eq!(KeyCode(600).to_string(), "KEY_600");
        assert_eq!(KeyCode(30).to_string(), "a");
    }
}
