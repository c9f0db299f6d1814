use crate::error::Result;
use crate::events::{KeySnapshot, PressedKeys};
use crate::hotkeys::HotkeyRegistry;
use tracing::info;

use super::r#trait::KeySampler;

const HOLD_TICKS: usize = 3;
const IDLE_TICKS: usize = 5;

/// Эмуляция клавиатуры: по очереди «зажимает» каждое сочетание из реестра
/// на несколько опросов, между сочетаниями клавиатура пуста
pub struct DryRunKeySampler {
    script: Vec<PressedKeys>,
    position: usize,
}

impl DryRunKeySampler {
    pub fn new(script: Vec<PressedKeys>) -> Self {
        Self { script, position: 0 }
    }

    pub fn from_registry(registry: &HotkeyRegistry) -> Self {
        info!("Dry-run режим - клавиатура эмулируется по {} сочетаниям", registry.len());

        let mut script = Vec::new();
        for entry in registry.iter() {
            let held: PressedKeys = entry.combination.keys().iter().copied().collect();
            script.extend(std::iter::repeat(held).take(HOLD_TICKS));
            script.extend(std::iter::repeat(PressedKeys::new()).take(IDLE_TICKS));
        }
        Self::new(script)
    }
}

#[async_trait::async_trait]
impl KeySampler for DryRunKeySampler {
    async fn sample(&mut self) -> Result<KeySnapshot> {
        if self.script.is_empty() {
            return Ok(KeySnapshot::empty());
        }

        let keys = self.script[self.position].clone();
        self.position = (self.position + 1) % self.script.len();
        Ok(KeySnapshot::new(keys))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HotkeyRecord;

    fn registry(combos: &[&[&str]]) -> HotkeyRegistry {
        let records: Vec<HotkeyRecord> = combos
            .iter()
            .enumerate()
            .map(|(i, keys)| HotkeyRecord {
                name: format!("h{i}"),
                keys: keys.iter().map(|k| k.to_string()).collect(),
                ..Default::default()
            })
            .collect();
        HotkeyRegistry::from_records(&records).unwrap()
    }

    #[tokio::test]
    async fn test_script_holds_then_releases() {
        let registry = registry(&[&["super", "left"]]);
        let mut sampler = DryRunKeySampler::from_registry(&registry);

        for _ in 0..HOLD_TICKS {
            let snapshot = sampler.sample().await.unwrap();
            assert_eq!(snapshot.to_string(), "left+super");
        }
        for _ in 0..IDLE_TICKS {
            assert!(sampler.sample().await.unwrap().is_empty());
        }
        // По кругу
        assert!(!sampler.sample().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_every_combination_resolves_to_itself() {
        let registry = registry(&[&["ctrl"], &["ctrl", "alt"], &["super", "up"]]);
        let mut sampler = DryRunKeySampler::from_registry(&registry);

        let mut seen = Vec::new();
        for _ in 0..registry.len() * (HOLD_TICKS + IDLE_TICKS) {
            let snapshot = sampler.sample().await.unwrap();
            if let Some(entry) = registry.resolve(&snapshot.keys) {
                if seen.last() != Some(&entry.name) {
                    seen.push(entry.name.clone());
                }
            }
        }
        assert_eq!(seen, vec!["h0", "h1", "h2"]);
    }

    #[tokio::test]
    async fn test_empty_registry_is_always_idle() {
        let mut sampler = DryRunKeySampler::from_registry(&HotkeyRegistry::new());
        assert!(sampler.sample().await.unwrap().is_empty());
    }
}
