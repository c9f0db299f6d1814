use crate::config::Config;
use crate::error::Result;
use crate::events::KeySnapshot;
use crate::hotkeys::HotkeyRegistry;
use std::sync::Arc;

/// Source of "which keys are held right now" snapshots
#[async_trait::async_trait]
pub trait KeySampler {
    /// Take one snapshot of the pressed keys
    async fn sample(&mut self) -> Result<KeySnapshot>;
}

/// Factory function to create an appropriate key sampler based on the dry_run flag
pub fn create_key_sampler(
    config: Arc<Config>,
    registry: Arc<HotkeyRegistry>,
    dry_run: bool,
) -> Result<Box<dyn KeySampler + Send>> {
    if dry_run {
        Ok(Box::new(super::dry_run::DryRunKeySampler::from_registry(&registry)))
    } else {
        Ok(Box::new(super::evdev_sampler::EvdevKeySampler::new(config)?))
    }
}
