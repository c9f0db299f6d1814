use crate::config::Config;
use crate::error::{PlacerError, Result};
use crate::events::{KeyCode, KeySnapshot};
use crate::mappings::ModifierAliases;
use crate::trace_if_enabled;
use crate::utils::DeviceFinder;
use evdev::Device;
use std::sync::Arc;
use tracing::info;

use super::r#trait::KeySampler;

/// Снимает состояние клавиш ядра через EVIOCGKEY.
///
/// Устройство не захватывается: события продолжают доходить до X-сервера,
/// мы только читаем, какие клавиши зажаты в момент опроса.
pub struct EvdevKeySampler {
    device: Device,
}

impl EvdevKeySampler {
    pub fn new(config: Arc<Config>) -> Result<Self> {
        info!("Инициализация EvdevKeySampler");

        let device_path = DeviceFinder::find_keyboard_device(&config.input.device_path)?;
        let device = Device::open(&device_path).map_err(|e| {
            PlacerError::DeviceNotFound(format!("Не удалось открыть устройство {:?}: {}", device_path, e))
        })?;

        info!(
            "Опрашиваем устройство {:?} ({})",
            device_path,
            device.name().unwrap_or("Unknown")
        );

        Ok(Self { device })
    }
}

#[async_trait::async_trait]
impl KeySampler for EvdevKeySampler {
    async fn sample(&mut self) -> Result<KeySnapshot> {
        let state = self.device.get_key_state()?;
        let snapshot = KeySnapshot::new(
            state
                .iter()
                .map(|key| ModifierAliases::canonical(KeyCode(key.code()))),
        );

        if !snapshot.is_empty() {
            trace_if_enabled!("Зажаты клавиши: {}", snapshot);
        }
        Ok(snapshot)
    }
}
