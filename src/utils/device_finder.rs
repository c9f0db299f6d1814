use crate::error::{PlacerError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Поиск клавиатуры, с которой снимается состояние клавиш
pub struct DeviceFinder;

// Клавиши, без которых устройство не считается клавиатурой
const REQUIRED_KEYS: [evdev::KeyCode; 3] = [evdev::KeyCode::KEY_A, evdev::KeyCode::KEY_SPACE, evdev::KeyCode::KEY_ENTER];
const MIN_KEY_COUNT: usize = 20;

impl DeviceFinder {
    /// "auto" запускает автопоиск, любое другое значение считается путём к устройству
    pub fn find_keyboard_device(device_path: &str) -> Result<PathBuf> {
        if device_path != "auto" {
            let path = PathBuf::from(device_path);
            return if path.exists() {
                info!("Используется указанное устройство: {:?}", path);
                Ok(path)
            } else {
                PlacerError::device_not_found(format!("Указанное устройство не найдено: {:?}", path))
            };
        }

        info!("Автопоиск клавиатурного устройства...");

        if let Some(device) = Self::find_by_id()? {
            info!("Найдено устройство по ID: {:?}", device);
            return Ok(device);
        }

        if let Some(device) = Self::find_by_event_devices()? {
            info!("Найдено устройство среди event устройств: {:?}", device);
            return Ok(device);
        }

        PlacerError::device_not_found(
            "Не удалось найти клавиатуру. Укажите input.device_path или добавьте пользователя в группу 'input'",
        )
    }

    fn find_by_id() -> Result<Option<PathBuf>> {
        let by_id_dir = Path::new("/dev/input/by-id");
        if !by_id_dir.exists() {
            debug!("Директория {:?} не существует", by_id_dir);
            return Ok(None);
        }

        let entries = fs::read_dir(by_id_dir)
            .map_err(|e| PlacerError::Permission(format!("Нет доступа к {:?}: {}", by_id_dir, e)))?;

        let mut candidates: Vec<(PathBuf, u8)> = Vec::new();
        for entry in entries {
            let path = entry?.path();
            let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("").to_string();

            if !name.contains("event") || !(name.contains("kbd") || name.to_lowercase().contains("keyboard")) {
                continue;
            }
            if name.to_lowercase().contains("mouse") {
                debug!("Пропускаем мышь: {}", name);
                continue;
            }
            if !Self::is_keyboard_device(&path) {
                debug!("Устройство не прошло проверку как клавиатура: {}", name);
                continue;
            }

            let priority = classify_by_id_name(&name);
            debug!("Кандидат {} (приоритет {})", name, priority);
            candidates.push((path, priority));
        }

        // Стабильная сортировка: при равном приоритете остаётся порядок каталога
        candidates.sort_by(|a, b| b.1.cmp(&a.1));
        Ok(candidates.into_iter().next().map(|(path, _)| path))
    }

    fn find_by_event_devices() -> Result<Option<PathBuf>> {
        let input_dir = Path::new("/dev/input");
        let entries = fs::read_dir(input_dir)
            .map_err(|e| PlacerError::Permission(format!("Нет доступа к {:?}: {}", input_dir, e)))?;

        let mut event_devices: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| {
                path.file_name()
                    .and_then(|n| n.to_str())
                    .is_some_and(|n| n.starts_with("event"))
            })
            .collect();
        event_devices.sort_by_key(|path| event_number(path));

        Ok(event_devices.into_iter().find(|path| Self::is_keyboard_device(path)))
    }

    fn is_keyboard_device(device_path: &Path) -> bool {
        match evdev::Device::open(device_path) {
            Ok(device) => {
                let device_name = device.name().unwrap_or("unknown").to_lowercase();
                if ["mouse", "touchpad", "trackpoint"].iter().any(|m| device_name.contains(m)) {
                    debug!("Пропускаем указывающее устройство {:?} ({})", device_path, device_name);
                    return false;
                }

                let is_keyboard = device.supported_keys().is_some_and(|keys| {
                    REQUIRED_KEYS.iter().all(|key| keys.contains(*key)) && keys.iter().count() > MIN_KEY_COUNT
                });

                if is_keyboard {
                    debug!("Устройство {:?} ({}) подходит как клавиатура", device_path, device_name);
                }
                is_keyboard
            }
            Err(e) => {
                warn!("Не удалось открыть устройство {:?}: {}", device_path, e);
                false
            }
        }
    }
}

fn classify_by_id_name(name: &str) -> u8 {
    if name.ends_with("event-kbd") {
        100
    } else if name.to_lowercase().contains("keyboard") {
        50
    } else {
        10
    }
}

// event10 должен идти после event9
fn event_number(path: &Path) -> u32 {
    path.file_name()
        .and_then(|n| n.to_str())
        .and_then(|n| n.strip_prefix("event"))
        .and_then(|n| n.parse().ok())
        .unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nonexistent_explicit_path() {
        let result = DeviceFinder::find_keyboard_device("/non/existent/path");
        assert!(matches!(result, Err(PlacerError::DeviceNotFound(_))));
    }

    #[test]
    fn test_by_id_priority() {
        assert_eq!(classify_by_id_name("usb-Logitech_USB_Keyboard-event-kbd"), 100);
        assert_eq!(classify_by_id_name("usb-Some_Keyboard-if01-event-joystick"), 50);
        assert_eq!(classify_by_id_name("platform-i8042-kbd-event"), 10);
    }

    #[test]
    fn test_event_numeric_order() {
        let mut paths = vec![
            PathBuf::from("/dev/input/event10"),
            PathBuf::from("/dev/input/event2"),
            PathBuf::from("/dev/input/event9"),
        ];
        paths.sort_by_key(|p| event_number(p));
        assert_eq!(paths[0], PathBuf::from("/dev/input/event2"));
        assert_eq!(paths[2], PathBuf::from("/dev/input/event10"));
    }
}
