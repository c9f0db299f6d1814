use crate::events::KeyCode;

/// Сворачивание правых модификаторов в левые: в конфигурации `ctrl` означает любую из двух клавиш Ctrl
pub struct ModifierAliases;

impl ModifierAliases {
    pub fn canonical(key_code: KeyCode) -> KeyCode {
        let folded = match evdev::KeyCode::new(key_code.value()) {
            evdev::KeyCode::KEY_RIGHTCTRL => evdev::KeyCode::KEY_LEFTCTRL,
            evdev::KeyCode::KEY_RIGHTALT => evdev::KeyCode::KEY_LEFTALT,
            evdev::KeyCode::KEY_RIGHTSHIFT => evdev::KeyCode::KEY_LEFTSHIFT,
            evdev::KeyCode::KEY_RIGHTMETA => evdev::KeyCode::KEY_LEFTMETA,
            other => other,
        };
        KeyCode(folded.code())
    }
}
