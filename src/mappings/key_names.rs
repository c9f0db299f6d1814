use crate::events::KeyCode;
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Таблица имён клавиш для конфигурации и обратного перевода кодов evdev в имена.
/// Имена регистронезависимы; обратный перевод всегда возвращает каноническое имя.
pub struct KeyNames;

// Канонические имена: (имя, evdev код)
const CANONICAL: &[(&str, u16)] = &[
    // Буквенные клавиши
    ("a", 30), ("b", 48), ("c", 46), ("d", 32), ("e", 18), ("f", 33), ("g", 34),
    ("h", 35), ("i", 23), ("j", 36), ("k", 37), ("l", 38), ("m", 50), ("n", 49),
    ("o", 24), ("p", 25), ("q", 16), ("r", 19), ("s", 31), ("t", 20), ("u", 22),
    ("v", 47), ("w", 17), ("x", 45), ("y", 21), ("z", 44),

    // Цифровые клавиши (верхний ряд)
    ("1", 2), ("2", 3), ("3", 4), ("4", 5), ("5", 6),
    ("6", 7), ("7", 8), ("8", 9), ("9", 10), ("0", 11),

    // Специальные клавиши
    ("space", 57), ("enter", 28), ("escape", 1), ("backspace", 14), ("tab", 15),

    // Пунктуация
    ("minus", 12), ("equal", 13), ("leftbrace", 26), ("rightbrace", 27),
    ("backslash", 43), ("semicolon", 39), ("apostrophe", 40), ("grave", 41),
    ("comma", 51), ("dot", 52), ("slash", 53),

    // Навигация/редакция
    ("insert", 110), ("delete", 111), ("home", 102), ("end", 107),
    ("pageup", 104), ("pagedown", 109),
    ("up", 103), ("down", 108), ("left", 105), ("right", 106),

    // Системные
    ("printscreen", 99), ("scrolllock", 70), ("pause", 119), ("numlock", 69), ("menu", 127),

    // Numpad
    ("kp0", 82), ("kp1", 79), ("kp2", 80), ("kp3", 81), ("kp4", 75),
    ("kp5", 76), ("kp6", 77), ("kp7", 71), ("kp8", 72), ("kp9", 73),
    ("kpdecimal", 83), ("kpdivide", 98), ("kpmultiply", 55),
    ("kpadd", 78), ("kpsubtract", 74), ("kpenter", 96),

    // Функциональные клавиши
    ("f1", 59), ("f2", 60), ("f3", 61), ("f4", 62), ("f5", 63), ("f6", 64),
    ("f7", 65), ("f8", 66), ("f9", 67), ("f10", 68), ("f11", 87), ("f12", 88),

    // Модификаторы (левые коды, правые сворачиваются в ModifierAliases)
    ("ctrl", 29), ("alt", 56), ("shift", 42), ("super", 125),
];

// Альтернативные имена, принимаются только на входе
const ALIASES: &[(&str, &str)] = &[
    ("return", "enter"),
    ("esc", "escape"),
    ("window", "super"),
    ("win", "super"),
    ("meta", "super"),
    ("control", "ctrl"),
    ("decimal", "kpdecimal"),
    ("+", "kpadd"),
    ("-", "kpsubtract"),
    ("*", "kpmultiply"),
    ("/", "kpdivide"),
];

static NAME_TO_CODE: Lazy<HashMap<&'static str, u16>> = Lazy::new(|| {
    let mut map: HashMap<&'static str, u16> = CANONICAL.iter().copied().collect();
    for &(alias, target) in ALIASES {
        if let Some(&code) = map.get(target) {
            map.insert(alias, code);
        }
    }
    map
});

static CODE_TO_NAME: Lazy<HashMap<u16, &'static str>> =
    Lazy::new(|| CANONICAL.iter().map(|&(name, code)| (code, name)).collect());

static VALID_NAMES: Lazy<Vec<&'static str>> = Lazy::new(|| {
    let mut names: Vec<&'static str> = NAME_TO_CODE.keys().copied().collect();
    names.sort_unstable();
    names
});

impl KeyNames {
    /// Получить код клавиши по её имени
    pub fn lookup(key_name: &str) -> Option<KeyCode> {
        let normalized = key_name.trim().to_lowercase();
        NAME_TO_CODE.get(normalized.as_str()).copied().map(KeyCode)
    }

    /// Получить каноническое имя клавиши по её коду
    pub fn name_of(key_code: KeyCode) -> Option<&'static str> {
        CODE_TO_NAME.get(&key_code.value()).copied()
    }

    /// Все допустимые имена, отсортированные
    pub fn valid_names() -> &'static [&'static str] {
        &VALID_NAMES
    }
}
