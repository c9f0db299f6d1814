use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlacerError {
    #[error("Ошибка конфигурации: {0}")]
    Config(#[from] anyhow::Error),

    #[error("Ошибка ввода-вывода: {0}")]
    Io(#[from] std::io::Error),

    #[error("Неизвестная клавиша '{key}' в сочетании \"{hotkey}\". Допустимые имена: {valid}")]
    UnknownKey {
        hotkey: String,
        key: String,
        valid: String,
    },

    #[error("Сочетание \"{hotkey}\" не содержит ни одной клавиши")]
    EmptyCombination { hotkey: String },

    #[error("Сочетания \"{first}\" и \"{second}\" используют одинаковый набор клавиш: {keys}")]
    DuplicateHotkey {
        first: String,
        second: String,
        keys: String,
    },

    #[error("Недопустимый размер '{value}' ({axis}) в сочетании \"{hotkey}\": ожидается целое число от 0 до 100")]
    InvalidSize {
        hotkey: String,
        axis: &'static str,
        value: String,
    },

    #[error("Недопустимое положение '{value}' ({axis}) в сочетании \"{hotkey}\"")]
    InvalidAnchor {
        hotkey: String,
        axis: &'static str,
        value: String,
    },

    #[error("Окружение недоступно: {0}")]
    EnvironmentUnavailable(String),

    #[error("Устройство не найдено: {0}")]
    DeviceNotFound(String),

    #[error("Недостаточно прав доступа: {0}")]
    Permission(String),
}

impl PlacerError {
    pub fn device_not_found<T>(msg: impl Into<String>) -> Result<T> {
        Err(PlacerError::DeviceNotFound(msg.into()))
    }

    pub fn unavailable<T>(msg: impl Into<String>) -> Result<T> {
        Err(PlacerError::EnvironmentUnavailable(msg.into()))
    }
}

pub type Result<T> = std::result::Result<T, PlacerError>;

// Удобные макросы для создания ошибок
#[macro_export]
macro_rules! placer_error {
    (unavailable, $($arg:tt)*) => {
        $crate::error::PlacerError::EnvironmentUnavailable(format!($($arg)*))
    };
    (device_not_found, $($arg:tt)*) => {
        $crate::error::PlacerError::DeviceNotFound(format!($($arg)*))
    };
    (permission, $($arg:tt)*) => {
        $crate::error::PlacerError::Permission(format!($($arg)*))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_message_names_both_hotkeys() {
        let err = PlacerError::DuplicateHotkey {
            first: "left".to_string(),
            second: "also left".to_string(),
            keys: "left+super".to_string(),
        };
        let message = err.to_string();
        assert!(message.contains("\"left\""));
        assert!(message.contains("\"also left\""));
        assert!(message.contains("left+super"));
    }

    #[test]
    fn test_error_macro() {
        let err = placer_error!(unavailable, "монитор {}", 2);
        assert_eq!(err.to_string(), "Окружение недоступно: монитор 2");
    }
}
