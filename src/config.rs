use anyhow::{Context, Result};
use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub poll: PollConfig,
    #[serde(default)]
    pub window: WindowConfig,
    #[serde(default)]
    pub hotkeys: Vec<HotkeyRecord>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct InputConfig {
    pub device_path: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PollConfig {
    pub interval_ms: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct WindowConfig {
    pub restore_maximized: bool,
    pub skip_if_in_place: bool,
}

/// Запись сочетания клавиш в том виде, в каком она лежит в файле.
/// Проверка имён клавиш и диапазонов делается при построении HotkeyRegistry.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct HotkeyRecord {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub keys: Vec<String>,
    #[serde(default)]
    pub location: LocationRecord,
    #[serde(default)]
    pub size: SizeRecord,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct LocationRecord {
    pub vertical: Option<String>,
    pub horizontal: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SizeRecord {
    pub vertical: Option<SizeValue>,
    pub horizontal: Option<SizeValue>,
}

/// Сырое значение размера: число, дробь, строка или что угодно ещё.
/// Всё, кроме целого процента и "none", отвергается позже с InvalidSize,
/// а не ошибкой разбора файла.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum SizeValue {
    Number(i64),
    Fraction(f64),
    Text(String),
    // Должен идти последним: принимает любое значение
    Other(figment::value::Value),
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "compact".to_string(),
        }
    }
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            device_path: "auto".to_string(),
        }
    }
}

impl Default for PollConfig {
    fn default() -> Self {
        Self { interval_ms: 50 }
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            restore_maximized: true,
            skip_if_in_place: true,
        }
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(config_path: P) -> Result<Self> {
        let config_path = config_path.as_ref();

        if !config_path.exists() {
            anyhow::bail!("Файл конфигурации не найден: {}", config_path.display());
        }

        let figment = Figment::new()
            .merge(Toml::file(config_path))
            .merge(Env::prefixed("PLACER_").split("__"));

        let config: Config = figment
            .extract()
            .with_context(|| format!("Не удалось загрузить конфигурацию из {:?}", config_path))?;

        config.validate()?;

        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        // Валидация настроек логирования
        match self.logging.level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => anyhow::bail!("Неверный уровень логирования: {}", self.logging.level),
        }

        match self.logging.format.as_str() {
            "compact" | "full" => {}
            _ => anyhow::bail!("Неверный формат логирования: {}", self.logging.format),
        }

        // Валидация настроек опроса
        if self.poll.interval_ms == 0 || self.poll.interval_ms > 1000 {
            anyhow::bail!(
                "poll.interval_ms должно быть от 1 до 1000, получено {}",
                self.poll.interval_ms
            );
        }

        if self.input.device_path.trim().is_empty() {
            anyhow::bail!("input.device_path не может быть пустым (используйте \"auto\")");
        }

        Ok(())
    }
}
