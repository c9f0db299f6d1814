use crate::error::{PlacerError, Result};
use std::fs;
use tracing::{info, warn};

use super::command::ToolCommand;

/// Внешние утилиты, через которые читается и двигается окно
pub const REQUIRED_TOOLS: [&str; 4] = ["xdotool", "xprop", "xrandr", "wmctrl"];

/// Проверить окружение перед запуском цикла.
/// Фатальна только недоступность /dev/input, остальное выводится предупреждениями:
/// X-сессия может появиться позже, а без неё опрос просто пропускается.
pub fn check_permissions() -> Result<()> {
    info!("Проверка окружения...");

    check_input_devices_access()?;
    check_display();
    check_tools();
    check_not_root();

    info!("Проверка окружения завершена");
    Ok(())
}

fn check_input_devices_access() -> Result<()> {
    let input_dir = "/dev/input";

    if !std::path::Path::new(input_dir).exists() {
        return Err(PlacerError::Permission(format!("Директория {} не существует", input_dir)));
    }

    match fs::read_dir(input_dir) {
        Ok(_) => {
            info!("Доступ к {} подтвержден", input_dir);
            Ok(())
        }
        Err(e) => Err(PlacerError::Permission(format!(
            "Нет доступа к {}: {}. Добавьте пользователя в группу 'input'",
            input_dir, e
        ))),
    }
}

/// Имя X-дисплея; пустое значение равно отсутствующему
fn x_display_name(raw: Option<String>) -> Option<String> {
    raw.filter(|value| !value.trim().is_empty())
}

fn check_display() {
    match x_display_name(std::env::var("DISPLAY").ok()) {
        Some(name) => info!("X-дисплей: {}", name),
        None => warn!("Переменная DISPLAY не задана, окна не будут найдены до появления X-сессии"),
    }

    if std::env::var("XDG_SESSION_TYPE").is_ok_and(|t| t == "wayland") {
        warn!("Сессия Wayland: перемещаться будут только окна XWayland");
    }
}

/// Список утилит, которых нет в PATH
pub fn missing_tools() -> Vec<&'static str> {
    REQUIRED_TOOLS
        .iter()
        .copied()
        .filter(|tool| ToolCommand::find_in_path(tool).is_none())
        .collect()
}

fn check_tools() {
    let missing = missing_tools();
    if missing.is_empty() {
        info!("Все утилиты найдены: {}", REQUIRED_TOOLS.join(", "));
    } else {
        warn!("Не найдены утилиты: {}", missing.join(", "));
        warn!("   Установите их, например: sudo apt install xdotool x11-utils x11-xserver-utils wmctrl");
    }
}

fn check_not_root() {
    match std::env::var("USER") {
        Ok(user) if user == "root" => {
            warn!("⚠️  Приложение запущено от имени root!");
            warn!("   Рекомендуется добавить пользователя в группу 'input'");
            warn!("   и запускать приложение от имени обычного пользователя:");
            warn!("   sudo usermod -a -G input $USER");
            warn!("   (затем перезайдите в систему)");
        }
        Ok(user) => info!("Приложение запущено от имени пользователя: {}", user),
        Err(_) => warn!("Не удалось определить пользователя"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_x_display_name() {
        assert_eq!(x_display_name(Some(":0".to_string())), Some(":0".to_string()));
        assert_eq!(x_display_name(Some("  ".to_string())), None);
        assert_eq!(x_display_name(None), None);
    }

    #[test]
    fn test_missing_tools_is_subset_of_required() {
        for tool in missing_tools() {
            assert!(REQUIRED_TOOLS.contains(&tool));
        }
    }
}
