use crate::error::{PlacerError, Result};
use crate::trace_if_enabled;
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::path::PathBuf;
use tokio::process::Command;
use tracing::debug;

/// Запуск внешних утилит X11 (xdotool, xprop, xrandr, wmctrl).
///
/// Под sudo команды перезапускаются от имени SUDO_USER, иначе X-сессия пользователя недоступна.
pub struct ToolCommand;

// Подстановки окружения вычисляются один раз на процесс
static ENV_OVERRIDES: Lazy<HashMap<String, String>> = Lazy::new(build_env_overrides);

fn build_env_overrides() -> HashMap<String, String> {
    let mut env_vars = HashMap::new();

    if std::env::var("USER").unwrap_or_default() == "root" {
        if let Ok(sudo_user) = std::env::var("SUDO_USER") {
            if let Ok(output) = std::process::Command::new("id").args(["-u", &sudo_user]).output() {
                if let Ok(uid_str) = String::from_utf8(output.stdout) {
                    let uid = uid_str.trim();
                    debug!("Подставляем окружение пользователя {}: uid={}", sudo_user, uid);
                    env_vars.insert("XDG_RUNTIME_DIR".to_string(), format!("/run/user/{}", uid));
                    env_vars.insert("USER".to_string(), sudo_user);
                }
            }
        }
    }

    for name in ["DISPLAY", "XAUTHORITY"] {
        if let Ok(value) = std::env::var(name) {
            env_vars.insert(name.to_string(), value);
        }
    }

    env_vars
}

impl ToolCommand {
    pub fn build(program: &str, args: &[&str]) -> Command {
        let mut cmd = match std::env::var("SUDO_USER") {
            Ok(sudo_user) => {
                let mut cmd = Command::new("sudo");
                cmd.args(["-E", "-u", &sudo_user, program]);
                cmd
            }
            Err(_) => Command::new(program),
        };
        cmd.args(args);
        cmd.kill_on_drop(true);

        for (key, value) in ENV_OVERRIDES.iter() {
            cmd.env(key, value);
        }

        cmd
    }

    /// Выполнить утилиту и вернуть stdout без пробелов по краям.
    /// Любая неудача означает, что окружение сейчас недоступно.
    pub async fn run(program: &str, args: &[&str]) -> Result<String> {
        trace_if_enabled!("Запуск {} {:?}", program, args);

        let output = Self::build(program, args)
            .output()
            .await
            .map_err(|e| PlacerError::EnvironmentUnavailable(format!("{} не найден: {}", program, e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return PlacerError::unavailable(format!(
                "{} {} вернул ошибку: {}",
                program,
                args.join(" "),
                stderr.trim()
            ));
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    /// Найти утилиту в PATH
    pub fn find_in_path(program: &str) -> Option<PathBuf> {
        let path = std::env::var_os("PATH")?;
        std::env::split_paths(&path)
            .map(|dir| dir.join(program))
            .find(|candidate| candidate.is_file())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_in_path() {
        assert!(ToolCommand::find_in_path("sh").is_some());
        assert!(ToolCommand::find_in_path("definitely-not-a-real-tool-42").is_none());
    }

    #[tokio::test]
    async fn test_missing_tool_is_environment_unavailable() {
        if std::env::var("SUDO_USER").is_ok() {
            return;
        }
        let err = ToolCommand::run("definitely-not-a-real-tool-42", &[]).await.unwrap_err();
        assert!(matches!(err, PlacerError::EnvironmentUnavailable(_)));
    }

    #[tokio::test]
    async fn test_run_captures_stdout() {
        if std::env::var("SUDO_USER").is_ok() {
            return;
        }
        let out = ToolCommand::run("sh", &["-c", "echo '  hello  '"]).await.unwrap();
        assert_eq!(out, "hello");

        let err = ToolCommand::run("sh", &["-c", "exit 3"]).await.unwrap_err();
        assert!(matches!(err, PlacerError::EnvironmentUnavailable(_)));
    }
}
