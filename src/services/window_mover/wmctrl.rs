use crate::error::Result;
use crate::events::ActiveWindow;
use crate::geometry::{Rect, WindowBounds};
use crate::utils::ToolCommand;
use tracing::{debug, warn};

use super::r#trait::WindowMover;

// wmctrl -e понимает -1 как "не менять"
const WMCTRL_KEEP: i32 = -1;

/// Перемещение окна через `wmctrl -e`
pub struct WmctrlMover {
    restore_maximized: bool,
}

impl WmctrlMover {
    pub fn new(restore_maximized: bool) -> Self {
        Self { restore_maximized }
    }
}

/// Команды для одного перемещения: `wmctrl -e` и, если координата совпала с -1,
/// дополнительный `xdotool windowmove` на ту же позицию
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveCommands {
    pub geometry: String,
    pub reposition: Option<Vec<String>>,
}

impl MoveCommands {
    pub fn new(window: &ActiveWindow, target: Rect) -> Self {
        let reposition = (target.left == WMCTRL_KEEP || target.top == WMCTRL_KEEP).then(|| {
            vec![
                "windowmove".to_string(),
                "--".to_string(),
                window.id.clone(),
                target.left.to_string(),
                target.top.to_string(),
            ]
        });

        Self {
            geometry: move_argument(window, target),
            reposition,
        }
    }
}

#[async_trait::async_trait]
impl WindowMover for WmctrlMover {
    async fn move_window(&self, window: &ActiveWindow, target: Rect) -> Result<()> {
        // Развёрнутое окно WM не даёт двигать
        if self.restore_maximized {
            if let Err(e) = ToolCommand::run(
                "wmctrl",
                &["-i", "-r", &window.id, "-b", "remove,maximized_vert,maximized_horz"],
            )
            .await
            {
                warn!("Не удалось снять развёрнутое состояние окна {}: {}", window.id, e);
            }
        }

        let commands = MoveCommands::new(window, target);
        debug!("wmctrl -i -r {} -e {}", window.id, commands.geometry);
        ToolCommand::run("wmctrl", &["-i", "-r", &window.id, "-e", &commands.geometry]).await?;

        if let Some(args) = &commands.reposition {
            debug!("xdotool {}", args.join(" "));
            let args: Vec<&str> = args.iter().map(String::as_str).collect();
            ToolCommand::run("xdotool", &args).await?;
        }
        Ok(())
    }
}

/// Аргумент `-e`: гравитация 0, позиция рамки и размер клиентской области
pub fn move_argument(window: &ActiveWindow, target: Rect) -> String {
    let client = WindowBounds::new(target, window.bounds.borders).client();
    format!("0,{},{},{},{}", target.left, target.top, client.width().max(1), client.height().max(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::BorderInsets;

    #[test]
    fn test_move_argument_subtracts_frame() {
        let bounds = WindowBounds::new(Rect::from_xywh(0, 0, 100, 100), BorderInsets::new(37, 1, 1, 1));
        let window = ActiveWindow::new("62914567", bounds);

        let target = Rect::from_xywh(3, 0, 962, 1080);
        let commands = MoveCommands::new(&window, target);
        assert_eq!(commands.geometry, "0,3,0,960,1042");
        assert_eq!(commands.reposition, None);
    }

    #[test]
    fn test_minus_one_position_applied_by_xdotool() {
        // Рамка 1px, Top/Left 50%x100% на 1920x1080: окно должно встать в (-1, -1)
        let bounds = WindowBounds::new(Rect::from_xywh(200, 200, 400, 300), BorderInsets::new(1, 1, 1, 1));
        let window = ActiveWindow::new("62914567", bounds);
        let target = Rect::from_xywh(-1, -1, 962, 1082);

        let commands = MoveCommands::new(&window, target);
        assert_eq!(commands.geometry, "0,-1,-1,960,1080");
        assert_eq!(
            commands.reposition,
            Some(vec![
                "windowmove".to_string(),
                "--".to_string(),
                "62914567".to_string(),
                "-1".to_string(),
                "-1".to_string(),
            ])
        );

        // Только одна координата равна -1
        let commands = MoveCommands::new(&window, Rect::from_xywh(-1, 40, 962, 1000));
        let args = commands.reposition.unwrap();
        assert_eq!(&args[3..], ["-1", "40"]);
    }

    #[test]
    fn test_other_negative_positions_go_through_wmctrl() {
        let bounds = WindowBounds::new(Rect::from_xywh(0, 0, 100, 100), BorderInsets::new(0, 7, 7, 7));
        let window = ActiveWindow::new("1", bounds);

        let commands = MoveCommands::new(&window, Rect::from_xywh(-7, 0, 974, 1047));
        assert_eq!(commands.geometry, "0,-7,0,960,1040");
        assert_eq!(commands.reposition, None);
    }

    #[test]
    fn test_move_argument_never_collapses() {
        let bounds = WindowBounds::new(Rect::from_xywh(0, 0, 100, 100), BorderInsets::new(0, 7, 7, 7));
        let window = ActiveWindow::new("1", bounds);

        // 0% даёт только рамку
        assert_eq!(move_argument(&window, Rect::from_xywh(0, 0, 14, 7)), "0,0,0,1,1");
    }
}
