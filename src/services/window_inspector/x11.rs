use crate::debug_if_enabled;
use crate::error::{PlacerError, Result};
use crate::events::{ActiveWindow, WindowSnapshot};
use crate::geometry::{BorderInsets, MonitorInfo, Rect, WindowBounds};
use crate::placer_error;
use crate::utils::ToolCommand;
use tracing::debug;

use super::r#trait::WindowInspector;

// Кэшированные ресурсы экрана: --query заново опрашивает выходы на каждом вызове
const XRANDR_ARGS: &[&str] = &["--current"];

/// Инспектор окна X11 через xdotool, xprop и xrandr
pub struct X11Inspector;

impl X11Inspector {
    pub fn new() -> Self {
        Self
    }

    async fn active_window_id(&self) -> Result<String> {
        let id = ToolCommand::run("xdotool", &["getactivewindow"]).await?;
        if id.is_empty() || id == "0" {
            return PlacerError::unavailable("нет активного окна");
        }
        Ok(id)
    }

    async fn client_rect(&self, id: &str) -> Result<Rect> {
        let output = ToolCommand::run("xdotool", &["getwindowgeometry", "--shell", id]).await?;
        parse_xdotool_shell(&output)
            .ok_or_else(|| placer_error!(unavailable, "не удалось разобрать геометрию окна {}: {:?}", id, output))
    }

    // Нет свойства у окна без декораций: рамка нулевая
    async fn frame_extents(&self, id: &str) -> BorderInsets {
        match ToolCommand::run("xprop", &["-id", id, "_NET_FRAME_EXTENTS"]).await {
            Ok(output) => match parse_cardinals(&output).as_slice() {
                [left, right, top, bottom, ..] => BorderInsets::new(*top, *bottom, *left, *right),
                _ => {
                    debug!("У окна {} нет _NET_FRAME_EXTENTS", id);
                    BorderInsets::default()
                }
            },
            Err(e) => {
                debug!("Не удалось прочитать рамку окна {}: {}", id, e);
                BorderInsets::default()
            }
        }
    }

    async fn title(&self, id: &str) -> String {
        ToolCommand::run("xdotool", &["getwindowname", id]).await.unwrap_or_default()
    }

    async fn current_desktop(&self) -> usize {
        match ToolCommand::run("xprop", &["-root", "_NET_CURRENT_DESKTOP"]).await {
            Ok(output) => parse_cardinals(&output)
                .first()
                .and_then(|&desktop| usize::try_from(desktop).ok())
                .unwrap_or(0),
            Err(e) => {
                debug!("_NET_CURRENT_DESKTOP недоступна: {}", e);
                0
            }
        }
    }

    async fn monitor_for(&self, window: &Rect) -> Result<MonitorInfo> {
        let output = ToolCommand::run("xrandr", XRANDR_ARGS).await?;
        let monitors = parse_xrandr_monitors(&output);
        let (x, y) = window.center();
        let bounds = nearest_monitor(&monitors, x, y)
            .ok_or_else(|| placer_error!(unavailable, "xrandr не сообщил ни одного активного монитора"))?;

        let work_area = match ToolCommand::run("xprop", &["-root", "_NET_WORKAREA"]).await {
            Ok(output) => work_area_on(&bounds, &parse_cardinals(&output), self.current_desktop().await),
            Err(e) => {
                debug!("_NET_WORKAREA недоступна: {}", e);
                bounds
            }
        };

        Ok(MonitorInfo::new(bounds, work_area))
    }
}

impl Default for X11Inspector {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl WindowInspector for X11Inspector {
    async fn inspect(&self) -> Result<WindowSnapshot> {
        let id = self.active_window_id().await?;
        let client = self.client_rect(&id).await?;
        let borders = self.frame_extents(&id).await;

        let outer = Rect::new(
            client.left - borders.left,
            client.top - borders.top,
            client.right + borders.right,
            client.bottom + borders.bottom,
        );
        let monitor = self.monitor_for(&outer).await?;
        let window = ActiveWindow::new(id.clone(), WindowBounds::new(outer, borders)).with_title(self.title(&id).await);

        debug_if_enabled!("Активное окно {} на мониторе {}", window, monitor.bounds);
        Ok(WindowSnapshot::new(window, monitor))
    }
}

/// Разбор вывода `xdotool getwindowgeometry --shell`
pub fn parse_xdotool_shell(output: &str) -> Option<Rect> {
    let (mut x, mut y, mut width, mut height) = (None, None, None, None);

    for line in output.lines() {
        let Some((key, value)) = line.trim().split_once('=') else {
            continue;
        };
        let value: i32 = match value.trim().parse() {
            Ok(v) => v,
            Err(_) => continue,
        };
        match key.trim() {
            "X" => x = Some(value),
            "Y" => y = Some(value),
            "WIDTH" => width = Some(value),
            "HEIGHT" => height = Some(value),
            _ => {}
        }
    }

    Some(Rect::from_xywh(x?, y?, width?, height?))
}

/// Числа после '=' в выводе xprop для свойства CARDINAL; пусто если свойство не найдено
pub fn parse_cardinals(output: &str) -> Vec<i32> {
    let Some((_, values)) = output.split_once('=') else {
        return Vec::new();
    };
    values
        .split(',')
        .map(|v| v.trim().parse::<i32>())
        .collect::<std::result::Result<Vec<_>, _>>()
        .unwrap_or_default()
}

/// Прямоугольники подключённых и включённых мониторов из `xrandr --current`
pub fn parse_xrandr_monitors(output: &str) -> Vec<Rect> {
    output
        .lines()
        .filter(|line| line.contains(" connected"))
        .filter_map(|line| line.split_whitespace().find_map(parse_xrandr_geometry))
        .collect()
}

// "1920x1080+1920+0"
fn parse_xrandr_geometry(token: &str) -> Option<Rect> {
    let (size, offsets) = token.split_once('+')?;
    let (width, height) = size.split_once('x')?;
    let (x, y) = offsets.split_once('+')?;
    Some(Rect::from_xywh(x.parse().ok()?, y.parse().ok()?, width.parse().ok()?, height.parse().ok()?))
}

/// Монитор, содержащий точку, иначе ближайший к ней
pub fn nearest_monitor(monitors: &[Rect], x: i32, y: i32) -> Option<Rect> {
    monitors
        .iter()
        .find(|m| m.contains_point(x, y))
        .or_else(|| monitors.iter().min_by_key(|m| m.distance_sq_to(x, y)))
        .copied()
}

/// Рабочая область монитора. _NET_WORKAREA хранит по четвёрке (x, y, w, h) на каждый
/// рабочий стол; берётся четвёрка текущего стола (или первая, если стола нет в списке)
/// и обрезается по монитору. Без пересечения используется весь монитор.
pub fn work_area_on(monitor: &Rect, workarea: &[i32], desktop: usize) -> Rect {
    let area = workarea
        .chunks_exact(4)
        .nth(desktop)
        .or_else(|| workarea.chunks_exact(4).next());

    match area {
        Some(&[x, y, w, h]) => Rect::from_xywh(x, y, w, h).intersect(monitor).unwrap_or(*monitor),
        _ => *monitor,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const XRANDR: &str = "\
Screen 0: minimum 8 x 8, current 3840 x 1080, maximum 32767 x 32767
eDP-1 connected primary 1920x1080+0+0 (normal left inverted right x axis y axis) 344mm x 194mm
   1920x1080     60.02*+
HDMI-1 connected 1920x1080+1920+0 (normal left inverted right x axis y axis) 527mm x 296mm
   1920x1080     60.00*+
DP-1 disconnected (normal left inverted right x axis y axis)
DP-2 connected (normal left inverted right x axis y axis)
";

    #[test]
    fn test_parse_xdotool_shell() {
        let output = "WINDOW=62914567\nX=300\nY=227\nWIDTH=800\nHEIGHT=600\nSCREEN=0\n";
        assert_eq!(parse_xdotool_shell(output), Some(Rect::from_xywh(300, 227, 800, 600)));
        assert_eq!(parse_xdotool_shell("WINDOW=1\nX=0\n"), None);
    }

    #[test]
    fn test_parse_cardinals() {
        assert_eq!(parse_cardinals("_NET_FRAME_EXTENTS(CARDINAL) = 1, 2, 37, 4"), vec![1, 2, 37, 4]);
        assert!(parse_cardinals("_NET_FRAME_EXTENTS:  not found.").is_empty());
        assert!(parse_cardinals("_NET_WM_NAME(UTF8_STRING) = \"x\"").is_empty());
    }

    #[test]
    fn test_parse_xrandr_skips_disconnected_and_inactive() {
        let monitors = parse_xrandr_monitors(XRANDR);
        assert_eq!(
            monitors,
            vec![Rect::new(0, 0, 1920, 1080), Rect::new(1920, 0, 3840, 1080)]
        );
    }

    #[test]
    fn test_nearest_monitor() {
        let monitors = parse_xrandr_monitors(XRANDR);
        assert_eq!(nearest_monitor(&monitors, 2500, 500), Some(Rect::new(1920, 0, 3840, 1080)));
        // Центр окна за правым краем: ближайший второй монитор
        assert_eq!(nearest_monitor(&monitors, 4000, 500), Some(Rect::new(1920, 0, 3840, 1080)));
        assert_eq!(nearest_monitor(&monitors, -50, -50), Some(Rect::new(0, 0, 1920, 1080)));
        assert_eq!(nearest_monitor(&[], 0, 0), None);
    }

    #[test]
    fn test_work_area_clipped_to_monitor() {
        let second = Rect::new(1920, 0, 3840, 1080);
        // Общая рабочая область на весь рабочий стол с верхней панелью
        let workarea = [0, 27, 3840, 1053, 0, 27, 3840, 1053];
        assert_eq!(work_area_on(&second, &workarea, 0), Rect::new(1920, 27, 3840, 1080));

        assert_eq!(work_area_on(&second, &[0, 0, 1920, 1080], 0), second);
        assert_eq!(work_area_on(&second, &[], 0), second);
    }

    #[test]
    fn test_work_area_follows_current_desktop() {
        let monitor = Rect::new(0, 0, 1920, 1080);
        // Стол 0 с верхней панелью, стол 1 с нижней
        let workarea = [0, 27, 1920, 1053, 0, 0, 1920, 1040];

        assert_eq!(work_area_on(&monitor, &workarea, 0), Rect::new(0, 27, 1920, 1080));
        assert_eq!(work_area_on(&monitor, &workarea, 1), Rect::new(0, 0, 1920, 1040));
        // Стол за пределами списка: первая четвёрка
        assert_eq!(work_area_on(&monitor, &workarea, 5), Rect::new(0, 27, 1920, 1080));
        // Неполная четвёрка игнорируется
        assert_eq!(work_area_on(&monitor, &[0, 27, 1920], 0), monitor);
    }

    #[test]
    fn test_monitors_read_from_cached_resources() {
        assert_eq!(XRANDR_ARGS, ["--current"]);
    }
}
