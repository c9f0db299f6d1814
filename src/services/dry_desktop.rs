use crate::error::{PlacerError, Result};
use crate::events::{ActiveWindow, WindowSnapshot};
use crate::geometry::{BorderInsets, MonitorInfo, Rect, WindowBounds};
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;

/// Сколько последних перемещений хранит эмулятор
pub const RECENT_MOVES: usize = 16;

/// Общее состояние эмулируемого рабочего стола для dry-run инспектора и перемещателя.
/// Перемещение меняет окно, поэтому следующий опрос видит его уже на месте.
#[derive(Debug, Clone)]
pub struct DryRunDesktop {
    state: Arc<Mutex<Option<WindowSnapshot>>>,
    moves: Arc<Mutex<VecDeque<Rect>>>,
}

impl DryRunDesktop {
    pub fn new(snapshot: Option<WindowSnapshot>) -> Self {
        Self {
            state: Arc::new(Mutex::new(snapshot)),
            moves: Arc::new(Mutex::new(VecDeque::with_capacity(RECENT_MOVES))),
        }
    }

    /// Один монитор 1920x1080 с панелью снизу и окно с рамкой как у Windows 10
    pub fn default_layout() -> Self {
        let monitor = MonitorInfo::new(Rect::new(0, 0, 1920, 1080), Rect::new(0, 0, 1920, 1040));
        let bounds = WindowBounds::new(Rect::from_xywh(300, 200, 800, 600), BorderInsets::new(0, 7, 7, 7));
        let window = ActiveWindow::new("0x1", bounds).with_title("dry_run");
        Self::new(Some(WindowSnapshot::new(window, monitor)))
    }

    /// Нет активного окна
    #[cfg(test)]
    pub fn without_window() -> Self {
        Self::new(None)
    }

    pub fn snapshot(&self) -> Result<WindowSnapshot> {
        self.state
            .lock()
            .clone()
            .ok_or_else(|| PlacerError::EnvironmentUnavailable("нет активного окна (dry-run)".to_string()))
    }

    pub fn apply(&self, window_id: &str, target: Rect) {
        {
            let mut moves = self.moves.lock();
            if moves.len() == RECENT_MOVES {
                moves.pop_front();
            }
            moves.push_back(target);
        }

        if let Some(snapshot) = self.state.lock().as_mut() {
            if snapshot.window.id == window_id {
                snapshot.window.bounds.rect = target;
            }
        }
    }

    /// Последние применённые прямоугольники, от старых к новым
    pub fn recent_moves(&self) -> Vec<Rect> {
        self.moves.lock().iter().copied().collect()
    }
}
