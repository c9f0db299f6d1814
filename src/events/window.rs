use crate::geometry::{MonitorInfo, WindowBounds};
use std::fmt;

/// Информация об активном окне
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveWindow {
    pub id: String,
    pub title: String,
    pub bounds: WindowBounds,
}

impl ActiveWindow {
    pub fn new(id: impl Into<String>, bounds: WindowBounds) -> Self {
        Self {
            id: id.into(),
            title: String::new(),
            bounds,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }
}

impl fmt::Display for ActiveWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.title.is_empty() {
            write!(f, "{} {}", self.id, self.bounds.rect)
        } else {
            write!(f, "\"{}\" ({}) {}", self.title, self.id, self.bounds.rect)
        }
    }
}

/// Активное окно вместе с монитором, на котором оно находится
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowSnapshot {
    pub window: ActiveWindow,
    pub monitor: MonitorInfo,
}

impl WindowSnapshot {
    pub fn new(window: ActiveWindow, monitor: MonitorInfo) -> Self {
        Self { window, monitor }
    }
}
