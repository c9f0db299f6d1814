use crate::error::Result;
use crate::events::ActiveWindow;
use crate::geometry::Rect;
use crate::services::DryRunDesktop;
use tracing::info;

use super::r#trait::WindowMover;

pub struct DryRunMover {
    desktop: DryRunDesktop,
}

impl DryRunMover {
    pub fn new(desktop: DryRunDesktop) -> Self {
        Self { desktop }
    }
}

#[async_trait::async_trait]
impl WindowMover for DryRunMover {
    async fn move_window(&self, window: &ActiveWindow, target: Rect) -> Result<()> {
        info!("[DRY RUN] Перемещение окна {} -> {}", window, target);
        self.desktop.apply(&window.id, target);
        Ok(())
    }
}
