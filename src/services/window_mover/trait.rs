use crate::config::Config;
use crate::error::Result;
use crate::events::ActiveWindow;
use crate::geometry::Rect;
use crate::services::DryRunDesktop;
use std::sync::Arc;

/// Applies an absolute outer rectangle to a window
#[async_trait::async_trait]
pub trait WindowMover {
    async fn move_window(&self, window: &ActiveWindow, target: Rect) -> Result<()>;
}

/// Factory function: the emulated desktop in dry-run mode, wmctrl otherwise
pub fn create_window_mover(
    config: Arc<Config>,
    desktop: Option<DryRunDesktop>,
) -> Result<Box<dyn WindowMover + Send + Sync>> {
    match desktop {
        Some(desktop) => Ok(Box::new(super::dry_run::DryRunMover::new(desktop))),
        None => Ok(Box::new(super::wmctrl::WmctrlMover::new(config.window.restore_maximized))),
    }
}
