use crate::error::Result;
use crate::events::WindowSnapshot;
use crate::services::DryRunDesktop;

/// Read-only access to the foreground window and its monitor
#[async_trait::async_trait]
pub trait WindowInspector {
    /// Foreground window geometry and the monitor it belongs to.
    /// Fails with `EnvironmentUnavailable` when there is no usable window.
    async fn inspect(&self) -> Result<WindowSnapshot>;
}

/// Factory function: the emulated desktop in dry-run mode, X11 otherwise
pub fn create_window_inspector(desktop: Option<DryRunDesktop>) -> Result<Box<dyn WindowInspector + Send + Sync>> {
    match desktop {
        Some(desktop) => Ok(Box::new(super::dry_run::DryRunInspector::new(desktop))),
        None => Ok(Box::new(super::x11::X11Inspector::new())),
    }
}
