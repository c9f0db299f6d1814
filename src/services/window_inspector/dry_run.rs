use crate::error::Result;
use crate::events::WindowSnapshot;
use crate::services::DryRunDesktop;

use super::r#trait::WindowInspector;

pub struct DryRunInspector {
    desktop: DryRunDesktop,
}

impl DryRunInspector {
    pub fn new(desktop: DryRunDesktop) -> Self {
        Self { desktop }
    }
}

#[async_trait::async_trait]
impl WindowInspector for DryRunInspector {
    async fn inspect(&self) -> Result<WindowSnapshot> {
        self.desktop.snapshot()
    }
}
