//! WindowInspector service
//!
//! Reads the foreground window, its frame insets and the monitor it sits on.
//! It never moves anything and knows nothing about hotkeys.

pub(crate) mod dry_run;
mod x11;
mod r#trait;

pub use self::r#trait::{create_window_inspector, WindowInspector};
