pub(crate) mod dry_run;
mod wmctrl;
mod r#trait;

pub use self::r#trait::{create_window_mover, WindowMover};
