pub mod keyboard;
pub mod window;

pub use keyboard::{KeyCode, KeySnapshot, PressedKeys};
pub use window::{ActiveWindow, WindowSnapshot};
