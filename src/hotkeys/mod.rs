//! Hotkey resolution: key combinations, placement specs and the registry that
//! picks the most specific combination contained in the pressed-key snapshot.

pub mod combination;
pub mod placement;
pub mod registry;

pub use placement::{HorizontalAnchor, Percent, PlacementSpec, VerticalAnchor};
pub use registry::HotkeyRegistry;
