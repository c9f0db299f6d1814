pub mod rect;
pub mod resolver;

pub use rect::{BorderInsets, MonitorInfo, Rect, WindowBounds};
pub use resolver::GeometryResolver;
