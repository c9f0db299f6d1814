use std::fmt;

/// Прямоугольник в абсолютных пиксельных координатах экрана
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Rect {
    pub fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self { left, top, right, bottom }
    }

    pub fn from_xywh(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self::new(x, y, x + width, y + height)
    }

    pub fn width(&self) -> i32 {
        (self.right - self.left).abs()
    }

    pub fn height(&self) -> i32 {
        (self.bottom - self.top).abs()
    }

    pub fn center(&self) -> (i32, i32) {
        ((self.left + self.right) / 2, (self.top + self.bottom) / 2)
    }

    pub fn contains_point(&self, x: i32, y: i32) -> bool {
        x >= self.left && x < self.right && y >= self.top && y < self.bottom
    }

    /// Пересечение двух прямоугольников; None если они не перекрываются
    pub fn intersect(&self, other: &Rect) -> Option<Rect> {
        let left = self.left.max(other.left);
        let top = self.top.max(other.top);
        let right = self.right.min(other.right);
        let bottom = self.bottom.min(other.bottom);
        (left < right && top < bottom).then(|| Rect::new(left, top, right, bottom))
    }

    /// Квадрат расстояния от точки до прямоугольника (0 если точка внутри)
    pub fn distance_sq_to(&self, x: i32, y: i32) -> i64 {
        let dx = i64::from((self.left - x).max(0).max(x - self.right));
        let dy = i64::from((self.top - y).max(0).max(y - self.bottom));
        dx * dx + dy * dy
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}, {}x{}]", self.left, self.top, self.width(), self.height())
    }
}

/// Толщина рамки окна относительно его клиентской области
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct BorderInsets {
    pub top: i32,
    pub bottom: i32,
    pub left: i32,
    pub right: i32,
}

impl BorderInsets {
    pub fn new(top: i32, bottom: i32, left: i32, right: i32) -> Self {
        Self {
            top: top.max(0),
            bottom: bottom.max(0),
            left: left.max(0),
            right: right.max(0),
        }
    }

    pub fn horizontal(&self) -> i32 {
        self.left + self.right
    }

    pub fn vertical(&self) -> i32 {
        self.top + self.bottom
    }
}

/// Внешний прямоугольник окна и его рамка
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct WindowBounds {
    pub rect: Rect,
    pub borders: BorderInsets,
}

impl WindowBounds {
    pub fn new(rect: Rect, borders: BorderInsets) -> Self {
        Self { rect, borders }
    }

    /// Клиентская область: внешний прямоугольник за вычетом рамки
    pub fn client(&self) -> Rect {
        Rect::new(
            self.rect.left + self.borders.left,
            self.rect.top + self.borders.top,
            self.rect.right - self.borders.right,
            self.rect.bottom - self.borders.bottom,
        )
    }
}

/// Полные границы монитора и его рабочая область (без панелей)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct MonitorInfo {
    pub bounds: Rect,
    pub work_area: Rect,
}

impl MonitorInfo {
    pub fn new(bounds: Rect, work_area: Rect) -> Self {
        Self { bounds, work_area }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_dimensions() {
        let rect = Rect::from_xywh(100, 50, 800, 600);
        assert_eq!(rect.right, 900);
        assert_eq!(rect.bottom, 650);
        assert_eq!(rect.width(), 800);
        assert_eq!(rect.height(), 600);
        assert_eq!(rect.center(), (500, 350));
    }

    #[test]
    fn test_intersect() {
        let monitor = Rect::new(1920, 0, 3840, 1080);
        let workarea = Rect::new(0, 32, 3840, 1080);
        assert_eq!(monitor.intersect(&workarea), Some(Rect::new(1920, 32, 3840, 1080)));

        let far = Rect::new(5000, 0, 6000, 100);
        assert_eq!(monitor.intersect(&far), None);
    }

    #[test]
    fn test_distance_to_rect() {
        let rect = Rect::new(0, 0, 100, 100);
        assert_eq!(rect.distance_sq_to(50, 50), 0);
        assert_eq!(rect.distance_sq_to(103, 104), 9 + 16);
        assert_eq!(rect.distance_sq_to(-10, 50), 100);
    }

    #[test]
    fn test_negative_insets_clamped() {
        let insets = BorderInsets::new(-1, 7, 7, 7);
        assert_eq!(insets.top, 0);
        assert_eq!(insets.horizontal(), 14);
        assert_eq!(insets.vertical(), 7);
    }

    #[test]
    fn test_client_area() {
        let bounds = WindowBounds::new(Rect::from_xywh(0, 0, 974, 1087), BorderInsets::new(0, 7, 7, 7));
        assert_eq!(bounds.client(), Rect::new(7, 0, 967, 1080));
    }
}
