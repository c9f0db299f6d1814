use crate::hotkeys::{HorizontalAnchor, Percent, PlacementSpec, VerticalAnchor};

use super::rect::{MonitorInfo, Rect, WindowBounds};

/// Перевод символьного положения/размера в абсолютный прямоугольник окна.
///
/// Все вычисления целочисленные: проценты отбрасывают дробную часть,
/// деление пополам при центрировании тоже. Рамка окна выносится за край
/// рабочей области, чтобы к краю прилегала клиентская часть.
pub struct GeometryResolver;

impl GeometryResolver {
    pub fn compute_rect(placement: &PlacementSpec, window: &WindowBounds, monitor: &MonitorInfo) -> Rect {
        let width = Self::width(placement.size.horizontal, window, monitor);
        let height = Self::height(placement.size.vertical, window, monitor);
        let left = Self::left(placement.location.horizontal, window, monitor, width);
        let top = Self::top(placement.location.vertical, window, monitor, height);

        Rect::from_xywh(left, top, width, height)
    }

    fn width(size: Option<Percent>, window: &WindowBounds, monitor: &MonitorInfo) -> i32 {
        match size {
            None => window.rect.width(),
            Some(percent) => {
                percent_of(monitor.work_area.width(), percent) + window.borders.horizontal()
            }
        }
    }

    fn height(size: Option<Percent>, window: &WindowBounds, monitor: &MonitorInfo) -> i32 {
        match size {
            None => window.rect.height(),
            Some(percent) => percent_of(monitor.work_area.height(), percent) + window.borders.vertical(),
        }
    }

    fn left(anchor: HorizontalAnchor, window: &WindowBounds, monitor: &MonitorInfo, width: i32) -> i32 {
        let work = &monitor.work_area;
        let borders = &window.borders;

        match anchor {
            HorizontalAnchor::Left => work.left - borders.left,
            HorizontalAnchor::Right => work.right - width + borders.right,
            HorizontalAnchor::Center => {
                // Половина ширины от левого края монитора до правого края рабочей области
                let monitor_half = (work.right - monitor.bounds.left).abs() / 2;
                (monitor_half - width / 2 - borders.left).max(monitor.bounds.left)
            }
            HorizontalAnchor::Unspecified => window.rect.left,
        }
    }

    fn top(anchor: VerticalAnchor, window: &WindowBounds, monitor: &MonitorInfo, height: i32) -> i32 {
        let work = &monitor.work_area;
        let borders = &window.borders;

        match anchor {
            VerticalAnchor::Top => work.top - borders.top,
            VerticalAnchor::Bottom => work.bottom - height + borders.bottom,
            VerticalAnchor::Center => {
                let monitor_half = (work.bottom - monitor.bounds.top).abs() / 2;
                // max не даёт окну уехать выше монитора
                (monitor_half - height / 2 - borders.top).max(monitor.bounds.top)
            }
            VerticalAnchor::Unspecified => window.rect.top,
        }
    }
}

fn percent_of(extent: i32, percent: Percent) -> i32 {
    // extent >= 0, поэтому целочисленное деление совпадает с floor
    (i64::from(extent) * i64::from(percent.value()) / 100) as i32
}
