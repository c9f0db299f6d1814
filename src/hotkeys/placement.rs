use crate::config::{HotkeyRecord, SizeValue};
use crate::error::{PlacerError, Result};
use figment::value::Value;
use std::fmt;
use std::str::FromStr;

/// Вертикальная привязка окна
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum VerticalAnchor {
    Top,
    Center,
    Bottom,
    #[default]
    Unspecified,
}

/// Горизонтальная привязка окна
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum HorizontalAnchor {
    Left,
    Center,
    Right,
    #[default]
    Unspecified,
}

impl FromStr for VerticalAnchor {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "top" => Ok(Self::Top),
            "center" | "centre" => Ok(Self::Center),
            "bottom" => Ok(Self::Bottom),
            "none" | "unspecified" => Ok(Self::Unspecified),
            _ => Err(()),
        }
    }
}

impl FromStr for HorizontalAnchor {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "left" => Ok(Self::Left),
            "center" | "centre" => Ok(Self::Center),
            "right" => Ok(Self::Right),
            "none" | "unspecified" => Ok(Self::Unspecified),
            _ => Err(()),
        }
    }
}

/// Доля рабочей области монитора в процентах, всегда в диапазоне 0..=100
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Percent(u8);

impl Percent {
    pub fn new(value: i64) -> Option<Self> {
        (0..=100).contains(&value).then(|| Self(value as u8))
    }

    pub fn value(&self) -> i32 {
        i32::from(self.0)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Location {
    pub vertical: VerticalAnchor,
    pub horizontal: HorizontalAnchor,
}

/// Размер окна; None означает "оставить текущий"
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Size {
    pub vertical: Option<Percent>,
    pub horizontal: Option<Percent>,
}

/// Куда и какого размера поставить окно
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct PlacementSpec {
    pub location: Location,
    pub size: Size,
}

impl PlacementSpec {
    pub fn new(location: Location, size: Size) -> Self {
        Self { location, size }
    }

    /// Разобрать и проверить положение/размер из записи конфигурации
    pub fn from_record(record: &HotkeyRecord) -> Result<Self> {
        let location = Location {
            vertical: parse_anchor(&record.name, "vertical", record.location.vertical.as_deref())?,
            horizontal: parse_anchor(&record.name, "horizontal", record.location.horizontal.as_deref())?,
        };
        let size = Size {
            vertical: parse_size(&record.name, "vertical", record.size.vertical.as_ref())?,
            horizontal: parse_size(&record.name, "horizontal", record.size.horizontal.as_ref())?,
        };
        Ok(Self::new(location, size))
    }

    pub fn is_noop(&self) -> bool {
        *self == Self::default()
    }
}

fn parse_anchor<A: FromStr + Default>(hotkey: &str, axis: &'static str, raw: Option<&str>) -> Result<A> {
    match raw {
        None => Ok(A::default()),
        Some(value) => value.parse().map_err(|_| PlacerError::InvalidAnchor {
            hotkey: hotkey.to_string(),
            axis,
            value: value.to_string(),
        }),
    }
}

fn parse_size(hotkey: &str, axis: &'static str, raw: Option<&SizeValue>) -> Result<Option<Percent>> {
    let invalid = |value: String| PlacerError::InvalidSize {
        hotkey: hotkey.to_string(),
        axis,
        value,
    };

    match raw {
        None => Ok(None),
        Some(SizeValue::Number(n)) => Percent::new(*n).map(Some).ok_or_else(|| invalid(n.to_string())),
        Some(SizeValue::Fraction(f)) => Err(invalid(f.to_string())),
        Some(SizeValue::Text(text)) => {
            let trimmed = text.trim();
            if trimmed.eq_ignore_ascii_case("none") || trimmed.eq_ignore_ascii_case("unspecified") {
                return Ok(None);
            }
            trimmed
                .parse::<i64>()
                .ok()
                .and_then(Percent::new)
                .map(Some)
                .ok_or_else(|| invalid(text.clone()))
        }
        Some(SizeValue::Other(value)) => Err(invalid(describe_value(value))),
    }
}

fn describe_value(value: &Value) -> String {
    match value {
        Value::Bool(_, b) => b.to_string(),
        Value::Array(..) => "массив".to_string(),
        Value::Dict(..) => "таблица".to_string(),
        other => format!("{:?}", other),
    }
}

impl fmt::Display for PlacementSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let percent = |p: Option<Percent>| p.map_or_else(|| "-".to_string(), |p| format!("{}%", p.value()));
        write!(
            f,
            "{:?}/{:?} {}x{}",
            self.location.vertical,
            self.location.horizontal,
            percent(self.size.horizontal),
            percent(self.size.vertical)
        )
    }
}
