use crate::config::HotkeyRecord;
use crate::error::{PlacerError, Result};
use crate::events::PressedKeys;
use crate::mappings::KeyNames;
use std::fmt;
use tracing::debug;

use super::combination::KeyCombination;
use super::placement::PlacementSpec;

/// Одно сочетание клавиш из конфигурации
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HotkeyEntry {
    pub name: String,
    pub combination: KeyCombination,
    pub placement: PlacementSpec,
}

impl HotkeyEntry {
    pub fn new(name: impl Into<String>, combination: KeyCombination, placement: PlacementSpec) -> Self {
        Self {
            name: name.into(),
            combination,
            placement,
        }
    }

    /// Имя для сообщений; у безымянных сочетаний используется набор клавиш
    pub fn label(&self) -> String {
        if self.name.is_empty() {
            self.combination.to_string()
        } else {
            self.name.clone()
        }
    }
}

impl fmt::Display for HotkeyEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\" [{}] -> {}", self.name, self.combination, self.placement)
    }
}

/// Набор сочетаний клавиш, упорядоченный от менее конкретных к более конкретным.
///
/// Строится один раз при загрузке конфигурации и дальше только читается.
#[derive(Debug, Clone, Default)]
pub struct HotkeyRegistry {
    // Отсортировано по KeyCombination::cmp, без повторов
    entries: Vec<HotkeyEntry>,
    // Индексы для быстрого отказа в resolve
    referenced_keys: PressedKeys,
    min_combination_len: usize,
}

impl HotkeyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Построить реестр из записей конфигурации: всё или ничего
    pub fn from_records(records: &[HotkeyRecord]) -> Result<Self> {
        let mut registry = Self::new();

        for record in records {
            let combination = Self::parse_combination(record)?;
            let placement = PlacementSpec::from_record(record)?;
            registry.insert(HotkeyEntry::new(record.name.clone(), combination, placement))?;
        }

        Ok(registry)
    }

    fn parse_combination(record: &HotkeyRecord) -> Result<KeyCombination> {
        let mut codes = Vec::with_capacity(record.keys.len());
        for key in &record.keys {
            let code = KeyNames::lookup(key).ok_or_else(|| PlacerError::UnknownKey {
                hotkey: record.name.clone(),
                key: key.clone(),
                valid: KeyNames::valid_names().join(", "),
            })?;
            codes.push(code);
        }

        KeyCombination::new(codes).ok_or_else(|| PlacerError::EmptyCombination {
            hotkey: record.name.clone(),
        })
    }

    /// Добавить сочетание, сохраняя порядок; одинаковый набор клавиш запрещён
    pub fn insert(&mut self, entry: HotkeyEntry) -> Result<()> {
        match self
            .entries
            .binary_search_by(|existing| existing.combination.cmp(&entry.combination))
        {
            Ok(index) => Err(PlacerError::DuplicateHotkey {
                first: self.entries[index].label(),
                second: entry.label(),
                keys: entry.combination.to_string(),
            }),
            Err(position) => {
                debug!("Добавлено сочетание {} на позицию {}", entry, position);
                self.referenced_keys.extend(entry.combination.keys().iter().copied());
                self.min_combination_len = if self.entries.is_empty() {
                    entry.combination.len()
                } else {
                    self.min_combination_len.min(entry.combination.len())
                };
                self.entries.insert(position, entry);
                Ok(())
            }
        }
    }

    /// Найти самое конкретное сочетание, все клавиши которого зажаты.
    ///
    /// Просмотр идёт с конца (самые конкретные сочетания), поэтому побеждает сочетание
    /// с наибольшим числом клавиш. При равном числе клавиш побеждает то, у которого
    /// отсортированная последовательность кодов лексикографически больше.
    pub fn resolve(&self, pressed: &PressedKeys) -> Option<&HotkeyEntry> {
        // Быстрый отказ: зажато меньше клавиш, чем в самом коротком сочетании,
        // или ни одна зажатая клавиша не встречается в конфигурации
        if pressed.len() < self.min_combination_len || pressed.is_disjoint(&self.referenced_keys) {
            return None;
        }

        self.entries
            .iter()
            .rev()
            .find(|entry| entry.combination.is_subset_of(pressed))
    }

    /// Пары (узкое, широкое), где узкое сочетание строго входит в широкое:
    /// пока зажато широкое, узкое не срабатывает
    pub fn overlaps(&self) -> Vec<(&HotkeyEntry, &HotkeyEntry)> {
        let mut result = Vec::new();
        for (i, narrow) in self.entries.iter().enumerate() {
            for wide in &self.entries[i + 1..] {
                if narrow.combination.is_narrower_than(&wide.combination) {
                    result.push((narrow, wide));
                }
            }
        }
        result
    }

    /// Все клавиши, встречающиеся хотя бы в одном сочетании
    pub fn referenced_keys(&self) -> &PressedKeys {
        &self.referenced_keys
    }

    /// От менее конкретных сочетаний к более конкретным
    pub fn iter(&self) -> std::slice::Iter<'_, HotkeyEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
