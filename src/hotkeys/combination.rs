use crate::events::{KeyCode, PressedKeys};
use smallvec::SmallVec;
use std::cmp::Ordering;
use std::fmt;

/// Неупорядоченный набор клавиш одного сочетания.
///
/// Клавиши хранятся отсортированными и без повторов, поэтому два сочетания равны
/// тогда и только тогда, когда равны их наборы. Пустое сочетание построить нельзя.
///
/// Порядок: сначала по числу клавиш, затем лексикографически по отсортированным кодам.
/// Любое строгое подмножество оказывается раньше своего надмножества, то есть
/// менее конкретные сочетания идут первыми.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyCombination {
    keys: SmallVec<[KeyCode; 4]>,
}

impl KeyCombination {
    /// None для пустого набора
    pub fn new<I: IntoIterator<Item = KeyCode>>(keys: I) -> Option<Self> {
        let mut keys: SmallVec<[KeyCode; 4]> = keys.into_iter().collect();
        keys.sort_unstable();
        keys.dedup();

        if keys.is_empty() {
            None
        } else {
            Some(Self { keys })
        }
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn keys(&self) -> &[KeyCode] {
        &self.keys
    }

    /// Все клавиши сочетания зажаты
    pub fn is_subset_of(&self, pressed: &PressedKeys) -> bool {
        self.keys.iter().all(|key| pressed.contains(key))
    }

    /// Строгое подмножество другого сочетания
    pub fn is_narrower_than(&self, other: &KeyCombination) -> bool {
        self.len() < other.len() && self.keys.iter().all(|key| other.keys.binary_search(key).is_ok())
    }
}

impl Ord for KeyCombination {
    fn cmp(&self, other: &Self) -> Ordering {
        self.len()
            .cmp(&other.len())
            .then_with(|| self.keys.cmp(&other.keys))
    }
}

impl PartialOrd for KeyCombination {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for KeyCombination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<String> = self.keys.iter().map(|k| k.to_string()).collect();
        write!(f, "{}", names.join("+"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CTRL: KeyCode = KeyCode(29);
    const ALT: KeyCode = KeyCode(56);
    const A: KeyCode = KeyCode(30);
    const X: KeyCode = KeyCode(45);

    fn combo(keys: &[KeyCode]) -> KeyCombination {
        KeyCombination::new(keys.iter().copied()).unwrap()
    }

    fn pressed(keys: &[KeyCode]) -> PressedKeys {
        keys.iter().copied().collect()
    }

    #[test]
    fn test_empty_combination_rejected() {
        assert!(KeyCombination::new(Vec::new()).is_none());
    }

    #[test]
    fn test_insertion_order_irrelevant() {
        assert_eq!(combo(&[A, CTRL]), combo(&[CTRL, A]));
        assert_eq!(combo(&[A, A, CTRL]).len(), 2);
    }

    #[test]
    fn test_subset_sorts_before_superset() {
        let narrow = combo(&[CTRL]);
        let wide = combo(&[CTRL, ALT]);
        assert!(narrow < wide);
        assert!(narrow.is_narrower_than(&wide));
        assert!(!wide.is_narrower_than(&narrow));
    }

    #[test]
    fn test_equal_cardinality_ordered_lexicographically() {
        // x (45) и alt (56): {a, x} < {a, alt}
        let ax = combo(&[A, X]);
        let aalt = combo(&[A, ALT]);
        assert!(ax < aalt);
        assert!(!ax.is_narrower_than(&aalt));
    }

    #[test]
    fn test_ordering_is_total_and_consistent_with_eq() {
        let items = [combo(&[A]), combo(&[CTRL]), combo(&[A, CTRL]), combo(&[CTRL, ALT, X])];
        for a in &items {
            for b in &items {
                assert_eq!(a.cmp(b) == Ordering::Equal, a == b);
                assert_eq!(a.cmp(b), b.cmp(a).reverse());
            }
        }
    }

    #[test]
    fn test_subset_of_pressed() {
        let c = combo(&[CTRL, ALT]);
        assert!(c.is_subset_of(&pressed(&[CTRL, ALT, X])));
        assert!(c.is_subset_of(&pressed(&[CTRL, ALT])));
        assert!(!c.is_subset_of(&pressed(&[CTRL])));
        assert!(!c.is_subset_of(&pressed(&[])));
    }

    #[test]
    fn test_display_uses_key_names() {
        assert_eq!(combo(&[A, CTRL]).to_string(), "ctrl+a");
    }
}
