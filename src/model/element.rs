use std::hash::{Hash, Hasher};

use crate::error::{Error, Result};

/// One puzzle item belonging to exactly one category. Relationship links are
/// kind-indexed; the own-kind slot always points back at the element itself.
#[derive(Clone)]
pub struct Element {
    pub id: String,
    pub kind: usize,
    pub index: usize,
    links: Vec<Option<usize>>,
}

impl Element {
    pub fn new(id: String, kind: usize, index: usize, n_kinds: usize) -> Self {
        let mut links = vec![None; n_kinds];
        links[kind] = Some(index);
        Self {
            id,
            kind,
            index,
            links,
        }
    }

    /// Clears all relationships back to the singleton `{own kind: self}`.
    pub fn reset(&mut self) {
        for slot in self.links.iter_mut() {
            *slot = None;
        }
        self.links[self.kind] = Some(self.index);
    }

    pub fn get(&self, kind: usize) -> Option<usize> {
        self.links[kind]
    }

    pub fn set(&mut self, kind: usize, element: usize) {
        self.links[kind] = Some(element);
    }

    /// All established (kind, element) links, own kind included.
    pub fn linked(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.links
            .iter()
            .enumerate()
            .filter_map(|(kind, slot)| slot.map(|e| (kind, e)))
    }

    /// Replaces this element's links with a merged relationship view.
    pub(crate) fn adopt(&mut self, merged: &[Option<usize>]) {
        self.links.clear();
        self.links.extend_from_slice(merged);
    }

    /// The digit characters of the id parsed as an integer, e.g.
    /// "14.99" -> 1499.
    pub fn numeric_value(&self) -> Result<i64> {
        let digits: String = self.id.chars().filter(char::is_ascii_digit).collect();
        digits
            .parse()
            .map_err(|_| Error::NonNumericId(self.id.clone()))
    }

    /// The case-folded id, for alphabetic ordering.
    pub fn alpha_value(&self) -> String {
        self.id.to_lowercase()
    }
}

// Identity is by id value: two elements with equal ids are the same element.
impl PartialEq for Element {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Element {}

impl Hash for Element {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl std::fmt::Display for Element {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id)
    }
}

impl std::fmt::Debug for Element {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_value_extracts_digits() {
        let e = Element::new("14.99".to_string(), 0, 0, 2);
        assert_eq!(e.numeric_value().unwrap(), 1499);

        let e = Element::new("Table 3".to_string(), 0, 0, 2);
        assert_eq!(e.numeric_value().unwrap(), 3);
    }

    #[test]
    fn test_numeric_value_without_digits_fails() {
        let e = Element::new("Yvette".to_string(), 0, 0, 2);
        assert!(matches!(e.numeric_value(), Err(Error::NonNumericId(_))));
    }

    #[test]
    fn test_alpha_value_case_folds() {
        let e = Element::new("LyOn's".to_string(), 0, 0, 2);
        assert_eq!(e.alpha_value(), "lyon's");
    }

    #[test]
    fn test_identity_is_by_id() {
        let a = Element::new("Ham".to_string(), 0, 0, 2);
        let b = Element::new("Ham".to_string(), 1, 5, 2);
        assert_eq!(a, b);
    }

    #[test]
    fn test_reset_keeps_self_link() {
        let mut e = Element::new("Ham".to_string(), 1, 3, 3);
        e.set(0, 7);
        e.set(2, 9);
        e.reset();
        assert_eq!(e.get(0), None);
        assert_eq!(e.get(1), Some(3));
        assert_eq!(e.get(2), None);
    }
}
