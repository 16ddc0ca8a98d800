use core::cmp::Ordering;

use vc_utils::hash::{FixedHashState, HashMap};

use crate::analysis::PropertyDescriptor;

// -----------------------------------------------------------------------------
// PropertyOrder

/// Order in which merged properties are returned.
///
/// - [`Natural`](Self::Natural): lexicographic by name.
/// - [`Declared`](Self::Declared): by position in a declared name list.
///   Names missing from the list come first, lexicographically among
///   themselves, followed by the declared names in list order.
///
/// # Examples
///
/// ```
/// use core::cmp::Ordering;
/// use vc_introspect::analysis::PropertyOrder;
///
/// let order = PropertyOrder::declared(&["b", "a", "c"]);
///
/// assert_eq!(order.compare("b", "a"), Ordering::Less);
/// assert_eq!(order.compare("a", "c"), Ordering::Less);
/// assert_eq!(order.compare("d", "b"), Ordering::Less);
/// assert_eq!(order.compare("d", "e"), Ordering::Less);
/// ```
#[derive(Debug, Clone)]
pub enum PropertyOrder<'a> {
    /// Lexicographic by name.
    Natural,
    /// Name to first position in the declared list.
    Declared(HashMap<&'a str, usize>),
}

impl<'a> PropertyOrder<'a> {
    /// Lexicographic order.
    #[inline]
    pub const fn natural() -> Self {
        Self::Natural
    }

    /// Order by position in `names`.
    ///
    /// A repeated name keeps its first position. An empty list falls back
    /// to [`Natural`](Self::Natural).
    pub fn declared(names: &[&'a str]) -> Self {
        if names.is_empty() {
            return Self::Natural;
        }

        let mut positions = HashMap::with_capacity_and_hasher(names.len(), FixedHashState);
        for (index, name) in names.iter().enumerate() {
            positions.entry(*name).or_insert(index);
        }
        Self::Declared(positions)
    }

    /// Builds the order for an optional declaration.
    #[inline]
    pub fn from_declaration(names: Option<&[&'a str]>) -> Self {
        match names {
            Some(names) => Self::declared(names),
            None => Self::Natural,
        }
    }

    /// Returns the declared position of `name`.
    ///
    /// Always `None` for [`Natural`](Self::Natural).
    pub fn position(&self, name: &str) -> Option<usize> {
        match self {
            Self::Natural => None,
            Self::Declared(positions) => positions.get(name).copied(),
        }
    }

    /// Compares two property names.
    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        match (self.position(a), self.position(b)) {
            (Some(a), Some(b)) => a.cmp(&b),
            (None, Some(_)) => Ordering::Less,
            (Some(_), None) => Ordering::Greater,
            (None, None) => a.cmp(b),
        }
    }

    /// Sorts `properties` in place. The sort is stable.
    pub fn sort(&self, properties: &mut [&PropertyDescriptor]) {
        match self {
            Self::Natural => properties.sort_by(|a, b| a.name().cmp(b.name())),
            Self::Declared(_) => properties.sort_by(|a, b| self.compare(a.name(), b.name())),
        }
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;
    use core::cmp::Ordering;

    use super::PropertyOrder;

    fn sorted<'a>(order: &PropertyOrder<'_>, names: &[&'a str]) -> Vec<&'a str> {
        let mut names = names.to_vec();
        names.sort_by(|a, b| order.compare(a, b));
        names
    }

    #[test]
    fn natural_is_lexicographic() {
        let order = PropertyOrder::natural();
        assert_eq!(sorted(&order, &["b", "URL", "a"]), ["URL", "a", "b"]);
    }

    #[test]
    fn declared_keeps_relative_order() {
        let order = PropertyOrder::declared(&["b", "a", "c"]);
        assert_eq!(sorted(&order, &["a", "b", "c", "d"]), ["d", "b", "a", "c"]);
    }

    #[test]
    fn absent_names_are_deterministic() {
        let order = PropertyOrder::declared(&["id"]);
        assert_eq!(sorted(&order, &["zeta", "id", "alpha", "mid"]), ["alpha", "mid", "zeta", "id"]);
        assert_eq!(sorted(&order, &["mid", "alpha", "id", "zeta"]), ["alpha", "mid", "zeta", "id"]);
    }

    #[test]
    fn repeated_name_keeps_first_position() {
        let order = PropertyOrder::declared(&["a", "b", "a"]);
        assert_eq!(order.position("a"), Some(0));
        assert_eq!(order.compare("a", "b"), Ordering::Less);
    }

    #[test]
    fn empty_declaration_is_natural() {
        assert!(matches!(PropertyOrder::declared(&[]), PropertyOrder::Natural));
        assert!(matches!(PropertyOrder::from_declaration(None), PropertyOrder::Natural));
        assert_eq!(PropertyOrder::natural().position("a"), None);
    }
}
