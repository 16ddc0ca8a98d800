use alloc::string::String;

// -----------------------------------------------------------------------------
// Accessor

/// A method shape recognised as a property accessor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Accessor {
    /// `getX()` or `isX()`, for property `x`.
    Read(String),
    /// `setX(value)`, for property `x`.
    Write(String),
}

impl Accessor {
    /// Returns the normalized property name.
    #[inline]
    pub fn property(&self) -> &str {
        match self {
            Self::Read(name) | Self::Write(name) => name,
        }
    }
}

/// Classifies a method by name and parameter count.
///
/// - `get` + zero parameters: read accessor.
/// - `is` + zero parameters: read accessor.
/// - `set` + one parameter: write accessor.
///
/// Names of three characters or fewer are skipped unless they start with
/// `is`, and a prefix with nothing after it is not an accessor.
///
/// # Examples
///
/// ```
/// use vc_introspect::analysis::{Accessor, classify_accessor};
///
/// assert_eq!(classify_accessor("getName", 0), Some(Accessor::Read("name".into())));
/// assert_eq!(classify_accessor("isActive", 0), Some(Accessor::Read("active".into())));
/// assert_eq!(classify_accessor("setName", 1), Some(Accessor::Write("name".into())));
/// assert_eq!(classify_accessor("getName", 1), None);
/// assert_eq!(classify_accessor("run", 0), None);
/// ```
pub fn classify_accessor(name: &str, param_count: usize) -> Option<Accessor> {
    if name.chars().count() <= 3 && !name.starts_with("is") {
        return None;
    }

    let accessor = match param_count {
        0 => {
            let suffix = name
                .strip_prefix("get")
                .or_else(|| name.strip_prefix("is"))?;
            Accessor::Read(normalize(non_empty(suffix)?))
        }
        1 => {
            let suffix = name.strip_prefix("set")?;
            Accessor::Write(normalize(non_empty(suffix)?))
        }
        _ => return None,
    };
    Some(accessor)
}

#[inline]
fn non_empty(suffix: &str) -> Option<&str> {
    (!suffix.is_empty()).then_some(suffix)
}

// -----------------------------------------------------------------------------
// normalize

/// Turns the part of an accessor name after its prefix into a property name.
///
/// - Fewer than two characters: lower-cased.
/// - First two characters upper-case: unchanged, so acronyms survive.
/// - Otherwise: only the first character is lower-cased.
///
/// # Examples
///
/// ```
/// use vc_introspect::analysis::normalize;
///
/// assert_eq!(normalize("Name"), "name");
/// assert_eq!(normalize("URLPath"), "URLPath");
/// assert_eq!(normalize("X"), "x");
/// ```
pub fn normalize(raw: &str) -> String {
    let mut chars = raw.chars();
    let (Some(first), Some(second)) = (chars.next(), chars.next()) else {
        return raw.to_lowercase();
    };

    if first.is_uppercase() && second.is_uppercase() {
        return String::from(raw);
    }

    let mut name = String::with_capacity(raw.len());
    name.extend(first.to_lowercase());
    name.push_str(&raw[first.len_utf8()..]);
    name
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::{Accessor, classify_accessor, normalize};

    #[test]
    fn normalize_rules() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("A"), "a");
        assert_eq!(normalize("Name"), "name");
        assert_eq!(normalize("URLPath"), "URLPath");
        assert_eq!(normalize("URL"), "URL");
        assert_eq!(normalize("Xcoord"), "xcoord");
        assert_eq!(normalize("xCoord"), "xCoord");
        assert_eq!(normalize("Ünit"), "ünit");
    }

    #[test]
    fn read_accessors() {
        assert_eq!(classify_accessor("getURLPath", 0), Some(Accessor::Read("URLPath".into())));
        assert_eq!(classify_accessor("getName", 0), Some(Accessor::Read("name".into())));
        assert_eq!(classify_accessor("isActive", 0), Some(Accessor::Read("active".into())));
        assert_eq!(classify_accessor("getX", 0), Some(Accessor::Read("x".into())));
        assert_eq!(classify_accessor("isX", 0), Some(Accessor::Read("x".into())));
    }

    #[test]
    fn write_accessors() {
        assert_eq!(classify_accessor("setName", 1), Some(Accessor::Write("name".into())));
        assert_eq!(classify_accessor("setX", 1), Some(Accessor::Write("x".into())));
        assert_eq!(classify_accessor("setName", 0), None);
        assert_eq!(classify_accessor("setName", 2), None);
    }

    #[test]
    fn short_and_bare_names() {
        assert_eq!(classify_accessor("get", 0), None);
        assert_eq!(classify_accessor("set", 1), None);
        assert_eq!(classify_accessor("gox", 0), None);
        assert_eq!(classify_accessor("is", 0), None);
        assert_eq!(classify_accessor("isA", 0), Some(Accessor::Read("a".into())));
    }

    #[test]
    fn other_shapes_ignored() {
        assert_eq!(classify_accessor("getName", 1), None);
        assert_eq!(classify_accessor("isActive", 1), None);
        assert_eq!(classify_accessor("toString", 0), None);
        assert_eq!(classify_accessor("reset", 1), None);
    }

    #[test]
    fn property_of_accessor() {
        assert_eq!(Accessor::Write("count".into()).property(), "count");
    }
}
