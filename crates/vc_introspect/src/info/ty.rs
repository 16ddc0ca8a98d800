use core::any::TypeId;
use core::fmt;
use core::hash::{Hash, Hasher};

// -----------------------------------------------------------------------------
// Type

/// The identity of a Rust type: its [`TypeId`] and its type path.
///
/// Equality and hashing only use the `TypeId`.
///
/// # Examples
///
/// ```
/// use vc_introspect::info::Type;
///
/// let ty = Type::of::<String>();
///
/// assert!(ty.is::<String>());
/// assert_eq!(ty.path(), "alloc::string::String");
/// assert_eq!(ty.name(), "String");
/// ```
#[derive(Copy, Clone)]
pub struct Type {
    type_id: TypeId,
    type_path: &'static str,
}

impl Type {
    /// Creates the [`Type`] of `T`.
    #[inline]
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            type_path: core::any::type_name::<T>(),
        }
    }

    /// Returns the [`TypeId`].
    #[inline(always)]
    pub const fn id(&self) -> TypeId {
        self.type_id
    }

    /// Check if the given type matches this one.
    #[inline(always)]
    pub fn is<T: ?Sized + 'static>(&self) -> bool {
        TypeId::of::<T>() == self.type_id
    }

    /// Returns the full type path, as given by [`core::any::type_name`].
    #[inline(always)]
    pub const fn path(&self) -> &'static str {
        self.type_path
    }

    /// Returns the path without its module prefix.
    ///
    /// Generic arguments are kept as they are: `a::Wrapper<b::Item>` gives
    /// `Wrapper<b::Item>`. Only path types are shortened; references,
    /// pointers, tuples, slices, arrays and trait objects keep their full
    /// path, so `&a::Item` never shares a name with `a::Item`.
    pub fn name(&self) -> &'static str {
        let path = self.type_path;
        if path.starts_with(['&', '*', '(', '[']) || path.starts_with("dyn ") {
            return path;
        }
        let head = path.find('<').unwrap_or(path.len());
        match path[..head].rfind("::") {
            Some(index) => &path[index + 2..],
            None => path,
        }
    }
}

impl PartialEq for Type {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id
    }
}

impl Eq for Type {}

impl Hash for Type {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.type_id.hash(state);
    }
}

impl fmt::Debug for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_path)
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_path)
    }
}

// -----------------------------------------------------------------------------
// Tests
