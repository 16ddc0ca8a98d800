use alloc::string::String;

use thiserror::Error;

// -----------------------------------------------------------------------------
// AccessError

/// Failure to read or write a value through a property's handles.
///
/// Discovery itself never fails; these errors only come from reading or
/// writing values, see [`TypeAnalyzer::read`] and [`TypeAnalyzer::write`].
///
/// [`TypeAnalyzer::read`]: crate::analysis::TypeAnalyzer::read
/// [`TypeAnalyzer::write`]: crate::analysis::TypeAnalyzer::write
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum AccessError {
    /// Neither an invocable read accessor nor an accessible field.
    #[error("property `{0}` has no read accessor or accessible field")]
    NotReadable(String),

    /// Neither an invocable write accessor nor an accessible field.
    #[error("property `{0}` has no write accessor or accessible field")]
    NotWritable(String),

    /// The target is not a value of the member's declaring type.
    #[error("`{member}` expects a target of type `{expected}`")]
    TargetMismatch {
        /// Name of the field, method or type.
        member: &'static str,
        /// Path of the expected target type.
        expected: &'static str,
    },

    /// No write accessor or field takes a value of the given type.
    #[error("no write path of `{member}` accepts a value of the given type")]
    ValueMismatch {
        /// Name of the property or method.
        member: String,
    },

    /// The member has no handle to invoke.
    #[error("`{0}` is declared without an invocable handle")]
    NotInvocable(&'static str),

    /// Neither the type nor an ancestor has the property.
    #[error("no property named `{0}`")]
    UnknownProperty(String),

    /// An inherited property was requested through a parent link without an upcast.
    #[error("`{0}` declares a parent without an upcast, inherited properties are not reachable")]
    MissingUpcast(&'static str),
}

// -----------------------------------------------------------------------------
// Mismatch

/// Which side of a type-erased call had the wrong concrete type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Mismatch {
    Target,
    Value,
}
