use bitflags::bitflags;

bitflags! {
    /// Modifiers of a declared member.
    ///
    /// Only `STATIC` affects discovery: static fields and methods belong to
    /// the type rather than to its values and never form properties.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u8 {
        /// Visible outside the declaring type.
        const PUBLIC = 1 << 0;
        /// Belongs to the type, not to its values.
        const STATIC = 1 << 1;
    }
}
