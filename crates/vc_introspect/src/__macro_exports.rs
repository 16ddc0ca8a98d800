//! Items used by the macros of this crate. Not public API.

#[cfg(feature = "auto_register")]
pub mod auto_register {
    pub use inventory;

    use crate::info::{DescriptorCell, Introspect, TypeDescriptor};

    /// One submitted type, stored by `inventory`.
    pub struct __AutoRegisterFunc(pub fn() -> &'static TypeDescriptor);

    inventory::collect!(__AutoRegisterFunc);

    /// Always submitted. Finding it in a registry after collection means
    /// `inventory` works on this platform.
    pub struct __AvailFlag;

    impl Introspect for __AvailFlag {
        fn type_descriptor() -> &'static TypeDescriptor {
            static CELL: DescriptorCell = DescriptorCell::new();
            CELL.get_or_init(|| TypeDescriptor::builder::<Self>().build())
        }
    }

    inventory::submit! {
        __AutoRegisterFunc(<__AvailFlag as Introspect>::type_descriptor)
    }

    pub(crate) fn __descriptors() -> impl Iterator<Item = &'static TypeDescriptor> {
        inventory::iter::<__AutoRegisterFunc>
            .into_iter()
            .map(|func| (func.0)())
    }
}

/// Submits a type for [`DescriptorRegistry::auto_register`].
///
/// The type must implement [`Introspect`]. Expands to nothing when the
/// `auto_register` feature is disabled.
///
/// ```
/// # use vc_introspect::info::{DescriptorCell, Introspect, TypeDescriptor};
/// struct Marker;
///
/// impl Introspect for Marker {
///     fn type_descriptor() -> &'static TypeDescriptor {
///         static CELL: DescriptorCell = DescriptorCell::new();
///         CELL.get_or_init(|| TypeDescriptor::builder::<Self>().build())
///     }
/// }
///
/// vc_introspect::auto_register!(Marker);
/// # fn main() {}
/// ```
///
/// [`DescriptorRegistry::auto_register`]: crate::registry::DescriptorRegistry::auto_register
/// [`Introspect`]: crate::info::Introspect
#[cfg(feature = "auto_register")]
#[macro_export]
macro_rules! auto_register {
    ($ty:ty) => {
        $crate::__macro_exports::auto_register::inventory::submit! {
            $crate::__macro_exports::auto_register::__AutoRegisterFunc(
                <$ty as $crate::info::Introspect>::type_descriptor
            )
        }
    };
}

/// Submits a type for [`DescriptorRegistry::auto_register`].
///
/// The `auto_register` feature is disabled, so this expands to nothing.
///
/// [`DescriptorRegistry::auto_register`]: crate::registry::DescriptorRegistry::auto_register
#[cfg(not(feature = "auto_register"))]
#[macro_export]
macro_rules! auto_register {
    ($ty:ty) => {};
}
