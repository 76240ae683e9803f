use std::any::Any;

use crate::{PropertyDescriptor, TypeMetadata, TypeRef};

/// A type that can describe its own properties.
///
/// Usually derived with `#[derive(Properties)]`, which exposes every named
/// field as a read/write property. Implement it by hand for getter-only or
/// computed properties.
pub trait Properties: Any {
    /// Property table of this type, in declaration order.
    fn properties() -> Vec<PropertyDescriptor>;

    fn metadata() -> TypeMetadata
    where
        Self: Sized,
    {
        TypeMetadata::from_properties(TypeRef::of::<Self>(), Self::properties())
    }
}
