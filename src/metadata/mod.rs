//! Structural metadata: the property tables introspection is built on.
//!
//! Rust has no runtime reflection, so every type that should be introspected
//! describes itself through a [`MetadataProvider`]. The default provider is
//! the [`TypeRegistry`], filled from `#[derive(Properties)]` or from
//! hand-built [`TypeMetadata`]. Other sources (generated tables, schemas
//! imported from other object models, versioned adapters) plug in by
//! implementing the trait.

mod cached;
mod descriptor;
mod registry;

use std::sync::Arc;

pub use cached::CachedProvider;
pub use descriptor::{
    CLASS_PROPERTY, PropertyDescriptor, ReadResult, Reader, TypeMetadata, WriteResult, Writer,
};
pub use registry::TypeRegistry;

use crate::{BoxError, TypeRef};

/// Describes the candidate properties of a type.
///
/// Returned descriptors are taken as-is: filtering of synthetic or
/// write-only entries happens in the introspector. A provider error is
/// treated as a structural failure for that type and is not retried.
pub trait MetadataProvider: Send + Sync {
    fn describe(&self, ty: &TypeRef) -> Result<TypeMetadata, BoxError>;
}

impl<P: MetadataProvider + ?Sized> MetadataProvider for &P {
    fn describe(&self, ty: &TypeRef) -> Result<TypeMetadata, BoxError> {
        (**self).describe(ty)
    }
}

impl<P: MetadataProvider + ?Sized> MetadataProvider for Box<P> {
    fn describe(&self, ty: &TypeRef) -> Result<TypeMetadata, BoxError> {
        (**self).describe(ty)
    }
}

impl<P: MetadataProvider + ?Sized> MetadataProvider for Arc<P> {
    fn describe(&self, ty: &TypeRef) -> Result<TypeMetadata, BoxError> {
        (**self).describe(ty)
    }
}

/// Adapts a closure into a [`MetadataProvider`].
///
/// ```rust
/// use prospect::{FnProvider, MetadataProvider, TypeMetadata, TypeRef};
///
/// let provider = FnProvider::new(|ty: &TypeRef| Ok(TypeMetadata::new(*ty)));
/// assert!(provider.describe(&TypeRef::of::<u8>())?.is_empty());
/// # Ok::<(), prospect::BoxError>(())
/// ```
pub struct FnProvider<F>(F);

impl<F> FnProvider<F>
where
    F: Fn(&TypeRef) -> Result<TypeMetadata, BoxError> + Send + Sync,
{
    pub fn new(f: F) -> Self {
        Self(f)
    }
}

impl<F> MetadataProvider for FnProvider<F>
where
    F: Fn(&TypeRef) -> Result<TypeMetadata, BoxError> + Send + Sync,
{
    fn describe(&self, ty: &TypeRef) -> Result<TypeMetadata, BoxError> {
        (self.0)(ty)
    }
}
