use std::{any::Any, sync::Arc};

use crate::{Result, TypeRef};

use super::{PropertyAccessor, TypeSummary};

/// Resolves the properties of a type into [`PropertyAccessor`]s.
///
/// This is the seam a diff engine depends on: it asks for the accessors of a
/// value's type and later reads (and possibly writes) them on live instances.
/// Implementations keep no per-call state and can be shared between threads.
///
/// # Example
///
/// ```ignore
/// let introspector: Arc<dyn Introspector> = Arc::new(StandardIntrospector::new());
///
/// for accessor in introspector.introspect(Some(&TypeRef::of::<Point>()))? {
///     println!("{} (writable: {})", accessor.name(), accessor.is_writable());
/// }
/// ```
pub trait Introspector: Send + Sync {
    /// Resolve the accessors of `ty`, in a stable order.
    ///
    /// `None` stands for the type of a missing value.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidArgument`](crate::Error::InvalidArgument) if `ty` is `None`.
    /// - [`Error::Introspection`](crate::Error::Introspection) if the type's
    ///   metadata couldn't be obtained. The failure is final for that type.
    fn introspect(&self, ty: Option<&TypeRef>) -> Result<Vec<PropertyAccessor>>;
}

impl<I: Introspector + ?Sized> Introspector for &I {
    fn introspect(&self, ty: Option<&TypeRef>) -> Result<Vec<PropertyAccessor>> {
        (**self).introspect(ty)
    }
}

impl<I: Introspector + ?Sized> Introspector for Box<I> {
    fn introspect(&self, ty: Option<&TypeRef>) -> Result<Vec<PropertyAccessor>> {
        (**self).introspect(ty)
    }
}

impl<I: Introspector + ?Sized> Introspector for Arc<I> {
    fn introspect(&self, ty: Option<&TypeRef>) -> Result<Vec<PropertyAccessor>> {
        (**self).introspect(ty)
    }
}

/// Typed conveniences over [`Introspector`].
pub trait IntrospectorExt: Introspector {
    fn introspect_type<T: Any>(&self) -> Result<Vec<PropertyAccessor>> {
        self.introspect(Some(&TypeRef::of::<T>()))
    }

    fn summarize<T: Any>(&self) -> Result<TypeSummary> {
        let ty = TypeRef::of::<T>();
        let accessors = self.introspect(Some(&ty))?;
        Ok(TypeSummary::from_accessors(&ty, &accessors))
    }
}

impl<I: Introspector + ?Sized> IntrospectorExt for I {}
