use crate::{
    BoxError, CLASS_PROPERTY, Error, MetadataProvider, PropertyDescriptor, Result, TypeMetadata,
    TypeRef, TypeRegistry,
};

use super::{Introspector, PropertyAccessor};

/// Name of the pseudo-property injected by dynamic-language object models
/// (e.g. Groovy's `getMetaClass`), found in metadata imported from them.
pub const META_CLASS_PROPERTY: &str = "metaClass";

/// Property names that are never resolved into accessors.
///
/// A fixed list of synthetic entries metadata sources inject into every
/// type. Broader, user-defined filtering belongs to the layer configuring
/// the diff engine, not here.
pub const RESERVED_PROPERTY_NAMES: [&str; 2] = [CLASS_PROPERTY, META_CLASS_PROPERTY];

/// The default [`Introspector`].
///
/// Queries a [`MetadataProvider`] for the candidate properties of a type,
/// drops the synthetic and write-only ones and wraps the rest, in provider
/// order, as [`PropertyAccessor`]s.
///
/// The provider is the only part that varies: pass a different one with
/// [`with_provider`](Self::with_provider) (a cached, generated or
/// cross-version source) and the filtering stays the same.
///
/// # Example
///
/// ```rust
/// use prospect::{Introspector, PropertyDescriptor, StandardIntrospector, TypeMetadata, TypeRef};
///
/// struct Point { x: i32, y: i32 }
///
/// let introspector = StandardIntrospector::new();
/// introspector.registry().register_metadata(
///     TypeMetadata::of::<Point>()
///         .with_property(
///             PropertyDescriptor::new("x")
///                 .reader(|p: &Point| p.x)
///                 .writer(|p: &mut Point, v: i32| p.x = v),
///         )
///         .with_property(PropertyDescriptor::new("y").reader(|p: &Point| p.y)),
/// )?;
///
/// let accessors = introspector.introspect(Some(&TypeRef::of::<Point>()))?;
/// let names: Vec<_> = accessors.iter().map(|a| a.name()).collect();
/// assert_eq!(names, ["x", "y"]);
/// # Ok::<(), prospect::Error>(())
/// ```
#[derive(Debug)]
pub struct StandardIntrospector<P: MetadataProvider = TypeRegistry> {
    provider: P,
}

impl StandardIntrospector<TypeRegistry> {
    /// An introspector backed by an empty, default-configured [`TypeRegistry`].
    pub fn new() -> Self {
        Self::with_registry(TypeRegistry::default())
    }

    pub fn with_registry(registry: TypeRegistry) -> Self {
        Self::with_provider(registry)
    }

    /// The registry backing this introspector; register types through it.
    pub fn registry(&self) -> &TypeRegistry {
        &self.provider
    }
}

impl Default for StandardIntrospector<TypeRegistry> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: MetadataProvider> StandardIntrospector<P> {
    pub fn with_provider(provider: P) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Query the provider. The only step that raises [`Error::Introspection`].
    ///
    /// Tables with duplicate names are rejected whatever their source, with
    /// [`Error::DuplicateProperty`] as the cause.
    fn metadata(&self, ty: &TypeRef) -> Result<TypeMetadata> {
        let wrap = |source: BoxError| {
            tracing::debug!(type_name = ty.name(), error = %source, "Metadata query failed");
            Error::Introspection {
                type_name: ty.name(),
                source,
            }
        };
        let metadata = self.provider.describe(ty).map_err(wrap)?;
        metadata.validate().map_err(|err| wrap(Box::new(err)))?;
        Ok(metadata)
    }

    /// Reason for skipping a candidate, if it must be skipped.
    fn skip_reason(property: &PropertyDescriptor) -> Option<&'static str> {
        if RESERVED_PROPERTY_NAMES.contains(&property.name()) {
            return Some("reserved name");
        }
        if !property.is_readable() {
            return Some("no reader");
        }
        None
    }
}

impl<P: MetadataProvider> Introspector for StandardIntrospector<P> {
    fn introspect(&self, ty: Option<&TypeRef>) -> Result<Vec<PropertyAccessor>> {
        let ty = ty.ok_or(Error::InvalidArgument("type"))?;
        let metadata = self.metadata(ty)?;
        let candidates = metadata.len();

        let mut accessors = Vec::with_capacity(candidates);
        for property in metadata.into_properties() {
            if let Some(reason) = Self::skip_reason(&property) {
                tracing::trace!(
                    type_name = ty.name(),
                    property = property.name(),
                    reason,
                    "Skipping property"
                );
                continue;
            }
            let (name, reader, writer) = property.into_parts();
            if let Some(reader) = reader {
                accessors.push(PropertyAccessor::new(*ty, name, reader, writer));
            }
        }

        tracing::debug!(
            type_name = ty.name(),
            candidates,
            accessors = accessors.len(),
            "Introspected type"
        );
        Ok(accessors)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::{BoxError, FnProvider, IntrospectorExt, ProviderError, Reader};

    struct Sensor {
        reading: f64,
    }

    fn sensor_metadata(ty: &TypeRef) -> TypeMetadata {
        TypeMetadata::new(*ty)
            .with_property(PropertyDescriptor::new(META_CLASS_PROPERTY).with_reader(
                Reader::from_fn(|_| Ok(Box::new("meta"))),
            ))
            .with_property(
                PropertyDescriptor::new("reading")
                    .reader(|s: &Sensor| s.reading)
                    .writer(|s: &mut Sensor, v: f64| s.reading = v),
            )
            .with_property(
                PropertyDescriptor::new("calibration").writer(|_: &mut Sensor, _: f64| {}),
            )
            .with_class_property()
    }

    #[test]
    fn test_none_type_is_invalid_argument_without_query() {
        let calls = AtomicUsize::new(0);
        let introspector = StandardIntrospector::with_provider(FnProvider::new(|ty: &TypeRef| {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok(TypeMetadata::new(*ty))
        }));
        let err = introspector.introspect(None).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument("type")));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_skip_policy() {
        let introspector = StandardIntrospector::with_provider(FnProvider::new(
            |ty: &TypeRef| -> std::result::Result<TypeMetadata, BoxError> { Ok(sensor_metadata(ty)) },
        ));
        let accessors = introspector.introspect_type::<Sensor>().unwrap();
        let names: Vec<_> = accessors.iter().map(|a| a.name()).collect();
        assert_eq!(names, vec!["reading"]);
        assert!(accessors[0].is_writable());
        assert_eq!(accessors[0].declaring_type(), TypeRef::of::<Sensor>());
    }

    #[test]
    fn test_provider_error_is_wrapped() {
        let introspector = StandardIntrospector::with_provider(FnProvider::new(|ty: &TypeRef| {
            Err(Box::new(ProviderError::UnknownType(ty.name())) as BoxError)
        }));
        let err = introspector.introspect_type::<Sensor>().unwrap_err();
        let cause = err
            .introspection_cause()
            .and_then(|cause| cause.downcast_ref::<ProviderError>());
        assert_eq!(
            cause,
            Some(&ProviderError::UnknownType(std::any::type_name::<Sensor>()))
        );
    }

    #[test]
    fn test_duplicate_names_from_any_provider_are_rejected() {
        let introspector = StandardIntrospector::with_provider(FnProvider::new(|ty: &TypeRef| {
            Ok(sensor_metadata(ty)
                .with_property(PropertyDescriptor::new("reading").reader(|s: &Sensor| s.reading)))
        }));
        let err = introspector.introspect_type::<Sensor>().unwrap_err();
        assert!(matches!(err, Error::Introspection { .. }));
        let cause = err
            .introspection_cause()
            .and_then(|cause| cause.downcast_ref::<Error>());
        assert!(matches!(
            cause,
            Some(Error::DuplicateProperty { property, .. }) if property == "reading"
        ));
    }
}
