use std::{
    any::{Any, type_name},
    borrow::Cow,
    collections::HashSet,
    sync::Arc,
};

use crate::{AccessError, BoxError, Error, Result, TypeRef};

/// Name of the synthetic property every type metadata table may start with.
/// It exposes the type name and is never turned into an accessor.
pub const CLASS_PROPERTY: &str = "class";

/// Outcome of an erased [`Reader`] call: the boxed property value.
pub type ReadResult = std::result::Result<Box<dyn Any + Send>, AccessError>;
/// Outcome of an erased [`Writer`] call.
pub type WriteResult = std::result::Result<(), AccessError>;
type ReadFn = dyn Fn(&dyn Any) -> ReadResult + Send + Sync;
type WriteFn = dyn Fn(&mut dyn Any, Box<dyn Any + Send>) -> WriteResult + Send + Sync;

/// Type-erased property getter.
///
/// Built from a typed closure with [`Reader::new`] (or [`Reader::try_new`] for
/// getters that can fail). The erased form checks the concrete type of the
/// instance before calling the closure.
#[derive(Clone)]
pub struct Reader(Arc<ReadFn>);

impl Reader {
    pub fn new<T, V, F>(getter: F) -> Self
    where
        T: Any,
        V: Any + Send,
        F: Fn(&T) -> V + Send + Sync + 'static,
    {
        Self(Arc::new(move |instance: &dyn Any| -> ReadResult {
            let target = downcast_instance::<T>(instance)?;
            Ok(Box::new(getter(target)))
        }))
    }

    /// A reader whose getter may fail. The getter's error is kept as the
    /// source of the resulting [`AccessError::Failed`].
    pub fn try_new<T, V, E, F>(getter: F) -> Self
    where
        T: Any,
        V: Any + Send,
        E: Into<BoxError>,
        F: Fn(&T) -> std::result::Result<V, E> + Send + Sync + 'static,
    {
        Self(Arc::new(move |instance: &dyn Any| -> ReadResult {
            let target = downcast_instance::<T>(instance)?;
            let value = getter(target).map_err(|e| AccessError::Failed(e.into()))?;
            Ok(Box::new(value))
        }))
    }

    /// Wraps an already type-erased getter, e.g. one produced by a code generator.
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(&dyn Any) -> ReadResult + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    pub(crate) fn call(&self, instance: &dyn Any) -> ReadResult {
        (self.0)(instance)
    }
}

impl std::fmt::Debug for Reader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Reader")
    }
}

/// Type-erased property setter. See [`Reader`].
#[derive(Clone)]
pub struct Writer(Arc<WriteFn>);

impl Writer {
    pub fn new<T, V, F>(setter: F) -> Self
    where
        T: Any,
        V: Any,
        F: Fn(&mut T, V) + Send + Sync + 'static,
    {
        Self(Arc::new(move |instance: &mut dyn Any, value: Box<dyn Any + Send>| -> WriteResult {
            let target = downcast_instance_mut::<T>(instance)?;
            setter(target, downcast_value::<V>(value)?);
            Ok(())
        }))
    }

    pub fn try_new<T, V, E, F>(setter: F) -> Self
    where
        T: Any,
        V: Any,
        E: Into<BoxError>,
        F: Fn(&mut T, V) -> std::result::Result<(), E> + Send + Sync + 'static,
    {
        Self(Arc::new(move |instance: &mut dyn Any, value: Box<dyn Any + Send>| -> WriteResult {
            let target = downcast_instance_mut::<T>(instance)?;
            setter(target, downcast_value::<V>(value)?).map_err(|e| AccessError::Failed(e.into()))
        }))
    }

    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(&mut dyn Any, Box<dyn Any + Send>) -> WriteResult + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    pub(crate) fn call(&self, instance: &mut dyn Any, value: Box<dyn Any + Send>) -> WriteResult {
        (self.0)(instance, value)
    }
}

impl std::fmt::Debug for Writer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Writer")
    }
}

fn downcast_instance<T: Any>(instance: &dyn Any) -> std::result::Result<&T, AccessError> {
    instance.downcast_ref::<T>().ok_or(AccessError::InstanceType {
        expected: type_name::<T>(),
    })
}

fn downcast_instance_mut<T: Any>(
    instance: &mut dyn Any,
) -> std::result::Result<&mut T, AccessError> {
    instance.downcast_mut::<T>().ok_or(AccessError::InstanceType {
        expected: type_name::<T>(),
    })
}

fn downcast_value<V: Any>(value: Box<dyn Any + Send>) -> std::result::Result<V, AccessError> {
    value
        .downcast::<V>()
        .map(|v| *v)
        .map_err(|_| AccessError::ValueType {
            expected: type_name::<V>(),
        })
}

/// One candidate property as reported by a metadata provider:
/// a name, an optional reader and an optional writer.
///
/// # Example
///
/// ```rust
/// use prospect::PropertyDescriptor;
///
/// struct Point { x: i32 }
///
/// let x = PropertyDescriptor::new("x")
///     .reader(|p: &Point| p.x)
///     .writer(|p: &mut Point, v: i32| p.x = v);
/// assert!(x.is_readable() && x.is_writable());
/// ```
#[derive(Debug, Clone)]
pub struct PropertyDescriptor {
    name: Cow<'static, str>,
    reader: Option<Reader>,
    writer: Option<Writer>,
}

impl PropertyDescriptor {
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            name: name.into(),
            reader: None,
            writer: None,
        }
    }

    /// Typed shorthand for `with_reader(Reader::new(getter))`.
    pub fn reader<T, V, F>(self, getter: F) -> Self
    where
        T: Any,
        V: Any + Send,
        F: Fn(&T) -> V + Send + Sync + 'static,
    {
        self.with_reader(Reader::new(getter))
    }

    /// Typed shorthand for `with_writer(Writer::new(setter))`.
    pub fn writer<T, V, F>(self, setter: F) -> Self
    where
        T: Any,
        V: Any,
        F: Fn(&mut T, V) + Send + Sync + 'static,
    {
        self.with_writer(Writer::new(setter))
    }

    pub fn with_reader(mut self, reader: Reader) -> Self {
        self.reader = Some(reader);
        self
    }

    pub fn with_writer(mut self, writer: Writer) -> Self {
        self.writer = Some(writer);
        self
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_readable(&self) -> bool {
        self.reader.is_some()
    }

    pub fn is_writable(&self) -> bool {
        self.writer.is_some()
    }

    pub(crate) fn into_parts(self) -> (Cow<'static, str>, Option<Reader>, Option<Writer>) {
        (self.name, self.reader, self.writer)
    }

    /// The read-only `class` pseudo-property of `ty`, yielding its type name.
    fn class_of(ty: TypeRef) -> Self {
        Self::new(CLASS_PROPERTY).with_reader(Reader::from_fn(move |instance| {
            if ty.matches(instance) {
                Ok(Box::new(ty.name()))
            } else {
                Err(AccessError::InstanceType { expected: ty.name() })
            }
        }))
    }
}

/// The property table of one type, in declaration order.
#[derive(Debug, Clone)]
pub struct TypeMetadata {
    type_ref: TypeRef,
    properties: Vec<PropertyDescriptor>,
}

impl TypeMetadata {
    /// Empty metadata for `type_ref`.
    pub fn new(type_ref: TypeRef) -> Self {
        Self {
            type_ref,
            properties: Vec::new(),
        }
    }

    pub fn of<T: Any>() -> Self {
        Self::new(TypeRef::of::<T>())
    }

    pub fn from_properties(type_ref: TypeRef, properties: Vec<PropertyDescriptor>) -> Self {
        Self {
            type_ref,
            properties,
        }
    }

    pub fn with_property(mut self, property: PropertyDescriptor) -> Self {
        self.properties.push(property);
        self
    }

    pub fn push(&mut self, property: PropertyDescriptor) {
        self.properties.push(property);
    }

    /// Prepends the synthetic `class` property, unless one is already present.
    pub fn with_class_property(mut self) -> Self {
        if !self.properties.iter().any(|p| p.name() == CLASS_PROPERTY) {
            self.properties
                .insert(0, PropertyDescriptor::class_of(self.type_ref));
        }
        self
    }

    #[inline]
    pub fn type_ref(&self) -> TypeRef {
        self.type_ref
    }

    pub fn properties(&self) -> &[PropertyDescriptor] {
        &self.properties
    }

    pub fn into_properties(self) -> Vec<PropertyDescriptor> {
        self.properties
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Checks that property names are unique within the table.
    pub fn validate(&self) -> Result {
        let mut seen = HashSet::with_capacity(self.properties.len());
        for property in &self.properties {
            if !seen.insert(property.name()) {
                return Err(Error::DuplicateProperty {
                    type_name: self.type_ref.name(),
                    property: property.name().to_string(),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Sample {
        count: u32,
    }

    #[derive(Debug, thiserror::Error)]
    #[error("sensor offline")]
    struct Offline;

    #[test]
    fn test_reader_reads_typed_instance() {
        let reader = Reader::new(|s: &Sample| s.count);
        let value = reader.call(&Sample { count: 3 }).unwrap();
        assert_eq!(value.downcast_ref::<u32>(), Some(&3));
    }

    #[test]
    fn test_reader_rejects_foreign_instance() {
        let reader = Reader::new(|s: &Sample| s.count);
        let err = reader.call(&"not a sample").unwrap_err();
        assert!(matches!(err, AccessError::InstanceType { .. }));
    }

    #[test]
    fn test_fallible_reader_keeps_cause() {
        let reader = Reader::try_new(|_: &Sample| Err::<u32, _>(Offline));
        let err = reader.call(&Sample { count: 0 }).unwrap_err();
        match err {
            AccessError::Failed(cause) => assert!(cause.downcast_ref::<Offline>().is_some()),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_writer_rejects_wrong_value_type() {
        let writer = Writer::new(|s: &mut Sample, v: u32| s.count = v);
        let mut sample = Sample { count: 1 };
        let err = writer.call(&mut sample, Box::new("seven")).unwrap_err();
        assert!(matches!(err, AccessError::ValueType { .. }));
        assert_eq!(sample.count, 1);
    }

    #[test]
    fn test_writer_assigns_value() {
        let writer = Writer::new(|s: &mut Sample, v: u32| s.count = v);
        let mut sample = Sample { count: 1 };
        writer.call(&mut sample, Box::new(9_u32)).unwrap();
        assert_eq!(sample, Sample { count: 9 });
    }

    #[test]
    fn test_class_property_is_prepended_once() {
        let metadata = TypeMetadata::of::<Sample>()
            .with_property(PropertyDescriptor::new("count").reader(|s: &Sample| s.count))
            .with_class_property()
            .with_class_property();
        let names: Vec<_> = metadata.properties().iter().map(|p| p.name()).collect();
        assert_eq!(names, vec![CLASS_PROPERTY, "count"]);
        assert!(!metadata.properties()[0].is_writable());
    }

    #[test]
    fn test_class_property_yields_type_name() {
        let metadata = TypeMetadata::of::<Sample>().with_class_property();
        let (_, reader, _) = metadata.into_properties().remove(0).into_parts();
        let value = reader.unwrap().call(&Sample { count: 0 }).unwrap();
        assert_eq!(
            value.downcast_ref::<&'static str>(),
            Some(&type_name::<Sample>())
        );
    }

    #[test]
    fn test_validate_rejects_duplicate_names() {
        let metadata = TypeMetadata::of::<Sample>()
            .with_property(PropertyDescriptor::new("count"))
            .with_property(PropertyDescriptor::new("count"));
        assert!(matches!(
            metadata.validate(),
            Err(Error::DuplicateProperty { property, .. }) if property == "count"
        ));
    }
}
