use std::{
    any::{Any, type_name},
    sync::Arc,
};

use crate::{AccessError, Error, Reader, Result, TypeRef, Writer};

use super::PropertyInfo;

/// Uniform access to one named property of a type.
///
/// Produced by an [`Introspector`](super::Introspector). Every accessor can
/// read; [`is_writable`](Self::is_writable) tells whether it can also write.
/// Accessors are immutable and cheap to clone.
///
/// # Example
///
/// ```rust
/// use prospect::{PropertyAccessor, Reader, TypeRef, Writer};
///
/// struct Point { x: i32 }
///
/// let x = PropertyAccessor::new(
///     TypeRef::of::<Point>(),
///     "x",
///     Reader::new(|p: &Point| p.x),
///     Some(Writer::new(|p: &mut Point, v: i32| p.x = v)),
/// );
///
/// let mut point = Point { x: 5 };
/// x.write_as(&mut point, 7)?;
/// assert_eq!(x.read_as::<i32>(&point)?, 7);
/// # Ok::<(), prospect::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct PropertyAccessor {
    name: Arc<str>,
    declaring_type: TypeRef,
    reader: Reader,
    writer: Option<Writer>,
}

impl PropertyAccessor {
    pub fn new(
        declaring_type: TypeRef,
        name: impl Into<Arc<str>>,
        reader: Reader,
        writer: Option<Writer>,
    ) -> Self {
        Self {
            name: name.into(),
            declaring_type,
            reader,
            writer,
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The type this property was resolved on.
    pub fn declaring_type(&self) -> TypeRef {
        self.declaring_type
    }

    /// `false` for read-only properties; writing to them fails with
    /// [`Error::UnsupportedOperation`].
    pub fn is_writable(&self) -> bool {
        self.writer.is_some()
    }

    /// Read the property value of `instance`.
    ///
    /// # Errors
    ///
    /// [`Error::Access`] if `instance` is not of the declaring type or the
    /// reader fails. The accessor remains usable afterwards.
    pub fn read(&self, instance: &dyn Any) -> Result<Box<dyn Any + Send>> {
        self.reader
            .call(instance)
            .map_err(|source| self.access_error(source))
    }

    /// Read the property value of `instance` as a `V`.
    pub fn read_as<V: Any>(&self, instance: &dyn Any) -> Result<V> {
        self.read(instance)?
            .downcast::<V>()
            .map(|value| *value)
            .map_err(|_| {
                self.access_error(AccessError::ValueType {
                    expected: type_name::<V>(),
                })
            })
    }

    /// Write `value` into the property of `instance`.
    ///
    /// # Errors
    ///
    /// [`Error::UnsupportedOperation`] if the property is read-only,
    /// [`Error::Access`] if the instance or value has the wrong type or the
    /// writer fails.
    pub fn write(&self, instance: &mut dyn Any, value: Box<dyn Any + Send>) -> Result {
        let writer = self
            .writer
            .as_ref()
            .ok_or_else(|| Error::UnsupportedOperation {
                property: self.name.to_string(),
            })?;
        writer
            .call(instance, value)
            .map_err(|source| self.access_error(source))
    }

    pub fn write_as<V: Any + Send>(&self, instance: &mut dyn Any, value: V) -> Result {
        self.write(instance, Box::new(value))
    }

    pub fn info(&self) -> PropertyInfo {
        PropertyInfo {
            name: self.name.to_string(),
            writable: self.is_writable(),
        }
    }

    fn access_error(&self, source: AccessError) -> Error {
        Error::Access {
            property: self.name.to_string(),
            source,
        }
    }
}
