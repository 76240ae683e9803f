use std::{
    any::TypeId,
    collections::HashMap,
    sync::{PoisonError, RwLock},
};

use crate::{BoxError, Config, Properties, ProviderError, Result, TypeRef};

use super::{MetadataProvider, TypeMetadata};

/// The default [`MetadataProvider`]: a table of registered property sets
/// keyed by type.
///
/// Types are registered either through their [`Properties`] implementation
/// (usually derived) or with a hand-built [`TypeMetadata`]. The registry can
/// be shared between threads and extended after it has been handed to an
/// introspector.
///
/// # Example
///
/// ```rust
/// use prospect::{PropertyDescriptor, TypeMetadata, TypeRegistry};
///
/// struct Point { x: i32 }
///
/// let registry = TypeRegistry::default();
/// registry.register_metadata(
///     TypeMetadata::of::<Point>()
///         .with_property(PropertyDescriptor::new("x").reader(|p: &Point| p.x)),
/// )?;
/// assert!(registry.contains::<Point>());
/// # Ok::<(), prospect::Error>(())
/// ```
pub struct TypeRegistry {
    config: Config,
    types: RwLock<HashMap<TypeId, TypeMetadata>>,
}

impl TypeRegistry {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            types: RwLock::new(HashMap::new()),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Register `T` using its [`Properties`] table.
    pub fn register<T: Properties>(&self) -> Result {
        self.register_metadata(T::metadata())
    }

    /// Register a hand-built property table, replacing any earlier one for
    /// the same type.
    ///
    /// Fails with [`Error::DuplicateProperty`](crate::Error::DuplicateProperty)
    /// if two properties share a name.
    pub fn register_metadata(&self, metadata: TypeMetadata) -> Result {
        metadata.validate()?;
        let ty = metadata.type_ref();
        tracing::debug!(type_name = ty.name(), properties = metadata.len(), "Registering type");
        let mut types = self.types.write().unwrap_or_else(PoisonError::into_inner);
        types.insert(ty.id(), metadata);
        Ok(())
    }

    pub fn contains<T: 'static>(&self) -> bool {
        self.contains_type(&TypeRef::of::<T>())
    }

    pub fn contains_type(&self, ty: &TypeRef) -> bool {
        let types = self.types.read().unwrap_or_else(PoisonError::into_inner);
        types.contains_key(&ty.id())
    }

    pub fn len(&self) -> usize {
        self.types.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lookup(&self, ty: &TypeRef) -> Option<TypeMetadata> {
        let types = self.types.read().unwrap_or_else(PoisonError::into_inner);
        types.get(&ty.id()).cloned()
    }
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl std::fmt::Debug for TypeRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypeRegistry")
            .field("config", &self.config)
            .field("types", &self.len())
            .finish()
    }
}

impl MetadataProvider for TypeRegistry {
    fn describe(&self, ty: &TypeRef) -> std::result::Result<TypeMetadata, BoxError> {
        let metadata = match self.lookup(ty) {
            Some(metadata) => metadata,
            None if self.config.strict => {
                return Err(Box::new(ProviderError::UnknownType(ty.name())));
            }
            None => TypeMetadata::new(*ty),
        };
        if self.config.synthetic_class {
            Ok(metadata.with_class_property())
        } else {
            Ok(metadata)
        }
    }
}
