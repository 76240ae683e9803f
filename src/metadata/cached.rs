use std::{
    any::TypeId,
    collections::HashMap,
    sync::{PoisonError, RwLock},
};

use crate::{BoxError, TypeRef};

use super::{MetadataProvider, TypeMetadata};

/// Memoizes the metadata returned by another provider.
///
/// Successful lookups are stored per type and served from memory afterwards.
/// Failures are passed through and never stored.
///
/// The cache is not invalidated when the inner provider changes. The empty
/// table a lenient [`TypeRegistry`](super::TypeRegistry) returns for an
/// unregistered type is a success and gets stored, and so is a table later
/// replaced by re-registering. Call [`clear`](Self::clear) after changing
/// the inner provider's registrations.
pub struct CachedProvider<P: MetadataProvider> {
    inner: P,
    cache: RwLock<HashMap<TypeId, TypeMetadata>>,
}

impl<P: MetadataProvider> CachedProvider<P> {
    pub fn new(inner: P) -> Self {
        Self {
            inner,
            cache: RwLock::new(HashMap::new()),
        }
    }

    pub fn inner(&self) -> &P {
        &self.inner
    }

    /// Number of types currently cached.
    pub fn cached(&self) -> usize {
        self.cache.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Drop every cached entry, forcing fresh lookups.
    pub fn clear(&self) {
        self.cache
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl<P: MetadataProvider> MetadataProvider for CachedProvider<P> {
    fn describe(&self, ty: &TypeRef) -> Result<TypeMetadata, BoxError> {
        {
            let cache = self.cache.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(metadata) = cache.get(&ty.id()) {
                return Ok(metadata.clone());
            }
        }

        tracing::trace!(type_name = ty.name(), "Metadata cache miss");
        let metadata = self.inner.describe(ty)?;
        let mut cache = self.cache.write().unwrap_or_else(PoisonError::into_inner);
        cache.insert(ty.id(), metadata.clone());
        Ok(metadata)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::ProviderError;

    struct Counting {
        calls: AtomicUsize,
        fail: bool,
    }

    impl MetadataProvider for Counting {
        fn describe(&self, ty: &TypeRef) -> Result<TypeMetadata, BoxError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                Err(Box::new(ProviderError::UnknownType(ty.name())))
            } else {
                Ok(TypeMetadata::new(*ty))
            }
        }
    }

    fn counting(fail: bool) -> Counting {
        Counting {
            calls: AtomicUsize::new(0),
            fail,
        }
    }

    #[test]
    fn test_successful_lookup_is_cached() {
        let provider = CachedProvider::new(counting(false));
        let ty = TypeRef::of::<u32>();
        provider.describe(&ty).unwrap();
        provider.describe(&ty).unwrap();
        assert_eq!(provider.inner().calls.load(Ordering::SeqCst), 1);
        assert_eq!(provider.cached(), 1);
    }

    #[test]
    fn test_failures_are_not_cached() {
        let provider = CachedProvider::new(counting(true));
        let ty = TypeRef::of::<u32>();
        assert!(provider.describe(&ty).is_err());
        assert!(provider.describe(&ty).is_err());
        assert_eq!(provider.inner().calls.load(Ordering::SeqCst), 2);
        assert_eq!(provider.cached(), 0);
    }

    #[test]
    fn test_clear_forces_fresh_lookup() {
        let provider = CachedProvider::new(counting(false));
        let ty = TypeRef::of::<u32>();
        provider.describe(&ty).unwrap();
        provider.clear();
        provider.describe(&ty).unwrap();
        assert_eq!(provider.inner().calls.load(Ordering::SeqCst), 2);
    }
}
