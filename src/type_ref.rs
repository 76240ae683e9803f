use std::{
    any::{Any, TypeId},
    hash::Hash,
};

/// A lightweight runtime descriptor of a Rust type.
///
/// Identifies the type whose properties should be resolved. Two descriptors
/// are equal when they describe the same [`TypeId`]; the name is only used
/// for diagnostics.
///
/// # Example
///
/// ```rust
/// use prospect::TypeRef;
///
/// struct Point;
///
/// let ty = TypeRef::of::<Point>();
/// assert!(ty.name().ends_with("Point"));
/// assert_eq!(ty, TypeRef::of::<Point>());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct TypeRef {
    id: TypeId,
    name: &'static str,
}

impl TypeRef {
    pub fn of<T: Any>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    #[inline]
    pub fn id(&self) -> TypeId {
        self.id
    }

    /// Fully qualified type name as reported by [`std::any::type_name`].
    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns `true` if `instance` is a value of the described type.
    pub fn matches(&self, instance: &dyn Any) -> bool {
        instance.type_id() == self.id
    }
}

impl PartialEq for TypeRef {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeRef {}

impl Hash for TypeRef {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl std::fmt::Display for TypeRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Point;
    struct Line;

    #[test]
    fn test_equality_by_type_id() {
        assert_eq!(TypeRef::of::<Point>(), TypeRef::of::<Point>());
        assert_ne!(TypeRef::of::<Point>(), TypeRef::of::<Line>());
    }

    #[test]
    fn test_matches_instance() {
        let ty = TypeRef::of::<i32>();
        assert!(ty.matches(&5_i32));
        assert!(!ty.matches(&"five"));
    }

    #[test]
    fn test_display_uses_type_name() {
        assert_eq!(TypeRef::of::<u8>().to_string(), "u8");
    }
}
