use crate::TypeRef;

use super::PropertyAccessor;

/// Plain-data description of one resolved property.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PropertyInfo {
    /// The property name, unique within its type.
    pub name: String,
    /// Whether the property accepts writes.
    pub writable: bool,
}

/// Snapshot of the resolved properties of a type.
///
/// Obtained from [`IntrospectorExt::summarize`](super::IntrospectorExt::summarize)
/// or built from an accessor set with [`TypeSummary::from_accessors`].
///
/// # Example
///
/// ```ignore
/// let summary = introspector.summarize::<Point>()?;
/// for property in &summary.properties {
///     println!("{}.{} (writable: {})", summary.type_name, property.name, property.writable);
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TypeSummary {
    /// Fully qualified name of the introspected type.
    pub type_name: String,
    /// Resolved properties, in accessor order.
    pub properties: Vec<PropertyInfo>,
}

impl TypeSummary {
    pub fn from_accessors(ty: &TypeRef, accessors: &[PropertyAccessor]) -> Self {
        Self {
            type_name: ty.name().to_string(),
            properties: accessors.iter().map(PropertyAccessor::info).collect(),
        }
    }

    pub fn property(&self, name: &str) -> Option<&PropertyInfo> {
        self.properties.iter().find(|p| p.name == name)
    }
}
