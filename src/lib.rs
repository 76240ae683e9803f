//! Prospect - property-accessor resolver
//!
//! Discovers the readable (and optionally writable) named properties of a
//! type and exposes each one as a uniform [`PropertyAccessor`], so a generic
//! diffing engine can walk user-defined types without knowing them.
//!
//! Types describe themselves through a [`MetadataProvider`], usually the
//! [`TypeRegistry`] filled with `#[derive(Properties)]`. The
//! [`StandardIntrospector`] filters out synthetic and write-only entries.
//!
//! ```ignore
//! use prospect::{IntrospectorExt, Properties, StandardIntrospector};
//!
//! #[derive(Properties)]
//! struct Point { x: i32, y: i32 }
//!
//! let introspector = StandardIntrospector::new();
//! introspector.registry().register::<Point>()?;
//! let accessors = introspector.introspect_type::<Point>()?;
//! ```

mod config;
mod error;
mod introspection;
mod metadata;
mod properties;
mod type_ref;

pub use config::Config;
pub use error::{AccessError, BoxError, Error, ProviderError};
pub use introspection::{
    Introspector, IntrospectorExt, META_CLASS_PROPERTY, PropertyAccessor, PropertyInfo,
    RESERVED_PROPERTY_NAMES, StandardIntrospector, TypeSummary,
};
pub use metadata::{
    CLASS_PROPERTY, CachedProvider, FnProvider, MetadataProvider, PropertyDescriptor, ReadResult,
    Reader, TypeMetadata, TypeRegistry, WriteResult, Writer,
};
pub use properties::Properties;
pub use type_ref::TypeRef;

/// Derives [`Properties`](trait@Properties) for a struct with named fields.
///
/// ```rust
/// use prospect::Properties;
///
/// #[derive(Properties)]
/// struct Point {
///     x: i32,
///     #[property(read_only)]
///     y: i32,
/// }
///
/// assert_eq!(Point::properties().len(), 2);
/// ```
///
/// Tuple structs have no property names:
///
/// ```compile_fail
/// #[derive(prospect::Properties)]
/// struct Meters(f64);
/// ```
///
/// Neither do enums:
///
/// ```compile_fail
/// #[derive(prospect::Properties)]
/// enum Shape {
///     Circle { radius: f64 },
/// }
/// ```
///
/// A property can't drop both its reader and its writer:
///
/// ```compile_fail
/// #[derive(prospect::Properties)]
/// struct Account {
///     #[property(read_only, write_only)]
///     id: u64,
/// }
/// ```
///
/// Unknown keys are rejected:
///
/// ```compile_fail
/// #[derive(prospect::Properties)]
/// struct Account {
///     #[property(hidden)]
///     id: u64,
/// }
/// ```
#[cfg(feature = "macros")]
pub use prospect_macros::Properties;

pub type Result<T = ()> = std::result::Result<T, Error>;
