//! Property introspection: resolving a type into uniform accessors.
//!
//! # Overview
//!
//! An [`Introspector`] turns a [`TypeRef`](crate::TypeRef) into a list of
//! [`PropertyAccessor`]s, one per property worth comparing:
//! - synthetic entries (`class`, `metaClass`) are never exposed
//! - write-only properties are dropped, there is nothing to read
//! - read-only properties are kept and report `is_writable() == false`
//!
//! [`StandardIntrospector`] is the default implementation, built on a
//! pluggable [`MetadataProvider`](crate::MetadataProvider).
//!
//! # Example
//!
//! ```ignore
//! #[derive(Properties)]
//! struct Point { x: i32, #[property(read_only)] y: i32 }
//!
//! let introspector = StandardIntrospector::new();
//! introspector.registry().register::<Point>()?;
//!
//! let mut point = Point { x: 5, y: 1 };
//! for accessor in introspector.introspect_type::<Point>()? {
//!     if accessor.is_writable() {
//!         accessor.write_as(&mut point, 7)?;
//!     }
//! }
//! ```

mod accessor;
mod introspector;
mod property_info;
mod standard;

pub use accessor::PropertyAccessor;
pub use introspector::{Introspector, IntrospectorExt};
pub use property_info::{PropertyInfo, TypeSummary};
pub use standard::{META_CLASS_PROPERTY, RESERVED_PROPERTY_NAMES, StandardIntrospector};
