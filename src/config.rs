/// Configuration of the [`TypeRegistry`](crate::TypeRegistry).
///
/// Use the builder methods to customize, or [`Default`] for the standard
/// behaviour.
///
/// # Examples
///
/// ```rust
/// use prospect::{Config, TypeRegistry};
///
/// let registry = TypeRegistry::new(
///     Config::default()
///         .with_strict(false)            // Unregistered types have no properties
///         .with_synthetic_class(false),  // Don't expose the `class` entry
/// );
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Whether describing a type that was never registered is an error.
    /// When disabled such types are described with an empty property table.
    /// Default: true
    pub strict: bool,

    /// Whether every described type starts with the synthetic, read-only
    /// `class` property holding the type name. Introspectors always filter
    /// it out; other metadata consumers may use it.
    /// Default: true
    pub synthetic_class: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            strict: true,
            synthetic_class: true,
        }
    }
}

impl Config {
    /// Set whether unregistered types fail to be described.
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Set whether the synthetic `class` property is included.
    pub fn with_synthetic_class(mut self, enabled: bool) -> Self {
        self.synthetic_class = enabled;
        self
    }
}
