/// Boxed error produced by metadata providers and user-supplied readers/writers.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid argument: {0} must be present")]
    InvalidArgument(&'static str),

    #[error("Couldn't introspect type '{type_name}': {source}")]
    Introspection {
        type_name: &'static str,
        #[source]
        source: BoxError,
    },

    #[error("Couldn't access property '{property}': {source}")]
    Access {
        property: String,
        #[source]
        source: AccessError,
    },

    #[error("Property '{property}' is read-only")]
    UnsupportedOperation { property: String },

    #[error("Type '{type_name}' declares property '{property}' more than once")]
    DuplicateProperty {
        type_name: &'static str,
        property: String,
    },
}

impl Error {
    /// The root cause of an [`Error::Introspection`] failure.
    pub fn introspection_cause(
        &self,
    ) -> Option<&(dyn std::error::Error + Send + Sync + 'static)> {
        match self {
            Error::Introspection { source, .. } => Some(source.as_ref()),
            _ => None,
        }
    }
}

/// Failure of a single reader or writer invocation.
#[derive(Debug, thiserror::Error)]
pub enum AccessError {
    #[error("instance is not of type '{expected}'")]
    InstanceType { expected: &'static str },

    #[error("value is not of type '{expected}'")]
    ValueType { expected: &'static str },

    #[error(transparent)]
    Failed(BoxError),
}

/// Errors raised by the built-in metadata providers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProviderError {
    #[error("type '{0}' has no registered properties")]
    UnknownType(&'static str),
}
