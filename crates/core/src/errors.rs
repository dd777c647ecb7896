use std::fmt;
use std::path::PathBuf;

/// Result type alias for vcapenv operations
pub type Result<T> = std::result::Result<T, Error>;

/// Which index rejected a duplicate key while building a catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DuplicateKind {
    ServiceType,
    ServiceName,
}

impl fmt::Display for DuplicateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DuplicateKind::ServiceType => f.write_str("service type"),
            DuplicateKind::ServiceName => f.write_str("service name"),
        }
    }
}

/// Core error type for vcapenv operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The services blob is not a JSON object of service arrays
    #[error("failed to parse services: {message}")]
    Parse {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A service type or service name appears twice
    #[error("duplicate {kind} '{key}'")]
    DuplicateKey { kind: DuplicateKind, key: String },

    /// No bound service matched the requested selectors
    #[error("{}", format_not_found(.service_type, .service_name, .available))]
    ServiceNotFound {
        service_type: String,
        service_name: Option<String>,
        available: Vec<String>,
    },

    /// No catalog is bound and the fallback connection cannot be resolved
    #[error("connection default '{key}' is not defined: {message}")]
    UnresolvedConnection { key: String, message: String },

    /// A selector's regular expression does not compile
    #[error("invalid selector '{selector}': {source}")]
    InvalidSelector {
        selector: String,
        #[source]
        source: regex::Error,
    },

    /// Credentials lack a field required to assemble a connection URI
    #[error("credentials have no '{field}' field")]
    MissingCredential { field: String },

    /// The assembled connection string is not a valid URI
    #[error("invalid connection URI: {source}")]
    InvalidUri {
        #[source]
        source: url::ParseError,
    },

    /// Configuration errors
    #[error("configuration error: {message}")]
    Configuration { message: String },

    /// File system operations
    #[error("file system {operation} operation failed for '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        operation: String,
        #[source]
        source: std::io::Error,
    },
}

fn format_not_found(service_type: &str, service_name: &Option<String>, available: &[String]) -> String {
    let name = match service_name {
        Some(name) => format!("; service-name={name}"),
        None => String::new(),
    };
    if available.is_empty() {
        format!("no bound service for (service-type={service_type}{name}); no services are bound")
    } else {
        format!(
            "no bound service for (service-type={service_type}{name}); bound service types: {}",
            available.join(", ")
        )
    }
}

// Conversion implementations
impl From<url::ParseError> for Error {
    fn from(source: url::ParseError) -> Self {
        Error::InvalidUri { source }
    }
}

// Helper methods for creating errors with context
impl Error {
    /// Create a parse error with a source error
    #[must_use]
    pub fn parse_with_source(
        message: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Error::Parse {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// Create a duplicate key error
    #[must_use]
    pub fn duplicate(kind: DuplicateKind, key: impl Into<String>) -> Self {
        Error::DuplicateKey {
            kind,
            key: key.into(),
        }
    }

    /// Create a service-not-found error carrying the selectors that were tried
    #[must_use]
    pub fn service_not_found(
        service_type: impl Into<String>,
        service_name: Option<&str>,
        available: Vec<String>,
    ) -> Self {
        Error::ServiceNotFound {
            service_type: service_type.into(),
            service_name: service_name.map(str::to_string),
            available,
        }
    }

    /// Create an unresolved connection error
    #[must_use]
    pub fn unresolved_connection(key: impl Into<String>, message: impl Into<String>) -> Self {
        Error::UnresolvedConnection {
            key: key.into(),
            message: message.into(),
        }
    }

    /// Create an invalid selector error
    #[must_use]
    pub fn invalid_selector(selector: impl Into<String>, source: regex::Error) -> Self {
        Error::InvalidSelector {
            selector: selector.into(),
            source,
        }
    }

    /// Create a missing credential error
    #[must_use]
    pub fn missing_credential(field: impl Into<String>) -> Self {
        Error::MissingCredential {
            field: field.into(),
        }
    }

    /// Create a configuration error
    #[must_use]
    pub fn configuration(message: impl Into<String>) -> Self {
        Error::Configuration {
            message: message.into(),
        }
    }

    /// Create a file system error with context
    #[must_use]
    pub fn file_system(
        path: impl Into<PathBuf>,
        operation: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        Error::FileSystem {
            path: path.into(),
            operation: operation.into(),
            source,
        }
    }
}
