use std::fmt;

use serde_json::{Map, Value};
use vcapenv_core::SharedLookup;

use crate::placeholder::resolve_placeholders;

/// Connection parameters of one bound service.
///
/// ```json
/// "credentials": {
///   "name": "d50dc30be91474b80a766367dcfb0dc31",
///   "hostname": "172.30.48.26",
///   "port": 3306,
///   "user": "ueQzIwnjcMq4B",
///   "password": "pxk542cfA2HNf"
/// }
/// ```
///
/// Every accessor returns `None` for a missing field. When a lookup is
/// attached, string fields are passed through placeholder resolution on each
/// read, so `"${DB_HOST,localhost}"` can be overridden from the environment.
#[derive(Clone)]
pub struct ServiceCredentials {
    fields: Map<String, Value>,
    resolver: Option<SharedLookup>,
}

impl ServiceCredentials {
    /// Credentials whose values are returned exactly as written.
    #[must_use]
    pub fn new(fields: Map<String, Value>) -> Self {
        Self {
            fields,
            resolver: None,
        }
    }

    /// Credentials whose string values are placeholder-resolved on read.
    #[must_use]
    pub fn with_resolver(fields: Map<String, Value>, lookup: SharedLookup) -> Self {
        Self {
            fields,
            resolver: Some(lookup),
        }
    }

    /// Whether string fields are placeholder-resolved on read
    #[must_use]
    pub fn resolves_placeholders(&self) -> bool {
        self.resolver.is_some()
    }

    /// The database name or top-level collection
    #[must_use]
    pub fn name(&self) -> Option<String> {
        self.get("name")
    }

    #[must_use]
    pub fn hostname(&self) -> Option<String> {
        self.get("hostname")
    }

    /// The port the service listens on, `None` when unknown.
    ///
    /// JSON integers are used directly and so are strings holding an integer.
    /// Any other string is only parsed after placeholder resolution, and only
    /// when resolution is enabled.
    #[must_use]
    pub fn port(&self) -> Option<u16> {
        let raw = self.fields.get("port")?;
        if let Some(port) = raw.as_u64() {
            return port_in_range(port);
        }

        let text = raw.as_str()?;
        if let Ok(port) = text.trim().parse::<u64>() {
            return port_in_range(port);
        }

        let resolver = self.resolver.as_ref()?;
        let resolved = resolve_placeholders(text, resolver.as_ref());
        match resolved.trim().parse::<u64>() {
            Ok(port) => port_in_range(port),
            Err(_) => {
                tracing::warn!("credentials port does not resolve to an integer; treating it as unknown");
                None
            }
        }
    }

    /// The user name, falling back to the `username` field.
    #[must_use]
    pub fn user(&self) -> Option<String> {
        self.get("user").or_else(|| self.get("username"))
    }

    /// The user name, falling back to the `user` field.
    #[must_use]
    pub fn username(&self) -> Option<String> {
        self.get("username").or_else(|| self.get("user"))
    }

    #[must_use]
    pub fn password(&self) -> Option<String> {
        self.get("password")
    }

    /// The `db` field, used by document stores such as MongoDB
    #[must_use]
    pub fn db(&self) -> Option<String> {
        self.get("db")
    }

    /// Read any field as text.
    ///
    /// Strings are resolved when resolution is enabled; numbers and booleans
    /// render as their JSON text. Null, arrays and objects read as absent.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        match self.fields.get(key)? {
            Value::String(text) => Some(match &self.resolver {
                Some(lookup) => resolve_placeholders(text, lookup.as_ref()),
                None => text.clone(),
            }),
            Value::Number(number) => Some(number.to_string()),
            Value::Bool(flag) => Some(flag.to_string()),
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        }
    }

    /// Whether the field is present at all, whatever its type
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    /// Field names, including provider-specific extras
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// The fields exactly as they appeared in the services blob
    #[must_use]
    pub fn raw(&self) -> &Map<String, Value> {
        &self.fields
    }
}

fn port_in_range(port: u64) -> Option<u16> {
    match u16::try_from(port) {
        Ok(port) => Some(port),
        Err(_) => {
            tracing::warn!(port, "credentials port is out of range; treating it as unknown");
            None
        }
    }
}

impl PartialEq for ServiceCredentials {
    fn eq(&self, other: &Self) -> bool {
        self.fields == other.fields && self.resolves_placeholders() == other.resolves_placeholders()
    }
}

// Values are secrets; only the shape is printed.
impl fmt::Debug for ServiceCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceCredentials")
            .field("fields", &self.fields.keys().collect::<Vec<_>>())
            .field("resolve_placeholders", &self.resolves_placeholders())
            .finish()
    }
}
