use serde::Deserialize;
use serde_json::{Map, Value};
use vcapenv_core::SharedLookup;

use crate::credentials::ServiceCredentials;

/// One entry of a service-type array in the services blob.
///
/// ```json
/// "mysql-5.1": [{
///   "name": "mysql-1",
///   "label": "mysql-5.1",
///   "plan": "free",
///   "tags": ["mysql", "mysql-5.1", "relational"],
///   "credentials": { ... }
/// }]
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceDescriptor {
    service_type: String,
    name: Option<String>,
    label: Option<String>,
    plan: Option<String>,
    tags: Vec<String>,
    credentials: ServiceCredentials,
}

/// Wire shape of a service entry. `credentials` is the only required field.
#[derive(Debug, Deserialize)]
pub(crate) struct RawService {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    label: Option<String>,
    #[serde(default)]
    plan: Option<String>,
    #[serde(default)]
    tags: Vec<String>,
    credentials: Map<String, Value>,
}

impl ServiceDescriptor {
    pub(crate) fn from_raw(
        service_type: &str,
        raw: RawService,
        resolver: Option<&SharedLookup>,
    ) -> Self {
        let credentials = match resolver {
            Some(lookup) => ServiceCredentials::with_resolver(raw.credentials, lookup.clone()),
            None => ServiceCredentials::new(raw.credentials),
        };
        Self {
            service_type: service_type.to_string(),
            name: raw.name,
            label: raw.label,
            plan: raw.plan,
            tags: raw.tags,
            credentials,
        }
    }

    /// The service type, for example `mysql-5.1` or `mongodb-1.8`
    #[must_use]
    pub fn service_type(&self) -> &str {
        &self.service_type
    }

    /// The name the service was bound under
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    #[must_use]
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    #[must_use]
    pub fn plan(&self) -> Option<&str> {
        self.plan.as_deref()
    }

    /// Tags in source order; empty when the entry has none
    #[must_use]
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    #[must_use]
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    #[must_use]
    pub fn credentials(&self) -> &ServiceCredentials {
        &self.credentials
    }
}
