//! The parsed services blob.
//!
//! Services are grouped by type in the order the blob lists them, and named
//! services are additionally indexed by name. The blob is conventionally the
//! value of `VCAP_SERVICES`:
//!
//! ```json
//! {
//!   "mysql-5.1": [{"name": "mysql-1", "credentials": {...}}],
//!   "postgresql-9.1": [{"name": "pg-1", "credentials": {...}}]
//! }
//! ```
//!
//! Construction is all-or-nothing: a blob with a repeated service type or a
//! repeated service name is rejected as a whole.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use serde::de::{self, Deserializer, MapAccess, Visitor};
use serde::Deserialize;
use vcapenv_core::{
    DuplicateKind, EnvLookup, Error, KeyLookup, Result, SharedLookup, SELECTOR_REGEX_DELIMITER,
};

use crate::credentials::ServiceCredentials;
use crate::descriptor::{RawService, ServiceDescriptor};
use crate::pattern::PatternMatcher;

/// Bound services grouped by type, with a name index.
#[derive(Debug, Clone, Default)]
pub struct ServiceCatalog {
    services: IndexMap<String, Vec<ServiceDescriptor>>,
    /// name -> (type bucket position, position within the bucket)
    by_name: HashMap<String, (usize, usize)>,
}

impl ServiceCatalog {
    /// Parse a services blob.
    ///
    /// With `resolve_placeholders` set, credential strings are resolved
    /// against the process environment each time they are read.
    pub fn parse(blob: &str, resolve_placeholders: bool) -> Result<Self> {
        Self::parse_with_lookup(blob, resolve_placeholders, Arc::new(EnvLookup))
    }

    /// Parse a services blob, resolving credential placeholders against
    /// `lookup` when `resolve_placeholders` is set.
    pub fn parse_with_lookup(
        blob: &str,
        resolve_placeholders: bool,
        lookup: SharedLookup,
    ) -> Result<Self> {
        let raw: RawCatalog = serde_json::from_str(blob)
            .map_err(|e| Error::parse_with_source("services blob is not a valid services document", e))?;

        let resolver = resolve_placeholders.then_some(&lookup);
        let mut catalog = Self::default();

        for (service_type, entries) in raw.0 {
            if catalog.services.contains_key(&service_type) {
                return Err(Error::duplicate(DuplicateKind::ServiceType, service_type));
            }
            let bucket = catalog.services.len();

            let mut descriptors = Vec::with_capacity(entries.len());
            for (position, entry) in entries.into_iter().enumerate() {
                let descriptor = ServiceDescriptor::from_raw(&service_type, entry, resolver);
                if let Some(name) = descriptor.name().filter(|name| !name.is_empty()) {
                    if catalog
                        .by_name
                        .insert(name.to_string(), (bucket, position))
                        .is_some()
                    {
                        return Err(Error::duplicate(DuplicateKind::ServiceName, name));
                    }
                }
                descriptors.push(descriptor);
            }

            catalog.services.insert(service_type, descriptors);
        }

        tracing::debug!(
            service_types = catalog.services.len(),
            services = catalog.len(),
            resolve_placeholders,
            "parsed services catalog"
        );
        Ok(catalog)
    }

    /// Read the blob bound to `variable` and parse it as written.
    ///
    /// Returns `Ok(None)` when the variable is undefined or blank.
    pub fn from_lookup<L>(lookup: &L, variable: &str) -> Result<Option<Self>>
    where
        L: KeyLookup + ?Sized,
    {
        match lookup.lookup(variable) {
            Some(blob) if !blob.trim().is_empty() => {
                tracing::debug!(variable, "loading services from lookup");
                Self::parse_with_lookup(&blob, false, Arc::new(EnvLookup)).map(Some)
            }
            _ => Ok(None),
        }
    }

    /// Prefer a non-blank blob bound to `variable`; otherwise parse
    /// `default_blob` with placeholder resolution against `lookup`.
    pub fn from_lookup_or(default_blob: &str, lookup: SharedLookup, variable: &str) -> Result<Self> {
        if let Some(catalog) = Self::from_lookup(lookup.as_ref(), variable)? {
            return Ok(catalog);
        }
        tracing::debug!(variable, "services variable not set; using default services");
        Self::parse_with_lookup(default_blob, true, lookup)
    }

    /// Services of the given type, in source order; empty for unknown types.
    #[must_use]
    pub fn by_type(&self, service_type: &str) -> &[ServiceDescriptor] {
        self.services
            .get(service_type)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// The service bound under `name`.
    #[must_use]
    pub fn by_name(&self, name: &str) -> Option<&ServiceDescriptor> {
        let &(bucket, position) = self.by_name.get(name)?;
        self.services
            .get_index(bucket)
            .and_then(|(_, descriptors)| descriptors.get(position))
    }

    /// The `index`-th (0-based) service of `service_type`.
    #[must_use]
    pub fn at(&self, service_type: &str, index: usize) -> Option<&ServiceDescriptor> {
        self.by_type(service_type).get(index)
    }

    /// The `index`-th service of the first type, in catalog order, that both
    /// matches `service_type` and has more than `index` services. Matching
    /// types that are too small are skipped.
    #[must_use]
    pub fn at_matching(
        &self,
        service_type: &PatternMatcher,
        index: usize,
    ) -> Option<&ServiceDescriptor> {
        self.services
            .iter()
            .filter(|(key, _)| service_type.matches(key))
            .find_map(|(_, descriptors)| descriptors.get(index))
    }

    /// Every service whose type matches `type_filter` and whose name matches
    /// `name_filter`, in catalog order. A service without a name only passes
    /// a negated name filter.
    #[must_use]
    pub fn select(
        &self,
        type_filter: &PatternMatcher,
        name_filter: &PatternMatcher,
    ) -> Vec<&ServiceDescriptor> {
        let selected: Vec<_> = self
            .services
            .iter()
            .filter(|(key, _)| type_filter.matches(key))
            .flat_map(|(_, descriptors)| descriptors)
            .filter(|descriptor| name_filter.matches_opt(descriptor.name()))
            .collect();
        tracing::debug!(
            type_filter = %type_filter,
            name_filter = %name_filter,
            selected = selected.len(),
            "selected services"
        );
        selected
    }

    #[must_use]
    pub fn credentials_by_name(&self, name: &str) -> Option<&ServiceCredentials> {
        self.by_name(name).map(ServiceDescriptor::credentials)
    }

    #[must_use]
    pub fn credentials_at(&self, service_type: &str, index: usize) -> Option<&ServiceCredentials> {
        self.at(service_type, index).map(ServiceDescriptor::credentials)
    }

    /// Credentials of the first service of a type.
    ///
    /// A `/regex/` selector picks the first matching type that has a service;
    /// anything else is an exact type name.
    pub fn first_credentials(&self, service_type: &str) -> Result<Option<&ServiceCredentials>> {
        let is_regex = service_type.len() > 1
            && service_type.starts_with(SELECTOR_REGEX_DELIMITER)
            && service_type.ends_with(SELECTOR_REGEX_DELIMITER);
        let descriptor = if is_regex {
            self.at_matching(&PatternMatcher::compile(service_type)?, 0)
        } else {
            self.at(service_type, 0)
        };
        Ok(descriptor.map(ServiceDescriptor::credentials))
    }

    /// Credentials of the first service selected by a pair of negatable
    /// selectors, with placeholders in the selectors resolved against
    /// `lookup`.
    pub fn credentials_of<L>(
        &self,
        type_selector: &str,
        name_selector: &str,
        lookup: &L,
    ) -> Result<&ServiceCredentials>
    where
        L: KeyLookup + ?Sized,
    {
        let type_filter = PatternMatcher::parse(type_selector, lookup)?;
        let name_filter = PatternMatcher::parse(name_selector, lookup)?;
        self.select(&type_filter, &name_filter)
            .into_iter()
            .next()
            .map(ServiceDescriptor::credentials)
            .ok_or_else(|| {
                Error::service_not_found(type_selector, Some(name_selector), self.service_types_owned())
            })
    }

    /// Service types in catalog order
    pub fn service_types(&self) -> impl Iterator<Item = &str> {
        self.services.keys().map(String::as_str)
    }

    pub(crate) fn service_types_owned(&self) -> Vec<String> {
        self.services.keys().cloned().collect()
    }

    /// Every service, grouped by type, in catalog order
    pub fn iter(&self) -> impl Iterator<Item = &ServiceDescriptor> {
        self.services.values().flatten()
    }

    /// Total number of services across all types
    #[must_use]
    pub fn len(&self) -> usize {
        self.services.values().map(Vec::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Top-level object of the blob, keeping every key in source order so that
/// repeated service types can be reported instead of silently collapsed.
struct RawCatalog(Vec<(String, Vec<RawService>)>);

impl<'de> Deserialize<'de> for RawCatalog {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct RawCatalogVisitor;

        impl<'de> Visitor<'de> for RawCatalogVisitor {
            type Value = RawCatalog;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an object mapping service types to arrays of services")
            }

            fn visit_map<A>(self, mut map: A) -> std::result::Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some(service_type) = map.next_key::<String>()? {
                    let services = map
                        .next_value::<Vec<RawService>>()
                        .map_err(|e| de::Error::custom(format!("service type '{service_type}': {e}")))?;
                    entries.push((service_type, services));
                }
                Ok(RawCatalog(entries))
            }
        }

        deserializer.deserialize_map(RawCatalogVisitor)
    }
}
