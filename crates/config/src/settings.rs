//! Runtime settings: where the services blob comes from and how lookups are
//! layered.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use vcapenv_catalog::{ConnectionResolver, ServiceCatalog};
use vcapenv_core::{
    EnvLookup, Error, KeyLookup, LayeredLookup, Result, SharedLookup, VCAPENV_PROPERTIES_VAR,
    VCAP_SERVICES_VAR,
};

use crate::properties::load_properties;

/// Settings shared by the library entry points and the CLI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Key holding the services blob
    pub blob_variable: String,

    /// Properties file consulted after the process environment
    pub properties_file: Option<PathBuf>,

    /// Whether credential reads resolve `${KEY,default}` placeholders
    pub resolve_placeholders: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            blob_variable: VCAP_SERVICES_VAR.to_string(),
            properties_file: None,
            resolve_placeholders: false,
        }
    }
}

impl Settings {
    /// Defaults, with the properties file taken from `VCAPENV_PROPERTIES`.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(&EnvLookup)
    }

    /// Like [`Settings::from_env`] over an arbitrary lookup.
    #[must_use]
    pub fn from_lookup<L>(lookup: &L) -> Self
    where
        L: KeyLookup + ?Sized,
    {
        let properties_file = lookup
            .lookup(VCAPENV_PROPERTIES_VAR)
            .filter(|path| !path.trim().is_empty())
            .map(PathBuf::from);
        Self {
            properties_file,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_blob_variable(mut self, variable: impl Into<String>) -> Self {
        self.blob_variable = variable.into();
        self
    }

    #[must_use]
    pub fn with_properties_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.properties_file = Some(path.into());
        self
    }

    #[must_use]
    pub fn with_resolve_placeholders(mut self, resolve: bool) -> Self {
        self.resolve_placeholders = resolve;
        self
    }

    /// The process environment, followed by the properties file when one is
    /// configured.
    pub fn build_lookup(&self) -> Result<SharedLookup> {
        let mut layers = LayeredLookup::new().then(EnvLookup);
        if let Some(path) = &self.properties_file {
            layers = layers.then(load_properties(path)?);
        }
        Ok(Arc::new(layers))
    }

    /// Parse the blob bound to `blob_variable`, if it is set and not blank.
    pub fn load_catalog(&self, lookup: &SharedLookup) -> Result<Option<ServiceCatalog>> {
        match lookup.lookup(&self.blob_variable) {
            Some(blob) if !blob.trim().is_empty() => {
                tracing::debug!(variable = %self.blob_variable, "loading services");
                ServiceCatalog::parse_with_lookup(&blob, self.resolve_placeholders, lookup.clone())
                    .map(Some)
            }
            _ => {
                tracing::debug!(variable = %self.blob_variable, "no services bound");
                Ok(None)
            }
        }
    }

    /// Parse a blob kept on disk.
    pub fn load_catalog_from_file(
        &self,
        path: &Path,
        lookup: &SharedLookup,
    ) -> Result<ServiceCatalog> {
        let blob = fs::read_to_string(path).map_err(|e| Error::file_system(path, "read", e))?;
        tracing::debug!(path = %path.display(), "loading services from file");
        ServiceCatalog::parse_with_lookup(&blob, self.resolve_placeholders, lookup.clone())
    }

    /// A resolver over the catalog from `services_file` when given, else the
    /// one bound to `blob_variable`.
    pub fn connection_resolver(
        &self,
        lookup: &SharedLookup,
        services_file: Option<&Path>,
    ) -> Result<ConnectionResolver> {
        let catalog = match services_file {
            Some(path) => Some(self.load_catalog_from_file(path, lookup)?),
            None => self.load_catalog(lookup)?,
        };
        Ok(ConnectionResolver::new(catalog, lookup.clone()))
    }
}
