use clap::Subcommand;
use std::path::PathBuf;
use vcapenv_catalog::{ConnectionResolver, ServiceCatalog};
use vcapenv_config::Settings;
use vcapenv_core::SharedLookup;

pub mod list;
pub mod resolve;
pub mod show;
pub mod uri;

#[derive(Subcommand)]
pub enum Commands {
    /// List bound services: type, name, label and plan
    #[command(visible_alias = "ls")]
    List,

    /// Show one service and its credentials
    Show {
        /// Service name
        name: String,

        /// Print secret values instead of masking them
        #[arg(long)]
        reveal: bool,
    },

    /// Print the connection URI for a service
    Uri {
        /// URI, or key holding the URI, used when no services are bound
        #[arg(long = "default", value_name = "KEY_OR_URI")]
        default_key_or_uri: String,

        /// URI scheme, for example postgres or jdbc:postgresql
        #[arg(long)]
        scheme: String,

        /// Service type selector: literal, /regex/, optionally prefixed with !
        #[arg(long = "type", value_name = "SELECTOR")]
        type_selector: String,

        /// Service name selector, same grammar as --type
        #[arg(long = "name", value_name = "SELECTOR")]
        name_selector: Option<String>,
    },

    /// Expand ${KEY} and ${KEY,default} placeholders in a value
    Resolve {
        value: String,
    },
}

/// Settings and lookup shared by every command.
pub struct Context {
    pub settings: Settings,
    pub lookup: SharedLookup,
    pub services_file: Option<PathBuf>,
}

impl Context {
    pub fn new(settings: Settings, services_file: Option<PathBuf>) -> vcapenv_core::Result<Self> {
        let lookup = settings.build_lookup()?;
        Ok(Self {
            settings,
            lookup,
            services_file,
        })
    }

    /// The bound catalog, from `--file` when given.
    pub fn catalog(&self) -> vcapenv_core::Result<Option<ServiceCatalog>> {
        match &self.services_file {
            Some(path) => self
                .settings
                .load_catalog_from_file(path, &self.lookup)
                .map(Some),
            None => self.settings.load_catalog(&self.lookup),
        }
    }

    pub fn connection_resolver(&self) -> vcapenv_core::Result<ConnectionResolver> {
        self.settings
            .connection_resolver(&self.lookup, self.services_file.as_deref())
    }
}
