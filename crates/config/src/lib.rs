//! Configuration for vcapenv
//!
//! Decides where the services blob is read from, whether credential
//! placeholders are resolved, and how the process environment and an
//! optional properties file are layered into a single lookup.

pub mod properties;
pub mod settings;

pub use properties::load_properties;
pub use settings::Settings;
