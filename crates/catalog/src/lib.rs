//! Typed access to the bound-services blob (`VCAP_SERVICES`).
//!
//! ## Key Components
//!
//! - **`placeholder`**: `${KEY}` / `${KEY,default}` expansion against a
//!   [`KeyLookup`](vcapenv_core::KeyLookup).
//! - **`pattern`**: negatable literal or `/regex/` selectors for service
//!   types and names.
//! - **`credentials`** and **`descriptor`**: one bound service and its
//!   connection parameters.
//! - **`catalog`**: the parsed blob, indexed by type and by name.
//! - **`connection`**: connection URIs built from a selected service, with a
//!   fallback for when no services are bound.

pub mod catalog;
pub mod connection;
pub mod credentials;
pub mod descriptor;
pub mod pattern;
pub mod placeholder;

pub use self::{
    catalog::ServiceCatalog,
    connection::{build_uri, ConnectionResolver},
    credentials::ServiceCredentials,
    descriptor::ServiceDescriptor,
    pattern::PatternMatcher,
    placeholder::{contains_placeholder, resolve_placeholders},
};
