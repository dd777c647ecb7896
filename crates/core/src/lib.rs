//! Core errors, constants and lookup sources for `vcapenv`.
//!
//! Everything that the catalog, configuration and CLI crates share lives here:
//!
//! - **`errors`**: the `Error` enum and `Result` alias covering every failure
//!   mode of catalog parsing, selection and connection resolution.
//! - **`lookup`**: the `KeyLookup` seam through which placeholders, selectors
//!   and the raw service blob are read from the outside world.
//! - **`constants`**: well-known variable names and token markers.

pub mod constants;
pub mod errors;
pub mod lookup;

pub use self::{
    constants::*,
    errors::{DuplicateKind, Error, Result},
    lookup::{EnvLookup, FnLookup, KeyLookup, LayeredLookup, MapLookup, SharedLookup},
};
