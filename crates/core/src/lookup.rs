//! Key/value sources used to resolve placeholders and locate the services blob.
//!
//! The catalog never reads process state directly. Everything it needs from
//! the outside world goes through a [`KeyLookup`], which makes resolution
//! deterministic under test and lets callers decide the layering (environment
//! first, then a properties store, for instance).

use std::collections::HashMap;
use std::env;
use std::fmt;
use std::sync::Arc;

/// A synchronous, side-effect free `key -> value` source.
pub trait KeyLookup {
    /// Return the value bound to `key`, or `None` when it is not defined.
    fn lookup(&self, key: &str) -> Option<String>;
}

/// Lookup shared between a catalog and the credentials it hands out.
pub type SharedLookup = Arc<dyn KeyLookup + Send + Sync>;

impl<T: KeyLookup + ?Sized> KeyLookup for &T {
    fn lookup(&self, key: &str) -> Option<String> {
        (**self).lookup(key)
    }
}

impl<T: KeyLookup + ?Sized> KeyLookup for Box<T> {
    fn lookup(&self, key: &str) -> Option<String> {
        (**self).lookup(key)
    }
}

impl<T: KeyLookup + ?Sized> KeyLookup for Arc<T> {
    fn lookup(&self, key: &str) -> Option<String> {
        (**self).lookup(key)
    }
}

/// Reads the process environment. Values that are not valid UTF-8 are treated
/// as undefined.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvLookup;

impl KeyLookup for EnvLookup {
    fn lookup(&self, key: &str) -> Option<String> {
        if key.is_empty() || key.contains('=') || key.contains('\0') {
            return None;
        }
        env::var(key).ok()
    }
}

/// In-memory lookup, used for properties files and tests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MapLookup(HashMap<String, String>);

impl MapLookup {
    #[must_use]
    pub fn new() -> Self {
        Self(HashMap::new())
    }

    /// Bind `key` to `value`, returning the previous value if any
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.0.insert(key.into(), value.into())
    }

    /// Builder-style variant of [`MapLookup::insert`]
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl KeyLookup for MapLookup {
    fn lookup(&self, key: &str) -> Option<String> {
        self.0.get(key).cloned()
    }
}

impl From<HashMap<String, String>> for MapLookup {
    fn from(map: HashMap<String, String>) -> Self {
        Self(map)
    }
}

impl<K, V> FromIterator<(K, V)> for MapLookup
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Adapts any `Fn(&str) -> Option<String>` into a [`KeyLookup`].
#[derive(Clone)]
pub struct FnLookup<F>(pub F);

impl<F> KeyLookup for FnLookup<F>
where
    F: Fn(&str) -> Option<String>,
{
    fn lookup(&self, key: &str) -> Option<String> {
        (self.0)(key)
    }
}

impl<F> fmt::Debug for FnLookup<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FnLookup")
    }
}

/// Ordered chain of lookups; the first source that defines a key wins.
#[derive(Default)]
pub struct LayeredLookup {
    layers: Vec<SharedLookup>,
}

impl LayeredLookup {
    #[must_use]
    pub fn new() -> Self {
        Self { layers: Vec::new() }
    }

    /// Append a source consulted after every source already in the chain
    #[must_use]
    pub fn then(mut self, layer: impl KeyLookup + Send + Sync + 'static) -> Self {
        self.layers.push(Arc::new(layer));
        self
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}

impl KeyLookup for LayeredLookup {
    fn lookup(&self, key: &str) -> Option<String> {
        self.layers.iter().find_map(|layer| layer.lookup(key))
    }
}

impl fmt::Debug for LayeredLookup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LayeredLookup")
            .field("layers", &self.layers.len())
            .finish()
    }
}
