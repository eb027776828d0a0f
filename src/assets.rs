//! Asset resolution seam for portraits and backgrounds.

use std::collections::HashMap;
use std::sync::Arc;

/// Opaque handle to a display asset returned by a resolver.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AssetHandle(Arc<str>);

impl AssetHandle {
    pub fn new(key: impl Into<Arc<str>>) -> Self {
        Self(key.into())
    }

    /// The key the handle was resolved under.
    pub fn key(&self) -> &str {
        &self.0
    }
}

/// Looks up display assets by key.
///
/// A failed lookup means "no asset" and the visual element stays hidden;
/// resolution never errors.
pub trait AssetResolver {
    fn resolve(&self, key: &str) -> Option<AssetHandle>;
}

/// In-memory resolver backed by a key table.
#[derive(Clone, Debug, Default)]
pub struct MapResolver {
    entries: HashMap<String, AssetHandle>,
}

impl MapResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>) {
        let key = key.into();
        let handle = AssetHandle::new(key.as_str());
        self.entries.insert(key, handle);
    }

    pub fn with(mut self, key: impl Into<String>) -> Self {
        self.insert(key);
        self
    }
}

impl AssetResolver for MapResolver {
    fn resolve(&self, key: &str) -> Option<AssetHandle> {
        self.entries.get(key).cloned()
    }
}

/// Resolver that accepts every key, for hosts that defer the real lookup.
#[derive(Clone, Copy, Debug, Default)]
pub struct PassthroughResolver;

impl AssetResolver for PassthroughResolver {
    fn resolve(&self, key: &str) -> Option<AssetHandle> {
        Some(AssetHandle::new(key))
    }
}
