//! Mapping dtypes onto a backend's own type identifiers.

use std::collections::HashMap;

use prims_core::{DType, PrimsError, Result};

/// Registry from [`DType`] to a backend-specific type identifier.
///
/// Backends rarely cover the full dtype set, so lookups are fallible and
/// report the missing dtype rather than panicking inside lowering code.
#[derive(Clone, Debug)]
pub struct BackendDtypeMap<B> {
    entries: HashMap<DType, B>,
}

impl<B> BackendDtypeMap<B> {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    pub fn from_pairs(pairs: impl IntoIterator<Item = (DType, B)>) -> Self {
        Self {
            entries: pairs.into_iter().collect(),
        }
    }

    /// Registers `id` for `dtype`, replacing any previous entry.
    pub fn insert(&mut self, dtype: DType, id: B) -> Option<B> {
        self.entries.insert(dtype, id)
    }

    pub fn contains(&self, dtype: DType) -> bool {
        self.entries.contains_key(&dtype)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<B: Clone> BackendDtypeMap<B> {
    /// The backend identifier registered for `dtype`.
    pub fn get(&self, dtype: DType) -> Result<B> {
        self.entries
            .get(&dtype)
            .cloned()
            .ok_or(PrimsError::UnmappedBackendDtype(dtype))
    }
}

impl<B> Default for BackendDtypeMap<B> {
    fn default() -> Self {
        Self::new()
    }
}
