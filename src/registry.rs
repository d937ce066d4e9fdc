//! Static table mapping certification identifiers to their compositions.
//!
//! Configuration data, not logic: the surrounding application decides how
//! registries are populated (bundled constants, config files, a database).

use indexmap::IndexMap;

use crate::config::Composition;
use crate::types::CompositionId;

/// Lookup table of compositions keyed by id, in insertion order.
#[derive(Clone, Debug, Default)]
pub struct CompositionRegistry {
    inner: IndexMap<CompositionId, Composition>,
}

impl CompositionRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a composition, replacing any previous entry with the same id.
    pub fn insert(&mut self, composition: Composition) {
        self.inner.insert(composition.id.clone(), composition);
    }

    /// Look up a composition by id.
    pub fn get(&self, id: &str) -> Option<&Composition> {
        self.inner.get(id)
    }

    /// Registered composition ids in insertion order.
    pub fn ids(&self) -> impl Iterator<Item = &CompositionId> {
        self.inner.keys()
    }

    /// Number of registered compositions.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// True when nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl FromIterator<Composition> for CompositionRegistry {
    fn from_iter<T: IntoIterator<Item = Composition>>(iter: T) -> Self {
        let mut registry = Self::new();
        for composition in iter {
            registry.insert(composition);
        }
        registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::make_group;

    fn composition(id: &str) -> Composition {
        Composition::new(id, id.to_uppercase(), vec![make_group("all", 100.0)], 60, 70.0)
            .expect("valid composition")
    }

    #[test]
    fn registry_keeps_insertion_order_and_replaces_ids() {
        let mut registry: CompositionRegistry =
            [composition("aws_saa_c03"), composition("ckad_2025")]
                .into_iter()
                .collect();
        assert_eq!(registry.len(), 2);
        registry.insert(composition("aws_saa_c03"));
        assert_eq!(registry.len(), 2);
        let ids: Vec<&str> = registry.ids().map(|id| id.as_str()).collect();
        assert_eq!(ids, vec!["aws_saa_c03", "ckad_2025"]);
        assert!(registry.get("ckad_2025").is_some());
        assert!(registry.get("missing").is_none());
    }
}
