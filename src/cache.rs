//! Per-document cache of element types and levels.

use std::collections::HashMap;

use crate::host::{ElementType, Level, TypeCatalog};
use crate::naming::NaturalOrder;

/// Caller-supplied identifier of an open document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DocumentId(pub u64);

#[derive(Debug, Default)]
struct Entry {
    wall_types: Option<Vec<ElementType>>,
    floor_types: Option<Vec<ElementType>>,
    ceiling_types: Option<Vec<ElementType>>,
    levels: Option<Vec<Level>>,
}

/// Lazily filled type and level lists, one entry per document.
///
/// Type lists are sorted naturally by name; levels keep catalog order.
#[derive(Debug, Default)]
pub struct TypeCache {
    order: NaturalOrder,
    entries: HashMap<DocumentId, Entry>,
}

impl TypeCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses `order` to sort type names.
    #[must_use]
    pub fn with_order(order: NaturalOrder) -> Self {
        Self {
            order,
            entries: HashMap::new(),
        }
    }

    pub fn wall_types<C: TypeCatalog + ?Sized>(
        &mut self,
        doc: DocumentId,
        catalog: &C,
    ) -> &[ElementType] {
        let order = &self.order;
        let entry = self.entries.entry(doc).or_default();
        entry
            .wall_types
            .get_or_insert_with(|| sorted(order, catalog.wall_types()))
    }

    pub fn floor_types<C: TypeCatalog + ?Sized>(
        &mut self,
        doc: DocumentId,
        catalog: &C,
    ) -> &[ElementType] {
        let order = &self.order;
        let entry = self.entries.entry(doc).or_default();
        entry
            .floor_types
            .get_or_insert_with(|| sorted(order, catalog.floor_types()))
    }

    pub fn ceiling_types<C: TypeCatalog + ?Sized>(
        &mut self,
        doc: DocumentId,
        catalog: &C,
    ) -> &[ElementType] {
        let order = &self.order;
        let entry = self.entries.entry(doc).or_default();
        entry
            .ceiling_types
            .get_or_insert_with(|| sorted(order, catalog.ceiling_types()))
    }

    pub fn levels<C: TypeCatalog + ?Sized>(&mut self, doc: DocumentId, catalog: &C) -> &[Level] {
        let entry = self.entries.entry(doc).or_default();
        entry.levels.get_or_insert_with(|| catalog.levels())
    }

    /// Drops everything cached for `doc`.
    pub fn invalidate(&mut self, doc: DocumentId) {
        self.entries.remove(&doc);
    }

    #[must_use]
    pub fn contains(&self, doc: DocumentId) -> bool {
        self.entries.contains_key(&doc)
    }
}

fn sorted(order: &NaturalOrder, mut types: Vec<ElementType>) -> Vec<ElementType> {
    order.sort_by_key(&mut types, |t| t.name.as_str());
    types
}

/// Finds the type named `name`, falling back to the first one.
#[must_use]
pub fn type_or_first<'a>(types: &'a [ElementType], name: &str) -> Option<&'a ElementType> {
    types.iter().find(|t| t.name == name).or_else(|| types.first())
}

/// Finds the level named `name`, falling back to the first one.
#[must_use]
pub fn level_or_first<'a>(levels: &'a [Level], name: &str) -> Option<&'a Level> {
    levels.iter().find(|l| l.name == name).or_else(|| levels.first())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::host::MemoryHost;

    #[test]
    fn types_are_sorted_naturally_and_cached() {
        let mut host = MemoryHost::new();
        host.add_wall_type("Finish 10", 0.01);
        host.add_wall_type("Finish 2", 0.02);
        host.add_wall_type("Basic 200", 0.2);

        let doc = DocumentId(1);
        let mut cache = TypeCache::new();
        let names: Vec<_> = cache
            .wall_types(doc, &host)
            .iter()
            .map(|t| t.name.clone())
            .collect();
        assert_eq!(names, vec!["Basic 200", "Finish 2", "Finish 10"]);

        // Later additions are not seen until the entry is invalidated.
        host.add_wall_type("Finish 1", 0.01);
        assert_eq!(cache.wall_types(doc, &host).len(), 3);
        cache.invalidate(doc);
        assert!(!cache.contains(doc));
        assert_eq!(cache.wall_types(doc, &host).len(), 4);
    }

    #[test]
    fn documents_are_independent() {
        let mut first = MemoryHost::new();
        first.add_level("Level 0", 0.0);
        let second = MemoryHost::new();

        let mut cache = TypeCache::new();
        assert_eq!(cache.levels(DocumentId(1), &first).len(), 1);
        assert!(cache.levels(DocumentId(2), &second).is_empty());
        cache.invalidate(DocumentId(2));
        assert!(cache.contains(DocumentId(1)));
    }

    #[test]
    fn lookup_falls_back_to_first() {
        let mut host = MemoryHost::new();
        host.add_ceiling_type("Plaster");
        host.add_ceiling_type("ACTCeiling");
        let mut cache = TypeCache::new();
        let types = cache.ceiling_types(DocumentId(7), &host);
        assert_eq!(type_or_first(types, "ACTCeiling").unwrap().name, "ACTCeiling");
        assert_eq!(type_or_first(types, "Gypsum").unwrap().name, "ACTCeiling");
        assert!(level_or_first(&[], "Level 0").is_none());
    }

    #[test]
    fn custom_order_sorts_case_sensitively() {
        let mut host = MemoryHost::new();
        host.add_floor_type("a slab");
        host.add_floor_type("B slab");

        let names = |cache: &mut TypeCache| -> Vec<String> {
            cache
                .floor_types(DocumentId(1), &host)
                .iter()
                .map(|t| t.name.clone())
                .collect()
        };
        assert_eq!(names(&mut TypeCache::new()), ["a slab", "B slab"]);
        let mut strict = TypeCache::with_order(NaturalOrder::new().ignore_case(false));
        assert_eq!(names(&mut strict), ["B slab", "a slab"]);
    }
}
