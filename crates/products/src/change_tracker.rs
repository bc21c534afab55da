use std::collections::BTreeSet;

/// Persisted attributes of a `Product` that can change after creation.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ProductField {
    Name,
    Description,
    Category,
    Status,
    Discount,
    ArchivedAt,
}

impl ProductField {
    pub const ALL: [ProductField; 6] = [
        ProductField::Name,
        ProductField::Description,
        ProductField::Category,
        ProductField::Status,
        ProductField::Discount,
        ProductField::ArchivedAt,
    ];
}

/// Dirty-field set driving partial updates.
///
/// Empty after hydration; mutators mark every field they actually change.
/// Persistence reads the set to build the minimal update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeTracker {
    dirty: BTreeSet<ProductField>,
}

impl ChangeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mark_dirty(&mut self, field: ProductField) {
        self.dirty.insert(field);
    }

    pub fn is_dirty(&self, field: ProductField) -> bool {
        self.dirty.contains(&field)
    }

    pub fn any(&self) -> bool {
        !self.dirty.is_empty()
    }

    pub fn len(&self) -> usize {
        self.dirty.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dirty.is_empty()
    }

    /// Dirty fields in declaration order.
    pub fn dirty_fields(&self) -> impl Iterator<Item = ProductField> + '_ {
        self.dirty.iter().copied()
    }

    pub fn clear(&mut self) {
        self.dirty.clear();
    }
}
