use super::mutation::Mutation;

/// Ordered, append-only list of mutations produced by one operation.
///
/// Consumed by `Committer::apply`, so a plan can be applied at most once.
#[derive(Debug, Default)]
pub struct Plan {
    mutations: Vec<Box<dyn Mutation>>,
}

impl Plan {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a mutation. `None` is ignored, so "nothing to write" results from
    /// repositories can be added unconditionally.
    pub fn add(&mut self, mutation: impl Into<Option<Box<dyn Mutation>>>) {
        if let Some(mutation) = mutation.into() {
            self.mutations.push(mutation);
        }
    }

    /// Mutations in the order they were added.
    pub fn mutations(&self) -> &[Box<dyn Mutation>] {
        &self.mutations
    }

    pub fn len(&self) -> usize {
        self.mutations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mutations.is_empty()
    }
}
