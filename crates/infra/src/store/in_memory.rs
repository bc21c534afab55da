use std::any::Any;
use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use serde_json::Value as JsonValue;

use crate::contracts::RepositoryError;
use crate::models::{self, Row};
use crate::unit_of_work::{CommitError, Committer, Mutation, Plan};

/// Tables known to the in-memory database.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Table {
    Products,
    OutboxEvents,
}

impl Table {
    pub fn name(self) -> &'static str {
        match self {
            Table::Products => models::product::TABLE,
            Table::OutboxEvents => models::outbox::TABLE,
        }
    }

    pub fn key_column(self) -> &'static str {
        match self {
            Table::Products => models::product::PRODUCT_ID,
            Table::OutboxEvents => models::outbox::EVENT_ID,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum WriteOp {
    /// Fails if the key already exists.
    Insert,
    /// Overwrites the given columns of an existing row; fails if it is missing.
    Update,
}

/// The mutation kind `InMemoryDatabase` knows how to apply.
#[derive(Debug, Clone, PartialEq)]
pub struct StoreMutation {
    op: WriteOp,
    table: Table,
    row: Row,
}

impl StoreMutation {
    pub fn insert(table: Table, row: Row) -> Self {
        Self {
            op: WriteOp::Insert,
            table,
            row,
        }
    }

    pub fn update(table: Table, row: Row) -> Self {
        Self {
            op: WriteOp::Update,
            table,
            row,
        }
    }

    pub fn op(&self) -> WriteOp {
        self.op
    }

    pub fn table(&self) -> Table {
        self.table
    }

    pub fn row(&self) -> &Row {
        &self.row
    }

    pub fn boxed(self) -> Box<dyn Mutation> {
        Box::new(self)
    }

    fn key(&self) -> Result<String, CommitError> {
        self.row
            .get(self.table.key_column())
            .and_then(JsonValue::as_str)
            .map(str::to_string)
            .ok_or(CommitError::MissingKey {
                table: self.table.name(),
            })
    }
}

impl Mutation for StoreMutation {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Insertion-ordered rows with a key index.
#[derive(Debug, Clone, Default)]
struct TableData {
    rows: Vec<Row>,
    index: HashMap<String, usize>,
}

impl TableData {
    fn get(&self, key: &str) -> Option<&Row> {
        self.index.get(key).map(|&i| &self.rows[i])
    }

    fn write(&mut self, mutation: &StoreMutation) -> Result<(), CommitError> {
        let key = mutation.key()?;
        let table = mutation.table.name();

        match mutation.op {
            WriteOp::Insert => {
                if self.index.contains_key(&key) {
                    return Err(CommitError::DuplicateKey { table, key });
                }
                self.index.insert(key, self.rows.len());
                self.rows.push(mutation.row.clone());
            }
            WriteOp::Update => {
                let Some(&i) = self.index.get(&key) else {
                    return Err(CommitError::MissingRow { table, key });
                };
                let existing = &mut self.rows[i];
                for (column, value) in &mutation.row {
                    existing.insert(column.clone(), value.clone());
                }
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
struct Tables {
    products: TableData,
    outbox_events: TableData,
}

impl Tables {
    fn table(&self, table: Table) -> &TableData {
        match table {
            Table::Products => &self.products,
            Table::OutboxEvents => &self.outbox_events,
        }
    }

    fn table_mut(&mut self, table: Table) -> &mut TableData {
        match table {
            Table::Products => &mut self.products,
            Table::OutboxEvents => &mut self.outbox_events,
        }
    }
}

/// In-memory, multi-table store with atomic plan application.
///
/// Intended for tests/dev. Not optimized for performance: every commit stages
/// its writes on a copy of the tables and swaps the copy in only when all of
/// them succeeded.
#[derive(Debug, Default)]
pub struct InMemoryDatabase {
    tables: RwLock<Tables>,
}

impl InMemoryDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, table: Table, key: &str) -> Result<Option<Row>, RepositoryError> {
        let tables = self.tables.read().map_err(|_| RepositoryError::Poisoned)?;
        Ok(tables.table(table).get(key).cloned())
    }

    /// All rows of `table`, in insertion order.
    pub fn scan(&self, table: Table) -> Result<Vec<Row>, RepositoryError> {
        let tables = self.tables.read().map_err(|_| RepositoryError::Poisoned)?;
        Ok(tables.table(table).rows.clone())
    }

    pub fn row_count(&self, table: Table) -> usize {
        self.tables
            .read()
            .map(|tables| tables.table(table).rows.len())
            .unwrap_or(0)
    }
}

#[async_trait]
impl Committer for InMemoryDatabase {
    async fn apply(&self, plan: Plan) -> Result<(), CommitError> {
        if plan.is_empty() {
            return Ok(());
        }

        // Reject foreign mutation kinds before touching any table.
        let writes = plan
            .mutations()
            .iter()
            .map(|m| {
                m.as_any()
                    .downcast_ref::<StoreMutation>()
                    .ok_or(CommitError::UnsupportedMutation(m.kind()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut tables = self.tables.write().map_err(|_| CommitError::Poisoned)?;
        let mut staged = tables.clone();
        for write in &writes {
            staged.table_mut(write.table).write(write)?;
        }
        *tables = staged;

        tracing::debug!(mutations = writes.len(), "plan committed");
        Ok(())
    }
}
