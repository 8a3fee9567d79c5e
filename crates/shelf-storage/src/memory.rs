use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use shelf_core::{Fields, Record, Result, Schema, StoreError};

use crate::store::{ResourceStore, UpdateMode};

/// Mutable store state guarded by a single lock.
///
/// `records` and `next_id` always change together (id assignment is a
/// read-modify-write sequence), so they share one critical section.
#[derive(Debug, Default)]
struct StoreState {
    /// Records in insertion order. Order is observable through `list`.
    records: Vec<Record>,
    /// Monotonically increasing id counter. Never decreases, survives
    /// deletions, never reuses an id.
    next_id: u64,
}

impl StoreState {
    fn position(&self, id: u64) -> Option<usize> {
        self.records.iter().position(|r| r.id == id)
    }
}

/// In-memory Shelf store backend.
///
/// Records live in a `Vec` behind one `tokio::sync::RwLock`: every mutation
/// takes the write lock for its whole read-modify-write sequence, reads
/// share the read lock and can never observe a record mid-construction.
/// The store does no network or disk I/O and holds no state outside this
/// process.
#[derive(Debug)]
pub struct MemoryStore {
    schema: Schema,
    inner: RwLock<StoreState>,
}

impl MemoryStore {
    /// Creates an empty store; the first created record gets id 1.
    pub fn new(schema: Schema) -> Self {
        Self {
            schema,
            inner: RwLock::new(StoreState {
                records: Vec::new(),
                next_id: 1,
            }),
        }
    }

    /// Creates a store pre-populated with seed records.
    ///
    /// Seed ids must be strictly positive and unique; seed fields must pass
    /// the schema's create validation (defaults are filled in). `next_id`
    /// starts one past the highest seed id, so seeded ids are never handed
    /// out again.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Validation` for a non-positive seed id, an id of
    /// `u64::MAX` (no successor id exists), or schema-invalid seed fields,
    /// and `StoreError::Conflict` for a duplicated seed id.
    pub fn with_seed(schema: Schema, seed: Vec<Record>) -> Result<Self> {
        let mut records = Vec::with_capacity(seed.len());
        let mut next_id = 1;

        for record in seed {
            if record.id == 0 {
                return Err(StoreError::validation("seed record id must be positive"));
            }
            if records.iter().any(|r: &Record| r.id == record.id) {
                return Err(StoreError::conflict(&schema.resource_type, record.id));
            }
            let fields = schema.validate_create(&record.fields)?;
            let successor = record.id.checked_add(1).ok_or_else(|| {
                StoreError::validation("seed record id leaves no room for new ids")
            })?;
            records.push(Record::with_fields(record.id, fields));
            next_id = next_id.max(successor);
        }

        Ok(Self {
            schema,
            inner: RwLock::new(StoreState { records, next_id }),
        })
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub async fn list(&self) -> Vec<Record> {
        let state = self.inner.read().await;
        state.records.clone()
    }

    pub async fn get(&self, id: u64) -> Result<Record> {
        let state = self.inner.read().await;
        state
            .position(id)
            .map(|pos| state.records[pos].clone())
            .ok_or_else(|| StoreError::not_found(&self.schema.resource_type, id))
    }

    pub async fn create(&self, fields: &Fields) -> Result<Record> {
        // Validation is all-or-nothing and needs no lock; the schema is
        // immutable for the store's lifetime.
        let fields = self.schema.validate_create(fields)?;

        let mut state = self.inner.write().await;

        // Id assignment and insertion form one atomic step under the write
        // lock. A collision here means the counter went backwards.
        let id = state.next_id;
        state.next_id += 1;
        debug_assert!(state.position(id).is_none(), "generated id {id} collides");

        let record = Record::with_fields(id, fields);
        state.records.push(record.clone());

        debug!(resource_type = %self.schema.resource_type, id, "created record");
        Ok(record)
    }

    pub async fn update(&self, id: u64, fields: &Fields, mode: UpdateMode) -> Result<Record> {
        let mut state = self.inner.write().await;

        // Existence wins over payload problems: updating a missing id is
        // NotFound even when the body would not validate.
        let pos = state
            .position(id)
            .ok_or_else(|| StoreError::not_found(&self.schema.resource_type, id))?;

        let patch = self.schema.validate_patch(fields)?;

        let record = &mut state.records[pos];
        match mode {
            UpdateMode::Merge => {
                for (name, value) in patch {
                    record.set_field(name, value);
                }
            }
            UpdateMode::Replace => {
                let mut fields = Fields::new();
                for spec in &self.schema.fields {
                    let value = patch
                        .get(&spec.name)
                        .or_else(|| record.get_field(&spec.name))
                        .cloned()
                        .or_else(|| spec.default.clone());
                    if let Some(value) = value {
                        fields.insert(spec.name.clone(), value);
                    }
                }
                record.fields = fields;
            }
        }

        debug!(resource_type = %self.schema.resource_type, id, ?mode, "updated record");
        Ok(record.clone())
    }

    pub async fn delete(&self, id: u64) -> Result<()> {
        let mut state = self.inner.write().await;

        // Existence is checked first: deleting a missing id reports
        // NotFound, never silent success.
        let pos = state
            .position(id)
            .ok_or_else(|| StoreError::not_found(&self.schema.resource_type, id))?;
        state.records.remove(pos);

        debug!(resource_type = %self.schema.resource_type, id, "deleted record");
        Ok(())
    }

    pub async fn count(&self) -> usize {
        let state = self.inner.read().await;
        state.records.len()
    }

    pub async fn exists(&self, id: u64) -> bool {
        let state = self.inner.read().await;
        state.position(id).is_some()
    }
}

// Implement the ResourceStore trait by delegating to the inherent methods.
#[async_trait]
impl ResourceStore for MemoryStore {
    fn schema(&self) -> &Schema {
        MemoryStore::schema(self)
    }

    async fn list(&self) -> Vec<Record> {
        MemoryStore::list(self).await
    }

    async fn get(&self, id: u64) -> Result<Record> {
        MemoryStore::get(self, id).await
    }

    async fn create(&self, fields: &Fields) -> Result<Record> {
        MemoryStore::create(self, fields).await
    }

    async fn update(&self, id: u64, fields: &Fields, mode: UpdateMode) -> Result<Record> {
        MemoryStore::update(self, id, fields, mode).await
    }

    async fn delete(&self, id: u64) -> Result<()> {
        MemoryStore::delete(self, id).await
    }

    async fn count(&self) -> usize {
        MemoryStore::count(self).await
    }

    async fn exists(&self, id: u64) -> bool {
        MemoryStore::exists(self, id).await
    }
}
