use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use gridview::TableRow;

use super::Resource;
use crate::error::ApiError;
use crate::model::Record;

type Creator<T> = Arc<dyn Fn(String, &<T as Record>::Draft) -> T + Send + Sync>;
type Toggler<T> = Arc<dyn Fn(&mut T) + Send + Sync>;

/// In-process [`Resource`] over a vector of records.
///
/// Counts calls per operation and can be told to fail the next call, which
/// makes it the data layer for tests and offline demos.
pub struct MemoryResource<T: Record> {
    rows: Mutex<Vec<T>>,
    calls: Mutex<HashMap<&'static str, usize>>,
    failure: Mutex<Option<(Option<String>, ApiError)>>,
    next_id: AtomicUsize,
    creator: Option<Creator<T>>,
    toggler: Option<Toggler<T>>,
}

impl<T: Record> MemoryResource<T> {
    pub fn new(rows: Vec<T>) -> Self {
        Self {
            next_id: AtomicUsize::new(rows.len() + 1),
            rows: Mutex::new(rows),
            calls: Mutex::new(HashMap::new()),
            failure: Mutex::new(None),
            creator: None,
            toggler: None,
        }
    }

    /// Builds records for `create` and `update` from a draft and an id.
    pub fn with_creator(
        mut self,
        f: impl Fn(String, &T::Draft) -> T + Send + Sync + 'static,
    ) -> Self {
        self.creator = Some(Arc::new(f));
        self
    }

    /// Flips a record's status for `toggle`.
    pub fn with_toggler(mut self, f: impl Fn(&mut T) + Send + Sync + 'static) -> Self {
        self.toggler = Some(Arc::new(f));
        self
    }

    /// The next call of any operation fails with `error`.
    pub fn fail_next(&self, error: ApiError) {
        *lock(&self.failure) = Some((None, error));
    }

    /// The next call of `operation` fails with `error`.
    pub fn fail_on(&self, operation: &str, error: ApiError) {
        *lock(&self.failure) = Some((Some(operation.to_string()), error));
    }

    /// Number of calls made to `operation` (`"list"`, `"delete"`, ...).
    pub fn calls(&self, operation: &str) -> usize {
        lock(&self.calls).get(operation).copied().unwrap_or(0)
    }

    /// Current contents.
    pub fn rows(&self) -> Vec<T> {
        lock(&self.rows).clone()
    }

    fn enter(&self, operation: &'static str) -> Result<(), ApiError> {
        *lock(&self.calls).entry(operation).or_default() += 1;
        let mut failure = lock(&self.failure);
        let applies = match &*failure {
            Some((None, _)) => true,
            Some((Some(target), _)) => target == operation,
            None => false,
        };
        match failure.take_if(|_| applies) {
            Some((_, error)) => Err(error),
            None => Ok(()),
        }
    }

    fn unsupported(operation: &str) -> ApiError {
        ApiError::http(405, format!("{} does not support {}", T::KIND, operation))
    }

    fn not_found(id: &str) -> ApiError {
        ApiError::not_found(T::KIND.singular(), id)
    }
}

fn lock<V>(mutex: &Mutex<V>) -> MutexGuard<'_, V> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[async_trait]
impl<T: Record> Resource<T> for MemoryResource<T> {
    async fn list(&self) -> Result<Vec<T>, ApiError> {
        self.enter("list")?;
        Ok(self.rows())
    }

    async fn get(&self, id: &str) -> Result<T, ApiError> {
        self.enter("get")?;
        lock(&self.rows)
            .iter()
            .find(|row| row.id() == id)
            .cloned()
            .ok_or_else(|| Self::not_found(id))
    }

    async fn create(&self, draft: &T::Draft) -> Result<T, ApiError> {
        self.enter("create")?;
        let creator = self.creator.as_ref().ok_or_else(|| Self::unsupported("create"))?;
        let id = self.next_id.fetch_add(1, Ordering::Relaxed).to_string();
        let row = creator(id, draft);
        lock(&self.rows).push(row.clone());
        Ok(row)
    }

    async fn update(&self, id: &str, draft: &T::Draft) -> Result<T, ApiError> {
        self.enter("update")?;
        let creator = self.creator.as_ref().ok_or_else(|| Self::unsupported("update"))?;
        let mut rows = lock(&self.rows);
        let slot = rows
            .iter_mut()
            .find(|row| row.id() == id)
            .ok_or_else(|| Self::not_found(id))?;
        *slot = creator(id.to_string(), draft);
        Ok(slot.clone())
    }

    async fn delete(&self, id: &str) -> Result<(), ApiError> {
        self.enter("delete")?;
        let mut rows = lock(&self.rows);
        let before = rows.len();
        rows.retain(|row| row.id() != id);
        if rows.len() == before {
            return Err(Self::not_found(id));
        }
        Ok(())
    }

    async fn toggle(&self, id: &str) -> Result<T, ApiError> {
        self.enter("toggle")?;
        let toggler = self.toggler.as_ref().ok_or_else(|| Self::unsupported("toggle"))?;
        let mut rows = lock(&self.rows);
        let row = rows
            .iter_mut()
            .find(|row| row.id() == id)
            .ok_or_else(|| Self::not_found(id))?;
        toggler(row);
        Ok(row.clone())
    }
}
