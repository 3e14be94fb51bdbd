//! In-memory adapters for tests and ephemeral nodes.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::RwLock;

use crate::domain::errors::KVStoreError;
use crate::ports::outbound::{KeyValueStore, KvIterator};

/// Ordered in-memory key-value store.
///
/// Iterators work on a copy of the requested range taken at creation, so
/// deleting while iterating is safe.
#[derive(Debug, Default)]
pub struct InMemoryKVStore {
    data: RwLock<BTreeMap<Vec<u8>, Vec<u8>>>,
}

impl InMemoryKVStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.data.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.read().is_empty()
    }

    /// All keys starting with `prefix`, in order.
    pub fn keys_with_prefix(&self, prefix: &[u8]) -> Vec<Vec<u8>> {
        self.data
            .read()
            .range(prefix.to_vec()..)
            .take_while(|(k, _)| k.starts_with(prefix))
            .map(|(k, _)| k.clone())
            .collect()
    }
}

impl KeyValueStore for InMemoryKVStore {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, KVStoreError> {
        Ok(self.data.read().get(key).cloned())
    }

    fn put(&self, key: &[u8], value: &[u8]) -> Result<(), KVStoreError> {
        self.data.write().insert(key.to_vec(), value.to_vec());
        Ok(())
    }

    fn delete(&self, key: &[u8]) -> Result<(), KVStoreError> {
        self.data.write().remove(key);
        Ok(())
    }

    fn new_iterator<'a>(&'a self, prefix: &[u8], start: &[u8]) -> Box<dyn KvIterator + 'a> {
        let mut seek = prefix.to_vec();
        seek.extend_from_slice(start);

        let entries: Vec<(Vec<u8>, Vec<u8>)> = self
            .data
            .read()
            .range(seek..)
            .take_while(|(k, _)| k.starts_with(prefix))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();

        Box::new(SnapshotIterator::new(entries))
    }
}

/// Iterator over a pre-collected range.
pub struct SnapshotIterator {
    remaining: std::vec::IntoIter<(Vec<u8>, Vec<u8>)>,
    current: Option<(Vec<u8>, Vec<u8>)>,
    error: Option<KVStoreError>,
}

impl SnapshotIterator {
    fn new(entries: Vec<(Vec<u8>, Vec<u8>)>) -> Self {
        Self {
            remaining: entries.into_iter(),
            current: None,
            error: None,
        }
    }

    /// Iterator that yields nothing and reports `error`.
    fn failed(error: KVStoreError) -> Self {
        Self {
            remaining: Vec::new().into_iter(),
            current: None,
            error: Some(error),
        }
    }
}

impl KvIterator for SnapshotIterator {
    fn next(&mut self) -> bool {
        self.current = self.remaining.next();
        self.current.is_some()
    }

    fn key(&self) -> &[u8] {
        self.current.as_ref().map(|(k, _)| k.as_slice()).unwrap_or(&[])
    }

    fn value(&self) -> &[u8] {
        self.current.as_ref().map(|(_, v)| v.as_slice()).unwrap_or(&[])
    }

    fn error(&self) -> Option<KVStoreError> {
        self.error.clone()
    }
}

/// Store wrapper whose writes, deletes and iteration can be made to fail.
///
/// Reads always pass through.
#[derive(Debug, Default)]
pub struct FaultInjectingStore<S> {
    inner: S,
    fail_writes: AtomicBool,
    fail_deletes: AtomicBool,
    fail_iteration: AtomicBool,
}

impl<S: KeyValueStore> FaultInjectingStore<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            fail_writes: AtomicBool::new(false),
            fail_deletes: AtomicBool::new(false),
            fail_iteration: AtomicBool::new(false),
        }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_deletes(&self, fail: bool) {
        self.fail_deletes.store(fail, Ordering::SeqCst);
    }

    /// Iterators created while set yield nothing and report an I/O error.
    pub fn set_fail_iteration(&self, fail: bool) {
        self.fail_iteration.store(fail, Ordering::SeqCst);
    }
}

impl<S: KeyValueStore> KeyValueStore for FaultInjectingStore<S> {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, KVStoreError> {
        self.inner.get(key)
    }

    fn put(&self, key: &[u8], value: &[u8]) -> Result<(), KVStoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(KVStoreError::IOError {
                message: "injected write failure".to_string(),
            });
        }
        self.inner.put(key, value)
    }

    fn delete(&self, key: &[u8]) -> Result<(), KVStoreError> {
        if self.fail_deletes.load(Ordering::SeqCst) {
            return Err(KVStoreError::IOError {
                message: "injected delete failure".to_string(),
            });
        }
        self.inner.delete(key)
    }

    fn new_iterator<'a>(&'a self, prefix: &[u8], start: &[u8]) -> Box<dyn KvIterator + 'a> {
        if self.fail_iteration.load(Ordering::SeqCst) {
            return Box::new(SnapshotIterator::failed(KVStoreError::IOError {
                message: "injected iterator failure".to_string(),
            }));
        }
        self.inner.new_iterator(prefix, start)
    }
}
