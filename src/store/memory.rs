use std::collections::HashMap;
use std::io;

use serde_json::Value;

use super::{KeyValueStore, Result, StoreError};

/// In-memory store with optional write failure injection
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: HashMap<String, Value>,
    fail_writes: bool,
    /// Writes still allowed before `set` starts failing
    writes_left: Option<usize>,
    write_count: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent `set` fail with an I/O error
    pub fn set_fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }

    /// Allow `writes` more successful writes, then fail every later one
    pub fn fail_after_writes(&mut self, writes: usize) {
        self.writes_left = Some(writes);
    }

    /// Number of successful writes so far
    pub fn write_count(&self) -> usize {
        self.write_count
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: Value) -> Result<()> {
        self.set_many(vec![(key, value)])
    }

    fn set_many(&mut self, values: Vec<(&str, Value)>) -> Result<()> {
        if self.fail_writes || self.writes_left == Some(0) {
            return Err(StoreError::Io(io::Error::other("simulated write failure")));
        }
        if let Some(left) = self.writes_left.as_mut() {
            *left -= 1;
        }
        for (key, value) in values {
            self.values.insert(key.to_string(), value);
        }
        self.write_count += 1;
        Ok(())
    }
}
