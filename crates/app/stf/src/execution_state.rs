use crate::errors::{
    ERR_INVALID_CHECKPOINT, ERR_KEY_TOO_LARGE, ERR_OVERLAY_SIZE_EXCEEDED, ERR_VALUE_TOO_LARGE,
};
use evolve_core::{Checkpoint, ErrorCode, ReadonlyKV, SdkResult};
use evolve_stf_traits::StateChange;
use std::collections::BTreeMap;

// Limits to prevent memory exhaustion
const MAX_OVERLAY_ENTRIES: usize = 100_000;
const MAX_KEY_SIZE: usize = 256;
const MAX_VALUE_SIZE: usize = 1024 * 1024;

/// One overlay change, recorded so it can be undone.
#[derive(Debug)]
struct UndoEntry {
    key: Vec<u8>,
    /// The overlay entry before the change; `None` when the key had no overlay entry.
    /// `Some(None)` is a tombstone.
    previous: Option<Option<Vec<u8>>>,
}

impl UndoEntry {
    fn revert(self, overlay: &mut BTreeMap<Vec<u8>, Option<Vec<u8>>>) {
        match self.previous {
            Some(previous) => {
                overlay.insert(self.key, previous);
            }
            None => {
                overlay.remove(&self.key);
            }
        }
    }
}

/// The checkpointed overlay for a read-only store `S`.
///
/// The overlay maps a key to:
///  - `Some(value)` => key is set to `value`
///  - `None` => key is removed (tombstone)
///  - no entry => fall back to the underlying store
///
/// The overlay is ordered so that [`ExecutionState::into_changes`] is deterministic.
#[derive(Debug)]
pub struct ExecutionState<'a, S> {
    base_storage: &'a S,
    overlay: BTreeMap<Vec<u8>, Option<Vec<u8>>>,
    undo_log: Vec<UndoEntry>,
}

const INITIAL_UNDO_LOG_CAPACITY: usize = 128;

impl<'a, S> ExecutionState<'a, S> {
    pub fn new(base_storage: &'a S) -> Self {
        Self {
            base_storage,
            overlay: BTreeMap::new(),
            undo_log: Vec::with_capacity(INITIAL_UNDO_LOG_CAPACITY),
        }
    }

    /// Number of keys touched since creation.
    pub fn overlay_len(&self) -> usize {
        self.overlay.len()
    }

    pub fn into_changes(self) -> Vec<StateChange> {
        self.overlay
            .into_iter()
            .map(|(key, maybe_value)| match maybe_value {
                Some(value) => StateChange::Set { key, value },
                None => StateChange::Remove { key },
            })
            .collect()
    }
}

impl<S: ReadonlyKV> ExecutionState<'_, S> {
    /// Retrieves the logical value of `key`: the overlay first, then the base store.
    pub fn get(&self, key: &[u8]) -> SdkResult<Option<Vec<u8>>> {
        match self.overlay.get(key) {
            Some(entry) => Ok(entry.clone()),
            None => self.base_storage.get(key),
        }
    }

    /// Sets `key` to `value`, recording the previous overlay entry for undo.
    pub fn set(&mut self, key: &[u8], value: Vec<u8>) -> Result<(), ErrorCode> {
        if value.len() > MAX_VALUE_SIZE {
            return Err(ERR_VALUE_TOO_LARGE);
        }
        self.record(key)?;
        self.overlay.insert(key.to_vec(), Some(value));
        Ok(())
    }

    /// Removes `key` from the logical store by writing a tombstone.
    pub fn remove(&mut self, key: &[u8]) -> Result<(), ErrorCode> {
        self.record(key)?;
        self.overlay.insert(key.to_vec(), None);
        Ok(())
    }

    fn record(&mut self, key: &[u8]) -> Result<(), ErrorCode> {
        if key.len() > MAX_KEY_SIZE {
            return Err(ERR_KEY_TOO_LARGE);
        }
        let previous = self.overlay.get(key).cloned();
        if previous.is_none() && self.overlay.len() >= MAX_OVERLAY_ENTRIES {
            return Err(ERR_OVERLAY_SIZE_EXCEEDED);
        }
        self.undo_log.push(UndoEntry {
            key: key.to_vec(),
            previous,
        });
        Ok(())
    }

    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint::new(self.undo_log.len())
    }

    /// Restores the overlay to `checkpoint` by popping changes off the undo log.
    pub fn restore(&mut self, checkpoint: Checkpoint) -> Result<(), ErrorCode> {
        if checkpoint.marker() > self.undo_log.len() {
            return Err(ERR_INVALID_CHECKPOINT);
        }
        for change in self.undo_log.drain(checkpoint.marker()..).rev() {
            change.revert(&mut self.overlay);
        }
        Ok(())
    }
}

impl<S: ReadonlyKV> ReadonlyKV for ExecutionState<'_, S> {
    fn get(&self, key: &[u8]) -> SdkResult<Option<Vec<u8>>> {
        ExecutionState::get(self, key)
    }
}
