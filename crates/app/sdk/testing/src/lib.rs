//! Testing utilities for the authentication pipeline.

// Testing code - determinism requirements do not apply.
#![allow(clippy::disallowed_types)]

pub mod keepers;
pub mod tx;

pub use keepers::{MemoryAccountKeeper, RecordingContractKeeper, RecordingVerifier, SudoCall};
pub use tx::{handle_store, MockTx, MsgSend, MsgStore, ERR_STORE_FAILED};

use evolve_core::{
    BlockContext, Checkpoint, Environment, ReadonlyKV, SdkResult, ERR_INVALID_CHECKPOINT,
};
use evolve_stf_traits::{StateChange, WritableKV};
use sha2::{Digest, Sha256};
use std::collections::HashMap;

/// Signature scheme used by mock contracts: `sha256(sign_bytes)`.
pub fn mock_signature(sign_bytes: &[u8]) -> Vec<u8> {
    Sha256::digest(sign_bytes).to_vec()
}

/// Environment backed by a hash map with a simple undo journal.
#[derive(Default)]
pub struct MockEnv {
    state: HashMap<Vec<u8>, Vec<u8>>,
    journal: Vec<(Vec<u8>, Option<Vec<u8>>)>,
    block_height: u64,
}

impl MockEnv {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_block_height(self, block_height: u64) -> Self {
        Self {
            block_height,
            ..self
        }
    }

    pub fn with_state(mut self, key: &[u8], value: Vec<u8>) -> Self {
        self.state.insert(key.to_vec(), value);
        self
    }

    pub fn value(&self, key: &[u8]) -> Option<&Vec<u8>> {
        self.state.get(key)
    }
}

impl Environment for MockEnv {
    fn block(&self) -> BlockContext {
        BlockContext::new(self.block_height, 0)
    }

    fn get(&self, key: &[u8]) -> SdkResult<Option<Vec<u8>>> {
        Ok(self.state.get(key).cloned())
    }

    fn set(&mut self, key: &[u8], value: Vec<u8>) -> SdkResult<()> {
        let previous = self.state.insert(key.to_vec(), value);
        self.journal.push((key.to_vec(), previous));
        Ok(())
    }

    fn remove(&mut self, key: &[u8]) -> SdkResult<()> {
        let previous = self.state.remove(key);
        self.journal.push((key.to_vec(), previous));
        Ok(())
    }

    fn checkpoint(&self) -> Checkpoint {
        Checkpoint::new(self.journal.len())
    }

    fn restore(&mut self, checkpoint: Checkpoint) -> SdkResult<()> {
        if checkpoint.marker() > self.journal.len() {
            return Err(ERR_INVALID_CHECKPOINT);
        }
        while self.journal.len() > checkpoint.marker() {
            let Some((key, previous)) = self.journal.pop() else {
                break;
            };
            match previous {
                Some(value) => self.state.insert(key, value),
                None => self.state.remove(&key),
            };
        }
        Ok(())
    }
}

/// Committed key-value store for driving the state transition function in tests.
#[derive(Default, Clone, Debug)]
pub struct InMemoryStorage {
    data: HashMap<Vec<u8>, Vec<u8>>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: &[u8], value: Vec<u8>) {
        self.data.insert(key.to_vec(), value);
    }

    pub fn value(&self, key: &[u8]) -> Option<&Vec<u8>> {
        self.data.get(key)
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl ReadonlyKV for InMemoryStorage {
    fn get(&self, key: &[u8]) -> SdkResult<Option<Vec<u8>>> {
        Ok(self.data.get(key).cloned())
    }
}

impl WritableKV for InMemoryStorage {
    fn apply_changes(&mut self, changes: Vec<StateChange>) -> SdkResult<()> {
        for change in changes {
            match change {
                StateChange::Set { key, value } => {
                    self.data.insert(key, value);
                }
                StateChange::Remove { key } => {
                    self.data.remove(&key);
                }
            }
        }
        Ok(())
    }
}
