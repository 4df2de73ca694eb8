use crate::execution_state::ExecutionState;
use evolve_core::{BlockContext, Checkpoint, Environment, ReadonlyKV, SdkResult};

/// The [`Environment`] handed to the pipeline while a transaction is processed.
pub struct Invoker<'s, 'a, S> {
    pub(crate) storage: &'a mut ExecutionState<'s, S>,
    pub(crate) block: BlockContext,
}

impl<'s, 'a, S> Invoker<'s, 'a, S> {
    pub fn new(storage: &'a mut ExecutionState<'s, S>, block: BlockContext) -> Self {
        Self { storage, block }
    }
}

impl<S: ReadonlyKV> Environment for Invoker<'_, '_, S> {
    fn block(&self) -> BlockContext {
        self.block
    }

    fn get(&self, key: &[u8]) -> SdkResult<Option<Vec<u8>>> {
        self.storage.get(key)
    }

    fn set(&mut self, key: &[u8], value: Vec<u8>) -> SdkResult<()> {
        self.storage.set(key, value)
    }

    fn remove(&mut self, key: &[u8]) -> SdkResult<()> {
        self.storage.remove(key)
    }

    fn checkpoint(&self) -> Checkpoint {
        self.storage.checkpoint()
    }

    fn restore(&mut self, checkpoint: Checkpoint) -> SdkResult<()> {
        self.storage.restore(checkpoint)
    }
}
