use evolve_core::{Address, BlockContext, Environment};

/// Per-transaction processing context.
///
/// One `TxContext` is created for each transaction and threaded by reference through
/// the ante chain, message execution and the post chain, then dropped. Anything a
/// stage needs to hand to a later stage of the *same* transaction lives here, so no
/// value can survive into the next transaction.
pub struct TxContext<'e> {
    env: &'e mut dyn Environment,
    chain_id: &'e str,
    pending_signer: Option<Address>,
}

impl<'e> TxContext<'e> {
    pub fn new(env: &'e mut dyn Environment, chain_id: &'e str) -> Self {
        Self {
            env,
            chain_id,
            pending_signer: None,
        }
    }

    pub fn chain_id(&self) -> &str {
        self.chain_id
    }

    pub fn block(&self) -> BlockContext {
        self.env.block()
    }

    pub fn env(&self) -> &dyn Environment {
        &*self.env
    }

    pub fn env_mut(&mut self) -> &mut dyn Environment {
        &mut *self.env
    }

    /// Signer recorded by the ante stage for the post stage, if any.
    pub fn pending_signer(&self) -> Option<&Address> {
        self.pending_signer.as_ref()
    }

    /// Records `signer`, replacing and returning any previous value.
    pub fn set_pending_signer(&mut self, signer: Address) -> Option<Address> {
        self.pending_signer.replace(signer)
    }

    pub fn take_pending_signer(&mut self) -> Option<Address> {
        self.pending_signer.take()
    }
}
