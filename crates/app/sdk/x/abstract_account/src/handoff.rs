//! Carries the classified signer from the before hook to the after hook.
//!
//! The slot lives in the [`TxContext`] of the transaction being processed, so it is
//! dropped with the context and never reaches another transaction.

use evolve_core::Address;
use evolve_stf_traits::TxContext;
use tracing::debug;

pub trait SignerHandoff {
    /// Stores `signer`, overwriting any previous value.
    fn write(&mut self, signer: Address);

    fn read(&self) -> Option<&Address>;

    /// Empties the slot, returning what it held.
    fn clear(&mut self) -> Option<Address>;
}

impl SignerHandoff for TxContext<'_> {
    fn write(&mut self, signer: Address) {
        debug!(%signer, "handoff written");
        self.set_pending_signer(signer);
    }

    fn read(&self) -> Option<&Address> {
        self.pending_signer()
    }

    fn clear(&mut self) -> Option<Address> {
        let signer = self.take_pending_signer();
        if let Some(signer) = &signer {
            debug!(%signer, "handoff cleared");
        }
        signer
    }
}
