use crate::account::ContractKeeper;
use crate::error::ERR_CONTRACT_INVOCATION;
use crate::handoff::SignerHandoff;
use crate::msg::{AccountSudoMsg, AfterTx};
use evolve_core::SdkResult;
use evolve_stf_traits::{PostDecorator, PostHandler, TxContext};
use tracing::{debug, warn};

/// Post decorator notifying the signer's contract of the transaction outcome.
///
/// Runs whether message execution succeeded or not. Transactions for which the before
/// hook recorded no signer pass straight through.
pub struct AfterTxDecorator<C> {
    contracts: C,
}

impl<C> AfterTxDecorator<C> {
    pub fn new(contracts: C) -> Self {
        Self { contracts }
    }
}

impl<Tx, C> PostDecorator<Tx> for AfterTxDecorator<C>
where
    Tx: ?Sized,
    C: ContractKeeper,
{
    fn post_handle(
        &self,
        ctx: &mut TxContext<'_>,
        tx: &Tx,
        simulate: bool,
        success: bool,
        next: &dyn PostHandler<Tx>,
    ) -> SdkResult<()> {
        let Some(signer) = ctx.clear() else {
            return next.handle(ctx, tx, simulate, success);
        };

        let notice = AccountSudoMsg::AfterTx(AfterTx { success }).to_json_vec()?;

        debug!(%signer, success, "calling after_tx");
        self.contracts
            .sudo(ctx.env_mut(), &signer, &notice)
            .map_err(|err| {
                warn!(%signer, %err, "after_tx rejected transaction");
                ERR_CONTRACT_INVOCATION.with_arg(err.id)
            })?;

        next.handle(ctx, tx, simulate, success)
    }
}
