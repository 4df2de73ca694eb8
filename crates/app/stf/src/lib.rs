//! # State Transition Function (STF)
//!
//! Drives transactions through the authentication pipeline:
//!
//! 1. the ante chain (signature checks, contract-account `before_tx`, ...)
//! 2. message execution through a [`TxExecutor`]
//! 3. the post chain, which always runs once the ante chain passed
//!
//! Every transaction gets its own [`TxContext`], so nothing one transaction hands from
//! its ante stage to its post stage can leak into the next one.
//!
//! ## Rollback rules
//!
//! - ante failure: everything the transaction wrote is discarded, post chain skipped
//! - message failure: message writes discarded, post chain runs with `success = false`
//! - post failure: message and post writes discarded
//!
//! Writes made by a successful ante chain are kept in every case.

pub mod errors;
pub mod execution_state;
mod invoker;
pub mod results;
pub mod router;

pub use crate::execution_state::ExecutionState;
pub use crate::invoker::Invoker;
pub use crate::results::{BlockResult, TxOutcome, TxResult};
pub use crate::router::MsgRouter;

use evolve_core::{BlockContext, Checkpoint, ErrorCode, ReadonlyKV};
use evolve_stf_traits::{
    AnteChain, AnteHandler, Block as BlockTrait, PostChain, PostHandler, TxContext, TxExecutor,
};
use tracing::{debug, error};

/// The state transition function.
///
/// # Type Parameters
///
/// * `Tx` - Transaction type seen by the decorators and the executor
/// * `Executor` - Runs the messages of a transaction that passed the ante chain
pub struct Stf<Tx: ?Sized, Executor> {
    chain_id: String,
    ante: AnteChain<Tx>,
    post: PostChain<Tx>,
    executor: Executor,
}

impl<Tx, Executor> Stf<Tx, Executor>
where
    Tx: ?Sized,
    Executor: TxExecutor<Tx>,
{
    pub fn new(
        chain_id: impl Into<String>,
        ante: AnteChain<Tx>,
        post: PostChain<Tx>,
        executor: Executor,
    ) -> Self {
        Self {
            chain_id: chain_id.into(),
            ante,
            post,
            executor,
        }
    }

    pub fn chain_id(&self) -> &str {
        &self.chain_id
    }

    /// Applies every transaction of `block` in order.
    ///
    /// A failing transaction only discards its own changes; processing continues with
    /// the next one.
    pub fn apply_block<'a, S, B>(
        &self,
        storage: &'a S,
        block: &B,
    ) -> (BlockResult, ExecutionState<'a, S>)
    where
        Tx: Sized,
        S: ReadonlyKV,
        B: BlockTrait<Tx>,
    {
        let mut state = ExecutionState::new(storage);
        let context = block.context();

        let txs = block.txs();
        let mut tx_results = Vec::with_capacity(txs.len());
        for tx in txs {
            tx_results.push(self.apply_tx(&mut state, context, tx));
        }

        let result = BlockResult { tx_results };
        debug!(
            height = context.height,
            succeeded = result.succeeded(),
            failed = result.failed(),
            "block applied"
        );
        (result, state)
    }

    /// Applies a single transaction on top of `state`.
    pub fn apply_tx<S: ReadonlyKV>(
        &self,
        state: &mut ExecutionState<'_, S>,
        block: BlockContext,
        tx: &Tx,
    ) -> TxResult {
        let mut invoker = Invoker::new(state, block);
        let mut ctx = TxContext::new(&mut invoker, &self.chain_id);
        self.run_tx(&mut ctx, tx, false)
    }

    /// Runs `tx` through the whole pipeline in simulation mode and discards every change.
    pub fn simulate_tx<S: ReadonlyKV>(
        &self,
        storage: &S,
        block: BlockContext,
        tx: &Tx,
    ) -> TxResult {
        let mut state = ExecutionState::new(storage);
        let mut invoker = Invoker::new(&mut state, block);
        let mut ctx = TxContext::new(&mut invoker, &self.chain_id);
        self.run_tx(&mut ctx, tx, true)
    }

    fn run_tx(&self, ctx: &mut TxContext<'_>, tx: &Tx, simulate: bool) -> TxResult {
        let tx_start = ctx.env().checkpoint();

        if let Err(err) = self.ante.handle(ctx, tx, simulate) {
            debug!(%err, "ante chain rejected transaction");
            return TxResult {
                response: Err(rollback(ctx, tx_start, err)),
                outcome: TxOutcome::AnteRejected,
            };
        }

        let exec_start = ctx.env().checkpoint();
        let mut response = self.executor.execute(tx, ctx.env_mut());
        if let Err(err) = response {
            debug!(%err, "message execution failed");
            response = Err(rollback(ctx, exec_start, err));
        }

        if let Err(err) = self.post.handle(ctx, tx, simulate, response.is_ok()) {
            debug!(%err, "post chain rejected transaction");
            return TxResult {
                response: Err(rollback(ctx, exec_start, err)),
                outcome: TxOutcome::PostRejected,
            };
        }

        let outcome = match response {
            Ok(()) => TxOutcome::Success,
            Err(_) => TxOutcome::ExecutionFailed,
        };
        TxResult { response, outcome }
    }
}

/// Restores `checkpoint` and returns `err`, or the restore error if restoring failed.
fn rollback(ctx: &mut TxContext<'_>, checkpoint: Checkpoint, err: ErrorCode) -> ErrorCode {
    match ctx.env_mut().restore(checkpoint) {
        Ok(()) => err,
        Err(restore_err) => {
            error!(%restore_err, %err, "failed to roll back transaction state");
            restore_err
        }
    }
}
