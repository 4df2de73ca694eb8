//! Traits and types shared by the state transition function and the modules that hook
//! into it.

pub mod context;
pub mod handler;
pub mod signing;
pub mod tx;

pub use context::TxContext;
pub use handler::{AnteChain, AnteDecorator, AnteHandler, PostChain, PostDecorator, PostHandler};
pub use signing::{
    DirectSignModeHandler, PubKey, SignDoc, SignMode, SignModeHandler, SignatureData,
    SignatureV2, SignerData, ERR_UNSUPPORTED_SIGN_MODE,
};
pub use tx::{AnyMsg, SigVerifiableTx, Transaction, TxMsg, TypeUrl, ERR_TYPE_URL_MISMATCH};

use evolve_core::{BlockContext, Environment, ErrorCode, ReadonlyKV, SdkResult};

pub trait Block<Tx> {
    fn context(&self) -> BlockContext;
    fn txs(&self) -> &[Tx];
}

/// Executes the messages of a transaction that passed the ante chain.
pub trait TxExecutor<Tx: ?Sized> {
    fn execute(&self, tx: &Tx, env: &mut dyn Environment) -> SdkResult<()>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateChange {
    Set { key: Vec<u8>, value: Vec<u8> },
    Remove { key: Vec<u8> },
}

pub trait WritableKV: ReadonlyKV {
    fn apply_changes(&mut self, changes: Vec<StateChange>) -> Result<(), ErrorCode>;
}
