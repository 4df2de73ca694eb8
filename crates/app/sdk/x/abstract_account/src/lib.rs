//! Contract-account authentication.
//!
//! Accounts of the [`account::Account::Contract`] variant delegate signature checks to
//! the contract at their address. Two decorators implement the protocol:
//!
//! - [`BeforeTxDecorator`] (ante): classifies the transaction and, for a single-signer
//!   contract-account transaction, sends `{"before_tx": ...}` with the transcoded
//!   messages, sign bytes and signature. Anything else goes to the default verifier.
//! - [`AfterTxDecorator`] (post): sends `{"after_tx": {"success": ...}}` to the same
//!   contract once the messages have run, successful or not.
//!
//! The signer travels between the two through the transaction's [`TxContext`]
//! ([`handoff::SignerHandoff`]).
//!
//! [`TxContext`]: evolve_stf_traits::TxContext

pub mod account;
pub mod ante;
pub mod classify;
pub mod credentials;
pub mod error;
pub mod handoff;
pub mod msg;
pub mod params;
pub mod post;
pub mod transcode;

pub use account::{Account, AccountKeeper, BaseAccount, ContractAccount, ContractKeeper};
pub use ante::BeforeTxDecorator;
pub use classify::{classify, Classification, Qualified};
pub use credentials::{prepare_credentials, Credentials};
pub use error::{
    ERR_CONTRACT_INVOCATION, ERR_NOT_SINGLE_SIGNATURE, ERR_SIGNER_NOT_FOUND, ERR_TX_DECODE,
};
pub use handoff::SignerHandoff;
pub use msg::{AccountSudoMsg, AfterTx, BeforeTx, Binary, EncodedMsg};
pub use params::{AbstractAccountParams, GenesisAccountNumber};
pub use post::AfterTxDecorator;
pub use transcode::transcode_msgs;
