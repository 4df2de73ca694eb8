//! Decides whether a transaction takes the contract-account path.

use crate::account::{Account, AccountKeeper, ContractAccount};
use crate::error::{ERR_SIGNER_NOT_FOUND, ERR_TX_DECODE};
use evolve_core::{Address, Environment, SdkResult};
use evolve_stf_traits::{SigVerifiableTx, SignatureV2, Transaction};

#[derive(Debug)]
pub enum Classification<'t> {
    /// Default verification applies.
    NotApplicable,
    Qualifies(Qualified<'t>),
}

/// A transaction signed by exactly one contract account with exactly one signature.
pub struct Qualified<'t> {
    pub tx: &'t dyn SigVerifiableTx,
    pub account: ContractAccount,
    pub signature: SignatureV2,
}

impl core::fmt::Debug for Qualified<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Qualified")
            .field("account", &self.account)
            .field("signature", &self.signature)
            .finish_non_exhaustive()
    }
}

impl Classification<'_> {
    pub fn qualifies(&self) -> bool {
        matches!(self, Classification::Qualifies(_))
    }
}

/// Classifies `tx`.
///
/// Exactly one declared signer and exactly one signature record are required; any other
/// combination is [`Classification::NotApplicable`]. A transaction without a
/// [`SigVerifiableTx`] view fails with [`ERR_TX_DECODE`], and a sole signer with no
/// account record fails with [`ERR_SIGNER_NOT_FOUND`].
pub fn classify<'t, Tx, A>(
    env: &dyn Environment,
    tx: &'t Tx,
    accounts: &A,
) -> SdkResult<Classification<'t>>
where
    Tx: Transaction + ?Sized,
    A: AccountKeeper + ?Sized,
{
    let sig_tx = tx.as_sig_verifiable().ok_or(ERR_TX_DECODE)?;

    let signers = sig_tx.signers();
    let signatures = sig_tx.signatures()?;
    let (Ok([signer]), Ok([signature])) = (
        <[Address; 1]>::try_from(signers),
        <[SignatureV2; 1]>::try_from(signatures),
    ) else {
        return Ok(Classification::NotApplicable);
    };

    match accounts.get_account(env, &signer)? {
        None => Err(ERR_SIGNER_NOT_FOUND),
        Some(Account::Base(_)) => Ok(Classification::NotApplicable),
        Some(Account::Contract(account)) => Ok(Classification::Qualifies(Qualified {
            tx: sig_tx,
            account,
            signature,
        })),
    }
}
