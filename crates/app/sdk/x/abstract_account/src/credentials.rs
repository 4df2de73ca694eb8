use crate::account::ContractAccount;
use crate::error::ERR_NOT_SINGLE_SIGNATURE;
use crate::params::AbstractAccountParams;
use evolve_core::SdkResult;
use evolve_stf_traits::{
    SigVerifiableTx, SignModeHandler, SignatureData, SignatureV2, SignerData, TxContext,
};

/// What the account contract needs to verify a signature on its own.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Credentials {
    pub sign_bytes: Vec<u8>,
    pub signature: Vec<u8>,
}

/// Rebuilds the bytes `account` signed and extracts the raw signature.
///
/// Only single-credential signatures are accepted.
pub fn prepare_credentials<H>(
    ctx: &TxContext<'_>,
    tx: &dyn SigVerifiableTx,
    account: &ContractAccount,
    signature: &SignatureV2,
    handler: &H,
    params: &AbstractAccountParams,
) -> SdkResult<Credentials>
where
    H: SignModeHandler + ?Sized,
{
    let SignatureData::Single {
        mode,
        signature: raw,
    } = &signature.data
    else {
        return Err(ERR_NOT_SINGLE_SIGNATURE);
    };

    let signer = SignerData {
        address: account.address.to_string(),
        chain_id: ctx.chain_id().to_string(),
        account_number: params
            .genesis_account_number
            .resolve(ctx.block(), account.account_number),
        sequence: account.sequence,
        pub_key: account.pub_key.clone(),
    };

    Ok(Credentials {
        sign_bytes: handler.get_sign_bytes(*mode, &signer, tx)?,
        signature: raw.clone(),
    })
}
