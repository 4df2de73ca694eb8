//! Signature records and sign-bytes computation.

use crate::tx::SigVerifiableTx;
use borsh::{BorshDeserialize, BorshSerialize};
use evolve_core::encoding::Encodable;
use evolve_core::{define_error, SdkResult};

define_error!(
    ERR_UNSUPPORTED_SIGN_MODE,
    0x10,
    "unsupported sign mode {arg}"
);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, BorshSerialize, BorshDeserialize)]
#[borsh(use_discriminant = false)]
#[repr(u16)]
pub enum SignMode {
    Direct = 1,
    Textual = 2,
    LegacyJson = 127,
}

#[derive(Clone, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct PubKey(pub Vec<u8>);

impl PubKey {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

/// The credential carried by a signature record.
#[derive(Clone, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub enum SignatureData {
    Single {
        mode: SignMode,
        signature: Vec<u8>,
    },
    /// Aggregate of several credentials, `bitarray[i]` set when signer `i` signed.
    Multi {
        bitarray: Vec<bool>,
        signatures: Vec<SignatureData>,
    },
}

#[derive(Clone, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct SignatureV2 {
    pub pub_key: Option<PubKey>,
    pub data: SignatureData,
    pub sequence: u64,
}

impl SignatureV2 {
    pub fn single(
        pub_key: Option<PubKey>,
        mode: SignMode,
        signature: Vec<u8>,
        sequence: u64,
    ) -> Self {
        Self {
            pub_key,
            data: SignatureData::Single { mode, signature },
            sequence,
        }
    }
}

/// Signer metadata that goes into the sign bytes. Built per transaction, never stored.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignerData {
    pub address: String,
    pub chain_id: String,
    pub account_number: u64,
    pub sequence: u64,
    pub pub_key: Option<PubKey>,
}

pub trait SignModeHandler {
    fn get_sign_bytes(
        &self,
        mode: SignMode,
        data: &SignerData,
        tx: &dyn SigVerifiableTx,
    ) -> SdkResult<Vec<u8>>;
}

/// Document signed in [`SignMode::Direct`].
#[derive(Clone, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct SignDoc {
    pub body_bytes: Vec<u8>,
    pub chain_id: String,
    pub account_number: u64,
    pub sequence: u64,
    pub pub_key: Option<PubKey>,
}

impl SignDoc {
    pub fn new(data: &SignerData, body_bytes: Vec<u8>) -> Self {
        Self {
            body_bytes,
            chain_id: data.chain_id.clone(),
            account_number: data.account_number,
            sequence: data.sequence,
            pub_key: data.pub_key.clone(),
        }
    }
}

/// Sign bytes are the borsh encoding of a [`SignDoc`].
#[derive(Clone, Copy, Debug, Default)]
pub struct DirectSignModeHandler;

impl SignModeHandler for DirectSignModeHandler {
    fn get_sign_bytes(
        &self,
        mode: SignMode,
        data: &SignerData,
        tx: &dyn SigVerifiableTx,
    ) -> SdkResult<Vec<u8>> {
        if mode != SignMode::Direct {
            return Err(ERR_UNSUPPORTED_SIGN_MODE.with_arg(mode as u16));
        }
        SignDoc::new(data, tx.body_bytes()?).encode()
    }
}
