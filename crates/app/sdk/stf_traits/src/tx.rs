//! Transaction introspection.

use crate::signing::SignatureV2;
use borsh::{BorshDeserialize, BorshSerialize};
use core::fmt;
use evolve_core::encoding::{Decodable, Encodable};
use evolve_core::{define_error, Address, SdkResult};

define_error!(
    ERR_TYPE_URL_MISMATCH,
    0x01,
    "message type url does not match the requested type"
);

/// Stable type identifier of a message shape, e.g. `/evolve.bank.v1.MsgSend`.
pub trait TypeUrl {
    const TYPE_URL: &'static str;
}

/// A native transaction message.
///
/// Every message knows its type URL and its canonical binary encoding. Any borsh
/// message with a [`TypeUrl`] gets this for free.
pub trait TxMsg: fmt::Debug {
    fn type_url(&self) -> &'static str;

    fn encode_canonical(&self) -> SdkResult<Vec<u8>>;

    fn to_any(&self) -> SdkResult<AnyMsg> {
        Ok(AnyMsg {
            type_url: self.type_url().to_string(),
            value: self.encode_canonical()?,
        })
    }
}

impl<M> TxMsg for M
where
    M: TypeUrl + Encodable + fmt::Debug,
{
    fn type_url(&self) -> &'static str {
        M::TYPE_URL
    }

    fn encode_canonical(&self) -> SdkResult<Vec<u8>> {
        self.encode()
    }
}

/// A self-describing encoded message: type URL plus canonical bytes.
#[derive(Clone, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct AnyMsg {
    pub type_url: String,
    pub value: Vec<u8>,
}

impl AnyMsg {
    pub fn pack<M: TypeUrl + Encodable>(msg: &M) -> SdkResult<Self> {
        Ok(Self {
            type_url: M::TYPE_URL.to_string(),
            value: msg.encode()?,
        })
    }

    /// Decodes the payload as `M`, refusing payloads tagged with another type URL.
    pub fn unpack<M: TypeUrl + Decodable>(&self) -> SdkResult<M> {
        if self.type_url != M::TYPE_URL {
            return Err(ERR_TYPE_URL_MISMATCH);
        }
        M::decode(&self.value)
    }

    pub fn is<M: TypeUrl>(&self) -> bool {
        self.type_url == M::TYPE_URL
    }
}

/// The signer/signature view of a transaction.
pub trait SigVerifiableTx {
    /// Declared signers, one slot per expected signature, in order.
    fn signers(&self) -> Vec<Address>;

    /// Signature records, parallel to [`Self::signers`].
    fn signatures(&self) -> SdkResult<Vec<SignatureV2>>;

    /// Canonical bytes of the transaction body the signatures commit to.
    fn body_bytes(&self) -> SdkResult<Vec<u8>>;
}

pub trait Transaction {
    fn msgs(&self) -> &[Box<dyn TxMsg>];

    /// Signer introspection, if this transaction type supports it.
    fn as_sig_verifiable(&self) -> Option<&dyn SigVerifiableTx> {
        None
    }
}
