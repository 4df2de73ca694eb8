//! Mock transactions and messages.

use borsh::{BorshDeserialize, BorshSerialize};
use evolve_core::encoding::Encodable;
use evolve_core::{define_error, Address, Environment, SdkResult};
use evolve_stf_traits::{AnyMsg, SigVerifiableTx, SignatureV2, Transaction, TxMsg, TypeUrl};

define_error!(ERR_STORE_FAILED, 0x01, "store message failed");

#[derive(BorshSerialize, BorshDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct MsgSend {
    pub from: Address,
    pub to: Address,
    pub amount: u128,
}

impl TypeUrl for MsgSend {
    const TYPE_URL: &'static str = "/evolve.bank.v1.MsgSend";
}

/// Writes `value` under `key`, then fails if `fail` is set.
#[derive(BorshSerialize, BorshDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct MsgStore {
    pub key: Vec<u8>,
    pub value: Vec<u8>,
    pub fail: bool,
}

impl MsgStore {
    pub fn ok(key: &[u8], value: &[u8]) -> Self {
        Self {
            key: key.to_vec(),
            value: value.to_vec(),
            fail: false,
        }
    }

    pub fn failing(key: &[u8], value: &[u8]) -> Self {
        Self {
            fail: true,
            ..Self::ok(key, value)
        }
    }
}

impl TypeUrl for MsgStore {
    const TYPE_URL: &'static str = "/evolve.test.v1.MsgStore";
}

pub fn handle_store(msg: &MsgStore, env: &mut dyn Environment) -> SdkResult<()> {
    env.set(&msg.key, msg.value.clone())?;
    if msg.fail {
        return Err(ERR_STORE_FAILED);
    }
    Ok(())
}

#[derive(BorshSerialize, Clone)]
struct TxBody {
    msgs: Vec<AnyMsg>,
    memo: String,
}

/// A transaction assembled field by field.
#[derive(Debug)]
pub struct MockTx {
    pub msgs: Vec<Box<dyn TxMsg>>,
    pub signers: Vec<Address>,
    pub signatures: Vec<SignatureV2>,
    pub memo: String,
    /// When false the transaction exposes no signer view.
    pub sig_verifiable: bool,
}

impl Default for MockTx {
    fn default() -> Self {
        Self::new()
    }
}

impl MockTx {
    pub fn new() -> Self {
        Self {
            msgs: Vec::new(),
            signers: Vec::new(),
            signatures: Vec::new(),
            memo: String::new(),
            sig_verifiable: true,
        }
    }

    pub fn with_msg(mut self, msg: impl TxMsg + 'static) -> Self {
        self.msgs.push(Box::new(msg));
        self
    }

    pub fn with_signer(mut self, signer: Address) -> Self {
        self.signers.push(signer);
        self
    }

    pub fn with_signature(mut self, signature: SignatureV2) -> Self {
        self.signatures.push(signature);
        self
    }

    pub fn with_memo(mut self, memo: &str) -> Self {
        self.memo = memo.to_string();
        self
    }

    pub fn without_sig_view(mut self) -> Self {
        self.sig_verifiable = false;
        self
    }
}

impl SigVerifiableTx for MockTx {
    fn signers(&self) -> Vec<Address> {
        self.signers.clone()
    }

    fn signatures(&self) -> SdkResult<Vec<SignatureV2>> {
        Ok(self.signatures.clone())
    }

    fn body_bytes(&self) -> SdkResult<Vec<u8>> {
        TxBody {
            msgs: self
                .msgs
                .iter()
                .map(|msg| msg.to_any())
                .collect::<SdkResult<_>>()?,
            memo: self.memo.clone(),
        }
        .encode()
    }
}

impl Transaction for MockTx {
    fn msgs(&self) -> &[Box<dyn TxMsg>] {
        &self.msgs
    }

    fn as_sig_verifiable(&self) -> Option<&dyn SigVerifiableTx> {
        if self.sig_verifiable {
            Some(self)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_bytes_cover_memo_and_msgs() {
        let tx = MockTx::new().with_msg(MsgStore::ok(b"k", b"v"));
        let with_memo = MockTx::new()
            .with_msg(MsgStore::ok(b"k", b"v"))
            .with_memo("hi");
        assert_ne!(tx.body_bytes().unwrap(), with_memo.body_bytes().unwrap());
        assert_ne!(
            tx.body_bytes().unwrap(),
            MockTx::new().body_bytes().unwrap()
        );
    }

    #[test]
    fn sig_view_can_be_hidden() {
        assert!(MockTx::new().as_sig_verifiable().is_some());
        assert!(MockTx::new().without_sig_view().as_sig_verifiable().is_none());
    }
}
