//! Shared fixtures for the contract-account integration tests.
#![allow(dead_code)]

use evolve_abstract_account::{Account, BaseAccount, ContractAccount};
use evolve_core::{Address, Environment, SdkResult};
use evolve_stf::MsgRouter;
use evolve_stf_traits::{
    AnteDecorator, DirectSignModeHandler, PostDecorator, SignMode, SignModeHandler, SignatureData,
    SignatureV2, SignerData, TxContext,
};
use evolve_testing::{
    handle_store, mock_signature, MemoryAccountKeeper, MockEnv, MockTx, MsgStore,
};
use std::cell::Cell;

pub const CHAIN_ID: &str = "evolve-test";
pub const CONTRACT_ACCOUNT_NUMBER: u64 = 7;
pub const CONTRACT_SEQUENCE: u64 = 3;

pub fn contract_addr() -> Address {
    Address::new(vec![0xc0; 20])
}

pub fn base_addr() -> Address {
    Address::new(vec![0xb0; 20])
}

pub fn unknown_addr() -> Address {
    Address::new(vec![0xee; 20])
}

pub fn accounts() -> MemoryAccountKeeper {
    MemoryAccountKeeper::new()
        .with_account(Account::Contract(ContractAccount {
            address: contract_addr(),
            pub_key: None,
            account_number: CONTRACT_ACCOUNT_NUMBER,
            sequence: CONTRACT_SEQUENCE,
        }))
        .with_account(Account::Base(BaseAccount {
            address: base_addr(),
            pub_key: None,
            account_number: 1,
            sequence: 0,
        }))
}

pub fn router() -> MsgRouter {
    let mut router = MsgRouter::new();
    router
        .register(|msg: &MsgStore, env: &mut dyn Environment| handle_store(msg, env))
        .unwrap();
    router
}

/// Sign bytes the contract account would have signed for `tx`.
pub fn expected_sign_bytes(tx: &MockTx, account_number: u64) -> Vec<u8> {
    let signer = SignerData {
        address: contract_addr().to_string(),
        chain_id: CHAIN_ID.to_string(),
        account_number,
        sequence: CONTRACT_SEQUENCE,
        pub_key: None,
    };
    DirectSignModeHandler
        .get_sign_bytes(SignMode::Direct, &signer, tx)
        .unwrap()
}

pub fn single_signature(signature: Vec<u8>) -> SignatureV2 {
    SignatureV2::single(None, SignMode::Direct, signature, CONTRACT_SEQUENCE)
}

/// Adds the contract account as sole signer with a signature the recording keeper accepts.
pub fn sign_as_contract(tx: MockTx) -> MockTx {
    let signature = mock_signature(&expected_sign_bytes(&tx, CONTRACT_ACCOUNT_NUMBER));
    tx.with_signer(contract_addr())
        .with_signature(single_signature(signature))
}

pub fn multi_signature() -> SignatureV2 {
    SignatureV2 {
        pub_key: None,
        data: SignatureData::Multi {
            bitarray: vec![true, true],
            signatures: vec![
                SignatureData::Single {
                    mode: SignMode::Direct,
                    signature: vec![1; 64],
                },
                SignatureData::Single {
                    mode: SignMode::Direct,
                    signature: vec![2; 64],
                },
            ],
        },
        sequence: CONTRACT_SEQUENCE,
    }
}

/// What a single decorator invocation left behind.
pub struct Run {
    pub result: SdkResult<()>,
    pub slot: Option<Address>,
    pub next_called: bool,
}

pub fn run_ante<D>(decorator: &D, env: &mut MockEnv, tx: &MockTx) -> Run
where
    D: AnteDecorator<MockTx>,
{
    let next_called = Cell::new(false);
    let next = |_: &mut TxContext<'_>, _: &MockTx, _: bool| -> SdkResult<()> {
        next_called.set(true);
        Ok(())
    };

    let mut ctx = TxContext::new(env, CHAIN_ID);
    let result = decorator.ante_handle(&mut ctx, tx, false, &next);
    Run {
        result,
        slot: ctx.pending_signer().cloned(),
        next_called: next_called.get(),
    }
}

/// Runs `decorator` with the slot pre-filled with `slot`.
pub fn run_post<D: PostDecorator<MockTx>>(
    decorator: &D,
    env: &mut MockEnv,
    slot: Option<Address>,
    success: bool,
) -> (Run, Option<bool>) {
    let forwarded = Cell::new(None);
    let next = |_: &mut TxContext<'_>, _: &MockTx, _: bool, success: bool| -> SdkResult<()> {
        forwarded.set(Some(success));
        Ok(())
    };

    let mut ctx = TxContext::new(env, CHAIN_ID);
    if let Some(signer) = slot {
        ctx.set_pending_signer(signer);
    }
    let result = decorator.post_handle(&mut ctx, &MockTx::new(), false, success, &next);
    let run = Run {
        result,
        slot: ctx.pending_signer().cloned(),
        next_called: forwarded.get().is_some(),
    };
    (run, forwarded.get())
}
