//! End-to-end runs of the contract-account hooks inside the state transition function.

mod common;

use common::{
    accounts, base_addr, contract_addr, multi_signature, router, sign_as_contract,
    single_signature, CHAIN_ID,
};
use evolve_abstract_account::{
    AccountSudoMsg, AfterTx, AfterTxDecorator, BeforeTxDecorator, ERR_CONTRACT_INVOCATION,
    ERR_NOT_SINGLE_SIGNATURE,
};
use evolve_core::{BlockContext, ERR_UNAUTHORIZED};
use evolve_stf::{BlockResult, ExecutionState, MsgRouter, Stf, TxOutcome};
use evolve_stf_traits::{AnteChain, Block, PostChain};
use evolve_testing::{
    InMemoryStorage, MockTx, MsgStore, RecordingContractKeeper, RecordingVerifier,
    ERR_STORE_FAILED,
};

struct TestBlock(Vec<MockTx>);

impl Block<MockTx> for TestBlock {
    fn context(&self) -> BlockContext {
        BlockContext::new(1, 1_000)
    }

    fn txs(&self) -> &[MockTx] {
        &self.0
    }
}

fn pipeline(
    verifier: &RecordingVerifier,
    contracts: &RecordingContractKeeper,
) -> Stf<MockTx, MsgRouter> {
    Stf::new(
        CHAIN_ID,
        AnteChain::new().with(BeforeTxDecorator::new(
            verifier.clone(),
            accounts(),
            contracts.clone(),
        )),
        PostChain::new().with(AfterTxDecorator::new(contracts.clone())),
        router(),
    )
}

fn run<'s>(
    stf: &Stf<MockTx, MsgRouter>,
    storage: &'s InMemoryStorage,
    txs: Vec<MockTx>,
) -> (BlockResult, ExecutionState<'s, InMemoryStorage>) {
    stf.apply_block(storage, &TestBlock(txs))
}

fn stored(state: &ExecutionState<'_, InMemoryStorage>, key: &[u8]) -> Option<Vec<u8>> {
    state.get(key).unwrap()
}

fn after_flags(contracts: &RecordingContractKeeper) -> Vec<bool> {
    contracts
        .after_calls()
        .into_iter()
        .map(|call| match call.msg {
            AccountSudoMsg::AfterTx(AfterTx { success }) => success,
            other => panic!("expected after_tx, got {other:?}"),
        })
        .collect()
}

fn store_msg() -> MsgStore {
    MsgStore::ok(b"msg", b"written")
}

#[test]
fn two_signers_use_default_verification() {
    let verifier = RecordingVerifier::new();
    let contracts = RecordingContractKeeper::new();
    let storage = InMemoryStorage::new();
    let tx = MockTx::new()
        .with_msg(store_msg())
        .with_signer(contract_addr())
        .with_signer(base_addr())
        .with_signature(single_signature(vec![1]))
        .with_signature(single_signature(vec![2]));

    let (result, state) = run(&pipeline(&verifier, &contracts), &storage, vec![tx]);

    assert_eq!(result.tx_results[0].outcome, TxOutcome::Success);
    assert_eq!(verifier.calls(), 1);
    assert_eq!(contracts.call_count(), 0);
    assert_eq!(stored(&state, b"msg"), Some(b"written".to_vec()));
}

#[test]
fn plain_key_account_uses_default_verification() {
    let verifier = RecordingVerifier::new();
    let contracts = RecordingContractKeeper::new();
    let storage = InMemoryStorage::new();
    let tx = MockTx::new()
        .with_msg(store_msg())
        .with_signer(base_addr())
        .with_signature(single_signature(vec![1]));

    let (result, _) = run(&pipeline(&verifier, &contracts), &storage, vec![tx]);

    assert!(result.tx_results[0].is_success());
    assert_eq!(verifier.calls(), 1);
    assert_eq!(contracts.call_count(), 0);
}

#[test]
fn successful_contract_account_tx_notifies_success() {
    let verifier = RecordingVerifier::new();
    let contracts = RecordingContractKeeper::new().verifying_signatures();
    let storage = InMemoryStorage::new();
    let tx = sign_as_contract(MockTx::new().with_msg(store_msg()));

    let (result, state) = run(&pipeline(&verifier, &contracts), &storage, vec![tx]);

    assert_eq!(result.tx_results[0].outcome, TxOutcome::Success);
    assert_eq!(verifier.calls(), 0);
    assert_eq!(contracts.before_calls().len(), 1);
    assert_eq!(after_flags(&contracts), vec![true]);
    assert_eq!(stored(&state, b"msg"), Some(b"written".to_vec()));
    assert_eq!(
        stored(&state, &RecordingContractKeeper::after_key(&contract_addr())),
        Some(vec![1])
    );
}

#[test]
fn failed_messages_are_reported_and_discarded() {
    let verifier = RecordingVerifier::new();
    let contracts = RecordingContractKeeper::new().verifying_signatures();
    let storage = InMemoryStorage::new();
    let tx = sign_as_contract(
        MockTx::new()
            .with_msg(store_msg())
            .with_msg(MsgStore::failing(b"second", b"x")),
    );

    let (result, state) = run(&pipeline(&verifier, &contracts), &storage, vec![tx]);

    assert_eq!(result.tx_results[0].outcome, TxOutcome::ExecutionFailed);
    assert_eq!(result.tx_results[0].response, Err(ERR_STORE_FAILED));
    assert_eq!(contracts.before_calls().len(), 1);
    assert_eq!(after_flags(&contracts), vec![false]);
    assert_eq!(stored(&state, b"msg"), None);
    assert_eq!(stored(&state, b"second"), None);
    assert_eq!(
        stored(&state, &RecordingContractKeeper::after_key(&contract_addr())),
        Some(vec![0])
    );
}

#[test]
fn multi_signature_is_rejected_before_any_contract_call() {
    let verifier = RecordingVerifier::new();
    let contracts = RecordingContractKeeper::new();
    let storage = InMemoryStorage::new();
    let tx = MockTx::new()
        .with_msg(store_msg())
        .with_signer(contract_addr())
        .with_signature(multi_signature());

    let (result, state) = run(&pipeline(&verifier, &contracts), &storage, vec![tx]);

    assert_eq!(result.tx_results[0].outcome, TxOutcome::AnteRejected);
    assert_eq!(result.tx_results[0].response, Err(ERR_NOT_SINGLE_SIGNATURE));
    assert_eq!(contracts.call_count(), 0);
    assert_eq!(verifier.calls(), 0);
    assert!(state.into_changes().is_empty());
}

#[test]
fn before_rejection_skips_messages_and_after() {
    let contracts = RecordingContractKeeper::new().verifying_signatures();
    let storage = InMemoryStorage::new();
    let tx = MockTx::new()
        .with_msg(store_msg())
        .with_signer(contract_addr())
        .with_signature(single_signature(b"forged".to_vec()));

    let (result, state) = run(
        &pipeline(&RecordingVerifier::new(), &contracts),
        &storage,
        vec![tx],
    );

    assert_eq!(result.tx_results[0].outcome, TxOutcome::AnteRejected);
    assert_eq!(
        result.tx_results[0].response,
        Err(ERR_CONTRACT_INVOCATION.with_arg(ERR_UNAUTHORIZED.id))
    );
    assert_eq!(contracts.before_calls().len(), 1);
    assert!(contracts.after_calls().is_empty());
    assert!(state.into_changes().is_empty());
}

#[test]
fn after_rejection_discards_message_writes() {
    let contracts = RecordingContractKeeper::new().rejecting_after(ERR_UNAUTHORIZED);
    let storage = InMemoryStorage::new();
    let tx = sign_as_contract(MockTx::new().with_msg(store_msg()));

    let (result, state) = run(
        &pipeline(&RecordingVerifier::new(), &contracts),
        &storage,
        vec![tx],
    );

    assert_eq!(result.tx_results[0].outcome, TxOutcome::PostRejected);
    assert_eq!(
        result.tx_results[0].response,
        Err(ERR_CONTRACT_INVOCATION.with_arg(ERR_UNAUTHORIZED.id))
    );
    assert_eq!(stored(&state, b"msg"), None);
    assert_eq!(
        stored(&state, &RecordingContractKeeper::before_key(&contract_addr())),
        Some(vec![1])
    );
}

#[test]
fn handoff_does_not_leak_into_the_next_transaction() {
    let verifier = RecordingVerifier::new();
    let contracts = RecordingContractKeeper::new().verifying_signatures();
    let storage = InMemoryStorage::new();
    let contract_tx = sign_as_contract(MockTx::new().with_msg(store_msg()));
    let plain_tx = MockTx::new()
        .with_signer(base_addr())
        .with_signature(single_signature(vec![1]));
    let rejected_tx = MockTx::new()
        .with_signer(contract_addr())
        .with_signature(multi_signature());

    let (result, _) = run(
        &pipeline(&verifier, &contracts),
        &storage,
        vec![rejected_tx, contract_tx, plain_tx],
    );

    assert_eq!(result.failed(), 1);
    assert_eq!(result.succeeded(), 2);
    assert_eq!(verifier.calls(), 1);
    assert_eq!(contracts.before_calls().len(), 1);
    assert_eq!(after_flags(&contracts), vec![true]);
}
