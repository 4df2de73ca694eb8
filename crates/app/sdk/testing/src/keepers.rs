//! Collaborator mocks for the contract-account hooks.

use evolve_abstract_account::{Account, AccountKeeper, AccountSudoMsg, ContractKeeper};
use evolve_core::{Address, Environment, ErrorCode, SdkResult, ERR_UNAUTHORIZED};
use evolve_stf_traits::{AnteDecorator, AnteHandler, TxContext};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use crate::mock_signature;

#[derive(Default, Clone)]
pub struct MemoryAccountKeeper {
    accounts: HashMap<Address, Account>,
}

impl MemoryAccountKeeper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_account(mut self, account: Account) -> Self {
        self.insert(account);
        self
    }

    pub fn insert(&mut self, account: Account) {
        self.accounts.insert(account.address().clone(), account);
    }
}

impl AccountKeeper for MemoryAccountKeeper {
    fn get_account(
        &self,
        _env: &dyn Environment,
        address: &Address,
    ) -> SdkResult<Option<Account>> {
        Ok(self.accounts.get(address).cloned())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SudoCall {
    pub contract: Address,
    pub msg: AccountSudoMsg,
    pub raw: Vec<u8>,
}

#[derive(Default)]
struct ContractState {
    calls: Vec<SudoCall>,
    reject_before: Option<ErrorCode>,
    reject_after: Option<ErrorCode>,
    verify_signatures: bool,
}

/// Contract keeper that records every sudo call.
///
/// Clones share the same log, so a test can keep a handle while the decorators own
/// another. Each accepted call also writes a marker into state (see
/// [`RecordingContractKeeper::before_key`] and [`RecordingContractKeeper::after_key`]).
#[derive(Clone, Default)]
pub struct RecordingContractKeeper {
    state: Rc<RefCell<ContractState>>,
}

impl RecordingContractKeeper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rejecting_before(self, err: ErrorCode) -> Self {
        self.state.borrow_mut().reject_before = Some(err);
        self
    }

    pub fn rejecting_after(self, err: ErrorCode) -> Self {
        self.state.borrow_mut().reject_after = Some(err);
        self
    }

    /// Rejects `before_tx` with [`ERR_UNAUTHORIZED`] unless the signature equals
    /// [`mock_signature`] of the sign bytes.
    pub fn verifying_signatures(self) -> Self {
        self.state.borrow_mut().verify_signatures = true;
        self
    }

    pub fn calls(&self) -> Vec<SudoCall> {
        self.state.borrow().calls.clone()
    }

    pub fn call_count(&self) -> usize {
        self.state.borrow().calls.len()
    }

    pub fn before_calls(&self) -> Vec<SudoCall> {
        self.calls()
            .into_iter()
            .filter(|c| matches!(c.msg, AccountSudoMsg::BeforeTx(_)))
            .collect()
    }

    pub fn after_calls(&self) -> Vec<SudoCall> {
        self.calls()
            .into_iter()
            .filter(|c| matches!(c.msg, AccountSudoMsg::AfterTx(_)))
            .collect()
    }

    pub fn before_key(contract: &Address) -> Vec<u8> {
        [contract.as_bytes(), b"/before_tx"].concat()
    }

    pub fn after_key(contract: &Address) -> Vec<u8> {
        [contract.as_bytes(), b"/after_tx"].concat()
    }
}

impl ContractKeeper for RecordingContractKeeper {
    fn sudo(
        &self,
        env: &mut dyn Environment,
        contract: &Address,
        msg: &[u8],
    ) -> SdkResult<Vec<u8>> {
        let parsed = AccountSudoMsg::from_json_slice(msg)?;
        let mut state = self.state.borrow_mut();
        state.calls.push(SudoCall {
            contract: contract.clone(),
            msg: parsed.clone(),
            raw: msg.to_vec(),
        });

        match parsed {
            AccountSudoMsg::BeforeTx(before) => {
                if let Some(err) = state.reject_before {
                    return Err(err);
                }
                let expected = mock_signature(before.sign_bytes.as_slice());
                if state.verify_signatures && before.signature.as_slice() != expected {
                    return Err(ERR_UNAUTHORIZED);
                }
                env.set(&Self::before_key(contract), vec![1])?;
            }
            AccountSudoMsg::AfterTx(after) => {
                if let Some(err) = state.reject_after {
                    return Err(err);
                }
                env.set(&Self::after_key(contract), vec![after.success as u8])?;
            }
        }
        Ok(Vec::new())
    }
}

/// Stand-in for the default signature verifier: counts calls and forwards to `next`.
#[derive(Clone, Default)]
pub struct RecordingVerifier {
    calls: Rc<Cell<usize>>,
    reject: Option<ErrorCode>,
}

impl RecordingVerifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rejecting(err: ErrorCode) -> Self {
        Self {
            reject: Some(err),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.get()
    }
}

impl<Tx: ?Sized> AnteDecorator<Tx> for RecordingVerifier {
    fn ante_handle(
        &self,
        ctx: &mut TxContext<'_>,
        tx: &Tx,
        simulate: bool,
        next: &dyn AnteHandler<Tx>,
    ) -> SdkResult<()> {
        self.calls.set(self.calls.get() + 1);
        if let Some(err) = self.reject {
            return Err(err);
        }
        next.handle(ctx, tx, simulate)
    }
}
