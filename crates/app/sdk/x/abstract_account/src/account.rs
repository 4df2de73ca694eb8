//! Account model and the ledger collaborators the hooks consume.

use borsh::{BorshDeserialize, BorshSerialize};
use evolve_core::{Address, Environment, SdkResult};
use evolve_stf_traits::PubKey;

/// A conventional account authenticated by its public key.
#[derive(Clone, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct BaseAccount {
    pub address: Address,
    pub pub_key: Option<PubKey>,
    pub account_number: u64,
    pub sequence: u64,
}

/// An account whose authentication is delegated to the contract living at its address.
#[derive(Clone, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct ContractAccount {
    pub address: Address,
    pub pub_key: Option<PubKey>,
    pub account_number: u64,
    pub sequence: u64,
}

#[derive(Clone, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub enum Account {
    Base(BaseAccount),
    Contract(ContractAccount),
}

impl Account {
    pub fn address(&self) -> &Address {
        match self {
            Account::Base(acc) => &acc.address,
            Account::Contract(acc) => &acc.address,
        }
    }

    pub fn pub_key(&self) -> Option<&PubKey> {
        match self {
            Account::Base(acc) => acc.pub_key.as_ref(),
            Account::Contract(acc) => acc.pub_key.as_ref(),
        }
    }

    pub fn account_number(&self) -> u64 {
        match self {
            Account::Base(acc) => acc.account_number,
            Account::Contract(acc) => acc.account_number,
        }
    }

    pub fn sequence(&self) -> u64 {
        match self {
            Account::Base(acc) => acc.sequence,
            Account::Contract(acc) => acc.sequence,
        }
    }

    pub fn is_contract(&self) -> bool {
        matches!(self, Account::Contract(_))
    }
}

/// Read access to the ledger's account records.
pub trait AccountKeeper {
    fn get_account(&self, env: &dyn Environment, address: &Address)
        -> SdkResult<Option<Account>>;
}

/// Privileged entry point into the contract execution environment.
pub trait ContractKeeper {
    /// Calls the contract at `contract` with a JSON `msg`, returning its response data.
    fn sudo(&self, env: &mut dyn Environment, contract: &Address, msg: &[u8])
        -> SdkResult<Vec<u8>>;
}
