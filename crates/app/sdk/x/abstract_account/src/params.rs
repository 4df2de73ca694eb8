use evolve_core::BlockContext;
use serde::{Deserialize, Serialize};

/// Account number used when signing transactions included in the genesis block.
///
/// Gentxs are signed before accounts are numbered, so chains that follow the usual
/// gentx convention sign them with account number 0. `Stored` ignores the block height
/// and always uses the account's stored number.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenesisAccountNumber {
    #[default]
    Stored,
    Zero,
}

impl GenesisAccountNumber {
    pub fn resolve(self, block: BlockContext, stored: u64) -> u64 {
        match self {
            GenesisAccountNumber::Zero if block.is_genesis() => 0,
            _ => stored,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AbstractAccountParams {
    pub genesis_account_number: GenesisAccountNumber,
}
