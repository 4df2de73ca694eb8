//! JSON messages exchanged with account contracts.
//!
//! ```json
//! {"before_tx": {"msgs": [{"type_url": "...", "value": "<base64>"}], "sign_bytes": "<base64>", "signature": "<base64>"}}
//! {"after_tx": {"success": true}}
//! ```

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use core::fmt;
use evolve_core::{SdkResult, ERR_ENCODING};
use evolve_stf_traits::AnyMsg;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

/// Raw bytes, base64 encoded in JSON.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Binary(pub Vec<u8>);

impl Binary {
    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    pub fn to_base64(&self) -> String {
        STANDARD.encode(&self.0)
    }
}

impl From<Vec<u8>> for Binary {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl From<&[u8]> for Binary {
    fn from(bytes: &[u8]) -> Self {
        Self(bytes.to_vec())
    }
}

impl fmt::Debug for Binary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Binary({})", self.to_base64())
    }
}

impl Serialize for Binary {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_base64())
    }
}

impl<'de> Deserialize<'de> for Binary {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        STANDARD
            .decode(encoded)
            .map(Binary)
            .map_err(de::Error::custom)
    }
}

/// A transaction message as seen by the contract.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodedMsg {
    pub type_url: String,
    pub value: Binary,
}

impl From<AnyMsg> for EncodedMsg {
    fn from(any: AnyMsg) -> Self {
        Self {
            type_url: any.type_url,
            value: Binary(any.value),
        }
    }
}

impl From<EncodedMsg> for AnyMsg {
    fn from(msg: EncodedMsg) -> Self {
        AnyMsg {
            type_url: msg.type_url,
            value: msg.value.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BeforeTx {
    pub msgs: Vec<EncodedMsg>,
    pub sign_bytes: Binary,
    pub signature: Binary,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AfterTx {
    pub success: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountSudoMsg {
    BeforeTx(BeforeTx),
    AfterTx(AfterTx),
}

impl AccountSudoMsg {
    pub fn to_json_vec(&self) -> SdkResult<Vec<u8>> {
        serde_json::to_vec(self).map_err(|_| ERR_ENCODING)
    }

    pub fn from_json_slice(bytes: &[u8]) -> SdkResult<Self> {
        serde_json::from_slice(bytes).map_err(|_| ERR_ENCODING)
    }
}
