//! Core types shared by the evolve authentication pipeline.
//!
//! - [`ErrorCode`] and the [`define_error!`] macro
//! - [`Address`], [`BlockContext`]
//! - [`Environment`], the state handle every pipeline stage works against

#[macro_use]
pub mod error;
pub mod encoding;

use borsh::{BorshDeserialize, BorshSerialize};
use core::fmt;

pub use error::ErrorCode;

define_error!(ERR_ENCODING, 0x00, "encoding error");
define_error!(ERR_UNAUTHORIZED, 0x02, "unauthorized");
define_error!(ERR_INVALID_CHECKPOINT, 0x03, "invalid checkpoint");

pub type SdkResult<T> = Result<T, ErrorCode>;

/// Opaque account or contract address.
///
/// Rendered as lowercase hex, which is also the string form used in sign documents.
#[derive(
    Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default, BorshSerialize, BorshDeserialize,
)]
pub struct Address(Vec<u8>);

impl Address {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&[u8]> for Address {
    fn from(bytes: &[u8]) -> Self {
        Self(bytes.to_vec())
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(&self.0))
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({self})")
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct BlockContext {
    pub height: u64,
    pub time: u64,
}

impl BlockContext {
    pub const fn new(height: u64, time: u64) -> Self {
        Self { height, time }
    }

    pub const fn is_genesis(&self) -> bool {
        self.height == 0
    }
}

/// A marker into an [`Environment`]'s change log.
///
/// Restoring a checkpoint discards every write made after it was taken.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Checkpoint(usize);

impl Checkpoint {
    pub const fn new(marker: usize) -> Self {
        Self(marker)
    }

    pub const fn marker(self) -> usize {
        self.0
    }
}

pub trait ReadonlyKV {
    fn get(&self, key: &[u8]) -> SdkResult<Option<Vec<u8>>>;
}

/// State and block information visible to a transaction while it is processed.
pub trait Environment {
    fn block(&self) -> BlockContext;
    fn get(&self, key: &[u8]) -> SdkResult<Option<Vec<u8>>>;
    fn set(&mut self, key: &[u8], value: Vec<u8>) -> SdkResult<()>;
    fn remove(&mut self, key: &[u8]) -> SdkResult<()>;
    fn checkpoint(&self) -> Checkpoint;
    fn restore(&mut self, checkpoint: Checkpoint) -> SdkResult<()>;
}

/// A macro that ensures a condition holds true. If not, returns an error.
///
/// # Usage
///
/// ```rust
/// use evolve_core::{ensure, SdkResult, ERR_UNAUTHORIZED};
///
/// fn only_positive(value: i32) -> SdkResult<()> {
///     ensure!(value > 0, ERR_UNAUTHORIZED);
///     Ok(())
/// }
///
/// assert!(only_positive(1).is_ok());
/// assert_eq!(only_positive(-1), Err(ERR_UNAUTHORIZED));
/// ```
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $err:expr) => {
        if !$cond {
            return Err($err.into());
        }
    };
}
