//! Compact error codes for the transaction path.
//!
//! ## Error ID Conventions
//!
//! Each error has a 16-bit ID composed of:
//! - Upper 8 bits: Crate namespace (derived from the declaring crate's name)
//! - Lower 8 bits: Local error ID (0x00-0xFF)
//!
//! ### Recommended Local ID Ranges:
//! - 0x00-0x3F: Validation errors (invalid input, missing data)
//! - 0x40-0x7F: System errors (collaborator failures, resource limits)
//! - 0x80-0xBF: Business logic errors (unauthorized, rejected)
//! - 0xC0-0xFF: Reserved for future use
//!
//! The optional `arg` carries a small payload (a sign mode, an inner error id) and is
//! rendered in place of `{arg}` in the error text.

use core::fmt;

/* ───────────────────────────── Runtime handle ──────────────────────────── */

#[derive(Clone, Copy)]
pub struct ErrorCode {
    pub id: u16,
    pub arg: u16,
    text: &'static str,
}

impl ErrorCode {
    pub const fn new(id: u16, text: &'static str) -> Self {
        Self { id, arg: 0, text }
    }

    /// Returns the same error carrying `arg`.
    pub const fn with_arg(self, arg: u16) -> Self {
        Self {
            id: self.id,
            arg,
            text: self.text,
        }
    }

    pub const fn arg(self) -> u16 {
        self.arg
    }

    pub const fn namespace(self) -> u8 {
        (self.id >> 8) as u8
    }

    /// True if `other` has the same id, whatever its arg.
    pub const fn is(self, other: ErrorCode) -> bool {
        self.id == other.id
    }
}

impl PartialEq for ErrorCode {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.arg == other.arg
    }
}

impl Eq for ErrorCode {}

impl core::hash::Hash for ErrorCode {
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
        self.arg.hash(state);
    }
}

/* ───────────────────── Display / Debug implementations ─────────────────── */

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.text.find("{arg}") {
            Some(pos) => {
                f.write_str(&self.text[..pos])?;
                write!(f, "{}", self.arg)?;
                f.write_str(&self.text[pos + 5..])
            }
            None => f.write_str(self.text),
        }
    }
}

impl fmt::Debug for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ErrorCode {{ id: {:#06x}, arg: {}, text: {:?} }}",
            self.id, self.arg, self.text
        )
    }
}

impl std::error::Error for ErrorCode {}

/* ───────────────────── define_error! helper macro ──────────────────────── */

/// Declares a namespaced error constant.
///
/// The namespace is computed from `CARGO_PKG_NAME` of the crate invoking the macro,
/// so two crates can reuse the same local id without colliding.
#[macro_export]
macro_rules! define_error {
    ($ident:ident, $local:expr, $text:expr) => {
        #[allow(dead_code)]
        pub const $ident: $crate::error::ErrorCode = {
            const LOCAL_ID: u16 = $local;
            const _: () = assert!(
                LOCAL_ID <= 0xFF,
                "Local error ID must be <= 0xFF to fit in u8"
            );
            $crate::error::ErrorCode::new(
                (($crate::error::namespace_of(env!("CARGO_PKG_NAME")) as u16) << 8)
                    | (LOCAL_ID & 0xFF),
                $text,
            )
        };
    };
}

/* ────────────────── Per-crate namespace (compile-time FNV-1a) ──────────── */

pub const fn namespace_of(crate_name: &str) -> u8 {
    const FNV_PRIME: u64 = 0x100000001b3;
    const FNV_OFFSET_BASIS: u64 = 0xcbf29ce484222325;

    let bytes = crate_name.as_bytes();
    let mut hash = FNV_OFFSET_BASIS;
    let mut i = 0;
    while i < bytes.len() {
        hash ^= bytes[i] as u64;
        hash = hash.wrapping_mul(FNV_PRIME);
        i += 1;
    }
    (hash & 0xFF) as u8
}

/* ───────────────────────────── Unit tests ──────────────────────────────── */
