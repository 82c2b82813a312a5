//! Prefixed identifier generation.
//!
//! Every identifier is `<prefix>_<suffix>` where the suffix is a random v4
//! UUID in simple form: 32 lowercase hex characters.

use uuid::Uuid;

/// Prefix for session identifiers.
pub const SESSION_PREFIX: &str = "sess";
/// Prefix for question identifiers.
pub const QUESTION_PREFIX: &str = "q";
/// Prefix for response identifiers.
pub const RESPONSE_PREFIX: &str = "resp";
/// Prefix for payment transaction identifiers.
pub const PAYMENT_PREFIX: &str = "pay";

/// Length of the random part of every identifier.
pub const SUFFIX_LEN: usize = 32;

/// Mint a fresh identifier with the given prefix.
pub fn make_id(prefix: &str) -> String {
    format!("{prefix}_{}", Uuid::new_v4().simple())
}
