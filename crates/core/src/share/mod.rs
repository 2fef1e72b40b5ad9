//! Opaque share-token generation.
//!
//! Share tokens grant read-only external access to one customer's balance
//! and ledger snapshot. They are capability tokens: unauthenticated, opaque,
//! and revocable. Issue/revoke/resolve live with the store, which owns the
//! token index; this module only defines the token material itself.

use uuid::Uuid;

/// Length of a share token in characters.
pub const TOKEN_LEN: usize = 32;

/// Generates a new opaque share token: 128 bits of randomness, hex encoded.
///
/// Non-guessable by construction; collision checking against already-issued
/// tokens is still the store's responsibility.
#[must_use]
pub fn generate_token() -> String {
    Uuid::new_v4().simple().to_string()
}

/// Returns true if `token` has the shape of a generated share token.
///
/// Used to reject obviously malformed lookups early without touching the
/// token index, so the rejection is indistinguishable from an unknown token.
#[must_use]
pub fn is_well_formed(token: &str) -> bool {
    token.len() == TOKEN_LEN && token.chars().all(|c| c.is_ascii_hexdigit())
}
