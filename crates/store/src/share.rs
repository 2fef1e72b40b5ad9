//! Share token service: issue, revoke, resolve.
//!
//! Tokens are opaque capabilities granting read-only access to one
//! customer's snapshot. The token index and the customer record are updated
//! together under the record lock, so a reissue atomically invalidates the
//! prior token.

use tracing::info;

use fiado_core::share;
use fiado_shared::{AppError, AppResult, CustomerId};

use crate::Store;

impl Store {
    /// Issues a new share token for a customer.
    ///
    /// Any previously issued token is invalidated in the same step. The
    /// generated token is collision-checked against the index.
    pub fn issue_share_token(&self, customer_id: CustomerId) -> AppResult<String> {
        let token = self.with_record(customer_id, |record| {
            let mut token = share::generate_token();
            while self.tokens.contains_key(&token) {
                token = share::generate_token();
            }
            if let Some(old) = record.customer.share_token.take() {
                self.tokens.remove(&old);
            }
            record.customer.share_token = Some(token.clone());
            self.tokens.insert(token.clone(), customer_id);
            Ok(token)
        })?;
        info!(customer_id = %customer_id, "share token issued");
        Ok(token)
    }

    /// Revokes a customer's share token, if any.
    ///
    /// Idempotent: revoking a customer with no token is a no-op. Lookups by
    /// the old token subsequently fail with NotFound.
    pub fn revoke_share_token(&self, customer_id: CustomerId) -> AppResult<()> {
        self.with_record(customer_id, |record| {
            if let Some(old) = record.customer.share_token.take() {
                self.tokens.remove(&old);
                info!(customer_id = %customer_id, "share token revoked");
            }
            Ok(())
        })
    }

    /// Resolves a share token to its customer.
    ///
    /// Unknown, malformed, and revoked tokens are all NotFound — the answer
    /// never confirms that a token once existed.
    pub fn resolve_share_token(&self, token: &str) -> AppResult<CustomerId> {
        if !share::is_well_formed(token) {
            return Err(AppError::NotFound("share token".to_string()));
        }
        self.tokens
            .get(token)
            .map(|entry| *entry.value())
            .ok_or_else(|| AppError::NotFound("share token".to_string()))
    }
}
