//! Refresh-token session DTO.

use taxi_core::types::{DbId, Timestamp};

/// A refresh token that was just handed to a driver. Only its digest is kept.
pub struct NewSession {
    pub driver_id: DbId,
    pub refresh_token_hash: String,
    pub expires_at: Timestamp,
}
