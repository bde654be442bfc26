//! Opaque session tokens.
//!
//! Wire form is `{token_id}|{secret}`. Only the SHA-256 digest of `secret` is ever
//! persisted, so a leaked table cannot be replayed as bearer credentials.

use std::fmt;

use rand::RngExt;
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;
use uuid::Uuid;

/// Length of the random part of a token.
pub const TOKEN_SECRET_LEN: usize = 40;

const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Errors returned by [`PlainTextToken::parse`].
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    #[error("malformed token")]
    Malformed,
}

/// A token as handed to the client once, at login.
#[derive(Clone, PartialEq, Eq)]
pub struct PlainTextToken {
    pub id: Uuid,
    pub secret: String,
}

impl PlainTextToken {
    /// Mint a new token with a fresh id and secret.
    pub fn generate() -> Self {
        let mut rng = rand::rng();
        let secret = (0..TOKEN_SECRET_LEN)
            .map(|_| CHARSET[rng.random_range(0..CHARSET.len())] as char)
            .collect();
        Self {
            id: Uuid::now_v7(),
            secret,
        }
    }

    pub fn parse(raw: &str) -> Result<Self, TokenError> {
        let (id, secret) = raw.trim().split_once('|').ok_or(TokenError::Malformed)?;
        let id = id.parse::<Uuid>().map_err(|_| TokenError::Malformed)?;
        if secret.len() != TOKEN_SECRET_LEN || !secret.bytes().all(|b| b.is_ascii_alphanumeric())
        {
            return Err(TokenError::Malformed);
        }
        Ok(Self {
            id,
            secret: secret.to_owned(),
        })
    }

    /// Hex SHA-256 of the secret, the value stored server-side.
    pub fn digest(&self) -> String {
        hex::encode(Sha256::digest(self.secret.as_bytes()))
    }

    /// Constant-time comparison against a stored digest.
    pub fn matches(&self, stored_digest: &str) -> bool {
        self.digest()
            .as_bytes()
            .ct_eq(stored_digest.as_bytes())
            .into()
    }
}

impl fmt::Display for PlainTextToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}|{}", self.id, self.secret)
    }
}

// Never print the secret.
impl fmt::Debug for PlainTextToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlainTextToken")
            .field("id", &self.id)
            .finish_non_exhaustive()
    }
}
