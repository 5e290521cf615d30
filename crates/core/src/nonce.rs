//! Short-lived anti-forgery tokens for page-originated requests.
//!
//! A nonce is an HMAC-SHA256 over the action name and a time tick, truncated
//! to [`NONCE_LENGTH`] hex characters. One tick spans half of
//! [`NONCE_LIFETIME_SECS`]; a nonce verifies during the tick it was issued in
//! and the one after it.

use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use sha2::Sha256;

/// Upper bound on how long an issued nonce stays valid.
pub const NONCE_LIFETIME_SECS: i64 = 86_400;

/// Length of an encoded nonce in hex characters.
pub const NONCE_LENGTH: usize = 20;

type HmacSha256 = Hmac<Sha256>;

/// Issues and verifies nonces with a server-side secret.
#[derive(Clone)]
pub struct NonceIssuer {
    secret: String,
}

impl std::fmt::Debug for NonceIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NonceIssuer").finish_non_exhaustive()
    }
}

impl NonceIssuer {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    pub fn issue(&self, action: &str) -> String {
        self.issue_at(action, Utc::now())
    }

    pub fn issue_at(&self, action: &str, now: DateTime<Utc>) -> String {
        self.compute(action, tick(now))
    }

    pub fn verify(&self, action: &str, nonce: &str) -> bool {
        self.verify_at(action, nonce, Utc::now())
    }

    pub fn verify_at(&self, action: &str, nonce: &str, now: DateTime<Utc>) -> bool {
        if nonce.len() != NONCE_LENGTH {
            return false;
        }
        let current = tick(now);
        [current, current - 1]
            .iter()
            .any(|t| constant_time_eq(self.compute(action, *t).as_bytes(), nonce.as_bytes()))
    }

    fn compute(&self, action: &str, tick: i64) -> String {
        let mut mac =
            HmacSha256::new_from_slice(self.secret.as_bytes()).expect("HMAC accepts any key length");
        mac.update(format!("{tick}|{action}").as_bytes());
        let digest = mac.finalize().into_bytes();
        let mut encoded: String = digest.iter().map(|b| format!("{b:02x}")).collect();
        encoded.truncate(NONCE_LENGTH);
        encoded
    }
}

fn tick(now: DateTime<Utc>) -> i64 {
    now.timestamp().div_euclid(NONCE_LIFETIME_SECS / 2)
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
