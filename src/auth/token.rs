use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Sessions (and the tokens that name them) live for 7 days.
pub const SESSION_TTL_DAYS: i64 = 7;

/// Claims encoded within a session token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// User id the session is bound to.
    pub sub: i32,
    /// Expiration timestamp (seconds since epoch).
    pub exp: usize,
    /// Issuance timestamp (seconds since epoch).
    pub iat: usize,
    /// Nanosecond nonce so two tokens issued for the same user within the same
    /// second still differ. The token doubles as the session primary key.
    pub jti: i64,
}

/// Signs and verifies session tokens with a process-wide HMAC key.
///
/// Constructed once at startup from configuration; rotating the secret
/// invalidates every outstanding session, which is the intended fail-safe.
pub struct TokenSigner {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl TokenSigner {
    pub fn new(secret: &str) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    /// Issues a signed token for `user_id`, returning it together with its
    /// absolute expiry (stored alongside the session row).
    pub fn issue(&self, user_id: i32) -> Result<(String, DateTime<Utc>), AppError> {
        let now = Utc::now();
        let expires_at = now + Duration::days(SESSION_TTL_DAYS);

        let claims = Claims {
            sub: user_id,
            exp: expires_at.timestamp() as usize,
            iat: now.timestamp() as usize,
            jti: now.timestamp_nanos_opt().unwrap_or_default(),
        };

        let token = encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| AppError::Internal(format!("Failed to generate token: {}", e)))?;

        Ok((token, expires_at))
    }

    /// Verifies signature and expiry. Any failure (tampered bytes, wrong key,
    /// expired, malformed) resolves to `None` rather than an error: absence of
    /// identity is a normal outcome, not a fault.
    pub fn verify(&self, token: &str) -> Option<Claims> {
        decode::<Claims>(token, &self.decoding, &Validation::default())
            .map(|data| data.claims)
            .ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_and_verify_round_trip() {
        let signer = TokenSigner::new("test-secret");
        let (token, expires_at) = signer.issue(42).unwrap();

        let claims = signer.verify(&token).expect("token should verify");
        assert_eq!(claims.sub, 42);
        assert_eq!(claims.exp, expires_at.timestamp() as usize);
        assert!(expires_at > Utc::now() + Duration::days(SESSION_TTL_DAYS - 1));
    }

    #[test]
    fn test_tampering_invalidates_token() {
        let signer = TokenSigner::new("test-secret");
        let (token, _) = signer.issue(1).unwrap();

        // Flip one byte in the payload segment.
        let mut bytes = token.into_bytes();
        let mid = bytes.len() / 2;
        bytes[mid] = if bytes[mid] == b'A' { b'B' } else { b'A' };
        let tampered = String::from_utf8(bytes).unwrap();

        assert!(signer.verify(&tampered).is_none());
    }

    #[test]
    fn test_wrong_key_is_treated_as_not_found() {
        let signer = TokenSigner::new("test-secret");
        let other = TokenSigner::new("rotated-secret");
        let (token, _) = signer.issue(1).unwrap();

        assert!(other.verify(&token).is_none());
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let signer = TokenSigner::new("test-secret");

        let past = Utc::now() - Duration::days(2);
        let claims = Claims {
            sub: 1,
            exp: past.timestamp() as usize,
            iat: (past - Duration::days(SESSION_TTL_DAYS)).timestamp() as usize,
            jti: 0,
        };
        let expired = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret("test-secret".as_bytes()),
        )
        .unwrap();

        assert!(signer.verify(&expired).is_none());
    }

    #[test]
    fn test_garbage_is_rejected() {
        let signer = TokenSigner::new("test-secret");
        assert!(signer.verify("").is_none());
        assert!(signer.verify("not-a-token").is_none());
    }

    #[test]
    fn test_same_second_tokens_differ() {
        let signer = TokenSigner::new("test-secret");
        let (first, _) = signer.issue(1).unwrap();
        let (second, _) = signer.issue(1).unwrap();
        assert_ne!(first, second);
    }
}
