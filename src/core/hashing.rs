//! Password hashing built on Argon2id.
//!
//! One set of parameters for every stored credential; the resulting PHC
//! string carries algorithm, parameters, and salt, so verification needs no
//! out-of-band state. Verification failures of any kind (wrong password,
//! malformed token) collapse to `false`.

use argon2::password_hash::SaltString;
use argon2::{
    password_hash, Algorithm, Argon2, Params, PasswordHash, PasswordHasher, PasswordVerifier,
    Version,
};
use rand::rngs::OsRng;

// 19 MiB / 3 iterations / 1 lane: interactive-latency Argon2id suitable for a
// single-user vault on commodity hardware.
const MEMORY_COST_KIB: u32 = 19 * 1024;
const TIME_COST: u32 = 3;
const PARALLELISM: u32 = 1;

/// Syntactically valid token that matches no real password (its digest is all
/// zero bytes). Verifying against it costs one full Argon2 run, which lets
/// callers burn the same time on absent records as on present ones.
pub const DECOY_TOKEN: &str = "$argon2id$v=19$m=19456,t=3,p=1$AAAAAAAAAAAAAAAAAAAAAA$AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA";

fn hasher() -> Result<Argon2<'static>, password_hash::Error> {
    let params = Params::new(MEMORY_COST_KIB, TIME_COST, PARALLELISM, None)?;
    Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
}

/// Hash a plaintext password with a fresh random salt and return the PHC
/// string. Two calls on the same plaintext produce different tokens.
pub fn hash(plaintext: &str) -> Result<String, password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    Ok(hasher()?.hash_password(plaintext.as_bytes(), &salt)?.to_string())
}

/// Verify a plaintext against a stored token. The digest comparison inside
/// the verifier is constant-time; a token that fails to parse verifies false
/// rather than erroring.
pub fn verify(token: &str, plaintext: &str) -> bool {
    let parsed = match PasswordHash::new(token) {
        Ok(hash) => hash,
        Err(_) => return false,
    };
    match hasher() {
        Ok(ctx) => ctx.verify_password(plaintext.as_bytes(), &parsed).is_ok(),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_then_verify() {
        let token = hash("hunter2").unwrap();
        assert!(verify(&token, "hunter2"));
        assert!(!verify(&token, "hunter3"));
    }

    #[test]
    fn test_salt_is_randomized() {
        let a = hash("same input").unwrap();
        let b = hash("same input").unwrap();
        assert_ne!(a, b);
        assert!(verify(&a, "same input"));
        assert!(verify(&b, "same input"));
    }

    #[test]
    fn test_token_is_self_describing() {
        let token = hash("x").unwrap();
        assert!(token.starts_with("$argon2id$"));
    }

    #[test]
    fn test_malformed_token_verifies_false() {
        assert!(!verify("", "anything"));
        assert!(!verify("not a phc string", "anything"));
        assert!(!verify("$argon2id$v=19$garbage", "anything"));
    }

    #[test]
    fn test_decoy_token_parses_but_never_matches() {
        assert!(PasswordHash::new(DECOY_TOKEN).is_ok());
        assert!(!verify(DECOY_TOKEN, ""));
        assert!(!verify(DECOY_TOKEN, "password"));
    }

    #[test]
    fn test_empty_plaintext_roundtrip() {
        let token = hash("").unwrap();
        assert!(verify(&token, ""));
        assert!(!verify(&token, " "));
    }
}
