use anyhow::anyhow;
use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

/// Hashes a PIN into an Argon2 PHC string with a fresh random salt.
pub fn hash_pin(pin: &str) -> anyhow::Result<String> {
    let argon2 = Argon2::default();
    let salt = SaltString::generate(&mut OsRng);

    argon2
        .hash_password(pin.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| anyhow!("argon2 hash_password failed: {e}"))
}

/// `Ok(false)` on mismatch; `Err` only when the stored hash cannot be parsed.
pub fn verify_pin(pin: &str, hashed: &str) -> anyhow::Result<bool> {
    let parsed = PasswordHash::new(hashed).map_err(|e| anyhow!("stored PIN hash is invalid: {e}"))?;

    Ok(Argon2::default()
        .verify_password(pin.as_bytes(), &parsed)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verifies_matching_pin() {
        let hash = hash_pin("1234").unwrap();
        assert!(hash.starts_with("$argon2"));
        assert!(!hash.contains("1234"));
        assert!(verify_pin("1234", &hash).unwrap());
    }

    #[test]
    fn rejects_wrong_pin() {
        let hash = hash_pin("1234").unwrap();
        assert!(!verify_pin("0000", &hash).unwrap());
    }

    #[test]
    fn salts_every_hash() {
        assert_ne!(hash_pin("1234").unwrap(), hash_pin("1234").unwrap());
    }

    #[test]
    fn malformed_hash_is_an_error() {
        assert!(verify_pin("1234", "not-a-hash").is_err());
    }
}
