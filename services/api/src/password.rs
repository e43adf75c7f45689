//! Password hashing and salt generation
//!
//! The stored credential is `sha256(password || salt)` with a per-user
//! 8-character salt. This is a fast general-purpose hash, not a slow KDF;
//! it is kept as-is for stored-hash compatibility with the existing user
//! base (see DESIGN.md for the security note — a memory-hard KDF such as
//! argon2 is the recommended replacement once a migration path exists).

use rand::Rng;
use sha2::{Digest, Sha256};

/// Alphabet the salt characters are drawn from: digits, letters, and a wide
/// range of printable punctuation.
const SALT_ALPHABET: &[u8] =
    b"0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ!#$%&'()*+,-./:;<=>?@[\\]^_`{|}~";

/// Length of a generated salt
const SALT_LEN: usize = 8;

/// Hash a password with the given salt
///
/// Deterministic: the same (password, salt) pair always produces the same
/// hex digest.
pub fn hash_password(password: &str, salt: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(password.as_bytes());
    hasher.update(salt.as_bytes());
    hex_encode(&hasher.finalize())
}

/// Generate a new 8-character salt
pub fn generate_salt() -> String {
    let mut rng = rand::thread_rng();
    (0..SALT_LEN)
        .map(|_| SALT_ALPHABET[rng.gen_range(0..SALT_ALPHABET.len())] as char)
        .collect()
}

/// Generate the 4-digit display disambiguator for a new user
pub fn generate_random_id() -> i32 {
    rand::thread_rng().gen_range(0..10_000)
}

/// Compare two digests without short-circuiting on the first mismatch
///
/// Both inputs are hex digests of fixed length in practice; a length
/// mismatch fails immediately, which leaks nothing useful here.
pub fn digests_match(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }

    a.bytes()
        .zip(b.bytes())
        .fold(0u8, |acc, (x, y)| acc | (x ^ y))
        == 0
}

fn hex_encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_is_deterministic() {
        let first = hash_password("pw123", "saltsalt");
        let second = hash_password("pw123", "saltsalt");
        assert_eq!(first, second);
    }

    #[test]
    fn test_salt_diversifies_output() {
        let a = hash_password("pw123", "saltaaaa");
        let b = hash_password("pw123", "saltbbbb");
        assert_ne!(a, b);
    }

    #[test]
    fn test_hash_is_hex_sha256() {
        let digest = hash_password("", "");
        assert_eq!(digest.len(), 64);
        assert!(digest.chars().all(|c| c.is_ascii_hexdigit()));
        // sha256 of the empty string, password and salt both empty
        assert_eq!(
            digest,
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_generated_salt_shape() {
        for _ in 0..100 {
            let salt = generate_salt();
            assert_eq!(salt.len(), SALT_LEN);
            assert!(salt.bytes().all(|b| SALT_ALPHABET.contains(&b)));
        }
    }

    #[test]
    fn test_random_id_range() {
        for _ in 0..100 {
            let id = generate_random_id();
            assert!((0..10_000).contains(&id));
        }
    }

    #[test]
    fn test_digests_match() {
        let digest = hash_password("pw123", "saltsalt");
        assert!(digests_match(&digest, &digest));
        assert!(!digests_match(&digest, &hash_password("pw124", "saltsalt")));
        assert!(!digests_match(&digest, ""));
    }
}
