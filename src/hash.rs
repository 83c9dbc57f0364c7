//! One-way transforms: password hashing and login-derived user ids.

use sha2::{Digest, Sha256};

use crate::store::UserId;

/// Hash a plaintext password for storage. The store only ever sees the
/// result; plaintext never leaves the front end.
pub fn hash_password(password: &str) -> String {
    format!("{:x}", Sha256::digest(password.as_bytes()))
}

/// Derive a stable user id from a login.
///
/// Pure function of the login, so the same login maps to the same id across
/// invocations and files.
pub fn derive_user_id(login: &str) -> UserId {
    let digest = Sha256::digest(login.as_bytes());
    u32::from_be_bytes([digest[0], digest[1], digest[2], digest[3]])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_hash_is_stable_and_hex() {
        let a = hash_password("secret");
        let b = hash_password("secret");
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn different_passwords_hash_differently() {
        assert_ne!(hash_password("secret"), hash_password("Secret"));
    }

    #[test]
    fn user_id_is_a_pure_function_of_login() {
        assert_eq!(derive_user_id("alice"), derive_user_id("alice"));
        assert_ne!(derive_user_id("alice"), derive_user_id("bob"));
    }
}
