use sha1::{Digest, Sha1};

/// Application salt the server appends before hashing.
const PASSWORD_SALT: &str = "JarJarBinks9";

/// Digest sent in place of a plaintext password: lowercase hex SHA-1 of the
/// UTF-8 password followed by the salt. Must match the server bit for bit.
pub fn password_digest(password: &str) -> String {
    let mut hasher = Sha1::new();
    hasher.update(password.as_bytes());
    hasher.update(PASSWORD_SALT.as_bytes());
    let hash = hasher.finalize();
    hash.iter().map(|b| format!("{b:02x}")).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_vectors() {
        assert_eq!(
            password_digest("secret"),
            "8345d2b2797db3a560bbf690610d3aac6811d696"
        );
        assert_eq!(password_digest(""), "e48a684478287bf6432cfea922e4caa6b09cddf2");
        assert_eq!(
            password_digest("hunter2"),
            "bb68ad5a1fec9e4ce6a0875da3a6fc64450727b2"
        );
    }

    #[test]
    fn hashes_utf8_bytes() {
        assert_eq!(
            password_digest("pässword"),
            "45b768d62a4dbfd625783983a447792b54cca360"
        );
    }

    #[test]
    fn deterministic_and_distinct() {
        assert_eq!(password_digest("a"), password_digest("a"));
        assert_ne!(password_digest("a"), password_digest("b"));
        let digest = password_digest("anything");
        assert_eq!(digest.len(), 40);
        assert!(digest.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }
}
