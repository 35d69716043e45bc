//! Request credentials.
//!
//! Subsonic 1.13.0+ servers accept a salted token instead of the password:
//!
//! ```text
//! s = <random salt>
//! t = hex(md5(password + s))
//! ```
//!
//! Older servers and LDAP-backed accounts (error 41) need the password in
//! the `p` parameter instead.

use crate::values::QueryValues;

use md5::{Digest, Md5};
use rand::Rng;

const SALT_LEN: usize = 20;
const CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// How the password is put on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthMode {
    /// `t` + `s`: salted MD5 token, fresh salt per request.
    #[default]
    Token,
    /// `p`: the password itself.
    Plain,
}

impl AuthMode {
    pub fn from_use_salt(use_salt_auth: bool) -> Self {
        if use_salt_auth { Self::Token } else { Self::Plain }
    }
}

/// Generate a random alphanumeric salt.
pub fn random_salt() -> String {
    let mut rng = rand::rng();
    (0..SALT_LEN)
        .map(|_| char::from(CHARSET[rng.random_range(0..CHARSET.len())]))
        .collect()
}

/// Lowercase hex MD5 of `password + salt`.
pub fn token(password: &str, salt: &str) -> String {
    let mut hasher = Md5::new();
    hasher.update(password.as_bytes());
    hasher.update(salt.as_bytes());
    hex::encode(hasher.finalize())
}

/// Write `u` and the password parameters for one request.
pub(crate) fn write_credentials(
    q: &mut QueryValues,
    username: &str,
    password: &str,
    mode: AuthMode,
) {
    q.set("u", username);
    match mode {
        AuthMode::Token => {
            let salt = random_salt();
            q.set("t", token(password, &salt));
            q.set("s", salt);
        }
        AuthMode::Plain => q.set("p", password),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_matches_protocol_example() {
        // Example from the Subsonic API documentation.
        assert_eq!(token("sesame", "c19b2d"), "26719a1196d2a940705a59634eb18eab");
    }

    #[test]
    fn salt_is_alphanumeric() {
        let salt = random_salt();
        assert_eq!(salt.len(), SALT_LEN);
        assert!(salt.chars().all(|c| c.is_ascii_alphanumeric()));
        assert_ne!(salt, random_salt());
    }

    #[test]
    fn credentials_by_mode() {
        let mut q = QueryValues::new();
        write_credentials(&mut q, "alice", "pw", AuthMode::Token);
        assert_eq!(q.first("u"), Some("alice"));
        let salt = q.first("s").unwrap().to_owned();
        assert_eq!(q.first("t"), Some(token("pw", &salt).as_str()));
        assert!(!q.contains_key("p"));

        let mut q = QueryValues::new();
        write_credentials(&mut q, "alice", "pw", AuthMode::Plain);
        assert_eq!(q.first("p"), Some("pw"));
        assert!(!q.contains_key("t"));
    }
}
