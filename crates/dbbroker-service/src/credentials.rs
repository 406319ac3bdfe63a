//! Binding password generation and credential assembly.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use dbbroker_core::models::binding::Credentials;
use rand::RngCore;

/// Generate a random password of `num_bytes` bytes, base64url-encoded
/// without padding so it can sit inside a connection URI unescaped.
pub fn generate_password(num_bytes: usize) -> String {
    let mut bytes = vec![0u8; num_bytes];
    rand::rng().fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Credentials handed to a bound application.
pub fn binding_credentials(uri: String, database: &str, username: &str, password: &str) -> Credentials {
    let mut credentials = Credentials::new();
    credentials.insert("uri".into(), uri.into());
    credentials.insert("database".into(), database.into());
    credentials.insert("username".into(), username.into());
    credentials.insert("password".into(), password.into());
    credentials
}
