use crate::{
    errors::Error,
    secret::Secret,
};

/// The number of bytes of entropy in a new token. Tokens prove possession of
/// a capability (an active session, a pending activation or reset), so they
/// must be unguessable: 16 bytes (128 bits) is the floor, well above OWASP's
/// recommendation of at least 8 bytes for session identifiers.
/// https://cheatsheetseries.owasp.org/cheatsheets/Session_Management_Cheat_Sheet.html#session-id-entropy
///
/// We round up to the next multiple of three, since the token is encoded in
/// base64, so each three unencoded bytes become four encoded bytes. If the
/// number of bytes is not a multiple of 3, the encoded token will end with
/// filler characters which add no entropy.
pub const TOKEN_BYTES: usize = 18;

/// Generates a new random token with `TOKEN_BYTES` bytes of entropy,
/// base64-encoded with the URL-safe alphabet, so it can appear in an emailed
/// link or a cookie without escaping.
///
/// The bytes are drawn from the operating system's secure random source. If
/// that source cannot produce bytes, the error is returned as
/// `Error::EntropySource`; issuance must abort rather than fall back to a
/// weaker source.
///
/// Purely functional; callable concurrently without coordination.
pub fn new_token() -> Result<Secret, Error> {
    use rand::{rngs::OsRng, RngCore};

    let mut bytes = [0u8; TOKEN_BYTES];
    OsRng.try_fill_bytes(&mut bytes)
        .map_err(Error::EntropySource)?;

    Ok(Secret(base64_encode(&bytes)))
}

fn base64_encode(bytes: &[u8]) -> String {
    // Tokens will be used in URLs
    use base64::{engine::general_purpose::URL_SAFE, Engine};
    URL_SAFE.encode(bytes)
}

#[cfg(test)]
mod test {
    use std::collections::HashSet;

    use super::{new_token, TOKEN_BYTES};

    #[test]
    fn test_token_entropy() {
        use base64::{engine::general_purpose::URL_SAFE, Engine};

        let token = new_token().unwrap();
        let decoded = URL_SAFE.decode(token.expose()).unwrap();

        assert_eq!(TOKEN_BYTES, decoded.len());
        assert!(decoded.len() * 8 >= 128, "Tokens need at least 128 bits of entropy");
    }

    #[test]
    fn test_token_url_safe() {
        let token = new_token().unwrap();

        assert!(token.expose().chars().all(|c| {
            c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '='
        }));
    }

    #[test]
    fn test_tokens_distinct() {
        let mut seen = HashSet::new();
        for _ in 0..10_000 {
            let token = new_token().unwrap();
            assert!(
                seen.insert(token.expose().to_string()),
                "Two draws produced an equal token",
            );
        }
    }
}
