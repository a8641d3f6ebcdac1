use zeroize::{Zeroize, ZeroizeOnDrop};

/// A secret string (a password, a remember/activation/reset token, or a
/// digest in transit). Use `Secret::from` to convert a `String` to a
/// `Secret`, and `secret.expose()` to access the string value where
/// necessary.
///
/// Secrets are redacted in `std::fmt::Debug` displays, and are automatically
/// zeroed-out in memory when the value is dropped.
#[cfg_attr(feature = "diesel", derive(diesel_derive_newtype::DieselNewType))]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type), sqlx(transparent))]
pub struct Secret(pub(crate) String);

/// Either a stored credential digest, or nothing. An absent digest is a
/// legitimate state: a user who was never remembered has no remember digest,
/// and a user with no outstanding reset has no reset digest. Use
/// `Digest::from` to convert a `String` or `Option<String>` to a `Digest`,
/// and `digest.expose()` to access the string value where necessary.
///
/// Digests are redacted in `std::fmt::Debug` displays, and are automatically
/// zeroed-out in memory when the value is dropped.
#[cfg_attr(feature = "diesel", derive(diesel_derive_newtype::DieselNewType))]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type), sqlx(transparent))]
pub struct Digest(pub(crate) Option<Secret>);

impl Secret {
    /// Make use of this secret as a `&str`. This may be needed when sending a
    /// token to the client or to a mailer, or storing a digest in the
    /// database.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl Drop for Secret {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

impl ZeroizeOnDrop for Secret {}

impl Digest {
    pub const NONE: Self = Self(None);

    pub fn exists(&self) -> bool {
        self.0.is_some()
    }

    /// Make use of this digest as a `&str`. This may be needed when storing
    /// in the database.
    pub fn expose(&self) -> Option<&str> {
        self.0.as_ref()
            .map(Secret::expose)
    }
}

impl From<String> for Secret {
    fn from(string: String) -> Self {
        Self(string)
    }
}

impl From<String> for Digest {
    fn from(string: String) -> Self {
        Self(Some(Secret(string)))
    }
}

impl From<Option<String>> for Digest {
    fn from(string: Option<String>) -> Self {
        Self(string.map(Secret))
    }
}

impl std::fmt::Debug for Secret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("[SECRET]")
    }
}

impl std::fmt::Debug for Digest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(if self.exists() { "[SECRET]" } else { "[BLANK]" })
    }
}

impl<'de> serde::Deserialize<'de> for Secret {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer)
            .map(Self::from)
    }
}

impl<'de> serde::Deserialize<'de> for Digest {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Option::<Secret>::deserialize(deserializer)
            .map(Self)
    }
}

#[cfg(test)]
mod test {
    use super::{Digest, Secret};

    #[test]
    fn test_debug_redacted() {
        let secret = Secret::from("hunter2".to_string());
        assert_eq!("[SECRET]", format!("{secret:?}"));

        let digest = Digest::from("$argon2id$...".to_string());
        assert_eq!("[SECRET]", format!("{digest:?}"));
        assert_eq!("[BLANK]", format!("{:?}", Digest::NONE));
    }

    #[test]
    fn test_absent_digest() {
        assert!(!Digest::NONE.exists());
        assert_eq!(None, Digest::NONE.expose());
        assert!(Digest::from(Some("x".to_string())).exists());
        assert!(!Digest::from(None).exists());
    }
}
