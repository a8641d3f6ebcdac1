#[derive(Debug)]
pub enum Error {
    /// Indicates that the operating system's secure random source could not
    /// produce bytes. This is fatal to token issuance; the library never
    /// falls back to a weaker source.
    EntropySource(rand::Error),

    /// Indicates that the user did not provide a correct password when
    /// changing their password.
    IncorrectPassword,

    /// Indicates that a reset attempt could not be honored. The token may
    /// refer to no known account, may not match the stored digest, or the
    /// reset window may have lapsed; these cases are deliberately not
    /// distinguished, so a caller cannot enumerate which one occurred.
    InvalidResetToken,

    /// Indicates that the user chose a password which is shorter than
    /// `AppConfig::minimum_password_length()`.
    PasswordTooShort,

    /// Indicates that, when changing their password, the user chose a new
    /// password which is the same as the old one.
    PasswordsNotDifferent,

    /// Internal error which occurs when a user record could not be re-read
    /// during a password change.
    ///
    /// This either indicates a logic error in your `AppStore` implementation,
    /// or a race condition in which the user is deleted after being
    /// authenticated but before the password change is applied.
    UserDataQueryFailed {user_id: i64},

    /// Internal error which occurs when hashing a password or token. This
    /// could indicate, for example, that the hashing engine rejected its
    /// input, or that salt generation failed.
    Hasher(password_hash::Error),

    /// Internal error which occurs when the configured `HashCost` is outside
    /// the range the hashing algorithm accepts.
    InvalidHashCost(argon2::Error),
}

impl Error {
    pub(crate) fn as_app_err<T, E: From<Self>>(self) -> Result<T, E> {
        Err(E::from(self))
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EntropySource(e) => write!(f, "secure random source unavailable: {e}"),
            Self::IncorrectPassword => f.write_str("incorrect password"),
            Self::InvalidResetToken => f.write_str("reset link is invalid or expired"),
            Self::PasswordTooShort => f.write_str("password is too short"),
            Self::PasswordsNotDifferent => f.write_str("new password must be different"),
            Self::UserDataQueryFailed {user_id} => {
                write!(f, "no credential record for user #{user_id}")
            },
            Self::Hasher(e) => write!(f, "password hashing failed: {e}"),
            Self::InvalidHashCost(e) => write!(f, "invalid hash cost parameters: {e}"),
        }
    }
}

impl std::error::Error for Error {}
