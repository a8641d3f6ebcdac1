mod activation;
mod app;
mod errors;
mod hashing;
mod remember;
mod reset;
mod secret;
mod tokens;
mod users;

pub use activation::verify_activation;
pub use app::{
    App,
    AppConfig,
    AppNotifier,
    AppStore,
    AppTypes,
    TokenEmail,
};
pub use errors::Error;
pub use hashing::{
    digest,
    hash_password,
    verify,
    verify_password,
    HashCost,
};
pub use remember::{
    forget,
    remember,
    verify_remember_token,
};
pub use reset::{
    complete_password_reset,
    issue_reset_token,
    reset_expired,
    verify_reset_token,
};
pub use secret::{
    Digest,
    Secret,
};
pub use tokens::{
    new_token,
    TOKEN_BYTES,
};
pub use users::{
    change_password,
    register_new_user,
    CredentialRecord,
    NewUserRecord,
    UserID,
};

/// NIST recommend to require a minimum password length of 8 characters.
///
/// NIST also recommend **not** to require passwords with certain compositions
/// (e.g. upper and lowercase letters, special characters, etc.).
///
/// See https://pages.nist.gov/800-63-3/sp800-63b.html#5111-memorized-secret-authenticators
pub const NIST_MINIMUM_PASSWORD_LENGTH: usize = 8;
