use crate::{
    errors::Error,
    hashing::HashCost,
    secret::{Digest, Secret},
    users::{CredentialRecord, NewUserRecord, UserID},
    NIST_MINIMUM_PASSWORD_LENGTH,
};

pub trait App: AppConfig + AppStore + AppNotifier + AppTypes {
    /// Returns the current time. Activation and reset timestamps are taken
    /// from here, so a test implementation can supply a controllable clock.
    fn time_now(&self) -> Self::DateTime;
}

pub trait AppTypes: Sized {
    /// The type of a numeric ID in the database; usually `i64`, `i32`, etc.
    type ID: Into<i64> + TryFrom<i64> + Eq + Copy + std::fmt::Display;

    /// The type used to represent a date and time in the application.
    type DateTime: Copy + Ord + core::ops::Add<std::time::Duration, Output = Self::DateTime>;

    /// The type of a user in the application.
    type User: UserID<Self::ID> + Clone;

    /// A type representing an application error. This must support conversion
    /// from `credlogic::Error`.
    type Error: From<Error> + std::fmt::Debug;
}

/// This trait defines functions which provide configuration parameters to the
/// credential library.
#[allow(unused)]
pub trait AppConfig {
    /// Returns the minimum password length.
    ///
    /// Default is 8, as recommended by NIST.
    fn minimum_password_length(&self) -> usize {
        NIST_MINIMUM_PASSWORD_LENGTH
    }

    /// Returns the cost parameters used when computing password and token
    /// digests. Verification reads the parameters embedded in each stored
    /// digest, so changing this value only affects newly computed digests.
    ///
    /// Default is `HashCost::RECOMMENDED`; test suites should return
    /// `HashCost::FAST`.
    fn hash_cost(&self) -> HashCost {
        HashCost::RECOMMENDED
    }

    /// Returns the number of hours after which an issued password-reset token
    /// is treated as stale. The library records `reset_sent_at` on issuance
    /// and applies this window in `reset_expired` and
    /// `complete_password_reset`; the digest itself is not deleted when the
    /// window lapses.
    ///
    /// Default is 2 hours.
    fn reset_expire_after_hours(&self) -> u64 {
        2
    }
}

/// This trait defines functions which will be used by the credential library
/// to store and retrieve the digest fields of a user record.
///
/// Writes must be atomic per user record, and the implementation must
/// serialize concurrent writes to the same record: of two overlapping
/// "issue" calls for one account, the last committed digest wins, and every
/// previously issued plaintext token for that flow stops verifying. No
/// cross-record coordination is required.
#[trait_variant::make(Send)]
pub trait AppStore: AppTypes {
    /// Gets a user's credential record by their id.
    ///
    /// Returns `None` if there is no user with that id.
    async fn get_credentials_by_id(
        &self,
        user_id: Self::ID,
    ) -> Result<Option<CredentialRecord<Self>>, Self::Error>;

    /// Gets a user's credential record by their identifier (e.g. username or
    /// email).
    ///
    /// Returns `None` if there is no user with that identifier.
    async fn get_credentials_by_identifier(
        &self,
        user_identifier: &str,
    ) -> Result<Option<CredentialRecord<Self>>, Self::Error>;

    /// Inserts a new user with their initial digests, returning the new
    /// user's unique id. The new record starts out not activated, with no
    /// remember digest and no reset digest.
    async fn insert_user(
        &self,
        user_data: &NewUserRecord<Self>,
    ) -> Result<Self::ID, Self::Error>;

    /// Updates a user's stored password digest.
    async fn update_password_digest(
        &self,
        user: &Self::User,
        digest: Digest,
    ) -> Result<(), Self::Error>;

    /// Updates a user's stored remember digest. Writing `Digest::NONE`
    /// clears it.
    async fn update_remember_digest(
        &self,
        user: &Self::User,
        digest: Digest,
    ) -> Result<(), Self::Error>;

    /// Updates a user's stored reset digest and issuance time together, in
    /// one atomic write. Writing `Digest::NONE` with `None` clears both.
    async fn update_reset_digest(
        &self,
        user: &Self::User,
        digest: Digest,
        sent_at: Option<Self::DateTime>,
    ) -> Result<(), Self::Error>;

    /// Marks a user as activated at the given time. Activation is monotonic;
    /// this is never called for an already-activated user.
    async fn set_activated(
        &self,
        user: &Self::User,
        at: Self::DateTime,
    ) -> Result<(), Self::Error>;
}

/// A type of email carrying a freshly issued plaintext token. The token is
/// only ever handed to the notifier or returned to the caller; it is never
/// stored or logged by the library.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenEmail {
    /// Sent once, at registration, with the account-activation token.
    AccountActivation,

    /// Sent on each password-reset request, with the new reset token.
    PasswordReset,
}

/// This trait defines functions which will be used by the credential library
/// to deliver plaintext tokens to users out-of-band.
///
/// Delivery is fire-and-forget: the library logs a warning if `Err` is
/// returned, but does not retry and does not fail the issuing operation.
#[trait_variant::make(Send)]
pub trait AppNotifier: AppTypes {
    /// Sends an email message to the given user containing the plaintext
    /// token, e.g. as a link parameter. The message body is the
    /// application's concern.
    async fn send_token_email(
        &self,
        user: &Self::User,
        email: TokenEmail,
        token: Secret,
    ) -> Result<(), Self::Error>;
}
