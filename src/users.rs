use crate::{
    app::{App, AppTypes, TokenEmail},
    errors::Error,
    hashing,
    secret::{Digest, Secret},
};

pub trait UserID<T> {
    /// Gets the user's id field.
    fn id(&self) -> T;

    /// Sets the user's id field. This is only called after inserting a new
    /// user, since that is when the user receives their unique id.
    fn set_id(&mut self, new_id: T);
}

/// The credential fields of a persisted user record, as read back from the
/// `AppStore`. Only digests are stored; the plaintext secrets they were
/// derived from exist transiently at issuance and are never persisted.
pub struct CredentialRecord<A: AppTypes> {
    pub user: A::User,

    /// Digest of the current password. Set at registration, replaced on
    /// password change or reset completion; never absent after a successful
    /// registration.
    pub password_digest: Digest,

    /// Digest of the current remember token, or absent if no persistent
    /// session is active.
    pub remember_digest: Digest,

    /// Digest of the activation token issued at registration.
    pub activation_digest: Digest,

    pub activated: bool,
    pub activated_at: Option<A::DateTime>,

    /// Digest of the current reset token and its issuance time, or absent if
    /// no reset is outstanding. Staleness is judged against `reset_sent_at`;
    /// the digest is not deleted automatically when the window lapses.
    pub reset_digest: Digest,
    pub reset_sent_at: Option<A::DateTime>,
}

/// The initial persisted state for a new user: the activation digest is part
/// of the record from its first write, so an activation token is issued
/// exactly once per account.
pub struct NewUserRecord<A: AppTypes> {
    pub user: A::User,
    pub password_digest: Digest,
    pub activation_digest: Digest,
}

/// Registers a new user with a password they have chosen for themselves. An
/// activation token is generated before the record is committed, so its
/// digest is part of the initial persisted state; the plaintext token is
/// handed to the notifier and must be presented via `verify_activation`
/// before the account counts as activated.
///
/// Returns the registered user with their unique id.
pub async fn register_new_user<A: App>(
    app: &A,
    mut user: A::User,
    password: Secret,
) -> Result<A::User, A::Error> {
    check_password_strength(app, &password)?;
    let password_digest = hashing::hash_password(&password, app.hash_cost())?;

    let (activation_token, activation_digest) =
        hashing::generate_token_and_digest(app.hash_cost())?;

    let user_data = NewUserRecord {
        user: user.clone(),
        password_digest,
        activation_digest,
    };
    let user_id = app.insert_user(&user_data)
        .await?;

    // Update the user's id.
    user.set_id(user_id);

    log::debug!("Registered user #{user_id}; activation pending");

    // Delivery is fire-and-forget: a failure leaves the account pending and
    // is only logged, not surfaced to the caller.
    let sent = app
        .send_token_email(&user, TokenEmail::AccountActivation, activation_token)
        .await;
    if let Err(e) = sent {
        log::warn!("Failed to send activation email for user #{user_id}: {e:?}");
    }

    Ok(user)
}

/// Changes a user's password, after verifying the old one. The caller is
/// expected to hold an authenticated session for this user; for the
/// forgotten-password path, use `complete_password_reset` instead.
pub async fn change_password<A: App>(
    app: &A,
    user: &A::User,
    old_password: Secret,
    new_password: Secret,
) -> Result<(), A::Error> {
    // Make sure they actually changed their password. This doesn't need to be
    // done in constant-time, because both are provided by the user.
    if old_password.0 == new_password.0 {
        return Error::PasswordsNotDifferent.as_app_err();
    }

    check_password_strength(app, &new_password)?;

    let data = app
        .get_credentials_by_id(user.id())
        .await?
        .ok_or(Error::UserDataQueryFailed {user_id: user.id().into()})?;

    if !hashing::verify_password(&old_password, &data.password_digest) {
        log::info!("Incorrect old password for user #{}", user.id());
        return Error::IncorrectPassword.as_app_err();
    }

    let new_digest = hashing::hash_password(&new_password, app.hash_cost())?;
    app.update_password_digest(user, new_digest)
        .await?;

    Ok(())
}

pub(crate) fn check_password_strength<A: App>(app: &A, password: &Secret) -> Result<(), Error> {
    if password.0.len() < app.minimum_password_length() {
        return Err(Error::PasswordTooShort);
    }
    Ok(())
}
