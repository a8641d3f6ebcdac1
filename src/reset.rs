use std::time::Duration;

use crate::{
    app::{App, TokenEmail},
    errors::Error,
    hashing,
    secret::{Digest, Secret},
    users::{self, UserID},
};

/// Issues a new password-reset token for the user, stamping the issuance
/// time. The digest and timestamp are written together, overwriting any
/// outstanding reset, so previously issued reset tokens stop verifying.
///
/// The plaintext token is handed to the notifier for out-of-band delivery
/// and also returned to the caller. Delivery is fire-and-forget: a failure
/// is logged, not surfaced.
pub async fn issue_reset_token<A: App>(app: &A, user: &A::User) -> Result<Secret, A::Error> {
    let (token, digest) = hashing::generate_token_and_digest(app.hash_cost())?;
    app.update_reset_digest(user, digest, Some(app.time_now()))
        .await?;

    log::debug!("Issued reset token for user #{}", user.id());

    let mailed = Secret::from(token.0.clone());
    let sent = app
        .send_token_email(user, TokenEmail::PasswordReset, mailed)
        .await;
    if let Err(e) = sent {
        log::warn!("Failed to send reset email for user #{}: {e:?}", user.id());
    }

    Ok(token)
}

/// Checks a presented reset token against the stored digest for the account
/// with the given identifier. An unknown identifier, an absent digest and a
/// mismatched token all verify `false`.
///
/// This checks possession only. Freshness is a separate policy: the caller
/// must also consult `reset_expired` (or use `complete_password_reset`,
/// which applies both checks) before honoring the token.
pub async fn verify_reset_token<A: App>(
    app: &A,
    user_identifier: &str,
    token: &Secret,
) -> Result<bool, A::Error> {
    let Some(data) = app.get_credentials_by_identifier(user_identifier)
        .await?
    else {
        log::debug!("No credential record for presented identifier");
        return Ok(false);
    };

    Ok(hashing::verify(token, &data.reset_digest))
}

/// Indicates whether a reset issued at `reset_sent_at` is stale under the
/// configured window (`AppConfig::reset_expire_after_hours`). An absent
/// timestamp means no reset is outstanding, which counts as expired.
pub fn reset_expired<A: App>(app: &A, reset_sent_at: Option<A::DateTime>) -> bool {
    let Some(sent_at) = reset_sent_at else {
        return true;
    };

    let window = Duration::from_secs(3600 * app.reset_expire_after_hours());
    app.time_now() >= sent_at + window
}

/// Completes a password reset: verifies possession of the reset token and
/// its freshness, then stores the digest of the new password and clears the
/// reset digest and timestamp, so the same link cannot change the password
/// twice.
///
/// All rejection paths — unknown identifier, stale window, mismatched token —
/// return the single `Error::InvalidResetToken`, so an end user sees only
/// "link invalid or expired" and a caller cannot enumerate accounts. A too
/// short replacement password is reported as `Error::PasswordTooShort`, but
/// only after the token has been verified.
///
/// Returns the user whose password was changed.
pub async fn complete_password_reset<A: App>(
    app: &A,
    user_identifier: &str,
    token: &Secret,
    new_password: Secret,
) -> Result<A::User, A::Error> {
    let Some(data) = app.get_credentials_by_identifier(user_identifier)
        .await?
    else {
        log::debug!("No credential record for presented identifier");
        return Error::InvalidResetToken.as_app_err();
    };

    if reset_expired(app, data.reset_sent_at) {
        log::debug!("Reset token for user #{} is stale", data.user.id());
        return Error::InvalidResetToken.as_app_err();
    }

    if !hashing::verify(token, &data.reset_digest) {
        log::info!("Invalid reset token for user #{}", data.user.id());
        return Error::InvalidResetToken.as_app_err();
    }

    users::check_password_strength(app, &new_password)?;

    let new_digest = hashing::hash_password(&new_password, app.hash_cost())?;
    app.update_password_digest(&data.user, new_digest)
        .await?;

    // Reset tokens are single-use.
    app.update_reset_digest(&data.user, Digest::NONE, None)
        .await?;

    log::info!("Completed password reset for user #{}", data.user.id());

    Ok(data.user)
}
