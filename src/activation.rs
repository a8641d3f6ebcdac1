use crate::{
    app::App,
    hashing,
    secret::Secret,
    users::UserID,
};

/// Checks a presented activation token for the account with the given
/// identifier (e.g. email or username), and on the first success transitions
/// the account to activated, stamping `activated_at` with the current time.
///
/// Activation is monotonic: once activated, an account never returns to
/// pending, and repeating a successful verification leaves the record
/// untouched. An unknown identifier or a mismatched token verifies `false`
/// without revealing which.
pub async fn verify_activation<A: App>(
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

    if !hashing::verify(token, &data.activation_digest) {
        log::info!("Invalid activation token for user #{}", data.user.id());
        return Ok(false);
    }

    if data.activated {
        // Already activated; nothing to write.
        return Ok(true);
    }

    app.set_activated(&data.user, app.time_now())
        .await?;

    log::info!("Activated user #{}", data.user.id());

    Ok(true)
}
