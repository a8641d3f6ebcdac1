use crate::{
    app::App,
    hashing,
    secret::{Digest, Secret},
    users::UserID,
};

/// Issues a new remember token for a persistent session. Only the token's
/// digest is stored; the returned plaintext is the one thing the caller may
/// hand to the client, e.g. in a persistent cookie.
///
/// Any previously issued remember token for this user stops verifying once
/// the new digest is written.
pub async fn remember<A: App>(app: &A, user: &A::User) -> Result<Secret, A::Error> {
    let (token, digest) = hashing::generate_token_and_digest(app.hash_cost())?;
    app.update_remember_digest(user, digest)
        .await?;

    log::debug!("Issued remember token for user #{}", user.id());

    Ok(token)
}

/// Checks a presented remember token against the user's stored digest.
///
/// Fails closed: an unknown user id, an absent digest (never remembered, or
/// forgotten since) and a mismatched token all verify `false`, and are not
/// distinguishable to the caller. A `false` result must be treated exactly
/// like "not remembered".
pub async fn verify_remember_token<A: App>(
    app: &A,
    user_id: A::ID,
    token: &Secret,
) -> Result<bool, A::Error> {
    let Some(data) = app.get_credentials_by_id(user_id)
        .await?
    else {
        log::debug!("No credential record for user #{user_id}");
        return Ok(false);
    };

    Ok(hashing::verify(token, &data.remember_digest))
}

/// Discards the user's persistent session by clearing the remember digest.
///
/// This is a local, already-authenticated operation: no token is presented
/// or checked, and clearing an absent digest is not an error.
pub async fn forget<A: App>(app: &A, user: &A::User) -> Result<(), A::Error> {
    log::debug!("Forgetting user #{}", user.id());

    app.update_remember_digest(user, Digest::NONE)
        .await
}
