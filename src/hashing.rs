use argon2::{Algorithm, Argon2, Params, Version};
use password_hash::{
    PasswordHasher,
    PasswordVerifier,
    SaltString,
};

use crate::{
    errors::Error,
    secret::{Digest, Secret},
    tokens,
};

/// Cost parameters for the digest algorithm (Argon2id). The same algorithm is
/// used for passwords and for remember/activation/reset tokens, so a stored
/// digest never reveals which kind of secret produced it.
///
/// The cost is passed explicitly to `digest`, rather than read from global
/// state, so an application configures it once at startup and a test suite
/// can select `HashCost::FAST` without affecting anything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize)]
pub struct HashCost {
    /// Memory cost in KiB.
    pub m_cost: u32,
    /// Number of passes over the memory.
    pub t_cost: u32,
    /// Degree of parallelism.
    pub p_cost: u32,
}

impl HashCost {
    /// Parameters for production use, following current OWASP guidance for
    /// Argon2id (19 MiB memory, 2 iterations, 1 lane). A single hash should
    /// complete in tens of milliseconds on current server hardware; recompute
    /// empirically when deploying to unusual hardware.
    /// https://cheatsheetseries.owasp.org/cheatsheets/Password_Storage_Cheat_Sheet.html#argon2id
    pub const RECOMMENDED: Self = Self {
        m_cost: 19_456,
        t_cost: 2,
        p_cost: 1,
    };

    /// Minimal parameters, suitable only for test suites. A slow hash makes a
    /// test suite that registers many users unbearable, the same way bcrypt's
    /// `MIN_COST` exists for test environments.
    pub const FAST: Self = Self {
        m_cost: 8,
        t_cost: 1,
        p_cost: 1,
    };

    fn engine(self) -> Result<Argon2<'static>, Error> {
        let params = Params::new(self.m_cost, self.t_cost, self.p_cost, None)
            .map_err(Error::InvalidHashCost)?;

        Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
    }
}

/// Computes a salted, one-way digest of the given secret, which can be stored
/// in the database in place of the secret itself. The salt is generated
/// per-call, so two digests of the same secret differ; the output is a PHC
/// string which embeds the algorithm, parameters and salt.
///
/// This function cannot be used to compare a secret against a stored digest;
/// instead, use the `verify` function.
pub fn digest(secret: &Secret, cost: HashCost) -> Result<Digest, Error> {
    let salt = SaltString::generate(rand::thread_rng());

    let hash = cost.engine()?
        .hash_password(secret.0.as_bytes(), &salt)
        .map_err(Error::Hasher)?;

    Ok(Digest::from(hash.to_string()))
}

/// Checks a presented secret against a stored digest, returning `true` only
/// on a match. The comparison is constant-time, and the digest's own embedded
/// parameters are used, so no cost configuration is needed here.
///
/// An absent digest is a legitimate state (never remembered, no outstanding
/// reset) and verifies `false` rather than raising an error. A stored digest
/// which does not parse also verifies `false`; that indicates corruption, so
/// it is logged as an integrity warning.
pub fn verify(presented: &Secret, stored: &Digest) -> bool {
    let Some(stored) = stored.expose() else {
        return false;
    };

    let Ok(hash) = password_hash::PasswordHash::new(stored) else {
        log::warn!("Stored digest does not parse as a PHC string");
        return false;
    };

    let algs: &[&dyn PasswordVerifier] = &[&Argon2::default()];
    match hash.verify_password(algs, presented.0.as_bytes()) {
        Ok(()) => true,
        Err(password_hash::Error::Password) => false,
        Err(e) => {
            log::warn!("Stored digest could not be verified: {e}");
            false
        },
    }
}

/// Computes a digest for a new password. Password digests and token digests
/// share one algorithm; this is the password-named entry point.
pub fn hash_password(password: &Secret, cost: HashCost) -> Result<Digest, Error> {
    digest(password, cost)
}

/// Checks a password against the stored password digest.
pub fn verify_password(password: &Secret, stored: &Digest) -> bool {
    verify(password, stored)
}

/// Generates a fresh random token and its digest. The digest should be stored
/// in the database; the raw token is issued to the client or mailed to the
/// user, and is not re-derivable from the digest.
///
/// Returns `(token, digest)`.
pub(crate) fn generate_token_and_digest(cost: HashCost) -> Result<(Secret, Digest), Error> {
    let raw = tokens::new_token()?;
    let digest = digest(&raw, cost)?;

    Ok((raw, digest))
}

#[cfg(test)]
mod test {
    use super::{
        digest, generate_token_and_digest, verify, Digest, Error, HashCost, Secret,
    };

    #[test]
    fn test_digest_verify() {
        let password = Secret("example".to_string());
        let wrong_password = Secret("something else".to_string());
        let stored = digest(&password, HashCost::FAST).unwrap();

        assert!(verify(&password, &stored), "Correct password should verify");
        assert!(!verify(&wrong_password, &stored), "Wrong password should not verify");
    }

    #[test]
    fn test_digest_salted() {
        let password = Secret("example".to_string());
        let hash1 = digest(&password, HashCost::FAST).unwrap();
        let hash2 = digest(&password, HashCost::FAST).unwrap();

        assert_ne!(
            hash1.expose(), hash2.expose(),
            "Each digest should carry a fresh salt",
        );
        assert!(verify(&password, &hash1));
        assert!(verify(&password, &hash2));
    }

    #[test]
    fn test_absent_digest_verifies_false() {
        let presented = Secret("anything".to_string());
        assert!(!verify(&presented, &Digest::NONE));
    }

    #[test]
    fn test_malformed_digest_verifies_false() {
        let presented = Secret("anything".to_string());
        let corrupt = Digest::from("not a phc string".to_string());
        assert!(!verify(&presented, &corrupt));
    }

    #[test]
    fn test_invalid_cost() {
        let password = Secret("example".to_string());
        match digest(&password, HashCost {m_cost: 0, t_cost: 0, p_cost: 0}) {
            Err(Error::InvalidHashCost(_)) => {}
            result => panic!("Should be InvalidHashCost, was {result:?}"),
        }
    }

    #[test]
    fn test_token_digest() {
        let (raw, stored) = generate_token_and_digest(HashCost::FAST).unwrap();

        assert!(verify(&raw, &stored));
        assert!(!verify(&Secret("guessed".to_string()), &stored));
    }
}
