//! Referral code minting and resolution.
//!
//! Codes are `{prefix}-{6 uppercase alphanumerics}`. The store's unique
//! constraint on `referral_code` is the final authority on uniqueness;
//! minting only pre-checks to keep insert collisions rare.

use rand::RngExt;

use crate::domain::repository::UserRepository;
use crate::domain::types::User;
use crate::error::ReferralServiceError;

const CODE_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
const CODE_SUFFIX_LEN: usize = 6;
const MAX_MINT_ATTEMPTS: u32 = 5;

/// Random candidate code.
pub fn mint_code(prefix: &str) -> String {
    let mut rng = rand::rng();
    let suffix: String = (0..CODE_SUFFIX_LEN)
        .map(|_| CODE_ALPHABET[rng.random_range(0..CODE_ALPHABET.len())] as char)
        .collect();
    format!("{prefix}-{suffix}")
}

/// Deterministic candidate derived from the identification: last six
/// digits, uppercased. Not guaranteed unique; the store constraint still
/// applies and the caller retries with `mint_code` on collision.
pub fn derive_code(prefix: &str, identification: &str) -> String {
    let tail: String = identification
        .chars()
        .rev()
        .take(CODE_SUFFIX_LEN)
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect();
    format!("{prefix}-{}", tail.to_uppercase())
}

// ── GenerateReferralCode ─────────────────────────────────────────────────────

pub struct GenerateReferralCodeUseCase<U: UserRepository> {
    pub users: U,
    pub prefix: String,
}

impl<U: UserRepository> GenerateReferralCodeUseCase<U> {
    /// Mint a code that is free at the time of the check.
    ///
    /// When the existence check itself fails (store aggregate
    /// unavailable), falls back to deriving a candidate from the
    /// identification; the insert's unique constraint still guards it.
    pub async fn execute(&self, identification: &str) -> Result<String, ReferralServiceError> {
        for _ in 0..MAX_MINT_ATTEMPTS {
            let candidate = mint_code(&self.prefix);
            match self.users.referral_code_exists(&candidate).await {
                Ok(false) => return Ok(candidate),
                Ok(true) => continue,
                Err(ReferralServiceError::Internal(e)) => {
                    tracing::warn!(
                        error = %e,
                        "code existence check unavailable, deriving from identification"
                    );
                    return Ok(derive_code(&self.prefix, identification));
                }
                Err(other) => return Err(other),
            }
        }
        Err(ReferralServiceError::CodeGenerationExhausted)
    }
}

// ── ResolveReferralCode ──────────────────────────────────────────────────────

pub struct ResolveReferralCodeUseCase<U: UserRepository> {
    pub users: U,
}

impl<U: UserRepository> ResolveReferralCodeUseCase<U> {
    pub async fn execute(&self, code: &str) -> Result<User, ReferralServiceError> {
        self.users
            .find_by_referral_code(code)
            .await?
            .ok_or(ReferralServiceError::ReferralCodeNotFound)
    }
}
