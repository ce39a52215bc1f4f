//! Synthetic email transform.
//!
//! Accounts authenticate against the identity provider with an email
//! address, but volunteers sign up with their identification number only.
//! The bridge is a fixed, reversible transform:
//! `{identification}@{campaign-domain}`. The address is never a real
//! mailbox.

/// True when `identification` is a non-empty string of ASCII digits.
pub fn is_valid_identification(identification: &str) -> bool {
    !identification.is_empty() && identification.bytes().all(|b| b.is_ascii_digit())
}

/// Build the synthetic email for an identification number.
pub fn synthetic_email(identification: &str, campaign_domain: &str) -> String {
    format!("{identification}@{campaign_domain}")
}

/// Recover the identification from a synthetic email.
///
/// Returns `None` when the address does not belong to the campaign domain
/// or the local part is not a plain identification.
pub fn identification_from_email(email: &str, campaign_domain: &str) -> Option<String> {
    let local = email.strip_suffix(campaign_domain)?.strip_suffix('@')?;
    is_valid_identification(local).then(|| local.to_owned())
}
