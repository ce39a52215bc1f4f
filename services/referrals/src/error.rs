use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Referrals service domain error variants.
#[derive(Debug, thiserror::Error)]
pub enum ReferralServiceError {
    #[error("identification must be digits only")]
    InvalidIdentification,
    #[error("missing data")]
    MissingData,
    #[error("terms and privacy consent are required")]
    ConsentRequired,
    #[error("referral chain would loop")]
    ReferralChainLoop,
    #[error("identification already registered")]
    IdentificationTaken,
    #[error("referral already registered")]
    ReferralExists,
    #[error("referral code already in use")]
    ReferralCodeTaken,
    #[error("referral code not found")]
    ReferralCodeNotFound,
    #[error("user not found")]
    UserNotFound,
    #[error("referral not found")]
    ReferralNotFound,
    #[error("identification or password incorrect")]
    InvalidCredentials,
    #[error("forbidden")]
    Forbidden,
    #[error("could not generate a referral code")]
    CodeGenerationExhausted,
    #[error("profile creation failed")]
    ProfileCreationFailed,
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl ReferralServiceError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidIdentification => "INVALID_IDENTIFICATION",
            Self::MissingData => "MISSING_DATA",
            Self::ConsentRequired => "CONSENT_REQUIRED",
            Self::ReferralChainLoop => "REFERRAL_CHAIN_LOOP",
            Self::IdentificationTaken => "IDENTIFICATION_TAKEN",
            Self::ReferralExists => "REFERRAL_EXISTS",
            Self::ReferralCodeTaken => "REFERRAL_CODE_TAKEN",
            Self::ReferralCodeNotFound => "REFERRAL_CODE_NOT_FOUND",
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::ReferralNotFound => "REFERRAL_NOT_FOUND",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::Forbidden => "FORBIDDEN",
            Self::CodeGenerationExhausted => "CODE_GENERATION_EXHAUSTED",
            Self::ProfileCreationFailed => "PROFILE_CREATION_FAILED",
            Self::Internal(_) => "INTERNAL",
        }
    }
}

impl IntoResponse for ReferralServiceError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::InvalidIdentification
            | Self::MissingData
            | Self::ConsentRequired
            | Self::ReferralChainLoop => StatusCode::BAD_REQUEST,
            Self::IdentificationTaken | Self::ReferralExists | Self::ReferralCodeTaken => {
                StatusCode::CONFLICT
            }
            Self::ReferralCodeNotFound | Self::UserNotFound | Self::ReferralNotFound => {
                StatusCode::NOT_FOUND
            }
            Self::InvalidCredentials => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::CodeGenerationExhausted | Self::ProfileCreationFailed | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        if let Self::Internal(ref e) = self {
            tracing::error!(error = %e, kind = "INTERNAL", "internal error");
        }
        let body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        (status, axum::Json(body)).into_response()
    }
}
