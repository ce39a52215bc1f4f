use chrono::FixedOffset;

/// Referrals service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ReferralsConfig {
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// TCP port for the HTTP server (default 3420). Env var: `REFERRALS_PORT`.
    pub port: u16,
    /// Base URL of the external identity provider REST API.
    pub identity_url: String,
    /// Domain used for synthetic account emails (default "enlace.vote").
    pub email_domain: String,
    /// Prefix of minted referral codes (default "GGF").
    pub referral_code_prefix: String,
    /// UTC offset of the campaign timezone in hours (default -5).
    /// Month boundaries for dashboard stats are computed in this zone.
    pub utc_offset_hours: i32,
    /// Public app URL embedded in shareable registration links.
    pub public_app_url: String,
}

impl ReferralsConfig {
    pub fn from_env() -> Self {
        Self {
            database_url: std::env::var("DATABASE_URL").expect("DATABASE_URL"),
            port: std::env::var("REFERRALS_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3420),
            identity_url: std::env::var("IDENTITY_URL").expect("IDENTITY_URL"),
            email_domain: std::env::var("EMAIL_DOMAIN").unwrap_or_else(|_| "enlace.vote".into()),
            referral_code_prefix: std::env::var("REFERRAL_CODE_PREFIX")
                .unwrap_or_else(|_| "GGF".into()),
            utc_offset_hours: std::env::var("CAMPAIGN_UTC_OFFSET_HOURS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(-5),
            public_app_url: std::env::var("PUBLIC_APP_URL")
                .unwrap_or_else(|_| "https://app.enlace.vote".into()),
        }
    }

    /// Campaign timezone as a fixed offset. Falls back to UTC if the
    /// configured offset is out of range.
    pub fn campaign_offset(&self) -> FixedOffset {
        FixedOffset::east_opt(self.utc_offset_hours * 3600)
            .unwrap_or_else(|| FixedOffset::east_opt(0).unwrap())
    }
}
