use std::time::Duration;

/// How long the appellant has to start their appeal after the decision
/// letter was sent; a later letter date routes through the late-appeal page.
pub const DAYS_TO_APPEAL: i64 = 14;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub session_ttl: Duration,
    pub max_file_size_mb: u64,
    /// Identity used when no authentication layer sits in front of us.
    pub dev_user_id: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            session_ttl: Duration::from_secs(20 * 60),
            max_file_size_mb: 100,
            dev_user_id: "dev-user".to_string(),
        }
    }
}
