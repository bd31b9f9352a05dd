use async_trait::async_trait;
use tracing::info;

use crate::auth::repo_types::User;

/// Delivers password-reset tokens to their owner.
#[async_trait]
pub trait ResetMailer: Send + Sync {
    async fn send_reset(&self, user: &User, token: &str) -> anyhow::Result<()>;
}

/// Records the reset in the log. There is no mail transport wired in yet.
#[derive(Debug, Default, Clone)]
pub struct LogMailer;

#[async_trait]
impl ResetMailer for LogMailer {
    async fn send_reset(&self, user: &User, _token: &str) -> anyhow::Result<()> {
        info!(user_id = %user.id, email = %user.email, "password reset requested; no mail transport configured");
        Ok(())
    }
}
