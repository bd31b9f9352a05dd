use std::sync::Arc;

use anyhow::Context;
use sqlx::postgres::PgPoolOptions;
use tracing::{info, warn};

use crate::analysis::{MockAnalyzer, SiteAnalyzer};
use crate::auth::{
    jwt::JwtKeys,
    mailer::LogMailer,
    memory::MemoryUserStore,
    repo::{PgUserStore, UserStore},
    services::AuthService,
};
use crate::config::{AppConfig, JwtConfig};

/// Embedded schema migrations, applied at startup against Postgres.
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub auth: Arc<AuthService>,
    pub analyzer: Arc<dyn SiteAnalyzer>,
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);

        let users: Arc<dyn UserStore> = match &config.database_url {
            Some(url) => {
                let db = PgPoolOptions::new()
                    .max_connections(10)
                    .connect(url)
                    .await
                    .context("connect to database")?;

                MIGRATOR.run(&db).await.context("run migrations")?;
                info!("using postgres user store");
                Arc::new(PgUserStore::new(db))
            }
            None => {
                warn!("DATABASE_URL not set; users are kept in memory and lost on restart");
                Arc::new(MemoryUserStore::new())
            }
        };

        Ok(Self::from_parts(config, users, Arc::new(MockAnalyzer)))
    }

    pub fn from_parts(
        config: Arc<AppConfig>,
        users: Arc<dyn UserStore>,
        analyzer: Arc<dyn SiteAnalyzer>,
    ) -> Self {
        let auth = AuthService::new(
            users,
            JwtKeys::from(&config.jwt),
            Arc::new(LogMailer),
            config.expose_reset_token,
        );
        Self {
            config,
            auth: Arc::new(auth),
            analyzer,
        }
    }

    /// In-memory state with a fixed test secret.
    pub fn fake() -> Self {
        let config = Arc::new(AppConfig {
            database_url: None,
            jwt: JwtConfig {
                secret: "test-secret".into(),
                issuer: "test-issuer".into(),
                audience: "test-aud".into(),
                ttl_minutes: 60 * 24,
                reset_ttl_minutes: 60,
            },
            expose_reset_token: true,
            host: "127.0.0.1".into(),
            port: 0,
        });
        Self::from_parts(
            config,
            Arc::new(MemoryUserStore::new()),
            Arc::new(MockAnalyzer),
        )
    }
}
