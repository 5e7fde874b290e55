//! Application state for bookstore-server

use std::sync::Arc;

use aws_sdk_sesv2::Client as SesClient;
use sqlx::SqlitePool;

use crate::config::Config;
use crate::db;
use crate::email::{LogMailer, Mailer, SesMailer};
use crate::live::PickupHub;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// SQLite connection pool
    pub pool: SqlitePool,
    /// JWT secret for user authentication
    pub jwt_secret: String,
    /// Order confirmation delivery
    pub mailer: Arc<dyn Mailer>,
    /// Real-time pickup alerts for staff consoles
    pub pickup_hub: PickupHub,
}

impl AppState {
    /// Create a new AppState
    pub async fn new(config: &Config) -> Result<Self, BoxError> {
        let pool = db::connect(&config.database_path).await?;

        db::users::seed_admin(&pool, &config.admin_email, &config.admin_password).await?;

        let mailer: Arc<dyn Mailer> = if config.ses_from_email.is_empty() {
            tracing::info!("SES_FROM_EMAIL not set; order confirmations are log-only");
            Arc::new(LogMailer)
        } else {
            let aws_config =
                aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
            let ses = SesClient::new(&aws_config);
            Arc::new(SesMailer::new(ses, config.ses_from_email.clone()))
        };

        Ok(Self {
            pool,
            jwt_secret: config.jwt_secret.clone(),
            mailer,
            pickup_hub: PickupHub::new(),
        })
    }
}
