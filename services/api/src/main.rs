use anyhow::Result;
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

mod config;
mod error;
mod mailer;
mod middleware;
mod models;
mod password;
mod repositories;
mod routes;
mod state;
#[cfg(test)]
mod tests;
mod validation;

use common::database::{DatabaseConfig, init_pool};
use tokio::net::TcpListener;

use crate::{
    config::ServiceConfig,
    mailer::{Mailer, MailerConfig},
    repositories::{
        CardRepository, DeckRepository, FriendRequestRepository, LabelRepository,
        StudySetRepository, TokenRepository, UserRepository, XpRepository,
    },
    state::AppState,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    info!("Starting API service");

    let config = ServiceConfig::from_env()?;

    // Initialize database connection pool
    let db_config = DatabaseConfig::from_env()?;
    let pool = init_pool(&db_config).await?;

    // Check database connectivity
    if common::database::health_check(&pool).await? {
        info!("Database connection successful");
    } else {
        anyhow::bail!("Failed to connect to database");
    }

    sqlx::migrate!("./migrations").run(&pool).await?;
    info!("Database migrations applied");

    let mailer = MailerConfig::from_env().map(Mailer::new);
    if mailer.is_none() {
        info!("No mail endpoint configured; verification emails disabled");
    }

    // Initialize repositories
    let user_repository = UserRepository::new(pool.clone());
    let token_repository = TokenRepository::new(pool.clone(), config.token_ttl_seconds);
    let deck_repository = DeckRepository::new(pool.clone());
    let card_repository = CardRepository::new(pool.clone());
    let study_set_repository = StudySetRepository::new(pool.clone());
    let label_repository = LabelRepository::new(pool.clone());
    let friend_request_repository = FriendRequestRepository::new(pool.clone());
    let xp_repository = XpRepository::new(pool);

    let bind_addr = config.bind_addr.clone();

    let app_state = AppState {
        config,
        user_repository,
        token_repository,
        deck_repository,
        card_repository,
        study_set_repository,
        label_repository,
        friend_request_repository,
        xp_repository,
        mailer,
    };

    // Start the web server
    let app = routes::create_router(app_state);

    let listener = TcpListener::bind(&bind_addr).await?;
    info!("API service listening on {}", bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
