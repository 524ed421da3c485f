//! Rudolph service entry point.

use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::EnvFilter;

use rudolph::adapters::auth::JwtIdentityProvider;
use rudolph::adapters::http::{app, ElicitationHandlers};
use rudolph::adapters::memory::StaticQuestionSource;
use rudolph::adapters::postgres::{
    PostgresAnswerEventStore, PostgresEngagementRepository, PostgresProfileRepository,
};
use rudolph::adapters::question_bank::{default_catalog, YamlQuestionSource};
use rudolph::adapters::storage::FileResponseCache;
use rudolph::application::handlers::{
    GetCurrentHandler, GetEngagementHandler, GetResultHandler, StartSessionHandler,
    SubmitAnswerHandler,
};
use rudolph::application::ActiveSessions;
use rudolph::config::AppConfig;
use rudolph::domain::elicitation::{FixedOrder, SelectionStrategy, Shuffled};
use rudolph::ports::{
    AnswerEventStore, EngagementRepository, IdentityProvider, ProfileRepository, QuestionSource,
    ResponseCache,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level)),
        )
        .init();

    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .acquire_timeout(config.database.acquire_timeout())
        .connect(&config.database.url)
        .await?;

    if config.database.run_migrations {
        sqlx::migrate!("./migrations").run(&pool).await?;
        tracing::info!("database migrations applied");
    }

    let identity: Arc<dyn IdentityProvider> =
        Arc::new(JwtIdentityProvider::new(&config.auth.jwt_secret));

    let questions: Arc<dyn QuestionSource> = match &config.question_bank.path {
        Some(path) => {
            tracing::info!(path = %path, "loading question bank from file");
            Arc::new(YamlQuestionSource::new(path))
        }
        None => Arc::new(StaticQuestionSource::new(default_catalog()?)),
    };

    let strategy: Arc<dyn SelectionStrategy> = if config.question_bank.shuffle {
        match config.question_bank.shuffle_seed {
            Some(seed) => Arc::new(Shuffled::with_seed(seed)),
            None => Arc::new(Shuffled::new()),
        }
    } else {
        Arc::new(FixedOrder)
    };

    let profiles: Arc<dyn ProfileRepository> =
        Arc::new(PostgresProfileRepository::new(pool.clone()));
    let answer_log: Arc<dyn AnswerEventStore> =
        Arc::new(PostgresAnswerEventStore::new(pool.clone()));
    let engagement: Arc<dyn EngagementRepository> =
        Arc::new(PostgresEngagementRepository::new(pool.clone()));
    let cache: Arc<dyn ResponseCache> = Arc::new(FileResponseCache::new(&config.cache.dir));
    let sessions = Arc::new(ActiveSessions::new());
    let retry = config.persistence.retry_policy();

    let handlers = ElicitationHandlers::new(
        Arc::new(StartSessionHandler::new(
            identity.clone(),
            questions.clone(),
            answer_log.clone(),
            cache.clone(),
            strategy,
            sessions.clone(),
        )),
        Arc::new(SubmitAnswerHandler::new(
            identity.clone(),
            profiles.clone(),
            answer_log,
            engagement.clone(),
            cache,
            sessions.clone(),
            retry,
        )),
        Arc::new(GetCurrentHandler::new(identity.clone(), sessions.clone())),
        Arc::new(GetResultHandler::new(
            identity.clone(),
            questions,
            profiles,
            sessions,
        )),
        Arc::new(GetEngagementHandler::new(identity, engagement)),
    );

    let addr = config.server.socket_addr();
    tracing::info!(%addr, "rudolph listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app(handlers)).await?;

    Ok(())
}
