use std::sync::Arc;

use anyhow::Context as _;

use crate::database;
use crate::routes::{routes, AppState};
use crate::settings::Settings;
use crate::store::PgUserStore;

/// Connect to Postgres, build the router, and serve until shutdown.
pub async fn launch() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = Settings::new().context("Failed to load settings")?;

    let pool = database::connect(&settings).await?;
    database::ensure_schema(&pool).await?;

    let state = AppState::new(
        Arc::new(PgUserStore::new(pool)),
        settings.database.database.clone(),
    );
    let app = routes(state);

    let addr = settings.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}
