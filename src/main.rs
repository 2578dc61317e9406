//! Composition root: settings, pool, table creation, router, server.

use sqlx::postgres::PgPoolOptions;
use staffdir::dao::{DepartmentDao, EmployeeDao};
use staffdir::{routes, AppState, Settings};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("staffdir=debug,tower_http=info")),
        )
        .init();

    let settings = Settings::from_env()?;
    let pool = PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .connect(&settings.database_url)
        .await?;

    // Create tables up front so a fresh database serves requests immediately.
    let mut tx = pool.begin().await?;
    DepartmentDao::create_table_if_not_exists(&mut tx).await?;
    EmployeeDao::create_table_if_not_exists(&mut tx).await?;
    tx.commit().await?;

    let state = AppState { pool };
    let app = routes::app(state);

    let listener = TcpListener::bind(&settings.bind_addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
