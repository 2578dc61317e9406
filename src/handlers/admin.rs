//! Administrative routes.

use crate::bootstrap;
use crate::error::AppError;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode};

/// POST /admin/bootstrap: drop, recreate and seed both tables in one
/// transaction. Either the whole demo dataset lands or nothing changes.
pub async fn bootstrap(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    let mut tx = state.pool.begin().await?;
    bootstrap::reset_and_seed(&mut tx).await?;
    tx.commit().await?;
    Ok(StatusCode::NO_CONTENT)
}
