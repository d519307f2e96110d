//! Expense group statuses API endpoints.

use api_types::status::ExpenseGroupStatus;
use axum::{
    Json,
    extract::{Path, State},
};

use crate::{ServerError, server::ServerState};

pub async fn list(
    State(state): State<ServerState>,
) -> Result<Json<Vec<ExpenseGroupStatus>>, ServerError> {
    Ok(Json(state.engine.expense_group_statuses().await?))
}

pub async fn get(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
) -> Result<Json<ExpenseGroupStatus>, ServerError> {
    Ok(Json(state.engine.expense_group_status(id).await?))
}
