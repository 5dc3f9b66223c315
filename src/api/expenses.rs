use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;

use crate::api::state::AppState;
use crate::db::{Expense, ExpenseRepository, NewExpense};
use crate::error::AppError;

#[derive(Debug, Serialize)]
pub struct DeletedResponse {
    pub id: String,
}

/// GET /expenses
pub async fn list_expenses(
    State(state): State<AppState>,
) -> Result<Json<Vec<Expense>>, AppError> {
    let expenses = ExpenseRepository::list(&state.db).await?;
    Ok(Json(expenses))
}

/// POST /expenses
pub async fn create_expense(
    State(state): State<AppState>,
    Json(req): Json<NewExpense>,
) -> Result<(StatusCode, Json<Expense>), AppError> {
    let expense = ExpenseRepository::create(&state.db, &req).await?;
    tracing::debug!("Expense {} recorded", expense.id);
    Ok((StatusCode::CREATED, Json(expense)))
}

/// DELETE /expenses/:id
///
/// Answers with the id whether or not a row was removed.
pub async fn delete_expense(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeletedResponse>, AppError> {
    ExpenseRepository::delete(&state.db, &id).await?;
    Ok(Json(DeletedResponse { id }))
}
