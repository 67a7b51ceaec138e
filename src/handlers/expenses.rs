// src/handlers/expenses.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedOwner,
    models::property::{CreateExpensePayload, Expense, UpdateExpensePayload},
};

#[utoipa::path(
    post,
    path = "/expenses/{house_id}",
    tag = "expenses",
    security(("bearer" = [])),
    params(("house_id" = i32, Path, description = "Id da casa")),
    request_body = CreateExpensePayload,
    responses(
        (status = 201, description = "Despesa lançada", body = Expense),
        (status = 404, description = "Casa não existe"),
    )
)]
pub async fn create_expense(
    State(app_state): State<AppState>,
    AuthenticatedOwner(owner): AuthenticatedOwner,
    Path(house_id): Path<i32>,
    Json(payload): Json<CreateExpensePayload>,
) -> Result<(StatusCode, Json<Expense>), AppError> {
    let house = app_state
        .property_repo
        .find_house_scoped(owner.id, house_id)
        .await?;

    let created = app_state
        .property_repo
        .create_expense(house.id, payload.kind, payload.value, payload.expense_date)
        .await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    get,
    path = "/expenses/{house_id}",
    tag = "expenses",
    security(("bearer" = [])),
    params(("house_id" = i32, Path, description = "Id da casa")),
    responses((status = 200, description = "Despesas da casa", body = [Expense]))
)]
pub async fn list_expenses(
    State(app_state): State<AppState>,
    AuthenticatedOwner(owner): AuthenticatedOwner,
    Path(house_id): Path<i32>,
) -> Result<Json<Vec<Expense>>, AppError> {
    let house = app_state
        .property_repo
        .find_house_scoped(owner.id, house_id)
        .await?;
    let expenses = app_state.property_repo.list_expenses(house.id).await?;
    Ok(Json(expenses))
}

#[utoipa::path(
    patch,
    path = "/expenses/{expense_id}",
    tag = "expenses",
    security(("bearer" = [])),
    params(("expense_id" = i32, Path, description = "Id da despesa")),
    request_body = UpdateExpensePayload,
    responses(
        (status = 200, description = "Despesa atualizada", body = Expense),
        (status = 404, description = "Despesa não existe"),
        (status = 403, description = "Despesa de outro locador"),
    )
)]
pub async fn update_expense(
    State(app_state): State<AppState>,
    AuthenticatedOwner(owner): AuthenticatedOwner,
    Path(expense_id): Path<i32>,
    Json(payload): Json<UpdateExpensePayload>,
) -> Result<Json<Expense>, AppError> {
    let mut expense = app_state
        .property_repo
        .find_expense_scoped(owner.id, expense_id)
        .await?;

    if let Some(kind) = payload.kind {
        expense.kind = kind;
    }
    if let Some(value) = payload.value {
        expense.value = value;
    }
    if let Some(expense_date) = payload.expense_date {
        expense.expense_date = expense_date;
    }

    let updated = app_state.property_repo.save_expense(&expense).await?;
    Ok(Json(updated))
}

#[utoipa::path(
    delete,
    path = "/expenses/{expense_id}",
    tag = "expenses",
    security(("bearer" = [])),
    params(("expense_id" = i32, Path, description = "Id da despesa")),
    responses((status = 204, description = "Despesa removida"))
)]
pub async fn delete_expense(
    State(app_state): State<AppState>,
    AuthenticatedOwner(owner): AuthenticatedOwner,
    Path(expense_id): Path<i32>,
) -> Result<StatusCode, AppError> {
    let expense = app_state
        .property_repo
        .find_expense_scoped(owner.id, expense_id)
        .await?;
    app_state.property_repo.delete_expense(expense.id).await?;
    Ok(StatusCode::NO_CONTENT)
}
