// src/handlers/dashboard.rs

use axum::{extract::State, Json};

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedOwner,
    models::dashboard::{CashFlow, HousesAvailability, PaymentStatus, Totals},
};

#[utoipa::path(
    get,
    path = "/dashboard/totals",
    tag = "dashboard",
    security(("bearer" = [])),
    responses((status = 200, description = "Totais de propriedades, casas e inquilinos", body = Totals))
)]
pub async fn totals(
    State(app_state): State<AppState>,
    AuthenticatedOwner(owner): AuthenticatedOwner,
) -> Result<Json<Totals>, AppError> {
    let totals = app_state.dashboard_service.totals(owner.id).await?;
    Ok(Json(totals))
}

#[utoipa::path(
    get,
    path = "/dashboard/houses-availability",
    tag = "dashboard",
    security(("bearer" = [])),
    responses((status = 200, description = "Casas por status de ocupação", body = HousesAvailability))
)]
pub async fn houses_availability(
    State(app_state): State<AppState>,
    AuthenticatedOwner(owner): AuthenticatedOwner,
) -> Result<Json<HousesAvailability>, AppError> {
    let availability = app_state
        .dashboard_service
        .houses_availability(owner.id)
        .await?;
    Ok(Json(availability))
}

#[utoipa::path(
    get,
    path = "/dashboard/cash-flow",
    tag = "dashboard",
    security(("bearer" = [])),
    responses((status = 200, description = "Receita, despesa e lucro do mês corrente", body = CashFlow))
)]
pub async fn cash_flow(
    State(app_state): State<AppState>,
    AuthenticatedOwner(owner): AuthenticatedOwner,
) -> Result<Json<CashFlow>, AppError> {
    let cash_flow = app_state.dashboard_service.cash_flow(owner.id).await?;
    Ok(Json(cash_flow))
}

#[utoipa::path(
    get,
    path = "/dashboard/payment-status",
    tag = "dashboard",
    security(("bearer" = [])),
    responses((status = 200, description = "Percentuais de parcelas pagas, atrasadas e pendentes", body = PaymentStatus))
)]
pub async fn payment_status(
    State(app_state): State<AppState>,
    AuthenticatedOwner(owner): AuthenticatedOwner,
) -> Result<Json<PaymentStatus>, AppError> {
    let status = app_state.dashboard_service.payment_status(owner.id).await?;
    Ok(Json(status))
}
